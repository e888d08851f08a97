use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};


#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ResourceKind {
    Device,
    Callflow,
    Conference,
    User,
}

impl ResourceKind {
    /// Path segment of the collection under `/accounts/{account_id}/`.
    pub fn collection(&self) -> &'static str {
        match self {
            ResourceKind::Device => "devices",
            ResourceKind::Callflow => "callflows",
            ResourceKind::Conference => "conferences",
            ResourceKind::User => "users",
        }
    }
}


/// Field filters for list requests. Keys are dotted document paths
/// (`owner_id`, `mobile.mdn`); the transport adds the `filter_` prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    fields: Vec<(String, String)>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    pub fn owner(self, owner_id: &str) -> Self {
        self.field("owner_id", owner_id)
    }

    pub fn kind(self, kind: &str) -> Self {
        self.field("type", kind)
    }

    pub fn mobile_mdn(self, mdn: &str) -> Self {
        self.field("mobile.mdn", mdn)
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Query string pairs, always ending with the unpaginated override.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .fields
            .iter()
            .map(|(key, value)| (format!("filter_{}", key), value.clone()))
            .collect();
        pairs.push(("paginate".to_string(), "false".to_string()));
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs_are_unpaginated() {
        let filters = Filters::new().owner("user-1").kind("mobile");
        let pairs = filters.query_pairs();

        assert_eq!(pairs[0], ("filter_owner_id".to_string(), "user-1".to_string()));
        assert_eq!(pairs[1], ("filter_type".to_string(), "mobile".to_string()));
        assert_eq!(pairs.last(), Some(&("paginate".to_string(), "false".to_string())));
    }

    #[test]
    fn test_empty_filters_still_unpaginated() {
        let pairs = Filters::new().query_pairs();
        assert_eq!(pairs, vec![("paginate".to_string(), "false".to_string())]);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ResourceKind::Callflow.to_string(), "callflow");
        assert_eq!(ResourceKind::Conference.collection(), "conferences");
        assert_eq!("device".parse::<ResourceKind>().ok(), Some(ResourceKind::Device));
    }
}

//! In-memory `ResourceApi` for tests.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};

use super::backend::ResourceApi;
use super::error::ApiError;
use super::resource::{Filters, ResourceKind};


#[derive(Debug, Clone, PartialEq)]
pub struct RecordedUpdate {
    pub kind: ResourceKind,
    pub id: String,
    pub body: Value,
}


#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDelete {
    pub account_id: String,
    pub user_id: String,
    pub object_types: Vec<String>,
}


#[derive(Default)]
pub struct InMemoryApi {
    documents: Mutex<BTreeMap<(String, String), Value>>,
    failing_lists: Mutex<HashSet<String>>,
    failing_updates: Mutex<HashSet<String>>,
    updates: Mutex<Vec<RecordedUpdate>>,
    deletes: Mutex<Vec<RecordedDelete>>,
}

impl InMemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `document` under its `id` field.
    pub fn insert(&self, kind: ResourceKind, document: Value) {
        let id = document["id"].as_str().unwrap_or_default().to_string();
        self.documents
            .lock()
            .insert((kind.to_string(), id), document);
    }

    pub fn document(&self, kind: ResourceKind, id: &str) -> Option<Value> {
        self.documents
            .lock()
            .get(&(kind.to_string(), id.to_string()))
            .cloned()
    }

    pub fn fail_list(&self, kind: ResourceKind) {
        self.failing_lists.lock().insert(kind.to_string());
    }

    pub fn fail_update(&self, kind: ResourceKind) {
        self.failing_updates.lock().insert(kind.to_string());
    }

    pub fn updates(&self) -> Vec<RecordedUpdate> {
        self.updates.lock().clone()
    }

    pub fn deletes(&self) -> Vec<RecordedDelete> {
        self.deletes.lock().clone()
    }

    fn unavailable(kind: ResourceKind) -> ApiError {
        ApiError::Status {
            status: 503,
            message: format!("{} service unavailable", kind),
        }
    }
}


/// Resolves a dotted path such as `mobile.mdn` and renders scalars as strings.
fn field_as_string(document: &Value, path: &str) -> Option<String> {
    let value = path
        .split('.')
        .try_fold(document, |current, segment| current.get(segment))?;

    match value {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[async_trait]
impl ResourceApi for InMemoryApi {
    async fn get(&self, kind: ResourceKind, _account_id: &str, id: &str) -> Result<Value, ApiError> {
        self.document(kind, id)
            .ok_or_else(|| ApiError::not_found(kind, id))
    }

    async fn list(
        &self,
        kind: ResourceKind,
        _account_id: &str,
        filters: &Filters,
    ) -> Result<Vec<Value>, ApiError> {
        if self.failing_lists.lock().contains(kind.as_ref()) {
            return Err(Self::unavailable(kind));
        }

        let kind_key = kind.to_string();
        let documents = self.documents.lock();
        Ok(documents
            .iter()
            .filter(|((stored_kind, _), _)| *stored_kind == kind_key)
            .map(|(_, document)| document)
            .filter(|document| {
                filters
                    .fields()
                    .iter()
                    .all(|(key, value)| {
                        field_as_string(document, key).as_deref() == Some(value.as_str())
                    })
            })
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        kind: ResourceKind,
        _account_id: &str,
        id: &str,
        body: Value,
    ) -> Result<Value, ApiError> {
        if self.failing_updates.lock().contains(kind.as_ref()) {
            return Err(Self::unavailable(kind));
        }

        self.updates.lock().push(RecordedUpdate {
            kind,
            id: id.to_string(),
            body: body.clone(),
        });
        self.documents
            .lock()
            .insert((kind.to_string(), id.to_string()), body.clone());
        Ok(body)
    }

    async fn delete_user(
        &self,
        account_id: &str,
        user_id: &str,
        object_types: &[&str],
    ) -> Result<Value, ApiError> {
        self.deletes.lock().push(RecordedDelete {
            account_id: account_id.to_string(),
            user_id: user_id.to_string(),
            object_types: object_types.iter().map(|t| t.to_string()).collect(),
        });

        let removed = self
            .documents
            .lock()
            .remove(&(ResourceKind::User.to_string(), user_id.to_string()));
        Ok(removed.unwrap_or_else(|| json!({ "id": user_id })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_filters_on_nested_fields() {
        let api = InMemoryApi::new();
        api.insert(ResourceKind::Device, json!({"id": "dev-1", "mobile": {"mdn": "5551234567"}}));
        api.insert(ResourceKind::Device, json!({"id": "dev-2", "mobile": {"mdn": "5559999999"}}));
        api.insert(ResourceKind::Device, json!({"id": "dev-3"}));

        let found = api
            .list(ResourceKind::Device, "acct", &Filters::new().mobile_mdn("5551234567"))
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["id"], "dev-1");
    }

    #[tokio::test]
    async fn test_missing_document_is_not_found() {
        let api = InMemoryApi::new();
        let err = api.get(ResourceKind::Conference, "acct", "nope").await.unwrap_err();
        assert!(err.is_not_found());
    }
}

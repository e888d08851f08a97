use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};


/// Callflow classification that marks a mobile device callflow.
pub const MOBILE_CALLFLOW_TYPE: &str = "mobile";


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            extra: Map::new(),
        }
    }
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobileDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mdn: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<MobileDescriptor>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conference {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Callflow {
    pub id: String,
    #[serde(default)]
    pub numbers: Vec<String>,
    /// Routing tree: `{module, data, children}`.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub flow: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Callflow {
    pub fn is_mobile(&self) -> bool {
        self.kind.as_deref() == Some(MOBILE_CALLFLOW_TYPE)
    }

    pub fn primary_number(&self) -> Option<&str> {
        self.numbers.first().map(String::as_str)
    }
}

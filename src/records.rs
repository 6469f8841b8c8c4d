use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One breach an address appeared in.
///
/// Truncated lookups only carry `Name`; verbose lookups fill the rest. Fields
/// the service adds that are not modelled here are kept in `extra` so the
/// detail dump passes them through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BreachRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breach_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pwn_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data_classes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One public paste an address appeared in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PasteRecord {
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_count: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parsed body of a successful lookup. The two endpoints use different schemas.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Breaches(Vec<BreachRecord>),
    Pastes(Vec<PasteRecord>),
}

impl Payload {
    pub fn len(&self) -> usize {
        match self {
            Payload::Breaches(b) => b.len(),
            Payload::Pastes(p) => p.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `None` when this is a paste payload.
    pub fn into_breaches(self) -> Option<Vec<BreachRecord>> {
        match self {
            Payload::Breaches(b) => Some(b),
            Payload::Pastes(_) => None,
        }
    }

    /// `None` when this is a breach payload.
    pub fn into_pastes(self) -> Option<Vec<PasteRecord>> {
        match self {
            Payload::Pastes(p) => Some(p),
            Payload::Breaches(_) => None,
        }
    }
}

//! Service metadata assigned at boot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Kind reported for every position service.
pub const SERVICE_KIND: &str = "service";

/// Identity of a booted service instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceMetadata {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ServiceMetadata {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: SERVICE_KIND.to_string(),
        }
    }

    /// Flatten into the `id` / `name` / `type` map handed to callers.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("id".to_string(), self.id.clone()),
            ("name".to_string(), self.name.clone()),
            ("type".to_string(), self.kind.clone()),
        ])
    }
}

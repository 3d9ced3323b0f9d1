use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Governance metadata attached to a folder (column name -> cell value)
pub type FolderMetadata = BTreeMap<String, String>;

/// A named folder as reported by one of the data sources
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FolderRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: FolderMetadata,
}

impl FolderRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metadata: FolderMetadata::new(),
        }
    }

    /// Attach a metadata value, replacing any previous value for `key`
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// The disposition plan, if the governance sheet carries one
    pub fn plan(&self) -> Option<&str> {
        self.metadata.get("plan").map(String::as_str)
    }
}

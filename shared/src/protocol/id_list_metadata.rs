use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::ProtocolError;

/// Server-side description of one id list, as returned by `get_id_lists`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdListMetadata {
    #[serde(default)]
    pub url: Option<String>,
    /// Total bytes the server has published for the current file
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub creation_time: i64,
    /// Generation id. A new value means the backing file was replaced.
    #[serde(default, rename = "fileID", alias = "fileId")]
    pub file_id: Option<String>,
}

impl IdListMetadata {
    /// Entries without a url or file id cannot be downloaded.
    pub fn is_downloadable(&self) -> bool {
        self.url.is_some() && self.file_id.is_some()
    }
}

/// Body of a `get_id_lists` reply, keyed by list name.
///
/// Entries are decoded one at a time. An entry that does not decode is left
/// out of [`IdListMetadataResponse::iter`] but still counts as present, so a
/// local copy of that list is kept until the server sends a usable entry or
/// drops the name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdListMetadataResponse {
    pub lists: HashMap<String, IdListMetadata>,
    pub malformed: HashSet<String>,
}

impl IdListMetadataResponse {
    pub fn from_json(body: &str) -> Result<Self, ProtocolError> {
        let entries: Map<String, Value> = serde_json::from_str(body)
            .map_err(|e| ProtocolError::malformed("id list metadata", e))?;

        let mut response = Self::default();
        for (name, entry) in entries {
            match serde_json::from_value::<IdListMetadata>(entry) {
                Ok(metadata) => {
                    response.lists.insert(name, metadata);
                }
                Err(error) => {
                    log::warn!("Skipping malformed metadata for id list '{}': {}", name, error);
                    response.malformed.insert(name);
                }
            }
        }
        Ok(response)
    }

    pub fn get(&self, name: &str) -> Option<&IdListMetadata> {
        self.lists.get(name)
    }

    /// Whether the server listed `name`, decodable or not.
    pub fn contains(&self, name: &str) -> bool {
        self.lists.contains_key(name) || self.malformed.contains(name)
    }

    /// Decodable entries only.
    pub fn iter(&self) -> std::collections::hash_map::Iter<'_, String, IdListMetadata> {
        self.lists.iter()
    }

    pub fn is_malformed(&self, name: &str) -> bool {
        self.malformed.contains(name)
    }

    pub fn len(&self) -> usize {
        self.lists.len() + self.malformed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty() && self.malformed.is_empty()
    }
}

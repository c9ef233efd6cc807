use serde::{Deserialize, Serialize};

use crate::types::{null_as_empty, AutomationId, BoxId, Timestamp};

/// A filter-and-transform rule: source records matching `source_tags`
/// (empty = all) are piped through `command`, results land in
/// `destination_container` tagged with `destination_tags`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Automation {
    pub id: AutomationId,
    pub box_id: BoxId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub command: String,
    pub source_container: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source_tags: Vec<String>,
    pub destination_container: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub destination_tags: Vec<String>,
    /// Number of records currently matching the source filter.
    #[serde(default)]
    pub source_count: u64,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// Body of `POST /box/:id/automations` and `PUT /automations/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAutomation {
    pub name: String,
    pub description: String,
    pub command: String,
    pub source_container: String,
    pub source_tags: Vec<String>,
    pub destination_container: String,
    pub destination_tags: Vec<String>,
}

/// A shareable definition from the automation library.
///
/// Fields the client does not know about are kept in `extra` so that an
/// import sends the catalog entry back verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomationTemplate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub command: String,
    pub source_container: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source_tags: Vec<String>,
    pub destination_container: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub destination_tags: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

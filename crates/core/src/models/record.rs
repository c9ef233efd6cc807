use serde::{Deserialize, Serialize};

use crate::types::{null_as_empty, RecordKey, Timestamp};

/// A single tagged data item inside a container.
///
/// `key` is the backend `id` when the server sends one. Older servers
/// address records by their `data` value, which is unique within a
/// container, so that becomes the key instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RecordRow")]
pub struct Record {
    #[serde(rename = "id")]
    pub key: RecordKey,
    pub data: String,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
}

#[derive(Deserialize)]
struct RecordRow {
    #[serde(default)]
    id: Option<RecordKey>,
    data: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    tags: Vec<String>,
    created_at: Timestamp,
}

impl From<RecordRow> for Record {
    fn from(row: RecordRow) -> Self {
        Self {
            key: row.id.unwrap_or_else(|| RecordKey::new(row.data.as_str())),
            data: row.data,
            tags: row.tags,
            created_at: row.created_at,
        }
    }
}

/// Response of `GET /box/:id/:container`: one page plus the filtered total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordsPage {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub records: Vec<Record>,
    #[serde(default)]
    pub count: u64,
}

/// Response of `GET /box/:id/_count`: records stored vs. the box quota.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordQuota {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub limit: u64,
}

/// Body of `PUT /box/:id/:container` (bulk tag).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagRecords {
    pub records: Vec<RecordKey>,
    pub tags: Vec<String>,
}

/// Body of `PUT /box/:id/:container/_deleterecords`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteRecords {
    pub records: Vec<RecordKey>,
}

/// Response of a raw pipe import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ImportSummary {
    #[serde(default)]
    pub changed: u64,
}

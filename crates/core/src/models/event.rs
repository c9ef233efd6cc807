use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{AutomationId, Timestamp};

/// Lifecycle state of one automation run.
///
/// The API queues a run as `pending` (or `scheduled`), the worker marks it
/// `started` when it picks it up and ends it as `finished`, `error` or
/// `timeout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Pending,
    Scheduled,
    Started,
    Finished,
    Error,
    Timeout,
    #[serde(other)]
    Unknown,
}

impl EventStatus {
    /// Statuses in lifecycle order, as listed in the counters.
    pub const ALL: [EventStatus; 6] = [
        Self::Pending,
        Self::Scheduled,
        Self::Started,
        Self::Finished,
        Self::Error,
        Self::Timeout,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Scheduled => "scheduled",
            Self::Started => "started",
            Self::Finished => "finished",
            Self::Error => "error",
            Self::Timeout => "timeout",
            Self::Unknown => "unknown",
        }
    }

    /// Not yet in a terminal state.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Scheduled | Self::Started)
    }
}

/// A nullable timestamp as the API encodes it: `{"Valid": bool, "Time": ...}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NullTime {
    #[serde(rename = "Valid", default)]
    pub valid: bool,
    #[serde(rename = "Time", default)]
    pub time: Option<Timestamp>,
}

impl NullTime {
    pub fn get(&self) -> Option<Timestamp> {
        if self.valid {
            self.time
        } else {
            None
        }
    }
}

/// One historical execution of an automation over a single source record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomationEvent {
    pub id: serde_json::Value,
    pub status: EventStatus,
    pub created_at: Timestamp,
    #[serde(default)]
    pub finished_at: NullTime,
    #[serde(default)]
    pub affected_rows: Option<u64>,
    #[serde(default)]
    pub unique_results: Option<u64>,
    #[serde(default)]
    pub data: String,
}

impl AutomationEvent {
    /// Result count reported by the worker, whichever field the server used.
    pub fn result_count(&self) -> Option<u64> {
        self.affected_rows.or(self.unique_results)
    }
}

/// One row of `GET /box/:id/_counts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub automation_id: AutomationId,
    pub status: EventStatus,
    pub count: u64,
}

/// Per-automation view over the `_counts` rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventCounts {
    by_automation: BTreeMap<AutomationId, BTreeMap<EventStatus, u64>>,
}

impl EventCounts {
    pub fn from_rows(rows: &[StatusCount]) -> Self {
        let mut by_automation: BTreeMap<AutomationId, BTreeMap<EventStatus, u64>> =
            BTreeMap::new();
        for row in rows {
            *by_automation
                .entry(row.automation_id)
                .or_default()
                .entry(row.status)
                .or_default() += row.count;
        }
        Self { by_automation }
    }

    pub fn get(&self, automation_id: &AutomationId, status: EventStatus) -> u64 {
        self.by_automation
            .get(automation_id)
            .and_then(|m| m.get(&status))
            .copied()
            .unwrap_or(0)
    }

    /// Runs that have not reached a terminal state yet.
    pub fn in_progress(&self, automation_id: &AutomationId) -> u64 {
        self.by_automation
            .get(automation_id)
            .map(|m| {
                m.iter()
                    .filter(|(status, _)| status.is_active())
                    .map(|(_, n)| n)
                    .sum::<u64>()
            })
            .unwrap_or(0)
    }
}

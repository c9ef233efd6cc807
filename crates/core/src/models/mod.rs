//! JSON shapes exchanged with the box API.
//!
//! Read models derive `Deserialize`; request bodies derive `Serialize`.
//! List-valued fields tolerate `null` from the server (see
//! [`null_as_empty`](crate::types::null_as_empty)).

pub mod automation;
pub mod event;
pub mod record;
pub mod workspace;

pub use automation::{Automation, AutomationTemplate, NewAutomation};
pub use event::{AutomationEvent, EventCounts, EventStatus, NullTime, StatusCount};
pub use record::{DeleteRecords, ImportSummary, Record, RecordQuota, RecordsPage, TagRecords};
pub use workspace::{CreatedWorkspace, UpdateWorkspace, Workspace};

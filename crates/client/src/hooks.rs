//! Resource constructors, one per server read the views consume.
//!
//! Every constructor takes optional identifiers and yields a resource with
//! no endpoint (never fetched) until they are resolved.

use std::sync::Arc;

use hntr_core::models::{
    Automation, AutomationEvent, AutomationTemplate, RecordQuota, RecordsPage, StatusCount,
    Workspace,
};
use hntr_core::types::{AutomationId, BoxId, List};
use hntr_core::view::ViewContext;

use crate::api::HntrApi;
use crate::endpoints;
use crate::resource::Resource;

/// Run history limit when none is chosen.
pub const DEFAULT_EVENTS_LIMIT: u64 = 500;

pub type WorkspaceResource = Arc<Resource<Workspace>>;
pub type RecordsResource = Arc<Resource<RecordsPage>>;
pub type QuotaResource = Arc<Resource<RecordQuota>>;
pub type AutomationsResource = Arc<Resource<List<Automation>>>;
pub type EventsResource = Arc<Resource<List<AutomationEvent>>>;
pub type EventCountsResource = Arc<Resource<List<StatusCount>>>;
pub type LibraryResource = Arc<Resource<List<AutomationTemplate>>>;

pub fn workspace(api: &HntrApi, box_id: Option<&BoxId>) -> WorkspaceResource {
    Resource::new(api.clone(), box_id.map(endpoints::box_detail))
}

/// One page of records for the view's box, container, filter and page.
pub fn records(api: &HntrApi, ctx: &ViewContext) -> RecordsResource {
    Resource::new(api.clone(), endpoints::records(ctx))
}

pub fn record_quota(api: &HntrApi, box_id: Option<&BoxId>) -> QuotaResource {
    Resource::new(api.clone(), box_id.map(endpoints::record_quota))
}

pub fn automations(api: &HntrApi, box_id: Option<&BoxId>) -> AutomationsResource {
    Resource::new(api.clone(), box_id.map(endpoints::box_automations))
}

/// Run history of one automation, newest first as served.
pub fn automation_events(
    api: &HntrApi,
    automation_id: Option<&AutomationId>,
    limit: Option<u64>,
) -> EventsResource {
    let limit = limit.unwrap_or(DEFAULT_EVENTS_LIMIT);
    Resource::new(
        api.clone(),
        automation_id.map(|id| endpoints::automation_events(id, Some(limit))),
    )
}

pub fn event_counts(api: &HntrApi, box_id: Option<&BoxId>) -> EventCountsResource {
    Resource::new(api.clone(), box_id.map(endpoints::event_counts))
}

pub fn automation_library(api: &HntrApi) -> LibraryResource {
    Resource::new(api.clone(), Some(endpoints::automation_library()))
}

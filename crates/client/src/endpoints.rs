//! Addresses of the box API, relative to the configured base URL.
//!
//! An [`Endpoint`] is a list of path segments plus query pairs. Segments
//! are percent-encoded when the request URL is built, so container names
//! are safe to embed. The same value is the cache key of a
//! [`Resource`](crate::resource::Resource): two reads with equal endpoints
//! share identity.

use hntr_core::types::{AutomationId, BoxId};
use hntr_core::view::ViewContext;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    segments: Vec<String>,
    query: Vec<(&'static str, String)>,
}

impl Endpoint {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
        }
    }

    pub fn query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn query_pairs(&self) -> &[(&'static str, String)] {
        &self.query
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        for (i, (key, value)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{key}={value}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Boxes
// ---------------------------------------------------------------------------

pub fn create_box() -> Endpoint {
    Endpoint::new(["box", "create"])
}

pub fn box_detail(box_id: &BoxId) -> Endpoint {
    Endpoint::new(["box".to_string(), box_id.to_string()])
}

pub fn record_quota(box_id: &BoxId) -> Endpoint {
    Endpoint::new(["box".to_string(), box_id.to_string(), "_count".to_string()])
}

pub fn event_counts(box_id: &BoxId) -> Endpoint {
    Endpoint::new(["box".to_string(), box_id.to_string(), "_counts".to_string()])
}

pub fn clear_events(box_id: &BoxId) -> Endpoint {
    Endpoint::new(["box".to_string(), box_id.to_string(), "_clear".to_string()])
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

pub fn container(box_id: &BoxId, container: &str) -> Endpoint {
    Endpoint::new([
        "box".to_string(),
        box_id.to_string(),
        container.to_string(),
    ])
}

/// Paginated, filtered list read for a resolved view context.
///
/// `None` until both the box and the container are known.
pub fn records(ctx: &ViewContext) -> Option<Endpoint> {
    let box_id = ctx.box_id.as_ref()?;
    let name = ctx.container.as_deref()?;
    Some(
        container(box_id, name)
            .query("term", &ctx.filter)
            .query("limit", ctx.pagination.limit)
            .query("offset", ctx.pagination.offset()),
    )
}

pub fn delete_records(box_id: &BoxId, name: &str) -> Endpoint {
    let mut endpoint = container(box_id, name);
    endpoint.segments.push("_deleterecords".to_string());
    endpoint
}

// ---------------------------------------------------------------------------
// Automations
// ---------------------------------------------------------------------------

pub fn box_automations(box_id: &BoxId) -> Endpoint {
    Endpoint::new([
        "box".to_string(),
        box_id.to_string(),
        "automations".to_string(),
    ])
}

pub fn automation(id: &AutomationId) -> Endpoint {
    Endpoint::new(["automations".to_string(), id.to_string()])
}

pub fn start_automation(id: &AutomationId) -> Endpoint {
    Endpoint::new(["automations".to_string(), id.to_string(), "start".to_string()])
}

pub fn automation_events(id: &AutomationId, limit: Option<u64>) -> Endpoint {
    let endpoint = Endpoint::new(["automations".to_string(), id.to_string(), "events".to_string()]);
    match limit {
        Some(limit) => endpoint.query("limit", limit),
        None => endpoint,
    }
}

pub fn automation_library() -> Endpoint {
    Endpoint::new(["automations", "library"])
}

#[cfg(test)]
mod tests {
    use hntr_core::pagination::Pagination;

    use super::*;

    #[test]
    fn records_needs_box_and_container() {
        let id = uuid::Uuid::nil();
        assert_eq!(records(&ViewContext::new(None).with_container("urls")), None);
        assert_eq!(records(&ViewContext::new(Some(id))), None);
    }

    #[test]
    fn records_carries_offset_from_page() {
        let id = uuid::Uuid::nil();
        let ctx = ViewContext::new(Some(id))
            .with_container("hostnames")
            .with_filter("tag:a")
            .with_pagination(Pagination::new(2, Some(100)));

        let endpoint = records(&ctx).unwrap();
        assert_eq!(
            endpoint.to_string(),
            format!("/box/{id}/hostnames?term=tag:a&limit=100&offset=200")
        );
    }

    #[test]
    fn equal_parameters_give_equal_keys() {
        let id = uuid::Uuid::new_v4();
        assert_eq!(box_detail(&id), box_detail(&id));
        assert_ne!(record_quota(&id), event_counts(&id));
    }

    #[test]
    fn fixed_paths() {
        let id = uuid::Uuid::nil();
        assert_eq!(create_box().to_string(), "/box/create");
        assert_eq!(automation_library().to_string(), "/automations/library");
        assert_eq!(
            delete_records(&id, "urls").to_string(),
            format!("/box/{id}/urls/_deleterecords")
        );
        assert_eq!(
            automation_events(&id, Some(500)).to_string(),
            format!("/automations/{id}/events?limit=500")
        );
    }
}

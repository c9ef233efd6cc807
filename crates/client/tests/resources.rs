//! Cached resource behaviour against the fake backend.

mod common;

use assert_matches::assert_matches;
use axum::http::{Method, StatusCode};
use hntr_client::error::{ApiError, FetchFailure};
use hntr_client::hooks;
use hntr_core::pagination::Pagination;
use hntr_core::view::{ListState, ViewContext};
use serde_json::json;

use common::FakeBackend;

// ---------------------------------------------------------------------------
// Test: unresolved identifiers never hit the network
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unresolved_box_issues_no_request() {
    let backend = FakeBackend::start().await;
    let api = backend.api();

    let ws = hooks::workspace(&api, None);
    let snapshot = ws.load().await;
    let records = hooks::records(&api, &ViewContext::new(None)).refresh().await;

    assert!(snapshot.is_idle());
    assert!(!snapshot.is_loading());
    assert!(!snapshot.is_error());
    assert!(records.is_idle());
    assert_eq!(backend.total_requests(), 0);
}

// ---------------------------------------------------------------------------
// Test: 404 is reported as not-found, other failures as generic
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_box_is_not_found() {
    let backend = FakeBackend::start().await;
    let api = backend.api();
    let id = uuid::Uuid::new_v4();

    let snapshot = hooks::workspace(&api, Some(&id)).load().await;

    assert!(snapshot.is_not_found());
    assert_eq!(snapshot.failure(), Some(FetchFailure::NotFound));
    assert!(!snapshot.is_loading());
    assert!(snapshot.data().is_none());
}

#[tokio::test]
async fn server_error_is_generic_failure() {
    let backend = FakeBackend::start().await;
    let api = backend.api();
    let id = backend.seed_box("Recon", &["hostnames"]);
    backend.fail(
        Method::GET,
        &format!("/box/{id}/_count"),
        StatusCode::INTERNAL_SERVER_ERROR,
        json!(null),
    );

    let snapshot = hooks::record_quota(&api, Some(&id)).load().await;

    assert_eq!(snapshot.failure(), Some(FetchFailure::Other));
    assert_matches!(snapshot.error(), Some(ApiError::Status { status: 500, .. }));
}

// ---------------------------------------------------------------------------
// Test: a failed refresh keeps the last good value
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failed_refresh_keeps_stale_data() {
    let backend = FakeBackend::start().await;
    let api = backend.api();
    let id = backend.seed_box("Recon", &["hostnames"]);

    let ws = hooks::workspace(&api, Some(&id));
    assert_eq!(ws.load().await.data().unwrap().name, "Recon");

    backend.fail(
        Method::GET,
        &format!("/box/{id}"),
        StatusCode::BAD_GATEWAY,
        json!(null),
    );
    let snapshot = ws.refresh().await;

    assert!(snapshot.is_error());
    assert_eq!(snapshot.data().unwrap().name, "Recon");
}

// ---------------------------------------------------------------------------
// Test: load fetches once, mutate always refetches
// ---------------------------------------------------------------------------

#[tokio::test]
async fn load_is_cached_and_mutate_refetches() {
    let backend = FakeBackend::start().await;
    let api = backend.api();
    let id = backend.seed_box("Recon", &["hostnames"]);
    let path = format!("/box/{id}");

    let ws = hooks::workspace(&api, Some(&id));
    ws.load().await;
    ws.load().await;
    assert_eq!(backend.count(Method::GET, &path), 1);

    api.update_box(
        &id,
        &hntr_core::models::UpdateWorkspace {
            name: "Renamed".into(),
            containers: vec!["hostnames".into()],
        },
    )
    .await
    .unwrap();

    let snapshot = ws.mutate().await;
    assert_eq!(backend.count(Method::GET, &path), 2);
    assert_eq!(snapshot.data().unwrap().name, "Renamed");
}

// ---------------------------------------------------------------------------
// Test: subscribers observe new snapshots
// ---------------------------------------------------------------------------

#[tokio::test]
async fn subscribers_see_refresh() {
    let backend = FakeBackend::start().await;
    let api = backend.api();
    let id = backend.seed_box("Recon", &["hostnames"]);

    let ws = hooks::workspace(&api, Some(&id));
    let mut rx = ws.subscribe();
    assert!(rx.borrow().is_loading());

    ws.refresh().await;
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow().data().unwrap().name, "Recon");
}

// ---------------------------------------------------------------------------
// Test: records page honours filter and pagination
// ---------------------------------------------------------------------------

#[tokio::test]
async fn records_page_filters_and_paginates() {
    let backend = FakeBackend::start().await;
    let api = backend.api();
    let id = backend.seed_box("Recon", &["hostnames"]);
    backend.seed_records(id, "hostnames", &["a.example.com", "b.example.com"], &["scope"]);
    backend.seed_records(id, "hostnames", &["c.other.org"], &[]);

    let ctx = ViewContext::new(Some(id))
        .with_container("hostnames")
        .with_filter("example tag:scope")
        .with_pagination(Pagination::new(0, Some(100)));
    let snapshot = hooks::records(&api, &ctx).load().await;
    let page = snapshot.data().unwrap();
    assert_eq!(page.count, 2);
    assert_eq!(page.records.len(), 2);

    // Next is not clamped: past the end is simply an empty page.
    let ctx = ctx.with_pagination(Pagination::new(5, Some(100)));
    let snapshot = hooks::records(&api, &ctx).load().await;
    let page = snapshot.data().unwrap();
    assert_eq!(page.count, 2);
    assert_matches!(
        ListState::classify(Some(page.records.as_slice()), snapshot.is_loading()),
        ListState::Empty
    );
}

// ---------------------------------------------------------------------------
// Test: null lists decode as empty
// ---------------------------------------------------------------------------

#[tokio::test]
async fn null_automation_list_is_empty() {
    let backend = FakeBackend::start().await;
    let api = backend.api();
    let id = backend.seed_box("Recon", &["hostnames"]);

    let snapshot = hooks::automations(&api, Some(&id)).load().await;
    assert!(snapshot.data().unwrap().is_empty());
}

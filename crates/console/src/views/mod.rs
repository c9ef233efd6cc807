//! Plain-text rendering of console pages.
//!
//! Views are pure: they take already-fetched data (or a fetch state) and
//! return the text to print.

pub mod automations;
pub mod events;
pub mod instructions;
pub mod layout;
pub mod library;
pub mod pagination;
pub mod records_table;

use hntr_client::error::FetchFailure;
use hntr_client::resource::Snapshot;

/// Shown while a resource has no data yet.
pub const LOADING: &str = "Loading";

/// What to show instead of data, if anything.
///
/// `not_found` is used for a 404, `error` for any other failure. Returns
/// `None` when the snapshot holds data to render.
pub fn fetch_state<T>(snapshot: &Snapshot<T>, not_found: &str, error: &str) -> Option<String> {
    if snapshot.data().is_some() {
        return None;
    }
    match snapshot.failure() {
        Some(FetchFailure::NotFound) => Some(not_found.to_string()),
        Some(FetchFailure::Other) => Some(error.to_string()),
        None => Some(LOADING.to_string()),
    }
}

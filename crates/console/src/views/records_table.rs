//! The records table of a container page.

use hntr_core::filter::FilterTerm;
use hntr_core::format::{grouped_number, short_timestamp};
use hntr_core::models::Record;
use hntr_core::selection::{SelectionSet, TogglePolicy};
use hntr_core::tags::tags_label;
use hntr_core::view::ListState;

use super::LOADING;

pub const EMPTY_MESSAGE: &str =
    "No records matching criteria. If you have not yet added data, please use the import function.";

/// Shown in place of the filter when none is set.
pub const FILTER_HINT: &str = "Filter: none (e.g. --filter 'foo.com tag:is_scope')";

/// Which gesture selects rows in a table of `container`.
///
/// The generic records table toggles on double-click; the dedicated
/// hostname and domain tables require Alt+Click.
pub fn toggle_policy(container: &str) -> TogglePolicy {
    match container {
        "hostnames" | "domains" => TogglePolicy::AltClick,
        _ => TogglePolicy::DoubleClick,
    }
}

pub fn error_message(container: &str) -> String {
    format!("Error loading {container}.")
}

/// `1,234 hostnames, 2 selected`
pub fn header(container: &str, count: u64, selection: &SelectionSet) -> String {
    let mut out = format!("{} {container}", grouped_number(count));
    if !selection.is_empty() {
        out.push_str(&format!(", {} selected", selection.len()));
    }
    out
}

pub fn filter_line(filter: &FilterTerm) -> String {
    if filter.is_empty() {
        FILTER_HINT.to_string()
    } else {
        format!("Filter: {}", filter.to_term())
    }
}

pub fn render(state: ListState<'_, Record>, selection: &SelectionSet) -> String {
    match state {
        ListState::Loading => format!("{LOADING}\n"),
        ListState::Empty => format!("{EMPTY_MESSAGE}\n"),
        ListState::Rows(rows) => rows.iter().map(|r| row(r, selection)).collect(),
    }
}

fn row(record: &Record, selection: &SelectionSet) -> String {
    let marker = if selection.contains(&record.key) { '*' } else { ' ' };
    let tags = if record.tags.is_empty() {
        String::new()
    } else {
        format!("  {}", tags_label(&record.tags, ""))
    };
    format!(
        "{marker} {}  {}  {}{tags}\n",
        short_timestamp(&record.created_at),
        record.key,
        record.data,
    )
}

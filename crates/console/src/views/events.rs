//! Run history table.

use hntr_core::format::{event_count_label, short_timestamp};
use hntr_core::models::AutomationEvent;

use super::LOADING;

pub const EMPTY_MESSAGE: &str = "No runs yet.";

pub fn render(events: Option<&[AutomationEvent]>) -> String {
    let Some(events) = events else {
        return format!("{LOADING}\n");
    };
    let mut out = format!("{}\n", event_count_label(events.len()));
    if events.is_empty() {
        out.push_str(EMPTY_MESSAGE);
        out.push('\n');
        return out;
    }
    for event in events {
        out.push_str(&row(event));
    }
    out
}

fn row(event: &AutomationEvent) -> String {
    let finished = event
        .finished_at
        .get()
        .map(|t| short_timestamp(&t))
        .unwrap_or_else(|| "-".to_string());
    let results = event
        .result_count()
        .map(|n| n.to_string())
        .unwrap_or_else(|| "-".to_string());
    let id = match &event.id {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    format!(
        "{id:>6}  {:<8}  {}  {finished:<17}  {results:>5}  {}\n",
        event.status.as_str(),
        short_timestamp(&event.created_at),
        event.data,
    )
}

//! Automation list rows and the automation detail header.

use hntr_core::format::{description_or_default, grouped_number};
use hntr_core::models::{Automation, EventCounts, EventStatus};
use hntr_core::tags::{tags_label, ALL_TAGS_LABEL, NO_TAGS_LABEL};

use super::LOADING;

pub const LIST_ERROR: &str = "An error occurred loading automations";
pub const EMPTY_MESSAGE: &str = "You have not setup any automations yet.";
pub const NOT_FOUND: &str = "This automation was not found";

pub fn list(automations: Option<&[Automation]>, counts: &EventCounts) -> String {
    match automations {
        None => format!("{LOADING}\n"),
        Some([]) => format!("{EMPTY_MESSAGE}\n"),
        Some(rows) => rows
            .iter()
            .map(|a| row(a, counts))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// `source [tags] -> destination [tags]`
pub fn flow(automation: &Automation) -> String {
    format!(
        "{} {} -> {} {}",
        automation.source_container,
        tags_label(&automation.source_tags, ALL_TAGS_LABEL),
        automation.destination_container,
        tags_label(&automation.destination_tags, NO_TAGS_LABEL),
    )
}

/// `2 pending, 0 scheduled, 1 started, 10 finished, 1 error, 0 timeout`
pub fn counters(automation: &Automation, counts: &EventCounts) -> String {
    EventStatus::ALL
        .iter()
        .map(|&s| format!("{} {}", grouped_number(counts.get(&automation.id, s)), s.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn row(automation: &Automation, counts: &EventCounts) -> String {
    format!(
        "{}  {}\n  {}\n  {}\n  {}\n  {}\n",
        automation.name,
        automation.id,
        automation.command,
        flow(automation),
        description_or_default(&automation.description),
        counters(automation, counts),
    )
}

/// Detail header of the automation page.
pub fn detail(automation: &Automation, counts: &EventCounts) -> String {
    format!(
        "Automation {}\n{}\n\nCommand: {}\nFlow:    {}\nSource:  {} matching records\nRuns:    {}\n",
        automation.name,
        description_or_default(&automation.description),
        automation.command,
        flow(automation),
        grouped_number(automation.source_count),
        counters(automation, counts),
    )
}

//! Automation library catalog.

use hntr_core::format::description_or_default;
use hntr_core::models::AutomationTemplate;
use hntr_core::tags::{tags_label, ALL_TAGS_LABEL, NO_TAGS_LABEL};

use super::LOADING;

pub const EMPTY_MESSAGE: &str = "The library is empty.";

/// Numbered entries; the number is what `automations import` takes.
pub fn render(entries: Option<&[AutomationTemplate]>) -> String {
    match entries {
        None => format!("{LOADING}\n"),
        Some([]) => format!("{EMPTY_MESSAGE}\n"),
        Some(entries) => entries
            .iter()
            .enumerate()
            .map(|(i, e)| {
                format!(
                    "{:>3}. {}\n     {}\n     {} {} -> {} {}\n     {}\n",
                    i + 1,
                    e.name,
                    e.command,
                    e.source_container,
                    tags_label(&e.source_tags, ALL_TAGS_LABEL),
                    e.destination_container,
                    tags_label(&e.destination_tags, NO_TAGS_LABEL),
                    description_or_default(&e.description),
                )
            })
            .collect(),
    }
}

/// Pick an entry by 1-based number or by exact name.
pub fn select<'a>(entries: &'a [AutomationTemplate], choice: &str) -> Option<&'a AutomationTemplate> {
    match choice.parse::<usize>() {
        Ok(n) if n >= 1 => entries.get(n - 1),
        _ => entries.iter().find(|e| e.name == choice),
    }
}

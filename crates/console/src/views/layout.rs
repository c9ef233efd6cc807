//! Box chrome: name, container navigation and quota.

use hntr_core::format::{capitalize, quota_label};
use hntr_core::models::{RecordQuota, Workspace};

pub const BOX_NOT_FOUND: &str = "This box was not found";
pub const BOX_ERROR: &str = "Error loading box data";

/// Which entry of the sidebar is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section<'a> {
    Container(&'a str),
    Automations,
    None,
}

pub fn sidebar(ws: &Workspace, quota: Option<&RecordQuota>, current: Section<'_>) -> String {
    let mut out = format!("{}\n", ws.name);
    out.push_str("Container\n");
    for container in &ws.containers {
        let marker = if current == Section::Container(container.as_str()) {
            '>'
        } else {
            ' '
        };
        out.push_str(&format!("  {marker} {}\n", capitalize(container)));
    }
    let marker = if current == Section::Automations { '>' } else { ' ' };
    out.push_str(&format!("{marker} Automations\n"));

    let quota = quota.copied().unwrap_or_default();
    out.push_str(&quota_label(quota.count, quota.limit));
    out.push('\n');
    out
}

/// One-line summary printed after box mutations.
pub fn box_summary(ws: &Workspace) -> String {
    format!("{} ({}): {}", ws.name, ws.id, ws.containers.join(", "))
}

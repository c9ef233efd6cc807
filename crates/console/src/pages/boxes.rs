use hntr_client::hooks;
use hntr_client::mutations::commit;
use hntr_core::forms::BoxChange;
use hntr_core::view::ViewContext;

use crate::context::{require, Console};
use crate::error::ConsoleError;
use crate::pages::records;
use crate::views::layout::{self, Section, BOX_ERROR, BOX_NOT_FOUND};

/// Create a box and show its default container.
pub async fn create(console: &Console) -> Result<String, ConsoleError> {
    let created = commit("Could not create box", &[], console.api.create_box()).await?;

    let ws = hooks::workspace(&console.api, Some(&created.id)).load().await;
    let ws = require(&ws, BOX_NOT_FOUND, BOX_ERROR)?;

    let mut out = format!("Created box {}\n\n", created.id);
    if let Some(container) = ws.default_container() {
        let ctx = ViewContext::new(Some(created.id)).with_container(container);
        out.push_str(&records::render_page(console, &ctx).await);
    }
    Ok(out)
}

/// Sidebar of the box: name, containers and quota.
pub async fn show(console: &Console) -> Result<String, ConsoleError> {
    let box_id = console.require_box()?;
    let ws = hooks::workspace(&console.api, Some(&box_id));
    let quota = hooks::record_quota(&console.api, Some(&box_id));
    let (ws, quota) = tokio::join!(ws.load(), quota.load());

    if let Some(state) = crate::views::fetch_state(&ws, BOX_NOT_FOUND, BOX_ERROR) {
        return Ok(format!("{state}\n"));
    }
    let ws = require(&ws, BOX_NOT_FOUND, BOX_ERROR)?;
    Ok(layout::sidebar(&ws, quota.data(), Section::None))
}

pub async fn rename(console: &Console, name: &str) -> Result<String, ConsoleError> {
    change(console, BoxChange::Rename(name.to_string()), "Could not update box").await
}

pub async fn add_container(console: &Console, name: &str) -> Result<String, ConsoleError> {
    change(console, BoxChange::AddContainer(name.to_string()), "Could not update box").await
}

pub async fn delete(console: &Console) -> Result<String, ConsoleError> {
    let box_id = console.require_box()?;
    commit("Could not delete box", &[], console.api.delete_box(&box_id)).await?;
    Ok(format!("Deleted box {box_id}\n"))
}

async fn change(console: &Console, change: BoxChange, context: &str) -> Result<String, ConsoleError> {
    let box_id = console.require_box()?;
    let ws = hooks::workspace(&console.api, Some(&box_id));
    let current = require(&ws.load().await, BOX_NOT_FOUND, BOX_ERROR)?;

    let update = change.apply(&current)?;
    commit(context, &[&*ws], console.api.update_box(&box_id, &update)).await?;

    let updated = require(&ws.snapshot(), BOX_NOT_FOUND, BOX_ERROR)?;
    Ok(format!("{}\n", layout::box_summary(&updated)))
}

use std::io::Read;
use std::path::Path;

use hntr_client::hooks;
use hntr_client::mutations::commit;
use hntr_core::error::CoreError;
use hntr_core::models::RecordsPage;
use hntr_core::selection::SelectionSet;
use hntr_core::tags::{split_tags, validate_tags};
use hntr_core::types::RecordKey;
use hntr_core::view::{ListState, ViewContext};

use crate::cli::SelectArgs;
use crate::context::{require, Console};
use crate::error::ConsoleError;
use crate::views::layout::{self, Section, BOX_ERROR, BOX_NOT_FOUND};
use crate::views::{instructions, pagination, records_table};

/// Header, table and pagination footer of one records page.
pub async fn render_page(console: &Console, ctx: &ViewContext) -> String {
    let container = ctx.container.as_deref().unwrap_or_default();
    let snapshot = hooks::records(&console.api, ctx).load().await;
    render(ctx, container, snapshot.data(), snapshot.is_loading(), snapshot.is_error(), &SelectionSet::new())
}

fn render(
    ctx: &ViewContext,
    container: &str,
    page: Option<&RecordsPage>,
    is_loading: bool,
    is_error: bool,
    selection: &SelectionSet,
) -> String {
    if is_error && page.is_none() {
        return format!("{}\n", records_table::error_message(container));
    }

    let policy = records_table::toggle_policy(container);
    let mut out = String::new();
    if let Some(page) = page {
        out.push_str(&format!(
            "{}  |  {}  |  {}\n{}\n\n",
            records_table::header(container, page.count, selection),
            pagination::limit_selector(ctx.pagination.limit),
            policy.hint(),
            records_table::filter_line(&ctx.parsed_filter()),
        ));
    }

    let rows = page.map(|p| p.records.as_slice());
    out.push_str(&records_table::render(ListState::classify(rows, is_loading), selection));

    if let Some(page) = page {
        if !page.records.is_empty() || ctx.pagination.page > 0 {
            out.push('\n');
            out.push_str(&pagination::footer(&ctx.pagination, page.count));
        }
    }
    out
}

/// The box sidebar with `container` marked, followed by its records page.
pub async fn list(console: &Console, ctx: &ViewContext) -> Result<String, ConsoleError> {
    let box_id = console.require_box()?;
    let container = ctx.container.as_deref().unwrap_or_default();
    let ws = hooks::workspace(&console.api, Some(&box_id));
    let quota = hooks::record_quota(&console.api, Some(&box_id));
    let (ws, quota) = tokio::join!(ws.load(), quota.load());

    let ws = require(&ws, BOX_NOT_FOUND, BOX_ERROR)?;
    if !ws.has_container(container) {
        return Err(CoreError::NotFound {
            entity: "Container",
            id: container.to_string(),
        }
        .into());
    }

    let mut out = layout::sidebar(&ws, quota.data(), Section::Container(container));
    out.push('\n');
    out.push_str(&render_page(console, ctx).await);
    Ok(out)
}

/// Build the selection over the rows of the current page.
fn select(page: &RecordsPage, args: &SelectArgs) -> Result<SelectionSet, ConsoleError> {
    let mut selection = SelectionSet::new();
    if args.all {
        selection.select_all_visible(&page.records);
    }
    for key in &args.keys {
        let key = RecordKey::new(key.as_str());
        if !page.records.iter().any(|r| r.key == key) {
            return Err(CoreError::NotFound {
                entity: "Record",
                id: key.to_string(),
            }
            .into());
        }
        selection.toggle(&key);
    }
    if selection.is_empty() {
        return Err(CoreError::Validation("no records selected; use --all or --select".into()).into());
    }
    Ok(selection)
}

pub async fn tag(
    console: &Console,
    ctx: &ViewContext,
    args: &SelectArgs,
    tags_input: &str,
) -> Result<String, ConsoleError> {
    let box_id = console.require_box()?;
    let container = ctx.container.as_deref().unwrap_or_default();
    let tags = split_tags(tags_input);
    validate_tags(&tags)?;

    let records = hooks::records(&console.api, ctx);
    let error = records_table::error_message(container);
    let page = require(&records.load().await, &error, &error)?;
    let selection = select(&page, args)?;

    commit(
        "Could not tag records",
        &[&*records],
        console
            .api
            .tag_records(&box_id, container, selection.keys(), tags.clone()),
    )
    .await?;

    let snapshot = records.snapshot();
    Ok(format!(
        "Tagged {} records with {}\n\n{}",
        selection.len(),
        hntr_core::tags::tags_label(&tags, hntr_core::tags::NO_TAGS_LABEL),
        render(ctx, container, snapshot.data(), false, snapshot.is_error(), &SelectionSet::new()),
    ))
}

pub async fn delete(
    console: &Console,
    ctx: &ViewContext,
    args: &SelectArgs,
) -> Result<String, ConsoleError> {
    let box_id = console.require_box()?;
    let container = ctx.container.as_deref().unwrap_or_default();

    let records = hooks::records(&console.api, ctx);
    let quota = hooks::record_quota(&console.api, Some(&box_id));
    let error = records_table::error_message(container);
    let page = require(&records.load().await, &error, &error)?;
    let selection = select(&page, args)?;

    commit(
        "Could not delete records",
        &[&*records, &*quota],
        console.api.delete_records(&box_id, container, selection.keys()),
    )
    .await?;

    let snapshot = records.snapshot();
    Ok(format!(
        "Deleted {} records\n\n{}",
        selection.len(),
        render(ctx, container, snapshot.data(), false, snapshot.is_error(), &SelectionSet::new()),
    ))
}

/// Pipe newline-separated data from `file` (or stdin) into a container.
pub async fn import(
    console: &Console,
    container: &str,
    file: Option<&Path>,
    tags_input: &str,
    update: bool,
) -> Result<String, ConsoleError> {
    let box_id = console.require_box()?;
    let tags = split_tags(tags_input);
    validate_tags(&tags)?;

    let data = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let quota = hooks::record_quota(&console.api, Some(&box_id));
    let summary = commit(
        "Could not import records",
        &[&*quota],
        console
            .api
            .import_records(&box_id, container, &data, &tags, update),
    )
    .await?;

    let mut out = format!("Imported {} new {container}\n", summary.changed);
    if let Some(q) = quota.snapshot().data() {
        out.push_str(&hntr_core::format::quota_label(q.count, q.limit));
        out.push('\n');
    }
    Ok(out)
}

pub fn export(console: &Console, container: &str) -> Result<String, ConsoleError> {
    let box_id = console.require_box()?;
    Ok(instructions::export(&console.config.api_url, &box_id, container))
}

pub fn import_instructions(console: &Console, container: &str) -> Result<String, ConsoleError> {
    let box_id = console.require_box()?;
    Ok(instructions::import(&console.config.api_url, &box_id, container))
}

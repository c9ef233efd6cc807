use std::future::Future;
use std::time::Duration;

use hntr_client::hooks;
use hntr_client::mutations::commit;
use hntr_client::poller::PollScope;
use hntr_client::resource::Snapshot;
use hntr_core::error::CoreError;
use hntr_core::forms::{AutomationForm, EditSession};
use hntr_core::models::{Automation, AutomationEvent, EventCounts, StatusCount};
use hntr_core::types::{AutomationId, List};

use crate::app::Output;
use crate::cli::AutomationArgs;
use crate::context::{require, Console};
use crate::error::ConsoleError;
use crate::views::automations::{self as view, LIST_ERROR, NOT_FOUND};
use crate::views::layout::{self, Section, BOX_ERROR, BOX_NOT_FOUND};
use crate::views::{events, fetch_state, instructions, library};

const NO_PLACEHOLDER_WARNING: &str =
    "Warning: the command has no {data} placeholder, every run receives the same input.";

fn summarize(counts: &Snapshot<List<StatusCount>>) -> EventCounts {
    counts
        .data()
        .map(|rows| EventCounts::from_rows(rows))
        .unwrap_or_default()
}

fn pick(list: &[Automation], id: &AutomationId) -> Result<Automation, ConsoleError> {
    list.iter()
        .find(|a| a.id == *id)
        .cloned()
        .ok_or_else(|| {
            CoreError::NotFound {
                entity: "Automation",
                id: id.to_string(),
            }
            .into()
        })
}

/// The box sidebar with automations marked, followed by the automation list.
pub async fn list(console: &Console) -> Result<String, ConsoleError> {
    let box_id = console.require_box()?;
    let ws = hooks::workspace(&console.api, Some(&box_id));
    let quota = hooks::record_quota(&console.api, Some(&box_id));
    let automations = hooks::automations(&console.api, Some(&box_id));
    let counts = hooks::event_counts(&console.api, Some(&box_id));
    let (ws, quota, automations, counts) =
        tokio::join!(ws.load(), quota.load(), automations.load(), counts.load());

    if let Some(state) = fetch_state(&ws, BOX_NOT_FOUND, BOX_ERROR) {
        return Ok(format!("{state}\n"));
    }
    let mut out = String::new();
    if let Some(ws) = ws.data() {
        out.push_str(&layout::sidebar(ws, quota.data(), Section::Automations));
        out.push('\n');
    }
    if automations.is_error() {
        out.push_str(&format!("{LIST_ERROR}\n"));
        return Ok(out);
    }
    out.push_str(&view::list(
        automations.data().map(|l| l.as_slice()),
        &summarize(&counts),
    ));
    Ok(out)
}

/// Detail, counters and run history of one automation.
fn frame(
    id: &AutomationId,
    automations: &Snapshot<List<Automation>>,
    counts: &Snapshot<List<StatusCount>>,
    history: &Snapshot<List<AutomationEvent>>,
) -> String {
    if let Some(state) = fetch_state(automations, BOX_NOT_FOUND, LIST_ERROR) {
        return format!("{state}\n");
    }
    let Some(automation) = automations.data().and_then(|l| l.iter().find(|a| a.id == *id)) else {
        return format!("{NOT_FOUND}\n");
    };

    let mut out = view::detail(automation, &summarize(counts));
    out.push('\n');
    if history.is_error() && history.data().is_none() {
        out.push_str("Error loading run history\n");
    } else {
        out.push_str(&events::render(history.data().map(|l| l.as_slice())));
    }
    out
}

pub async fn show(
    console: &Console,
    id: &AutomationId,
    limit: Option<u64>,
) -> Result<String, ConsoleError> {
    let box_id = console.require_box()?;
    let automations = hooks::automations(&console.api, Some(&box_id));
    let counts = hooks::event_counts(&console.api, Some(&box_id));
    let history = hooks::automation_events(&console.api, Some(id), limit);
    let (automations, counts, history) =
        tokio::join!(automations.load(), counts.load(), history.load());
    Ok(frame(id, &automations, &counts, &history))
}

/// Keep the automation page live until `shutdown` resolves.
///
/// Counters and run history are polled every `interval`; a new frame is
/// passed to `out` whenever the rendered page changes.
pub async fn watch<F>(
    console: &Console,
    id: &AutomationId,
    limit: Option<u64>,
    interval: Duration,
    shutdown: F,
    out: &mut Output<'_>,
) -> Result<(), ConsoleError>
where
    F: Future<Output = ()>,
{
    let box_id = console.require_box()?;
    let automations = hooks::automations(&console.api, Some(&box_id));
    let counts = hooks::event_counts(&console.api, Some(&box_id));
    let history = hooks::automation_events(&console.api, Some(id), limit);

    let mut scope = PollScope::new();
    scope.watch(counts.clone(), interval);
    scope.watch(history.clone(), interval);

    let mut counts_rx = counts.subscribe();
    let mut history_rx = history.subscribe();
    automations.load().await;

    tokio::pin!(shutdown);
    let mut last = String::new();
    let result = loop {
        let current = frame(id, &automations.snapshot(), &counts.snapshot(), &history.snapshot());
        if current != last {
            if let Err(e) = out(&current) {
                tracing::debug!(error = %e, "Output closed, stopping watch");
                break Err(ConsoleError::from(e));
            }
            last = current;
        }

        tokio::select! {
            _ = &mut shutdown => break Ok(()),
            changed = counts_rx.changed() => if changed.is_err() { break Ok(()) },
            changed = history_rx.changed() => if changed.is_err() { break Ok(()) },
        }
    };

    scope.shutdown().await;
    result
}

pub async fn events(
    console: &Console,
    id: &AutomationId,
    limit: Option<u64>,
) -> Result<String, ConsoleError> {
    let snapshot = hooks::automation_events(&console.api, Some(id), limit)
        .load()
        .await;
    if let Some(state) = fetch_state(&snapshot, NOT_FOUND, "Error loading run history") {
        return Ok(format!("{state}\n"));
    }
    Ok(events::render(snapshot.data().map(|l| l.as_slice())))
}

pub async fn add(console: &Console, fields: &AutomationArgs) -> Result<String, ConsoleError> {
    let box_id = console.require_box()?;
    let ws = hooks::workspace(&console.api, Some(&box_id)).load().await;
    let ws = require(&ws, BOX_NOT_FOUND, BOX_ERROR)?;

    let mut form = AutomationForm::default();
    fields.apply(&mut form);
    let body = form.validate(&ws.containers)?;

    let automations = hooks::automations(&console.api, Some(&box_id));
    commit(
        "Could not create automation",
        &[&*automations],
        console.api.create_automation(&box_id, &body),
    )
    .await?;

    let mut out = format!("Created automation {}\n", body.name);
    if !form.has_placeholder() {
        out.push_str(NO_PLACEHOLDER_WARNING);
        out.push('\n');
    }
    Ok(out)
}

pub async fn edit(
    console: &Console,
    id: &AutomationId,
    fields: &AutomationArgs,
) -> Result<String, ConsoleError> {
    let box_id = console.require_box()?;
    let ws = hooks::workspace(&console.api, Some(&box_id));
    let automations = hooks::automations(&console.api, Some(&box_id));
    let (ws, current) = tokio::join!(ws.load(), automations.load());
    let ws = require(&ws, BOX_NOT_FOUND, BOX_ERROR)?;
    let current = require(&current, BOX_NOT_FOUND, LIST_ERROR)?;

    let mut session = EditSession::new(pick(&current, id)?);
    fields.apply(&mut session.form);
    let body = session.form.validate(&ws.containers)?;

    commit(
        "Could not update automation",
        &[&*automations],
        console.api.update_automation(id, &body),
    )
    .await?;

    if let Some(updated) = automations.snapshot().data() {
        session.sync(&pick(updated, id)?);
    }
    Ok(format!(
        "Updated automation\n\n{}",
        view::row(session.source(), &EventCounts::default())
    ))
}

pub async fn delete(console: &Console, id: &AutomationId) -> Result<String, ConsoleError> {
    commit(
        "Could not delete automation",
        &[],
        console.api.delete_automation(id),
    )
    .await?;
    Ok(format!("Deleted automation {id}\n"))
}

pub async fn start(console: &Console, id: &AutomationId) -> Result<String, ConsoleError> {
    let box_id = console.require_box()?;
    let list = hooks::automations(&console.api, Some(&box_id)).load().await;
    let list = require(&list, BOX_NOT_FOUND, LIST_ERROR)?;
    let automation = pick(&list, id)?;

    console.runner().start(&automation).await?;
    Ok(format!(
        "Started {} over {} records\n",
        automation.name,
        hntr_core::format::grouped_number(automation.source_count)
    ))
}

pub async fn show_library(console: &Console) -> Result<String, ConsoleError> {
    let snapshot = hooks::automation_library(&console.api).load().await;
    if snapshot.is_error() {
        return Ok("Error loading the library\n".to_string());
    }
    Ok(library::render(snapshot.data().map(|l| l.as_slice())))
}

/// Add the library entry `choice` (number or name) to the box.
pub async fn import(console: &Console, choice: &str) -> Result<String, ConsoleError> {
    let box_id = console.require_box()?;
    let entries = hooks::automation_library(&console.api).load().await;
    let entries = require(&entries, "The library is unavailable", "Error loading the library")?;
    let entry = library::select(&entries, choice)
        .ok_or_else(|| ConsoleError::NotFound(format!("No library entry '{choice}'")))?;

    let automations = hooks::automations(&console.api, Some(&box_id));
    commit(
        "Could not import automation",
        &[&*automations],
        console.api.import_from_library(&box_id, entry),
    )
    .await?;
    Ok(format!("Imported {} from the library\n", entry.name))
}

pub async fn clear(console: &Console, status: Option<&str>) -> Result<String, ConsoleError> {
    let box_id = console.require_box()?;
    let counts = hooks::event_counts(&console.api, Some(&box_id));
    commit(
        "Could not clear events",
        &[&*counts],
        console.api.clear_events(&box_id, status),
    )
    .await?;
    Ok("Cleared automation events\n".to_string())
}

pub fn worker(console: &Console) -> Result<String, ConsoleError> {
    let box_id = console.require_box()?;
    Ok(instructions::worker(&box_id))
}

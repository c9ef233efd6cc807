//! Route a parsed command to its page.

use std::future::Future;
use std::io;

use crate::cli::{AutomationsCommand, BoxCommand, Command, RecordsCommand, ViewArgs};
use crate::context::Console;
use crate::error::ConsoleError;
use crate::pages::{automations, boxes, records};

/// Where rendered views are written. A write error ends the command.
pub type Output<'a> = dyn FnMut(&str) -> io::Result<()> + Send + 'a;

/// Run `command`, passing rendered output to `out`.
///
/// `shutdown` ends long-running commands (`automations show --watch`).
pub async fn run<F>(
    console: &Console,
    command: Command,
    shutdown: F,
    out: &mut Output<'_>,
) -> Result<(), ConsoleError>
where
    F: Future<Output = ()>,
{
    let box_id = console.box_id().copied();
    let container_page = |view: &ViewArgs, container: &str| view.context(box_id, container);

    let text = match command {
        Command::Box(cmd) => match cmd {
            BoxCommand::Create => boxes::create(console).await?,
            BoxCommand::Show => boxes::show(console).await?,
            BoxCommand::Rename { name } => boxes::rename(console, &name).await?,
            BoxCommand::AddContainer { name } => boxes::add_container(console, &name).await?,
            BoxCommand::Delete => boxes::delete(console).await?,
        },

        Command::Hostnames(view) => {
            records::list(console, &container_page(&view, "hostnames")).await?
        }
        Command::Domains(view) => records::list(console, &container_page(&view, "domains")).await?,

        Command::Records(cmd) => match cmd {
            RecordsCommand::List { container, view } => {
                records::list(console, &container_page(&view, &container)).await?
            }
            RecordsCommand::Tag {
                container,
                view,
                select,
                tags,
            } => records::tag(console, &container_page(&view, &container), &select, &tags).await?,
            RecordsCommand::Delete {
                container,
                view,
                select,
            } => records::delete(console, &container_page(&view, &container), &select).await?,
            RecordsCommand::Import {
                container,
                file,
                tags,
                update,
            } => records::import(console, &container, file.as_deref(), &tags, update).await?,
            RecordsCommand::Export { container } => records::export(console, &container)?,
            RecordsCommand::Instructions { container } => {
                records::import_instructions(console, &container)?
            }
        },

        Command::Automations(cmd) => match cmd {
            AutomationsCommand::List => automations::list(console).await?,
            AutomationsCommand::Show { id, limit, watch } => {
                if watch {
                    let interval = console.config.poll_interval;
                    automations::watch(console, &id, limit, interval, shutdown, out).await?;
                    return Ok(());
                }
                automations::show(console, &id, limit).await?
            }
            AutomationsCommand::Add(fields) => automations::add(console, &fields).await?,
            AutomationsCommand::Edit { id, fields } => {
                automations::edit(console, &id, &fields).await?
            }
            AutomationsCommand::Delete { id } => automations::delete(console, &id).await?,
            AutomationsCommand::Start { id } => automations::start(console, &id).await?,
            AutomationsCommand::Events { id, limit } => {
                automations::events(console, &id, limit).await?
            }
            AutomationsCommand::Library => automations::show_library(console).await?,
            AutomationsCommand::Import { entry } => automations::import(console, &entry).await?,
            AutomationsCommand::Clear { status } => {
                automations::clear(console, status.as_deref()).await?
            }
            AutomationsCommand::Worker => automations::worker(console)?,
        },
    };

    out(&text)?;
    Ok(())
}

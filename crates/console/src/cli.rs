//! Command line definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use hntr_core::filter::FilterTerm;
use hntr_core::forms::AutomationForm;
use hntr_core::pagination::Pagination;
use hntr_core::types::{AutomationId, BoxId};
use hntr_core::view::ViewContext;

#[derive(Parser, Debug)]
#[command(name = "hntr")]
#[command(version)]
#[command(about = "Console for hntr reconnaissance boxes")]
pub struct Cli {
    /// Base URL of the box API
    #[arg(long, env = "HNTR_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Box to operate on
    #[arg(long = "box", env = "HNTR_BOX_ID", global = true)]
    pub box_id: Option<BoxId>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create, inspect and change boxes
    #[command(subcommand)]
    Box(BoxCommand),

    /// Records of any container
    #[command(subcommand)]
    Records(RecordsCommand),

    /// The hostnames container
    Hostnames(ViewArgs),

    /// The domains container
    Domains(ViewArgs),

    /// Automations of the box
    #[command(subcommand)]
    Automations(AutomationsCommand),
}

#[derive(Subcommand, Debug)]
pub enum BoxCommand {
    /// Create a new box and open its default container
    Create,
    /// Show the box with its containers and quota
    Show,
    Rename {
        name: String,
    },
    /// Add a container to the box
    AddContainer {
        name: String,
    },
    Delete,
}

#[derive(Subcommand, Debug)]
pub enum RecordsCommand {
    /// List one page of records
    List {
        container: String,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Tag the selected records of the current page
    Tag {
        container: String,
        #[command(flatten)]
        view: ViewArgs,
        #[command(flatten)]
        select: SelectArgs,
        /// Comma-separated tags
        #[arg(long)]
        tags: String,
    },
    /// Delete the selected records of the current page
    Delete {
        container: String,
        #[command(flatten)]
        view: ViewArgs,
        #[command(flatten)]
        select: SelectArgs,
    },
    /// Import newline-separated records from a file or stdin
    Import {
        container: String,
        /// Read from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
        /// Comma-separated tags added to every record
        #[arg(long, default_value = "")]
        tags: String,
        /// Also tag records that already exist
        #[arg(long)]
        update: bool,
    },
    /// Print the export pipeline for a container
    Export { container: String },
    /// Print the import pipeline for a container
    Instructions { container: String },
}

/// Filter and page of a records view.
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Filter term, e.g. `foo.com tag:is_scope`
    #[arg(long, default_value = "")]
    pub filter: String,

    /// Only records carrying this tag (repeatable)
    #[arg(long = "tag", value_name = "TAG")]
    pub filter_tags: Vec<String>,

    /// Zero-based page
    #[arg(long, default_value_t = 0)]
    pub page: u64,

    /// Records per page (100, 500, 1000, 5000)
    #[arg(long)]
    pub limit: Option<u64>,
}

impl ViewArgs {
    pub fn context(&self, box_id: Option<BoxId>, container: &str) -> ViewContext {
        let parsed = FilterTerm::parse(&self.filter);
        let tags: Vec<String> = parsed.tags.iter().chain(&self.filter_tags).cloned().collect();
        let term = FilterTerm::new(parsed.search.as_deref(), &tags);
        ViewContext::new(box_id)
            .with_container(container)
            .with_filter(term.to_term())
            .with_pagination(Pagination::new(self.page, self.limit))
    }
}

/// Which rows of the current page are selected.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectArgs {
    /// Select every row on the page
    #[arg(long)]
    pub all: bool,

    /// Toggle the row with this record id (repeatable)
    #[arg(long = "select", value_name = "ID")]
    pub keys: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum AutomationsCommand {
    List,
    /// Automation detail with status counters and run history
    Show {
        id: AutomationId,
        #[arg(long)]
        limit: Option<u64>,
        /// Keep polling until interrupted
        #[arg(long)]
        watch: bool,
    },
    Add(AutomationArgs),
    Edit {
        id: AutomationId,
        #[command(flatten)]
        fields: AutomationArgs,
    },
    Delete {
        id: AutomationId,
    },
    /// Run the automation over its matching source records
    Start {
        id: AutomationId,
    },
    /// Run history
    Events {
        id: AutomationId,
        #[arg(long)]
        limit: Option<u64>,
    },
    /// Browse the shared automation library
    Library,
    /// Add a library entry, by number or name, to the box
    Import {
        entry: String,
    },
    /// Clear run history of every automation in the box
    Clear {
        /// Only events with this status
        #[arg(long)]
        status: Option<String>,
    },
    /// How to start a worker for this box
    Worker,
}

/// Fields of the add/edit automation form. Unset fields keep their
/// current value when editing.
#[derive(Args, Debug, Clone, Default)]
pub struct AutomationArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Command template; `{data}` is replaced with each source record
    #[arg(long)]
    pub command: Option<String>,
    #[arg(long = "source")]
    pub source_container: Option<String>,
    /// Comma-separated, empty for all
    #[arg(long)]
    pub source_tags: Option<String>,
    #[arg(long = "destination")]
    pub destination_container: Option<String>,
    /// Comma-separated
    #[arg(long)]
    pub destination_tags: Option<String>,
}

impl AutomationArgs {
    /// Overwrite the form fields that were given.
    pub fn apply(&self, form: &mut AutomationForm) {
        let fields = [
            (&self.name, &mut form.name),
            (&self.description, &mut form.description),
            (&self.command, &mut form.command),
            (&self.source_container, &mut form.source_container),
            (&self.source_tags, &mut form.source_tags),
            (&self.destination_container, &mut form.destination_container),
            (&self.destination_tags, &mut form.destination_tags),
        ];
        for (value, field) in fields {
            if let Some(value) = value {
                *field = value.clone();
            }
        }
    }
}

//! Input forms: automation add/edit and box rename / add-container.
//!
//! Forms hold raw user input. `validate` either yields the request body or
//! per-field errors; no request is issued while errors remain.

use std::collections::BTreeMap;

use crate::error::CoreError;
use crate::models::{Automation, NewAutomation, UpdateWorkspace, Workspace};
use crate::tags::{join_tags, split_tags, validate_tags};

/// Message shown under a mandatory field left blank.
pub const REQUIRED_MESSAGE: &str = "This field is required";

/// Placeholder the worker substitutes with each record's data.
pub const DATA_PLACEHOLDER: &str = "{data}";

// ---------------------------------------------------------------------------
// Field errors
// ---------------------------------------------------------------------------

/// Per-field validation messages, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<&'static str, String>,
}

impl FormErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for FormErrors {}

// ---------------------------------------------------------------------------
// Automation form
// ---------------------------------------------------------------------------

/// Raw input of the add/edit automation dialog.
///
/// Tags are comma-separated strings; containers must come from the box's
/// container list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutomationForm {
    pub name: String,
    pub description: String,
    pub source_container: String,
    pub source_tags: String,
    pub destination_container: String,
    pub destination_tags: String,
    pub command: String,
}

impl AutomationForm {
    /// Pre-populate from an existing automation (edit mode).
    pub fn from_automation(automation: &Automation) -> Self {
        Self {
            name: automation.name.clone(),
            description: automation.description.clone(),
            source_container: automation.source_container.clone(),
            source_tags: join_tags(&automation.source_tags),
            destination_container: automation.destination_container.clone(),
            destination_tags: join_tags(&automation.destination_tags),
            command: automation.command.clone(),
        }
    }

    /// Validate against the box's containers and build the request body.
    ///
    /// Name, description, both containers and the command are mandatory.
    /// Tag strings are split on `,` with empty tokens discarded.
    pub fn validate(&self, containers: &[String]) -> Result<NewAutomation, FormErrors> {
        let mut errors = FormErrors::default();

        for (field, value) in [
            ("name", &self.name),
            ("description", &self.description),
            ("source_container", &self.source_container),
            ("destination_container", &self.destination_container),
            ("command", &self.command),
        ] {
            if value.trim().is_empty() {
                errors.add(field, REQUIRED_MESSAGE);
            }
        }

        for (field, value) in [
            ("source_container", &self.source_container),
            ("destination_container", &self.destination_container),
        ] {
            if !value.trim().is_empty() && !containers.iter().any(|c| c == value.trim()) {
                errors.add(field, format!("Unknown container '{}'", value.trim()));
            }
        }

        let source_tags = split_tags(&self.source_tags);
        let destination_tags = split_tags(&self.destination_tags);
        for (field, tags) in [
            ("source_tags", &source_tags),
            ("destination_tags", &destination_tags),
        ] {
            if let Err(CoreError::Validation(msg)) = validate_tags(tags) {
                errors.add(field, msg);
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewAutomation {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            command: self.command.trim().to_string(),
            source_container: self.source_container.trim().to_string(),
            source_tags,
            destination_container: self.destination_container.trim().to_string(),
            destination_tags,
        })
    }

    pub fn has_placeholder(&self) -> bool {
        self.command.contains(DATA_PLACEHOLDER)
    }
}

/// Edit-mode form state bound to the automation it was loaded from.
///
/// Whenever the underlying automation changes (a refetch, navigation to
/// another automation) the form is re-populated from it.
#[derive(Debug, Clone)]
pub struct EditSession {
    source: Automation,
    pub form: AutomationForm,
}

impl EditSession {
    pub fn new(automation: Automation) -> Self {
        Self {
            form: AutomationForm::from_automation(&automation),
            source: automation,
        }
    }

    pub fn source(&self) -> &Automation {
        &self.source
    }

    /// Re-sync with `automation`. Returns `true` when the form was reset.
    pub fn sync(&mut self, automation: &Automation) -> bool {
        if *automation == self.source {
            return false;
        }
        self.source = automation.clone();
        self.form = AutomationForm::from_automation(automation);
        true
    }
}

// ---------------------------------------------------------------------------
// Box update
// ---------------------------------------------------------------------------

const NAME_LEN: std::ops::RangeInclusive<usize> = 2..=25;
const MAX_CONTAINERS: usize = 5;

/// A change to a box issued from the layout chrome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoxChange {
    Rename(String),
    AddContainer(String),
}

impl BoxChange {
    /// Apply the change to `current` and validate the resulting body.
    ///
    /// Container names are lowercased. Name and container names must be 2-25
    /// characters; a box holds 1-5 containers.
    pub fn apply(&self, current: &Workspace) -> Result<UpdateWorkspace, CoreError> {
        let mut update = UpdateWorkspace::from(current);
        match self {
            Self::Rename(name) => update.name = name.trim().to_string(),
            Self::AddContainer(container) => {
                let container = container.trim().to_lowercase();
                if update.containers.iter().any(|c| *c == container) {
                    return Err(CoreError::Validation(format!(
                        "container '{container}' already exists"
                    )));
                }
                update.containers.push(container);
            }
        }
        update.containers = update.containers.iter().map(|c| c.to_lowercase()).collect();

        if !NAME_LEN.contains(&update.name.chars().count()) {
            return Err(CoreError::Validation(
                "name: must be between 2 and 25 characters".into(),
            ));
        }
        if update.containers.is_empty() || update.containers.len() > MAX_CONTAINERS {
            return Err(CoreError::Validation(format!(
                "containers: a box holds between 1 and {MAX_CONTAINERS} containers"
            )));
        }
        if let Some(bad) = update
            .containers
            .iter()
            .find(|c| !NAME_LEN.contains(&c.chars().count()))
        {
            return Err(CoreError::Validation(format!(
                "containers: '{bad}' must be between 2 and 25 characters"
            )));
        }
        Ok(update)
    }
}

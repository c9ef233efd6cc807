//! Per-invocation state shared by every page.

use std::sync::Arc;

use hntr_client::api::HntrApi;
use hntr_client::config::ClientConfig;
use hntr_client::resource::Snapshot;
use hntr_client::runner::AutomationRunner;
use hntr_core::types::BoxId;

use crate::error::ConsoleError;

pub struct Console {
    pub api: HntrApi,
    pub config: ClientConfig,
    box_id: Option<BoxId>,
    runner: AutomationRunner,
}

impl Console {
    pub fn new(config: ClientConfig, box_id: Option<BoxId>) -> Result<Self, ConsoleError> {
        let api = HntrApi::new(&config)?;
        Ok(Self::with_api(api, config, box_id))
    }

    pub fn with_api(api: HntrApi, config: ClientConfig, box_id: Option<BoxId>) -> Self {
        Self {
            runner: AutomationRunner::new(api.clone()),
            api,
            config,
            box_id,
        }
    }

    /// Start controls shared by every start issued through this console.
    pub fn runner(&self) -> &AutomationRunner {
        &self.runner
    }

    pub fn box_id(&self) -> Option<&BoxId> {
        self.box_id.as_ref()
    }

    /// The selected box, or [`ConsoleError::NoBox`].
    pub fn require_box(&self) -> Result<BoxId, ConsoleError> {
        self.box_id.ok_or(ConsoleError::NoBox)
    }
}

/// Data a command cannot proceed without.
///
/// A 404 becomes [`ConsoleError::NotFound`] with `not_found`, any other
/// failure [`ConsoleError::Unavailable`] with `error`.
pub fn require<T>(snapshot: &Snapshot<T>, not_found: &str, error: &str) -> Result<Arc<T>, ConsoleError> {
    if let Some(data) = snapshot.shared() {
        return Ok(data);
    }
    if snapshot.is_not_found() {
        Err(ConsoleError::NotFound(not_found.to_string()))
    } else {
        Err(ConsoleError::Unavailable(error.to_string()))
    }
}

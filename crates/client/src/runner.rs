//! Start control for automations.
//!
//! Wraps [`RunGuard`] around the start call: a run over zero source records
//! is refused locally, and repeated starts inside the cooldown are refused
//! until it elapses. The cooldown is armed before the request goes out and
//! disarmed again if it fails.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use hntr_core::models::Automation;
use hntr_core::run_control::{RunGuard, RunRefusal};
use hntr_core::types::AutomationId;

use crate::alert::Alert;
use crate::api::HntrApi;

#[derive(Debug, thiserror::Error)]
pub enum StartError {
    #[error(transparent)]
    Refused(#[from] RunRefusal),

    #[error(transparent)]
    Failed(#[from] Alert),
}

/// Start controls for every automation, each with its own cooldown.
pub struct AutomationRunner {
    api: HntrApi,
    cooldown: Duration,
    guards: Mutex<HashMap<AutomationId, RunGuard>>,
}

impl AutomationRunner {
    pub fn new(api: HntrApi) -> Self {
        Self::with_cooldown(api, hntr_core::run_control::DEFAULT_COOLDOWN)
    }

    pub fn with_cooldown(api: HntrApi, cooldown: Duration) -> Self {
        Self {
            api,
            cooldown,
            guards: Mutex::new(HashMap::new()),
        }
    }

    fn guards(&self) -> MutexGuard<'_, HashMap<AutomationId, RunGuard>> {
        self.guards.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Whether the start control of `automation_id` is currently disabled.
    pub fn is_cooling_down(&self, automation_id: &AutomationId) -> bool {
        self.guards()
            .get(automation_id)
            .is_some_and(|g| g.is_cooling_down(Instant::now()))
    }

    /// Start `automation` unless its guard refuses it.
    pub async fn start(&self, automation: &Automation) -> Result<(), StartError> {
        {
            let mut guards = self.guards();
            let guard = guards
                .entry(automation.id)
                .or_insert_with(|| RunGuard::new(self.cooldown));
            let now = Instant::now();
            if let Err(refusal) = guard.check(automation.source_count, now) {
                tracing::info!(automation_id = %automation.id, %refusal, "Start refused");
                return Err(refusal.into());
            }
            guard.record_submit(now);
        }

        if let Err(e) = self.api.start_automation(&automation.id).await {
            if let Some(guard) = self.guards().get_mut(&automation.id) {
                guard.reset();
            }
            tracing::warn!(automation_id = %automation.id, error = %e, "Start failed");
            return Err(Alert::from_error("Could not start automation", &e).into());
        }
        Ok(())
    }
}

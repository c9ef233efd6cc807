//! Client-side guard in front of "start automation".
//!
//! A run is refused without a network call when no source record matches,
//! and the control stays disabled for a short cooldown after each successful
//! submission so rapid repeats do not enqueue duplicate runs.

use std::time::{Duration, Instant};

/// Cooldown after a successful start.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(5);

/// Message shown instead of starting a run over zero records.
pub const NO_SOURCE_RECORDS_MESSAGE: &str =
    "No records match the source container and tags of this automation. Nothing to run.";

/// Why a start request was refused locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RunRefusal {
    #[error("{}", NO_SOURCE_RECORDS_MESSAGE)]
    NoSourceRecords,

    #[error("Automation was just started, try again in {}s", remaining.as_secs().max(1))]
    CoolingDown { remaining: Duration },
}

#[derive(Debug, Clone)]
pub struct RunGuard {
    cooldown: Duration,
    last_submit: Option<Instant>,
}

impl Default for RunGuard {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }
}

impl RunGuard {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_submit: None,
        }
    }

    /// Decide whether a start may be sent at `now` for an automation whose
    /// source filter currently matches `source_count` records.
    pub fn check(&self, source_count: u64, now: Instant) -> Result<(), RunRefusal> {
        if source_count == 0 {
            return Err(RunRefusal::NoSourceRecords);
        }
        if let Some(last) = self.last_submit {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < self.cooldown {
                return Err(RunRefusal::CoolingDown {
                    remaining: self.cooldown - elapsed,
                });
            }
        }
        Ok(())
    }

    /// Record a successful submission at `now`.
    pub fn record_submit(&mut self, now: Instant) {
        self.last_submit = Some(now);
    }

    /// Forget the last submission, re-enabling the control at once.
    pub fn reset(&mut self) {
        self.last_submit = None;
    }

    /// Whether the start control is currently disabled.
    pub fn is_cooling_down(&self, now: Instant) -> bool {
        self.last_submit
            .is_some_and(|last| now.saturating_duration_since(last) < self.cooldown)
    }
}

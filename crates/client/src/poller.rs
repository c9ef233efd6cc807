//! Periodic revalidation of resources.
//!
//! [`start_polling`] spawns a task that refreshes a resource on a fixed
//! interval until its [`PollHandle`] is stopped or dropped. A fetch is
//! awaited before the next tick is considered and missed ticks are delayed,
//! so requests for one resource never overlap.
//!
//! [`PollScope`] owns the polls of one view. Registering a second poll for
//! the same endpoint supersedes the first; dropping the scope stops all of
//! them.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::endpoints::Endpoint;
use crate::resource::Resource;

/// How long [`PollHandle::stop`] waits for the task to exit.
const STOP_TIMEOUT: Duration = Duration::from_secs(5);

/// A running poll. Dropping it cancels the poll.
pub struct PollHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    fn inactive() -> Self {
        Self {
            cancel: CancellationToken::new(),
            task: None,
        }
    }

    /// Whether a polling task is running.
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Cancel and wait for the task to exit. No request is issued after this
    /// returns.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = tokio::time::timeout(STOP_TIMEOUT, task).await;
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Refresh `resource` every `interval`, starting immediately.
///
/// A resource without an endpoint yields an inactive handle and never
/// fetches.
pub fn start_polling<T>(resource: Arc<Resource<T>>, interval: Duration) -> PollHandle
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    start_polling_with(resource, interval, CancellationToken::new())
}

fn start_polling_with<T>(
    resource: Arc<Resource<T>>,
    interval: Duration,
    cancel: CancellationToken,
) -> PollHandle
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    let Some(endpoint) = resource.endpoint().cloned() else {
        return PollHandle::inactive();
    };

    let token = cancel.clone();
    let task = tokio::spawn(async move {
        tracing::debug!(path = %endpoint, interval_ms = interval.as_millis() as u64, "Polling started");

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = ticker.tick() => {}
            }
            tokio::select! {
                _ = token.cancelled() => break,
                _ = resource.refresh() => {}
            }
        }

        tracing::debug!(path = %endpoint, "Polling stopped");
    });

    PollHandle {
        cancel,
        task: Some(task),
    }
}

/// The set of polls belonging to one view.
pub struct PollScope {
    cancel: CancellationToken,
    polls: HashMap<Endpoint, PollHandle>,
}

impl Default for PollScope {
    fn default() -> Self {
        Self::new()
    }
}

impl PollScope {
    pub fn new() -> Self {
        Self {
            cancel: CancellationToken::new(),
            polls: HashMap::new(),
        }
    }

    /// Poll `resource` within this scope, replacing any poll already
    /// registered for the same endpoint. Returns `false` when the resource
    /// has no endpoint and nothing was started.
    pub fn watch<T>(&mut self, resource: Arc<Resource<T>>, interval: Duration) -> bool
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        let Some(endpoint) = resource.endpoint().cloned() else {
            return false;
        };

        let handle = start_polling_with(resource, interval, self.cancel.child_token());
        if let Some(previous) = self.polls.insert(endpoint.clone(), handle) {
            tracing::debug!(path = %endpoint, "Superseding existing poll");
            drop(previous);
        }
        true
    }

    /// Number of registered polls.
    pub fn len(&self) -> usize {
        self.polls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polls.is_empty()
    }

    /// Stop every poll and wait for the tasks to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        for (_, handle) in self.polls.drain() {
            handle.stop().await;
        }
    }
}

impl Drop for PollScope {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

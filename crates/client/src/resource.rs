//! Reactive read-through cache of one API resource.
//!
//! A [`Resource`] is bound to an optional [`Endpoint`]. Without an endpoint
//! (the identifying parameters are not resolved yet) it never issues a
//! request and stays idle. With one, [`Resource::load`] fetches once,
//! [`Resource::refresh`] re-fetches keeping the current value until the
//! answer arrives, and [`Resource::mutate`] discards the cached value and
//! re-fetches. Observers subscribe to a [`tokio::sync::watch`] channel of
//! [`Snapshot`]s.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::{watch, Mutex};

use crate::api::HntrApi;
use crate::endpoints::Endpoint;
use crate::error::{ApiError, FetchFailure};

/// Point-in-time state of a resource.
pub struct Snapshot<T> {
    active: bool,
    data: Option<Arc<T>>,
    error: Option<Arc<ApiError>>,
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            active: self.active,
            data: self.data.clone(),
            error: self.error.clone(),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Snapshot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("active", &self.active)
            .field("data", &self.data)
            .field("error", &self.error)
            .finish()
    }
}

impl<T> Snapshot<T> {
    fn new(active: bool) -> Self {
        Self {
            active,
            data: None,
            error: None,
        }
    }

    /// The last successfully fetched payload.
    pub fn data(&self) -> Option<&T> {
        self.data.as_deref()
    }

    /// Shared handle to the payload.
    pub fn shared(&self) -> Option<Arc<T>> {
        self.data.clone()
    }

    /// The last fetch error, cleared by the next success.
    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_deref()
    }

    /// No endpoint: nothing will be fetched. Neither loading nor failed.
    pub fn is_idle(&self) -> bool {
        !self.active
    }

    /// True exactly when an endpoint is set and there is neither data nor
    /// an error yet.
    pub fn is_loading(&self) -> bool {
        self.active && self.data.is_none() && self.error.is_none()
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn failure(&self) -> Option<FetchFailure> {
        self.error.as_ref().map(|e| e.failure())
    }

    pub fn is_not_found(&self) -> bool {
        self.failure() == Some(FetchFailure::NotFound)
    }
}

pub struct Resource<T> {
    api: HntrApi,
    endpoint: Option<Endpoint>,
    state: watch::Sender<Snapshot<T>>,
    /// Serializes fetches so at most one request per resource is in flight.
    fetch_lock: Mutex<()>,
}

impl<T> Resource<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    pub fn new(api: HntrApi, endpoint: Option<Endpoint>) -> Arc<Self> {
        let (state, _) = watch::channel(Snapshot::new(endpoint.is_some()));
        Arc::new(Self {
            api,
            endpoint,
            state,
            fetch_lock: Mutex::new(()),
        })
    }

    pub fn endpoint(&self) -> Option<&Endpoint> {
        self.endpoint.as_ref()
    }

    pub fn snapshot(&self) -> Snapshot<T> {
        self.state.borrow().clone()
    }

    /// Receive a new [`Snapshot`] after every state change.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<T>> {
        self.state.subscribe()
    }

    /// Fetch unless a value is already cached.
    pub async fn load(&self) -> Snapshot<T> {
        let current = self.snapshot();
        if current.data.is_some() || current.is_idle() {
            return current;
        }
        self.refresh().await
    }

    /// Fetch and replace the cached value. Keeps the previous value (and
    /// records the error) when the fetch fails.
    pub async fn refresh(&self) -> Snapshot<T> {
        let Some(endpoint) = self.endpoint.as_ref() else {
            return self.snapshot();
        };

        let _guard = self.fetch_lock.lock().await;
        match self.api.get::<T>(endpoint).await {
            Ok(data) => {
                self.state.send_modify(|s| {
                    s.data = Some(Arc::new(data));
                    s.error = None;
                });
            }
            Err(e) => {
                if e.is_not_found() {
                    tracing::debug!(path = %endpoint, "Resource not found");
                } else {
                    tracing::warn!(path = %endpoint, error = %e, "Resource fetch failed");
                }
                self.state.send_modify(|s| s.error = Some(Arc::new(e)));
            }
        }
        self.snapshot()
    }

    /// Discard the cached value and re-fetch from the server.
    pub async fn mutate(&self) -> Snapshot<T> {
        if self.endpoint.is_none() {
            return self.snapshot();
        }
        self.state.send_modify(|s| {
            s.data = None;
            s.error = None;
        });
        self.refresh().await
    }
}

/// Anything a successful mutation must revalidate.
#[async_trait::async_trait]
pub trait Revalidate: Send + Sync {
    async fn revalidate(&self);
}

#[async_trait::async_trait]
impl<T> Revalidate for Resource<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    async fn revalidate(&self) {
        self.mutate().await;
    }
}

//! REST client for the hntr box API.
//!
//! Provides the shared HTTP client ([`api::HntrApi`]), endpoint/cache keys,
//! reactive cached resources with scoped polling, mutation calls that
//! revalidate the resources they affect, and the automation run control.

pub mod alert;
pub mod api;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod hooks;
pub mod mutations;
pub mod poller;
pub mod resource;
pub mod retry;
pub mod runner;

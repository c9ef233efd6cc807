//! User-facing mutation failure notices.

use crate::error::ApiError;

/// Shown when the server gave no usable error message.
pub const GENERIC_FAILURE: &str = "Error. Please try again later";

/// Blocking notice for a failed create/update/delete.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Alert {
    pub message: String,
}

impl Alert {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// `"<context>: <server error>"` when the server sent a message,
    /// otherwise [`GENERIC_FAILURE`].
    pub fn from_error(context: &str, err: &ApiError) -> Self {
        match err.server_message() {
            Some(msg) if !msg.trim().is_empty() => Self::new(format!("{context}: {msg}")),
            _ => Self::new(GENERIC_FAILURE),
        }
    }
}

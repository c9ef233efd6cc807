/// Errors from the box API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered 404 for this path.
    #[error("Not found: {path}")]
    NotFound { path: String },

    /// Any other non-2xx answer.
    #[error("API error ({status}): {}", detail(.message, .body))]
    Status {
        status: u16,
        /// The `error` field of a JSON error body, when present.
        message: Option<String>,
        /// Raw response body for debugging.
        body: String,
    },

    /// The body was not the expected JSON shape.
    #[error("Invalid response from {path}: {source}")]
    Decode {
        path: String,
        source: serde_json::Error,
    },

    /// The configured base URL cannot carry path segments.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

fn detail<'a>(message: &'a Option<String>, body: &'a str) -> &'a str {
    message.as_deref().unwrap_or(body)
}

/// How a failed read should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailure {
    /// The addressed entity does not exist; views show a dedicated message.
    NotFound,
    /// Network or server failure; views show a generic error.
    Other,
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn failure(&self) -> FetchFailure {
        if self.is_not_found() {
            FetchFailure::NotFound
        } else {
            FetchFailure::Other
        }
    }

    /// Error text supplied by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }

    /// Whether retrying the same idempotent request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Request(e) => e.is_timeout() || e.is_connect(),
            Self::Status { status, .. } => matches!(status, 502..=504),
            _ => false,
        }
    }
}

use hntr_client::alert::Alert;
use hntr_client::error::ApiError;
use hntr_client::runner::StartError;
use hntr_core::error::CoreError;
use hntr_core::forms::FormErrors;

/// Why a console command did not complete.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("No box selected. Pass --box or set HNTR_BOX_ID")]
    NoBox,

    /// The addressed box, automation or library entry does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A read the command depends on failed.
    #[error("{0}")]
    Unavailable(String),

    /// Per-field validation of a form; nothing was sent.
    #[error("Invalid input: {0}")]
    Form(#[from] FormErrors),

    /// Client-side validation, or a lookup in already-fetched data.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A mutation failed on the server.
    #[error(transparent)]
    Alert(#[from] Alert),

    #[error(transparent)]
    Start(#[from] StartError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

use easel_core::error::{Categorized, ErrorCategory};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Please fill in all fields.")]
    MissingFields,

    #[error("You must be logged in to {action}.")]
    NotAuthenticated { action: &'static str },

    #[error("Failed to connect to the server. Please try again later.")]
    Transport(#[source] reqwest::Error),

    /// A non-success response. `prefix` names the failed operation.
    #[error("{prefix}: {message}")]
    Server {
        prefix: &'static str,
        status: u16,
        message: String,
    },

    #[error("No saved painting found for your account.")]
    NotFound,

    #[error("Invalid data format received from server: {0}")]
    InvalidPayload(String),
}

impl Categorized for RemoteError {
    fn category(&self) -> ErrorCategory {
        match self {
            RemoteError::MissingFields | RemoteError::NotAuthenticated { .. } => {
                ErrorCategory::MissingInput
            }
            RemoteError::Transport(_) => ErrorCategory::Transport,
            RemoteError::Server { .. } | RemoteError::NotFound => ErrorCategory::Server,
            RemoteError::InvalidPayload(_) => ErrorCategory::MalformedInput,
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        RemoteError::Transport(err)
    }
}

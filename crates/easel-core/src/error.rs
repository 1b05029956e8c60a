use thiserror::Error;

/// Coarse classification of a failed user action.
///
/// Every operation error in the workspace maps onto one of these, and each
/// category is reported to the user with its own message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Something the user must supply first (empty field, no credential).
    MissingInput,
    /// Input that could not be decoded or failed validation.
    MalformedInput,
    /// The remote store could not be reached.
    Transport,
    /// The remote store answered with a failure status.
    Server,
}

/// Implemented by every user-facing error type.
pub trait Categorized {
    fn category(&self) -> ErrorCategory;
}

#[derive(Debug, Error)]
pub enum EaselError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Categorized for EaselError {
    fn category(&self) -> ErrorCategory {
        match self {
            EaselError::Io(_) => ErrorCategory::Transport,
            _ => ErrorCategory::MalformedInput,
        }
    }
}

pub type Result<T> = std::result::Result<T, EaselError>;

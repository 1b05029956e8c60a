use easel_core::error::{Categorized, ErrorCategory};
use thiserror::Error;

/// Why a painting file (or server payload) was rejected.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Please select a valid JSON file.")]
    NotJsonFile,

    #[error("Error: Could not read the file. Please ensure it is a valid painting JSON.")]
    Malformed(#[source] serde_json::Error),

    #[error("Invalid JSON format for painting file: {0}")]
    Invalid(String),

    #[error("Could not read the file: {0}")]
    Io(#[from] std::io::Error),
}

impl ImportError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid(reason.into())
    }
}

impl Categorized for ImportError {
    fn category(&self) -> ErrorCategory {
        match self {
            ImportError::Io(_) => ErrorCategory::MissingInput,
            _ => ErrorCategory::MalformedInput,
        }
    }
}

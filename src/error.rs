#[derive(Debug, thiserror::Error)]
pub enum FranchiseError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("User not authenticated")]
    Unauthenticated,

    #[error("Operation cancelled")]
    Cancelled,
}

impl FranchiseError {
    /// True when the backend could not be reached at all (connect failure,
    /// timeout, aborted request). Callers show a connectivity banner for
    /// these and a regular error for everything else.
    pub fn is_connectivity(&self) -> bool {
        match self {
            FranchiseError::Http(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, FranchiseError>;

use shared::error::ErrorCode;
use thiserror::Error;

pub const TIMEOUT_MESSAGE: &str = "Request timeout. Please check your internet connection.";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Request timeout. Please check your internet connection.")]
    Timeout,
    #[error("HTTP {status}: {message}")]
    Status {
        status: u16,
        code: ErrorCode,
        message: String,
    },
    #[error("Failed to load data: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("invalid catalog base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Rejected(String),
}

impl CatalogError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CatalogError::Status { code, .. } => *code,
            CatalogError::Validation(_) | CatalogError::InvalidBaseUrl { .. } => {
                ErrorCode::Validation
            }
            CatalogError::Rejected(_) => ErrorCode::Unauthorized,
            CatalogError::Timeout | CatalogError::Transport(_) | CatalogError::Decode(_) => {
                ErrorCode::Internal
            }
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CatalogError::Timeout
        } else if err.is_decode() {
            CatalogError::Decode(err.to_string())
        } else {
            CatalogError::Transport(err)
        }
    }
}

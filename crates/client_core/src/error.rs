use shared::error::{ApiError, ErrorCode};
use thiserror::Error;

/// Failure of a single call to the content backend.
#[derive(Debug, Clone, Error)]
pub enum ApiClientError {
    /// No response was obtained: unconfigured or malformed base URL, DNS,
    /// connection refused, timeout.
    #[error("transport error: {0}")]
    Transport(String),
    /// A response came back with a non-success status.
    #[error("rejected with status {status}: {error}")]
    Rejected { status: u16, error: ApiError },
    /// A success response whose body did not match the expected shape.
    #[error("malformed response body: {0}")]
    Decode(String),
}

impl ApiClientError {
    pub fn rejected(status: u16, body: &str) -> Self {
        Self::Rejected {
            status,
            error: ApiError::from_response(status, body),
        }
    }

    /// Short label for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiClientError::Transport(_) => "transport",
            ApiClientError::Rejected { .. } => "rejected",
            ApiClientError::Decode(_) => "decode",
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiClientError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ApiClientError::Rejected { error, .. } => Some(error.code),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiClientError::Transport(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, ApiClientError::Rejected { .. })
    }
}

impl From<reqwest::Error> for ApiClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return ApiClientError::Decode(err.to_string());
        }
        if let Some(status) = err.status() {
            return ApiClientError::rejected(status.as_u16(), "");
        }
        ApiClientError::Transport(err.to_string())
    }
}

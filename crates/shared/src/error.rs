use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Unauthorized,
    Forbidden,
    NotFound,
    Validation,
    RateLimited,
    Internal,
    Unknown,
}

impl ErrorCode {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => ErrorCode::Validation,
            401 => ErrorCode::Unauthorized,
            403 => ErrorCode::Forbidden,
            404 => ErrorCode::NotFound,
            429 => ErrorCode::RateLimited,
            500..=599 => ErrorCode::Internal,
            _ => ErrorCode::Unknown,
        }
    }
}

/// A rejection reported by the backend: the classified status plus whatever
/// human-readable detail the body carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{code:?}: {message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Builds an error from a non-success response. The backend answers with
    /// `{"detail": "..."}` or `{"detail": [{..., "msg": "..."}]}` for
    /// validation failures; anything else falls back to the raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let code = ErrorCode::from_status(status);
        let message = serde_json::from_str::<RejectionBody>(body)
            .ok()
            .and_then(|parsed| parsed.detail.into_message())
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    format!("status {status}")
                } else {
                    trimmed.to_string()
                }
            });
        Self { code, message }
    }
}

#[derive(Debug, Deserialize)]
struct RejectionBody {
    detail: RejectionDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RejectionDetail {
    Message(String),
    Items(Vec<RejectionItem>),
}

#[derive(Debug, Deserialize)]
struct RejectionItem {
    #[serde(default)]
    loc: Vec<serde_json::Value>,
    msg: String,
}

impl RejectionDetail {
    fn into_message(self) -> Option<String> {
        match self {
            RejectionDetail::Message(message) => Some(message),
            RejectionDetail::Items(items) if items.is_empty() => None,
            RejectionDetail::Items(items) => Some(
                items
                    .into_iter()
                    .map(|item| match item.loc.last() {
                        Some(serde_json::Value::String(field)) => format!("{field}: {}", item.msg),
                        _ => item.msg,
                    })
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
        }
    }
}

use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message} ({code:?})")]
    Api { code: ApiErrorCode, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Failures the UI should surface as a retryable banner rather than a
    /// field-level rejection.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Http(_)
                | Error::Api {
                    code: ApiErrorCode::Unknown,
                    ..
                }
        )
    }
}

/// Structured rejection codes the backend returns alongside a message.
/// Unknown codes deserialize to `Unknown` so a new server code degrades to a
/// generic retryable error instead of breaking the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiErrorCode {
    RescheduleLimitReached,
    SlotTaken,
    DateBlocked,
    AppointmentNotFound,
    Unauthorized,
    #[serde(other)]
    Unknown,
}

impl ApiErrorCode {
    pub fn user_message(&self) -> &'static str {
        match self {
            ApiErrorCode::RescheduleLimitReached => {
                "This appointment has already been rescheduled once and cannot be moved again."
            }
            ApiErrorCode::SlotTaken => {
                "That time slot was taken while you were booking. Please pick another time."
            }
            ApiErrorCode::DateBlocked => {
                "The counselor has blocked off that date. Please pick another date."
            }
            ApiErrorCode::AppointmentNotFound => "The appointment could not be found.",
            ApiErrorCode::Unauthorized => "Your session has expired. Please log in again.",
            ApiErrorCode::Unknown => "Something went wrong. Please try again.",
        }
    }
}

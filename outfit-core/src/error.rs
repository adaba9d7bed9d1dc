//! Error types shared by the pipeline and the page controllers.
//!
//! Fetch failures are recoverable: the poll loop logs them and keeps the
//! current display. Validation failures are shown to the user as a notice.

use thiserror::Error;

/// Failure of one `GET /api/weather` round trip.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("weather request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("weather request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("weather response is not a valid payload: {0}")]
    Parse(#[from] serde_json::Error),
}

impl FetchError {
    /// Every fetch failure is recoverable; the next tick simply tries again.
    pub fn is_recoverable(&self) -> bool {
        true
    }
}

/// A user action that was refused without side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("pill label is empty")]
    EmptyPill,

    #[error("no cleanup row is marked")]
    NothingSelected,
}

impl ValidationError {
    /// Message shown in the blocking notice.
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::EmptyPill => "추가할 항목을 입력해 주세요.",
            ValidationError::NothingSelected => "정리할 옷을 하나 이상 선택해 주세요.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PollError {
    #[error("poll loop is already running")]
    AlreadyPolling,
}

// ============================
// crates/session-lib/src/error.rs
// ============================
//! Central error type for the session engine.
use liveclass_common::{ParticipantId, RoomId};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("participant {0} not found")]
    ParticipantNotFound(ParticipantId),

    #[error("breakout room {0} not found")]
    RoomNotFound(RoomId),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether this error is a lookup miss rather than a fault
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AppError::ParticipantNotFound(_) | AppError::RoomNotFound(_)
        )
    }
}

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for AppError {
    fn from(_: tokio::sync::mpsc::error::SendError<T>) -> Self {
        AppError::Internal("session actor is gone".to_string())
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Internal(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Internal(msg.to_string())
    }
}

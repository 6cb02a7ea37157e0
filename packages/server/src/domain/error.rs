//! Domain-level error types.

use thiserror::Error;

/// Errors raised while constructing value objects
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("invalid nickname: '{0}'")]
    InvalidNickname(String),

    #[error("chat text is empty")]
    EmptyChatText,

    #[error("chat text is too long: {actual} characters (max {max})")]
    ChatTextTooLong { max: usize, actual: usize },

    #[error("invalid video id: '{0}'")]
    InvalidVideoId(String),
}

/// Errors raised while pushing events to connected clients
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client not found: {0}")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),

    #[error("failed to serialize event: {0}")]
    Serialization(String),
}

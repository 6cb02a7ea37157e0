//! UseCase 層のエラー型
//!
//! 入力の拒否（ニックネーム・URL）は要求元へ通知される。
//! それ以外（未参加・再生中の動画なし・重複投票など）は古い/競合した要求として
//! 静かに無視され、ログにのみ残る。

use thiserror::Error;

use crate::domain::{JoinRejectReason, QueueAddRejectReason, ValueObjectError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    #[error("invalid nickname: {0}")]
    InvalidNickname(#[source] ValueObjectError),

    #[error("nickname already taken: '{0}'")]
    NicknameTaken(String),

    #[error("connection already joined as '{0}'")]
    AlreadyJoined(String),
}

impl JoinError {
    /// Reason reported back to the requester, if any
    pub fn reject_reason(&self) -> Option<JoinRejectReason> {
        match self {
            JoinError::InvalidNickname(_) => Some(JoinRejectReason::InvalidNickname),
            JoinError::NicknameTaken(_) => Some(JoinRejectReason::NicknameTaken),
            JoinError::AlreadyJoined(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendChatError {
    #[error("connection has not joined the room")]
    NotAMember,

    #[error("invalid chat text: {0}")]
    InvalidText(#[from] ValueObjectError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddToQueueError {
    #[error("connection has not joined the room")]
    NotAMember,

    #[error("unrecognized video link: '{0}'")]
    InvalidUrl(String),
}

impl AddToQueueError {
    pub fn reject_reason(&self) -> QueueAddRejectReason {
        QueueAddRejectReason::InvalidUrl
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackControlError {
    #[error("connection has not joined the room")]
    NotAMember,

    #[error("no video is active")]
    NoActiveVideo,

    #[error("seek position out of range: {0}")]
    InvalidPosition(f64),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoteSkipError {
    #[error("connection has not joined the room")]
    NotAMember,

    #[error("no video is active")]
    NoActiveVideo,

    #[error("connection already voted in this session")]
    AlreadyVoted,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportPlaybackError {
    #[error("no video is active")]
    NoActiveVideo,

    #[error("report for '{reported}' is stale, '{current}' is playing")]
    StaleReport { reported: String, current: String },

    #[error("another advance is in progress")]
    AdvanceInProgress,
}

//! WebSocket message DTOs.
//!
//! Every frame is a JSON object tagged with `"type"` (SCREAMING_SNAKE_CASE);
//! payload fields are camelCase.

use serde::{Deserialize, Serialize};

use crate::domain::{JoinRejectReason, QueueAddRejectReason};

// ========================================
// Client → Server
// ========================================

/// Intents sent by a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum ClientMessage {
    Join {
        #[serde(default)]
        nickname: String,
    },
    ChatSend {
        #[serde(default)]
        text: String,
    },
    QueueAdd {
        #[serde(default, alias = "youtubeUrl")]
        url: String,
    },
    PlayPauseToggle {},
    PlaySeek {
        position_sec: f64,
    },
    VoteSkip {},
    /// The client's player reached the end of `video_id`
    VideoEnded {
        #[serde(default)]
        video_id: Option<String>,
    },
    /// The client's player could not play `video_id`
    VideoError {
        #[serde(default)]
        video_id: Option<String>,
    },
    Ping {
        #[serde(default)]
        t: Option<i64>,
    },
}

// ========================================
// Server → Client
// ========================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDto {
    pub id: String,
    pub nickname: String,
    pub joined_at_ms: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageDto {
    pub id: String,
    /// `"SYSTEM"` for notices
    pub nickname: String,
    pub text: String,
    pub sent_at_ms: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueItemDto {
    pub id: String,
    pub video_id: String,
    pub added_by: String,
    pub added_at_ms: i64,
}

/// Playback clock as clients see it. All fields are null (and `isPaused`
/// false) while idle.
///
/// Position at server time `now`:
/// `((pausedAtMs ?? now) - anchorStartMs) / 1000`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackDto {
    pub current_video_id: Option<String>,
    pub anchor_start_ms: Option<i64>,
    pub is_paused: bool,
    pub paused_at_ms: Option<i64>,
    pub added_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkipVoteDto {
    pub video_id: String,
    pub yes_count: usize,
    pub threshold: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomStateDto {
    pub members: Vec<MemberDto>,
    pub chat: Vec<ChatMessageDto>,
    pub queue: Vec<QueueItemDto>,
    pub playback: PlaybackDto,
    pub skip_vote: Option<SkipVoteDto>,
}

/// Events pushed to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum ServerMessage {
    ServerHello {
        connection_id: String,
    },
    JoinAccepted {},
    JoinRejected {
        reason: JoinRejectReason,
    },
    RoomState {
        state: RoomStateDto,
        server_now_ms: i64,
    },
    MembersUpdate {
        members: Vec<MemberDto>,
    },
    ChatBroadcast {
        message: ChatMessageDto,
    },
    QueueUpdate {
        queue: Vec<QueueItemDto>,
    },
    QueueAddRejected {
        reason: QueueAddRejectReason,
    },
    PlaybackUpdate {
        playback: PlaybackDto,
        server_now_ms: i64,
    },
    SkipVoteUpdate {
        skip_vote: Option<SkipVoteDto>,
    },
    /// Periodic clock beacon
    SyncTick {
        server_now_ms: i64,
    },
    Pong {
        /// Client timestamp from `PING`, or the server time when it sent none
        t: i64,
        server_now_ms: i64,
    },
}

//! Outbound room events and the closed sets of rejection reasons.
//!
//! Use cases publish these through the [`MessagePusher`](super::MessagePusher)
//! port; the infrastructure layer decides how they go over the wire.

use serde::{Deserialize, Serialize};

use super::{
    entity::{ChatMessage, Member, PlaybackState, QueueItem, RoomSnapshot, SkipVoteView},
    value_object::{ConnectionId, Timestamp},
};

/// Why a join was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JoinRejectReason {
    NicknameTaken,
    InvalidNickname,
}

/// Why a queue addition was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueueAddRejectReason {
    InvalidUrl,
}

/// Deltas and replies produced by the room
#[derive(Debug, Clone, PartialEq)]
pub enum RoomEvent {
    ServerHello {
        connection_id: ConnectionId,
    },
    JoinAccepted,
    JoinRejected {
        reason: JoinRejectReason,
    },
    /// Full snapshot, sent once per successful join
    RoomState {
        snapshot: RoomSnapshot,
        server_now: Timestamp,
    },
    MembersUpdate {
        members: Vec<Member>,
    },
    ChatBroadcast {
        message: ChatMessage,
    },
    QueueUpdate {
        queue: Vec<QueueItem>,
    },
    QueueAddRejected {
        reason: QueueAddRejectReason,
    },
    PlaybackUpdate {
        playback: PlaybackState,
        server_now: Timestamp,
    },
    SkipVoteUpdate {
        skip_vote: Option<SkipVoteView>,
    },
    ClockBeacon {
        server_now: Timestamp,
    },
    Pong {
        client_time: i64,
        server_now: Timestamp,
    },
}

impl RoomEvent {
    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            RoomEvent::ServerHello { .. } => "server-hello",
            RoomEvent::JoinAccepted => "join-accepted",
            RoomEvent::JoinRejected { .. } => "join-rejected",
            RoomEvent::RoomState { .. } => "room-state",
            RoomEvent::MembersUpdate { .. } => "members-update",
            RoomEvent::ChatBroadcast { .. } => "chat-broadcast",
            RoomEvent::QueueUpdate { .. } => "queue-update",
            RoomEvent::QueueAddRejected { .. } => "queue-add-rejected",
            RoomEvent::PlaybackUpdate { .. } => "playback-update",
            RoomEvent::SkipVoteUpdate { .. } => "skip-vote-update",
            RoomEvent::ClockBeacon { .. } => "clock-beacon",
            RoomEvent::Pong { .. } => "pong",
        }
    }
}

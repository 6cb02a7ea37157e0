//! Conversion logic from domain entities and events to DTOs.

use sajiki_shared::time::timestamp_to_rfc3339;

use crate::{
    domain::{
        ChatMessage, Member, PlaybackState, QueueItem, RoomEvent, RoomSnapshot, SkipVoteView,
    },
    infrastructure::dto::{http::RoomDetailDto, websocket as dto},
    usecase::RoomStateView,
};

// ========================================
// Domain Entity → DTO
// ========================================

impl From<&Member> for dto::MemberDto {
    fn from(model: &Member) -> Self {
        Self {
            id: model.connection_id.as_str().to_string(),
            nickname: model.nickname.as_str().to_string(),
            joined_at_ms: model.joined_at.value(),
        }
    }
}

impl From<&ChatMessage> for dto::ChatMessageDto {
    fn from(model: &ChatMessage) -> Self {
        Self {
            id: model.id.value().to_string(),
            nickname: model.author.display_name().to_string(),
            text: model.text.clone(),
            sent_at_ms: model.sent_at.value(),
        }
    }
}

impl From<&QueueItem> for dto::QueueItemDto {
    fn from(model: &QueueItem) -> Self {
        Self {
            id: model.id.value().to_string(),
            video_id: model.video_id.as_str().to_string(),
            added_by: model.added_by.as_str().to_string(),
            added_at_ms: model.added_at.value(),
        }
    }
}

impl From<&PlaybackState> for dto::PlaybackDto {
    fn from(model: &PlaybackState) -> Self {
        match model.active() {
            Some(active) => Self {
                current_video_id: Some(active.video_id.as_str().to_string()),
                anchor_start_ms: Some(active.anchor_start.value()),
                is_paused: active.is_paused(),
                paused_at_ms: active.paused_at.map(|t| t.value()),
                added_by: Some(active.added_by.as_str().to_string()),
            },
            None => Self {
                current_video_id: None,
                anchor_start_ms: None,
                is_paused: false,
                paused_at_ms: None,
                added_by: None,
            },
        }
    }
}

impl From<&SkipVoteView> for dto::SkipVoteDto {
    fn from(model: &SkipVoteView) -> Self {
        Self {
            video_id: model.video_id.as_str().to_string(),
            yes_count: model.yes_count,
            threshold: model.threshold,
        }
    }
}

impl From<&RoomSnapshot> for dto::RoomStateDto {
    fn from(model: &RoomSnapshot) -> Self {
        Self {
            members: model.members.iter().map(Into::into).collect(),
            chat: model.chat.iter().map(Into::into).collect(),
            queue: model.queue.iter().map(Into::into).collect(),
            playback: (&model.playback).into(),
            skip_vote: model.skip_vote.as_ref().map(Into::into),
        }
    }
}

impl From<&RoomStateView> for RoomDetailDto {
    fn from(view: &RoomStateView) -> Self {
        Self {
            created_at: timestamp_to_rfc3339(view.snapshot.created_at.value()),
            server_now_ms: view.server_now.value(),
            position_sec: view.position_sec(),
            state: (&view.snapshot).into(),
        }
    }
}

// ========================================
// Room Event → Server Message
// ========================================

impl From<&RoomEvent> for dto::ServerMessage {
    fn from(event: &RoomEvent) -> Self {
        match event {
            RoomEvent::ServerHello { connection_id } => Self::ServerHello {
                connection_id: connection_id.as_str().to_string(),
            },
            RoomEvent::JoinAccepted => Self::JoinAccepted {},
            RoomEvent::JoinRejected { reason } => Self::JoinRejected { reason: *reason },
            RoomEvent::RoomState {
                snapshot,
                server_now,
            } => Self::RoomState {
                state: snapshot.into(),
                server_now_ms: server_now.value(),
            },
            RoomEvent::MembersUpdate { members } => Self::MembersUpdate {
                members: members.iter().map(Into::into).collect(),
            },
            RoomEvent::ChatBroadcast { message } => Self::ChatBroadcast {
                message: message.into(),
            },
            RoomEvent::QueueUpdate { queue } => Self::QueueUpdate {
                queue: queue.iter().map(Into::into).collect(),
            },
            RoomEvent::QueueAddRejected { reason } => Self::QueueAddRejected { reason: *reason },
            RoomEvent::PlaybackUpdate {
                playback,
                server_now,
            } => Self::PlaybackUpdate {
                playback: playback.into(),
                server_now_ms: server_now.value(),
            },
            RoomEvent::SkipVoteUpdate { skip_vote } => Self::SkipVoteUpdate {
                skip_vote: skip_vote.as_ref().map(Into::into),
            },
            RoomEvent::ClockBeacon { server_now } => Self::SyncTick {
                server_now_ms: server_now.value(),
            },
            RoomEvent::Pong {
                client_time,
                server_now,
            } => Self::Pong {
                t: *client_time,
                server_now_ms: server_now.value(),
            },
        }
    }
}

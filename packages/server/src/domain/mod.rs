//! Domain layer: the room synchronization model.

pub mod entity;
pub mod error;
pub mod event;
pub mod message_pusher;
pub mod repository;
pub mod service;
pub mod value_object;

pub use entity::{
    ActivePlayback, ChatAuthor, ChatLog, ChatMessage, Member, PlaybackState, QueueItem, Room,
    RoomSnapshot, SkipVoteRegistration, SkipVoteSession, SkipVoteView,
};
pub use error::{MessagePushError, ValueObjectError};
pub use event::{JoinRejectReason, QueueAddRejectReason, RoomEvent};
pub use message_pusher::{MessagePusher, PusherChannel};
#[cfg(test)]
pub use message_pusher::MockMessagePusher;
pub use repository::{RoomGuard, RoomRepository};
pub use service::{AdvanceGuard, AdvanceOutcome, PlaybackAdvancer, StartNextReason};
pub use value_object::{ChatText, ConnectionId, Nickname, Timestamp, VideoId};

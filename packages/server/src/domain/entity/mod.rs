//! Entities of the room domain.
//!
//! [`Room`] is the single source of truth for one room; the other entities
//! are owned by it.

mod chat;
mod member;
mod playback;
mod queue;
mod room;
mod skip_vote;

pub use chat::{ChatAuthor, ChatLog, ChatMessage, DEFAULT_CHAT_CAPACITY, SYSTEM_NICKNAME};
pub use member::Member;
pub use playback::{ActivePlayback, MAX_SEEK_POSITION_SEC, PlaybackState};
pub use queue::QueueItem;
pub use room::{Room, RoomSnapshot};
pub use skip_vote::{SkipVoteRegistration, SkipVoteSession, SkipVoteView};

//! UseCase layer: the room coordinator.
//!
//! Each use case handles one inbound intent. It takes the room lock once,
//! validates the intent against the current state, applies the mutation,
//! and publishes the resulting deltas before releasing the lock.

mod add_to_queue;
mod clock_sync;
mod connect_client;
mod error;
mod get_room_state;
mod join_room;
mod leave_room;
mod publish;
mod report_playback;
mod seek_playback;
mod send_chat;
mod toggle_playback;
mod vote_skip;

#[cfg(test)]
pub(crate) mod test_support;

pub use add_to_queue::{AddToQueueUseCase, QueueAddOutcome};
pub use clock_sync::ClockSyncUseCase;
pub use connect_client::ConnectClientUseCase;
pub use error::{
    AddToQueueError, JoinError, PlaybackControlError, ReportPlaybackError, SendChatError,
    VoteSkipError,
};
pub use get_room_state::{GetRoomStateUseCase, RoomStateView};
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use report_playback::{PlaybackReport, ReportPlaybackUseCase};
pub use seek_playback::SeekPlaybackUseCase;
pub use send_chat::SendChatUseCase;
pub use toggle_playback::{PlaybackToggle, TogglePlaybackUseCase};
pub use vote_skip::{VoteSkipOutcome, VoteSkipUseCase};

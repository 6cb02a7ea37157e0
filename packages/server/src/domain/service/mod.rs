//! Domain services: stateless or room-scoped logic that does not belong to a
//! single entity.

pub mod advance_guard;
pub mod playback_advancer;
pub mod video_link;

pub use advance_guard::{AdvanceGuard, AdvanceToken};
pub use playback_advancer::{AdvanceOutcome, PlaybackAdvancer, StartNextReason};
pub use video_link::resolve_video_id;

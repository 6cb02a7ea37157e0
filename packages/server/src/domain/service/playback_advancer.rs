//! The "start next video" transition.
//!
//! Three independent triggers may ask to advance the queue: the first queue
//! arrival while idle, a skip vote reaching quorum, and a client reporting
//! that the video ended or cannot be played. [`PlaybackAdvancer::start_next`]
//! is the only place the queue head becomes the active video, and its
//! [`AdvanceGuard`] turns overlapping requests into no-ops.

use crate::domain::{
    entity::{ChatMessage, Room},
    value_object::{Timestamp, VideoId},
};

use super::advance_guard::AdvanceGuard;

/// Notice posted when the queue runs dry
pub const EMPTY_QUEUE_NOTICE: &str = "Nothing to play. Add a video link to the queue.";
pub const VOTE_SKIP_NOTICE: &str = "Skip vote passed. Moving on to the next video.";
pub const VIDEO_ENDED_NOTICE: &str = "Video finished. Playing the next one.";
pub const VIDEO_ERROR_NOTICE: &str = "This video can't be played. Skipping to the next one.";

/// What asked for the advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartNextReason {
    QueueFilled,
    VideoEnded,
    VideoError,
    VoteSkip,
}

impl StartNextReason {
    /// System notice announcing the advance, if this reason has one
    fn notice(self) -> Option<&'static str> {
        match self {
            StartNextReason::QueueFilled => None,
            StartNextReason::VideoEnded => Some(VIDEO_ENDED_NOTICE),
            StartNextReason::VideoError => Some(VIDEO_ERROR_NOTICE),
            StartNextReason::VoteSkip => Some(VOTE_SKIP_NOTICE),
        }
    }
}

/// Result of an advance that actually ran
#[derive(Debug, Clone, PartialEq)]
pub struct AdvanceOutcome {
    /// Newly active video, `None` if the room went idle
    pub started: Option<VideoId>,
    /// System notice appended to the chat log
    pub notice: Option<ChatMessage>,
}

/// Room-scoped executor of the advance transition.
#[derive(Debug, Default)]
pub struct PlaybackAdvancer {
    guard: AdvanceGuard,
}

impl PlaybackAdvancer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn guard(&self) -> &AdvanceGuard {
        &self.guard
    }

    /// Dequeue the head of the queue and make it the active video anchored at
    /// `now`, or go idle if the queue is empty.
    ///
    /// Returns `None` without touching the room when another advance is in
    /// progress.
    pub fn start_next(
        &self,
        room: &mut Room,
        reason: StartNextReason,
        now: Timestamp,
    ) -> Option<AdvanceOutcome> {
        let Some(_token) = self.guard.try_begin() else {
            tracing::debug!(?reason, "advance already in progress, ignoring");
            return None;
        };

        room.reset_skip_vote();

        let Some(next) = room.dequeue_next() else {
            room.set_idle();
            let notice = ChatMessage::system(EMPTY_QUEUE_NOTICE, now);
            room.push_chat(notice.clone());
            tracing::info!(?reason, "queue is empty, playback is now idle");
            return Some(AdvanceOutcome {
                started: None,
                notice: Some(notice),
            });
        };

        tracing::info!(
            ?reason,
            video_id = %next.video_id,
            added_by = %next.added_by,
            "starting next video"
        );
        room.set_playing(next.video_id.clone(), now, next.added_by);

        let notice = reason.notice().map(|text| ChatMessage::system(text, now));
        if let Some(notice) = &notice {
            room.push_chat(notice.clone());
        }

        Some(AdvanceOutcome {
            started: Some(next.video_id),
            notice,
        })
    }
}

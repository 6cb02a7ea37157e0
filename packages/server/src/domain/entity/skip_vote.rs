//! Skip-vote session for the active video.

use std::collections::HashSet;

use crate::domain::value_object::{ConnectionId, VideoId};

/// Votes to skip one particular video.
///
/// The threshold is fixed when the session opens; members joining or leaving
/// afterwards do not change it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipVoteSession {
    target: VideoId,
    threshold: usize,
    voters: HashSet<ConnectionId>,
}

/// Result of registering one vote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkipVoteRegistration {
    /// `false` when the connection had already voted in this session
    pub accepted: bool,
    pub reached: bool,
}

/// Client-facing view of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipVoteView {
    pub video_id: VideoId,
    pub yes_count: usize,
    pub threshold: usize,
}

impl SkipVoteSession {
    /// Open a session for `target`, with `max(1, ceil(member_count / 2))` as threshold.
    pub fn open(target: VideoId, member_count: usize) -> Self {
        Self {
            target,
            threshold: member_count.div_ceil(2).max(1),
            voters: HashSet::new(),
        }
    }

    pub fn target(&self) -> &VideoId {
        &self.target
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn yes_count(&self) -> usize {
        self.voters.len()
    }

    pub fn is_reached(&self) -> bool {
        self.yes_count() >= self.threshold
    }

    pub fn has_voted(&self, connection_id: &ConnectionId) -> bool {
        self.voters.contains(connection_id)
    }

    /// Count one vote per connection.
    pub fn register(&mut self, connection_id: ConnectionId) -> SkipVoteRegistration {
        let accepted = self.voters.insert(connection_id);
        SkipVoteRegistration {
            accepted,
            reached: accepted && self.is_reached(),
        }
    }

    pub fn view(&self) -> SkipVoteView {
        SkipVoteView {
            video_id: self.target.clone(),
            yes_count: self.yes_count(),
            threshold: self.threshold,
        }
    }
}

//! Room State Store.
//!
//! Holds the authoritative state of one room: membership, chat log, queue,
//! playback clock and the skip-vote session. It only stores and transforms
//! data; every policy decision (validation, when to advance) belongs to the
//! use case layer, which is expected to have validated each call.

use std::collections::VecDeque;

use super::{
    chat::{ChatLog, ChatMessage},
    member::Member,
    playback::PlaybackState,
    queue::QueueItem,
    skip_vote::{SkipVoteRegistration, SkipVoteSession, SkipVoteView},
};
use crate::domain::value_object::{ConnectionId, Nickname, Timestamp, VideoId};

#[derive(Debug, Clone)]
pub struct Room {
    created_at: Timestamp,
    members: Vec<Member>,
    chat: ChatLog,
    queue: VecDeque<QueueItem>,
    playback: PlaybackState,
    skip_vote: Option<SkipVoteSession>,
}

/// Point-in-time copy of a room, safe to hand to other components.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSnapshot {
    pub created_at: Timestamp,
    pub members: Vec<Member>,
    pub chat: Vec<ChatMessage>,
    pub queue: Vec<QueueItem>,
    pub playback: PlaybackState,
    pub skip_vote: Option<SkipVoteView>,
}

impl Room {
    pub fn new(created_at: Timestamp) -> Self {
        Self::with_chat_log(created_at, ChatLog::default())
    }

    pub fn with_chat_capacity(created_at: Timestamp, chat_capacity: usize) -> Self {
        Self::with_chat_log(created_at, ChatLog::new(chat_capacity))
    }

    fn with_chat_log(created_at: Timestamp, chat: ChatLog) -> Self {
        Self {
            created_at,
            members: Vec::new(),
            chat,
            queue: VecDeque::new(),
            playback: PlaybackState::Idle,
            skip_vote: None,
        }
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    // ── Members ─────────────────────────────────────────────────────

    /// Members in join order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn member(&self, connection_id: &ConnectionId) -> Option<&Member> {
        self.members
            .iter()
            .find(|m| &m.connection_id == connection_id)
    }

    pub fn member_ids(&self) -> Vec<ConnectionId> {
        self.members
            .iter()
            .map(|m| m.connection_id.clone())
            .collect()
    }

    pub fn is_nickname_taken(&self, nickname: &Nickname) -> bool {
        self.members.iter().any(|m| &m.nickname == nickname)
    }

    pub fn add_member(&mut self, member: Member) {
        self.members.push(member);
    }

    pub fn remove_member(&mut self, connection_id: &ConnectionId) -> Option<Member> {
        let index = self
            .members
            .iter()
            .position(|m| &m.connection_id == connection_id)?;
        Some(self.members.remove(index))
    }

    // ── Chat ────────────────────────────────────────────────────────

    pub fn chat(&self) -> &ChatLog {
        &self.chat
    }

    pub fn push_chat(&mut self, message: ChatMessage) {
        self.chat.push(message);
    }

    // ── Queue ───────────────────────────────────────────────────────

    pub fn queue(&self) -> &VecDeque<QueueItem> {
        &self.queue
    }

    pub fn queue_snapshot(&self) -> Vec<QueueItem> {
        self.queue.iter().cloned().collect()
    }

    pub fn enqueue(&mut self, item: QueueItem) {
        self.queue.push_back(item);
    }

    pub fn dequeue_next(&mut self) -> Option<QueueItem> {
        self.queue.pop_front()
    }

    // ── Playback ────────────────────────────────────────────────────

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn set_idle(&mut self) {
        self.playback = PlaybackState::Idle;
    }

    pub fn set_playing(&mut self, video_id: VideoId, anchor_start: Timestamp, added_by: Nickname) {
        self.playback = PlaybackState::playing(video_id, anchor_start, added_by);
    }

    pub fn pause(&mut self, now: Timestamp) -> bool {
        self.playback.pause(now)
    }

    pub fn resume(&mut self, now: Timestamp) -> bool {
        self.playback.resume(now)
    }

    pub fn seek(&mut self, now: Timestamp, position_sec: f64) -> bool {
        self.playback.seek(now, position_sec)
    }

    // ── Skip vote ───────────────────────────────────────────────────

    pub fn skip_vote(&self) -> Option<&SkipVoteSession> {
        self.skip_vote.as_ref()
    }

    pub fn skip_vote_view(&self) -> Option<SkipVoteView> {
        self.skip_vote.as_ref().map(SkipVoteSession::view)
    }

    pub fn reset_skip_vote(&mut self) {
        self.skip_vote = None;
    }

    /// Register a vote against the current video, opening a session first if
    /// none exists for it. Returns `None` when no video is active.
    pub fn register_skip_vote(
        &mut self,
        connection_id: ConnectionId,
    ) -> Option<SkipVoteRegistration> {
        let current = self.playback.current_video_id()?.clone();
        let member_count = self.members.len();

        let is_stale = self
            .skip_vote
            .as_ref()
            .is_none_or(|session| session.target() != &current);
        if is_stale {
            self.skip_vote = Some(SkipVoteSession::open(current, member_count));
        }

        self.skip_vote
            .as_mut()
            .map(|session| session.register(connection_id))
    }

    // ── Snapshot ────────────────────────────────────────────────────

    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            created_at: self.created_at,
            members: self.members.clone(),
            chat: self.chat.to_vec(),
            queue: self.queue_snapshot(),
            playback: self.playback.clone(),
            skip_vote: self.skip_vote_view(),
        }
    }
}

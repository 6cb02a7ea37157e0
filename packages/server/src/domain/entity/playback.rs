//! Playback clock of a room.
//!
//! The playback position is never stored. It is derived from an *anchor*:
//! the wall-clock instant at which the video would have been at 0s if it had
//! played without interruption.
//!
//! ```text
//! paused:  position = max(0, (paused_at - anchor_start) / 1000)
//! playing: position = max(0, (now       - anchor_start) / 1000)
//! ```
//!
//! Pausing freezes the position by recording `paused_at`; resuming and
//! seeking move the anchor so the derived position stays continuous.

use crate::domain::value_object::{Nickname, Timestamp, VideoId};

/// Furthest position a seek may target (one week)
pub const MAX_SEEK_POSITION_SEC: f64 = 7.0 * 24.0 * 60.0 * 60.0;

/// Playback state of a room.
///
/// `Idle` carries no video and no anchor, so the "no video iff no anchor"
/// invariant holds by construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Active(ActivePlayback),
}

/// A video that is currently loaded (playing or paused).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePlayback {
    pub video_id: VideoId,
    pub anchor_start: Timestamp,
    /// `Some` while paused
    pub paused_at: Option<Timestamp>,
    pub added_by: Nickname,
}

impl ActivePlayback {
    pub fn new(video_id: VideoId, anchor_start: Timestamp, added_by: Nickname) -> Self {
        Self {
            video_id,
            anchor_start,
            paused_at: None,
            added_by,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Derived playback position in seconds at `now`.
    pub fn position_sec(&self, now: Timestamp) -> f64 {
        let reference = self.paused_at.unwrap_or(now);
        let elapsed_ms = reference.millis_since(self.anchor_start);
        (elapsed_ms as f64 / 1000.0).max(0.0)
    }

    /// Freeze the position at `now`. Returns `false` if already paused.
    fn pause(&mut self, now: Timestamp) -> bool {
        if self.is_paused() {
            return false;
        }
        self.paused_at = Some(now);
        true
    }

    /// Re-anchor so the position at `now` equals the frozen one.
    /// Returns `false` if not paused.
    fn resume(&mut self, now: Timestamp) -> bool {
        let Some(paused_at) = self.paused_at.take() else {
            return false;
        };
        let frozen_ms = paused_at.millis_since(self.anchor_start);
        self.anchor_start = now.minus_millis(frozen_ms);
        true
    }

    fn seek(&mut self, now: Timestamp, position_sec: f64) {
        let offset_ms = (position_sec.clamp(0.0, MAX_SEEK_POSITION_SEC) * 1000.0).round() as i64;
        self.anchor_start = now.minus_millis(offset_ms);
        if self.is_paused() {
            self.paused_at = Some(now);
        }
    }
}

impl PlaybackState {
    pub fn playing(video_id: VideoId, anchor_start: Timestamp, added_by: Nickname) -> Self {
        Self::Active(ActivePlayback::new(video_id, anchor_start, added_by))
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, PlaybackState::Idle)
    }

    pub fn active(&self) -> Option<&ActivePlayback> {
        match self {
            PlaybackState::Active(active) => Some(active),
            PlaybackState::Idle => None,
        }
    }

    pub fn current_video_id(&self) -> Option<&VideoId> {
        self.active().map(|active| &active.video_id)
    }

    pub fn is_paused(&self) -> bool {
        self.active().is_some_and(ActivePlayback::is_paused)
    }

    /// Derived position in seconds, `None` when idle.
    pub fn position_sec(&self, now: Timestamp) -> Option<f64> {
        self.active().map(|active| active.position_sec(now))
    }

    /// Pause transform. No-op (returns `false`) when idle or already paused.
    pub fn pause(&mut self, now: Timestamp) -> bool {
        match self {
            PlaybackState::Active(active) => active.pause(now),
            PlaybackState::Idle => false,
        }
    }

    /// Resume transform. No-op (returns `false`) when idle or not paused.
    pub fn resume(&mut self, now: Timestamp) -> bool {
        match self {
            PlaybackState::Active(active) => active.resume(now),
            PlaybackState::Idle => false,
        }
    }

    /// Seek transform. No-op (returns `false`) when idle.
    pub fn seek(&mut self, now: Timestamp, position_sec: f64) -> bool {
        match self {
            PlaybackState::Active(active) => {
                active.seek(now, position_sec);
                true
            }
            PlaybackState::Idle => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn playing_at(anchor_ms: i64) -> PlaybackState {
        PlaybackState::playing(
            VideoId::new("dQw4w9WgXcQ").unwrap(),
            Timestamp::new(anchor_ms),
            Nickname::new("Alice").unwrap(),
        )
    }

    #[test]
    fn test_idle_has_no_position() {
        // テスト項目: アイドル状態では位置が存在しない
        // given (前提条件):
        let playback = PlaybackState::Idle;

        // when (操作) / then (期待する結果):
        assert_eq!(playback.position_sec(Timestamp::new(1_000)), None);
        assert_eq!(playback.current_video_id(), None);
        assert!(!playback.is_paused());
    }

    #[test]
    fn test_position_advances_with_server_clock() {
        // テスト項目: 再生中はサーバー時刻に応じて位置が進む
        // given (前提条件):
        let playback = playing_at(100_000);

        // when (操作):
        let position = playback.position_sec(Timestamp::new(110_000)).unwrap();

        // then (期待する結果):
        assert!((position - 10.0).abs() < EPSILON);
    }

    #[test]
    fn test_position_is_never_negative() {
        // テスト項目: アンカーより前の時刻でも位置は 0 未満にならない
        // given (前提条件):
        let playback = playing_at(100_000);

        // when (操作):
        let position = playback.position_sec(Timestamp::new(90_000)).unwrap();

        // then (期待する結果):
        assert_eq!(position, 0.0);
    }

    #[test]
    fn test_pause_freezes_position() {
        // テスト項目: 一時停止すると位置が固定される
        // given (前提条件):
        let mut playback = playing_at(0);

        // when (操作):
        assert!(playback.pause(Timestamp::new(30_000)));
        let later = playback.position_sec(Timestamp::new(95_000)).unwrap();

        // then (期待する結果):
        assert!(playback.is_paused());
        assert!((later - 30.0).abs() < EPSILON);
    }

    #[test]
    fn test_pause_twice_is_noop() {
        // テスト項目: 一時停止中に再度一時停止しても pausedAt は変わらない
        // given (前提条件):
        let mut playback = playing_at(0);
        playback.pause(Timestamp::new(30_000));

        // when (操作):
        let changed = playback.pause(Timestamp::new(40_000));

        // then (期待する結果):
        assert!(!changed);
        assert_eq!(
            playback.active().unwrap().paused_at,
            Some(Timestamp::new(30_000))
        );
    }

    #[test]
    fn test_resume_is_continuous() {
        // テスト項目: 30 秒地点で一時停止し 5 秒後に再開しても位置は 30 秒のまま
        // given (前提条件):
        let mut playback = playing_at(0);
        playback.pause(Timestamp::new(30_000));

        // when (操作):
        assert!(playback.resume(Timestamp::new(35_000)));

        // then (期待する結果):
        let right_after = playback.position_sec(Timestamp::new(35_000)).unwrap();
        let two_secs_later = playback.position_sec(Timestamp::new(37_000)).unwrap();
        assert!(!playback.is_paused());
        assert!((right_after - 30.0).abs() < EPSILON);
        assert!((two_secs_later - 32.0).abs() < EPSILON);
        assert_eq!(playback.active().unwrap().anchor_start, Timestamp::new(5_000));
    }

    #[test]
    fn test_resume_when_playing_is_noop() {
        // テスト項目: 再生中に再開しても何も変わらない
        // given (前提条件):
        let mut playback = playing_at(1_000);
        let before = playback.clone();

        // when (操作):
        let changed = playback.resume(Timestamp::new(5_000));

        // then (期待する結果):
        assert!(!changed);
        assert_eq!(playback, before);
    }

    #[test]
    fn test_seek_while_playing() {
        // テスト項目: 再生中のシーク後、位置は要求値と一致し進み続ける
        // given (前提条件):
        let mut playback = playing_at(0);

        // when (操作):
        assert!(playback.seek(Timestamp::new(50_000), 12.5));

        // then (期待する結果):
        let at_seek = playback.position_sec(Timestamp::new(50_000)).unwrap();
        let after = playback.position_sec(Timestamp::new(51_000)).unwrap();
        assert!((at_seek - 12.5).abs() < EPSILON);
        assert!((after - 13.5).abs() < EPSILON);
    }

    #[test]
    fn test_seek_while_paused_stays_paused_at_requested_position() {
        // テスト項目: 一時停止中のシークは要求位置で停止したままになる
        // given (前提条件):
        let mut playback = playing_at(0);
        playback.pause(Timestamp::new(30_000));

        // when (操作):
        playback.seek(Timestamp::new(40_000), 90.0);

        // then (期待する結果):
        assert!(playback.is_paused());
        let frozen = playback.position_sec(Timestamp::new(99_000)).unwrap();
        assert!((frozen - 90.0).abs() < EPSILON);

        // and resuming keeps the sought position
        playback.resume(Timestamp::new(60_000));
        let resumed = playback.position_sec(Timestamp::new(60_000)).unwrap();
        assert!((resumed - 90.0).abs() < EPSILON);
    }

    #[test]
    fn test_transforms_on_idle_are_noops() {
        // テスト項目: アイドル状態では一時停止・再開・シークは何もしない
        // given (前提条件):
        let mut playback = PlaybackState::Idle;

        // when (操作) / then (期待する結果):
        assert!(!playback.pause(Timestamp::new(1)));
        assert!(!playback.resume(Timestamp::new(2)));
        assert!(!playback.seek(Timestamp::new(3), 10.0));
        assert!(playback.is_idle());
    }
}

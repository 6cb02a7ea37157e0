//! UseCase: 再生 / 一時停止の切り替え
//!
//! 一時停止では位置を `pausedAt` に凍結し、再開ではその位置から続くように
//! アンカーを付け替える。どちらも全メンバーへ `PlaybackUpdate` を配信する。

use std::sync::Arc;

use sajiki_shared::time::Clock;

use crate::domain::{ConnectionId, MessagePusher, RoomEvent, RoomRepository, Timestamp};

use super::{error::PlaybackControlError, publish::broadcast};

/// Which way the toggle went
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackToggle {
    Paused,
    Resumed,
}

pub struct TogglePlaybackUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl TogglePlaybackUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<PlaybackToggle, PlaybackControlError> {
        let mut room = self.repository.lock().await;

        if room.member(connection_id).is_none() {
            return Err(PlaybackControlError::NotAMember);
        }
        if room.playback().is_idle() {
            return Err(PlaybackControlError::NoActiveVideo);
        }

        let now = Timestamp::new(self.clock.now_millis());
        let toggle = if room.playback().is_paused() {
            room.resume(now);
            PlaybackToggle::Resumed
        } else {
            room.pause(now);
            PlaybackToggle::Paused
        };
        tracing::info!(
            "Playback {:?} by '{}' at {:.3}s",
            toggle,
            connection_id,
            room.playback().position_sec(now).unwrap_or_default()
        );

        broadcast(
            self.message_pusher.as_ref(),
            room.member_ids(),
            RoomEvent::PlaybackUpdate {
                playback: room.playback().clone(),
                server_now: now,
            },
        )
        .await;

        Ok(toggle)
    }
}

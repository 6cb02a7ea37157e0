//! UseCase: シーク処理

use std::sync::Arc;

use sajiki_shared::time::Clock;

use crate::domain::{
    ConnectionId, MessagePusher, RoomEvent, RoomRepository, Timestamp,
    entity::MAX_SEEK_POSITION_SEC,
};

use super::{error::PlaybackControlError, publish::broadcast};

pub struct SeekPlaybackUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SeekPlaybackUseCase {
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

    /// Move the active video to `position_sec`, keeping its paused state.
    ///
    /// Returns the position the room now reports.
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        position_sec: f64,
    ) -> Result<f64, PlaybackControlError> {
        if !(0.0..=MAX_SEEK_POSITION_SEC).contains(&position_sec) {
            return Err(PlaybackControlError::InvalidPosition(position_sec));
        }

        let mut room = self.repository.lock().await;

        if room.member(connection_id).is_none() {
            return Err(PlaybackControlError::NotAMember);
        }
        let now = Timestamp::new(self.clock.now_millis());
        if !room.seek(now, position_sec) {
            return Err(PlaybackControlError::NoActiveVideo);
        }

        let position = room.playback().position_sec(now).unwrap_or_default();
        tracing::info!("'{}' seeked to {:.3}s", connection_id, position);

        broadcast(
            self.message_pusher.as_ref(),
            room.member_ids(),
            RoomEvent::PlaybackUpdate {
                playback: room.playback().clone(),
                server_now: now,
            },
        )
        .await;

        Ok(position)
    }
}

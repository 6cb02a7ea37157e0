//! UseCase: ルーム状態の取得（HTTP API 用）

use std::sync::Arc;

use sajiki_shared::time::Clock;

use crate::domain::{RoomRepository, RoomSnapshot, Timestamp};

/// Snapshot plus the server time it was taken at
#[derive(Debug, Clone, PartialEq)]
pub struct RoomStateView {
    pub snapshot: RoomSnapshot,
    pub server_now: Timestamp,
}

impl RoomStateView {
    /// Derived playback position at `server_now`, `None` when idle
    pub fn position_sec(&self) -> Option<f64> {
        self.snapshot.playback.position_sec(self.server_now)
    }
}

pub struct GetRoomStateUseCase {
    repository: Arc<dyn RoomRepository>,
    clock: Arc<dyn Clock>,
}

impl GetRoomStateUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn execute(&self) -> RoomStateView {
        let room = self.repository.lock().await;
        RoomStateView {
            snapshot: room.snapshot(),
            server_now: Timestamp::new(self.clock.now_millis()),
        }
    }
}

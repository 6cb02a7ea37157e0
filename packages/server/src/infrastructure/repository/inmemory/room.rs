//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! プロセス内に一つだけ存在するルームを `tokio::sync::Mutex` で保持します。
//! ルームへの変更はすべてこの Mutex を通じて直列化されます。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Room, RoomGuard, RoomRepository};

/// インメモリ Room Repository 実装
pub struct InMemoryRoomRepository {
    /// Room ドメインモデル
    room: Arc<Mutex<Room>>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new(room: Arc<Mutex<Room>>) -> Self {
        Self { room }
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn lock(&self) -> RoomGuard {
        self.room.clone().lock_owned().await
    }
}

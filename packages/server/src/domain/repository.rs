//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use tokio::sync::OwnedMutexGuard;

use super::{Room, RoomSnapshot};

/// Exclusive handle on a room. Dropping it ends the critical section.
pub type RoomGuard = OwnedMutexGuard<Room>;

/// Room Repository trait
///
/// All mutations of a room are serialized through [`RoomRepository::lock`]:
/// a use case takes the guard once, validates, mutates, publishes, and
/// releases it. Fields are never locked individually.
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Acquire exclusive access to the room
    async fn lock(&self) -> RoomGuard;

    /// Copy of the current room state
    async fn snapshot(&self) -> RoomSnapshot {
        self.lock().await.snapshot()
    }
}

//! MessagePusher trait 定義
//!
//! ルームのイベントをクライアントへ届けるためのインターフェース。
//! WebSocket などの具体的な実装は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, RoomEvent};

/// Outbound channel of one connection (serialized frames)
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Delivers room events to connected clients.
///
/// Implementations must not block: use cases call it while holding the room
/// lock so that every connection observes deltas in mutation order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Start delivering to a new connection
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// Stop delivering to a connection
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// Send an event to a single connection
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError>;

    /// Send an event to every target; unknown or closed targets are skipped
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError>;
}

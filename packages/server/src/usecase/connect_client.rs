//! UseCase: 接続確立処理
//!
//! 新しい WebSocket 接続に ID を割り当て、MessagePusher に登録して
//! `ServerHello` を送る。ルームへの参加は `JOIN` を受け取るまで行わない。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel, RoomEvent};

use super::publish::reply;

/// 接続確立のユースケース
pub struct ConnectClientUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectClientUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 接続を登録し、割り当てた ID を返す
    pub async fn execute(&self, sender: PusherChannel) -> ConnectionId {
        let connection_id = ConnectionId::generate();
        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await;
        tracing::info!("Connection '{}' opened", connection_id);

        reply(
            self.message_pusher.as_ref(),
            &connection_id,
            RoomEvent::ServerHello {
                connection_id: connection_id.clone(),
            },
        )
        .await;

        connection_id
    }
}

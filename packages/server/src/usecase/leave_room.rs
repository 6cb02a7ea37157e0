//! UseCase: 退室処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveRoomUseCase::execute() メソッド
//! - メンバー削除、MessagePusher からの登録解除、残りのメンバーへの通知
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加済みメンバーの切断
//! - エッジケース：参加前に切断した接続（通知なし）

use std::sync::Arc;

use crate::domain::{ConnectionId, Member, MessagePusher, RoomEvent, RoomRepository};

use super::publish::broadcast;

/// 退室（切断）のユースケース
pub struct LeaveRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl LeaveRoomUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 接続の切断を処理する
    ///
    /// 参加済みだった場合は削除されたメンバーを返す。キュー、チャット、
    /// 再生状態は変更しない。
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<Member> {
        let mut room = self.repository.lock().await;

        self.message_pusher.unregister_client(connection_id).await;

        let removed = room.remove_member(connection_id)?;
        tracing::info!(
            "'{}' ({}) left ({} members)",
            removed.nickname,
            connection_id,
            room.members().len()
        );

        broadcast(
            self.message_pusher.as_ref(),
            room.member_ids(),
            RoomEvent::MembersUpdate {
                members: room.members().to_vec(),
            },
        )
        .await;

        Some(removed)
    }
}

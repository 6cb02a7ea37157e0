//! UseCase: キュー追加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - AddToQueueUseCase::execute() メソッド
//! - リンクの解決、FIFO への追加、待機中の自動再生開始
//!
//! ### なぜこのテストが必要か
//! - キューが厳密に追加順で再生されることを保証する
//! - 待機中に最初の動画が追加されたとき、通知なしで再生が始まることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：再生中の追加（キューに積まれるだけ）、待機中の追加（自動再生）
//! - 異常系：解決できないリンク、未参加の接続

use std::sync::Arc;

use sajiki_shared::time::Clock;

use crate::domain::{
    AdvanceOutcome, ConnectionId, MessagePusher, PlaybackAdvancer, QueueItem, RoomEvent,
    RoomRepository, StartNextReason, Timestamp, service::resolve_video_id,
};

use super::{
    error::AddToQueueError,
    publish::{broadcast, broadcast_advance, reply},
};

/// Result of an accepted queue addition
#[derive(Debug, Clone, PartialEq)]
pub struct QueueAddOutcome {
    pub item: QueueItem,
    /// Set when the addition auto-started playback
    pub started: Option<AdvanceOutcome>,
}

/// キュー追加のユースケース
pub struct AddToQueueUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    advancer: Arc<PlaybackAdvancer>,
}

impl AddToQueueUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        advancer: Arc<PlaybackAdvancer>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
            advancer,
        }
    }

    /// キュー追加を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 追加を要求した接続
    /// * `url_raw` - クライアントが送ってきたリンク（未検証）
    ///
    /// # Returns
    ///
    /// * `Ok(QueueAddOutcome)` - 追加成功（待機中だった場合は再生開始の結果も含む）
    /// * `Err(AddToQueueError)` - 追加拒否（要求元へ `QueueAddRejected` で通知済み）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        url_raw: &str,
    ) -> Result<QueueAddOutcome, AddToQueueError> {
        let pusher = self.message_pusher.as_ref();
        let mut room = self.repository.lock().await;

        let validated = match room.member(&connection_id) {
            None => Err(AddToQueueError::NotAMember),
            Some(member) => resolve_video_id(url_raw)
                .map(|video_id| (video_id, member.nickname.clone()))
                .ok_or_else(|| AddToQueueError::InvalidUrl(url_raw.trim().to_string())),
        };
        let (video_id, added_by) = match validated {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("Rejecting queue add from '{}': {}", connection_id, e);
                reply(
                    pusher,
                    &connection_id,
                    RoomEvent::QueueAddRejected {
                        reason: e.reject_reason(),
                    },
                )
                .await;
                return Err(e);
            }
        };

        let now = Timestamp::new(self.clock.now_millis());
        let item = QueueItem::new(video_id, added_by, now);
        room.enqueue(item.clone());
        tracing::info!(
            "'{}' queued {} (queue length {})",
            item.added_by,
            item.video_id,
            room.queue().len()
        );

        broadcast(
            pusher,
            room.member_ids(),
            RoomEvent::QueueUpdate {
                queue: room.queue_snapshot(),
            },
        )
        .await;

        let started = if room.playback().is_idle() {
            self.advancer
                .start_next(&mut room, StartNextReason::QueueFilled, now)
        } else {
            None
        };
        if let Some(outcome) = &started {
            broadcast_advance(pusher, &room, outcome, now).await;
        }

        Ok(QueueAddOutcome { item, started })
    }
}

//! UseCase: スキップ投票
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - VoteSkipUseCase::execute() メソッド
//! - 投票の登録、しきい値到達時の次の動画への切り替え
//!
//! ### なぜこのテストが必要か
//! - 一つの接続が同じセッションで二重に投票できないことを保証する
//! - しきい値はセッション開始時のメンバー数で固定されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：4 人中 2 人の投票で切り替え（シナリオ 3）
//! - 異常系：重複投票、再生中の動画なし、未参加の接続
//! - エッジケース：セッション中のメンバー増減、キューが空のときの切り替え

use std::sync::Arc;

use sajiki_shared::time::Clock;

use crate::domain::{
    AdvanceOutcome, ConnectionId, MessagePusher, PlaybackAdvancer, RoomEvent, RoomRepository,
    SkipVoteView, StartNextReason, Timestamp,
};

use super::{
    error::VoteSkipError,
    publish::{broadcast, broadcast_advance},
};

/// Result of an accepted vote
#[derive(Debug, Clone, PartialEq)]
pub struct VoteSkipOutcome {
    /// Tally right after the vote was counted
    pub tally: SkipVoteView,
    /// Set when the vote reached the threshold and the queue advanced
    pub advance: Option<AdvanceOutcome>,
}

/// スキップ投票のユースケース
pub struct VoteSkipUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    advancer: Arc<PlaybackAdvancer>,
}

impl VoteSkipUseCase {
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

    /// スキップ投票を実行
    ///
    /// 再生中の動画に対するセッションがなければ、ここで開始する。
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<VoteSkipOutcome, VoteSkipError> {
        let pusher = self.message_pusher.as_ref();
        let mut room = self.repository.lock().await;

        if room.member(connection_id).is_none() {
            return Err(VoteSkipError::NotAMember);
        }
        let registration = room
            .register_skip_vote(connection_id.clone())
            .ok_or(VoteSkipError::NoActiveVideo)?;
        if !registration.accepted {
            return Err(VoteSkipError::AlreadyVoted);
        }
        let tally = room.skip_vote_view().ok_or(VoteSkipError::NoActiveVideo)?;
        tracing::info!(
            "Skip vote from '{}' for {} ({}/{})",
            connection_id,
            tally.video_id,
            tally.yes_count,
            tally.threshold
        );

        broadcast(
            pusher,
            room.member_ids(),
            RoomEvent::SkipVoteUpdate {
                skip_vote: Some(tally.clone()),
            },
        )
        .await;

        let advance = if registration.reached {
            let now = Timestamp::new(self.clock.now_millis());
            let advance = self
                .advancer
                .start_next(&mut room, StartNextReason::VoteSkip, now);
            if let Some(outcome) = &advance {
                broadcast_advance(pusher, &room, outcome, now).await;
            }
            advance
        } else {
            None
        };

        Ok(VoteSkipOutcome { tally, advance })
    }
}

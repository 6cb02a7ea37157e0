//! UseCase: クライアントからの再生終了 / 再生不可の報告
//!
//! 古い報告として除外できるのは `videoId` 付きの報告だけ。`videoId` のない
//! 報告はその時点の動画に対するものとして扱うため、二重に進めたくない
//! クライアントは必ず `videoId` を送ること。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ReportPlaybackUseCase::execute() メソッド
//! - 報告による次の動画への切り替え、古い報告の除外、同時切り替えの抑止
//!
//! ### なぜこのテストが必要か
//! - 複数のきっかけ（投票・終了報告）が重なってもキューは一度しか進まないことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：再生終了、再生不可の報告
//! - 異常系：再生中の動画なし、既に切り替わった動画への報告
//! - エッジケース：切り替え処理の実行中に届いた報告

use std::sync::Arc;

use sajiki_shared::time::Clock;

use crate::domain::{
    AdvanceOutcome, ConnectionId, MessagePusher, PlaybackAdvancer, RoomRepository,
    StartNextReason, Timestamp,
};

use super::{error::ReportPlaybackError, publish::broadcast_advance};

/// What the client observed about the active video
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackReport {
    Ended,
    Unplayable,
}

impl PlaybackReport {
    fn reason(self) -> StartNextReason {
        match self {
            PlaybackReport::Ended => StartNextReason::VideoEnded,
            PlaybackReport::Unplayable => StartNextReason::VideoError,
        }
    }
}

pub struct ReportPlaybackUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    advancer: Arc<PlaybackAdvancer>,
}

impl ReportPlaybackUseCase {
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

    /// 報告を処理し、必要であれば次の動画へ進める
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 報告した接続（参加前の接続からの報告も受け付ける）
    /// * `report` - 終了か再生不可か
    /// * `reported_video` - クライアントが再生していた動画 ID（省略可）。
    ///   現在の動画と一致しない報告は古いものとして無視する
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        report: PlaybackReport,
        reported_video: Option<&str>,
    ) -> Result<AdvanceOutcome, ReportPlaybackError> {
        let mut room = self.repository.lock().await;

        let current = room
            .playback()
            .current_video_id()
            .ok_or(ReportPlaybackError::NoActiveVideo)?;
        if let Some(reported) = reported_video
            && reported != current.as_str()
        {
            return Err(ReportPlaybackError::StaleReport {
                reported: reported.to_string(),
                current: current.to_string(),
            });
        }
        tracing::info!("'{}' reported {:?} for {}", connection_id, report, current);

        let now = Timestamp::new(self.clock.now_millis());
        let outcome = self
            .advancer
            .start_next(&mut room, report.reason(), now)
            .ok_or(ReportPlaybackError::AdvanceInProgress)?;
        broadcast_advance(self.message_pusher.as_ref(), &room, &outcome, now).await;

        Ok(outcome)
    }
}

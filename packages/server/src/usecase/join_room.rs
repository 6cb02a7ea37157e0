//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - ニックネームの検証、重複チェック、参加後の通知
//!
//! ### なぜこのテストが必要か
//! - 参加中のメンバー間でニックネームが一意であることを保証する
//! - 参加者には全体スナップショットが、他メンバーにはメンバー一覧が届くことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規メンバーの参加
//! - 異常系：不正なニックネーム、使用中のニックネーム
//! - エッジケース：同じ接続からの二重参加、退室後のニックネーム再利用

use std::sync::Arc;

use sajiki_shared::time::Clock;

use crate::domain::{
    ConnectionId, JoinRejectReason, Member, MessagePusher, Nickname, RoomEvent, RoomRepository,
    Timestamp,
};

use super::{
    error::JoinError,
    publish::{broadcast, reply},
};

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
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

    /// ルーム参加を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 参加する接続の ID
    /// * `nickname_raw` - クライアントが送ってきたニックネーム（未検証）
    ///
    /// # Returns
    ///
    /// * `Ok(Member)` - 参加成功
    /// * `Err(JoinError)` - 参加拒否（理由は要求元へ `JoinRejected` で通知済み）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        nickname_raw: &str,
    ) -> Result<Member, JoinError> {
        let pusher = self.message_pusher.as_ref();
        let mut room = self.repository.lock().await;

        if let Some(existing) = room.member(&connection_id) {
            tracing::debug!(
                "Connection '{}' already joined as '{}', ignoring",
                connection_id,
                existing.nickname
            );
            return Err(JoinError::AlreadyJoined(existing.nickname.to_string()));
        }

        let nickname = match Nickname::new(nickname_raw) {
            Ok(nickname) => nickname,
            Err(e) => {
                tracing::warn!("Rejecting join from '{}': {}", connection_id, e);
                reply(
                    pusher,
                    &connection_id,
                    RoomEvent::JoinRejected {
                        reason: JoinRejectReason::InvalidNickname,
                    },
                )
                .await;
                return Err(JoinError::InvalidNickname(e));
            }
        };

        if room.is_nickname_taken(&nickname) {
            tracing::warn!(
                "Rejecting join from '{}': nickname '{}' is taken",
                connection_id,
                nickname
            );
            reply(
                pusher,
                &connection_id,
                RoomEvent::JoinRejected {
                    reason: JoinRejectReason::NicknameTaken,
                },
            )
            .await;
            return Err(JoinError::NicknameTaken(nickname.into_string()));
        }

        let now = Timestamp::new(self.clock.now_millis());
        let member = Member::new(connection_id.clone(), nickname, now);
        room.add_member(member.clone());
        tracing::info!(
            "'{}' joined as '{}' ({} members)",
            connection_id,
            member.nickname,
            room.members().len()
        );

        reply(pusher, &connection_id, RoomEvent::JoinAccepted).await;
        reply(
            pusher,
            &connection_id,
            RoomEvent::RoomState {
                snapshot: room.snapshot(),
                server_now: now,
            },
        )
        .await;
        broadcast(
            pusher,
            room.member_ids(),
            RoomEvent::MembersUpdate {
                members: room.members().to_vec(),
            },
        )
        .await;

        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MockMessagePusher, Room},
        infrastructure::repository::InMemoryRoomRepository,
        usecase::test_support::{Delivery, Fixture, START_MS},
    };
    use sajiki_shared::time::FixedClock;
    use tokio::sync::Mutex;

    #[tokio::test]
    async fn test_join_success_sends_state_and_members() {
        // テスト項目: 参加成功時、本人に JoinAccepted と RoomState、全員に MembersUpdate が届く
        // given (前提条件):
        let fixture = Fixture::new();
        let usecase = fixture.join_room();
        let alice = ConnectionId::new("a");

        // when (操作):
        let result = usecase.execute(alice.clone(), "  Alice ").await;

        // then (期待する結果):
        let member = result.unwrap();
        assert_eq!(member.nickname.as_str(), "Alice");
        assert_eq!(member.joined_at, Timestamp::new(START_MS));

        let deliveries = fixture.pusher.deliveries();
        assert_eq!(deliveries.len(), 3);
        assert_eq!(deliveries[0], Delivery::To(alice.clone(), RoomEvent::JoinAccepted));
        match &deliveries[1] {
            Delivery::To(to, RoomEvent::RoomState { snapshot, server_now }) => {
                assert_eq!(to, &alice);
                assert_eq!(snapshot.members.len(), 1);
                assert_eq!(*server_now, Timestamp::new(START_MS));
            }
            other => panic!("unexpected delivery: {other:?}"),
        }
        match &deliveries[2] {
            Delivery::Broadcast(targets, RoomEvent::MembersUpdate { members }) => {
                assert_eq!(targets, &vec![alice.clone()]);
                assert_eq!(members.len(), 1);
            }
            other => panic!("unexpected delivery: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_join_duplicate_nickname_is_rejected() {
        // テスト項目: 同じニックネームでの参加は NICKNAME_TAKEN で拒否される（シナリオ 1）
        // given (前提条件):
        let fixture = Fixture::new();
        let usecase = fixture.join_room();
        let a = ConnectionId::new("a");
        let b = ConnectionId::new("b");
        usecase.execute(a.clone(), "Alice").await.unwrap();
        fixture.pusher.clear();

        // when (操作):
        let rejected = usecase.execute(b.clone(), "Alice").await;
        let accepted = usecase.execute(b.clone(), "Bo").await;

        // then (期待する結果):
        assert_eq!(rejected, Err(JoinError::NicknameTaken("Alice".to_string())));
        assert!(accepted.is_ok());
        assert_eq!(
            fixture.pusher.events_for(&b).first(),
            Some(&RoomEvent::JoinRejected {
                reason: JoinRejectReason::NicknameTaken
            })
        );
        let room = fixture.room().await;
        let nicknames: Vec<&str> = room.members().iter().map(|m| m.nickname.as_str()).collect();
        assert_eq!(nicknames, vec!["Alice", "Bo"]);
    }

    #[tokio::test]
    async fn test_join_invalid_nickname_is_rejected() {
        // テスト項目: 不正なニックネームは INVALID_NICKNAME で拒否され、状態は変わらない
        // given (前提条件):
        let fixture = Fixture::new();
        let usecase = fixture.join_room();
        let a = ConnectionId::new("a");

        // when (操作):
        let result = usecase.execute(a.clone(), "x").await;

        // then (期待する結果):
        assert!(matches!(result, Err(JoinError::InvalidNickname(_))));
        assert_eq!(
            result.unwrap_err().reject_reason(),
            Some(JoinRejectReason::InvalidNickname)
        );
        assert_eq!(
            fixture.pusher.deliveries(),
            vec![Delivery::To(
                a,
                RoomEvent::JoinRejected {
                    reason: JoinRejectReason::InvalidNickname
                }
            )]
        );
        assert!(fixture.room().await.members().is_empty());
    }

    #[tokio::test]
    async fn test_join_twice_from_same_connection_is_ignored() {
        // テスト項目: 参加済みの接続からの再参加は静かに無視される
        // given (前提条件):
        let fixture = Fixture::new();
        let usecase = fixture.join_room();
        let a = ConnectionId::new("a");
        usecase.execute(a.clone(), "Alice").await.unwrap();
        fixture.pusher.clear();

        // when (操作):
        let result = usecase.execute(a.clone(), "Alicia").await;

        // then (期待する結果):
        assert_eq!(result, Err(JoinError::AlreadyJoined("Alice".to_string())));
        assert!(fixture.pusher.deliveries().is_empty());
        assert_eq!(fixture.room().await.members().len(), 1);
    }

    #[tokio::test]
    async fn test_nickname_is_reusable_after_leave() {
        // テスト項目: 退室したメンバーのニックネームは再利用できる
        // given (前提条件):
        let fixture = Fixture::new();
        let a = fixture.joined("Alice").await;
        fixture.leave_room().execute(&a).await;

        // when (操作):
        let result = fixture
            .join_room()
            .execute(ConnectionId::new("b"), "Alice")
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_nicknames_stay_unique_under_concurrent_joins() {
        // テスト項目: 同時に同じニックネームで参加しても成功するのは一つだけ
        // given (前提条件):
        let fixture = Fixture::new();
        let usecase = Arc::new(fixture.join_room());

        // when (操作):
        let handles: Vec<_> = (0..16)
            .map(|n| {
                let usecase = usecase.clone();
                tokio::spawn(async move {
                    usecase
                        .execute(ConnectionId::new(format!("c{n}")), "Alice")
                        .await
                })
            })
            .collect();
        let mut accepted = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                accepted += 1;
            }
        }

        // then (期待する結果):
        assert_eq!(accepted, 1);
        assert_eq!(fixture.room().await.members().len(), 1);
    }

    #[tokio::test]
    async fn test_join_pushes_through_message_pusher_port() {
        // テスト項目: MessagePusher のモックを使い、要求元への通知と全体通知の回数を検証する
        // given (前提条件):
        let room = Arc::new(Mutex::new(Room::new(Timestamp::new(0))));
        let repository = Arc::new(InMemoryRoomRepository::new(room));
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_push_to()
            .withf(|to, _| to.as_str() == "a")
            .times(2)
            .returning(|_, _| Ok(()));
        pusher
            .expect_broadcast()
            .withf(|targets, event| {
                targets.len() == 1 && matches!(event, RoomEvent::MembersUpdate { .. })
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let usecase =
            JoinRoomUseCase::new(repository, Arc::new(pusher), Arc::new(FixedClock::new(42)));

        // when (操作):
        let result = usecase.execute(ConnectionId::new("a"), "Alice").await;

        // then (期待する結果): モックの期待値は drop 時に検証される
        assert_eq!(result.unwrap().joined_at, Timestamp::new(42));
    }
}

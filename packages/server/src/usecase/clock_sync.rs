//! UseCase: サーバー時刻の配信
//!
//! 定期ビーコンで全メンバーにサーバー時刻を配り、`PING` には要求元だけへ
//! `PONG` で答える。どちらもルームの状態は変更しない。

use std::sync::Arc;

use sajiki_shared::time::Clock;

use crate::domain::{ConnectionId, MessagePusher, RoomEvent, RoomRepository, Timestamp};

use super::publish::{broadcast, reply};

pub struct ClockSyncUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl ClockSyncUseCase {
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

    /// Broadcast the current server time to every member.
    ///
    /// Takes the room lock so a tick never lands in the middle of a mutation.
    pub async fn beacon(&self) -> Timestamp {
        let room = self.repository.lock().await;
        let now = Timestamp::new(self.clock.now_millis());

        let targets = room.member_ids();
        if !targets.is_empty() {
            tracing::trace!("Clock beacon at {} to {} members", now.value(), targets.len());
            broadcast(
                self.message_pusher.as_ref(),
                targets,
                RoomEvent::ClockBeacon { server_now: now },
            )
            .await;
        }

        now
    }

    /// Answer a clock probe, echoing the client's own timestamp
    /// (or the server time when the probe carried none).
    pub async fn pong(&self, connection_id: &ConnectionId, client_time: Option<i64>) -> Timestamp {
        let now = Timestamp::new(self.clock.now_millis());
        reply(
            self.message_pusher.as_ref(),
            connection_id,
            RoomEvent::Pong {
                client_time: client_time.unwrap_or(now.value()),
                server_now: now,
            },
        )
        .await;
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::{Delivery, Fixture, START_MS};

    #[tokio::test]
    async fn test_beacon_reaches_members_only() {
        // テスト項目: ビーコンは参加済みメンバー全員に現在時刻を届け、状態は変えない
        // given (前提条件):
        let fixture = Fixture::new();
        let alice = fixture.joined("Alice").await;
        let bob = fixture.joined("Bob").await;
        fixture.clock.advance(5_000);
        let before = fixture.room().await.snapshot();
        fixture.pusher.clear();

        // when (操作):
        let now = fixture.clock_sync().beacon().await;

        // then (期待する結果):
        assert_eq!(now, Timestamp::new(START_MS + 5_000));
        assert_eq!(
            fixture.pusher.deliveries(),
            vec![Delivery::Broadcast(
                vec![alice, bob],
                RoomEvent::ClockBeacon { server_now: now }
            )]
        );
        assert_eq!(fixture.room().await.snapshot(), before);
    }

    #[tokio::test]
    async fn test_beacon_with_empty_room_sends_nothing() {
        // テスト項目: 誰もいなければビーコンは何も送らない
        // given (前提条件):
        let fixture = Fixture::new();

        // when (操作):
        fixture.clock_sync().beacon().await;

        // then (期待する結果):
        assert!(fixture.pusher.deliveries().is_empty());
    }

    #[tokio::test]
    async fn test_pong_echoes_client_time_to_requester() {
        // テスト項目: PONG は要求元だけに、クライアントの時刻とサーバー時刻を返す
        // given (前提条件):
        let fixture = Fixture::new();
        let anyone = ConnectionId::new("anyone");

        // when (操作):
        fixture.clock_sync().pong(&anyone, Some(123)).await;

        // then (期待する結果):
        assert_eq!(
            fixture.pusher.deliveries(),
            vec![Delivery::To(
                anyone,
                RoomEvent::Pong {
                    client_time: 123,
                    server_now: Timestamp::new(START_MS)
                }
            )]
        );
    }

    #[tokio::test]
    async fn test_pong_without_client_time_echoes_server_time() {
        // テスト項目: PING に時刻がなければ PONG の t にはサーバー時刻が入る
        // given (前提条件):
        let fixture = Fixture::new();
        let anyone = ConnectionId::new("anyone");
        fixture.clock.advance(250);

        // when (操作):
        let now = fixture.clock_sync().pong(&anyone, None).await;

        // then (期待する結果):
        assert_eq!(now, Timestamp::new(START_MS + 250));
        assert_eq!(
            fixture.pusher.deliveries(),
            vec![Delivery::To(
                anyone,
                RoomEvent::Pong {
                    client_time: START_MS + 250,
                    server_now: now
                }
            )]
        );
    }
}

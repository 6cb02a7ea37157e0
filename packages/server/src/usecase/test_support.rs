//! Test doubles and fixtures shared by the use case tests.

use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use sajiki_shared::time::ManualClock;
use tokio::sync::Mutex;

use crate::{
    domain::{
        ConnectionId, MessagePushError, MessagePusher, PlaybackAdvancer, PusherChannel, Room,
        RoomEvent, RoomRepository, Timestamp,
    },
    infrastructure::repository::InMemoryRoomRepository,
};

use super::{
    AddToQueueUseCase, ClockSyncUseCase, JoinRoomUseCase, LeaveRoomUseCase,
    ReportPlaybackUseCase, SeekPlaybackUseCase, SendChatUseCase, TogglePlaybackUseCase,
    VoteSkipUseCase,
};

/// Server clock value every fixture starts at
pub(crate) const START_MS: i64 = 1_700_000_000_000;

/// One call made on the pusher
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Delivery {
    To(ConnectionId, RoomEvent),
    Broadcast(Vec<ConnectionId>, RoomEvent),
}

impl Delivery {
    pub(crate) fn event(&self) -> &RoomEvent {
        match self {
            Delivery::To(_, event) | Delivery::Broadcast(_, event) => event,
        }
    }

    fn reaches(&self, connection_id: &ConnectionId) -> bool {
        match self {
            Delivery::To(to, _) => to == connection_id,
            Delivery::Broadcast(targets, _) => targets.contains(connection_id),
        }
    }
}

/// MessagePusher that records every delivery instead of sending it
#[derive(Debug, Default)]
pub(crate) struct RecordingPusher {
    deliveries: StdMutex<Vec<Delivery>>,
}

impl RecordingPusher {
    pub(crate) fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().unwrap().clone()
    }

    /// Every event that reached `connection_id`, in order
    pub(crate) fn events_for(&self, connection_id: &ConnectionId) -> Vec<RoomEvent> {
        self.deliveries()
            .iter()
            .filter(|d| d.reaches(connection_id))
            .map(|d| d.event().clone())
            .collect()
    }

    pub(crate) fn kinds(&self) -> Vec<&'static str> {
        self.deliveries().iter().map(|d| d.event().kind()).collect()
    }

    pub(crate) fn clear(&self) {
        self.deliveries.lock().unwrap().clear();
    }
}

#[async_trait]
impl MessagePusher for RecordingPusher {
    async fn register_client(&self, _connection_id: ConnectionId, _sender: PusherChannel) {}

    async fn unregister_client(&self, _connection_id: &ConnectionId) {}

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError> {
        self.deliveries
            .lock()
            .unwrap()
            .push(Delivery::To(connection_id.clone(), event.clone()));
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError> {
        self.deliveries
            .lock()
            .unwrap()
            .push(Delivery::Broadcast(targets, event.clone()));
        Ok(())
    }
}

/// A room wired with every use case, a recording pusher and a manual clock
pub(crate) struct Fixture {
    pub(crate) repository: Arc<InMemoryRoomRepository>,
    pub(crate) pusher: Arc<RecordingPusher>,
    pub(crate) clock: Arc<ManualClock>,
    pub(crate) advancer: Arc<PlaybackAdvancer>,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        let room = Arc::new(Mutex::new(Room::new(Timestamp::new(START_MS))));
        Self {
            repository: Arc::new(InMemoryRoomRepository::new(room)),
            pusher: Arc::new(RecordingPusher::default()),
            clock: Arc::new(ManualClock::new(START_MS)),
            advancer: Arc::new(PlaybackAdvancer::new()),
        }
    }

    pub(crate) fn now(&self) -> Timestamp {
        use sajiki_shared::time::Clock;
        Timestamp::new(self.clock.now_millis())
    }

    pub(crate) async fn room(&self) -> Room {
        self.repository.lock().await.clone()
    }

    pub(crate) fn join_room(&self) -> JoinRoomUseCase {
        JoinRoomUseCase::new(
            self.repository.clone(),
            self.pusher.clone(),
            self.clock.clone(),
        )
    }

    pub(crate) fn leave_room(&self) -> LeaveRoomUseCase {
        LeaveRoomUseCase::new(self.repository.clone(), self.pusher.clone())
    }

    pub(crate) fn send_chat(&self) -> SendChatUseCase {
        SendChatUseCase::new(
            self.repository.clone(),
            self.pusher.clone(),
            self.clock.clone(),
        )
    }

    pub(crate) fn add_to_queue(&self) -> AddToQueueUseCase {
        AddToQueueUseCase::new(
            self.repository.clone(),
            self.pusher.clone(),
            self.clock.clone(),
            self.advancer.clone(),
        )
    }

    pub(crate) fn toggle_playback(&self) -> TogglePlaybackUseCase {
        TogglePlaybackUseCase::new(
            self.repository.clone(),
            self.pusher.clone(),
            self.clock.clone(),
        )
    }

    pub(crate) fn seek_playback(&self) -> SeekPlaybackUseCase {
        SeekPlaybackUseCase::new(
            self.repository.clone(),
            self.pusher.clone(),
            self.clock.clone(),
        )
    }

    pub(crate) fn vote_skip(&self) -> VoteSkipUseCase {
        VoteSkipUseCase::new(
            self.repository.clone(),
            self.pusher.clone(),
            self.clock.clone(),
            self.advancer.clone(),
        )
    }

    pub(crate) fn report_playback(&self) -> ReportPlaybackUseCase {
        ReportPlaybackUseCase::new(
            self.repository.clone(),
            self.pusher.clone(),
            self.clock.clone(),
            self.advancer.clone(),
        )
    }

    pub(crate) fn clock_sync(&self) -> ClockSyncUseCase {
        ClockSyncUseCase::new(
            self.repository.clone(),
            self.pusher.clone(),
            self.clock.clone(),
        )
    }

    /// Join `nickname` on a connection named after it
    pub(crate) async fn joined(&self, nickname: &str) -> ConnectionId {
        let connection_id = ConnectionId::new(format!("conn-{nickname}"));
        self.join_room()
            .execute(connection_id.clone(), nickname)
            .await
            .unwrap();
        connection_id
    }

    /// Enqueue a short link for `video_id` on behalf of `connection_id`
    pub(crate) async fn queued(&self, connection_id: &ConnectionId, video_id: &str) {
        self.add_to_queue()
            .execute(connection_id.clone(), &format!("https://youtu.be/{video_id}"))
            .await
            .unwrap();
    }
}

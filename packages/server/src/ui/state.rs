//! Server state shared by the handlers.

use std::sync::Arc;

use sajiki_shared::time::Clock;

use crate::{
    domain::{MessagePusher, PlaybackAdvancer, RoomRepository},
    usecase::{
        AddToQueueUseCase, ClockSyncUseCase, ConnectClientUseCase, GetRoomStateUseCase,
        JoinRoomUseCase, LeaveRoomUseCase, ReportPlaybackUseCase, SeekPlaybackUseCase,
        SendChatUseCase, TogglePlaybackUseCase, VoteSkipUseCase,
    },
};

/// Shared application state
pub struct AppState {
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    pub send_chat_usecase: Arc<SendChatUseCase>,
    pub add_to_queue_usecase: Arc<AddToQueueUseCase>,
    pub toggle_playback_usecase: Arc<TogglePlaybackUseCase>,
    pub seek_playback_usecase: Arc<SeekPlaybackUseCase>,
    pub vote_skip_usecase: Arc<VoteSkipUseCase>,
    pub report_playback_usecase: Arc<ReportPlaybackUseCase>,
    pub clock_sync_usecase: Arc<ClockSyncUseCase>,
    pub get_room_state_usecase: Arc<GetRoomStateUseCase>,
}

impl AppState {
    /// Wire every use case of one room onto the given ports.
    ///
    /// The three triggers of "start next video" share one advancer so that
    /// its in-flight guard covers all of them.
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let advancer = Arc::new(PlaybackAdvancer::new());

        Self {
            connect_client_usecase: Arc::new(ConnectClientUseCase::new(message_pusher.clone())),
            join_room_usecase: Arc::new(JoinRoomUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock.clone(),
            )),
            leave_room_usecase: Arc::new(LeaveRoomUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            send_chat_usecase: Arc::new(SendChatUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock.clone(),
            )),
            add_to_queue_usecase: Arc::new(AddToQueueUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock.clone(),
                advancer.clone(),
            )),
            toggle_playback_usecase: Arc::new(TogglePlaybackUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock.clone(),
            )),
            seek_playback_usecase: Arc::new(SeekPlaybackUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock.clone(),
            )),
            vote_skip_usecase: Arc::new(VoteSkipUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock.clone(),
                advancer.clone(),
            )),
            report_playback_usecase: Arc::new(ReportPlaybackUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock.clone(),
                advancer,
            )),
            clock_sync_usecase: Arc::new(ClockSyncUseCase::new(
                repository.clone(),
                message_pusher,
                clock.clone(),
            )),
            get_room_state_usecase: Arc::new(GetRoomStateUseCase::new(repository, clock)),
        }
    }
}

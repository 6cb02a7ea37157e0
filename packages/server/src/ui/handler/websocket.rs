//! WebSocket connection handlers.

use std::{fmt::Display, sync::Arc};

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::ConnectionId,
    infrastructure::dto::websocket::ClientMessage,
    ui::state::AppState,
    usecase::PlaybackReport,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: events published by the
/// use cases (via rx channel) are sent to this client's WebSocket connection.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive events
    let (tx, rx) = mpsc::unbounded_channel();
    let connection_id = state.connect_client_usecase.execute(tx).await;

    let recv_state = state.clone();
    let recv_connection_id = connection_id.clone();

    // Spawn a task to receive intents from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on '{}': {}", recv_connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(message) => dispatch(&recv_state, &recv_connection_id, message).await,
                    Err(e) => {
                        tracing::warn!(
                            "Dropping malformed frame from '{}': {}",
                            recv_connection_id,
                            e
                        );
                    }
                },
                Message::Close(_) => {
                    tracing::info!("Client '{}' requested close", recv_connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to push room events to this client
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.leave_room_usecase.execute(&connection_id).await;
    tracing::info!("Connection '{}' closed", connection_id);
}

/// Route one inbound intent to its use case.
///
/// Rejections the client must hear about are pushed by the use case itself;
/// everything else is only logged here.
async fn dispatch(state: &AppState, connection_id: &ConnectionId, message: ClientMessage) {
    match message {
        ClientMessage::Join { nickname } => {
            let result = state
                .join_room_usecase
                .execute(connection_id.clone(), &nickname)
                .await;
            log_ignored("JOIN", connection_id, result);
        }
        ClientMessage::ChatSend { text } => {
            let result = state.send_chat_usecase.execute(connection_id, &text).await;
            log_ignored("CHAT_SEND", connection_id, result);
        }
        ClientMessage::QueueAdd { url } => {
            let result = state
                .add_to_queue_usecase
                .execute(connection_id.clone(), &url)
                .await;
            log_ignored("QUEUE_ADD", connection_id, result);
        }
        ClientMessage::PlayPauseToggle {} => {
            let result = state.toggle_playback_usecase.execute(connection_id).await;
            log_ignored("PLAY_PAUSE_TOGGLE", connection_id, result);
        }
        ClientMessage::PlaySeek { position_sec } => {
            let result = state
                .seek_playback_usecase
                .execute(connection_id, position_sec)
                .await;
            log_ignored("PLAY_SEEK", connection_id, result);
        }
        ClientMessage::VoteSkip {} => {
            let result = state.vote_skip_usecase.execute(connection_id).await;
            log_ignored("VOTE_SKIP", connection_id, result);
        }
        ClientMessage::VideoEnded { video_id } => {
            let result = state
                .report_playback_usecase
                .execute(connection_id, PlaybackReport::Ended, video_id.as_deref())
                .await;
            log_ignored("VIDEO_ENDED", connection_id, result);
        }
        ClientMessage::VideoError { video_id } => {
            let result = state
                .report_playback_usecase
                .execute(connection_id, PlaybackReport::Unplayable, video_id.as_deref())
                .await;
            log_ignored("VIDEO_ERROR", connection_id, result);
        }
        ClientMessage::Ping { t } => {
            state.clock_sync_usecase.pong(connection_id, t).await;
        }
    }
}

fn log_ignored<T, E: Display>(intent: &str, connection_id: &ConnectionId, result: Result<T, E>) {
    if let Err(e) = result {
        tracing::debug!("{} from '{}' not applied: {}", intent, connection_id, e);
    }
}

//! Helpers for publishing room events through the MessagePusher port.
//!
//! Push failures never undo a mutation that already happened; they are logged
//! and the caller carries on.

use crate::domain::{
    AdvanceOutcome, ConnectionId, MessagePusher, Room, RoomEvent, Timestamp,
};

pub(crate) async fn reply(pusher: &dyn MessagePusher, to: &ConnectionId, event: RoomEvent) {
    if let Err(e) = pusher.push_to(to, &event).await {
        tracing::warn!("Failed to push {} to '{}': {}", event.kind(), to, e);
    }
}

pub(crate) async fn broadcast(
    pusher: &dyn MessagePusher,
    targets: Vec<ConnectionId>,
    event: RoomEvent,
) {
    if let Err(e) = pusher.broadcast(targets, &event).await {
        tracing::warn!("Failed to broadcast {}: {}", event.kind(), e);
    }
}

/// Publish the deltas of an advance: playback, queue, skip vote and the
/// system notice when there is one.
pub(crate) async fn broadcast_advance(
    pusher: &dyn MessagePusher,
    room: &Room,
    outcome: &AdvanceOutcome,
    now: Timestamp,
) {
    let targets = room.member_ids();

    broadcast(
        pusher,
        targets.clone(),
        RoomEvent::PlaybackUpdate {
            playback: room.playback().clone(),
            server_now: now,
        },
    )
    .await;
    broadcast(
        pusher,
        targets.clone(),
        RoomEvent::QueueUpdate {
            queue: room.queue_snapshot(),
        },
    )
    .await;
    broadcast(
        pusher,
        targets.clone(),
        RoomEvent::SkipVoteUpdate {
            skip_vote: room.skip_vote_view(),
        },
    )
    .await;

    if let Some(notice) = &outcome.notice {
        broadcast(
            pusher,
            targets,
            RoomEvent::ChatBroadcast {
                message: notice.clone(),
            },
        )
        .await;
    }
}

use crate::domain::value_object::{Nickname, QueueItemId, Timestamp, VideoId};

/// A video waiting in the room's FIFO queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueItem {
    pub id: QueueItemId,
    pub video_id: VideoId,
    pub added_by: Nickname,
    pub added_at: Timestamp,
}

impl QueueItem {
    pub fn new(video_id: VideoId, added_by: Nickname, added_at: Timestamp) -> Self {
        Self {
            id: QueueItemId::generate(),
            video_id,
            added_by,
            added_at,
        }
    }
}

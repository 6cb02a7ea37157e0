use crate::domain::value_object::{ConnectionId, Nickname, Timestamp};

/// A connection that has successfully joined the room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub connection_id: ConnectionId,
    pub nickname: Nickname,
    pub joined_at: Timestamp,
}

impl Member {
    pub fn new(connection_id: ConnectionId, nickname: Nickname, joined_at: Timestamp) -> Self {
        Self {
            connection_id,
            nickname,
            joined_at,
        }
    }
}

//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::RoomStateDto;

/// `GET /api/room`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailDto {
    /// RFC 3339 (UTC)
    pub created_at: Option<String>,
    pub server_now_ms: i64,
    /// Derived playback position at `server_now_ms`, null while idle
    pub position_sec: Option<f64>,
    pub state: RoomStateDto,
}

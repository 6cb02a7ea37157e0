//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{infrastructure::dto::http::RoomDetailDto, ui::state::AppState};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Current room state with the derived playback position
pub async fn get_room(State(state): State<Arc<AppState>>) -> Json<RoomDetailDto> {
    let view = state.get_room_state_usecase.execute().await;
    Json(RoomDetailDto::from(&view))
}

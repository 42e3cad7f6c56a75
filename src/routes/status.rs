use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::{message::timestamp, state::SharedState};

pub async fn root_handler(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({
        "message": "Chat relay is running",
        "status": "live",
        "ai": state.provider.label(),
        "timestamp": timestamp(),
    }))
}

pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "healthy", "timestamp": timestamp() }))
}

pub async fn test_handler(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({
        "success": true,
        "message": format!("API working with {}", state.config.provider.display_name()),
        "timestamp": timestamp(),
    }))
}

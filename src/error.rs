// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::ChatResponse;

pub const INTERNAL_ERROR_REPLY: &str = "Something went wrong on our side. Please try again.";

/// Errors surfaced by handlers. Rendered with the same body shape as a chat
/// reply so clients only ever parse one payload.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, reply) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            AppError::Internal(detail) => {
                tracing::error!(%detail, "internal error while handling request");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_REPLY)
            }
        };
        (status, Json(ChatResponse::failed(reply))).into_response()
    }
}

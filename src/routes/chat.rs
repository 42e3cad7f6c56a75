use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse},
    services::chatbot::{Outcome, resolve},
    state::SharedState,
};

#[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    // An unreadable body is treated the same as a missing message.
    let message = match payload {
        Ok(Json(request)) => request.message,
        Err(rejection) => {
            debug!(%rejection, "could not parse chat body");
            None
        }
    };

    let resolution = resolve(message.as_deref(), &state.config, state.provider.clone()).await;

    match resolution.outcome {
        Outcome::InputRejected => Err(AppError::BadRequest(resolution.response.response)),
        _ => Ok(Json(resolution.response)),
    }
}

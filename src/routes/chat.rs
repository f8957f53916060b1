use axum::{Json, body::Bytes, extract::State};
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse},
    services::chatbot::generate_reply,
    state::SharedState,
};

// Decoded by hand: a missing body or content-type is a 400, not an extractor rejection.
pub async fn chat_handler(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, AppError> {
    let payload = parse_request(&body)?;

    let message = match payload.message {
        Some(m) if !m.is_empty() => m,
        _ => return Err(AppError::BadRequest("No message provided".to_string())),
    };

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("chat", %request_id);

    let reply = generate_reply(&state, &message).instrument(span).await?;
    Ok(Json(reply))
}

fn parse_request(body: &[u8]) -> Result<ChatRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ChatRequest::default());
    }
    serde_json::from_slice(body).map_err(|err| {
        tracing::debug!(error = %err, "rejecting malformed chat body");
        AppError::BadRequest("Invalid JSON body".to_string())
    })
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

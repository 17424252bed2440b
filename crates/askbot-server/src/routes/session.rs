use askbot_core::{SessionId, Transcript};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::str::FromStr;

use crate::error::{Result, ServerError};
use crate::state::AppState;

#[derive(Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub turns: Transcript,
}

pub(crate) fn parse_session_id(raw: &str) -> Result<SessionId> {
    SessionId::from_str(raw)
        .map_err(|_| ServerError::bad_request(format!("invalid session id: {}", raw)))
}

pub async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionResponse>) {
    let session = state.create_session().await;
    (
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id: session.id().to_string(),
            turns: Transcript::new(),
        }),
    )
}

pub async fn transcript(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>> {
    let session = state.require_session(&parse_session_id(&id)?).await?;

    Ok(Json(SessionResponse {
        session_id: session.id().to_string(),
        turns: session.transcript().await,
    }))
}

/// The "Clear Chat History" action.
pub async fn clear_transcript(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>> {
    let session = state.require_session(&parse_session_id(&id)?).await?;
    session.clear().await;

    Ok(Json(SessionResponse {
        session_id: session.id().to_string(),
        turns: Transcript::new(),
    }))
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_session_id(&id)?;
    state
        .remove_session(&id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| ServerError::not_found(format!("session {}", id)))
}

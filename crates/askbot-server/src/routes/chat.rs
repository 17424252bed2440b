use askbot_chat::Step;
use askbot_core::Transcript;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ServerError};
use crate::routes::session::parse_session_id;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub session_id: Option<String>,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatStatus {
    Answered,
    Ignored,
    Ended,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub status: ChatStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    pub is_error: bool,
    pub turns: Transcript,
}

pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let session_id = request
        .session_id
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(parse_session_id)
        .transpose()?;
    let session = state.get_or_create_session(session_id).await;
    let input = state.gateway.config().classify(&request.message);

    let mut conversation = session.try_begin()?;
    let gateway = state.gateway.clone();

    // Run the exchange on its own task so a dropped connection cannot
    // abandon it halfway.
    let (step, turns) = tokio::spawn(async move {
        let step = conversation.submit(&gateway, input).await;
        (step, conversation.transcript().clone())
    })
    .await
    .map_err(|e| ServerError::internal(format!("exchange task failed: {}", e)))?;
    session.touch();

    let response = match step {
        Step::Ignored => ChatResponse {
            session_id: session.id().to_string(),
            status: ChatStatus::Ignored,
            answer: None,
            is_error: false,
            turns,
        },
        Step::Ended => {
            state.remove_session(session.id()).await;
            ChatResponse {
                session_id: session.id().to_string(),
                status: ChatStatus::Ended,
                answer: None,
                is_error: false,
                turns,
            }
        }
        Step::Answered { turn, failed } => ChatResponse {
            session_id: session.id().to_string(),
            status: ChatStatus::Answered,
            answer: Some(turn.content().to_string()),
            is_error: failed,
            turns,
        },
    };

    Ok(Json(response))
}

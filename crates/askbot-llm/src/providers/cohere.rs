use crate::error::{LlmError, Result};
use crate::traits::LlmProvider;
use crate::types::{ChatRequest, ChatResponse, DEFAULT_MODEL};
use askbot_core::Credential;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.cohere.com";
const CHAT_PATH: &str = "/v1/chat";
const PROVIDER: &str = "cohere";

/// Client for Cohere's single-message chat endpoint.
///
/// The HTTP client is built without a request timeout, so the transport
/// default applies.
pub struct CohereProvider {
    client: Client,
    credential: Credential,
    url: String,
    default_model: String,
}

impl CohereProvider {
    pub fn new(credential: Credential) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| LlmError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            credential,
            url: format!("{}{}", DEFAULT_BASE_URL, CHAT_PATH),
            default_model: DEFAULT_MODEL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: &Url) -> Self {
        let base = base_url.as_str().trim_end_matches('/');
        self.url = format!("{}{}", base, CHAT_PATH);
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.url
    }

    fn status_error(status: StatusCode, body: &str) -> LlmError {
        let message = serde_json::from_str::<CohereErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| body.trim().to_string());
        let message = if message.is_empty() {
            status.to_string()
        } else {
            format!("{}: {}", status, message)
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                LlmError::AuthenticationFailed(message)
            }
            StatusCode::TOO_MANY_REQUESTS => LlmError::rate_limited(PROVIDER, message),
            _ => LlmError::api(PROVIDER, message),
        }
    }
}

#[async_trait]
impl LlmProvider for CohereProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        if request.message.trim().is_empty() {
            return Err(LlmError::invalid_request("message must not be empty"));
        }

        debug!(model = %request.model, chars = request.message.len(), "sending chat request");

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(self.credential.expose())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::status_error(status, &body));
        }

        let reply: CohereChatResponse = serde_json::from_str(&body)
            .map_err(|e| LlmError::invalid_response(format!("Undecodable chat response: {}", e)))?;

        let mut response = ChatResponse::new(reply.text);
        if let Some(id) = reply.generation_id {
            response = response.with_generation_id(id);
        }
        if let Some(reason) = reply.finish_reason {
            response = response.with_finish_reason(reason);
        }
        Ok(response)
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }
}

#[derive(Debug, Deserialize)]
struct CohereChatResponse {
    text: String,
    generation_id: Option<String>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CohereErrorBody {
    message: Option<String>,
}

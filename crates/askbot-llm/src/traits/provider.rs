use crate::error::Result;
use crate::types::{ChatRequest, ChatResponse};
use async_trait::async_trait;

/// Seam between the chat loop and a hosted completion service.
///
/// One `chat` call is one outbound request. Implementations do not retry.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse>;

    fn default_model(&self) -> &str;
}

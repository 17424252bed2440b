use crate::answer::Answer;
use crate::config::ChatConfig;
use crate::error::{ChatError, Result};
use askbot_llm::{ChatRequest, LlmProvider};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Sends one question to the answer provider and hands back one answer.
///
/// Only the question itself goes out; earlier turns are never replayed.
pub struct AnswerGateway {
    llm: Arc<dyn LlmProvider>,
    config: ChatConfig,
}

impl AnswerGateway {
    pub fn builder() -> GatewayBuilder {
        GatewayBuilder::new()
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn provider_name(&self) -> &str {
        self.llm.name()
    }

    /// Structured result of a single provider call.
    pub async fn ask(&self, question: &str) -> askbot_llm::Result<String> {
        let request = ChatRequest::new(question, self.config.model.as_str());
        debug!(provider = self.llm.name(), model = %request.model, "asking provider");

        let response = self.llm.chat(request).await?;
        Ok(response.text)
    }

    /// Like [`ask`](Self::ask) but never fails: a provider fault becomes
    /// `"Error: <description>"` text.
    pub async fn answer(&self, question: &str) -> Answer {
        match self.ask(question).await {
            Ok(text) => Answer::success(text),
            Err(err) => {
                warn!(provider = self.llm.name(), error = %err, "provider call failed");
                Answer::failure(&err)
            }
        }
    }
}

impl fmt::Debug for AnswerGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnswerGateway")
            .field("provider", &self.llm.name())
            .field("config", &self.config)
            .finish()
    }
}

#[derive(Default)]
pub struct GatewayBuilder {
    config: Option<ChatConfig>,
    model: Option<String>,
    llm: Option<Arc<dyn LlmProvider>>,
}

impl GatewayBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: ChatConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn llm(mut self, llm: Arc<dyn LlmProvider>) -> Self {
        self.llm = Some(llm);
        self
    }

    pub fn build(self) -> Result<AnswerGateway> {
        let llm = self
            .llm
            .ok_or_else(|| ChatError::config("Answer provider is required"))?;

        let mut config = self.config.unwrap_or_default();
        if let Some(model) = self.model {
            config.model = model;
        }
        if config.model.trim().is_empty() {
            config.model = llm.default_model().to_string();
        }

        Ok(AnswerGateway { llm, config })
    }
}

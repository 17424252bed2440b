use askbot_core::error::Error as CoreError;
use askbot_core::SessionId;
use askbot_llm::LlmError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session {0} already has a question in flight")]
    Busy(SessionId),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

pub type Result<T> = std::result::Result<T, ChatError>;

impl ChatError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

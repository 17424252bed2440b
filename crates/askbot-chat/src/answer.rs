use askbot_llm::LlmError;
use serde::{Deserialize, Serialize};

/// Marker every failed answer starts with.
pub const ERROR_PREFIX: &str = "Error: ";

/// Display-ready outcome of one gateway call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub failed: bool,
}

impl Answer {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            failed: false,
        }
    }

    pub fn failure(err: &LlmError) -> Self {
        Self {
            text: format!("{}{}", ERROR_PREFIX, err),
            failed: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl From<askbot_llm::Result<String>> for Answer {
    fn from(result: askbot_llm::Result<String>) -> Self {
        match result {
            Ok(text) => Answer::success(text),
            Err(err) => Answer::failure(&err),
        }
    }
}

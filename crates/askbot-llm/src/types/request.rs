use serde::{Deserialize, Serialize};

/// Model identifier sent when nothing else is configured.
pub const DEFAULT_MODEL: &str = "command-a-03-2025";

/// A single question. Earlier turns are never included.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub model: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            model: model.into(),
        }
    }
}

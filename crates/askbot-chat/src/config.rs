use askbot_llm::DEFAULT_MODEL;
use serde::{Deserialize, Serialize};

/// What one raw line of user input means to the exchange loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Question(String),
    Empty,
    EndSession,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_end_keywords")]
    pub end_keywords: Vec<String>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_end_keywords() -> Vec<String> {
    vec!["quit".to_string(), "exit".to_string(), "bye".to_string()]
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            end_keywords: default_end_keywords(),
        }
    }
}

impl ChatConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    pub fn with_end_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.end_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_end_keyword(&self, input: &str) -> bool {
        let input = input.trim();
        self.end_keywords
            .iter()
            .any(|k| k.eq_ignore_ascii_case(input))
    }

    pub fn classify(&self, raw: &str) -> Input {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Input::Empty
        } else if self.is_end_keyword(trimmed) {
            Input::EndSession
        } else {
            Input::Question(trimmed.to_string())
        }
    }
}

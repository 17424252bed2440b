use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

impl ChatResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            generation_id: None,
            finish_reason: None,
        }
    }

    pub fn with_generation_id(mut self, id: impl Into<String>) -> Self {
        self.generation_id = Some(id.into());
        self
    }

    pub fn with_finish_reason(mut self, reason: impl Into<String>) -> Self {
        self.finish_reason = Some(reason.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_ignores_unknown_fields() {
        let body = r#"{
            "text": "4",
            "generation_id": "gen-1",
            "finish_reason": "COMPLETE",
            "chat_history": [],
            "meta": {"billed_units": {"input_tokens": 5}}
        }"#;

        let resp: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.text, "4");
        assert_eq!(resp.generation_id.as_deref(), Some("gen-1"));
        assert_eq!(resp.finish_reason.as_deref(), Some("COMPLETE"));
    }
}

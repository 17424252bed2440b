use super::role::Role;
use crate::types::Timestamp;
use serde::{Deserialize, Serialize};

/// One message of a session. Fields are private so a turn cannot change
/// after it has been recorded.
///
/// `failed` marks an assistant turn whose content is an error description
/// rather than an answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    content: String,
    #[serde(default)]
    failed: bool,
    created_at: Timestamp,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            failed: false,
            created_at: Timestamp::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn assistant_failure(content: impl Into<String>) -> Self {
        Self {
            failed: true,
            ..Self::new(Role::Assistant, content)
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_constructors() {
        let q = Turn::user("What is 2+2?");
        assert_eq!(q.role(), Role::User);
        assert_eq!(q.content(), "What is 2+2?");

        let a = Turn::assistant("4");
        assert!(a.role().is_assistant());
        assert_eq!(a.content(), "4");
    }

    #[test]
    fn test_turn_json_shape() {
        let value = serde_json::to_value(Turn::user("hi")).unwrap();
        assert_eq!(value["role"], "user");
        assert_eq!(value["content"], "hi");
        assert_eq!(value["failed"], false);
        assert!(value["created_at"].is_string());
    }

    #[test]
    fn test_failure_flag_is_explicit() {
        let answer = Turn::assistant("Error: that is a valid answer");
        assert!(!answer.is_failed());

        let failure = Turn::assistant_failure("Error: Network error: reset");
        assert!(failure.is_failed());
        assert!(failure.role().is_assistant());

        let value = serde_json::to_value(&failure).unwrap();
        assert_eq!(value["failed"], true);
    }

    #[test]
    fn test_failed_defaults_when_absent() {
        let turn: Turn = serde_json::from_str(
            r#"{"role": "assistant", "content": "4", "created_at": "2025-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert!(!turn.is_failed());
    }
}

use crate::error::{Error, Result};
use std::fmt;

/// Environment/config name the provider secret is read from.
pub const CREDENTIAL_NAME: &str = "COHERE_API_KEY";

/// Opaque provider secret. Never printed by `Debug` or `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Validates a secret; blank input is a [`Error::MissingConfig`].
    pub fn new(secret: impl Into<String>) -> Result<Self> {
        let secret = secret.into();
        let trimmed = secret.trim();
        if trimmed.is_empty() {
            return Err(Error::missing_config(CREDENTIAL_NAME));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Picks the first non-blank candidate, in priority order.
    pub fn resolve<I, S>(candidates: I) -> Result<Self>
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        candidates
            .into_iter()
            .flatten()
            .find_map(|s| Self::new(s).ok())
            .ok_or_else(|| Error::missing_config(CREDENTIAL_NAME))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

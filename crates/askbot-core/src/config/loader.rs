use super::types::{Config, LogLevel};
use crate::credential::{Credential, CREDENTIAL_NAME};
use crate::error::{Error, Result};
use std::path::Path;
use tracing::debug;
use url::Url;

const DEFAULT_PATHS: [&str; 3] = [
    "./askbot.toml",
    "~/.askbot/config.toml",
    "~/.config/askbot/config.toml",
];

impl Config {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "loaded config file");
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// First existing file of the default search path, or defaults.
    pub fn load_default() -> Result<Self> {
        for path in &DEFAULT_PATHS {
            let expanded = shellexpand::tilde(path);
            let path = Path::new(expanded.as_ref());
            if path.exists() {
                return Self::load_from_file(path);
            }
        }

        Ok(Config::default())
    }

    pub fn merge_env(self) -> Result<Self> {
        self.merge_vars(|name| std::env::var(name).ok())
    }

    /// Applies overrides from a variable lookup; split out from
    /// [`Config::merge_env`] so tests do not touch the process environment.
    pub fn merge_vars<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("ASKBOT_LOG_LEVEL") {
            if let Some(level) = LogLevel::parse(&level) {
                self.general.log_level = level;
            }
        }

        if let Some(key) = lookup(CREDENTIAL_NAME).filter(|k| !k.trim().is_empty()) {
            self.provider.api_key = Some(key);
        }

        if let Some(url) = lookup("COHERE_BASE_URL") {
            let url = Url::parse(&url)
                .map_err(|e| Error::Config(format!("COHERE_BASE_URL is not a URL: {}", e)))?;
            self.provider.base_url = Some(url);
        }

        if let Some(model) = lookup("ASKBOT_MODEL").filter(|m| !m.trim().is_empty()) {
            self.provider.model = Some(model);
        }

        Ok(self)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))
    }

    /// The configured provider secret; fails when none is set.
    pub fn credential(&self) -> Result<Credential> {
        Credential::resolve([self.provider.api_key.as_deref()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.log_level, LogLevel::Warn);
        assert!(config.provider.api_key.is_none());
        assert!(config.credential().unwrap_err().is_missing_config());
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            [general]
            log_level = "debug"

            [provider]
            api_key = "abc"
            base_url = "http://127.0.0.1:9000"
            model = "command-r"
        "#;

        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.general.log_level, LogLevel::Debug);
        assert_eq!(config.provider.model.as_deref(), Some("command-r"));
        assert_eq!(config.credential().unwrap().expose(), "abc");
        assert_eq!(
            config.provider.base_url.unwrap().as_str(),
            "http://127.0.0.1:9000/"
        );
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Config::from_toml("[provider\napi_key = 1").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_env_overrides_file() {
        let vars: HashMap<&str, &str> = [
            ("COHERE_API_KEY", "env-key"),
            ("ASKBOT_LOG_LEVEL", "INFO"),
            ("ASKBOT_MODEL", "command-light"),
        ]
        .into_iter()
        .collect();

        let config = Config::from_toml("[provider]\napi_key = \"file-key\"")
            .unwrap()
            .merge_vars(|name| vars.get(name).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.credential().unwrap().expose(), "env-key");
        assert_eq!(config.general.log_level, LogLevel::Info);
        assert_eq!(config.provider.model.as_deref(), Some("command-light"));
    }

    #[test]
    fn test_blank_env_key_does_not_clobber_file() {
        let config = Config::from_toml("[provider]\napi_key = \"file-key\"")
            .unwrap()
            .merge_vars(|name| (name == "COHERE_API_KEY").then(|| "  ".to_string()))
            .unwrap();

        assert_eq!(config.credential().unwrap().expose(), "file-key");
    }

    #[test]
    fn test_bad_base_url_is_rejected() {
        let result = Config::default()
            .merge_vars(|name| (name == "COHERE_BASE_URL").then(|| "not a url".to_string()));
        assert!(result.is_err());
    }
}

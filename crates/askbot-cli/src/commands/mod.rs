pub mod ask;
pub mod chat;
pub mod serve;

use askbot_chat::{AnswerGateway, ChatConfig};
use askbot_core::credential::CREDENTIAL_NAME;
use askbot_core::{Config, Credential};
use askbot_llm::{CohereProvider, DEFAULT_MODEL};
use std::sync::Arc;

/// Builds the gateway, failing before any provider call when no credential
/// is configured.
pub fn create_gateway(
    api_key: Option<String>,
    model: Option<&str>,
    config: &Config,
) -> anyhow::Result<AnswerGateway> {
    let credential = Credential::resolve([api_key, config.provider.api_key.clone()])
        .map_err(|_| {
            anyhow::anyhow!(
                "{} not found. Set it in the environment or a .env file, or use --api-key",
                CREDENTIAL_NAME
            )
        })?;

    let mut provider = CohereProvider::new(credential)?;
    if let Some(base_url) = &config.provider.base_url {
        provider = provider.with_base_url(base_url);
    }

    let model = model
        .or(config.provider.model.as_deref())
        .unwrap_or(DEFAULT_MODEL);

    let gateway = AnswerGateway::builder()
        .config(ChatConfig::new(model))
        .llm(Arc::new(provider))
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to create gateway: {}", e))?;

    Ok(gateway)
}

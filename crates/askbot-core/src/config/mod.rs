mod loader;
mod types;

pub use types::{Config, GeneralConfig, LogLevel, ProviderConfig};

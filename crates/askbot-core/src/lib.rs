pub mod config;
pub mod credential;
pub mod error;
pub mod transcript;
pub mod types;

pub use config::Config;
pub use credential::Credential;
pub use error::{Error, Result};
pub use transcript::{Role, Transcript, Turn};
pub use types::{Id, SessionId, Timestamp};

pub mod prelude {
    pub use crate::config::{Config, GeneralConfig, LogLevel, ProviderConfig};
    pub use crate::credential::Credential;
    pub use crate::error::{Error, Result};
    pub use crate::transcript::{Role, Transcript, Turn};
    pub use crate::types::{Id, SessionId, Timestamp};
}

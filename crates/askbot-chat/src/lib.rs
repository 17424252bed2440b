pub mod answer;
pub mod config;
pub mod error;
pub mod exchange;
pub mod gateway;
pub mod session;

pub use answer::{Answer, ERROR_PREFIX};
pub use config::{ChatConfig, Input};
pub use error::{ChatError, Result};
pub use exchange::{Conversation, ExchangeState, Step};
pub use gateway::{AnswerGateway, GatewayBuilder};
pub use session::Session;

pub mod prelude {
    pub use crate::answer::{Answer, ERROR_PREFIX};
    pub use crate::config::{ChatConfig, Input};
    pub use crate::error::{ChatError, Result};
    pub use crate::exchange::{Conversation, ExchangeState, Step};
    pub use crate::gateway::{AnswerGateway, GatewayBuilder};
    pub use crate::session::Session;
}

pub mod chat;
pub mod health;
pub mod session;
pub mod ui;

pub use chat::{chat, ChatRequest, ChatResponse, ChatStatus};
pub use health::{health, ready, HealthResponse, ReadyResponse};
pub use session::{clear_transcript, create_session, delete_session, transcript, SessionResponse};
pub use ui::index;

mod id;
mod timestamp;

pub use id::{Id, SessionId};
pub use timestamp::Timestamp;

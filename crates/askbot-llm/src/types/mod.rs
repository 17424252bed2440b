mod request;
mod response;

pub use request::{ChatRequest, DEFAULT_MODEL};
pub use response::ChatResponse;

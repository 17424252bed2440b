pub mod error;
pub mod providers;
pub mod traits;
pub mod types;

pub use error::{LlmError, Result};
pub use traits::LlmProvider;
pub use types::{ChatRequest, ChatResponse, DEFAULT_MODEL};

#[cfg(feature = "cohere")]
pub use providers::CohereProvider;

pub mod prelude {
    pub use crate::error::{LlmError, Result};
    pub use crate::traits::LlmProvider;
    pub use crate::types::{ChatRequest, ChatResponse, DEFAULT_MODEL};

    #[cfg(feature = "cohere")]
    pub use crate::providers::CohereProvider;
}

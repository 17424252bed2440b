#[cfg(feature = "cohere")]
mod cohere;

#[cfg(feature = "cohere")]
pub use cohere::{CohereProvider, DEFAULT_BASE_URL};

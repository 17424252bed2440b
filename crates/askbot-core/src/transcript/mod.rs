mod role;
mod store;
mod turn;

pub use role::Role;
pub use store::Transcript;
pub use turn::Turn;

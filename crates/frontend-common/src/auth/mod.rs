//! Authentication state

pub mod alert;
pub mod context;
pub mod tokens;

// Re-export commonly used items
pub use alert::{AlertKind, AlertState, AlertStore};
pub use context::AuthContext;
pub use tokens::TokenStore;

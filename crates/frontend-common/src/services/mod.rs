//! API services

pub mod api;
pub mod refresh;

pub use api::ApiService;
pub use refresh::{RefreshCoordinator, RefreshOutcome};

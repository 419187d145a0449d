//! Session handling shared by ontoapp front ends
//!
//! Holds the token pair and login alert, and wraps every API call so that an
//! expired access token is refreshed once, with concurrent refreshes merged
//! into a single request.

#[macro_use]
extern crate tracing;

pub mod auth;
pub mod config;
pub mod router;
pub mod services;
pub mod storage;

pub use auth::{AlertKind, AlertStore, AuthContext, TokenStore};
pub use config::AuthConfig;
pub use router::{MemoryRouter, Navigator, Route};
pub use services::{ApiService, RefreshCoordinator, RefreshOutcome};
pub use storage::{FileStorage, MemoryStorage, SessionStorage, StorageError};

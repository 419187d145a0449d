//! ontoapp HTTP client
//!
//! Typed access to the account, authentication and taxonomy endpoints of the
//! ontoapp backend. Session handling (token storage, refresh and retry) lives
//! one layer up in `ontoapp-frontend-common`; this crate only knows how to
//! build requests and turn responses into values or [`ClientError`]s.

#[macro_use]
extern crate tracing;

pub mod client;
pub mod types;

pub use client::error::ClientError;
pub use client::{AuthenticatedClient, ClientBuilder, PublicClient, TOKEN_HEADER};

//! ontoapp HTTP client

pub mod auth;
pub mod error;
pub mod taxonomy;
pub mod typed;
pub mod user;

use crate::types::ApiMessage;
use error::ClientError;
use reqwest::Response;
use std::time::Duration;

pub use typed::{AuthenticatedClient, PublicClient};

/// Header carrying the access token on protected endpoints
pub const TOKEN_HEADER: &str = "jasonWebToken";

/// Base URL used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const DEFAULT_USER_AGENT: &str = concat!("ontoapp-client/", env!("CARGO_PKG_VERSION"));

/// Builder for [`PublicClient`]
#[derive(Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout (ignored on wasm32)
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<PublicClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::Configuration("base_url is empty".into()));
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        #[cfg(not(target_arch = "wasm32"))]
        let client = {
            let mut builder = reqwest::ClientBuilder::new().user_agent(user_agent);
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            builder.build()?
        };

        #[cfg(target_arch = "wasm32")]
        let client = {
            let _ = self.timeout; // Timeouts not supported on WASM
            reqwest::ClientBuilder::new().user_agent(user_agent).build()?
        };

        Ok(PublicClient::from_parts(client, base_url))
    }
}

/// Turn a successful response into `T`, or a non-success one into an error
pub(crate) async fn read_json<T: serde::de::DeserializeOwned>(
    response: Response,
) -> Result<T, ClientError> {
    let response = check_status(response).await?;
    Ok(response.json().await?)
}

/// Read a response whose body is a bare (JSON-encoded) message string
pub(crate) async fn read_message(response: Response) -> Result<ApiMessage, ClientError> {
    let response = check_status(response).await?;
    let body = response.text().await?;
    Ok(ApiMessage(decode_message(&body)))
}

/// Read a response where only the status matters
pub(crate) async fn read_empty(response: Response) -> Result<(), ClientError> {
    check_status(response).await.map(|_| ())
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = if body.trim().is_empty() {
        status.to_string()
    } else {
        decode_message(&body)
    };
    debug!(status = status.as_u16(), %message, "request rejected");
    Err(ClientError::from_status(status, message))
}

/// The backend answers most writes with a JSON string such as
/// `"Taxonomy successfully deleted"`; fall back to the raw text otherwise.
fn decode_message(body: &str) -> String {
    serde_json::from_str::<String>(body).unwrap_or_else(|_| body.trim().to_string())
}

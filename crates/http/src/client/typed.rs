//! Type-safe API clients that enforce authentication requirements at compile time

use super::{ClientBuilder, ClientError, TOKEN_HEADER};
use reqwest::{Client, Method, RequestBuilder, header};

/// Client for public endpoints that don't require a token
#[derive(Clone)]
pub struct PublicClient {
    client: Client,
    base_url: String,
}

/// Client for protected endpoints; every request carries the access token
#[derive(Clone)]
pub struct AuthenticatedClient {
    public: PublicClient,
    access_token: String,
}

impl PublicClient {
    /// Create a new public client with default settings
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        ClientBuilder::new().base_url(base_url).build()
    }

    pub(crate) fn from_parts(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a request builder without a token
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        trace!(%method, %url, "building request");
        self.client
            .request(method, url)
            .header(header::ACCEPT, "application/json")
    }

    /// Attach an access token, producing a client for protected endpoints
    ///
    /// The underlying connection pool is shared, so this is cheap enough to
    /// call for every attempt after a token refresh.
    pub fn authenticate(&self, access_token: impl Into<String>) -> AuthenticatedClient {
        AuthenticatedClient {
            public: self.clone(),
            access_token: access_token.into(),
        }
    }
}

impl AuthenticatedClient {
    /// Create a new authenticated client
    pub fn new(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self, ClientError> {
        Ok(PublicClient::new(base_url)?.authenticate(access_token))
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.public.base_url()
    }

    /// The token sent in the `jasonWebToken` header
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Create a request builder with the token header attached
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.public
            .request(method, path)
            .header(TOKEN_HEADER, &self.access_token)
    }
}

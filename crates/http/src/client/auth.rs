//! Authentication API client methods

use super::{AuthenticatedClient, ClientError, PublicClient, read_empty, read_json};
use crate::types::{Credentials, RefreshRequest, TokenPair};
use reqwest::{Method, header};

impl PublicClient {
    /// Exchange credentials for a token pair
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, ClientError> {
        let request = self.request(Method::POST, "/auth/login").json(&Credentials {
            username: username.to_string(),
            password: password.to_string(),
        });
        read_json(request.send().await?).await
    }

    /// Exchange a refresh token for a fresh token pair
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ClientError> {
        let request = self
            .request(Method::POST, "/auth/refresh")
            .header(header::CONTENT_TYPE, "application/json")
            .json(&RefreshRequest {
                refresh_token: refresh_token.to_string(),
            });
        read_json(request.send().await?).await
    }
}

impl AuthenticatedClient {
    /// Invalidate both tokens on the server (204, empty body)
    pub async fn logout(&self) -> Result<(), ClientError> {
        let request = self
            .request(Method::POST, "/auth/logout")
            .json(&serde_json::json!({}));
        read_empty(request.send().await?).await
    }
}

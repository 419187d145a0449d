//! Account API client methods

use super::{AuthenticatedClient, ClientError, PublicClient, read_json, read_message};
use crate::types::{ApiMessage, Credentials, PasswordRequest, UserInfo};
use reqwest::Method;

impl PublicClient {
    /// Create an account
    pub async fn add_user(&self, username: &str, password: &str) -> Result<ApiMessage, ClientError> {
        let request = self.request(Method::POST, "/user/add").json(&Credentials {
            username: username.to_string(),
            password: password.to_string(),
        });
        read_message(request.send().await?).await
    }
}

impl AuthenticatedClient {
    /// Fetch the account the token belongs to
    pub async fn get_user(&self) -> Result<UserInfo, ClientError> {
        let request = self.request(Method::GET, "/user/get");
        read_json(request.send().await?).await
    }

    /// Delete the account; the server re-checks the password
    pub async fn delete_user(&self, password: &str) -> Result<ApiMessage, ClientError> {
        let request = self.request(Method::DELETE, "/user/delete").json(&PasswordRequest {
            password: password.to_string(),
        });
        read_message(request.send().await?).await
    }
}

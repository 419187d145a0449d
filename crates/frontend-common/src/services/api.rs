//! API service wrapping every backend endpoint

use super::refresh::{RefreshCoordinator, RefreshOutcome};
use crate::auth::AuthContext;
use ontoapp_http::types::{ApiMessage, Taxonomy, TaxonomyDocument, TokenPair, UserInfo};
use ontoapp_http::{AuthenticatedClient, ClientError, PublicClient};
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

/// Entry point for all API calls made by a front end
///
/// Protected calls attach the current access token. A 403 triggers one
/// coalesced token refresh followed by a single retry.
#[derive(Clone)]
pub struct ApiService {
    client: PublicClient,
    auth: Arc<AuthContext>,
    refresher: Arc<RefreshCoordinator>,
}

impl ApiService {
    pub fn new(client: PublicClient, auth: Arc<AuthContext>) -> Self {
        let refresher = Arc::new(RefreshCoordinator::new(client.clone(), auth.clone()));
        Self {
            client,
            auth,
            refresher,
        }
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    /// Create an account
    pub async fn add_user(&self, username: &str, password: &str) -> Result<ApiMessage, ClientError> {
        self.client.add_user(username, password).await
    }

    /// Log in and keep the returned token pair
    pub async fn login_user(&self, username: &str, password: &str) -> Result<TokenPair, ClientError> {
        let pair = self.client.login(username, password).await?;
        self.auth.store_tokens(&pair);
        info!(username, "Logged in");
        Ok(pair)
    }

    /// Fetch the logged-in user
    pub async fn get_user(&self) -> Result<UserInfo, ClientError> {
        self.with_token(|client| async move { client.get_user().await })
            .await
    }

    /// Invalidate the session server-side; local tokens are dropped either way
    pub async fn logout_user(&self) -> Result<(), ClientError> {
        let result = self
            .with_token(|client| async move { client.logout().await })
            .await;
        self.auth.drop_tokens();
        if result.is_ok() {
            info!("Logged out");
        }
        result
    }

    /// Delete the account after password confirmation
    pub async fn delete_user(&self, password: &str) -> Result<ApiMessage, ClientError> {
        let message = self
            .with_token(|client| async move { client.delete_user(password).await })
            .await?;
        self.auth.drop_tokens();
        Ok(message)
    }

    pub async fn add_taxonomy(
        &self,
        domain: &str,
        description: &str,
    ) -> Result<ApiMessage, ClientError> {
        self.with_token(|client| async move { client.add_taxonomy(domain, description).await })
            .await
    }

    pub async fn get_taxonomy(&self, id: i64) -> Result<Taxonomy, ClientError> {
        self.with_token(|client| async move { client.get_taxonomy(id).await })
            .await
    }

    pub async fn list_taxonomies(&self) -> Result<BTreeMap<String, Taxonomy>, ClientError> {
        self.with_token(|client| async move { client.list_taxonomies().await })
            .await
    }

    /// Delete a taxonomy; `id` is the route parameter and must be an integer
    pub async fn delete_taxonomy(&self, id: &str, password: &str) -> Result<ApiMessage, ClientError> {
        let id = parse_taxonomy_id(id)?;
        self.with_token(|client| async move { client.delete_taxonomy(id, password).await })
            .await
    }

    pub async fn save_taxonomy(
        &self,
        document: &TaxonomyDocument,
    ) -> Result<ApiMessage, ClientError> {
        self.with_token(|client| async move { client.save_taxonomy(document).await })
            .await
    }

    pub async fn generate_taxonomy(
        &self,
        document: &TaxonomyDocument,
    ) -> Result<TaxonomyDocument, ClientError> {
        self.with_token(|client| async move { client.generate_taxonomy(document).await })
            .await
    }

    /// Refresh the token pair outside of a failing request
    pub async fn refresh_tokens(&self) -> RefreshOutcome {
        self.refresher.refresh().await
    }

    /// Run a protected call, refreshing and retrying once on 403
    ///
    /// A 403 for a token that has already been replaced (another call
    /// refreshed while this one was in flight) is retried with the new token
    /// without starting a second refresh.
    async fn with_token<T, F, Fut>(&self, call: F) -> Result<T, ClientError>
    where
        F: Fn(AuthenticatedClient) -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let mut retried = false;
        loop {
            self.auth.reload_tokens();
            let sent = self.auth.tokens().access_token().unwrap_or_default();

            match call(self.client.authenticate(sent.as_str())).await {
                Err(e) if e.is_access_denied() && !retried => {
                    retried = true;

                    self.auth.reload_tokens();
                    if self
                        .auth
                        .tokens()
                        .access_token()
                        .is_some_and(|current| current != sent)
                    {
                        debug!("Access denied for a token that was already replaced, retrying");
                        continue;
                    }

                    debug!("Access denied, refreshing tokens before retry");
                    match self.refresher.refresh().await {
                        RefreshOutcome::Expired => return Err(ClientError::SessionExpired),
                        RefreshOutcome::Refreshed | RefreshOutcome::Failed(_) => continue,
                    }
                }
                result => return result,
            }
        }
    }
}

fn parse_taxonomy_id(id: &str) -> Result<i64, ClientError> {
    id.trim()
        .parse()
        .map_err(|_| ClientError::BadRequest(format!("taxonomy id must be an integer, got {id:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_ids_must_be_integers() {
        assert_eq!(parse_taxonomy_id("7").unwrap(), 7);
        assert_eq!(parse_taxonomy_id(" 42 ").unwrap(), 42);
        assert!(matches!(
            parse_taxonomy_id("seven"),
            Err(ClientError::BadRequest(_))
        ));
        assert!(parse_taxonomy_id("").is_err());
    }
}

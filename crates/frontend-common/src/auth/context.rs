//! Shared authentication context

use super::{AlertKind, AlertStore, TokenStore};
use crate::config::AuthConfig;
use crate::router::{MemoryRouter, Navigator, Route};
use crate::storage::{MemoryStorage, SessionStorage};
use ontoapp_http::types::TokenPair;
use std::sync::Arc;

/// Token store, alert store and navigator shared by every API call
///
/// Cheap to share behind an `Arc`; all state uses interior locking.
pub struct AuthContext {
    tokens: TokenStore,
    alerts: AlertStore,
    navigator: Arc<dyn Navigator>,
}

impl AuthContext {
    pub fn new(storage: Arc<dyn SessionStorage>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            tokens: TokenStore::new(storage),
            alerts: AlertStore::new(),
            navigator,
        }
    }

    /// Context with memory storage and a memory router, as a fresh page would have
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()), Arc::new(MemoryRouter::new()))
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn alerts(&self) -> &AlertStore {
        &self.alerts
    }

    pub fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }

    /// Reload tokens from storage, keeping the in-memory pair if storage fails
    pub fn reload_tokens(&self) {
        if let Err(e) = self.tokens.load_tokens() {
            warn!("Failed to load tokens from session storage: {e}");
        }
    }

    /// Record a fresh token pair
    pub fn store_tokens(&self, pair: &TokenPair) {
        if let Err(e) = self
            .tokens
            .set_tokens(pair.access_token.as_str(), pair.refresh_token.as_str())
        {
            warn!("Failed to persist tokens to session storage: {e}");
        }
    }

    /// Forget the current tokens
    pub fn drop_tokens(&self) {
        if let Err(e) = self.tokens.clear_tokens() {
            warn!("Failed to remove tokens from session storage: {e}");
        }
    }

    /// The refresh token was rejected: forget it, tell the user, go to login
    pub fn expire_session(&self) {
        self.drop_tokens();
        self.alerts
            .set_alert(AuthConfig::SESSION_EXPIRED_MESSAGE, AlertKind::Error);
        self.navigator.push(&Route::Login.path());
        info!("Session expired, redirected to login");
    }
}

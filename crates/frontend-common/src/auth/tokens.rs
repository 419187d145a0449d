//! Access/refresh token holder mirrored into session storage

use crate::config::AuthConfig;
use crate::storage::{SessionStorage, StorageError};
use ontoapp_http::types::TokenPair;
use std::sync::{Arc, PoisonError, RwLock};

/// Token store
///
/// The pair is kept as one `Option<TokenPair>` so readers see either both
/// tokens or neither. When a write to session storage fails the in-memory
/// pair stays authoritative until a later write succeeds; reloads retry the
/// write instead of reading the stale stored pair back.
pub struct TokenStore {
    storage: Arc<dyn SessionStorage>,
    current: RwLock<TokenState>,
}

#[derive(Default)]
struct TokenState {
    pair: Option<TokenPair>,
    unpersisted: bool,
}

impl TokenStore {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            storage,
            current: RwLock::new(TokenState::default()),
        }
    }

    /// Replace the in-memory pair with what session storage holds
    ///
    /// A pair is only loaded when both keys are present. If the last write
    /// never reached storage, it is retried and memory wins; on any storage
    /// error the in-memory pair is left as it was.
    pub fn load_tokens(&self) -> Result<(), StorageError> {
        let mut state = self.write();
        if state.unpersisted {
            persist(self.storage.as_ref(), state.pair.as_ref())?;
            state.unpersisted = false;
            return Ok(());
        }

        let access = self.storage.get_item(AuthConfig::ACCESS_TOKEN_KEY)?;
        let refresh = self.storage.get_item(AuthConfig::REFRESH_TOKEN_KEY)?;

        state.pair = match (access, refresh) {
            (Some(access), Some(refresh)) => Some(TokenPair::new(access, refresh)),
            _ => None,
        };
        Ok(())
    }

    /// Store a new pair in memory and in session storage
    ///
    /// Memory is updated even when the storage write fails, and keeps
    /// precedence over storage until the pair is persisted.
    pub fn set_tokens(
        &self,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Result<(), StorageError> {
        self.replace(Some(TokenPair::new(access_token, refresh_token)))
    }

    /// Drop both tokens from memory and session storage
    pub fn clear_tokens(&self) -> Result<(), StorageError> {
        self.replace(None)
    }

    /// Whether memory holds a change that session storage has not accepted yet
    pub fn is_unpersisted(&self) -> bool {
        self.read().unpersisted
    }

    pub fn tokens(&self) -> Option<TokenPair> {
        self.read().pair.clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().pair.as_ref().map(|pair| pair.access_token.clone())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read().pair.as_ref().map(|pair| pair.refresh_token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().pair.is_some()
    }

    fn replace(&self, pair: Option<TokenPair>) -> Result<(), StorageError> {
        let mut state = self.write();
        let result = persist(self.storage.as_ref(), pair.as_ref());
        state.pair = pair;
        state.unpersisted = result.is_err();
        result
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, TokenState> {
        self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, TokenState> {
        self.current.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn persist(storage: &dyn SessionStorage, pair: Option<&TokenPair>) -> Result<(), StorageError> {
    match pair {
        Some(pair) => storage.set_items(&[
            (AuthConfig::ACCESS_TOKEN_KEY, pair.access_token.as_str()),
            (AuthConfig::REFRESH_TOKEN_KEY, pair.refresh_token.as_str()),
        ]),
        None => storage.remove_items(&[AuthConfig::ACCESS_TOKEN_KEY, AuthConfig::REFRESH_TOKEN_KEY]),
    }
}

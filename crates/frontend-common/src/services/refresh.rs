//! Coalesced access-token refresh
//!
//! When several requests hit an expired access token at the same time they all
//! ask for a refresh. Only the first one talks to `/auth/refresh`; the rest
//! await the same shared future and observe the same [`RefreshOutcome`].

use crate::auth::AuthContext;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use ontoapp_http::PublicClient;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Result of one refresh cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new token pair was stored
    Refreshed,
    /// The refresh token was rejected (400/403); the session was dropped,
    /// the expiry alert raised and the user sent to the login route
    Expired,
    /// The refresh failed for another reason; tokens were left untouched
    Failed(String),
}

type InFlight = Shared<BoxFuture<'static, RefreshOutcome>>;

/// Single-slot cache of the refresh currently in flight
pub struct RefreshCoordinator {
    client: PublicClient,
    auth: Arc<AuthContext>,
    in_flight: Mutex<Option<InFlight>>,
}

impl RefreshCoordinator {
    pub fn new(client: PublicClient, auth: Arc<AuthContext>) -> Self {
        Self {
            client,
            auth,
            in_flight: Mutex::new(None),
        }
    }

    /// Refresh the token pair, joining a refresh that is already running
    pub async fn refresh(&self) -> RefreshOutcome {
        let (refresh, started_here) = {
            let mut slot = self.slot();
            // A finished handle can be left behind when the caller that
            // started it was dropped before clearing the slot.
            let running = slot
                .as_ref()
                .filter(|running| running.peek().is_none())
                .cloned();
            match running {
                Some(running) => {
                    debug!("joining token refresh already in flight");
                    (running, false)
                }
                None => {
                    let refresh = run_refresh(self.client.clone(), self.auth.clone())
                        .boxed()
                        .shared();
                    *slot = Some(refresh.clone());
                    (refresh, true)
                }
            }
        };

        let outcome = refresh.clone().await;

        if started_here {
            let mut slot = self.slot();
            if slot.as_ref().is_some_and(|current| current.ptr_eq(&refresh)) {
                *slot = None;
            }
        }

        outcome
    }

    /// Whether a refresh is running right now
    pub fn is_refreshing(&self) -> bool {
        self.slot()
            .as_ref()
            .is_some_and(|running| running.peek().is_none())
    }

    fn slot(&self) -> MutexGuard<'_, Option<InFlight>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

async fn run_refresh(client: PublicClient, auth: Arc<AuthContext>) -> RefreshOutcome {
    auth.reload_tokens();

    let Some(refresh_token) = auth.tokens().refresh_token() else {
        // Nothing to exchange; the server would answer 400.
        auth.expire_session();
        return RefreshOutcome::Expired;
    };

    match client.refresh(&refresh_token).await {
        Ok(pair) => {
            auth.store_tokens(&pair);
            info!("Access token refreshed");
            RefreshOutcome::Refreshed
        }
        Err(e) if e.is_refresh_rejected() => {
            debug!("Refresh token rejected: {e}");
            auth.expire_session();
            RefreshOutcome::Expired
        }
        Err(e) => {
            warn!("Token refresh failed, keeping current tokens: {e}");
            RefreshOutcome::Failed(e.to_string())
        }
    }
}

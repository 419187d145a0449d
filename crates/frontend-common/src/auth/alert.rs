//! Login form alert state

use std::fmt;
use std::sync::{PoisonError, RwLock};

/// Severity of an alert, rendered as its lowercase name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Error,
    Warning,
    Info,
    Success,
}

impl AlertKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Success => "success",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the alert fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertState {
    pub status_message: String,
    pub status_type: String,
}

impl AlertState {
    pub fn is_empty(&self) -> bool {
        self.status_message.is_empty() && self.status_type.is_empty()
    }
}

/// Alert holder; last write wins
#[derive(Debug, Default)]
pub struct AlertStore {
    state: RwLock<AlertState>,
}

impl AlertStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status_message(&self, message: impl Into<String>) {
        self.update(|state| state.status_message = message.into());
    }

    pub fn set_status_type(&self, status_type: impl Into<String>) {
        self.update(|state| state.status_type = status_type.into());
    }

    /// Set message and type in one write
    pub fn set_alert(&self, message: impl Into<String>, kind: AlertKind) {
        self.update(|state| {
            state.status_message = message.into();
            state.status_type = kind.as_str().to_string();
        });
    }

    pub fn status_message(&self) -> String {
        self.snapshot().status_message
    }

    pub fn status_type(&self) -> String {
        self.snapshot().status_type
    }

    pub fn snapshot(&self) -> AlertState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.update(|state| *state = AlertState::default());
    }

    fn update(&self, apply: impl FnOnce(&mut AlertState)) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        apply(&mut state);
    }
}

//! Client-side routes and navigation

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Screens of the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    CreateAccount,
    HomeUser,
    DeleteUser,
    AddTaxonomy,
    EditTaxonomy(String),
    DeleteTaxonomy(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/".to_string(),
            Self::CreateAccount => "/create-account".to_string(),
            Self::HomeUser => "/home-user".to_string(),
            Self::DeleteUser => "/delete-user".to_string(),
            Self::AddTaxonomy => "/add-Taxonomy".to_string(),
            Self::EditTaxonomy(id) => format!("/edit-Taxonomy/{id}"),
            Self::DeleteTaxonomy(id) => format!("/delete-Taxonomy/{id}"),
        }
    }

    /// Match a path against the route table
    pub fn parse(path: &str) -> Option<Self> {
        match path {
            "/" => return Some(Self::Login),
            "/create-account" => return Some(Self::CreateAccount),
            "/home-user" => return Some(Self::HomeUser),
            "/delete-user" => return Some(Self::DeleteUser),
            "/add-Taxonomy" => return Some(Self::AddTaxonomy),
            _ => {}
        }

        let param = |prefix: &str| {
            path.strip_prefix(prefix)
                .filter(|id| !id.is_empty() && !id.contains('/'))
                .map(str::to_string)
        };

        param("/edit-Taxonomy/")
            .map(Self::EditTaxonomy)
            .or_else(|| param("/delete-Taxonomy/").map(Self::DeleteTaxonomy))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Something that can move the user to another screen
pub trait Navigator: Send + Sync {
    fn push(&self, path: &str);
}

/// Oldest entries are dropped once the history grows past this
pub const MAX_HISTORY: usize = 64;

/// Router with in-memory history, bounded to [`MAX_HISTORY`] entries
#[derive(Debug)]
pub struct MemoryRouter {
    history: Mutex<Vec<String>>,
}

impl MemoryRouter {
    pub fn new() -> Self {
        Self::starting_at(Route::Login)
    }

    pub fn starting_at(route: Route) -> Self {
        Self {
            history: Mutex::new(vec![route.path()]),
        }
    }

    /// Current path
    pub fn current(&self) -> String {
        self.history().last().cloned().unwrap_or_else(|| Route::Login.path())
    }

    /// Current route, if the path is in the route table
    pub fn current_route(&self) -> Option<Route> {
        Route::parse(&self.current())
    }

    /// Recently visited paths, oldest first
    pub fn entries(&self) -> Vec<String> {
        self.history().clone()
    }

    /// Go back one entry; returns false when already at the start
    pub fn back(&self) -> bool {
        let mut history = self.history();
        if history.len() > 1 {
            history.pop();
            true
        } else {
            false
        }
    }

    fn history(&self) -> MutexGuard<'_, Vec<String>> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for MemoryRouter {
    fn push(&self, path: &str) {
        if Route::parse(path).is_none() {
            debug!(path, "navigating to path outside the route table");
        }
        let mut history = self.history();
        history.push(path.to_string());
        if history.len() > MAX_HISTORY {
            let excess = history.len() - MAX_HISTORY;
            history.drain(..excess);
        }
    }
}

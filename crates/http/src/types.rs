//! Request and response bodies exchanged with the backend

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// Username/password pair for account creation and login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Access/refresh token pair returned by login and refresh
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

// Tokens never end up in logs.
impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /auth/refresh`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Current user as returned by `GET /user/get`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub username: String,
    pub created_at: String,
    pub last_login: String,
}

/// Body of `DELETE /user/delete`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordRequest {
    pub password: String,
}

/// Body of `POST /taxonomie/add`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTaxonomy {
    pub domain: String,
    pub description: String,
}

/// Body of `DELETE /taxonomie/delete`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteTaxonomyRequest {
    pub id: i64,
    pub password: String,
}

/// A stored taxonomy
///
/// `data` holds a [`TaxonomyDocument`] when fetched by id. In listings the
/// backend replaces it with a placeholder string, so it stays untyped here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub id: i64,
    pub user_id: i64,
    pub domain: String,
    pub description: String,
    #[serde(default)]
    pub data: Option<JsonValue>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_update: Option<String>,
}

impl Taxonomy {
    /// Decode `data` as a category tree, if it is one
    pub fn document(&self) -> Option<TaxonomyDocument> {
        self.data
            .as_ref()
            .and_then(|data| serde_json::from_value(data.clone()).ok())
    }
}

/// Category tree sent to `/taxonomie/save` and `/taxonomie/generate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyDocument {
    /// Key for the generation provider; the backend stores `"None"` in its place
    pub api_key: String,
    /// Taxonomy id, as a string
    pub id: String,
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subcategories: Vec<SubCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubCategory {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_subcategories: Vec<SubSubCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubSubCategory {
    pub name: String,
}

/// Human-readable message the backend returns from most write endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiMessage(pub String);

impl ApiMessage {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

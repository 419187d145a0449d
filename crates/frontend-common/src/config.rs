//! Frontend configuration

/// Authentication configuration
pub struct AuthConfig;

impl AuthConfig {
    /// Session storage key for the access token
    pub const ACCESS_TOKEN_KEY: &'static str = "access_token";

    /// Session storage key for the refresh token
    pub const REFRESH_TOKEN_KEY: &'static str = "refresh_token";

    /// Alert shown when the refresh token is rejected
    pub const SESSION_EXPIRED_MESSAGE: &'static str = "Session expired. Please login again";
}

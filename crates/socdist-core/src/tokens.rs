//! Bearer token types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A short-lived JWT used to authorize API requests.
///
/// Never shown in Debug output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a raw token value.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in authorization headers.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

/// A longer-lived token used to mint new access tokens.
///
/// Never shown in Debug output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RefreshToken(String);

impl RefreshToken {
    /// Wrap a raw token value.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in refresh requests.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RefreshToken").field(&"[REDACTED]").finish()
    }
}

/// The credential pair issued by the token endpoint.
///
/// Serializes to `{"access": "...", "refresh": "..."}`, which is both the
/// wire shape of the login response and the persisted form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: AccessToken,
    pub refresh: RefreshToken,
}

impl TokenPair {
    pub fn new(access: AccessToken, refresh: RefreshToken) -> Self {
        Self { access, refresh }
    }

    /// Returns a copy with the access token replaced and the refresh token kept.
    pub fn with_access(&self, access: AccessToken) -> Self {
        Self {
            access,
            refresh: self.refresh.clone(),
        }
    }
}

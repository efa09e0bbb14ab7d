//! Login credentials type.

use std::fmt;

use serde::Serialize;

/// Username and password submitted to the token endpoint.
///
/// The password is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use socdist_core::LoginCredentials;
///
/// let creds = LoginCredentials::new("alice", "pw");
/// assert_eq!(creds.username(), "alice");
/// ```
#[derive(Clone, Serialize)]
pub struct LoginCredentials {
    username: String,
    password: String,
}

impl LoginCredentials {
    /// Create new credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    ///
    /// Use this only when constructing authentication requests.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

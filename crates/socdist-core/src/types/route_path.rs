//! In-app route path type.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// An absolute in-app location such as `/profile` or `/search?q=alice`.
///
/// The full string (including query and fragment) is what gets remembered
/// as a return path; [`RoutePath::path`] is what the route table matches on.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RoutePath(String);

impl RoutePath {
    /// Parse and validate a location.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not start with `/` or contains
    /// whitespace or control characters.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();

        if !s.starts_with('/') {
            return Err(InvalidInputError::RoutePath {
                value: s,
                reason: "must start with '/'".to_string(),
            }
            .into());
        }

        if s.starts_with("//") {
            return Err(InvalidInputError::RoutePath {
                value: s,
                reason: "must not be protocol-relative".to_string(),
            }
            .into());
        }

        if s.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(InvalidInputError::RoutePath {
                value: s,
                reason: "must not contain whitespace".to_string(),
            }
            .into());
        }

        Ok(Self(s))
    }

    /// The application root, `/`.
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// The login page, `/login`.
    pub fn login() -> Self {
        Self("/login".to_string())
    }

    /// The path component, without query or fragment.
    pub fn path(&self) -> &str {
        let end = self.0.find(['?', '#']).unwrap_or(self.0.len());
        &self.0[..end]
    }

    /// The full location, including query and fragment.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RoutePath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for RoutePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

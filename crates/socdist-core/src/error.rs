//! Error types for socdist.
//!
//! A single error type with explicit variants for transport, authentication,
//! protocol, storage, navigation and input validation failures.

use std::fmt;
use thiserror::Error;

/// The unified error type for socdist operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (no session, missing refresh token).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Protocol errors (non-success responses, unexpected bodies).
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Local persistence errors.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Navigation errors raised by the router.
    #[error("navigation error: {0}")]
    Navigation(#[from] NavigationError),

    /// Input validation errors (bad URL, bad route path).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns true if the server rejected the supplied credentials or token.
    pub fn is_auth_rejection(&self) -> bool {
        match self {
            Error::Auth(_) => true,
            Error::Protocol(err) => err.is_auth_error(),
            _ => false,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Response body could not be decoded.
    #[error("invalid response body: {message}")]
    Decode { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// An operation needs credentials but the session is logged out.
    #[error("not logged in")]
    NotLoggedIn,
}

/// A non-success response from the token endpoints.
///
/// The REST framework reports failures as `{"detail": ..., "code": ...}`;
/// both fields are optional because proxies may answer with other bodies.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Human readable detail from the server.
    pub detail: Option<String>,
    /// Machine readable error code (e.g. `token_not_valid`).
    pub code: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref code) = self.code {
            write!(f, " [{}]", code)?;
        }
        if let Some(ref detail) = self.detail {
            write!(f, ": {}", detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, detail: Option<String>, code: Option<String>) -> Self {
        Self {
            status,
            detail,
            code,
        }
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401
            || self.code.as_deref() == Some("token_not_valid")
            || self.code.as_deref() == Some("no_active_account")
    }
}

/// Local storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing store failed.
    #[error("I/O error on {key}: {message}")]
    Io { key: String, message: String },

    /// The persisted value could not be (de)serialized.
    #[error("corrupt value for {key}: {message}")]
    Corrupt { key: String, message: String },
}

/// Router errors.
#[derive(Debug, Error)]
pub enum NavigationError {
    /// No route is registered for the path.
    #[error("no route matches '{path}'")]
    NoMatch { path: String },

    /// The guard kept redirecting.
    #[error("redirect loop while navigating to '{path}'")]
    RedirectLoop { path: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid route path.
    #[error("invalid route path '{value}': {reason}")]
    RoutePath { value: String, reason: String },
}

//! socdist-core - Core types and traits for the socdist session toolkit.

pub mod claims;
pub mod credentials;
pub mod error;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::LoginCredentials;
pub use error::Error;
pub use tokens::{AccessToken, RefreshToken, TokenPair};
pub use traits::{AuthApi, LocalStorage, Navigation, Navigator};
pub use types::{ApiUrl, RoutePath};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

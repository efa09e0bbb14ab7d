//! Token endpoint trait.

use async_trait::async_trait;

use crate::{AccessToken, LoginCredentials, RefreshToken, Result, TokenPair};

/// The identity provider's token endpoints.
///
/// Implementations surface whatever error the endpoint raises; retry and
/// backoff are not their concern.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange a username and password for an access/refresh pair.
    async fn obtain_token(&self, credentials: &LoginCredentials) -> Result<TokenPair>;

    /// Mint a new access token from a refresh token.
    async fn refresh_access(&self, refresh: &RefreshToken) -> Result<AccessToken>;
}

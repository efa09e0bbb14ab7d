//! reqwest implementation of [`AuthApi`].

use async_trait::async_trait;
use tracing::{debug, instrument};

use socdist_core::{
    AccessToken, ApiUrl, AuthApi, LoginCredentials, RefreshToken, Result, TokenPair,
};

use crate::client::JsonClient;
use crate::endpoints::{RefreshRequest, RefreshResponse};

/// Token endpoints of the application's REST API.
///
/// # Example
///
/// ```no_run
/// use socdist_core::{ApiUrl, AuthApi, LoginCredentials};
/// use socdist_http::HttpAuthApi;
///
/// # async fn example() -> socdist_core::Result<()> {
/// let api = HttpAuthApi::new(ApiUrl::new("http://localhost:8000")?)?;
/// let pair = api.obtain_token(&LoginCredentials::new("alice", "pw")).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    api: ApiUrl,
    client: JsonClient,
}

impl HttpAuthApi {
    /// Create a client for the given API base URL.
    pub fn new(api: ApiUrl) -> Result<Self> {
        Ok(Self {
            api,
            client: JsonClient::new()?,
        })
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    #[instrument(
        skip(self, credentials),
        fields(api = %self.api, username = %credentials.username())
    )]
    async fn obtain_token(&self, credentials: &LoginCredentials) -> Result<TokenPair> {
        let pair: TokenPair = self.client.post(&self.api.token_url(), credentials).await?;
        debug!("Token pair issued");
        Ok(pair)
    }

    #[instrument(skip(self, refresh), fields(api = %self.api))]
    async fn refresh_access(&self, refresh: &RefreshToken) -> Result<AccessToken> {
        let response: RefreshResponse = self
            .client
            .post(&self.api.token_refresh_url(), &RefreshRequest { refresh })
            .await?;
        debug!("Access token refreshed");
        Ok(response.access)
    }
}

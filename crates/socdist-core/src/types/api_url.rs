//! API base URL type.

use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// Path of the token endpoint, relative to the API base.
pub const TOKEN_PATH: &str = "/api/token/";

/// Path of the token refresh endpoint, relative to the API base.
pub const TOKEN_REFRESH_PATH: &str = "/api/token/refresh/";

/// A validated base URL for the application's REST API.
///
/// Must use HTTPS, or HTTP for localhost. A trailing slash is ignored so
/// that `https://api.example.com/` and `https://api.example.com` build the
/// same endpoint URLs. A path prefix is kept.
///
/// # Example
///
/// ```
/// use socdist_core::ApiUrl;
///
/// let api = ApiUrl::new("https://social.example.com/").unwrap();
/// assert_eq!(api.token_url(), "https://social.example.com/api/token/");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Create a new API URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::ApiUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Returns the absolute URL of an endpoint path such as [`TOKEN_PATH`].
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/{}", base, path.trim_start_matches('/'))
    }

    /// `{base}/api/token/`
    pub fn token_url(&self) -> String {
        self.endpoint(TOKEN_PATH)
    }

    /// `{base}/api/token/refresh/`
    pub fn token_refresh_url(&self) -> String {
        self.endpoint(TOKEN_REFRESH_PATH)
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let scheme = url.scheme();
        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]");

        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must not carry a query or fragment".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let api = ApiUrl::new("https://social.example.com").unwrap();
        assert_eq!(api.host(), Some("social.example.com"));
    }

    #[test]
    fn valid_localhost_http() {
        let api = ApiUrl::new("http://localhost:8000").unwrap();
        assert_eq!(api.token_url(), "http://localhost:8000/api/token/");
        assert_eq!(
            api.token_refresh_url(),
            "http://localhost:8000/api/token/refresh/"
        );
    }

    #[test]
    fn trailing_slash_does_not_double_up() {
        let api = ApiUrl::new("https://social.example.com/").unwrap();
        assert_eq!(api.token_url(), "https://social.example.com/api/token/");
    }

    #[test]
    fn keeps_path_prefix() {
        let api = ApiUrl::new("https://example.com/social/").unwrap();
        assert_eq!(api.token_url(), "https://example.com/social/api/token/");
    }

    #[test]
    fn invalid_http_non_localhost() {
        assert!(ApiUrl::new("http://social.example.com").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(ApiUrl::new("/api").is_err());
    }

    #[test]
    fn rejects_query() {
        assert!(ApiUrl::new("https://example.com/?x=1").is_err());
    }
}

//! Request and response bodies for the token endpoints.

use serde::{Deserialize, Serialize};

use socdist_core::{AccessToken, RefreshToken};

/// Request body for `POST /api/token/refresh/`.
#[derive(Debug, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh: &'a RefreshToken,
}

/// Response from `POST /api/token/refresh/`.
///
/// Only the access token is read; a rotated refresh token, if the server
/// sends one, is ignored.
#[derive(Debug, Deserialize)]
pub struct RefreshResponse {
    pub access: AccessToken,
}

/// REST framework error body.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

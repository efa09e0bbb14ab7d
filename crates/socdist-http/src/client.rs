//! JSON-over-HTTP client.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use socdist_core::error::{Error, ProtocolError, TransportError};

use crate::endpoints::ApiErrorResponse;

pub(crate) fn map_reqwest(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else if err.is_decode() {
        TransportError::Decode {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}

/// HTTP client for JSON POST requests.
#[derive(Debug, Clone)]
pub(crate) struct JsonClient {
    client: reqwest::Client,
}

impl JsonClient {
    pub(crate) fn new() -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .user_agent(concat!("socdist/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(map_reqwest)?;

        Ok(Self { client })
    }

    /// POST a JSON body and decode a JSON response.
    #[instrument(skip(self, body))]
    pub(crate) async fn post<B, R>(&self, url: &str, body: &B) -> Result<R, Error>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!("POST");

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest)?;

        self.handle_response(response).await
    }

    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, Error> {
        let status = response.status();
        trace!(status = %status, "response");

        if status.is_success() {
            response.json::<R>().await.map_err(map_reqwest)
        } else {
            let error = self.parse_error_response(response).await;
            Err(Error::Protocol(error))
        }
    }

    async fn parse_error_response(&self, response: reqwest::Response) -> ProtocolError {
        let status = response.status().as_u16();

        match response.json::<ApiErrorResponse>().await {
            Ok(body) => ProtocolError::new(status, body.detail, body.code),
            Err(_) => ProtocolError::new(status, None, None),
        }
    }
}

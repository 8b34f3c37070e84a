//! Shared HTTP plumbing for the SurveyPro API.
//!
//! Builds requests against the configured base URL, attaches the stored bearer
//! token and a per-request id, and maps status codes to `RepositoryError`
//! (401 unauthorized, 404 not found, 429 rate limited with `Retry-After`,
//! anything else non-success as a generic API error).

use std::{sync::Arc, time::Duration};

use reqwest::{Method, RequestBuilder, Response, StatusCode, header};
use serde::de::DeserializeOwned;

use crate::domain::{RepositoryError, SessionStore};

use super::dto::http::ErrorBodyDto;

/// Header carrying the client-generated request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Seconds to wait on a 429 without a usable `Retry-After`
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// HTTP client bound to one API base URL
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// Create a client for `base_url`
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Transport` if the HTTP client cannot be built
    pub fn new(
        base_url: &str,
        timeout: Duration,
        session: Arc<dyn SessionStore>,
    ) -> Result<Self, RepositoryError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("surveypro/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RepositoryError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Request carrying the stored bearer token
    pub fn authorized(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.public(method, path);
        match self.session.load() {
            Ok(Some(session)) => builder.bearer_auth(session.token.as_str()),
            Ok(None) => builder,
            Err(error) => {
                tracing::warn!(%error, "failed to load session; sending without token");
                builder
            }
        }
    }

    /// Request without credentials (public survey endpoints)
    pub fn public(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .header(REQUEST_ID_HEADER, uuid::Uuid::new_v4().to_string())
    }

    /// Send a request and reject non-success responses
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, RepositoryError> {
        let request = builder.build().map_err(transport_error)?;
        let method = request.method().clone();
        let path = request.url().path().to_string();
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        tracing::debug!(%method, %path, %request_id, "sending request");

        let response = self.http.execute(request).await.map_err(transport_error)?;
        tracing::debug!(%method, %path, %request_id, status = response.status().as_u16(), "response");
        check_response(response).await
    }

    /// Send a request and decode its JSON body
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, RepositoryError> {
        let response = self.send(builder).await?;
        decode_json(response).await
    }
}

/// Decode a JSON response body
pub async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, RepositoryError> {
    let bytes = response.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&bytes).map_err(|e| RepositoryError::Decode(e.to_string()))
}

/// Check an HTTP response for error statuses
///
/// Returns the response unchanged on success.
pub async fn check_response(response: Response) -> Result<Response, RepositoryError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    match status {
        StatusCode::UNAUTHORIZED => Err(RepositoryError::Unauthorized),
        StatusCode::TOO_MANY_REQUESTS => Err(RepositoryError::RateLimited {
            retry_after_secs: parse_retry_after(&response),
        }),
        StatusCode::NOT_FOUND => {
            let path = response.url().path().to_string();
            Err(RepositoryError::NotFound(path))
        }
        _ => {
            let body = response.text().await.unwrap_or_default();
            Err(RepositoryError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            })
        }
    }
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s
fn parse_retry_after(response: &Response) -> u64 {
    response
        .headers()
        .get(header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

/// Prefer the `msg`/`detail` field of a JSON error body over the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBodyDto>(body)
        .map(|dto| dto.msg)
        .unwrap_or_else(|_| body.trim().to_string())
}

pub(crate) fn transport_error(error: reqwest::Error) -> RepositoryError {
    if error.is_timeout() {
        RepositoryError::Transport(format!("request timed out: {error}"))
    } else if error.is_decode() {
        RepositoryError::Decode(error.to_string())
    } else {
        RepositoryError::Transport(error.to_string())
    }
}

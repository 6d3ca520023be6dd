// SPDX-FileCopyrightText: 2026 Lexaid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP transport for the legal service API.
//!
//! Provides [`LegalServiceClient`] which handles URL resolution, default
//! headers, JSON encoding and status-to-error mapping. Every call issues
//! exactly one request.

use std::time::Duration;

use lexaid_config::ServiceConfig;
use lexaid_core::LexaidError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Method, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::types::ApiErrorResponse;

/// Longest response body excerpt kept in an error message.
const MAX_ERROR_BODY: usize = 512;

/// HTTP client bound to one service base URL.
#[derive(Debug, Clone)]
pub struct LegalServiceClient {
    client: reqwest::Client,
    base_url: Url,
}

impl LegalServiceClient {
    /// Creates a client from the `[service]` configuration section.
    pub fn new(config: &ServiceConfig) -> Result<Self, LexaidError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).map_err(|e| {
                LexaidError::Config(format!("invalid user agent header value: {e}"))
            })?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LexaidError::transport(format!("failed to build HTTP client: {e}"), e))?;

        Ok(Self {
            client,
            base_url: parse_base_url(&config.base_url)?,
        })
    }

    /// The base URL every path is resolved against. Always ends in `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves an endpoint path or a `download_url` against the base URL.
    ///
    /// Absolute URLs pass through, absolute paths replace the base path and
    /// relative paths are appended to it.
    pub fn resolve(&self, target: &str) -> Result<Url, LexaidError> {
        self.base_url
            .join(target.trim())
            .map_err(|e| LexaidError::Internal(format!("cannot resolve `{target}`: {e}")))
    }

    /// `GET` a path and decode the JSON response.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, LexaidError> {
        let response = self.send(Method::GET, path, None::<&()>).await?;
        decode(response).await
    }

    /// `POST` a JSON body to a path and decode the JSON response.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, LexaidError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(Method::POST, path, Some(body)).await?;
        decode(response).await
    }

    /// `GET` a path or URL and return the raw response bytes.
    pub async fn get_bytes(&self, target: &str) -> Result<Vec<u8>, LexaidError> {
        let response = self.send(Method::GET, target, None::<&()>).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| LexaidError::transport(format!("failed to read response body: {e}"), e))?;
        Ok(bytes.to_vec())
    }

    async fn send<B>(&self, method: Method, target: &str, body: Option<&B>) -> Result<Response, LexaidError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.resolve(target)?;
        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(body) = body {
            // `json` also sets `content-type: application/json`.
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(%method, %url, error = %e, "request to legal service failed");
            LexaidError::transport(format!("HTTP request failed: {e}"), e)
        })?;

        let status = response.status();
        debug!(%method, %url, status = status.as_u16(), "legal service responded");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
            Ok(api_err) => format!("service returned {status}: {}", api_err.message()),
            Err(_) => format!("service returned {status}: {}", excerpt(&body)),
        };
        warn!(%method, %url, status = status.as_u16(), "legal service rejected request");
        Err(LexaidError::status(status.as_u16(), message))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, LexaidError> {
    let body = response
        .text()
        .await
        .map_err(|e| LexaidError::transport(format!("failed to read response body: {e}"), e))?;
    serde_json::from_str(&body).map_err(|e| LexaidError::Service {
        message: format!("failed to parse service response: {e}"),
        status: None,
        source: Some(Box::new(e)),
    })
}

/// Parses the configured base URL, adding the trailing slash `Url::join` needs
/// to keep the last path segment.
fn parse_base_url(raw: &str) -> Result<Url, LexaidError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&with_slash)
        .map_err(|e| LexaidError::Config(format!("invalid service base URL `{raw}`: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(LexaidError::Config(format!(
            "service base URL must use http or https, got `{other}`"
        ))),
    }
}

fn excerpt(body: &str) -> &str {
    if body.len() <= MAX_ERROR_BODY {
        return body;
    }
    let mut end = MAX_ERROR_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

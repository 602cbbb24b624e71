//! # API Client
//!
//! Thin reqwest wrapper that executes one [`Endpoint`] per call.
//!
//! ```text
//! ┌─────────────────────┐          HTTPS          ┌─────────────────────────┐
//! │   obcli command     │ ◄───────────────────►   │  Open Banking API v3.1  │
//! │                     │  Authorization: Bearer  │  (baseUrl)              │
//! │  Endpoint ──► Url   │  sandbox-id             │                         │
//! └─────────────────────┘                         └─────────────────────────┘
//! ```

use crate::error::Error;
use obcli_core::{Config, Endpoint, Method, server_error_message};
use reqwest::Url;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Request timeout applied to every call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Header carrying the sandbox instance id.
pub const SANDBOX_HEADER: &str = "sandbox-id";

/// HTTP client for the Open Banking API.
#[derive(Debug, Clone)]
pub struct ObClient {
    base_url: Url,
    client: reqwest::Client,
    has_token: bool,
}

impl ObClient {
    /// Build a client from the loaded configuration.
    ///
    /// Sends `Authorization: Bearer <token>` and `sandbox-id: <id>` with
    /// every request when those are configured.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Url`] if the base URL cannot be parsed,
    /// [`Error::Config`] if a header value contains invalid characters,
    /// or [`Error::Http`] if the HTTP client fails to build.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let base_url =
            Url::parse(&config.base_url).map_err(|_| Error::Url(config.base_url.clone()))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Url(config.base_url.clone()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = &config.access_token {
            let mut value = header_value("accessToken", &format!("Bearer {}", token))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        if let Some(sandbox_id) = &config.sandbox_id {
            headers.insert(
                HeaderName::from_static(SANDBOX_HEADER),
                header_value("sandboxId", sandbox_id)?,
            );
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            base_url,
            client,
            has_token: config.access_token.is_some(),
        })
    }

    /// Full request URL for an endpoint. Segments are percent-encoded.
    pub fn url_for(&self, endpoint: &Endpoint) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| Error::Url(self.base_url.to_string()))?;
            segments.pop_if_empty();
            segments.extend(&endpoint.segments);
        }
        Ok(url)
    }

    /// Send one request and decode the response.
    ///
    /// Returns `Ok(None)` for an empty success body (e.g. `204 No Content`).
    /// Key order of the JSON body is preserved.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingToken`] before sending, if the endpoint needs a token
    /// - [`Error::Http`] on connection failure or timeout
    /// - [`Error::Server`] with the server's message on a non-2xx status
    /// - [`Error::Json`] if a success body is not JSON
    pub async fn execute(&self, endpoint: &Endpoint) -> Result<Option<Value>, Error> {
        if endpoint.requires_token() && !self.has_token {
            return Err(Error::MissingToken);
        }

        let url = self.url_for(endpoint)?;
        debug!(method = %endpoint.method, %url, "sending request");

        let mut request = match endpoint.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Delete => self.client.delete(url),
        };
        if !endpoint.query.is_empty() {
            request = request.query(&endpoint.query);
        }
        if let Some(body) = &endpoint.body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(status = status.as_u16(), bytes = text.len(), "received response");

        if !status.is_success() {
            let message = server_error_message(status.as_u16(), &text);
            warn!(status = status.as_u16(), %message, "request failed");
            return Err(Error::Server(message));
        }

        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&text)?))
    }
}

fn header_value(key: &str, value: &str) -> Result<HeaderValue, Error> {
    HeaderValue::from_str(value).map_err(|_| {
        Error::Config(obcli_core::Error::InvalidConfig(format!(
            "{} contains characters not allowed in an HTTP header",
            key
        )))
    })
}

// =============================================================================
// TESTS
// =============================================================================

//! `reqwest` implementation of the `UpstreamTransport` trait.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, RETRY_AFTER};
use tracing::{debug, instrument};

use relay_core::upstream::{TransportError, UpstreamResponse, UpstreamTransport};

/// Header carrying the tenant's API key.
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Path of the events endpoint, relative to the base URL.
pub const EVENTS_PATH: &str = "/events";

/// Single-shot HTTP transport with an explicit request timeout.
///
/// One instance is built at startup and shared; the underlying
/// `reqwest::Client` pools connections across tenants.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    events_url: String,
}

impl HttpTransport {
    /// Creates a transport posting to `{base_url}/events`.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Request` if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| TransportError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            events_url: format!("{}{EVENTS_PATH}", base_url.trim_end_matches('/')),
        })
    }

    /// The fully-qualified events endpoint.
    #[must_use]
    pub fn events_url(&self) -> &str {
        &self.events_url
    }
}

fn classify(err: &reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connect(err.to_string())
    } else {
        TransportError::Request(err.to_string())
    }
}

/// Non-JSON bodies are kept as a JSON string; empty bodies become `null`.
fn parse_body(bytes: &[u8]) -> serde_json::Value {
    if bytes.is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

#[async_trait]
impl UpstreamTransport for HttpTransport {
    #[instrument(skip(self, credential, payload), fields(url = %self.events_url))]
    async fn post_event(
        &self,
        credential: &str,
        payload: &serde_json::Value,
    ) -> Result<UpstreamResponse, TransportError> {
        let response = self
            .client
            .post(&self.events_url)
            .header(API_KEY_HEADER, credential)
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| classify(&e))?;

        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let bytes = response.bytes().await.map_err(|e| classify(&e))?;

        debug!(status, "upstream responded");

        Ok(UpstreamResponse {
            status,
            retry_after,
            body: parse_body(&bytes),
        })
    }
}

//! Upstream delivery with a bounded retry.
//!
//! At most two upstream calls are made per event:
//!
//! - `429`: wait `min(Retry-After, 2s)` and try once more.
//! - `5xx`: wait a random 300–800 ms and try once more.
//! - anything else: return immediately.
//!
//! The second attempt's outcome is returned whatever its status. Transport
//! failures are never retried here.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use relay_core::clock::Clock;
use relay_core::rng::DeterministicRng;
use relay_core::upstream::{TransportError, UpstreamResponse, UpstreamTransport};
use tracing::{debug, warn};

/// Upper bound on a honored `Retry-After`.
pub const MAX_RETRY_AFTER_MS: u64 = 2_000;

/// Lower bound of the 5xx retry jitter.
pub const SERVER_ERROR_JITTER_MIN_MS: u32 = 300;

/// Upper bound of the 5xx retry jitter.
pub const SERVER_ERROR_JITTER_MAX_MS: u32 = 800;

/// Sends event payloads upstream with the two-attempt policy.
pub struct DeliveryClient {
    transport: Arc<dyn UpstreamTransport>,
    clock: Arc<dyn Clock + Send + Sync>,
    rng: Arc<Mutex<dyn DeterministicRng + Send>>,
}

impl DeliveryClient {
    /// Creates a client over a single-shot transport.
    #[must_use]
    pub fn new(
        transport: Arc<dyn UpstreamTransport>,
        clock: Arc<dyn Clock + Send + Sync>,
        rng: Arc<Mutex<dyn DeterministicRng + Send>>,
    ) -> Self {
        Self {
            transport,
            clock,
            rng,
        }
    }

    /// Delivers a payload, retrying once on 429 or 5xx.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if either attempt fails below HTTP.
    pub async fn send(
        &self,
        credential: &str,
        payload: &serde_json::Value,
    ) -> Result<UpstreamResponse, TransportError> {
        let first = self.transport.post_event(credential, payload).await?;

        let Some(delay) = self.retry_delay(&first) else {
            return Ok(first);
        };

        warn!(
            status = first.status,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "transient upstream failure, retrying once"
        );
        tokio::time::sleep(delay).await;

        let second = self.transport.post_event(credential, payload).await?;
        debug!(status = second.status, "retry attempt completed");
        Ok(second)
    }

    /// The wait before the single retry, or `None` when no retry is due.
    fn retry_delay(&self, response: &UpstreamResponse) -> Option<Duration> {
        match response.status {
            429 => {
                let requested = response
                    .retry_after
                    .as_deref()
                    .and_then(|header| parse_retry_after_ms(header, self.clock.now()))
                    .unwrap_or(0);
                Some(Duration::from_millis(requested.min(MAX_RETRY_AFTER_MS)))
            }
            500.. => {
                let jitter = self
                    .rng
                    .lock()
                    .map(|mut rng| {
                        rng.next_u32_range(SERVER_ERROR_JITTER_MIN_MS, SERVER_ERROR_JITTER_MAX_MS)
                    })
                    .unwrap_or(SERVER_ERROR_JITTER_MIN_MS);
                Some(Duration::from_millis(u64::from(jitter)))
            }
            _ => None,
        }
    }
}

/// Parses a `Retry-After` value (delta-seconds or HTTP-date) into a delay.
///
/// Dates in the past yield `0`. Unparseable values yield `None`.
#[must_use]
pub fn parse_retry_after_ms(header: &str, now: DateTime<Utc>) -> Option<u64> {
    let header = header.trim();
    if let Ok(seconds) = header.parse::<u64>() {
        return Some(seconds.saturating_mul(1_000));
    }
    let at = DateTime::parse_from_rfc2822(header).ok()?.with_timezone(&Utc);
    let millis = (at - now).num_milliseconds();
    Some(u64::try_from(millis).unwrap_or(0))
}

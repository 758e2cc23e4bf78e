//! Scripted upstream transport.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use relay_core::upstream::{TransportError, UpstreamResponse, UpstreamTransport};

/// A transport that replays a script of responses and records every call.
///
/// Once the script is exhausted the last entry repeats, so a one-entry script
/// models an upstream that always answers the same way.
#[derive(Debug)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<UpstreamResponse, TransportError>>>,
    last: Mutex<Option<Result<UpstreamResponse, TransportError>>>,
    calls: Mutex<Vec<(String, serde_json::Value)>>,
}

impl ScriptedTransport {
    /// Creates a transport replaying `script` in order.
    #[must_use]
    pub fn new(script: Vec<Result<UpstreamResponse, TransportError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A transport that always answers with `status` and `body`.
    #[must_use]
    pub fn always(status: u16, body: serde_json::Value) -> Self {
        Self::new(vec![Ok(Self::response(status, body))])
    }

    /// Builds a response without a `Retry-After` header.
    #[must_use]
    pub fn response(status: u16, body: serde_json::Value) -> UpstreamResponse {
        UpstreamResponse {
            status,
            retry_after: None,
            body,
        }
    }

    /// Number of calls made so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns `(credential, payload)` for every call.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> Vec<(String, serde_json::Value)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamTransport for ScriptedTransport {
    async fn post_event(
        &self,
        credential: &str,
        payload: &serde_json::Value,
    ) -> Result<UpstreamResponse, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((credential.to_owned(), payload.clone()));

        let next = self.script.lock().unwrap().pop_front();
        let mut last = self.last.lock().unwrap();
        match next {
            Some(result) => {
                *last = Some(result.clone());
                result
            }
            None => last
                .clone()
                .unwrap_or_else(|| Err(TransportError::Request("empty script".into()))),
        }
    }
}

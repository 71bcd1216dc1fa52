use crate::{BlockingTransport, Transport};
use ankiconnect_core::{AnkiError, Request, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// In-memory transport answering from a script of replies.
///
/// Every request is recorded; when the script runs dry the transport
/// reports a transport error.
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Result<Value>>>,
    requests: Mutex<Vec<Request>>,
    calls: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw top-level reply.
    pub fn reply(&self, value: Value) -> &Self {
        self.lock_replies().push_back(Ok(value));
        self
    }

    /// Queue a successful single-call reply.
    pub fn reply_result(&self, result: Value) -> &Self {
        self.reply(json!({"error": null, "result": result}))
    }

    /// Queue a `multi` reply made of the given per-call envelopes.
    pub fn reply_multi(&self, envelopes: Vec<Value>) -> &Self {
        self.reply(json!({"error": null, "result": envelopes}))
    }

    /// Queue a failure of the transport itself.
    pub fn fail(&self, error: AnkiError) -> &Self {
        self.lock_replies().push_back(Err(error));
        self
    }

    /// Number of requests sent so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every request sent so far, oldest first.
    pub fn requests(&self) -> Vec<Request> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn lock_replies(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<Value>>> {
        self.replies.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn answer(&self, request: &Request) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        self.lock_replies().pop_front().unwrap_or_else(|| {
            Err(AnkiError::transport(format!(
                "No scripted reply for {}",
                request.action
            )))
        })
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &Request) -> Result<Value> {
        self.answer(request)
    }
}

impl BlockingTransport for MockTransport {
    fn send_blocking(&self, request: &Request) -> Result<Value> {
        self.answer(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replies_in_order() {
        let mock = MockTransport::new();
        mock.reply_result(json!(6)).reply_result(json!(["Default"]));

        let first = mock.send(&Request::new("version", 6)).await.unwrap();
        let second = mock.send_blocking(&Request::new("deckNames", 6)).unwrap();

        assert_eq!(first, json!({"error": null, "result": 6}));
        assert_eq!(second["result"], json!(["Default"]));
        assert_eq!(mock.call_count(), 2);
        assert_eq!(mock.requests()[1].action, "deckNames");
    }

    #[test]
    fn test_exhausted_script_is_transport_error() {
        let mock = MockTransport::new();
        let err = mock.send_blocking(&Request::new("sync", 6)).unwrap_err();
        assert!(err.is_transport());
        assert_eq!(mock.call_count(), 1);
    }

    #[test]
    fn test_scripted_failure() {
        let mock = MockTransport::new();
        mock.fail(AnkiError::transport("connection refused"));
        let err = mock.send_blocking(&Request::new("sync", 6)).unwrap_err();
        assert_eq!(err, AnkiError::transport("connection refused"));
    }
}

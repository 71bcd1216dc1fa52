//! Handles to the results of batched actions.

use crate::batch::Batch;
use crate::invoke::decode;
use ankiconnect_core::{
    poll_outcome, settled, AnkiError, Generation, Outcome, OutcomeReceiver, Result, Ticket,
};
use ankiconnect_transport::{BlockingTransport, Transport};
use futures::channel::oneshot::Canceled;
use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use std::fmt;
use std::future::IntoFuture;
use std::marker::PhantomData;

/// Where a [`Deferred`] stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredState {
    /// Queued; resolving will flush the batch
    Pending,
    /// Taken by a flush that has not completed
    InFlight,
    /// A result is available
    Resolved,
    /// An error is available
    Failed,
}

/// Deferred result of one batched action.
///
/// Resolving the first handle of a generation flushes the whole batch; every
/// other handle of that flush then resolves from the same reply without any
/// further request. Resolution is idempotent.
pub struct Deferred<R, T> {
    batch: Batch<T>,
    /// `None` for a call rejected before it was queued.
    generation: Option<Generation>,
    action: String,
    outcome: OutcomeReceiver,
    _result: PhantomData<fn() -> R>,
}

impl<R, T> Clone for Deferred<R, T> {
    fn clone(&self) -> Self {
        Self {
            batch: self.batch.clone(),
            generation: self.generation,
            action: self.action.clone(),
            outcome: self.outcome.clone(),
            _result: PhantomData,
        }
    }
}

impl<R, T> fmt::Debug for Deferred<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("action", &self.action)
            .field("generation", &self.generation)
            .field("state", &self.state())
            .finish()
    }
}

impl<R, T> Deferred<R, T> {
    pub(crate) fn queued(batch: Batch<T>, action: &str, ticket: Ticket) -> Self {
        Self {
            batch,
            generation: Some(ticket.generation),
            action: action.to_string(),
            outcome: ticket.outcome,
            _result: PhantomData,
        }
    }

    pub(crate) fn rejected(batch: Batch<T>, action: &str, error: AnkiError) -> Self {
        Self {
            batch,
            generation: None,
            action: action.to_string(),
            outcome: settled(Err(error)),
            _result: PhantomData,
        }
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    /// Generation the action was queued under, if it was queued at all.
    pub fn generation(&self) -> Option<Generation> {
        self.generation
    }

    pub fn state(&self) -> DeferredState {
        match poll_outcome(&self.outcome) {
            Some(Ok(Ok(_))) => DeferredState::Resolved,
            Some(Ok(Err(_))) | Some(Err(Canceled)) => DeferredState::Failed,
            None if self.needs_flush() => DeferredState::Pending,
            None => DeferredState::InFlight,
        }
    }

    fn needs_flush(&self) -> bool {
        self.generation
            .is_some_and(|generation| self.batch.is_current(generation))
    }

    fn settle(&self, outcome: std::result::Result<Outcome, Canceled>) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let value = outcome.unwrap_or(Err(AnkiError::Abandoned))?;
        decode(&self.action, value)
    }
}

impl<R: DeserializeOwned, T: Transport> Deferred<R, T> {
    /// Wait for this action's result, flushing the batch first if needed.
    ///
    /// A failure of the flush itself is reported through the outcome, so
    /// the flush's own return value is not consulted here.
    pub async fn resolve(&self) -> Result<R> {
        if self.needs_flush() {
            let _ = self.batch.flush().await;
        }
        let outcome = self.outcome.clone().await;
        self.settle(outcome)
    }
}

impl<R: DeserializeOwned, T: BlockingTransport> Deferred<R, T> {
    /// Blocking counterpart of [`Deferred::resolve`].
    pub fn resolve_blocking(&self) -> Result<R> {
        if self.needs_flush() {
            let _ = self.batch.flush_blocking();
        }
        let outcome = match poll_outcome(&self.outcome) {
            Some(outcome) => outcome,
            // In flight on another thread.
            None => futures::executor::block_on(self.outcome.clone()),
        };
        self.settle(outcome)
    }
}

impl<R, T> IntoFuture for Deferred<R, T>
where
    R: DeserializeOwned + Send + 'static,
    T: Transport + 'static,
{
    type Output = Result<R>;
    type IntoFuture = BoxFuture<'static, Result<R>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move { self.resolve().await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ankiconnect_core::Params;
    use ankiconnect_transport::MockTransport;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn ok(result: Value) -> Value {
        json!({"error": null, "result": result})
    }

    fn err(message: &str) -> Value {
        json!({"error": message, "result": null})
    }

    fn batch() -> (Arc<MockTransport>, Batch<MockTransport>) {
        let mock = Arc::new(MockTransport::new());
        (Arc::clone(&mock), Batch::new(mock))
    }

    #[test]
    fn test_first_resolve_flushes_once() {
        let (mock, batch) = batch();
        mock.reply_multi(vec![ok(json!(1)), ok(json!(2)), ok(json!(3))]);
        let a: Deferred<i64, _> = batch.queue("a", Params::new());
        let b: Deferred<i64, _> = batch.queue("b", Params::new());
        let c: Deferred<i64, _> = batch.queue("c", Params::new());

        assert_eq!(a.state(), DeferredState::Pending);
        assert_eq!(c.resolve_blocking(), Ok(3));
        assert_eq!(a.resolve_blocking(), Ok(1));
        assert_eq!(b.resolve_blocking(), Ok(2));
        assert_eq!(mock.call_count(), 1);
    }

    #[test]
    fn test_errors_are_isolated() {
        let (mock, batch) = batch();
        mock.reply_multi(vec![ok(json!(1)), err("boom"), ok(json!(3))]);
        let a: Deferred<i64, _> = batch.queue("a", Params::new());
        let b: Deferred<i64, _> = batch.queue("b", Params::new());
        let c: Deferred<i64, _> = batch.queue("c", Params::new());

        assert_eq!(a.resolve_blocking(), Ok(1));
        assert_eq!(b.resolve_blocking(), Err(AnkiError::api("boom")));
        assert_eq!(c.resolve_blocking(), Ok(3));
        assert_eq!(b.state(), DeferredState::Failed);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let (mock, batch) = batch();
        mock.reply_multi(vec![ok(json!(["Default"])), err("boom")]);
        let decks: Deferred<Vec<String>, _> = batch.queue("deckNames", Params::new());
        let broken: Deferred<Value, _> = batch.queue("x", Params::new());

        let first = decks.resolve_blocking();
        assert_eq!(first, decks.resolve_blocking());
        assert_eq!(first, Ok(vec!["Default".to_string()]));
        assert_eq!(broken.resolve_blocking(), broken.resolve_blocking());
        assert_eq!(mock.call_count(), 1);
    }

    #[test]
    fn test_generations_are_isolated() {
        let (mock, batch) = batch();
        mock.reply_multi(vec![ok(json!("first"))]);
        mock.reply_multi(vec![ok(json!("second"))]);

        let first: Deferred<String, _> = batch.queue("a", Params::new());
        assert_eq!(first.resolve_blocking(), Ok("first".to_string()));

        let second: Deferred<String, _> = batch.queue("b", Params::new());
        assert_eq!(second.generation(), Some(Generation::new(1)));
        assert_eq!(first.resolve_blocking(), Ok("first".to_string()));
        assert_eq!(mock.call_count(), 1);

        assert_eq!(second.resolve_blocking(), Ok("second".to_string()));
        assert_eq!(mock.call_count(), 2);
        assert_eq!(mock.requests()[1].call_count(), 1);
    }

    #[test]
    fn test_transport_failure_reaches_every_handle() {
        let (mock, batch) = batch();
        mock.fail(AnkiError::transport("connection refused"));
        let a: Deferred<Value, _> = batch.queue("a", Params::new());
        let b: Deferred<Value, _> = batch.queue("b", Params::new());

        assert_eq!(b.resolve_blocking(), Err(AnkiError::transport("connection refused")));
        assert_eq!(a.resolve_blocking(), Err(AnkiError::transport("connection refused")));
        assert_eq!(mock.call_count(), 1);
    }

    #[test]
    fn test_count_mismatch_reaches_every_handle() {
        let (mock, batch) = batch();
        mock.reply_multi(vec![ok(json!(1)), ok(json!(2))]);
        let handles: Vec<Deferred<i64, _>> =
            (0..3).map(|_| batch.queue("a", Params::new())).collect();

        for handle in &handles {
            assert!(handle.resolve_blocking().unwrap_err().is_protocol());
        }
    }

    #[test]
    fn test_malformed_envelope_fails_only_its_handle() {
        let (mock, batch) = batch();
        mock.reply_multi(vec![
            ok(json!(1)),
            json!({"error": null, "result": 2, "extra": true}),
        ]);
        let a: Deferred<i64, _> = batch.queue("a", Params::new());
        let b: Deferred<i64, _> = batch.queue("b", Params::new());

        assert_eq!(a.resolve_blocking(), Ok(1));
        assert!(b.resolve_blocking().unwrap_err().is_protocol());
    }

    #[test]
    fn test_unexpected_shape_is_protocol_error() {
        let (mock, batch) = batch();
        mock.reply_multi(vec![ok(json!("six"))]);
        let version: Deferred<u32, _> = batch.queue("version", Params::new());

        assert!(version.resolve_blocking().unwrap_err().is_protocol());
    }

    #[test]
    fn test_rejected_never_flushes() {
        let (mock, batch) = batch();
        let queued: Deferred<Value, _> = batch.queue("a", Params::new());
        let rejected: Deferred<Value, _> =
            Deferred::rejected(batch.clone(), "b", AnkiError::invalid_argument("bad"));

        assert_eq!(rejected.generation(), None);
        assert_eq!(rejected.state(), DeferredState::Failed);
        assert_eq!(
            rejected.resolve_blocking(),
            Err(AnkiError::invalid_argument("bad"))
        );
        assert_eq!(mock.call_count(), 0);
        assert_eq!(queued.state(), DeferredState::Pending);
    }

    #[tokio::test]
    async fn test_async_resolution() {
        let (mock, batch) = batch();
        mock.reply_multi(vec![ok(json!(["Basic"])), err("model was not found")]);
        let models: Deferred<Vec<String>, _> = batch.queue("modelNames", Params::new());
        let fields: Deferred<Vec<String>, _> = batch.queue("modelFieldNames", Params::new());

        assert_eq!(fields.resolve().await, Err(AnkiError::api("model was not found")));
        assert_eq!(models.clone().await, Ok(vec!["Basic".to_string()]));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_blocking_and_async_share_outcomes() {
        let (mock, batch) = batch();
        mock.reply_multi(vec![ok(json!(7))]);
        let handle: Deferred<u64, _> = batch.queue("getNumCardsReviewedToday", Params::new());

        assert_eq!(handle.resolve().await, Ok(7));
        assert_eq!(handle.resolve_blocking(), Ok(7));
        assert_eq!(mock.call_count(), 1);
    }
}

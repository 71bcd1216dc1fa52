//! Pending calls of a batch and the slots their outcomes are delivered to.
//!
//! The queue keeps two parallel sequences, calls and result slots, matched
//! by position. [`BatchQueue::take`] retires both at once and advances the
//! dispatch generation; the returned [`Dispatch`] is then completed with
//! the decoded reply.

use crate::error::{AnkiError, Result};
use crate::ids::Generation;
use crate::request::Request;
use crate::response::Outcome;
use futures::channel::oneshot::{self, Canceled};
use futures::future::{FutureExt, Shared};
use std::fmt;
use std::mem;
use tracing::{trace, warn};

/// Shared, cloneable view of one call's eventual outcome.
///
/// Resolves to `Err(Canceled)` when the dispatch carrying the call was
/// dropped before completion.
pub type OutcomeReceiver = Shared<oneshot::Receiver<Outcome>>;

/// Receipt for a queued call.
pub struct Ticket {
    pub generation: Generation,
    pub outcome: OutcomeReceiver,
}

impl fmt::Debug for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ticket")
            .field("generation", &self.generation)
            .field("settled", &poll_outcome(&self.outcome).is_some())
            .finish()
    }
}

/// Poll a receiver once without blocking.
///
/// `None` while the outcome has not been delivered; `Some(Err(Canceled))`
/// once its dispatch was dropped.
pub fn poll_outcome(outcome: &OutcomeReceiver) -> Option<std::result::Result<Outcome, Canceled>> {
    outcome.clone().now_or_never()
}

/// An outcome receiver that is already complete.
pub fn settled(outcome: Outcome) -> OutcomeReceiver {
    let (tx, rx) = oneshot::channel();
    // The receiver is alive, so the send cannot fail.
    let _ = tx.send(outcome);
    rx.shared()
}

/// Calls waiting for the next flush.
#[derive(Debug, Default)]
pub struct BatchQueue {
    calls: Vec<Request>,
    slots: Vec<oneshot::Sender<Outcome>>,
    generation: Generation,
}

impl BatchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a call. No I/O happens here.
    pub fn push(&mut self, call: Request) -> Ticket {
        let (tx, rx) = oneshot::channel();
        self.calls.push(call);
        self.slots.push(tx);
        debug_assert_eq!(self.calls.len(), self.slots.len());

        Ticket {
            generation: self.generation,
            outcome: rx.shared(),
        }
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// `true` while calls queued under `generation` have not been taken.
    pub fn is_current(&self, generation: Generation) -> bool {
        generation >= self.generation
    }

    /// Retire the queued calls for dispatch.
    ///
    /// Returns `None` and leaves the generation untouched when nothing is
    /// queued.
    pub fn take(&mut self) -> Option<Dispatch> {
        if self.calls.is_empty() {
            return None;
        }
        let generation = self.generation;
        self.generation.advance();
        trace!("Took {} call(s) of {}", self.calls.len(), generation);
        Some(Dispatch {
            generation,
            calls: mem::take(&mut self.calls),
            slots: mem::take(&mut self.slots),
        })
    }
}

/// Calls taken from a [`BatchQueue`], awaiting their reply.
///
/// Dropping a dispatch without completing it abandons every call in it.
#[derive(Debug)]
pub struct Dispatch {
    generation: Generation,
    calls: Vec<Request>,
    slots: Vec<oneshot::Sender<Outcome>>,
}

impl Dispatch {
    /// Generation the calls were queued under.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn calls(&self) -> &[Request] {
        &self.calls
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// The composite request carrying every call of this dispatch.
    pub fn request(&self, version: u32) -> Request {
        Request::multi(version, &self.calls)
    }

    /// Deliver the reply to every slot, by position.
    ///
    /// A fatal `Err` reaches every slot. Returns each call's action name with
    /// the outcome delivered to it, in queue order.
    pub fn complete(self, reply: Result<Vec<Outcome>>) -> Vec<(String, Outcome)> {
        let outcomes = match reply {
            Ok(outcomes) if outcomes.len() == self.calls.len() => outcomes,
            Ok(outcomes) => {
                let err = AnkiError::protocol(format!(
                    "Response to multi has {} results for {} actions",
                    outcomes.len(),
                    self.calls.len()
                ));
                warn!("{} in {}", err, self.generation);
                vec![Err(err); self.calls.len()]
            }
            Err(err) => vec![Err(err); self.calls.len()],
        };

        self.calls
            .into_iter()
            .zip(self.slots)
            .zip(outcomes)
            .map(|((call, slot), outcome)| {
                // A dropped handle no longer listens; its outcome is still reported.
                let _ = slot.send(outcome.clone());
                (call.action, outcome)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn call(action: &str) -> Request {
        Request::new(action, 6)
    }

    #[test]
    fn test_push_tags_current_generation() {
        let mut queue = BatchQueue::new();
        let first = queue.push(call("deckNames"));
        let second = queue.push(call("version"));

        assert_eq!(queue.len(), 2);
        assert_eq!(first.generation, Generation::new(0));
        assert_eq!(second.generation, Generation::new(0));
        assert!(poll_outcome(&first.outcome).is_none());
    }

    #[test]
    fn test_take_on_empty_queue_keeps_generation() {
        let mut queue = BatchQueue::new();
        assert!(queue.take().is_none());
        assert!(queue.take().is_none());
        assert_eq!(queue.generation(), Generation::new(0));

        let ticket = queue.push(call("sync"));
        assert!(queue.is_current(ticket.generation));
    }

    #[test]
    fn test_take_retires_calls_and_advances() {
        let mut queue = BatchQueue::new();
        let ticket = queue.push(call("deckNames"));

        let dispatch = queue.take().unwrap();
        assert_eq!(dispatch.len(), 1);
        assert_eq!(dispatch.generation(), Generation::new(0));
        assert!(queue.is_empty());
        assert_eq!(queue.generation(), Generation::new(1));
        assert!(!queue.is_current(ticket.generation));

        let later = queue.push(call("version"));
        assert_eq!(later.generation, Generation::new(1));
        assert!(queue.is_current(later.generation));
    }

    #[test]
    fn test_complete_delivers_by_position() {
        let mut queue = BatchQueue::new();
        let a = queue.push(call("a"));
        let b = queue.push(call("b"));
        let dispatch = queue.take().unwrap();

        let delivered = dispatch.complete(Ok(vec![Ok(json!("A")), Err(AnkiError::api("B"))]));
        assert_eq!(delivered[0], ("a".to_string(), Ok(json!("A"))));
        assert_eq!(delivered[1], ("b".to_string(), Err(AnkiError::api("B"))));

        assert_eq!(poll_outcome(&a.outcome), Some(Ok(Ok(json!("A")))));
        assert_eq!(poll_outcome(&b.outcome), Some(Ok(Err(AnkiError::api("B")))));
    }

    #[test]
    fn test_fatal_error_reaches_every_slot() {
        let mut queue = BatchQueue::new();
        let tickets: Vec<_> = (0..3).map(|i| queue.push(call(&format!("a{}", i)))).collect();
        let dispatch = queue.take().unwrap();

        dispatch.complete(Err(AnkiError::transport("connection refused")));
        for ticket in tickets {
            assert_eq!(
                poll_outcome(&ticket.outcome),
                Some(Ok(Err(AnkiError::transport("connection refused"))))
            );
        }
    }

    #[test]
    fn test_short_reply_fails_every_slot() {
        let mut queue = BatchQueue::new();
        let a = queue.push(call("a"));
        let b = queue.push(call("b"));
        queue.take().unwrap().complete(Ok(vec![Ok(json!(1))]));

        for ticket in [a, b] {
            let outcome = poll_outcome(&ticket.outcome).unwrap().unwrap();
            assert!(outcome.unwrap_err().is_protocol());
        }
    }

    #[tokio::test]
    async fn test_dropped_dispatch_cancels_receivers() {
        let mut queue = BatchQueue::new();
        let ticket = queue.push(call("a"));
        drop(queue.take());

        assert!(ticket.outcome.await.is_err());
    }

    #[test]
    fn test_dropped_ticket_does_not_block_delivery() {
        let mut queue = BatchQueue::new();
        drop(queue.push(call("a")));
        let kept = queue.push(call("b"));

        let delivered = queue
            .take()
            .unwrap()
            .complete(Ok(vec![Ok(json!(1)), Ok(json!(2))]));
        assert_eq!(delivered.len(), 2);
        assert_eq!(poll_outcome(&kept.outcome), Some(Ok(Ok(json!(2)))));
    }

    #[test]
    fn test_settled_receiver_is_ready() {
        let outcome = settled(Err(AnkiError::invalid_argument("bad")));
        assert_eq!(
            poll_outcome(&outcome),
            Some(Ok(Err(AnkiError::invalid_argument("bad"))))
        );
    }

    #[test]
    fn test_dispatch_request_is_multi() {
        let mut queue = BatchQueue::new();
        queue.push(call("deckNames"));
        queue.push(call("modelNames"));
        let request = queue.take().unwrap().request(6);
        assert!(request.is_multi());
        assert_eq!(request.call_count(), 2);
    }
}

//! Batch coordinator: queues actions and sends them as one `multi` request.
//!
//! Queuing never touches the network. The first resolution of any handle
//! whose generation is still current flushes the whole queue, and the reply
//! is fanned out to every handle of that flush by position.

use crate::config::ClientConfig;
use crate::deferred::Deferred;
use crate::invoke::Invoke;
use ankiconnect_core::{
    parse_multi, AnkiError, BatchQueue, Dispatch, Generation, Outcome, Params, Request, Result,
    DEFAULT_VERSION,
};
use ankiconnect_transport::{BlockingTransport, Transport};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, trace, warn};

/// Coordinator of one batch of AnkiConnect actions.
///
/// Cloning yields another reference to the same queue. A batch expects one
/// logical thread of control; the queue lock is only held for bookkeeping
/// and never across the network call.
pub struct Batch<T> {
    inner: Arc<BatchInner<T>>,
}

struct BatchInner<T> {
    transport: Arc<T>,
    version: u32,
    auto_drain: bool,
    queue: Mutex<BatchQueue>,
}

impl<T> Clone for Batch<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Batch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let queue = self.lock();
        f.debug_struct("Batch")
            .field("version", &self.inner.version)
            .field("auto_drain", &self.inner.auto_drain)
            .field("queued", &queue.len())
            .field("generation", &queue.generation())
            .finish()
    }
}

impl<T> Batch<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self::with_options(transport, DEFAULT_VERSION, true)
    }

    pub fn with_config(transport: Arc<T>, config: &ClientConfig) -> Self {
        Self::with_options(transport, config.version, config.auto_drain)
    }

    pub fn with_options(transport: Arc<T>, version: u32, auto_drain: bool) -> Self {
        Self {
            inner: Arc::new(BatchInner {
                transport,
                version,
                auto_drain,
                queue: Mutex::new(BatchQueue::new()),
            }),
        }
    }

    /// Queue an action and return the handle to its eventual result.
    pub fn queue<R>(&self, action: &str, params: Params) -> Deferred<R, T> {
        let request = Request::with_params(action, self.inner.version, params);
        let ticket = self.lock().push(request);
        trace!("Queued {} in {}", action, ticket.generation);
        Deferred::queued(self.clone(), action, ticket)
    }

    /// Number of actions waiting for the next flush.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Current dispatch generation; advances once per non-empty flush.
    pub fn generation(&self) -> Generation {
        self.lock().generation()
    }

    pub fn protocol_version(&self) -> u32 {
        self.inner.version
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.inner.transport
    }

    pub(crate) fn is_current(&self, generation: Generation) -> bool {
        self.lock().is_current(generation)
    }

    fn lock(&self) -> MutexGuard<'_, BatchQueue> {
        self.inner.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self) -> Option<(Dispatch, Request)> {
        let dispatch = self.lock().take()?;
        let request = dispatch.request(self.inner.version);
        debug!(
            "Flushing {} action(s) of {}",
            dispatch.len(),
            dispatch.generation()
        );
        Some((dispatch, request))
    }

    fn finish(&self, dispatch: Dispatch, reply: Result<Value>) -> Result<()> {
        let expected = dispatch.len();
        let generation = dispatch.generation();
        let decoded = reply.and_then(|value| parse_multi(value, expected));
        let fatal = decoded.as_ref().err().cloned();
        let delivered = dispatch.complete(decoded);

        match fatal {
            Some(err) => {
                warn!(
                    "Batch {} of {} action(s) failed: {}",
                    generation, expected, err
                );
                Err(err)
            }
            None => {
                if self.inner.auto_drain {
                    let failed = drain(&delivered);
                    trace!("Drained {} with {} failure(s)", generation, failed);
                }
                Ok(())
            }
        }
    }
}

impl<T: Transport> Batch<T> {
    /// Send every queued action as one `multi` request.
    ///
    /// Does nothing, and keeps the generation, when the queue is empty. A
    /// fatal failure is delivered to every handle of the flush and also
    /// returned here.
    pub async fn flush(&self) -> Result<()> {
        let Some((dispatch, request)) = self.begin() else {
            return Ok(());
        };
        let reply = self.inner.transport.send(&request).await;
        self.finish(dispatch, reply)
    }
}

impl<T: BlockingTransport> Batch<T> {
    /// Blocking counterpart of [`Batch::flush`].
    pub fn flush_blocking(&self) -> Result<()> {
        let Some((dispatch, request)) = self.begin() else {
            return Ok(());
        };
        let reply = self.inner.transport.send_blocking(&request);
        self.finish(dispatch, reply)
    }
}

/// Visit every outcome of a flush in queue order and log its failure.
///
/// Failures are not propagated from here; each handle still returns its own
/// error when resolved. Returns the number of failures visited.
fn drain(delivered: &[(String, Outcome)]) -> usize {
    let mut failed = 0;
    for (position, (action, outcome)) in delivered.iter().enumerate() {
        if let Err(err) = outcome {
            warn!("Action {} ({}) in batch failed: {}", position, action, err);
            failed += 1;
        }
    }
    failed
}

impl<T> Invoke for Batch<T> {
    type Pending<'a, R>
        = Deferred<R, T>
    where
        Self: 'a,
        R: DeserializeOwned + Send + 'static;

    fn invoke<'a, R>(&'a self, action: &str, params: Params) -> Self::Pending<'a, R>
    where
        R: DeserializeOwned + Send + 'static,
    {
        self.queue(action, params)
    }

    fn reject<'a, R>(&'a self, action: &str, error: AnkiError) -> Self::Pending<'a, R>
    where
        R: DeserializeOwned + Send + 'static,
    {
        Deferred::rejected(self.clone(), action, error)
    }
}

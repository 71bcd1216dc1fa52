// AnkiConnect clients
// Two calling conventions over the same action surface:
// - AsyncClient: every action is a future, sent on its own
// - BlockingClient: every action blocks until its reply is decoded
// Both hand out batches that collect actions into a single `multi` request.

use crate::batch::Batch;
use crate::config::ClientConfig;
use crate::invoke::{decode, Invoke};
use ankiconnect_core::{parse_envelope, AnkiError, Params, Request, Result};
use ankiconnect_transport::{
    BlockingHttpTransport, BlockingTransport, HttpTransport, Transport,
};
use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Asynchronous AnkiConnect client
pub struct AsyncClient<T = HttpTransport> {
    config: ClientConfig,
    transport: Arc<T>,
}

impl<T> fmt::Debug for AsyncClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AsyncClient<HttpTransport> {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.http())?;
        Ok(Self::with_transport(config, transport))
    }

    /// Create a new client with default configuration
    pub fn new_with_url(url: &str) -> Result<Self> {
        Self::new(ClientConfig::with_url(url))
    }
}

impl<T> AsyncClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self::with_shared_transport(config, Arc::new(transport))
    }

    pub fn with_shared_transport(config: ClientConfig, transport: Arc<T>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Start a lazy batch; nothing is sent until a handle is resolved or
    /// the batch is flushed.
    pub fn batch(&self) -> Batch<T> {
        Batch::with_config(Arc::clone(&self.transport), &self.config)
    }
}

impl<T: Transport> AsyncClient<T> {
    /// Perform a single action outside any batch
    pub async fn call(&self, action: &str, params: Params) -> Result<Value> {
        let request = Request::with_params(action, self.config.version, params);
        debug!("Calling {}", action);
        let reply = self.transport.send(&request).await?;
        parse_envelope(reply)
    }

    /// Queue actions inside `queue` and send them as soon as it returns.
    ///
    /// A failed send is reported through the handles the closure created.
    pub async fn send_batch<F, O>(&self, queue: F) -> O
    where
        F: FnOnce(&Batch<T>) -> O,
    {
        let batch = self.batch();
        let output = queue(&batch);
        if let Err(err) = batch.flush().await {
            info!("send_batch flush failed: {}", err);
        }
        output
    }
}

impl<T: Transport> Invoke for AsyncClient<T> {
    type Pending<'a, R>
        = BoxFuture<'a, Result<R>>
    where
        Self: 'a,
        R: DeserializeOwned + Send + 'static;

    fn invoke<'a, R>(&'a self, action: &str, params: Params) -> Self::Pending<'a, R>
    where
        R: DeserializeOwned + Send + 'static,
    {
        let action = action.to_string();
        Box::pin(async move {
            let value = self.call(&action, params).await?;
            decode(&action, value)
        })
    }

    fn reject<'a, R>(&'a self, action: &str, error: AnkiError) -> Self::Pending<'a, R>
    where
        R: DeserializeOwned + Send + 'static,
    {
        debug!("Rejected {} before sending: {}", action, error);
        Box::pin(futures::future::ready(Err(error)))
    }
}

/// Blocking AnkiConnect client
///
/// Must not be used from within an async runtime.
pub struct BlockingClient<T: BlockingTransport = BlockingHttpTransport> {
    config: ClientConfig,
    transport: Arc<T>,
}

impl<T: BlockingTransport> fmt::Debug for BlockingClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockingClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl BlockingClient<BlockingHttpTransport> {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = BlockingHttpTransport::new(config.http())?;
        Ok(Self::with_transport(config, transport))
    }

    /// Create a new client with default configuration
    pub fn new_with_url(url: &str) -> Result<Self> {
        Self::new(ClientConfig::with_url(url))
    }
}

impl<T: BlockingTransport> BlockingClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self::with_shared_transport(config, Arc::new(transport))
    }

    pub fn with_shared_transport(config: ClientConfig, transport: Arc<T>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Start a lazy batch; nothing is sent until a handle is resolved or
    /// the batch is flushed.
    pub fn batch(&self) -> Batch<T> {
        Batch::with_config(Arc::clone(&self.transport), &self.config)
    }

    /// Perform a single action outside any batch
    pub fn call(&self, action: &str, params: Params) -> Result<Value> {
        let request = Request::with_params(action, self.config.version, params);
        debug!("Calling {}", action);
        let reply = self.transport.send_blocking(&request)?;
        parse_envelope(reply)
    }

    /// Queue actions inside `queue` and send them as soon as it returns.
    ///
    /// A failed send is reported through the handles the closure created.
    pub fn send_batch<F, O>(&self, queue: F) -> O
    where
        F: FnOnce(&Batch<T>) -> O,
    {
        let batch = self.batch();
        let output = queue(&batch);
        if let Err(err) = batch.flush_blocking() {
            info!("send_batch flush failed: {}", err);
        }
        output
    }
}

impl<T: BlockingTransport> Invoke for BlockingClient<T> {
    type Pending<'a, R>
        = Result<R>
    where
        Self: 'a,
        R: DeserializeOwned + Send + 'static;

    fn invoke<'a, R>(&'a self, action: &str, params: Params) -> Self::Pending<'a, R>
    where
        R: DeserializeOwned + Send + 'static,
    {
        let value = self.call(action, params)?;
        decode(action, value)
    }

    fn reject<'a, R>(&'a self, action: &str, error: AnkiError) -> Self::Pending<'a, R>
    where
        R: DeserializeOwned + Send + 'static,
    {
        debug!("Rejected {} before sending: {}", action, error);
        Err(error)
    }
}

impl<T: BlockingTransport> Drop for BlockingClient<T> {
    fn drop(&mut self) {
        if !self.config.sync_on_drop {
            return;
        }
        debug!("Syncing collection before dropping client");
        if let Err(err) = self.call("sync", Params::new()) {
            warn!("sync on drop failed: {}", err);
        }
    }
}

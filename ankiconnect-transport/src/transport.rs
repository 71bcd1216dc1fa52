use ankiconnect_core::{Request, Result};
use async_trait::async_trait;
use serde_json::Value;

/// Sends one request to the AnkiConnect endpoint and returns the decoded
/// top-level JSON reply.
///
/// Envelope validation is left to the caller, which knows whether the
/// request was a single call or a `multi`. Failures to reach the endpoint,
/// non-success statuses and undecodable bodies are reported as transport
/// errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &Request) -> Result<Value>;
}

/// Blocking counterpart of [`Transport`].
pub trait BlockingTransport: Send + Sync {
    fn send_blocking(&self, request: &Request) -> Result<Value>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, request: &Request) -> Result<Value> {
        (**self).send(request).await
    }
}

impl<T: BlockingTransport + ?Sized> BlockingTransport for std::sync::Arc<T> {
    fn send_blocking(&self, request: &Request) -> Result<Value> {
        (**self).send_blocking(request)
    }
}

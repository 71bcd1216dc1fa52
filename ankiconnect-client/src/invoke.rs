use ankiconnect_core::{AnkiError, Params, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A calling convention for AnkiConnect actions.
///
/// Implemented by [`AsyncClient`](crate::AsyncClient) (a future per call),
/// [`BlockingClient`](crate::BlockingClient) (the result, immediately) and
/// [`Batch`](crate::Batch) (a [`Deferred`](crate::Deferred) handle). Every
/// named action in [`Actions`](crate::Actions) is written once against this
/// trait.
pub trait Invoke {
    /// What a call returns under this convention.
    type Pending<'a, R>
    where
        Self: 'a,
        R: DeserializeOwned + Send + 'static;

    fn invoke<'a, R>(&'a self, action: &str, params: Params) -> Self::Pending<'a, R>
    where
        R: DeserializeOwned + Send + 'static;

    /// A call that failed before it could be sent.
    fn reject<'a, R>(&'a self, action: &str, error: AnkiError) -> Self::Pending<'a, R>
    where
        R: DeserializeOwned + Send + 'static;

    fn invoke_with<'a, R>(&'a self, action: &str, params: Result<Params>) -> Self::Pending<'a, R>
    where
        R: DeserializeOwned + Send + 'static,
    {
        match params {
            Ok(params) => self.invoke(action, params),
            Err(error) => self.reject(action, error),
        }
    }
}

/// Convert an action's raw result into the type its caller asked for.
pub(crate) fn decode<R: DeserializeOwned>(action: &str, value: Value) -> Result<R> {
    serde_json::from_value(value).map_err(|e| {
        AnkiError::protocol(format!(
            "API response for '{}' has an unexpected shape: {}",
            action, e
        ))
    })
}

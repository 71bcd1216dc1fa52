use crate::error::{AnkiError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Protocol version sent when none is configured.
pub const DEFAULT_VERSION: u32 = 6;

/// Action name of the composite request.
pub const MULTI_ACTION: &str = "multi";

/// Named parameters of a single action.
pub type Params = Map<String, Value>;

/// One logical AnkiConnect call.
///
/// Serializes to `{"action": .., "version": .., "params": ..}`; the `params`
/// key is left out when there are no parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub action: String,
    pub version: u32,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub params: Params,
}

impl Request {
    pub fn new(action: impl Into<String>, version: u32) -> Self {
        Request {
            action: action.into(),
            version,
            params: Params::new(),
        }
    }

    pub fn with_params(action: impl Into<String>, version: u32, params: Params) -> Self {
        Request {
            action: action.into(),
            version,
            params,
        }
    }

    /// Wrap `calls` into a single `multi` request, preserving their order.
    pub fn multi(version: u32, calls: &[Request]) -> Self {
        let actions = calls.iter().map(Request::to_value).collect();
        let mut params = Params::new();
        params.insert("actions".to_string(), Value::Array(actions));
        Request::with_params(MULTI_ACTION, version, params)
    }

    pub fn is_multi(&self) -> bool {
        self.action == MULTI_ACTION
    }

    /// Number of calls carried by this request: the length of the action
    /// list for `multi`, one otherwise.
    pub fn call_count(&self) -> usize {
        if !self.is_multi() {
            return 1;
        }
        self.params
            .get("actions")
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0)
    }

    pub fn to_value(&self) -> Value {
        let mut envelope = Map::new();
        envelope.insert("action".to_string(), Value::String(self.action.clone()));
        envelope.insert("version".to_string(), Value::from(self.version));
        if !self.params.is_empty() {
            envelope.insert("params".to_string(), Value::Object(self.params.clone()));
        }
        Value::Object(envelope)
    }
}

/// Encode one named argument. Used by [`params!`](crate::params).
pub fn to_param<T: Serialize + ?Sized>(name: &str, value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| {
        AnkiError::invalid_argument(format!("Argument '{}' could not be encoded: {}", name, e))
    })
}

//! Decoding of `{error, result}` response envelopes.
//!
//! A reply to any request is exactly two fields. For a `multi` request the
//! `result` field is itself a list of envelopes, one per call, in request
//! order.

use crate::error::{AnkiError, Result};
use serde_json::Value;

/// Outcome of a single call once its envelope has been decoded.
pub type Outcome = Result<Value>;

/// Decode one response envelope into its result, or the error it carries.
pub fn parse_envelope(response: Value) -> Outcome {
    let Value::Object(mut fields) = response else {
        return Err(AnkiError::protocol("Response is not a JSON object"));
    };
    if fields.len() != 2 {
        return Err(AnkiError::protocol(
            "Response has an unexpected number of fields",
        ));
    }
    let error = fields
        .remove("error")
        .ok_or_else(|| AnkiError::protocol("Response is missing required error field"))?;
    let result = fields
        .remove("result")
        .ok_or_else(|| AnkiError::protocol("Response is missing required result field"))?;

    match error {
        Value::Null => Ok(result),
        Value::String(message) => Err(AnkiError::Api(message)),
        other => Err(AnkiError::protocol(format!(
            "Response error field must be a string or null, got {}",
            other
        ))),
    }
}

/// Decode the reply to a `multi` request carrying `expected` calls.
///
/// The outer `Err` is fatal to every call of the request: a malformed outer
/// envelope, a non-list result or a count mismatch. Each inner item is the
/// outcome of the call at the same position.
pub fn parse_multi(response: Value, expected: usize) -> Result<Vec<Outcome>> {
    let items = match parse_envelope(response)? {
        Value::Array(items) => items,
        other => {
            return Err(AnkiError::protocol(format!(
                "Response to multi must be a list, got {}",
                type_name(&other)
            )))
        }
    };
    if items.len() != expected {
        return Err(AnkiError::protocol(format!(
            "Response to multi has {} results for {} actions",
            items.len(),
            expected
        )));
    }
    Ok(items.into_iter().map(parse_envelope).collect())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

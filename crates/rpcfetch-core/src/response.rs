//! Unwrapping of JSON-RPC 2.0 response envelopes.
//!
//! Responses are handled as loosely-typed JSON: endpoints in the wild return
//! `error` as an object, a bare string, or something else entirely, and the
//! whole body is validated by shape rather than by a strict schema.

use serde_json::{Map, Value};

use crate::error::FetchError;

/// A validated response envelope: a JSON object, nothing more assumed.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcResponseEnvelope {
    fields: Map<String, Value>,
}

impl RpcResponseEnvelope {
    /// Validate a parsed body. `endpoint` is only used in the error message.
    pub fn from_value(endpoint: &str, body: Value) -> Result<Self, FetchError> {
        match body {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(FetchError::Protocol(format!(
                "RPC endpoint {endpoint} returned non-object response."
            ))),
        }
    }

    /// Resolve the envelope to its `result`, or fail if `error` is truthy.
    ///
    /// An absent `result` yields `Ok(None)`; an explicit `null` yields
    /// `Ok(Some(Value::Null))`.
    pub fn into_result(mut self) -> Result<Option<Value>, FetchError> {
        if let Some(error) = self.fields.remove("error") {
            if is_truthy(&error) {
                let message = match error.get("message") {
                    Some(message) if is_truthy(message) => display_value(message),
                    _ => display_value(&error),
                };
                return Err(FetchError::Rpc { message, error });
            }
        }
        Ok(self.fields.remove("result"))
    }
}

/// JSON truthiness: `null`, `false`, `0` and `""` are falsy, everything
/// else (including empty objects and arrays) is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// Strings print raw, everything else as compact JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

//! JSON-RPC 2.0 request envelope and id generation.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC protocol version.
pub const JSON_RPC_VERSION: &str = "2.0";

/// A single positional JSON-RPC parameter value.
pub type RpcParam = Value;

/// A JSON-RPC 2.0 request envelope.
///
/// Field order matches the wire format: `id`, `jsonrpc`, `method`, `params`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequestEnvelope {
    pub id: String,
    pub jsonrpc: String,
    pub method: String,
    pub params: Vec<RpcParam>,
}

impl RpcRequestEnvelope {
    /// Create a new JSON-RPC 2.0 request envelope.
    pub fn new(id: impl Into<String>, method: impl Into<String>, params: Vec<RpcParam>) -> Self {
        Self {
            id: id.into(),
            jsonrpc: JSON_RPC_VERSION.into(),
            method: method.into(),
            params,
        }
    }
}

/// Where request ids come from.
///
/// `Timestamp` ids are the current epoch milliseconds, so two calls issued in
/// the same millisecond share an id. Responses are never correlated by id,
/// the HTTP response is always consumed by the call that sent the request.
#[derive(Debug, Default)]
pub enum IdSource {
    #[default]
    Timestamp,
    /// Increasing ids starting at 1, unique within one client.
    Sequential(AtomicU64),
}

impl IdSource {
    pub fn sequential() -> Self {
        Self::Sequential(AtomicU64::new(1))
    }

    /// Produce the id for the next request.
    pub fn next_id(&self) -> String {
        match self {
            Self::Timestamp => chrono::Utc::now().timestamp_millis().to_string(),
            Self::Sequential(counter) => counter.fetch_add(1, Ordering::Relaxed).to_string(),
        }
    }
}

//! Error types for a JSON-RPC call.

use serde_json::Value;
use thiserror::Error;

/// Errors that can terminate a `JsonRpcClient::request` call.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The fetcher did not receive a response within its configured bound.
    #[error("Request timed out after {ms}ms")]
    Timeout { ms: u64 },

    /// Transport-level failure (DNS, connection refused, TLS, ...).
    #[error("Network error: {0}")]
    Network(String),

    /// The response body was not JSON, or not a JSON object.
    #[error("{0}")]
    Protocol(String),

    /// The endpoint answered with a truthy `error` member.
    ///
    /// `message` is `error.message` when present, otherwise the stringified
    /// `error` value; `error` keeps the raw member for callers that need it.
    #[error("{message}")]
    Rpc { message: String, error: Value },

    /// The RPC URL could not be parsed.
    #[error("Invalid RPC URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The call itself was malformed (e.g. empty method name).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The result could not be deserialized into the requested type.
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),
}

impl FetchError {
    /// Returns `true` if the fetcher gave up waiting for a response.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns `true` if the endpoint returned a well-formed error envelope.
    pub fn is_rpc_error(&self) -> bool {
        matches!(self, Self::Rpc { .. })
    }

    /// Returns `true` for failures raised by the transport rather than the endpoint.
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Network(_))
    }
}

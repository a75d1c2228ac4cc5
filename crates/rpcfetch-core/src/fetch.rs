//! The `TimeoutFetcher` trait: the HTTP seam under `JsonRpcClient`.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::FetchError;

/// HTTP method of an outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMethod {
    Get,
    Post,
}

impl std::fmt::Display for FetchMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// Whether cookies and other ambient credentials ride along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialsMode {
    Omit,
    #[default]
    SameOrigin,
    Include,
}

/// Whether the caller intends to inspect the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestMode {
    #[default]
    Cors,
    /// Fire-and-forget: the response is opaque and is not read.
    NoCors,
}

/// Cache policy of an outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheMode {
    #[default]
    Default,
    NoStore,
}

/// An outbound HTTP request.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub url: String,
    pub method: FetchMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub credentials: CredentialsMode,
    pub mode: RequestMode,
    pub cache: CacheMode,
}

impl FetchRequest {
    /// A `GET` with no headers and no body.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: FetchMethod::Get,
            headers: Vec::new(),
            body: None,
            credentials: CredentialsMode::default(),
            mode: RequestMode::default(),
            cache: CacheMode::default(),
        }
    }

    /// A `POST` carrying `body`.
    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: FetchMethod::Post,
            body: Some(body.into()),
            ..Self::get(url)
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn credentials(mut self, credentials: CredentialsMode) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn mode(mut self, mode: RequestMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn cache(mut self, cache: CacheMode) -> Self {
        self.cache = cache;
        self
    }

    /// Case-insensitive header lookup.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A fully-read HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Parse the body as JSON.
    pub fn json(&self) -> Result<Value, FetchError> {
        serde_json::from_slice(&self.body)
            .map_err(|e| FetchError::Protocol(format!("invalid JSON response body: {e}")))
    }
}

/// Performs HTTP requests bounded by a timeout.
///
/// Implementations must fail with [`FetchError::Timeout`] when no response
/// arrives in time, and with [`FetchError::Network`] for other transport
/// failures. Non-2xx statuses are not errors at this layer.
///
/// The trait is object-safe and is stored as `Arc<dyn TimeoutFetcher>`.
#[async_trait]
pub trait TimeoutFetcher: Send + Sync + 'static {
    async fn fetch(&self, req: FetchRequest) -> Result<FetchResponse, FetchError>;
}

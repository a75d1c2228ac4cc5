//! `JsonRpcClient`: one JSON-RPC 2.0 call per `request`, over any fetcher.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::endpoint::Endpoint;
use crate::error::FetchError;
use crate::fetch::{CacheMode, CredentialsMode, FetchRequest, RequestMode, TimeoutFetcher};
use crate::request::{IdSource, RpcParam, RpcRequestEnvelope};
use crate::response::RpcResponseEnvelope;

/// Per-call options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Include cookies on the call, and prime them with a pre-flight request first.
    pub send_credentials: bool,
}

impl RequestOptions {
    pub fn with_send_credentials(mut self, send_credentials: bool) -> Self {
        self.send_credentials = send_credentials;
        self
    }
}

/// JSON-RPC 2.0 client over an injected [`TimeoutFetcher`].
///
/// Holds no per-call state: concurrent calls are independent and each one
/// performs one HTTP request, or two when credentials are primed.
pub struct JsonRpcClient {
    fetcher: Arc<dyn TimeoutFetcher>,
    ids: IdSource,
}

impl JsonRpcClient {
    pub fn new(fetcher: Arc<dyn TimeoutFetcher>) -> Self {
        Self {
            fetcher,
            ids: IdSource::default(),
        }
    }

    /// Replace the default timestamp id source.
    pub fn with_id_source(mut self, ids: IdSource) -> Self {
        self.ids = ids;
        self
    }

    /// Call `rpc_method` with no params and default options.
    pub async fn call(&self, rpc_url: &str, rpc_method: &str) -> Result<Option<Value>, FetchError> {
        self.request(rpc_url, rpc_method, Vec::new(), RequestOptions::default())
            .await
    }

    /// Send one JSON-RPC call to `rpc_url` and unwrap the response envelope.
    ///
    /// Returns the `result` member (`None` if absent). Credentials embedded in
    /// the URL are moved to an `Authorization: Basic` header. With
    /// `send_credentials`, a best-effort `GET` to the same URL goes first so
    /// the server can refresh cookies; its failure is discarded.
    pub async fn request(
        &self,
        rpc_url: &str,
        rpc_method: &str,
        rpc_params: Vec<RpcParam>,
        options: RequestOptions,
    ) -> Result<Option<Value>, FetchError> {
        if rpc_method.is_empty() {
            return Err(FetchError::InvalidRequest(
                "method name must not be empty".into(),
            ));
        }

        let endpoint = Endpoint::parse(rpc_url)?;

        if options.send_credentials {
            self.prime_credentials(&endpoint).await;
        }

        let envelope = RpcRequestEnvelope::new(self.ids.next_id(), rpc_method, rpc_params);
        let body = serde_json::to_string(&envelope)?;

        let credentials = if options.send_credentials {
            CredentialsMode::Include
        } else {
            CredentialsMode::SameOrigin
        };
        let mut req = FetchRequest::post(endpoint.effective_url(), body)
            .header("Content-Type", "application/json")
            .credentials(credentials)
            .cache(CacheMode::Default);
        if let Some(auth) = endpoint.authorization() {
            req = req.header("Authorization", auth);
        }

        tracing::debug!(method = rpc_method, id = %envelope.id, url = %endpoint, "sending JSON-RPC request");
        if let Some(body) = &req.body {
            tracing::trace!("---> {body}");
        }

        let resp = self.fetcher.fetch(req).await?;
        let json = resp.json()?;
        tracing::trace!("<--- {json}");

        RpcResponseEnvelope::from_value(&endpoint.to_string(), json)?.into_result()
    }

    /// Like [`request`](Self::request), deserializing the result into `T`.
    ///
    /// An absent result is deserialized from `null`.
    pub async fn request_as<T: DeserializeOwned>(
        &self,
        rpc_url: &str,
        rpc_method: &str,
        rpc_params: Vec<RpcParam>,
        options: RequestOptions,
    ) -> Result<T, FetchError> {
        let result = self
            .request(rpc_url, rpc_method, rpc_params, options)
            .await?
            .unwrap_or(Value::Null);
        Ok(serde_json::from_value(result)?)
    }

    // Best-effort: every failure is swallowed and never reaches the caller.
    async fn prime_credentials(&self, endpoint: &Endpoint) {
        let req = FetchRequest::get(endpoint.effective_url())
            .credentials(CredentialsMode::Include)
            .mode(RequestMode::NoCors);
        if let Err(e) = self.fetcher.fetch(req).await {
            tracing::debug!(url = %endpoint, error = %e, "credential priming failed, continuing");
        }
    }
}

impl std::fmt::Debug for JsonRpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonRpcClient")
            .field("ids", &self.ids)
            .finish_non_exhaustive()
    }
}

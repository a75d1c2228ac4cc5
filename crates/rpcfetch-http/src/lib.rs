//! rpcfetch-http: the HTTP transport for rpcfetch.
//!
//! # Quick start
//! ```rust,no_run
//! # async fn demo() -> Result<(), rpcfetch_core::FetchError> {
//! use rpcfetch_core::RequestOptions;
//! use rpcfetch_http::{json_rpc_client, HttpFetcherConfig};
//!
//! let client = json_rpc_client(HttpFetcherConfig::default())?;
//! let chain_id = client
//!     .request("https://rpc.example.com/", "eth_chainId", vec![], RequestOptions::default())
//!     .await?;
//! # let _ = chain_id;
//! # Ok(())
//! # }
//! ```

pub mod fetcher;

use std::sync::Arc;

use rpcfetch_core::{FetchError, JsonRpcClient};

pub use fetcher::{HttpFetcher, HttpFetcherConfig};

/// Build a `JsonRpcClient` over a fresh `HttpFetcher`.
pub fn json_rpc_client(config: HttpFetcherConfig) -> Result<JsonRpcClient, FetchError> {
    Ok(JsonRpcClient::new(Arc::new(HttpFetcher::new(config)?)))
}

//! `reqwest`-backed [`TimeoutFetcher`].
//!
//! Credential modes map onto two clients sharing one cookie jar:
//! - `Include` uses the client attached to the jar, so cookies set by a
//!   priming response are sent on the following call
//! - `SameOrigin` and `Omit` use a client without the jar; a native client
//!   has no document origin, so neither sends cookies

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::cookie::Jar;

use rpcfetch_core::error::FetchError;
use rpcfetch_core::fetch::{
    CacheMode, CredentialsMode, FetchMethod, FetchRequest, FetchResponse, RequestMode,
    TimeoutFetcher,
};

/// Configuration for `HttpFetcher`.
#[derive(Debug, Clone)]
pub struct HttpFetcherConfig {
    /// Upper bound on one exchange: connect, send and read the full body.
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpFetcherConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            user_agent: format!("rpcfetch/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// HTTP fetcher with a hard per-request timeout and a shared cookie jar.
pub struct HttpFetcher {
    credentialed: reqwest::Client,
    anonymous: reqwest::Client,
    jar: Arc<Jar>,
    request_timeout: Duration,
}

impl HttpFetcher {
    pub fn new(config: HttpFetcherConfig) -> Result<Self, FetchError> {
        let jar = Arc::new(Jar::default());
        let credentialed = client_builder(&config)
            .cookie_provider(jar.clone())
            .build()
            .map_err(|e| FetchError::Network(format!("failed to build HTTP client: {e}")))?;
        let anonymous = client_builder(&config)
            .build()
            .map_err(|e| FetchError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            credentialed,
            anonymous,
            jar,
            request_timeout: config.request_timeout,
        })
    }

    /// Default configuration with a different timeout.
    pub fn with_timeout(request_timeout: Duration) -> Result<Self, FetchError> {
        Self::new(HttpFetcherConfig {
            request_timeout,
            ..HttpFetcherConfig::default()
        })
    }

    /// Cookies collected by `Include` requests.
    pub fn cookie_jar(&self) -> &Arc<Jar> {
        &self.jar
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.request_timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

fn client_builder(config: &HttpFetcherConfig) -> reqwest::ClientBuilder {
    reqwest::Client::builder()
        .timeout(config.request_timeout)
        .user_agent(config.user_agent.as_str())
}

fn without_userinfo(url: &reqwest::Url) -> String {
    let mut bare = url.clone();
    if bare.set_username("").is_err() || bare.set_password(None).is_err() {
        return format!("{}://{}", bare.scheme(), bare.host_str().unwrap_or_default());
    }
    bare.to_string()
}

#[async_trait]
impl TimeoutFetcher for HttpFetcher {
    async fn fetch(&self, req: FetchRequest) -> Result<FetchResponse, FetchError> {
        let client = match req.credentials {
            CredentialsMode::Include => &self.credentialed,
            CredentialsMode::SameOrigin | CredentialsMode::Omit => &self.anonymous,
        };
        let method = match req.method {
            FetchMethod::Get => reqwest::Method::GET,
            FetchMethod::Post => reqwest::Method::POST,
        };

        // reqwest would turn userinfo into its own Basic header.
        let url = reqwest::Url::parse(&req.url).map_err(|e| FetchError::InvalidUrl {
            url: req.url.clone(),
            reason: e.to_string(),
        })?;
        if !url.username().is_empty() || url.password().is_some() {
            return Err(FetchError::InvalidUrl {
                url: without_userinfo(&url),
                reason: "credentials must not be embedded in a fetch URL".into(),
            });
        }

        tracing::debug!(method = %req.method, url = %url, credentials = ?req.credentials, "fetch");

        let mut builder = client.request(method, url);
        for (name, value) in &req.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if req.cache == CacheMode::NoStore {
            builder = builder.header(reqwest::header::CACHE_CONTROL, "no-store");
        }
        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let mode = req.mode;
        let exchange = async move {
            let resp = builder.send().await?;
            let status = resp.status().as_u16();
            // Opaque: the caller never looks at the body.
            if mode == RequestMode::NoCors {
                return Ok(FetchResponse::new(status, Vec::new()));
            }
            let body = resp.bytes().await?;
            Ok::<_, reqwest::Error>(FetchResponse::new(status, body.to_vec()))
        };

        match tokio::time::timeout(self.request_timeout, exchange).await {
            Ok(Ok(resp)) => {
                tracing::debug!(status = resp.status, bytes = resp.body.len(), "fetch complete");
                Ok(resp)
            }
            Ok(Err(e)) if e.is_timeout() => Err(FetchError::Timeout {
                ms: self.timeout_ms(),
            }),
            Ok(Err(e)) => Err(FetchError::Network(e.to_string())),
            Err(_) => Err(FetchError::Timeout {
                ms: self.timeout_ms(),
            }),
        }
    }
}

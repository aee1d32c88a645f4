//! HTTP tile source
//!
//! All fetchers share one [`reqwest::Client`] so connections to the tile server are
//! pooled across every concurrent worker. No request timeout is configured beyond
//! the transport defaults.

use async_trait::async_trait;
use bytes::Bytes;
use once_cell::sync::Lazy;
use reqwest::Client;
use std::sync::Arc;
use tracing::debug;

use super::{FetcherError, FetcherResult, TileSource};

/// User agent sent with every tile request
pub const USER_AGENT: &str = concat!("tile-fetcher/", env!("CARGO_PKG_VERSION"));

/// Process-wide HTTP client
static GLOBAL_HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|e| {
            panic!("FATAL: Failed to build HTTP client: {}. Check system TLS configuration.", e);
        })
});

/// Get the shared HTTP client (cheap clone of an internal `Arc`)
pub fn global_http_client() -> Client {
    GLOBAL_HTTP_CLIENT.clone()
}

/// Fetches tiles over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpTileSource {
    client: Client,
}

impl HttpTileSource {
    /// Create a source using `client`
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create a source backed by the shared client
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new(global_http_client()))
    }
}

#[async_trait]
impl TileSource for HttpTileSource {
    async fn fetch(&self, url: &str) -> FetcherResult<Bytes> {
        debug!(url, "GET tile");

        let response = self.client.get(url).send().await.map_err(FetcherError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetcherError::HttpStatus {
                status: status.as_u16(),
            });
        }

        response.bytes().await.map_err(FetcherError::from)
    }
}

impl From<reqwest::Error> for FetcherError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FetcherError::Timeout(error.to_string())
        } else if error.is_connect() {
            FetcherError::Connection(error.to_string())
        } else if let Some(status) = error.status() {
            FetcherError::HttpStatus {
                status: status.as_u16(),
            }
        } else {
            FetcherError::Network(error.to_string())
        }
    }
}

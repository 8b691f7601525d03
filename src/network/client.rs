//! HTTP client for reading another node's chain.

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::blockchain::Block;

/// Connection timeout for peer requests.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PeerError {
    #[error("peer unreachable: {0}")]
    Unreachable(String),

    #[error("peer timed out")]
    Timeout,

    #[error("peer answered with status {0}")]
    BadStatus(u16),

    #[error("malformed chain response: {0}")]
    Malformed(String),
}

/// What a peer reports from `GET /chain`.
#[derive(Debug, Clone, Deserialize)]
pub struct PeerChain {
    pub chain: Vec<Block>,
    pub length: usize,
}

impl PeerChain {
    /// Reject responses whose declared length disagrees with the blocks sent.
    pub fn checked(self) -> Result<Self, PeerError> {
        if self.length != self.chain.len() {
            return Err(PeerError::Malformed(format!(
                "length {} but {} blocks",
                self.length,
                self.chain.len()
            )));
        }
        Ok(self)
    }
}

/// Source of remote chains, keyed by `host[:port]`.
pub trait ChainSource {
    fn fetch_chain(&self, peer: &str) -> impl Future<Output = Result<PeerChain, PeerError>>;
}

/// Fetches chains over HTTP with a reusable connection pool.
#[derive(Debug, Clone)]
pub struct HttpChainSource {
    http_client: reqwest::Client,
}

impl HttpChainSource {
    pub fn with_timeout(timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT.min(timeout))
            .build()
            .unwrap_or_default();
        Self { http_client }
    }
}

impl ChainSource for HttpChainSource {
    async fn fetch_chain(&self, peer: &str) -> Result<PeerChain, PeerError> {
        let url = format!("http://{peer}/chain");

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                PeerError::Timeout
            } else {
                PeerError::Unreachable(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            return Err(PeerError::BadStatus(response.status().as_u16()));
        }

        response
            .json::<PeerChain>()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PeerError::Timeout
                } else {
                    PeerError::Malformed(e.to_string())
                }
            })?
            .checked()
    }
}

//! Network fetching abstraction
//!
//! The handler hands transport failures back to its caller as-is; it never
//! retries or substitutes a response.

mod http;

pub use http::HttpFetcher;

use crate::exchange::Response;
use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// Transport-level fetch failures
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("Response body from {url} exceeds {limit} bytes")]
    BodyTooLarge { url: String, limit: u64 },

    #[error("Network request to {url} was aborted")]
    Aborted { url: String },
}

impl FetchError {
    /// Whether retrying the same request could succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Aborted { .. })
    }
}

/// Live network access
#[async_trait]
pub trait NetworkFetcher: Send + Sync {
    /// Fetch `url`; any HTTP status is a response, not an error
    async fn fetch(&self, url: &Url) -> Result<Response, FetchError>;
}

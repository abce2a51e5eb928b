//! HTTP fetcher backed by ureq
//!
//! ureq is blocking, so each fetch runs on tokio's blocking pool.

use crate::config::schema::NetworkConfig;
use crate::exchange::Response;
use crate::fetch::{FetchError, NetworkFetcher};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use ureq::Agent;
use url::Url;

/// Fetcher issuing plain GET requests
#[derive(Clone)]
pub struct HttpFetcher {
    agent: Agent,
    user_agent: String,
    max_body_bytes: u64,
}

impl HttpFetcher {
    /// Create a fetcher from network settings
    pub fn new(config: &NetworkConfig) -> Self {
        let timeout = (config.timeout_secs > 0).then(|| Duration::from_secs(config.timeout_secs));
        let agent_config = Agent::config_builder()
            .timeout_global(timeout)
            .http_status_as_error(false)
            .build();

        Self {
            agent: Agent::new_with_config(agent_config),
            user_agent: config.user_agent.clone(),
            max_body_bytes: config.max_body_bytes,
        }
    }

    fn fetch_blocking(&self, url: &Url) -> Result<Response, FetchError> {
        let transport = |e: ureq::Error| FetchError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let mut response = self
            .agent
            .get(url.as_str())
            .header("User-Agent", self.user_agent.as_str())
            .call()
            .map_err(transport)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response
            .body_mut()
            .with_config()
            .limit(self.max_body_bytes)
            .read_to_vec()
            .map_err(|e| match e {
                ureq::Error::BodyExceedsLimit(_) => FetchError::BodyTooLarge {
                    url: url.to_string(),
                    limit: self.max_body_bytes,
                },
                other => transport(other),
            })?;

        Ok(Response {
            url: url.to_string(),
            status,
            headers,
            body,
        })
    }
}

#[async_trait]
impl NetworkFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Response, FetchError> {
        debug!("Fetching {} from network", url);

        let fetcher = self.clone();
        let target = url.clone();
        tokio::task::spawn_blocking(move || fetcher.fetch_blocking(&target))
            .await
            .map_err(|_| FetchError::Aborted {
                url: url.to_string(),
            })?
    }
}

//! Precache controller: the injected collaborators a handler reads from

use crate::error::PrecacheResult;
use crate::exchange::Response;
use crate::fetch::NetworkFetcher;
use crate::handler::factory::{create_handler, HandlerConfig};
use crate::handler::request_handler::RequestHandler;
use crate::precache::{CacheKey, EntryResolver, PrecacheEntry, UrlNormalizer};
use crate::store::CacheStore;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Binds an entry resolver, a cache store and a network fetcher.
///
/// Holds no mutable state; share it behind an `Arc` across handlers.
pub struct PrecacheController {
    resolver: Arc<dyn EntryResolver>,
    store: Arc<dyn CacheStore>,
    fetcher: Arc<dyn NetworkFetcher>,
    normalizer: UrlNormalizer,
}

impl PrecacheController {
    /// Create a controller with default URL normalization
    pub fn new(
        resolver: Arc<dyn EntryResolver>,
        store: Arc<dyn CacheStore>,
        fetcher: Arc<dyn NetworkFetcher>,
    ) -> Self {
        Self {
            resolver,
            store,
            fetcher,
            normalizer: UrlNormalizer::default(),
        }
    }

    /// Replace the URL normalizer
    pub fn with_normalizer(mut self, normalizer: UrlNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Namespace of the bound store
    pub fn cache_name(&self) -> &str {
        self.store.cache_name()
    }

    pub fn store(&self) -> &dyn CacheStore {
        self.store.as_ref()
    }

    pub fn fetcher(&self) -> &dyn NetworkFetcher {
        self.fetcher.as_ref()
    }

    pub fn normalizer(&self) -> &UrlNormalizer {
        &self.normalizer
    }

    /// Find the entry a request URL maps to, trying each URL variation
    pub fn resolve(&self, url: &Url) -> Option<PrecacheEntry> {
        self.normalizer
            .candidates(url)
            .iter()
            .find_map(|candidate| self.resolver.lookup(candidate))
    }

    /// Cache key for a request URL, if it maps to an entry
    pub fn cache_key_for_url(&self, url: &Url) -> Option<CacheKey> {
        self.resolve(url).map(|entry| entry.cache_key())
    }

    /// Stored response for a request URL, without any network fallback
    pub async fn match_precache(&self, url: &Url) -> PrecacheResult<Option<Response>> {
        match self.cache_key_for_url(url) {
            Some(key) => self.store.get(&key).await,
            None => {
                debug!("{} is not precached", url);
                Ok(None)
            }
        }
    }

    /// Create a handler bound to this controller
    pub fn create_handler(self: &Arc<Self>, fallback_to_network: bool) -> RequestHandler {
        create_handler(Arc::clone(self), HandlerConfig { fallback_to_network })
    }
}

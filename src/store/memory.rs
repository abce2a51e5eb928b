//! In-memory store for embedding and tests

use crate::error::PrecacheResult;
use crate::exchange::Response;
use crate::precache::{CacheKey, CacheNamespace};
use crate::store::CacheStore;
use async_trait::async_trait;
use std::collections::HashMap;

/// Immutable map of cache keys to responses
#[derive(Debug, Clone)]
pub struct MemoryStore {
    cache_name: String,
    responses: HashMap<String, Response>,
}

impl MemoryStore {
    /// Create an empty store bound to `namespace`
    pub fn new(namespace: &CacheNamespace) -> Self {
        Self {
            cache_name: namespace.to_string(),
            responses: HashMap::new(),
        }
    }

    /// Add a response under `key` while building the store
    pub fn with_response(mut self, key: &CacheKey, response: Response) -> Self {
        self.responses.insert(key.to_string(), response);
        self
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    fn cache_name(&self) -> &str {
        &self.cache_name
    }

    async fn get(&self, key: &CacheKey) -> PrecacheResult<Option<Response>> {
        Ok(self.responses.get(key.as_str()).cloned())
    }
}

//! Read-only cache store abstraction
//!
//! The handler only ever reads from a store. Populating, evicting and
//! warming belong to whatever tool owns the namespace.

mod disk;
mod memory;

pub use disk::{DiskStore, StoredResponse};
pub use memory::MemoryStore;

use crate::error::PrecacheResult;
use crate::exchange::Response;
use crate::precache::CacheKey;
use async_trait::async_trait;

/// Key → stored response lookup, bound to one namespace
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Namespace this store reads from
    fn cache_name(&self) -> &str;

    /// Stored response for `key`, `None` on a miss
    async fn get(&self, key: &CacheKey) -> PrecacheResult<Option<Response>>;
}

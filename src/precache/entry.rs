//! Precache entries and cache key derivation
//!
//! A revisioned entry is stored under its URL with the revision appended as
//! a query parameter, so a new revision never collides with stale content.
//! Unrevisioned URLs are assumed immutable and keyed by the URL itself.

use std::fmt;
use url::Url;

/// Query parameter carrying the revision in a cache key.
///
/// Shared with every tool that populates the store; changing it orphans
/// all previously stored responses.
pub const REVISION_PARAM: &str = "__WB_REVISION__";

/// A registered asset eligible for cache-first serving
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecacheEntry {
    /// Absolute URL of the asset, without fragment
    pub url: Url,
    /// Opaque content revision, `None` if the URL is immutable
    pub revision: Option<String>,
}

impl PrecacheEntry {
    /// Create an entry; an empty revision counts as no revision
    pub fn new(mut url: Url, revision: Option<String>) -> Self {
        url.set_fragment(None);
        Self {
            url,
            revision: revision.filter(|r| !r.is_empty()),
        }
    }

    /// Derive the key this entry is stored under
    pub fn cache_key(&self) -> CacheKey {
        let mut url = self.url.clone();
        if let Some(revision) = &self.revision {
            url.query_pairs_mut().append_pair(REVISION_PARAM, revision);
        }
        CacheKey(url)
    }
}

/// Exact key addressing a stored response
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(Url);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//! Precache entries, cache keys and namespaces
//!
//! Maps the logical identity of an asset (URL + revision) to the key its
//! response is stored under.
//!
//! # Keying
//!
//! | Entry | Cache key |
//! |-------|-----------|
//! | `/app.js` | `<scope origin>/app.js` |
//! | `/app.js` rev `abc123` | `<scope origin>/app.js?__WB_REVISION__=abc123` |
//!
//! Responses live in the namespace `workbox-precache-v2-<scope url>`.

pub mod entry;
pub mod manifest;
pub mod namespace;
pub mod normalize;
mod resolver;

pub use entry::{CacheKey, PrecacheEntry, REVISION_PARAM};
pub use manifest::{ManifestItem, PrecacheManifest};
pub use namespace::{CacheNamespace, Scope, DEFAULT_CACHE_PREFIX, PRECACHE_CACHE_ID};
pub use normalize::UrlNormalizer;
pub use resolver::EntryResolver;

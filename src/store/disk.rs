//! Directory-backed read-only store
//!
//! Layout, as written by whatever populates the cache:
//!
//! ```text
//! <root>/<hash(namespace)>/<hash(cache key)>.json   metadata
//! <root>/<hash(namespace)>/<hash(cache key)>.body   raw body
//! ```
//!
//! Hashes are the first 16 hex chars of SHA256.

use crate::error::{PrecacheError, PrecacheResult};
use crate::exchange::Response;
use crate::precache::{CacheKey, CacheNamespace};
use crate::store::CacheStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// Metadata file contents for one stored response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredResponse {
    /// Cache key the response was stored under
    pub key: String,
    /// URL the response was originally fetched from
    pub url: String,
    /// HTTP status code
    pub status: u16,
    /// Header name/value pairs
    #[serde(default)]
    pub headers: Vec<(String, String)>,
    /// When the response was stored
    pub stored_at: DateTime<Utc>,
}

/// Hash a name into a fixed-length file stem
fn hash_name(name: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    let result = hasher.finalize();

    // First 16 hex characters (8 bytes)
    hex::encode(&result[..8])
}

/// Store reading responses from a namespace directory
#[derive(Debug, Clone)]
pub struct DiskStore {
    cache_name: String,
    dir: PathBuf,
}

impl DiskStore {
    /// Open the namespace directory under `root`; the directory need not exist
    pub fn open(root: &Path, namespace: &CacheNamespace) -> Self {
        let dir = root.join(hash_name(namespace.as_str()));
        debug!("Cache {} maps to {}", namespace, dir.display());
        Self {
            cache_name: namespace.to_string(),
            dir,
        }
    }

    /// Namespace directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Metadata and body paths for `key`
    pub fn paths_for(&self, key: &CacheKey) -> (PathBuf, PathBuf) {
        let stem = hash_name(key.as_str());
        (
            self.dir.join(format!("{}.json", stem)),
            self.dir.join(format!("{}.body", stem)),
        )
    }

    fn read_error(key: &CacheKey, path: &Path, reason: impl std::fmt::Display) -> PrecacheError {
        PrecacheError::StoreRead {
            key: key.to_string(),
            reason: format!("{}: {}", path.display(), reason),
        }
    }
}

#[async_trait]
impl CacheStore for DiskStore {
    fn cache_name(&self) -> &str {
        &self.cache_name
    }

    async fn get(&self, key: &CacheKey) -> PrecacheResult<Option<Response>> {
        let (meta_path, body_path) = self.paths_for(key);

        let content = match fs::read_to_string(&meta_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No stored response for {}", key);
                return Ok(None);
            }
            Err(e) => return Err(Self::read_error(key, &meta_path, e)),
        };

        let stored: StoredResponse =
            serde_json::from_str(&content).map_err(|e| Self::read_error(key, &meta_path, e))?;

        if stored.key != key.as_str() {
            warn!(
                "Stored response at {} belongs to {}, not {}",
                meta_path.display(),
                stored.key,
                key
            );
            return Ok(None);
        }

        let body = fs::read(&body_path)
            .await
            .map_err(|e| Self::read_error(key, &body_path, e))?;

        Ok(Some(Response {
            url: stored.url,
            status: stored.status,
            headers: stored.headers,
            body,
        }))
    }
}

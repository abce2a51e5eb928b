//! Precache manifest: the registered entry table
//!
//! A manifest is a JSON array whose items are either bare URL strings or
//! `{"url": ..., "revision": ...}` objects:
//!
//! ```json
//! ["/index.html", {"url": "/app.js", "revision": "abc123"}]
//! ```

use crate::error::{PrecacheError, PrecacheResult};
use crate::precache::entry::{CacheKey, PrecacheEntry};
use crate::precache::namespace::Scope;
use crate::precache::normalize::UrlNormalizer;
use crate::precache::resolver::EntryResolver;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;
use tracing::debug;
use url::Url;

/// One item as written in a manifest file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ManifestItem {
    /// URL without revision
    Url(String),
    /// URL with optional revision
    Entry {
        url: String,
        #[serde(default)]
        revision: Option<String>,
    },
}

impl ManifestItem {
    fn parts(&self) -> (&str, Option<&str>) {
        match self {
            Self::Url(url) => (url, None),
            Self::Entry { url, revision } => (url, revision.as_deref()),
        }
    }
}

impl From<&str> for ManifestItem {
    fn from(url: &str) -> Self {
        Self::Url(url.to_string())
    }
}

/// Entry table keyed by normalized absolute URL.
///
/// Entry URLs go through the same [`UrlNormalizer`] as request URLs, so an
/// entry registered with a query string is still found when the query is
/// ignored for matching.
#[derive(Debug, Clone)]
pub struct PrecacheManifest {
    scope: Scope,
    normalizer: UrlNormalizer,
    entries: BTreeMap<String, PrecacheEntry>,
}

impl PrecacheManifest {
    /// Create an empty manifest resolving URLs against `scope`
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            normalizer: UrlNormalizer::default(),
            entries: BTreeMap::new(),
        }
    }

    /// Re-key all entries with `normalizer`.
    ///
    /// Must match the normalizer the controller applies to requests.
    pub fn with_normalizer(self, normalizer: UrlNormalizer) -> PrecacheResult<Self> {
        let mut manifest = Self {
            scope: self.scope,
            normalizer,
            entries: BTreeMap::new(),
        };
        for entry in self.entries.into_values() {
            manifest.insert(entry)?;
        }
        Ok(manifest)
    }

    /// Build a manifest from items, failing on the first conflict
    pub fn from_items<I, T>(scope: Scope, items: I) -> PrecacheResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<ManifestItem>,
    {
        let mut manifest = Self::new(scope);
        for item in items {
            manifest.add(item.into())?;
        }
        Ok(manifest)
    }

    /// Load a manifest file, matching with the default normalizer
    pub async fn load(path: &Path, scope: Scope) -> PrecacheResult<Self> {
        Self::load_with(path, scope, UrlNormalizer::default()).await
    }

    /// Load a manifest file, keying entries with `normalizer`
    pub async fn load_with(
        path: &Path,
        scope: Scope,
        normalizer: UrlNormalizer,
    ) -> PrecacheResult<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| PrecacheError::io(format!("reading manifest {}", path.display()), e))?;

        let items: Vec<ManifestItem> =
            serde_json::from_str(&content).map_err(|e| PrecacheError::ManifestParse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        debug!("Loaded {} manifest items from {}", items.len(), path.display());
        let mut manifest = Self::new(scope).with_normalizer(normalizer)?;
        for item in items {
            manifest.add(item)?;
        }
        Ok(manifest)
    }

    /// Register one item.
    ///
    /// Re-adding a URL with the same revision is a no-op; a different
    /// revision, or a different URL that normalizes to the same one, is a
    /// conflict.
    pub fn add(&mut self, item: ManifestItem) -> PrecacheResult<()> {
        let (raw_url, revision) = item.parts();
        if raw_url.trim().is_empty() {
            return Err(PrecacheError::InvalidManifestEntry(
                "entry has an empty url".to_string(),
            ));
        }

        let url = self.scope.resolve(raw_url)?;
        self.insert(PrecacheEntry::new(url, revision.map(str::to_string)))
    }

    /// Two entries that normalize to the same URL must be identical
    fn insert(&mut self, entry: PrecacheEntry) -> PrecacheResult<()> {
        let id = self.normalizer.normalize(&entry.url).to_string();

        match self.entries.get(&id) {
            Some(existing) if *existing != entry => Err(PrecacheError::ConflictingEntries {
                first: existing.cache_key().to_string(),
                second: entry.cache_key().to_string(),
            }),
            Some(_) => Ok(()),
            None => {
                self.entries.insert(id, entry);
                Ok(())
            }
        }
    }

    /// Scope URLs are resolved against
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Entries in URL order
    pub fn entries(&self) -> impl Iterator<Item = &PrecacheEntry> {
        self.entries.values()
    }

    /// Cache keys of all entries, in URL order
    pub fn cache_keys(&self) -> Vec<CacheKey> {
        self.entries().map(PrecacheEntry::cache_key).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl EntryResolver for PrecacheManifest {
    fn lookup(&self, url: &Url) -> Option<PrecacheEntry> {
        self.entries.get(url.as_str()).cloned()
    }
}

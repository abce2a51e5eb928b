//! Error types for precache
//!
//! All modules use `PrecacheResult<T>` as their return type.

use crate::fetch::FetchError;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for precache operations
pub type PrecacheResult<T> = Result<T, PrecacheError>;

/// Diagnostic payload attached to a missing precache entry.
///
/// Serializes as `{"url": ..., "cacheName": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingEntryDetails {
    /// Fully qualified URL of the request that missed
    pub url: String,
    /// Namespace of the store that was consulted
    pub cache_name: String,
}

/// All errors that can occur in precache
#[derive(Error, Debug)]
pub enum PrecacheError {
    // Handler errors
    #[error("No cached response for {} in cache {}", .details.url, .details.cache_name)]
    MissingPrecacheEntry { details: MissingEntryDetails },

    // Manifest errors
    #[error("Conflicting precache entries for the same URL: {first} and {second}")]
    ConflictingEntries { first: String, second: String },

    #[error("Invalid precache entry: {0}")]
    InvalidManifestEntry(String),

    #[error("Failed to parse manifest {path}: {reason}")]
    ManifestParse { path: PathBuf, reason: String },

    #[error("Invalid URL '{input}': {source}")]
    UrlParse {
        input: String,
        #[source]
        source: url::ParseError,
    },

    // Store errors
    #[error("Failed to read cached response for {key}: {reason}")]
    StoreRead { key: String, reason: String },

    // Network errors
    #[error(transparent)]
    Fetch(#[from] FetchError),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Unknown configuration key: {0}")]
    ConfigUnknownKey(String),

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("{0}")]
    User(String),
}

impl PrecacheError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a URL parse error for the given input
    pub fn url(input: impl Into<String>, source: url::ParseError) -> Self {
        Self::UrlParse {
            input: input.into(),
            source,
        }
    }

    /// Create a missing entry error
    pub fn missing_entry(url: impl Into<String>, cache_name: impl Into<String>) -> Self {
        Self::MissingPrecacheEntry {
            details: MissingEntryDetails {
                url: url.into(),
                cache_name: cache_name.into(),
            },
        }
    }

    /// Stable kebab-case error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingPrecacheEntry { .. } => "missing-precache-entry",
            Self::ConflictingEntries { .. } => "add-to-cache-list-conflicting-entries",
            Self::InvalidManifestEntry(_) => "add-to-cache-list-unexpected-type",
            Self::ManifestParse { .. } => "manifest-parse",
            Self::UrlParse { .. } => "invalid-url",
            Self::StoreRead { .. } => "store-read",
            Self::Fetch(_) => "network-fetch",
            Self::ConfigInvalid { .. } | Self::ConfigUnknownKey(_) | Self::ConfigDirCreate { .. } => {
                "config"
            }
            Self::Io { .. } => "io",
            Self::Json(_) | Self::TomlSerialize(_) => "serialization",
            Self::User(_) => "user",
        }
    }

    /// Diagnostic details, present only on missing entries
    pub fn details(&self) -> Option<&MissingEntryDetails> {
        match self {
            Self::MissingPrecacheEntry { details } => Some(details),
            _ => None,
        }
    }

    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Fetch(e) if e.is_transient())
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::MissingPrecacheEntry { .. } => {
                Some("Populate the cache for this entry, or allow network fallback")
            }
            Self::ConflictingEntries { .. } => {
                Some("Each URL may appear once per manifest; bump a single revision instead")
            }
            Self::ConfigUnknownKey(_) => Some("Run: precache config show"),
            _ => None,
        }
    }
}

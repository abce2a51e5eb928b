//! Configuration schema for precache
//!
//! Configuration is stored at `~/.config/precache/config.toml`

use crate::error::{PrecacheError, PrecacheResult};
use crate::precache::{CacheNamespace, Scope, UrlNormalizer, DEFAULT_CACHE_PREFIX};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Precache resolution and lookup settings
    pub precache: PrecacheConfig,

    /// Network fallback settings
    pub network: NetworkConfig,
}

impl Config {
    /// Set a value by dot-separated key (e.g. `precache.origin`)
    pub fn set(&mut self, key: &str, value: &str) -> PrecacheResult<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["general", "verbose"] => self.general.verbose = parse_bool(value)?,
            ["general", "log_format"] => match value {
                "text" | "json" => self.general.log_format = value.to_string(),
                _ => {
                    return Err(PrecacheError::User(format!(
                        "Invalid log format: {}. Use text or json",
                        value
                    )))
                }
            },

            ["precache", "origin"] => self.precache.origin = value.to_string(),
            ["precache", "scope"] => self.precache.scope = value.to_string(),
            ["precache", "cache_prefix"] => self.precache.cache_prefix = value.to_string(),
            ["precache", "manifest"] => self.precache.manifest = non_empty(value).map(PathBuf::from),
            ["precache", "cache_dir"] => {
                self.precache.cache_dir = non_empty(value).map(PathBuf::from)
            }
            ["precache", "fallback_to_network"] => {
                self.precache.fallback_to_network = parse_bool(value)?
            }
            ["precache", "strip_query"] => self.precache.strip_query = parse_bool(value)?,
            ["precache", "ignore_url_parameters"] => {
                self.precache.ignore_url_parameters = value
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
            }
            ["precache", "directory_index"] => {
                self.precache.directory_index = non_empty(value).map(str::to_string)
            }
            ["precache", "clean_urls"] => self.precache.clean_urls = parse_bool(value)?,

            ["network", "timeout_secs"] => self.network.timeout_secs = parse_u64(value)?,
            ["network", "max_body_bytes"] => self.network.max_body_bytes = parse_u64(value)?,
            ["network", "user_agent"] => self.network.user_agent = value.to_string(),

            _ => return Err(PrecacheError::ConfigUnknownKey(key.to_string())),
        }

        Ok(())
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

fn parse_bool(value: &str) -> PrecacheResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(PrecacheError::User(format!(
            "Invalid boolean value: {}. Use true/false",
            value
        ))),
    }
}

fn parse_u64(value: &str) -> PrecacheResult<u64> {
    value
        .parse()
        .map_err(|_| PrecacheError::User(format!("Invalid number: {}", value)))
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,

    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            log_format: "text".to_string(),
        }
    }
}

/// Precache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrecacheConfig {
    /// Origin requests are resolved against
    pub origin: String,

    /// Installation path below the origin
    pub scope: String,

    /// First part of the cache namespace
    pub cache_prefix: String,

    /// Manifest file listing precache entries
    pub manifest: Option<PathBuf>,

    /// Root of the on-disk cache store (default: user cache dir)
    pub cache_dir: Option<PathBuf>,

    /// Fetch from the network on a cache miss
    pub fallback_to_network: bool,

    /// Ignore the whole query string when matching entries
    pub strip_query: bool,

    /// Query parameter prefixes ignored when `strip_query` is off
    pub ignore_url_parameters: Vec<String>,

    /// File tried for URLs ending in `/`
    pub directory_index: Option<String>,

    /// Try `<path>.html` for extensionless URLs
    pub clean_urls: bool,
}

impl Default for PrecacheConfig {
    fn default() -> Self {
        let normalizer = UrlNormalizer::default();
        Self {
            origin: "http://localhost".to_string(),
            scope: "/".to_string(),
            cache_prefix: DEFAULT_CACHE_PREFIX.to_string(),
            manifest: None,
            cache_dir: None,
            fallback_to_network: true,
            strip_query: normalizer.strip_query,
            ignore_url_parameters: normalizer.ignore_parameter_prefixes,
            directory_index: normalizer.directory_index,
            clean_urls: normalizer.clean_urls,
        }
    }
}

impl PrecacheConfig {
    /// Parsed scope
    pub fn scope(&self) -> PrecacheResult<Scope> {
        Scope::new(&self.origin, &self.scope)
    }

    /// Namespace for the configured scope and prefix
    pub fn namespace(&self) -> PrecacheResult<CacheNamespace> {
        Ok(CacheNamespace::new(&self.cache_prefix, &self.scope()?))
    }

    /// URL normalizer built from the matching options
    pub fn normalizer(&self) -> UrlNormalizer {
        UrlNormalizer {
            strip_query: self.strip_query,
            ignore_parameter_prefixes: self.ignore_url_parameters.clone(),
            directory_index: self.directory_index.clone(),
            clean_urls: self.clean_urls,
        }
    }

    /// Effective store root
    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("precache")
        })
    }
}

/// Network fallback settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Overall request timeout in seconds (0 = none)
    pub timeout_secs: u64,

    /// Largest accepted response body
    pub max_body_bytes: u64,

    /// User-Agent header sent with fetches
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_body_bytes: 10 * 1024 * 1024,
            user_agent: format!("precache/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

//! Installation scope and the cache namespace derived from it

use crate::error::{PrecacheError, PrecacheResult};
use std::fmt;
use url::Url;

/// Cache identifier between prefix and scope in the namespace
pub const PRECACHE_CACHE_ID: &str = "precache-v2";

/// Default namespace prefix
pub const DEFAULT_CACHE_PREFIX: &str = "workbox";

/// Origin plus installation path that requests and manifest URLs resolve against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    url: Url,
}

impl Scope {
    /// Build a scope from an origin (`http://host:port`) and a path (`/app/`)
    pub fn new(origin: &str, path: &str) -> PrecacheResult<Self> {
        let origin_url = Url::parse(origin).map_err(|e| PrecacheError::url(origin, e))?;
        if origin_url.cannot_be_a_base() {
            return Err(PrecacheError::User(format!(
                "Origin '{}' cannot be used as a base URL",
                origin
            )));
        }

        let mut path = path.to_string();
        if !path.ends_with('/') {
            path.push('/');
        }

        let url = origin_url
            .join(&path)
            .map_err(|e| PrecacheError::url(path.as_str(), e))?;
        Ok(Self { url })
    }

    /// Full scope URL, always ending in `/`
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Serialized origin, without trailing slash
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    /// Resolve a possibly relative URL against the scope
    pub fn resolve(&self, input: &str) -> PrecacheResult<Url> {
        self.url.join(input).map_err(|e| PrecacheError::url(input, e))
    }
}

/// Name of the store partition holding precached responses
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheNamespace(String);

impl CacheNamespace {
    /// `<prefix>-precache-v2-<scope url>`, empty parts skipped
    pub fn new(prefix: &str, scope: &Scope) -> Self {
        let name = [prefix, PRECACHE_CACHE_ID, scope.url().as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("-");
        Self(name)
    }

    pub fn for_scope(scope: &Scope) -> Self {
        Self::new(DEFAULT_CACHE_PREFIX, scope)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_appends_trailing_slash() {
        let scope = Scope::new("http://localhost:3000", "/app").unwrap();
        assert_eq!(scope.url().as_str(), "http://localhost:3000/app/");
        assert_eq!(scope.origin(), "http://localhost:3000");
    }

    #[test]
    fn scope_resolves_relative_and_absolute() {
        let scope = Scope::new("http://localhost", "/sw/").unwrap();
        assert_eq!(scope.resolve("/url1").unwrap().as_str(), "http://localhost/url1");
        assert_eq!(scope.resolve("app.js").unwrap().as_str(), "http://localhost/sw/app.js");
        assert_eq!(
            scope.resolve("https://cdn.example.com/x.js").unwrap().as_str(),
            "https://cdn.example.com/x.js"
        );
    }

    #[test]
    fn scope_rejects_bad_origin() {
        assert!(Scope::new("not a url", "/").is_err());
        assert!(Scope::new("mailto:someone@example.com", "/").is_err());
    }

    #[test]
    fn namespace_includes_origin_and_scope() {
        let scope = Scope::new("http://localhost", "/test/workbox-precaching/sw/").unwrap();
        let ns = CacheNamespace::for_scope(&scope);
        assert_eq!(
            ns.as_str(),
            "workbox-precache-v2-http://localhost/test/workbox-precaching/sw/"
        );
    }

    #[test]
    fn namespace_skips_empty_prefix() {
        let scope = Scope::new("http://localhost", "/").unwrap();
        assert_eq!(
            CacheNamespace::new("", &scope).as_str(),
            "precache-v2-http://localhost/"
        );
    }
}

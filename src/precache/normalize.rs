//! Request URL normalization
//!
//! Turns an intercepted request URL into the candidate URLs an entry may be
//! registered under. The fragment never matters; query parameters are
//! dropped wholesale by default, or selectively by name prefix.

use crate::precache::entry::REVISION_PARAM;
use url::{form_urlencoded, Url};

/// Normalization and variation options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlNormalizer {
    /// Drop the entire query string
    pub strip_query: bool,
    /// Parameter name prefixes dropped when `strip_query` is off
    pub ignore_parameter_prefixes: Vec<String>,
    /// File tried for URLs ending in `/`
    pub directory_index: Option<String>,
    /// Try `<path>.html` for extensionless URLs
    pub clean_urls: bool,
}

impl Default for UrlNormalizer {
    fn default() -> Self {
        Self {
            strip_query: true,
            ignore_parameter_prefixes: vec!["utm_".to_string()],
            directory_index: Some("index.html".to_string()),
            clean_urls: true,
        }
    }
}

impl UrlNormalizer {
    /// Strip the fragment and interception-layer query parameters.
    ///
    /// Kept query segments retain their original encoding.
    pub fn normalize(&self, url: &Url) -> Url {
        let mut normalized = url.clone();
        normalized.set_fragment(None);

        let Some(query) = url.query() else {
            return normalized;
        };
        if self.strip_query {
            normalized.set_query(None);
            return normalized;
        }

        let segments: Vec<&str> = query.split('&').filter(|s| !s.is_empty()).collect();
        let kept: Vec<&str> = segments
            .iter()
            .copied()
            .filter(|segment| !self.is_ignored_segment(segment))
            .collect();

        if kept.is_empty() {
            normalized.set_query(None);
        } else if kept.len() != segments.len() {
            normalized.set_query(Some(&kept.join("&")));
        }
        normalized
    }

    /// Candidate lookup URLs, most specific first
    pub fn candidates(&self, url: &Url) -> Vec<Url> {
        let normalized = self.normalize(url);
        let path = normalized.path().to_string();
        let mut candidates = vec![normalized.clone()];

        if path.ends_with('/') {
            if let Some(index) = &self.directory_index {
                let mut with_index = normalized;
                with_index.set_path(&format!("{}{}", path, index));
                candidates.push(with_index);
            }
        } else if self.clean_urls {
            let mut with_html = normalized;
            with_html.set_path(&format!("{}.html", path));
            candidates.push(with_html);
        }

        candidates
    }

    fn is_ignored_segment(&self, segment: &str) -> bool {
        form_urlencoded::parse(segment.as_bytes())
            .next()
            .is_some_and(|(name, _)| self.is_ignored(&name))
    }

    fn is_ignored(&self, name: &str) -> bool {
        name == REVISION_PARAM
            || self
                .ignore_parameter_prefixes
                .iter()
                .any(|prefix| name.starts_with(prefix.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn selective() -> UrlNormalizer {
        UrlNormalizer {
            strip_query: false,
            ..UrlNormalizer::default()
        }
    }

    #[test]
    fn strips_fragment_and_query_by_default() {
        let normalizer = UrlNormalizer::default();
        let normalized = normalizer.normalize(&url("http://localhost/a.js?v=2#frag"));
        assert_eq!(normalized.as_str(), "http://localhost/a.js");
    }

    #[test]
    fn selective_drops_ignored_prefixes() {
        let normalized =
            selective().normalize(&url("http://localhost/a.js?utm_source=x&v=2&utm_medium=y"));
        assert_eq!(normalized.as_str(), "http://localhost/a.js?v=2");
    }

    #[test]
    fn selective_keeps_percent_encoding() {
        let normalizer = selective();
        let untouched = normalizer.normalize(&url("http://localhost/a.css?x=a%20b"));
        assert_eq!(untouched.as_str(), "http://localhost/a.css?x=a%20b");

        let filtered = normalizer.normalize(&url("http://localhost/a.css?utm_source=m&x=a%20b&y=c+d"));
        assert_eq!(filtered.as_str(), "http://localhost/a.css?x=a%20b&y=c+d");
    }

    #[test]
    fn selective_drops_encoded_parameter_names() {
        let normalized = selective().normalize(&url("http://localhost/a.js?utm%5Fsource=x&v=2"));
        assert_eq!(normalized.as_str(), "http://localhost/a.js?v=2");
    }

    #[test]
    fn selective_drops_revision_param() {
        let normalized = selective().normalize(&url("http://localhost/a.js?__WB_REVISION__=abc"));
        assert_eq!(normalized.as_str(), "http://localhost/a.js");
    }

    #[test]
    fn selective_keeps_url_without_query() {
        let normalized = selective().normalize(&url("http://localhost/a.js#x"));
        assert_eq!(normalized.as_str(), "http://localhost/a.js");
    }

    #[test]
    fn directory_index_candidate() {
        let candidates = UrlNormalizer::default().candidates(&url("http://localhost/docs/"));
        let as_str: Vec<&str> = candidates.iter().map(Url::as_str).collect();
        assert_eq!(
            as_str,
            vec!["http://localhost/docs/", "http://localhost/docs/index.html"]
        );
    }

    #[test]
    fn clean_url_candidate() {
        let candidates = UrlNormalizer::default().candidates(&url("http://localhost/about?x=1"));
        let as_str: Vec<&str> = candidates.iter().map(Url::as_str).collect();
        assert_eq!(
            as_str,
            vec!["http://localhost/about", "http://localhost/about.html"]
        );
    }

    #[test]
    fn variations_disabled() {
        let normalizer = UrlNormalizer {
            directory_index: None,
            clean_urls: false,
            ..UrlNormalizer::default()
        };
        assert_eq!(normalizer.candidates(&url("http://localhost/")).len(), 1);
        assert_eq!(normalizer.candidates(&url("http://localhost/about")).len(), 1);
    }
}

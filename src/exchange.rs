//! Request and response values passed between the handler and its collaborators

use chrono::{DateTime, Utc};
use std::borrow::Cow;
use url::Url;

/// An intercepted request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// HTTP method, uppercase
    pub method: String,
    /// Fully qualified request URL
    pub url: Url,
}

impl Request {
    /// Create a request with an explicit method
    pub fn new(method: impl Into<String>, url: Url) -> Self {
        Self {
            method: method.into().to_ascii_uppercase(),
            url,
        }
    }

    /// Create a GET request
    pub fn get(url: Url) -> Self {
        Self::new("GET", url)
    }

    /// Only GET requests are precache candidates
    pub fn is_get(&self) -> bool {
        self.method == "GET"
    }
}

/// A response, either read from the cache store or fetched from the network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// URL the response was produced for
    pub url: String,
    /// HTTP status code
    pub status: u16,
    /// Header name/value pairs in received order
    pub headers: Vec<(String, String)>,
    /// Raw body bytes
    pub body: Vec<u8>,
}

impl Response {
    /// Create a response with the given status and body
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            url: String::new(),
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Set the response URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Append a header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// First header value matching `name`, case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Body decoded as UTF-8, replacing invalid sequences
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Context of the interception that produced a request
#[derive(Debug, Clone)]
pub struct FetchEvent {
    /// When the request was intercepted
    pub received_at: DateTime<Utc>,
    /// Identifier of the client that issued the request, if known
    pub client_id: Option<String>,
}

impl FetchEvent {
    pub fn new() -> Self {
        Self {
            received_at: Utc::now(),
            client_id: None,
        }
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }
}

impl Default for FetchEvent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_method_normalized() {
        let url = Url::parse("http://localhost/a.js").unwrap();
        assert!(Request::new("get", url.clone()).is_get());
        assert!(!Request::new("POST", url).is_get());
    }

    #[test]
    fn response_header_lookup_ignores_case() {
        let response = Response::new(200, "body").with_header("Content-Type", "text/plain");
        assert_eq!(response.header("content-type"), Some("text/plain"));
        assert_eq!(response.header("etag"), None);
    }

    #[test]
    fn response_text_and_status() {
        let response = Response::new(404, "not here");
        assert_eq!(response.text(), "not here");
        assert!(!response.is_success());
        assert!(Response::new(204, Vec::new()).is_success());
    }
}

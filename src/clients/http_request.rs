//! HTTP request types for the schema-driven API client.
//!
//! This module provides the [`HttpRequest`] type and its builder. Requests
//! address absolute URLs, since every URL the client follows is handed out
//! by the server as a link, an action, or a pagination cursor.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// HTTP methods a resource type can permit.
///
/// Schema documents list permitted verbs as upper-case strings, so both
/// `Display` and `FromStr` use that spelling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources and invoking actions.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            _ => Err(format!("Invalid Http method {s}.")),
        }
    }
}

/// An HTTP request to be sent by [`HttpClient`](crate::clients::HttpClient).
///
/// Use [`HttpRequest::builder`] to construct requests with the builder pattern.
///
/// # Example
///
/// ```rust
/// use schema_api::clients::{HttpRequest, HttpMethod};
///
/// // GET request
/// let get_request = HttpRequest::builder(HttpMethod::Get, "http://localhost:8080/v1/publishes")
///     .build();
///
/// // POST request with JSON body
/// let post_request = HttpRequest::builder(HttpMethod::Post, "http://localhost:8080/v1/publishes")
///     .json_body(r#"{"name":"ping"}"#)
///     .build();
/// assert_eq!(post_request.body.as_deref(), Some(r#"{"name":"ping"}"#));
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The absolute URL for this request, query string included.
    pub url: String,
    /// The JSON-encoded request body, if any.
    pub body: Option<String>,
    /// Additional headers to include in the request.
    pub extra_headers: HashMap<String, String>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, url: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, url)
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    url: String,
    body: Option<String>,
    extra_headers: HashMap<String, String>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            http_method: method,
            url: url.into(),
            body: None,
            extra_headers: HashMap::new(),
        }
    }

    /// Sets an already encoded JSON body and the matching `Content-Type`.
    #[must_use]
    pub fn json_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self.extra_headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }

    /// Builds the [`HttpRequest`].
    #[must_use]
    pub fn build(self) -> HttpRequest {
        HttpRequest {
            http_method: self.http_method,
            url: self.url,
            body: self.body,
            extra_headers: self.extra_headers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Put.to_string(), "PUT");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_http_method_parses_any_case() {
        assert_eq!("GET".parse::<HttpMethod>(), Ok(HttpMethod::Get));
        assert_eq!("delete".parse::<HttpMethod>(), Ok(HttpMethod::Delete));
        assert!("PATCH".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_builder_creates_get_request_without_body() {
        let request = HttpRequest::builder(HttpMethod::Get, "http://x/y").build();

        assert_eq!(request.http_method, HttpMethod::Get);
        assert_eq!(request.url, "http://x/y");
        assert!(request.body.is_none());
        assert!(request.extra_headers.is_empty());
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let request = HttpRequest::builder(HttpMethod::Put, "http://x/y/1")
            .json_body("{}")
            .build();

        assert_eq!(request.body.as_deref(), Some("{}"));
        assert_eq!(
            request.extra_headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_builder_with_extra_headers() {
        let request = HttpRequest::builder(HttpMethod::Post, "http://x/y?action=stop")
            .header("Content-Length", "0")
            .build();

        assert_eq!(
            request.extra_headers.get("Content-Length"),
            Some(&"0".to_string())
        );
    }
}

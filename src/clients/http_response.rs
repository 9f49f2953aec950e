//! HTTP response types for the schema-driven API client.
//!
//! This module provides the [`HttpResponse`] type, a fully buffered view of
//! one exchange: status, headers, and the raw body text.

use std::collections::HashMap;

/// Header naming the canonical schema URL of an API root.
pub const SCHEMAS_HEADER: &str = "x-api-schemas";

/// A buffered HTTP response.
///
/// Header names are stored lower-cased; a header may carry several values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// The status line text, e.g. `404 Not Found`.
    pub status: String,
    /// Response headers (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The response body, or `None` when it could not be read.
    pub body: Option<String>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, deriving the status text from the code.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: Option<String>) -> Self {
        let reason = reqwest::StatusCode::from_u16(code)
            .ok()
            .and_then(|status| status.canonical_reason());
        let status = reason.map_or_else(|| code.to_string(), |reason| format!("{code} {reason}"));

        Self {
            code,
            status,
            headers,
            body,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of the given header, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the schema URL advertised by the server, if present and non-empty.
    #[must_use]
    pub fn schemas_url(&self) -> Option<&str> {
        self.header(SCHEMAS_HEADER).filter(|url| !url.is_empty())
    }
}

//! Client error types for the schema-driven API client.
//!
//! This module contains the error produced when the server answers with a
//! non-success status ([`ApiError`]) and the unified [`ClientError`] every
//! client operation returns.
//!
//! # Error Handling
//!
//! - [`ClientError::Config`]: options or schema bootstrap are unusable
//! - [`ClientError::Validation`]: a pre-flight check failed, nothing was sent
//! - [`ClientError::Api`]: the server answered with a failure status
//! - [`ClientError::Decode`]: a body was received but did not match the target
//! - [`ClientError::Network`]: the exchange itself failed (including timeouts)
//!
//! # Example
//!
//! ```rust,ignore
//! use schema_api::clients::ClientError;
//!
//! match client.by_id::<Publish>("publish", "1p5").await {
//!     Ok(publish) => println!("Found: {:?}", publish),
//!     Err(e) if e.is_not_found() => println!("No such publish"),
//!     Err(ClientError::Api(e)) => println!("API error {}: {}", e.status_code, e.body),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```

use thiserror::Error;
use tokio_tungstenite::tungstenite;

use crate::clients::http_response::HttpResponse;
use crate::error::ConfigError;
use crate::rest::ValidationError;

/// Placeholder summary used when the error body could not be read.
pub const UNREADABLE_BODY: &str = "Unreadable body.";

/// Keys removed from an error body before it is summarized.
///
/// These carry navigation or duplicate the status code rather than
/// describing the failure.
const NAVIGATIONAL_KEYS: &[&str] = &["id", "links", "actions", "type", "status"];

/// Error returned when the server answers with a non-success status.
///
/// The status code is the machine-readable signal; `message` is a single
/// human-readable line embedding the code, status text, body summary, and URL.
///
/// # Example
///
/// ```rust
/// use schema_api::clients::ApiError;
///
/// let error = ApiError::new(
///     422,
///     "422 Unprocessable Entity",
///     "http://localhost:8080/v1/publishes",
///     Some(r#"{"type":"error","code":"InvalidOption","fieldName":"name"}"#),
/// );
///
/// assert_eq!(error.status_code, 422);
/// assert_eq!(error.body, "code=InvalidOption, fieldName=name");
/// assert!(!error.is_not_found());
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    /// The HTTP status code of the response.
    pub status_code: u16,
    /// The status line text, e.g. `404 Not Found`.
    pub status: String,
    /// The URL of the failed request.
    pub url: String,
    /// Flattened summary of the response body.
    pub body: String,
    /// Formatted message combining all of the above.
    pub message: String,
}

impl ApiError {
    /// Builds an error from the raw parts of a failed response.
    ///
    /// `body` is `None` when the response body could not be read.
    #[must_use]
    pub fn new(
        status_code: u16,
        status: impl Into<String>,
        url: impl Into<String>,
        body: Option<&str>,
    ) -> Self {
        let status = status.into();
        let url = url.into();
        let body = body.map_or_else(|| UNREADABLE_BODY.to_string(), summarize_body);
        let message = format!(
            "Bad response statusCode [{status_code}]. Status [{status}]. Body: [{body}] from [{url}]"
        );

        Self {
            status_code,
            status,
            url,
            body,
            message,
        }
    }

    /// Translates a failed response for the request sent to `url`.
    #[must_use]
    pub fn from_response(response: &HttpResponse, url: &str) -> Self {
        Self::new(
            response.code,
            response.status.clone(),
            url,
            response.body.as_deref(),
        )
    }

    /// Returns `true` if the server reported the target as missing (HTTP 404).
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        self.status_code == 404
    }
}

/// Flattens an error body into a `key=value, ...` summary.
///
/// JSON objects lose their navigational keys and null values; keys are
/// rendered in sorted order. Anything that is not a JSON object is returned
/// verbatim.
#[must_use]
pub fn summarize_body(raw: &str) -> String {
    let Ok(mut document) = serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(raw)
    else {
        return raw.to_string();
    };

    for key in NAVIGATIONAL_KEYS {
        document.remove(*key);
    }

    let mut entries: Vec<_> = document
        .iter()
        .filter(|(_, value)| !value.is_null())
        .collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));

    entries
        .into_iter()
        .map(|(key, value)| match value {
            serde_json::Value::String(text) => format!("{key}={text}"),
            other => format!("{key}={other}"),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Unified error type for all client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Client options or the schema bootstrap are unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A pre-flight check failed; no request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The server answered with a failure status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A response body did not decode into the requested type.
    #[error("Failed to parse: {payload}")]
    Decode {
        /// The offending payload.
        payload: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A request body could not be encoded as JSON.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// A URL handed to the client could not be parsed.
    #[error("Invalid URL [{url}]: {source}")]
    InvalidUrl {
        /// The offending URL.
        url: String,
        /// The parse failure.
        #[source]
        source: url::ParseError,
    },

    /// A success response arrived but its body could not be read.
    #[error("Failed to read response body from [{url}]")]
    UnreadableBody {
        /// The URL of the request.
        url: String,
    },

    /// Network or connection error, including timeouts.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The real-time subscription failed to connect or broke.
    #[error("Subscription error: {0}")]
    Subscription(#[source] Box<tungstenite::Error>),
}

impl From<tungstenite::Error> for ClientError {
    fn from(error: tungstenite::Error) -> Self {
        Self::Subscription(Box::new(error))
    }
}

impl ClientError {
    /// Returns the HTTP status code when the server answered with a failure.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(error) => Some(error.status_code),
            _ => None,
        }
    }

    /// Returns `true` only for an [`ApiError`] with status 404.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api(error) if error.is_not_found())
    }
}

/// Returns `true` if `error` reports a missing target (HTTP 404).
///
/// Any other status code, and any failure that is not an [`ApiError`],
/// is not "not found".
#[must_use]
pub const fn is_not_found(error: &ClientError) -> bool {
    error.is_not_found()
}

// Verify ClientError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientError>();
};

//! Configuration error types for the schema-driven API client.
//!
//! This module contains the errors raised while building [`ClientOptions`]
//! and while bootstrapping the schema registry from the API root.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use schema_api::{AccessKey, ConfigError};
//!
//! let result = AccessKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessKey)));
//! ```
//!
//! [`ClientOptions`]: crate::ClientOptions

use thiserror::Error;

/// Errors that can occur while configuring the client.
///
/// This covers malformed client options as well as a root URL that does not
/// lead to a usable schema document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Access key cannot be empty.
    #[error("Access key cannot be empty. Please provide the access key of an API key pair.")]
    EmptyAccessKey,

    /// Secret key cannot be empty.
    #[error("Secret key cannot be empty. Please provide the secret key of an API key pair.")]
    EmptySecretKey,

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide an absolute http or https URL (e.g., 'https://api.example.com/v1').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the client options.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The API root neither pointed at a schema document nor was one.
    #[error("Failed to find schema at [{url}]")]
    MissingSchemaPointer {
        /// The root URL that was queried.
        url: String,
    },

    /// The schema document could not be parsed.
    #[error("Invalid schema document at [{url}]: {reason}")]
    InvalidSchemaDocument {
        /// The URL the schema document was fetched from.
        url: String,
        /// Why the document was rejected.
        reason: String,
    },
}

//! Configuration types for the schema-driven API client.
//!
//! This module provides the options used to reach an API root and to
//! authenticate every call made against it.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ClientOptions`]: Base URL, credential pair, and request timeout
//! - [`ClientOptionsBuilder`]: A builder for constructing [`ClientOptions`] instances
//! - [`AccessKey`]: A validated access key newtype
//! - [`SecretKey`]: A validated secret key newtype with masked debug output
//! - [`BaseUrl`]: A validated API root URL
//!
//! # Example
//!
//! ```rust
//! use schema_api::{ClientOptions, AccessKey, SecretKey, BaseUrl};
//!
//! let options = ClientOptions::builder()
//!     .url(BaseUrl::new("http://localhost:8080/v1").unwrap())
//!     .access_key(AccessKey::new("access").unwrap())
//!     .secret_key(SecretKey::new("secret").unwrap())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

use std::time::Duration;

pub use newtypes::{AccessKey, BaseUrl, SecretKey};

use crate::error::ConfigError;

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Options for a client instance.
///
/// The base URL and credential pair are fixed once built. The timeout is the
/// only value that may change afterwards, and a zero timeout always falls
/// back to [`DEFAULT_TIMEOUT`].
///
/// # Thread Safety
///
/// `ClientOptions` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use schema_api::{ClientOptions, AccessKey, SecretKey, BaseUrl};
///
/// let options = ClientOptions::builder()
///     .url(BaseUrl::new("http://localhost:8080/v1").unwrap())
///     .access_key(AccessKey::new("access").unwrap())
///     .secret_key(SecretKey::new("secret").unwrap())
///     .timeout(Duration::from_secs(30))
///     .build()
///     .unwrap();
///
/// assert_eq!(options.timeout(), Duration::from_secs(30));
/// ```
#[derive(Clone, Debug)]
pub struct ClientOptions {
    url: BaseUrl,
    access_key: AccessKey,
    secret_key: SecretKey,
    timeout: Duration,
}

impl ClientOptions {
    /// Creates a new builder for constructing `ClientOptions`.
    #[must_use]
    pub fn builder() -> ClientOptionsBuilder {
        ClientOptionsBuilder::new()
    }

    /// Returns the API root URL.
    #[must_use]
    pub const fn url(&self) -> &BaseUrl {
        &self.url
    }

    /// Returns the access key.
    #[must_use]
    pub const fn access_key(&self) -> &AccessKey {
        &self.access_key
    }

    /// Returns the secret key.
    #[must_use]
    pub const fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Replaces the per-request timeout.
    ///
    /// A zero duration resets the timeout to [`DEFAULT_TIMEOUT`].
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = effective_timeout(timeout);
    }
}

// Verify ClientOptions is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientOptions>();
};

fn effective_timeout(timeout: Duration) -> Duration {
    if timeout.is_zero() {
        DEFAULT_TIMEOUT
    } else {
        timeout
    }
}

/// Builder for constructing [`ClientOptions`] instances.
///
/// Required fields are `url`, `access_key`, and `secret_key`.
///
/// # Defaults
///
/// - `timeout`: 10 seconds
#[derive(Debug, Default)]
pub struct ClientOptionsBuilder {
    url: Option<BaseUrl>,
    access_key: Option<AccessKey>,
    secret_key: Option<SecretKey>,
    timeout: Option<Duration>,
}

impl ClientOptionsBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API root URL (required).
    #[must_use]
    pub fn url(mut self, url: BaseUrl) -> Self {
        self.url = Some(url);
        self
    }

    /// Sets the access key (required).
    #[must_use]
    pub fn access_key(mut self, key: AccessKey) -> Self {
        self.access_key = Some(key);
        self
    }

    /// Sets the secret key (required).
    #[must_use]
    pub fn secret_key(mut self, key: SecretKey) -> Self {
        self.secret_key = Some(key);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`ClientOptions`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `url`, `access_key`
    /// or `secret_key` are not set.
    pub fn build(self) -> Result<ClientOptions, ConfigError> {
        let url = self
            .url
            .ok_or(ConfigError::MissingRequiredField { field: "url" })?;
        let access_key = self
            .access_key
            .ok_or(ConfigError::MissingRequiredField {
                field: "access_key",
            })?;
        let secret_key = self
            .secret_key
            .ok_or(ConfigError::MissingRequiredField {
                field: "secret_key",
            })?;

        Ok(ClientOptions {
            url,
            access_key,
            secret_key,
            timeout: effective_timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT)),
        })
    }
}

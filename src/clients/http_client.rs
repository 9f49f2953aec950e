//! HTTP transport for the schema-driven API client.
//!
//! This module provides the [`HttpClient`] type. It performs exactly one
//! authenticated exchange per call and exposes the four request/response
//! primitives the generic operations are built on: [`HttpClient::fetch`],
//! [`HttpClient::modify`], [`HttpClient::invoke`] and [`HttpClient::remove`].

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::clients::errors::{ApiError, ClientError};
use crate::clients::filters::{append_filters, ListOptions};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::ClientOptions;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for a single API root.
///
/// The client handles:
/// - HTTP Basic credentials on every outgoing request
/// - The configured per-request timeout
/// - JSON encoding of request bodies and decoding of responses
/// - Translation of failure statuses into [`ApiError`]
///
/// Nothing is retried; every failure is returned to the caller.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync` and cheap to clone, making it safe to
/// share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use schema_api::{ClientOptions, HttpClient};
///
/// let client = HttpClient::new(options)?;
/// let page: serde_json::Value = client.fetch("http://localhost:8080/v1/publishes", None).await?;
/// ```
#[derive(Clone, Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL, credentials and timeout.
    options: ClientOptions,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Network`] if the underlying reqwest client
    /// cannot be created (e.g., TLS initialization failure).
    pub fn new(options: ClientOptions) -> Result<Self, ClientError> {
        let user_agent = format!("Schema API Library v{SDK_VERSION} | Rust");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            options,
            default_headers,
        })
    }

    /// Returns the options this client was built with.
    #[must_use]
    pub const fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends one request and buffers the response, whatever its status.
    ///
    /// Credentials are attached here, immediately before transmission.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Network`] if the exchange fails or times out.
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        tracing::debug!(method = %request.http_method, url = %request.url, "sending request");
        if let Some(body) = &request.body {
            tracing::trace!("Request => {body}");
        }

        let mut builder = match request.http_method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Put => self.client.put(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };

        for (key, value) in self.default_headers.iter().chain(&request.extra_headers) {
            builder = builder.header(key, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let res = builder
            .basic_auth(
                self.options.access_key().as_ref(),
                Some(self.options.secret_key().as_ref()),
            )
            .timeout(self.options.timeout())
            .send()
            .await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = match res.text().await {
            Ok(text) => Some(text),
            Err(error) => {
                tracing::warn!(url = %request.url, %error, "failed to read response body");
                None
            }
        };

        tracing::debug!(status = code, url = %request.url, "received response");
        if let Some(body) = &body {
            tracing::trace!("Response <= {body}");
        }

        Ok(HttpResponse::new(code, headers, body))
    }

    /// GETs `url` with optional filters and decodes the body into `T`.
    ///
    /// Anything but status 200 is a failure.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] for a non-200 status,
    /// [`ClientError::Decode`] if the body does not decode into `T`, and
    /// [`ClientError::InvalidUrl`] if filters cannot be appended to `url`.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        url: &str,
        options: Option<&ListOptions>,
    ) -> Result<T, ClientError> {
        let url = match options {
            Some(options) => append_filters(url, options)?,
            None => url.to_string(),
        };

        let response = self
            .send(HttpRequest::builder(HttpMethod::Get, &url).build())
            .await?;
        if response.code != 200 {
            return Err(ApiError::from_response(&response, &url).into());
        }

        let body = response.body.ok_or(ClientError::UnreadableBody { url })?;
        decode(&body)
    }

    /// PUTs or POSTs `body` as JSON to `url` and decodes the answer into `T`.
    ///
    /// An empty response body is a success yielding `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] for a status of 300 or above,
    /// [`ClientError::Encode`] if `body` cannot be encoded, and
    /// [`ClientError::Decode`] if a non-empty response does not decode into `T`.
    pub async fn modify<T, B>(
        &self,
        method: HttpMethod,
        url: &str,
        body: &B,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        let encoded = serde_json::to_string(body).map_err(ClientError::Encode)?;
        let request = HttpRequest::builder(method, url).json_body(encoded).build();

        let response = self.send(request).await?;
        Self::decode_if_present(response, url)
    }

    /// POSTs to an action URL, with an optional JSON body.
    ///
    /// Without a body the request carries `Content-Length: 0`. An empty
    /// response body yields `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] for a status of 300 or above,
    /// [`ClientError::Encode`] if `body` cannot be encoded, and
    /// [`ClientError::Decode`] if a non-empty response does not decode into `T`.
    pub async fn invoke<T, B>(&self, url: &str, body: Option<&B>) -> Result<T, ClientError>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        let builder = HttpRequest::builder(HttpMethod::Post, url);
        let request = match body {
            Some(body) => {
                let encoded = serde_json::to_string(body).map_err(ClientError::Encode)?;
                builder.json_body(encoded)
            }
            None => builder
                .header("Content-Type", "application/json")
                .header("Content-Length", "0"),
        }
        .build();

        let response = self.send(request).await?;
        Self::decode_if_present(response, url)
    }

    /// DELETEs `url`, discarding the response body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] for a status of 300 or above.
    pub async fn remove(&self, url: &str) -> Result<(), ClientError> {
        let response = self
            .send(HttpRequest::builder(HttpMethod::Delete, url).build())
            .await?;
        if response.code >= 300 {
            return Err(ApiError::from_response(&response, url).into());
        }
        Ok(())
    }

    fn decode_if_present<T>(response: HttpResponse, url: &str) -> Result<T, ClientError>
    where
        T: DeserializeOwned + Default,
    {
        if response.code >= 300 {
            return Err(ApiError::from_response(&response, url).into());
        }

        match response.body {
            Some(body) if !body.is_empty() => decode(&body),
            Some(_) => Ok(T::default()),
            None => Err(ClientError::UnreadableBody {
                url: url.to_string(),
            }),
        }
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

/// Decodes a JSON payload, keeping the payload in the error for context.
pub(crate) fn decode<T: DeserializeOwned>(payload: &str) -> Result<T, ClientError> {
    serde_json::from_str(payload).map_err(|source| ClientError::Decode {
        payload: payload.to_string(),
        source,
    })
}

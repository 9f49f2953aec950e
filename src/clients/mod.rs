//! HTTP client infrastructure for the schema-driven API.
//!
//! This module provides:
//!
//! - [`HttpClient`]: the transport core, one authenticated exchange per call
//! - [`HttpRequest`] and [`HttpResponse`]: request building and buffered responses
//! - [`ApiError`]: failure statuses translated into a single diagnostic
//! - [`ClientError`]: the unified error returned by every operation
//! - [`ListOptions`]: collection filters encoded as query parameters
//! - [`Subscription`]: the WebSocket stream for real-time events
//! - [`GenericClient`]: schema-driven resource operations
//!
//! # Example
//!
//! ```rust,ignore
//! use schema_api::clients::{GenericClient, ListOptions};
//! use schema_api::rest::{Collection, Resource};
//!
//! let client = GenericClient::new(options).await?;
//! let filters = ListOptions::new().filter("state", "created");
//! let page: Collection<Resource> = client.list("containerEvent", Some(&filters)).await?;
//! ```

mod errors;
mod filters;
pub mod generic;
mod http_client;
mod http_request;
mod http_response;
mod subscription;

pub use errors::{is_not_found, summarize_body, ApiError, ClientError, UNREADABLE_BODY};
pub use filters::{append_filters, FilterValue, ListOptions};
pub use generic::GenericClient;
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, SCHEMAS_HEADER};
pub use subscription::{EventStream, Subscription};

pub(crate) use http_client::decode;

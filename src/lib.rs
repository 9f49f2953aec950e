//! # Schema API Rust Client
//!
//! A generic client for self-describing hypermedia REST APIs. The API root
//! points at a schema document that lists every resource type, the verbs
//! each permits, and where its collection lives; this crate loads that
//! document once and drives every operation from it.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientOptions`] and [`ClientOptionsBuilder`]
//! - Validated newtypes for the base URL and API key pair
//! - Schema discovery and lookup via [`schema::SchemaRegistry`]
//! - An async transport with HTTP Basic auth and per-request timeouts ([`HttpClient`])
//! - Generic list/create/update/delete/action/link operations ([`GenericClient`])
//! - Real-time event subscriptions over WebSocket ([`Subscription`])
//! - A typed facade for individual resource types ([`rest::SchemaResource`])
//!
//! ## Quick Start
//!
//! ```rust
//! use schema_api::{AccessKey, BaseUrl, ClientOptions, SecretKey};
//! use std::time::Duration;
//!
//! let options = ClientOptions::builder()
//!     .url(BaseUrl::new("http://localhost:8080/v1").unwrap())
//!     .access_key(AccessKey::new("access-key").unwrap())
//!     .secret_key(SecretKey::new("secret-key").unwrap())
//!     .timeout(Duration::from_secs(30))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(options.timeout(), Duration::from_secs(30));
//! ```
//!
//! ## Generic Operations
//!
//! ```rust,ignore
//! use schema_api::{GenericClient, ListOptions};
//! use schema_api::rest::{Collection, Resource};
//!
//! let client = GenericClient::new(options).await?;
//!
//! let filters = ListOptions::new().filter("name", "resource.change");
//! let mut page: Collection<Resource> = client.list("publish", Some(&filters)).await?;
//! while let Some(next) = client.next_page(&page).await? {
//!     page = next;
//! }
//!
//! match client.by_id::<Resource>("publish", "1p5").await {
//!     Ok(found) => println!("found {found}"),
//!     Err(e) if e.is_not_found() => println!("no such publish"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
//! ## Typed Resources
//!
//! ```rust,ignore
//! use schema_api::rest::SchemaResource;
//! use schema_api::rest::resources::ContainerEvent;
//!
//! if let Some(event) = ContainerEvent::by_id(&client, "1ce2").await? {
//!     if event.resource.has_action("remove") {
//!         event.action_remove(&client).await?;
//!     }
//! }
//! ```
//!
//! ## Subscriptions
//!
//! ```rust,ignore
//! use std::collections::HashMap;
//!
//! let mut events = client
//!     .subscribe("http://localhost:8080/v1/subscribe?eventNames=resource.change", &HashMap::new())
//!     .await?;
//! while let Some(event) = events.next_event::<serde_json::Value>().await {
//!     println!("{}", event?);
//! }
//! ```
//!
//! ## Logging
//!
//! Requests are logged through [`tracing`]: method and URL at `debug`,
//! bodies at `trace`. No subscriber is installed by this crate.
//!
//! ## Thread Safety
//!
//! All client types are `Send + Sync`. The schema registry is read-only
//! after bootstrap, so a single [`GenericClient`] can be cloned into any
//! number of tasks.

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;
pub mod schema;

// Re-export public types at crate root for convenience
pub use config::{AccessKey, BaseUrl, ClientOptions, ClientOptionsBuilder, SecretKey};
pub use error::ConfigError;

// Re-export client types
pub use clients::{
    is_not_found, ApiError, ClientError, FilterValue, GenericClient, HttpClient, HttpMethod,
    HttpRequest, HttpRequestBuilder, HttpResponse, ListOptions, Subscription,
};

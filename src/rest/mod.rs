//! Resource model for the schema-driven API.
//!
//! This module provides the types every generic operation works with:
//!
//! - **[`Resource`]**: identity, links and actions embedded in every object
//! - **[`Collection<T>`]** and **[`Pagination`]**: paged lists
//! - **[`ResourceOperation`]**: the operations validated against a schema
//! - **[`ValidationError`]**: pre-flight failures, raised before any request
//! - **[`SchemaResource`]**: a typed facade binding a Rust type to a schema type
//! - [`resources`]: typed resources built on the facade
//!
//! # Example
//!
//! ```rust,ignore
//! use schema_api::GenericClient;
//! use schema_api::rest::{Collection, Resource, SchemaResource};
//! use schema_api::rest::resources::ContainerEvent;
//!
//! let client = GenericClient::new(options).await?;
//!
//! // Untyped: any schema type, decoded into navigation envelopes
//! let page: Collection<Resource> = client.list("containerEvent", None).await?;
//!
//! // Typed: the facade fills in the type name
//! for event in ContainerEvent::list(&client, None).await?.iter() {
//!     if event.resource.has_action("remove") {
//!         event.action_remove(&client).await?;
//!     }
//! }
//! ```

mod errors;
mod facade;
mod resource;
pub mod resources;

pub use errors::ValidationError;
pub use facade::SchemaResource;
pub use resource::{
    Collection, Pagination, Resource, ResourceOperation, COLLECTION_LINK, SELF_LINK,
};

//! Generic resource operations driven by the schema registry.
//!
//! [`GenericClient`] works with any type the API describes: list, create,
//! update, fetch by id, delete, invoke actions, follow links, reload, and
//! page through collections. Results decode into any caller-chosen type.

mod client;

pub use client::GenericClient;

//! Typed resources built on [`SchemaResource`](crate::rest::SchemaResource).
//!
//! - [`Publish`]: server-published event records (`publish`)
//! - [`ContainerEvent`]: container state changes (`containerEvent`)

mod container_event;
mod publish;

pub use container_event::{ContainerEvent, CONTAINER_EVENT_TYPE};
pub use publish::{Publish, PUBLISH_TYPE};

//! Schema registry for the API.
//!
//! The API describes itself: its root points at a schema document listing
//! every resource type, the verbs each type permits, and where each type's
//! collection lives. The client loads this document once at bootstrap and
//! uses it to validate and route every generic operation.
//!
//! - [`SchemaDocument`] and [`ResourceSchema`]: the wire format
//! - [`Verbs`]: the set of permitted HTTP verbs
//! - [`SchemaRegistry`]: the document indexed by type name

mod registry;
mod types;

pub use registry::SchemaRegistry;
pub use types::{ResourceSchema, SchemaDocument, Verbs};

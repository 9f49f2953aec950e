//! Pre-flight validation errors for generic resource operations.
//!
//! Every variant here is raised before any request is sent: the schema
//! registry or the resource's own navigation state already shows the
//! operation cannot succeed.
//!
//! # Example
//!
//! ```rust,ignore
//! use schema_api::rest::ValidationError;
//! use schema_api::clients::ClientError;
//!
//! match client.list::<Collection<Publish>>("publish", None).await {
//!     Err(ClientError::Validation(ValidationError::OperationNotAllowed { operation, .. })) => {
//!         println!("publish does not support {operation}");
//!     }
//!     other => { /* ... */ }
//! }
//! ```

use thiserror::Error;

use crate::clients::HttpMethod;
use crate::rest::ResourceOperation;

/// Error type for checks made before a request is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The type name is not present in the schema registry.
    #[error("Unknown schema type [{type_name}]")]
    UnknownType {
        /// The requested type name.
        type_name: String,
    },

    /// The schema does not list the verb the operation needs.
    #[error("Resource type [{type_name}] does not support {operation} ({method} not permitted)")]
    OperationNotAllowed {
        /// The requested type name.
        type_name: String,
        /// The operation being attempted.
        operation: ResourceOperation,
        /// The verb the schema would have to permit.
        method: HttpMethod,
    },

    /// Neither a collection link nor a usable fallback is available.
    #[error("Failed to find collection URL for [{type_name}]")]
    MissingCollectionLink {
        /// The requested type name.
        type_name: String,
    },

    /// The resource does not carry the named link.
    #[error("Failed to find {link} URL of [{resource}]")]
    MissingLink {
        /// The link name, e.g. `self`.
        link: String,
        /// Description of the resource, as `type/id`.
        resource: String,
    },

    /// The resource does not currently offer the named action.
    #[error("Action [{action}] not available on [{resource}]")]
    ActionUnavailable {
        /// The action name.
        action: String,
        /// Description of the resource, as `type/id`.
        resource: String,
    },
}

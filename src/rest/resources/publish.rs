//! Publish resource implementation.
//!
//! A publish is an event record the server emits when a resource changes.
//!
//! # Example
//!
//! ```rust,ignore
//! use schema_api::rest::SchemaResource;
//! use schema_api::rest::resources::Publish;
//!
//! let publish = Publish {
//!     name: "resource.change".to_string(),
//!     resource_type: "containerEvent".to_string(),
//!     resource_id: "1ce2".to_string(),
//!     ..Default::default()
//! };
//! let saved = publish.create(&client).await?;
//! println!("published at {:?}", saved.published_at());
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rest::{Resource, SchemaResource};

/// Schema type name of [`Publish`].
pub const PUBLISH_TYPE: &str = "publish";

/// An event record published by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publish {
    /// Identity and navigation state.
    #[serde(flatten)]
    pub resource: Resource,

    /// Free-form event payload.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub data: HashMap<String, Value>,

    /// Event name, e.g. `resource.change`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Ids of events this one supersedes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub previous_ids: Vec<String>,

    /// Id of the resource the event concerns.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resource_id: String,

    /// Type of the resource the event concerns.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resource_type: String,

    /// Publication time in milliseconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,

    /// Transition state, e.g. `yes`, `no` or `error`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub transitioning: String,

    /// Human-readable transition detail.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub transitioning_message: String,
}

impl Publish {
    /// Returns the publication time as a UTC timestamp.
    #[must_use]
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.time.and_then(DateTime::from_timestamp_millis)
    }
}

impl SchemaResource for Publish {
    const TYPE: &'static str = PUBLISH_TYPE;

    fn resource(&self) -> &Resource {
        &self.resource
    }
}

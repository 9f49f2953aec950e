//! Container event resource implementation.
//!
//! Container events report state changes observed by a host agent. They are
//! state-machine driven, so the `create` and `remove` actions are offered
//! only in some states; check [`Resource::has_action`] before invoking.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::{ClientError, GenericClient};
use crate::rest::{Resource, SchemaResource};

/// Schema type name of [`ContainerEvent`].
pub const CONTAINER_EVENT_TYPE: &str = "containerEvent";

/// A container state change reported by a host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerEvent {
    /// Identity and navigation state.
    #[serde(flatten)]
    pub resource: Resource,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub account_id: String,

    /// Creation time as an RFC 3339 string.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created: String,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub data: HashMap<String, Value>,

    /// Raw inspect output of the container, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker_inspect: Option<Value>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub external_from: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub external_id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub external_status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_timestamp: Option<i64>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub host_id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reported_host_uuid: String,

    /// Current state, e.g. `creating`, `created` or `removed`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub state: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub transitioning: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub transitioning_message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transitioning_progress: Option<i64>,
}

impl ContainerEvent {
    /// Returns the creation time, if present and well formed.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created)
            .ok()
            .map(|created| created.with_timezone(&Utc))
    }

    /// Invokes the `create` action.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if the event does not currently
    /// offer the action; see [`GenericClient::action`].
    pub async fn action_create(&self, client: &GenericClient) -> Result<Self, ClientError> {
        self.invoke_action(client, "create").await
    }

    /// Invokes the `remove` action.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if the event does not currently
    /// offer the action; see [`GenericClient::action`].
    pub async fn action_remove(&self, client: &GenericClient) -> Result<Self, ClientError> {
        self.invoke_action(client, "remove").await
    }
}

impl SchemaResource for ContainerEvent {
    const TYPE: &'static str = CONTAINER_EVENT_TYPE;

    fn resource(&self) -> &Resource {
        &self.resource
    }
}

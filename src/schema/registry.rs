//! The schema registry and its bootstrap handshake.

use std::collections::HashMap;

use crate::clients::{decode, ApiError, ClientError, HttpClient, HttpMethod, HttpRequest};
use crate::error::ConfigError;
use crate::rest::ValidationError;
use crate::schema::{ResourceSchema, SchemaDocument};

/// Resource schemas indexed by type name.
///
/// Built once and read-only afterwards, so it can be shared freely between
/// tasks.
///
/// # Example
///
/// ```rust
/// use schema_api::schema::{SchemaDocument, SchemaRegistry};
///
/// let document: SchemaDocument = serde_json::from_str(
///     r#"{"data":[{"id":"publish","pluralName":"publishes","collectionMethods":["GET"]}]}"#,
/// ).unwrap();
/// let registry = SchemaRegistry::new(document);
///
/// assert!(registry.get("publish").is_some());
/// assert!(registry.require("widget").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    document: SchemaDocument,
    types: HashMap<String, ResourceSchema>,
}

impl SchemaRegistry {
    /// Indexes a schema document by type name.
    ///
    /// When two entries share a type name the later one wins.
    #[must_use]
    pub fn new(document: SchemaDocument) -> Self {
        let types = document
            .data
            .iter()
            .map(|schema| (schema.id.clone(), schema.clone()))
            .collect();
        Self { document, types }
    }

    /// Discovers and loads the schema document for the client's root URL.
    ///
    /// The root is fetched first. If it names a schema URL in the
    /// `X-API-Schemas` header that differs from the root, that URL is
    /// fetched and its body used; otherwise the root body itself must be the
    /// schema document.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] if either GET answers with anything but
    /// 200, [`ConfigError::MissingSchemaPointer`] if the root has no pointer
    /// and is not a schema document, and
    /// [`ConfigError::InvalidSchemaDocument`] if the schema body cannot be
    /// parsed.
    pub async fn bootstrap(client: &HttpClient) -> Result<Self, ClientError> {
        let root = client.options().url().as_str();
        let response = client
            .send(HttpRequest::builder(HttpMethod::Get, root).build())
            .await?;
        if response.code != 200 {
            return Err(ApiError::from_response(&response, root).into());
        }

        let pointer = response.schemas_url().map(ToString::to_string);
        let (schema_url, body) = match pointer {
            Some(pointer) if !same_url(&pointer, root) => {
                tracing::debug!(url = %pointer, "following schema pointer");
                let schemas = client
                    .send(HttpRequest::builder(HttpMethod::Get, &pointer).build())
                    .await?;
                if schemas.code != 200 {
                    return Err(ApiError::from_response(&schemas, &pointer).into());
                }
                (pointer, schemas.body)
            }
            Some(pointer) => (pointer, response.body),
            None => {
                // A root without a pointer may still serve the document itself.
                let document = response
                    .body
                    .as_deref()
                    .and_then(|body| decode::<SchemaDocument>(body).ok())
                    .ok_or_else(|| ConfigError::MissingSchemaPointer {
                        url: root.to_string(),
                    })?;
                return Ok(Self::loaded(document, root));
            }
        };

        let body = body.ok_or_else(|| ClientError::UnreadableBody {
            url: schema_url.clone(),
        })?;
        let document: SchemaDocument =
            serde_json::from_str(&body).map_err(|e| ConfigError::InvalidSchemaDocument {
                url: schema_url.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self::loaded(document, &schema_url))
    }

    fn loaded(document: SchemaDocument, url: &str) -> Self {
        let registry = Self::new(document);
        tracing::debug!(url, types = registry.len(), "loaded schema document");
        registry
    }

    /// Returns the schema for `type_name`, if known.
    #[must_use]
    pub fn get(&self, type_name: &str) -> Option<&ResourceSchema> {
        self.types.get(type_name)
    }

    /// Returns the schema for `type_name`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownType`] if the type is not registered.
    pub fn require(&self, type_name: &str) -> Result<&ResourceSchema, ValidationError> {
        self.get(type_name)
            .ok_or_else(|| ValidationError::UnknownType {
                type_name: type_name.to_string(),
            })
    }

    /// Returns the document the registry was built from.
    #[must_use]
    pub const fn document(&self) -> &SchemaDocument {
        &self.document
    }

    /// Returns the lookup map keyed by type name.
    #[must_use]
    pub const fn types(&self) -> &HashMap<String, ResourceSchema> {
        &self.types
    }

    /// Returns the number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Compares two URLs ignoring a trailing slash.
fn same_url(a: &str, b: &str) -> bool {
    a.trim_end_matches('/') == b.trim_end_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Verbs;

    fn schema(id: &str, plural: &str) -> ResourceSchema {
        ResourceSchema {
            id: id.to_string(),
            plural_name: plural.to_string(),
            collection_methods: Verbs::new([HttpMethod::Get]),
            ..ResourceSchema::default()
        }
    }

    #[test]
    fn test_registry_indexes_by_type_name() {
        let registry = SchemaRegistry::new(SchemaDocument {
            data: vec![
                schema("publish", "publishes"),
                schema("containerEvent", "containerEvents"),
            ],
        });

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.get("containerEvent").map(|s| s.plural_name.as_str()),
            Some("containerEvents")
        );
        assert_eq!(registry.document().data[0].id, "publish");
    }

    #[test]
    fn test_require_unknown_type_fails() {
        let registry = SchemaRegistry::default();

        assert!(registry.is_empty());
        assert_eq!(
            registry.require("widget").unwrap_err(),
            ValidationError::UnknownType {
                type_name: "widget".to_string()
            }
        );
    }

    #[test]
    fn test_same_url_ignores_trailing_slash() {
        assert!(same_url("http://h/v1/", "http://h/v1"));
        assert!(!same_url("http://h/v1/schemas", "http://h/v1"));
    }
}

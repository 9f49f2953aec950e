//! Schema-driven resource operations.
//!
//! This module provides the [`GenericClient`] type. Every operation resolves
//! its resource type against the schema registry, checks the verb the
//! operation needs, and resolves the target URL before any request is sent.

use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::clients::{ClientError, HttpClient, HttpMethod, ListOptions, Subscription};
use crate::config::ClientOptions;
use crate::rest::{Collection, Resource, ResourceOperation, ValidationError, SELF_LINK};
use crate::schema::{ResourceSchema, SchemaRegistry};

/// Client performing generic operations against any schema type.
///
/// # Thread Safety
///
/// `GenericClient` is `Send + Sync`. Clones share the schema registry, so
/// cloning is cheap.
///
/// # Example
///
/// ```rust,ignore
/// use schema_api::{ClientOptions, GenericClient};
/// use schema_api::rest::{Collection, Resource};
///
/// let client = GenericClient::new(options).await?;
///
/// let page: Collection<Resource> = client.list("publish", None).await?;
/// for publish in page.iter() {
///     println!("{publish}");
/// }
/// ```
#[derive(Clone, Debug)]
pub struct GenericClient {
    http: HttpClient,
    schemas: Arc<SchemaRegistry>,
}

// Verify GenericClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GenericClient>();
};

impl GenericClient {
    /// Creates a client and bootstraps its schema registry.
    ///
    /// # Errors
    ///
    /// Returns any error raised by [`SchemaRegistry::bootstrap`], or
    /// [`ClientError::Network`] if the HTTP client cannot be built.
    pub async fn new(options: ClientOptions) -> Result<Self, ClientError> {
        let http = HttpClient::new(options)?;
        let schemas = SchemaRegistry::bootstrap(&http).await?;
        Ok(Self::with_registry(http, schemas))
    }

    /// Creates a client from an already loaded registry.
    ///
    /// No request is made.
    #[must_use]
    pub fn with_registry(http: HttpClient, schemas: SchemaRegistry) -> Self {
        Self {
            http,
            schemas: Arc::new(schemas),
        }
    }

    /// Returns the options this client was built with.
    #[must_use]
    pub const fn options(&self) -> &ClientOptions {
        self.http.options()
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Returns the schema registry.
    #[must_use]
    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    /// Returns the registered schemas keyed by type name.
    #[must_use]
    pub fn types(&self) -> &HashMap<String, ResourceSchema> {
        self.schemas.types()
    }

    /// Lists the collection of `type_name`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if the type is unknown, its
    /// collection does not permit GET, or it has no collection link. Transport
    /// errors are returned as from [`HttpClient::fetch`].
    pub async fn list<T: DeserializeOwned>(
        &self,
        type_name: &str,
        options: Option<&ListOptions>,
    ) -> Result<T, ClientError> {
        let schema = self.collection_schema(type_name, ResourceOperation::List, HttpMethod::Get)?;
        let url = schema
            .collection_url()
            .ok_or_else(|| missing_collection(type_name))?;

        self.http.fetch(url, options).await
    }

    /// Creates a resource of `type_name` from `body`.
    ///
    /// When the schema carries no collection link, the collection URL is
    /// derived from the schema's `self` link and plural name.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if the type is unknown, its
    /// collection does not permit POST, or no collection URL can be found.
    /// Transport errors are returned as from [`HttpClient::modify`].
    pub async fn create<T, B>(&self, type_name: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        let schema =
            self.collection_schema(type_name, ResourceOperation::Create, HttpMethod::Post)?;
        let url = match schema.collection_url() {
            Some(url) => url.to_string(),
            None => {
                let derived = schema
                    .derived_collection_url()
                    .ok_or_else(|| missing_collection(type_name))?;
                tracing::debug!(type_name, url = %derived, "derived collection URL");
                derived
            }
        };

        self.http.modify(HttpMethod::Post, &url, body).await
    }

    /// Updates `existing` with `body` through its `self` link.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if the type is unknown, does not
    /// permit PUT, or `existing` has no `self` link. Transport errors are
    /// returned as from [`HttpClient::modify`].
    pub async fn update<T, B>(
        &self,
        type_name: &str,
        existing: &Resource,
        body: &B,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        self.resource_schema(type_name, ResourceOperation::Update, HttpMethod::Put)?;
        let url = require_link(existing, SELF_LINK)?;

        self.http.modify(HttpMethod::Put, url, body).await
    }

    /// Fetches the resource of `type_name` with the given id.
    ///
    /// A missing resource is returned as an [`ApiError`] with status 404;
    /// see [`ClientError::is_not_found`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if the type is unknown, does not
    /// permit GET on instances, or has no collection link. Transport errors
    /// are returned as from [`HttpClient::fetch`].
    ///
    /// [`ApiError`]: crate::clients::ApiError
    pub async fn by_id<T: DeserializeOwned>(
        &self,
        type_name: &str,
        id: &str,
    ) -> Result<T, ClientError> {
        let schema = self.resource_schema(type_name, ResourceOperation::ById, HttpMethod::Get)?;
        let collection = schema
            .collection_url()
            .ok_or_else(|| missing_collection(type_name))?;
        let url = format!(
            "{}/{}",
            collection.trim_end_matches('/'),
            urlencoding::encode(id)
        );

        self.http.fetch(&url, None).await
    }

    /// Deletes `existing` through its `self` link.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if the type is unknown, does not
    /// permit DELETE, or `existing` has no `self` link. Transport errors are
    /// returned as from [`HttpClient::remove`].
    pub async fn delete(&self, type_name: &str, existing: &Resource) -> Result<(), ClientError> {
        self.resource_schema(type_name, ResourceOperation::Delete, HttpMethod::Delete)?;
        let url = require_link(existing, SELF_LINK)?;

        self.http.remove(url).await
    }

    /// Invokes the named action currently offered by `existing`.
    ///
    /// The action URL comes from the instance's own action map, not from
    /// the schema.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if the type is unknown or the
    /// action is not currently offered. Transport errors are returned as
    /// from [`HttpClient::invoke`].
    pub async fn action<T, B>(
        &self,
        type_name: &str,
        action: &str,
        existing: &Resource,
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        self.schemas.require(type_name)?;
        let url = existing
            .action(action)
            .ok_or_else(|| ValidationError::ActionUnavailable {
                action: action.to_string(),
                resource: existing.to_string(),
            })?;

        self.http.invoke(url, body).await
    }

    /// Fetches the named link of `existing`, such as a sub-collection.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if the link is absent. Transport
    /// errors are returned as from [`HttpClient::fetch`].
    pub async fn get_link<T: DeserializeOwned>(
        &self,
        existing: &Resource,
        link: &str,
        options: Option<&ListOptions>,
    ) -> Result<T, ClientError> {
        let url = require_link(existing, link)?;
        self.http.fetch(url, options).await
    }

    /// Re-fetches `existing` through its `self` link.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if the `self` link is absent.
    /// Transport errors are returned as from [`HttpClient::fetch`].
    pub async fn reload<T: DeserializeOwned>(&self, existing: &Resource) -> Result<T, ClientError> {
        self.get_link(existing, SELF_LINK, None).await
    }

    /// Fetches the page after `collection`.
    ///
    /// Returns `Ok(None)` without any request when `collection` is the last
    /// page.
    ///
    /// # Errors
    ///
    /// Transport errors are returned as from [`HttpClient::fetch`].
    pub async fn next_page<T: DeserializeOwned>(
        &self,
        collection: &Collection<T>,
    ) -> Result<Option<Collection<T>>, ClientError> {
        match collection.next_url() {
            Some(url) => self.http.fetch(url, None).await.map(Some),
            None => Ok(None),
        }
    }

    /// POSTs `body` as JSON to an arbitrary URL.
    ///
    /// # Errors
    ///
    /// Transport errors are returned as from [`HttpClient::modify`].
    pub async fn post<T, B>(&self, url: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        self.http.modify(HttpMethod::Post, url, body).await
    }

    /// Opens a real-time subscription on `url`.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::subscribe`].
    pub async fn subscribe(
        &self,
        url: &str,
        headers: &HashMap<String, Vec<String>>,
    ) -> Result<Subscription, ClientError> {
        self.http.subscribe(url, headers).await
    }

    fn collection_schema(
        &self,
        type_name: &str,
        operation: ResourceOperation,
        method: HttpMethod,
    ) -> Result<&ResourceSchema, ValidationError> {
        let schema = self.schemas.require(type_name)?;
        if schema.collection_methods.allows(method) {
            Ok(schema)
        } else {
            Err(not_allowed(type_name, operation, method))
        }
    }

    fn resource_schema(
        &self,
        type_name: &str,
        operation: ResourceOperation,
        method: HttpMethod,
    ) -> Result<&ResourceSchema, ValidationError> {
        let schema = self.schemas.require(type_name)?;
        if schema.resource_methods.allows(method) {
            Ok(schema)
        } else {
            Err(not_allowed(type_name, operation, method))
        }
    }
}

fn not_allowed(
    type_name: &str,
    operation: ResourceOperation,
    method: HttpMethod,
) -> ValidationError {
    ValidationError::OperationNotAllowed {
        type_name: type_name.to_string(),
        operation,
        method,
    }
}

fn missing_collection(type_name: &str) -> ValidationError {
    ValidationError::MissingCollectionLink {
        type_name: type_name.to_string(),
    }
}

fn require_link<'a>(existing: &'a Resource, link: &str) -> Result<&'a str, ValidationError> {
    existing.link(link).ok_or_else(|| ValidationError::MissingLink {
        link: link.to_string(),
        resource: existing.to_string(),
    })
}

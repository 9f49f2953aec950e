//! Typed facade over the generic operations.
//!
//! A [`SchemaResource`] binds a Rust type to one schema type name, so
//! callers work with `Publish` or `ContainerEvent` values instead of type
//! strings. This layer also decides that a missing resource is absent
//! rather than an error.
//!
//! # Example
//!
//! ```rust,ignore
//! use schema_api::rest::SchemaResource;
//! use schema_api::rest::resources::Publish;
//!
//! let mut page = Publish::list(&client, None).await?;
//! loop {
//!     for publish in page.iter() {
//!         println!("{}", publish.name);
//!     }
//!     match Publish::next_page(&client, &page).await? {
//!         Some(next) => page = next,
//!         None => break,
//!     }
//! }
//!
//! if let Some(publish) = Publish::by_id(&client, "1p5").await? {
//!     publish.delete(&client).await?;
//! }
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::clients::{ClientError, GenericClient, ListOptions};
use crate::rest::{Collection, Resource};

/// A Rust type bound to one schema type.
///
/// Implementors embed a [`Resource`] (usually with `#[serde(flatten)]`) and
/// expose it through [`SchemaResource::resource`].
#[allow(async_fn_in_trait)]
pub trait SchemaResource:
    Serialize + DeserializeOwned + Default + Clone + Send + Sync + Sized
{
    /// The schema type name, e.g. `publish`.
    const TYPE: &'static str;

    /// Returns the embedded navigation envelope.
    fn resource(&self) -> &Resource;

    /// Lists the collection, optionally filtered.
    ///
    /// # Errors
    ///
    /// See [`GenericClient::list`].
    async fn list(
        client: &GenericClient,
        options: Option<&ListOptions>,
    ) -> Result<Collection<Self>, ClientError> {
        client.list(Self::TYPE, options).await
    }

    /// Creates a resource from `self`.
    ///
    /// # Errors
    ///
    /// See [`GenericClient::create`].
    async fn create(&self, client: &GenericClient) -> Result<Self, ClientError> {
        client.create(Self::TYPE, self).await
    }

    /// Applies `updates` to this resource.
    ///
    /// # Errors
    ///
    /// See [`GenericClient::update`].
    async fn update<B: Serialize + ?Sized>(
        &self,
        client: &GenericClient,
        updates: &B,
    ) -> Result<Self, ClientError> {
        client.update(Self::TYPE, self.resource(), updates).await
    }

    /// Fetches a resource by id.
    ///
    /// Returns `Ok(None)` if the server answers 404.
    ///
    /// # Errors
    ///
    /// See [`GenericClient::by_id`]; 404 is not reported as an error.
    async fn by_id(client: &GenericClient, id: &str) -> Result<Option<Self>, ClientError> {
        match client.by_id(Self::TYPE, id).await {
            Ok(found) => Ok(Some(found)),
            Err(error) if error.is_not_found() => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Deletes this resource.
    ///
    /// # Errors
    ///
    /// See [`GenericClient::delete`].
    async fn delete(&self, client: &GenericClient) -> Result<(), ClientError> {
        client.delete(Self::TYPE, self.resource()).await
    }

    /// Re-fetches this resource.
    ///
    /// # Errors
    ///
    /// See [`GenericClient::reload`].
    async fn reload(&self, client: &GenericClient) -> Result<Self, ClientError> {
        client.reload(self.resource()).await
    }

    /// Fetches the page after `page`, or `None` on the last page.
    ///
    /// # Errors
    ///
    /// See [`GenericClient::next_page`].
    async fn next_page(
        client: &GenericClient,
        page: &Collection<Self>,
    ) -> Result<Option<Collection<Self>>, ClientError> {
        client.next_page(page).await
    }

    /// Invokes a named action on this resource without a body.
    ///
    /// # Errors
    ///
    /// See [`GenericClient::action`].
    async fn invoke_action(
        &self,
        client: &GenericClient,
        action: &str,
    ) -> Result<Self, ClientError> {
        client
            .action::<Self, ()>(Self::TYPE, action, self.resource(), None)
            .await
    }
}

//! Navigation envelopes shared by every API object.
//!
//! Every object the API returns embeds a [`Resource`]: its identity plus the
//! links and actions the server offers for it right now. Lists arrive as a
//! [`Collection`] carrying a [`Pagination`] cursor.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Link name addressing the canonical instance of a resource or schema.
pub const SELF_LINK: &str = "self";
/// Link name addressing the collection a resource type lives in.
pub const COLLECTION_LINK: &str = "collection";

/// Operations the generic layer performs against a resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// List a collection (GET on the collection link).
    List,
    /// Create a resource (POST on the collection link).
    Create,
    /// Update a resource (PUT on its self link).
    Update,
    /// Fetch a resource by id (GET on `collection/{id}`).
    ById,
    /// Delete a resource (DELETE on its self link).
    Delete,
}

impl ResourceOperation {
    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Update => "update",
            Self::ById => "lookup by id",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for ResourceOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity and navigation state embedded in every API object.
///
/// Links and actions are per instance: the same type may offer different
/// actions depending on the state the server holds it in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// The resource id.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// The schema type name.
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub type_name: String,

    /// Named navigation links.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub links: HashMap<String, String>,

    /// Named actions currently offered, mapped to their URLs.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub actions: HashMap<String, String>,
}

impl Resource {
    /// Returns the URL of the named link.
    #[must_use]
    pub fn link(&self, name: &str) -> Option<&str> {
        self.links.get(name).map(String::as_str)
    }

    /// Returns the URL of the `self` link.
    #[must_use]
    pub fn self_url(&self) -> Option<&str> {
        self.link(SELF_LINK)
    }

    /// Returns the URL of the named action, if currently offered.
    #[must_use]
    pub fn action(&self, name: &str) -> Option<&str> {
        self.actions.get(name).map(String::as_str)
    }

    /// Returns `true` if the named action is currently offered.
    #[must_use]
    pub fn has_action(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.type_name, self.id)
    }
}

/// Cursor information for a paged collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// URL of the first page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    /// URL of the previous page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    /// URL of the next page; absent on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// Page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    /// Total number of items, when the server counts them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    /// `true` if the page was cut short.
    #[serde(default)]
    pub partial: bool,
}

/// A page of API objects.
///
/// # Example
///
/// ```rust
/// use schema_api::rest::Collection;
///
/// let page: Collection<serde_json::Value> = serde_json::from_str(
///     r#"{"type":"collection","data":[{"id":"1"}],"pagination":{"next":"http://x/y?marker=m1"}}"#,
/// ).unwrap();
///
/// assert_eq!(page.data.len(), 1);
/// assert_eq!(page.next_url(), Some("http://x/y?marker=m1"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection<T> {
    /// Envelope type, normally `collection`.
    #[serde(default, rename = "type")]
    pub type_name: String,
    /// Type name of the items.
    #[serde(default)]
    pub resource_type: String,
    /// Collection-level links.
    #[serde(default)]
    pub links: HashMap<String, String>,
    /// Collection-level actions.
    #[serde(default)]
    pub actions: HashMap<String, String>,
    /// Paging cursor.
    #[serde(default)]
    pub pagination: Option<Pagination>,
    /// The items on this page.
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            type_name: String::new(),
            resource_type: String::new(),
            links: HashMap::new(),
            actions: HashMap::new(),
            pagination: None,
            data: Vec::new(),
        }
    }
}

impl<T> Collection<T> {
    /// Returns the next-page URL, if this is not the last page.
    ///
    /// An empty cursor counts as absent.
    #[must_use]
    pub fn next_url(&self) -> Option<&str> {
        self.pagination
            .as_ref()
            .and_then(|pagination| pagination.next.as_deref())
            .filter(|next| !next.is_empty())
    }

    /// Returns `true` if another page follows this one.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.next_url().is_some()
    }

    /// Returns an iterator over the items on this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

//! Schema document types.
//!
//! A [`SchemaDocument`] is the `{data: [...]}` body served at the API's
//! schema URL. Each [`ResourceSchema`] names a type, the verbs permitted on
//! its collection and on its instances, and the links that locate it.

use std::collections::{BTreeSet, HashMap};

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::clients::HttpMethod;
use crate::rest::{COLLECTION_LINK, SELF_LINK};

/// Path segment the create fallback substitutes with the plural name.
const SCHEMAS_SEGMENT: &str = "schemas";

/// A set of permitted HTTP verbs.
///
/// Verbs the client does not know are dropped while decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Verbs(BTreeSet<HttpMethod>);

impl Verbs {
    /// Creates a verb set from the given methods.
    #[must_use]
    pub fn new(methods: impl IntoIterator<Item = HttpMethod>) -> Self {
        Self(methods.into_iter().collect())
    }

    /// Returns `true` if `method` is permitted.
    #[must_use]
    pub fn allows(&self, method: HttpMethod) -> bool {
        self.0.contains(&method)
    }

    /// Returns the permitted verbs in order.
    pub fn iter(&self) -> impl Iterator<Item = HttpMethod> + '_ {
        self.0.iter().copied()
    }

    /// Returns `true` if no verb is permitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<HttpMethod> for Verbs {
    fn from_iter<I: IntoIterator<Item = HttpMethod>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'de> Deserialize<'de> for Verbs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Option<Vec<String>> = Option::deserialize(deserializer)?;
        let verbs = raw
            .unwrap_or_default()
            .into_iter()
            .filter_map(|verb| match verb.parse::<HttpMethod>() {
                Ok(method) => Some(method),
                Err(_) => {
                    tracing::debug!(%verb, "ignoring unsupported schema verb");
                    None
                }
            })
            .collect();
        Ok(verbs)
    }
}

impl Serialize for Verbs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(HttpMethod::as_str))
    }
}

/// Description of one resource type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSchema {
    /// The type name; unique within a document.
    pub id: String,

    /// Plural form of the type name, as used in collection URLs.
    #[serde(default)]
    pub plural_name: String,

    /// Verbs permitted on the type's collection.
    #[serde(default)]
    pub collection_methods: Verbs,

    /// Verbs permitted on individual instances.
    #[serde(default)]
    pub resource_methods: Verbs,

    /// Named links, normally at least `self` and `collection`.
    #[serde(default)]
    pub links: HashMap<String, String>,
}

impl ResourceSchema {
    /// Returns the URL of the named link.
    #[must_use]
    pub fn link(&self, name: &str) -> Option<&str> {
        self.links.get(name).map(String::as_str)
    }

    /// Returns the `self` link: the URL of this schema entry.
    #[must_use]
    pub fn self_url(&self) -> Option<&str> {
        self.link(SELF_LINK)
    }

    /// Returns the `collection` link.
    #[must_use]
    pub fn collection_url(&self) -> Option<&str> {
        self.link(COLLECTION_LINK)
    }

    /// Derives a collection URL from the `self` link.
    ///
    /// Everything from the first `schemas` segment on is replaced by the
    /// plural name, so `http://h/v1/schemas/publish` becomes
    /// `http://h/v1/publishes`. Returns `None` when there is no `self` link,
    /// no `schemas` segment, or no plural name.
    #[must_use]
    pub fn derived_collection_url(&self) -> Option<String> {
        if self.plural_name.is_empty() {
            return None;
        }
        let self_url = self.self_url()?;
        let index = self_url.find(SCHEMAS_SEGMENT)?;
        Some(format!("{}{}", &self_url[..index], self.plural_name))
    }
}

/// The schema document served by an API root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Schemas in the order the server listed them.
    pub data: Vec<ResourceSchema>,
}

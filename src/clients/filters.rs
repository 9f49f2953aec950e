//! List filters and their query-string encoding.
//!
//! Collection fetches accept a map of filters that is appended to the
//! collection URL as query parameters. A filter holding several values is
//! sent as the same key repeated once per value, in order.

use std::collections::BTreeMap;

use url::Url;

use crate::clients::ClientError;

/// The value of a single list filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterValue {
    /// A scalar value, already rendered as text.
    Single(String),
    /// Several values sent as a repeated query key.
    Many(Vec<String>),
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<u64> for FilterValue {
    fn from(value: u64) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<Vec<&str>> for FilterValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Many(values.into_iter().map(ToString::to_string).collect())
    }
}

/// Options for listing a collection.
///
/// # Example
///
/// ```rust
/// use schema_api::clients::ListOptions;
///
/// let options = ListOptions::new()
///     .filter("state", "active")
///     .filter("tag", vec!["a", "b"])
///     .filter("limit", 50_i64);
///
/// assert_eq!(options.filters.len(), 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Filters keyed by query parameter name.
    pub filters: BTreeMap<String, FilterValue>,
}

impl ListOptions {
    /// Creates empty list options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a filter.
    #[must_use]
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Returns `true` if no filters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

/// Appends `filters` to `url` as query parameters.
///
/// Existing query parameters are kept. With no filters the URL is returned
/// untouched.
///
/// # Errors
///
/// Returns [`ClientError::InvalidUrl`] if filters are present and `url`
/// cannot be parsed.
pub fn append_filters(url: &str, filters: &ListOptions) -> Result<String, ClientError> {
    if filters.is_empty() {
        return Ok(url.to_string());
    }

    let mut parsed = Url::parse(url).map_err(|source| ClientError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    {
        let mut query = parsed.query_pairs_mut();
        for (key, value) in &filters.filters {
            match value {
                FilterValue::Single(value) => {
                    query.append_pair(key, value);
                }
                FilterValue::Many(values) => {
                    for value in values {
                        query.append_pair(key, value);
                    }
                }
            }
        }
    }

    Ok(parsed.into())
}

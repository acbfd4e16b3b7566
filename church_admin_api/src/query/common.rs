//! Shared query infrastructure: the [`Query`] trait, [`QueryCommon`] fields,
//! [`SortDirection`], and the free-form [`Filters`] map.

use std::collections::BTreeMap;
use std::str::FromStr;

use url::Url;

/// Trait implemented by all query builders. Provides URL serialization and
/// shared builder methods for page size, search and ordering.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    /// Blank values are never written.
    fn add_to_url(&self, url: &Url) -> Url;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Requests a page size from the server (`limit`). The server may ignore it.
    fn with_page_size(mut self, page_size: u64) -> Self
    where
        Self: Sized,
    {
        self.get_common().page_size = Some(page_size);
        self
    }

    /// Free-text search. A blank string clears the search.
    fn with_search(mut self, search: &str) -> Self
    where
        Self: Sized,
    {
        self.get_common().search = non_blank(search);
        self
    }

    /// Orders results by a server field.
    fn with_ordering(mut self, field: &str, direction: SortDirection) -> Self
    where
        Self: Sized,
    {
        self.get_common().ordering = non_blank(field).map(|f| (f, direction));
        self
    }
}

/// Sort order for API results.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order (oldest/smallest first).
    Asc,
    /// Descending order (newest/largest first). This is the default.
    #[default]
    Desc,
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(()),
        }
    }
}

/// Fields shared by all query types.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryCommon {
    /// Results per page. `None` uses the server default.
    pub page_size: Option<u64>,
    pub search: Option<String>,
    /// Field name and direction, serialized DRF-style (`-created_at`).
    pub ordering: Option<(String, SortDirection)>,
}

impl QueryCommon {
    /// Appends the common parameters to the URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let Some(page_size) = self.page_size {
            append_non_blank(&mut url, "limit", &page_size.to_string());
        }
        if let Some(search) = &self.search {
            append_non_blank(&mut url, "search", search);
        }
        if let Some((field, direction)) = &self.ordering {
            let prefix = match direction {
                SortDirection::Asc => "",
                SortDirection::Desc => "-",
            };
            append_non_blank(&mut url, "ordering", &format!("{}{}", prefix, field));
        }
        url
    }
}

/// Free-form filter map for endpoints without a dedicated builder.
///
/// Entries with blank values are dropped on insert; some endpoints answer
/// `?status=` with a 500 instead of ignoring it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filters {
    pub common: QueryCommon,
    params: BTreeMap<String, String>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets `key` to `value`, or removes `key` when `value` is blank.
    pub fn insert(&mut self, key: &str, value: &str) {
        match non_blank(value) {
            Some(v) if !key.trim().is_empty() => {
                self.params.insert(key.trim().to_string(), v);
            }
            _ => {
                self.params.remove(key.trim());
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty() && self.common == QueryCommon::default()
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for Filters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut filters = Filters::new();
        for (k, v) in iter {
            filters.insert(k.as_ref(), v.as_ref());
        }
        filters
    }
}

impl Query for Filters {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        for (key, value) in &self.params {
            append_non_blank(&mut url, key, value);
        }
        url
    }
}

pub(crate) fn append_non_blank(url: &mut Url, key: &str, value: &str) {
    if !value.trim().is_empty() {
        url.query_pairs_mut().append_pair(key, value.trim());
    }
}

pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

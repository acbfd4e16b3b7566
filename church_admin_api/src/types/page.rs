//! The [`Page`] model: one fetched slice of a server-side paginated collection.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::Error;

/// Opaque, server-issued locator for an adjacent page (observed as a full URL).
///
/// The client never builds cursors; it only follows the ones a page carries.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Restores a cursor the server issued earlier, e.g. one printed by a
    /// previous run and pasted back by the user. Only checks that it is an
    /// absolute URL; the value is never rewritten.
    pub fn restore(issued: &str) -> Result<Self, Error> {
        let trimmed = issued.trim();
        Url::parse(trimmed).map_err(|e| Error::InvalidCursor(format!("{}: {}", trimmed, e)))?;
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn to_url(&self) -> Result<Url, Error> {
        Url::parse(&self.0).map_err(|e| Error::InvalidCursor(format!("{}: {}", self.0, e)))
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wire shape of a paginated list response.
///
/// Every field is optional: servers omit `limit` routinely and a body
/// without `results` is read as an empty page.
#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct RawPage<T> {
    #[serde(default)]
    count: Option<u64>,
    #[serde(default, alias = "page_size")]
    limit: Option<u64>,
    #[serde(default)]
    next: Option<Cursor>,
    #[serde(default)]
    previous: Option<Cursor>,
    #[serde(default)]
    results: Option<Vec<T>>,
}

impl<T> RawPage<T> {
    pub(crate) fn has_results(&self) -> bool {
        self.results.is_some()
    }
}

impl<T> From<RawPage<T>> for Page<T> {
    fn from(raw: RawPage<T>) -> Self {
        Page {
            items: raw.results.unwrap_or_default(),
            total_count: raw.count.unwrap_or(0),
            next_cursor: raw.next.filter(|c| !c.0.trim().is_empty()),
            previous_cursor: raw.previous.filter(|c| !c.0.trim().is_empty()),
            page_size_hint: raw.limit,
        }
    }
}

/// One fetched page of a remote collection plus its navigation cursors.
///
/// A `Page` is never mutated after construction; moving to another page,
/// filter or view means fetching a new one. Serializes back to the wire shape.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(
    from = "RawPage<T>",
    bound(deserialize = "T: Deserialize<'de>")
)]
pub struct Page<T> {
    #[serde(rename = "results")]
    items: Vec<T>,
    #[serde(rename = "count")]
    total_count: u64,
    #[serde(rename = "next")]
    next_cursor: Option<Cursor>,
    #[serde(rename = "previous")]
    previous_cursor: Option<Cursor>,
    #[serde(rename = "limit", skip_serializing_if = "Option::is_none")]
    page_size_hint: Option<u64>,
}

impl<T> Page<T> {
    /// Records in server order. May exceed `page_size_hint`; that is tolerated.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Total matching records on the server, not on this page.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn next_cursor(&self) -> Option<&Cursor> {
        self.next_cursor.as_ref()
    }

    pub fn previous_cursor(&self) -> Option<&Cursor> {
        self.previous_cursor.as_ref()
    }

    pub fn page_size_hint(&self) -> Option<u64> {
        self.page_size_hint
    }

    pub fn has_next(&self) -> bool {
        self.next_cursor.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous_cursor.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Estimated number of pages in the collection.
    ///
    /// Uses the server's `limit` when present, otherwise this page's own
    /// length. Without a `limit` the figure is a guess and is only meant
    /// for display.
    pub fn estimated_total_pages(&self) -> u64 {
        if self.total_count == 0 {
            return 0;
        }
        let size = match self.page_size_hint {
            Some(hint) if hint > 0 => hint,
            _ => self.items.len() as u64,
        };
        if size == 0 {
            return 1;
        }
        self.total_count.div_ceil(size)
    }

    /// Keeps only the items on this page that match `predicate`.
    ///
    /// Used where the backend has no server-side filter for a field. Only the
    /// records already fetched are inspected, so `total_count` and the cursors
    /// still describe the unfiltered remote collection.
    pub fn filter_local<P>(self, mut predicate: P) -> Page<T>
    where
        P: FnMut(&T) -> bool,
    {
        Page {
            items: self.items.into_iter().filter(|item| predicate(item)).collect(),
            ..self
        }
    }
}

/// Records that carry a workflow status the backend cannot filter on.
pub trait HasStatus {
    fn status(&self) -> Option<&str>;

    /// Case-insensitive status comparison.
    fn has_status(&self, wanted: &str) -> bool {
        self.status()
            .map(|s| s.eq_ignore_ascii_case(wanted.trim()))
            .unwrap_or(false)
    }
}

impl<T: HasStatus> Page<T> {
    /// Local status filter over the fetched page. See [`Page::filter_local`].
    pub fn filter_by_status(self, status: &str) -> Page<T> {
        self.filter_local(|item| item.has_status(status))
    }
}

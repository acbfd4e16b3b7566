//! Reusable paginated-fetch state for list views.
//!
//! [`PageView`] is the per-view state (what is displayed, which page number,
//! whether a request is outstanding). [`Pager`] drives it against a
//! [`PagedResourceClient`] for one endpoint and one filter set.
//!
//! Requests are tagged with a sequence number when issued. A response whose
//! tag is not the latest is dropped, so the view always reflects the most
//! recently requested page even when responses arrive out of order.

use std::sync::{Arc, Mutex, MutexGuard};

use church_admin_api::types::{Cursor, Page};
use church_admin_api::{Error, Filters, PagedResourceClient, Query};
use serde::de::DeserializeOwned;

/// What a list view currently shows.
#[derive(Debug)]
pub enum LoadState<T> {
    /// Nothing requested yet.
    Idle,
    /// A request is outstanding. Display hint only.
    Loading,
    Loaded(Arc<Page<T>>),
    /// The last request failed; holds the message to display.
    Failed(String),
}

impl<T> Clone for LoadState<T> {
    fn clone(&self) -> Self {
        match self {
            LoadState::Idle => LoadState::Idle,
            LoadState::Loading => LoadState::Loading,
            LoadState::Loaded(page) => LoadState::Loaded(Arc::clone(page)),
            LoadState::Failed(msg) => LoadState::Failed(msg.clone()),
        }
    }
}

/// Result of asking a view to load a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The response was applied and is now displayed.
    Loaded,
    /// The request failed; the view shows this message.
    Failed(String),
    /// A newer request was issued before this one completed. Nothing changed.
    Stale,
    /// There is no such page (no cursor). No request was sent.
    Unavailable,
}

/// Handle for one issued request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    seq: u64,
    page_number: Option<u64>,
    source: Option<Cursor>,
}

/// Pagination state owned by a single view.
///
/// The last successfully loaded page stays in place while a request is
/// outstanding and after a request fails, so its cursors remain usable.
#[derive(Debug)]
pub struct PageView<T> {
    page: Option<Arc<Page<T>>>,
    /// 1-based number of the displayed page, `None` when it cannot be known.
    page_number: Option<u64>,
    /// Cursor the displayed page was fetched from; `None` for a first page.
    source: Option<Cursor>,
    loading: bool,
    error: Option<String>,
    issued: u64,
}

impl<T> Default for PageView<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PageView<T> {
    pub fn new() -> Self {
        Self {
            page: None,
            page_number: None,
            source: None,
            loading: false,
            error: None,
            issued: 0,
        }
    }

    /// Marks a request as issued and returns its ticket. Any earlier ticket
    /// becomes stale. `source` is the cursor being fetched, if any.
    pub fn begin(&mut self, page_number: Option<u64>, source: Option<Cursor>) -> Ticket {
        self.issued += 1;
        self.loading = true;
        Ticket {
            seq: self.issued,
            page_number: page_number.map(|n| n.max(1)),
            source,
        }
    }

    /// Applies a response if `ticket` is the latest one issued.
    pub fn complete(&mut self, ticket: Ticket, result: Result<Page<T>, Error>) -> Outcome {
        if ticket.seq != self.issued {
            tracing::warn!(
                "Discarding response for request #{} (latest is #{})",
                ticket.seq,
                self.issued
            );
            return Outcome::Stale;
        }
        self.loading = false;
        match result {
            Ok(page) => {
                self.page = Some(Arc::new(page));
                self.page_number = ticket.page_number;
                self.source = ticket.source;
                self.error = None;
                Outcome::Loaded
            }
            Err(e) => {
                let message = e.user_message();
                self.error = Some(message.clone());
                Outcome::Failed(message)
            }
        }
    }

    pub fn state(&self) -> LoadState<T> {
        if self.loading {
            LoadState::Loading
        } else if let Some(message) = &self.error {
            LoadState::Failed(message.clone())
        } else if let Some(page) = &self.page {
            LoadState::Loaded(Arc::clone(page))
        } else {
            LoadState::Idle
        }
    }

    /// The last page that loaded successfully.
    pub fn page(&self) -> Option<&Arc<Page<T>>> {
        self.page.as_ref()
    }

    pub fn page_number(&self) -> Option<u64> {
        self.page_number
    }

    pub fn source(&self) -> Option<&Cursor> {
        self.source.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the "Next" affordance should be enabled.
    pub fn can_next(&self) -> bool {
        self.page.as_ref().map(|p| p.has_next()).unwrap_or(false)
    }

    pub fn can_previous(&self) -> bool {
        self.page.as_ref().map(|p| p.has_previous()).unwrap_or(false)
    }

    /// One-line summary of the view, e.g. `Page 2 of 3 (37 records)`.
    pub fn status_line(&self) -> String {
        if self.loading {
            return "Loading...".to_string();
        }
        if let Some(message) = &self.error {
            return message.clone();
        }
        let Some(page) = &self.page else {
            return String::new();
        };
        if page.is_empty() && page.total_count() == 0 {
            return "No records found.".to_string();
        }
        let total_pages = page
            .estimated_total_pages()
            .max(self.page_number.unwrap_or(1));
        let number = match self.page_number {
            Some(n) => n.to_string(),
            None => "?".to_string(),
        };
        format!(
            "Page {} of {} ({} records)",
            number,
            total_pages,
            page.total_count()
        )
    }
}

type LocalFilter<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Paginated list of one collection: an endpoint, its filters and the view state.
pub struct Pager<T, Q = Filters> {
    client: PagedResourceClient,
    endpoint: String,
    query: Q,
    local_filter: Option<LocalFilter<T>>,
    view: Mutex<PageView<T>>,
}

impl<T, Q> Pager<T, Q>
where
    T: DeserializeOwned,
    Q: Query,
{
    pub fn new(client: PagedResourceClient, endpoint: impl Into<String>, query: Q) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            query,
            local_filter: None,
            view: Mutex::new(PageView::new()),
        }
    }

    /// Filters each fetched page locally, for fields the server cannot filter on.
    ///
    /// Only the items of the page being displayed are inspected; the total
    /// count and cursors still describe the whole remote collection.
    pub fn with_local_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.local_filter = Some(Box::new(filter));
        self
    }

    /// Replaces the filters. The next `load_first` uses them; the displayed
    /// page is unchanged until then.
    pub fn set_query(&mut self, query: Q) {
        self.query = query;
    }

    pub fn query(&self) -> &Q {
        &self.query
    }

    /// Fetches the first page for the current filters.
    pub async fn load_first(&self) -> Outcome {
        let ticket = self.lock().begin(Some(1), None);
        let result = self
            .client
            .fetch_first_page(&self.endpoint, &self.query)
            .await;
        self.finish(ticket, result)
    }

    /// Fetches the page after the displayed one, if the server issued a cursor for it.
    pub async fn next(&self) -> Outcome {
        let target = {
            let view = self.lock();
            view.page()
                .and_then(|p| p.next_cursor().cloned())
                .map(|c| (c, view.page_number().map(|n| n + 1)))
        };
        self.follow(target).await
    }

    /// Fetches the page before the displayed one, if there is one.
    pub async fn previous(&self) -> Outcome {
        let target = {
            let view = self.lock();
            view.page()
                .and_then(|p| p.previous_cursor().cloned())
                .map(|c| (c, view.page_number().map(|n| n.saturating_sub(1))))
        };
        self.follow(target).await
    }

    /// Fetches the displayed page again. Falls back to the first page when
    /// nothing fetched through a cursor is displayed.
    pub async fn reload(&self) -> Outcome {
        let target = {
            let view = self.lock();
            view.source().cloned().map(|c| (c, view.page_number()))
        };
        match target {
            Some(target) => self.follow(Some(target)).await,
            None => self.load_first().await,
        }
    }

    /// Resumes from a cursor issued in an earlier session. Its page number
    /// is unknown and stays unknown while navigating from it.
    pub async fn open_cursor(&self, cursor: Cursor) -> Outcome {
        self.follow(Some((cursor, None))).await
    }

    async fn follow(&self, target: Option<(Cursor, Option<u64>)>) -> Outcome {
        let Some((cursor, page_number)) = target else {
            return Outcome::Unavailable;
        };
        let ticket = self.lock().begin(page_number, Some(cursor.clone()));
        let result = self.client.fetch_adjacent_page(&cursor).await;
        self.finish(ticket, result)
    }

    fn finish(&self, ticket: Ticket, result: Result<Page<T>, Error>) -> Outcome {
        let result = match &self.local_filter {
            Some(filter) => result.map(|page| page.filter_local(|item| filter(item))),
            None => result,
        };
        self.lock().complete(ticket, result)
    }

    fn lock(&self) -> MutexGuard<'_, PageView<T>> {
        self.view.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<T, Q> Pager<T, Q> {
    /// Snapshot of what the view displays.
    pub fn state(&self) -> LoadState<T> {
        self.view
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .state()
    }

    pub fn current(&self) -> Option<Arc<Page<T>>> {
        self.view
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .page()
            .cloned()
    }

    pub fn page_number(&self) -> Option<u64> {
        self.view
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .page_number()
    }

    pub fn can_next(&self) -> bool {
        self.view.lock().unwrap_or_else(|e| e.into_inner()).can_next()
    }

    pub fn can_previous(&self) -> bool {
        self.view
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .can_previous()
    }

    pub fn status_line(&self) -> String {
        self.view
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .status_line()
    }
}

//! Page walking shared by every list subcommand.

use anyhow::{bail, Result};
use clap::Args;
use church_admin_lib::types::HasStatus;
use church_admin_lib::{validation, Outcome, Pager, Query};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{render, OutputFormat};

#[derive(Args)]
pub struct PagingArgs {
    /// Results per page (the server may ignore this)
    #[arg(long)]
    pub page_size: Option<u64>,

    /// Resume from a cursor printed by an earlier run
    #[arg(long)]
    pub cursor: Option<String>,

    /// Number of pages to fetch, following the server's next links
    #[arg(long, default_value = "1")]
    pub pages: u32,
}

impl PagingArgs {
    /// Applies the page size to `query` after validating it.
    pub fn apply<Q: Query>(&self, query: Q) -> Result<Q> {
        Ok(match self.page_size {
            Some(size) => query.with_page_size(validation::validate_page_size(size)?),
            None => query,
        })
    }
}

/// Restricts each fetched page to records with `status`. Used for collections
/// whose endpoint has no status parameter.
pub fn with_local_status<T, Q>(pager: Pager<T, Q>, status: Option<String>) -> Pager<T, Q>
where
    T: HasStatus + DeserializeOwned + 'static,
    Q: Query,
{
    match status {
        Some(status) => pager.with_local_filter(move |item: &T| item.has_status(&status)),
        None => pager,
    }
}

/// Fetches up to `paging.pages` pages, printing a status line for each, then
/// renders every collected row at once.
pub async fn list<T, Q, R>(
    pager: Pager<T, Q>,
    paging: &PagingArgs,
    format: &OutputFormat,
    rows: fn(&[T]) -> Vec<R>,
) -> Result<()>
where
    T: DeserializeOwned,
    Q: Query,
    R: Tabled + Serialize,
{
    let mut outcome = match &paging.cursor {
        Some(raw) => {
            let cursor = validation::validate_cursor(raw)?;
            pager.open_cursor(cursor).await
        }
        None => pager.load_first().await,
    };

    let mut collected = Vec::new();
    let mut fetched = 0;
    loop {
        match outcome {
            Outcome::Loaded => {}
            Outcome::Failed(message) => bail!("{}", message),
            Outcome::Stale | Outcome::Unavailable => break,
        }
        fetched += 1;
        eprintln!("{}", pager.status_line());
        if let Some(page) = pager.current() {
            collected.extend(rows(page.items()));
        }
        if fetched >= paging.pages.max(1) || !pager.can_next() {
            break;
        }
        outcome = pager.next().await;
    }

    if let Some(next) = pager.current().and_then(|p| p.next_cursor().cloned()) {
        eprintln!("More results: --cursor '{}'", next);
    }

    render(&collected, format)
}

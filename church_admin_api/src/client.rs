//! HTTP client for the church administration API's paginated collections.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{ChurchQuery, FinanceQuery, Query, UserQuery, ZoneQuery},
    types::{
        Church, Cursor, Expense, FundTransfer, Page, RawPage, Remittance, Resource, TopUp, User,
        Zone,
    },
    Error, ErrorBody,
};

/// Request timeout used when the caller does not configure one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches single pages of remote paginated collections.
///
/// Holds no state between calls: every fetch is an independent GET. There is
/// no retry and no cancellation; ordering of concurrent responses is the
/// caller's concern.
#[derive(Clone)]
pub struct PagedResourceClient {
    http: reqwest::Client,
    /// Bearer token for access-controlled collections.
    token: Option<String>,
}

impl PagedResourceClient {
    pub fn new(token: Option<String>, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        Ok(Self {
            http,
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    /// Fetches the first page of `endpoint` narrowed by `filters`.
    ///
    /// `endpoint` must be an absolute http(s) URL. Blank filter values are
    /// left out of the query string.
    pub async fn fetch_first_page<T, Q>(&self, endpoint: &str, filters: &Q) -> Result<Page<T>, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = parse_endpoint(endpoint)?;
        self.get_page(filters.add_to_url(&url)).await
    }

    /// Fetches the page a previous response pointed to, following the cursor verbatim.
    pub async fn fetch_adjacent_page<T>(&self, cursor: &Cursor) -> Result<Page<T>, Error>
    where
        T: DeserializeOwned,
    {
        self.get_page(cursor.to_url()?).await
    }

    async fn get_page<T>(&self, url: Url) -> Result<Page<T>, Error>
    where
        T: DeserializeOwned,
    {
        tracing::debug!("GET {}", url);
        let mut request = self
            .http
            .get(url.clone())
            .header("accept", "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let resp = request.send().await.map_err(|e| {
            tracing::error!("Failed to get {}: {}", url, e);
            Error::RequestFailed
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            tracing::error!(
                "Request to {} failed with status {}: {}",
                url,
                status,
                truncate_body(&body)
            );
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: ErrorBody::parse(&body),
            });
        }

        let raw = serde_json::from_str::<RawPage<T>>(&body).map_err(|e| {
            tracing::error!("Failed to parse page: {} | body: {}", e, truncate_body(&body));
            Error::Decode
        })?;
        if !raw.has_results() {
            tracing::warn!("Response from {} has no `results`; treating as empty", url);
        }
        Ok(raw.into())
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, Error> {
    let trimmed = endpoint.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidEndpoint("endpoint is empty".to_string()));
    }
    let url = Url::parse(trimmed).map_err(|e| Error::InvalidEndpoint(format!("{}: {}", trimmed, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::InvalidEndpoint(format!(
            "{}: unsupported scheme '{}'",
            trimmed, other
        ))),
    }
}

/// Typed access to every collection of the admin API under one base URL.
#[derive(Clone)]
pub struct Client {
    pages: PagedResourceClient,
    base_api_url: String,
}

impl Client {
    /// Creates a client for the API rooted at `base_url`.
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, Error> {
        Self::with_timeout(base_url, token, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, Error> {
        parse_endpoint(base_url)?;
        Ok(Self {
            pages: PagedResourceClient::new(token, timeout)?,
            base_api_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    /// Absolute collection URL for `resource`.
    pub fn endpoint(&self, resource: Resource) -> String {
        format!("{}{}", self.base_api_url, resource.path())
    }

    pub fn pages(&self) -> &PagedResourceClient {
        &self.pages
    }

    /// Fetches the first page of a fund transfer list.
    pub async fn fund_transfers(&self, query: &FinanceQuery) -> Result<Page<FundTransfer>, Error> {
        self.first(Resource::FundTransfers, query).await
    }

    pub async fn remittances(&self, query: &FinanceQuery) -> Result<Page<Remittance>, Error> {
        self.first(Resource::Remittances, query).await
    }

    pub async fn top_ups(&self, query: &FinanceQuery) -> Result<Page<TopUp>, Error> {
        self.first(Resource::TopUps, query).await
    }

    pub async fn expenses(&self, query: &FinanceQuery) -> Result<Page<Expense>, Error> {
        self.first(Resource::Expenses, query).await
    }

    /// Member directory search.
    pub async fn users(&self, query: &UserQuery) -> Result<Page<User>, Error> {
        self.first(Resource::Users, query).await
    }

    pub async fn churches(&self, query: &ChurchQuery) -> Result<Page<Church>, Error> {
        self.first(Resource::Churches, query).await
    }

    pub async fn zones(&self, query: &ZoneQuery) -> Result<Page<Zone>, Error> {
        self.first(Resource::Zones, query).await
    }

    /// Fetches the page after `page`, or `None` when the server reported none.
    pub async fn next_page<T>(&self, page: &Page<T>) -> Result<Option<Page<T>>, Error>
    where
        T: DeserializeOwned,
    {
        match page.next_cursor() {
            Some(cursor) => self.pages.fetch_adjacent_page(cursor).await.map(Some),
            None => Ok(None),
        }
    }

    /// Fetches the page before `page`, or `None` on the first page.
    pub async fn previous_page<T>(&self, page: &Page<T>) -> Result<Option<Page<T>>, Error>
    where
        T: DeserializeOwned,
    {
        match page.previous_cursor() {
            Some(cursor) => self.pages.fetch_adjacent_page(cursor).await.map(Some),
            None => Ok(None),
        }
    }

    async fn first<T, Q>(&self, resource: Resource, query: &Q) -> Result<Page<T>, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        self.pages
            .fetch_first_page(&self.endpoint(resource), query)
            .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_must_be_absolute_http() {
        assert!(parse_endpoint("https://api.example.org/churches/").is_ok());
        assert!(matches!(parse_endpoint("  "), Err(Error::InvalidEndpoint(_))));
        assert!(matches!(
            parse_endpoint("/churches/"),
            Err(Error::InvalidEndpoint(_))
        ));
        assert!(matches!(
            parse_endpoint("mailto:office@example.org"),
            Err(Error::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn endpoint_joins_base_and_path() {
        let client = Client::new("https://api.example.org/v1/", None).unwrap();
        assert_eq!(
            client.endpoint(Resource::Zones),
            "https://api.example.org/v1/churches/zones/"
        );
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "é".repeat(1500);
        let out = truncate_body(&body);
        assert!(out.ends_with("...[truncated]"));
    }
}

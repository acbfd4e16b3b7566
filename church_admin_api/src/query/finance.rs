use url::Url;

use super::common::{append_non_blank, non_blank, Query, QueryCommon};

/// Filters shared by the fund transfer, remittance, top-up and expense lists.
#[derive(Clone, Debug, Default)]
pub struct FinanceQuery {
    pub common: QueryCommon,
    pub status: Option<String>,
    pub church: Option<String>,
    pub zone: Option<String>,
    /// Inclusive lower bound, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD`.
    pub end_date: Option<String>,
}

impl Query for FinanceQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        let pairs = [
            ("status", &self.status),
            ("church", &self.church),
            ("zone", &self.zone),
            ("start_date", &self.start_date),
            ("end_date", &self.end_date),
        ];
        for (key, value) in pairs {
            if let Some(value) = value {
                append_non_blank(&mut url, key, value);
            }
        }
        url
    }
}

impl FinanceQuery {
    /// Server-side status filter. Only some finance endpoints honour it; see
    /// `Resource::supports_status_filter`.
    pub fn with_status(mut self, status: &str) -> Self {
        self.status = non_blank(status);
        self
    }

    pub fn with_church(mut self, church: &str) -> Self {
        self.church = non_blank(church);
        self
    }

    pub fn with_zone(mut self, zone: &str) -> Self {
        self.zone = non_blank(zone);
        self
    }

    pub fn with_date_range(mut self, start: Option<&str>, end: Option<&str>) -> Self {
        self.start_date = start.and_then(non_blank);
        self.end_date = end.and_then(non_blank);
        self
    }
}

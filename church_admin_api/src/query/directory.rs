use url::Url;

use super::common::{append_non_blank, non_blank, Query, QueryCommon};

/// Member directory search.
#[derive(Clone, Debug, Default)]
pub struct UserQuery {
    pub common: QueryCommon,
    pub church: Option<String>,
    pub role: Option<String>,
}

impl Query for UserQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(church) = &self.church {
            append_non_blank(&mut url, "church", church);
        }
        if let Some(role) = &self.role {
            append_non_blank(&mut url, "role", role);
        }
        url
    }
}

impl UserQuery {
    pub fn with_church(mut self, church: &str) -> Self {
        self.church = non_blank(church);
        self
    }

    pub fn with_role(mut self, role: &str) -> Self {
        self.role = non_blank(role);
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct ChurchQuery {
    pub common: QueryCommon,
    pub zone: Option<String>,
}

impl Query for ChurchQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(zone) = &self.zone {
            append_non_blank(&mut url, "zone", zone);
        }
        url
    }
}

impl ChurchQuery {
    pub fn with_zone(mut self, zone: &str) -> Self {
        self.zone = non_blank(zone);
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct ZoneQuery {
    pub common: QueryCommon,
}

impl Query for ZoneQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        self.common.add_to_url(url)
    }
}

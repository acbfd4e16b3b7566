use std::fmt;
use std::str::FromStr;

/// Remote collections exposed by the admin backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    FundTransfers,
    Remittances,
    TopUps,
    Expenses,
    Users,
    Churches,
    Zones,
}

impl Resource {
    pub const ALL: [Resource; 7] = [
        Resource::FundTransfers,
        Resource::Remittances,
        Resource::TopUps,
        Resource::Expenses,
        Resource::Users,
        Resource::Churches,
        Resource::Zones,
    ];

    /// Collection path relative to the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Resource::FundTransfers => "/finance/fund-transfers/",
            Resource::Remittances => "/finance/remittances/",
            Resource::TopUps => "/finance/top-ups/",
            Resource::Expenses => "/finance/expenses/",
            Resource::Users => "/accounts/users/",
            Resource::Churches => "/churches/",
            Resource::Zones => "/churches/zones/",
        }
    }

    /// Whether the backend accepts a `status` query parameter for this collection.
    /// Where it does not, status filtering happens locally on the fetched page.
    pub fn supports_status_filter(&self) -> bool {
        matches!(self, Resource::FundTransfers | Resource::Expenses)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Resource::FundTransfers => "funds",
            Resource::Remittances => "remittances",
            Resource::TopUps => "top-ups",
            Resource::Expenses => "expenses",
            Resource::Users => "users",
            Resource::Churches => "churches",
            Resource::Zones => "zones",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Resource {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|r| r.to_string() == s.trim().to_lowercase())
            .ok_or(())
    }
}

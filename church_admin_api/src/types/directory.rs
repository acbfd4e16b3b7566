//! Member directory, church and zone records.

use serde::{Deserialize, Serialize};

use super::page::HasStatus;
use super::scalar::RecordId;

/// A member or staff account as returned by user search.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct User {
    pub id: RecordId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub role: Option<String>,
    pub church_name: Option<String>,
    pub is_active: Option<bool>,
}

impl User {
    /// First and last name joined, or the email when both are blank.
    pub fn display_name(&self) -> String {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if name.is_empty() {
            self.email.clone().unwrap_or_default()
        } else {
            name
        }
    }
}

impl HasStatus for User {
    fn status(&self) -> Option<&str> {
        self.is_active.map(|active| if active { "active" } else { "inactive" })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Church {
    pub id: RecordId,
    pub name: Option<String>,
    pub zone_name: Option<String>,
    pub address: Option<String>,
    pub pastor: Option<String>,
    pub status: Option<String>,
}

impl HasStatus for Church {
    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

/// A grouping of churches under one coordinator.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Zone {
    pub id: RecordId,
    pub name: Option<String>,
    pub coordinator: Option<String>,
    pub church_count: Option<u64>,
}

//! Lenient scalar wrappers for values the backend sends as either text or numbers.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A monetary amount as the backend sends it.
///
/// Decimal fields arrive as strings (`"1500.00"`) from most endpoints and as
/// bare numbers from a few. The text is kept as-is so no precision is lost.
#[derive(Serialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct Amount(String);

impl Amount {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        text_or_number(deserializer).map(Amount)
    }
}

/// Primary key of a record. Integer on most endpoints, UUID text on users.
#[derive(Serialize, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        text_or_number(deserializer).map(RecordId)
    }
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Wire::deserialize(deserializer)? {
        Wire::Text(s) => s,
        Wire::Number(n) => n.to_string(),
    })
}

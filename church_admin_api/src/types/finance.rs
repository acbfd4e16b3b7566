//! Finance workflow records: fund transfers, remittances, top-ups and expenses.

use serde::{Deserialize, Serialize};

use super::page::HasStatus;
use super::scalar::{Amount, RecordId};

/// A request to move money between two funds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct FundTransfer {
    pub id: RecordId,
    pub reference: Option<String>,
    pub source_fund: Option<String>,
    pub destination_fund: Option<String>,
    pub amount: Option<Amount>,
    /// Workflow status, e.g. `pending`, `approved`, `rejected`.
    pub status: Option<String>,
    pub church_name: Option<String>,
    pub requested_by: Option<String>,
    pub created_at: Option<String>,
}

/// Money a church sends up to its zone or headquarters for a period.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Remittance {
    pub id: RecordId,
    pub reference: Option<String>,
    pub church_name: Option<String>,
    pub amount: Option<Amount>,
    /// Remittance period label, e.g. `2024-03`.
    pub period: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
}

/// A credit applied to a church fund.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct TopUp {
    pub id: RecordId,
    pub reference: Option<String>,
    pub fund: Option<String>,
    pub church_name: Option<String>,
    pub amount: Option<Amount>,
    pub status: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Expense {
    pub id: RecordId,
    pub description: Option<String>,
    pub category: Option<String>,
    pub church_name: Option<String>,
    pub amount: Option<Amount>,
    pub status: Option<String>,
    pub created_at: Option<String>,
}

macro_rules! impl_has_status {
    ($($t:ty),*) => {
        $(impl HasStatus for $t {
            fn status(&self) -> Option<&str> {
                self.status.as_deref()
            }
        })*
    };
}

impl_has_status!(FundTransfer, Remittance, TopUp, Expense);

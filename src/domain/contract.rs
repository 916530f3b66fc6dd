use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Contract status as stored, with unknown strings preserved.
///
/// The status set is open: planner/supplier flows write statuses this service
/// has no say over, so anything unrecognized round-trips through `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContractStatus {
    Pending,
    Approved,
    Cancelled,
    Completed,
    Other(String),
}

impl From<String> for ContractStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Pending" => Self::Pending,
            "Approved" => Self::Approved,
            "Cancelled" => Self::Cancelled,
            "Completed" => Self::Completed,
            _ => Self::Other(raw),
        }
    }
}

impl From<ContractStatus> for String {
    fn from(status: ContractStatus) -> Self {
        match status {
            ContractStatus::Pending => "Pending".into(),
            ContractStatus::Approved => "Approved".into(),
            ContractStatus::Cancelled => "Cancelled".into(),
            ContractStatus::Completed => "Completed".into(),
            ContractStatus::Other(raw) => raw,
        }
    }
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("Pending"),
            Self::Approved => f.write_str("Approved"),
            Self::Cancelled => f.write_str("Cancelled"),
            Self::Completed => f.write_str("Completed"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

/// A supplier/planner contract tied to an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: String,
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub supplier_id: Option<String>,
    #[serde(default)]
    pub planner_id: Option<String>,
    pub status: ContractStatus,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

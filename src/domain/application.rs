use serde::{Deserialize, Serialize};

/// Supplier application status, with unknown strings preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApplicationStatus {
    Approved,
    Pending,
    Other(String),
}

impl From<String> for ApplicationStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Approved" => Self::Approved,
            "Pending" => Self::Pending,
            _ => Self::Other(raw),
        }
    }
}

impl From<ApplicationStatus> for String {
    fn from(status: ApplicationStatus) -> Self {
        match status {
            ApplicationStatus::Approved => "Approved".into(),
            ApplicationStatus::Pending => "Pending".into(),
            ApplicationStatus::Other(raw) => raw,
        }
    }
}

/// A supplier's application to work an event. Read-only to the sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    #[serde(default)]
    pub event_id: Option<String>,
    pub status: ApplicationStatus,
}

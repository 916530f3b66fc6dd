use serde::{Deserialize, Serialize};

/// Payment transaction status. Wire forms are upper-case (`HOLD`, `COMPLETED`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionStatus {
    Hold,
    Completed,
    Other(String),
}

impl From<String> for TransactionStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "HOLD" => Self::Hold,
            "COMPLETED" => Self::Completed,
            _ => Self::Other(raw),
        }
    }
}

impl From<TransactionStatus> for String {
    fn from(status: TransactionStatus) -> Self {
        match status {
            TransactionStatus::Hold => "HOLD".into(),
            TransactionStatus::Completed => "COMPLETED".into(),
            TransactionStatus::Other(raw) => raw,
        }
    }
}

/// A payment transaction tied to a contract. Read-only to the sweep; its mere
/// presence in HOLD or COMPLETED state counts as contract activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: String,
    #[serde(default)]
    pub contract_id: Option<String>,
    pub status: TransactionStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_uses_wire_case() {
        assert_eq!(
            TransactionStatus::from("HOLD".to_string()),
            TransactionStatus::Hold
        );
        assert_eq!(String::from(TransactionStatus::Completed), "COMPLETED");
        // Lower-case is a different value on the wire.
        assert_eq!(
            TransactionStatus::from("hold".to_string()),
            TransactionStatus::Other("hold".into())
        );
    }
}

use serde::{Deserialize, Serialize};

/// A booked third-party delivery. Read-only to the sweep; its existence alone
/// counts as contract activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub id: String,
    #[serde(default)]
    pub contract_id: Option<String>,
}

use serde::{Deserialize, Serialize};

/// Parameters of the self-send transaction offered by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionConfig {
    /// Amount in base units of `peer.main_denom`, as a decimal string.
    pub self_send_amount: String,
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            self_send_amount: format!("1{}", "0".repeat(18)),
        }
    }
}

use serde::{Deserialize, Serialize};

/// How a finished broadcast is surfaced to the user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TxResponseMode {
    /// Interactive notice the user has to acknowledge.
    #[default]
    Alert,
    /// Error/info log line only.
    Log,
}

/// Bridge runtime behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Collapse scroll/resize bursts into one geometry push per poll.
    pub coalesce_layout_events: bool,
    pub tx_response: TxResponseMode,
    /// Capacity of the bridge event bus (valid range: 1-4096).
    pub event_capacity: u32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            coalesce_layout_events: true,
            tx_response: TxResponseMode::Alert,
            event_capacity: 64,
        }
    }
}

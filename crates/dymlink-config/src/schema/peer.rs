use serde::{Deserialize, Serialize};

/// Where the peer widget lives and what it is allowed to do.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PeerConfig {
    /// Base URL of the peer deployment. Its origin is the only origin the
    /// bridge accepts messages from.
    pub base_url: String,
    /// Network identifiers the peer may connect to.
    pub network_ids: Vec<String>,
    /// Native denomination used for self-send transactions.
    pub main_denom: String,
    /// Path of the connect view below `base_url`.
    pub frame_path: String,
    /// Deep link: open the peer directly on this account view.
    pub qr_account: Option<String>,
}

impl Default for PeerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".into(),
            network_ids: vec!["evmtestiroagain_283331-1".into()],
            main_denom: "aevm".into(),
            frame_path: "/connect".into(),
            qr_account: None,
        }
    }
}

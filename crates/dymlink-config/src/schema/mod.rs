//! Configuration schema types for dymlink.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod appearance;
mod bridge;
mod peer;
mod system;
mod transaction;

pub use appearance::*;
pub use bridge::*;
pub use peer::*;
pub use system::*;
pub use transaction::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for dymlink.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DymlinkConfig {
    pub peer: PeerConfig,
    pub appearance: AppearanceConfig,
    pub bridge: BridgeConfig,
    pub transaction: TransactionConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use dymlink_common::MenuAlign;

    #[test]
    fn default_peer_section() {
        let config = DymlinkConfig::default();
        assert_eq!(config.peer.base_url, "http://localhost:3000");
        assert_eq!(config.peer.network_ids, vec!["evmtestiroagain_283331-1"]);
        assert_eq!(config.peer.main_denom, "aevm");
        assert_eq!(config.peer.frame_path, "/connect");
        assert!(config.peer.qr_account.is_none());
    }

    #[test]
    fn default_appearance_section() {
        let config = DymlinkConfig::default();
        assert_eq!(config.appearance.menu_align, MenuAlign::Center);
        assert_eq!(config.appearance.styles["--black-light"], "rgb(63 81 59)");
        assert_eq!(config.appearance.styles["--black-dark-rgb"], "27, 40, 24");
        assert_eq!(
            config.appearance.styles["--background-color-secondary"],
            "rgb(63 78 63)"
        );
    }

    #[test]
    fn default_bridge_section() {
        let config = DymlinkConfig::default();
        assert!(config.bridge.coalesce_layout_events);
        assert_eq!(config.bridge.tx_response, TxResponseMode::Alert);
        assert_eq!(config.bridge.event_capacity, 64);
    }

    #[test]
    fn default_transaction_and_logging() {
        let config = DymlinkConfig::default();
        assert_eq!(config.transaction.self_send_amount, "1000000000000000000");
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let toml_str = r#"
[peer]
base_url = "https://connect.example.org"

[bridge]
tx_response = "log"
"#;
        let config: DymlinkConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.peer.base_url, "https://connect.example.org");
        assert_eq!(config.peer.main_denom, "aevm");
        assert_eq!(config.bridge.tx_response, TxResponseMode::Log);
        assert!(config.bridge.coalesce_layout_events);
    }

    #[test]
    fn styles_table_replaces_defaults() {
        let toml_str = r##"
[appearance.styles]
"--background-color" = "#101010"
"##;
        let config: DymlinkConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.appearance.styles.len(), 1);
        assert_eq!(config.appearance.styles["--background-color"], "#101010");
    }

    #[test]
    fn qr_account_and_align_parse() {
        let toml_str = r#"
[peer]
qr_account = "abc123"

[appearance]
menu_align = "right"
"#;
        let config: DymlinkConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.peer.qr_account.as_deref(), Some("abc123"));
        assert_eq!(config.appearance.menu_align, MenuAlign::Right);
    }

    #[test]
    fn log_level_parses_uppercase() {
        let toml_str = "[logging]\nlevel = \"DEBUG\"\n";
        let config: DymlinkConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.level.directive(), "dymlink=debug");
    }
}

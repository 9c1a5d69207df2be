//! dymlink configuration system.
//!
//! TOML-based configuration for the embedding surface: which peer to frame,
//! which networks it may use, how the peer is styled, and how the bridge
//! reports transaction results. All sections use serde defaults so partial
//! configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use dymlink_config::{load_config, config_to_json};
//!
//! let config = load_config(None).expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{DymlinkConfig, CONFIG_SCHEMA_VERSION};

use dymlink_common::ConfigError;
use std::path::Path;

/// Load config from `path`, or from the platform default path when `None`.
///
/// The default path is created from the commented template when missing.
/// The result is validated; invalid configs are an error here (the lower
/// level loaders only warn).
pub fn load_config(path: Option<&Path>) -> Result<DymlinkConfig, ConfigError> {
    let config = match path {
        Some(p) => toml_loader::load_from_path(p)?,
        None => toml_loader::load_default()?,
    };

    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &DymlinkConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

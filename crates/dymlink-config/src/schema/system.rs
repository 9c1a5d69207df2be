//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Log level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// `tracing_subscriber::EnvFilter` directive for the dymlink crates.
    pub fn directive(&self) -> &'static str {
        match self {
            LogLevel::Debug => "dymlink=debug",
            LogLevel::Info => "dymlink=info",
            LogLevel::Warning => "dymlink=warn",
            LogLevel::Error => "dymlink=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

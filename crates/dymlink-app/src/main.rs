mod cli;
mod commands;

use std::process::ExitCode;

use dymlink_common::ConfigError;
use dymlink_config::DymlinkConfig;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

const DEFAULT_LOG_DIRECTIVE: &str = "dymlink=info";

fn build_filter(directive: &str) -> EnvFilter {
    let filter = EnvFilter::from_default_env();
    match directive
        .parse::<Directive>()
        .or_else(|_| DEFAULT_LOG_DIRECTIVE.parse())
    {
        Ok(d) => filter.add_directive(d),
        Err(_) => filter,
    }
}

/// Start logging before anything else runs. The returned handle swaps the
/// filter once the config file has been read.
fn init_logging(directive: &str) -> reload::Handle<EnvFilter, Registry> {
    let (filter, handle) = reload::Layer::new(build_filter(directive));

    // stdout carries command output; logs go to stderr.
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
    handle
}

/// The config's log level applies only when `--log-level` was not given.
fn config_directive(cli_level: Option<&str>, config: &DymlinkConfig) -> Option<&'static str> {
    match cli_level {
        Some(_) => None,
        None => Some(config.logging.level.directive()),
    }
}

/// Apply `--qr-account` and re-check the result like a config file value.
fn apply_qr_account(config: &mut DymlinkConfig, account: Option<String>) -> Result<(), ConfigError> {
    let Some(account) = account else {
        return Ok(());
    };
    tracing::info!(account = %account, "deep-link account override");
    config.peer.qr_account = Some(account);
    dymlink_config::validation::validate(config)
}

fn main() -> ExitCode {
    let args = cli::parse();

    let log_handle = init_logging(args.log_level.as_deref().unwrap_or(DEFAULT_LOG_DIRECTIVE));
    tracing::debug!("dymlink v{} starting", env!("CARGO_PKG_VERSION"));

    let mut config = match dymlink_config::load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) if args.config.is_some() => {
            tracing::error!("Config load failed: {e}");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            tracing::warn!("Config load failed, using defaults: {e}");
            DymlinkConfig::default()
        }
    };

    if let Some(directive) = config_directive(args.log_level.as_deref(), &config) {
        if let Err(e) = log_handle.reload(build_filter(directive)) {
            tracing::warn!("Failed to apply config log level: {e}");
        }
    }

    if let Err(e) = apply_qr_account(&mut config, args.qr_account) {
        tracing::error!("{e}");
        return ExitCode::FAILURE;
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match commands::run(&args.command, &config, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dymlink_config::schema::LogLevel;

    #[test]
    fn cli_log_level_wins_over_config() {
        let mut config = DymlinkConfig::default();
        config.logging.level = LogLevel::Debug;
        assert_eq!(config_directive(Some("dymlink=warn"), &config), None);
        assert_eq!(config_directive(None, &config), Some("dymlink=debug"));
    }

    #[test]
    fn unparsable_directive_falls_back_to_default() {
        let filter = build_filter("dymlink=[[[");
        assert!(filter.to_string().contains("dymlink=info"));
    }

    #[test]
    fn qr_account_override_is_validated() {
        let mut config = DymlinkConfig::default();
        let err = apply_qr_account(&mut config, Some("dym1-abc!".into())).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(ref m) if m.contains("qr_account")));

        let mut config = DymlinkConfig::default();
        apply_qr_account(&mut config, Some("dym1abc".into())).unwrap();
        assert_eq!(config.peer.qr_account.as_deref(), Some("dym1abc"));
    }

    #[test]
    fn missing_qr_account_leaves_config_alone() {
        let mut config = DymlinkConfig::default();
        apply_qr_account(&mut config, None).unwrap();
        assert!(config.peer.qr_account.is_none());
    }
}

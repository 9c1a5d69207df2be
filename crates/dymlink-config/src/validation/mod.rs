//! Full configuration validation.
//!
//! Each section has its own submodule; this orchestrator calls them all and
//! collects errors into a single `ConfigError`.

mod appearance;
mod helpers;
mod misc;
mod peer;


use crate::schema::DymlinkConfig;
use dymlink_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &DymlinkConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    peer::validate_peer(&mut errors, config);
    appearance::validate_appearance(&mut errors, config);
    misc::validate_bridge(&mut errors, config);
    misc::validate_transaction(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

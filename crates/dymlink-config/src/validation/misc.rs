//! Validation for the smaller sections: bridge and transaction.

use crate::schema::DymlinkConfig;

use super::helpers::{validate_non_empty, validate_range};

/// Validate bridge runtime constraints.
pub(crate) fn validate_bridge(errors: &mut Vec<String>, config: &DymlinkConfig) {
    validate_range(
        errors,
        "bridge.event_capacity",
        config.bridge.event_capacity,
        1,
        4096,
    );
}

/// Validate the self-send amount.
pub(crate) fn validate_transaction(errors: &mut Vec<String>, config: &DymlinkConfig) {
    let amount = &config.transaction.self_send_amount;
    validate_non_empty(errors, "transaction.self_send_amount", amount);
    if !amount.chars().all(|c| c.is_ascii_digit()) {
        errors.push(format!(
            "transaction.self_send_amount '{amount}' must be a decimal integer"
        ));
    }
}

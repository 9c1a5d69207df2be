//! Host-side policies for surfacing peer-reported results.
//!
//! The protocol only says a result must reach the user once; whether that
//! is an interactive notice or a log line is up to the embedding application.

use tracing::{error, info};

use crate::arbiter::TxOutcome;

/// Called exactly once per resolved broadcast.
pub type TxResponsePolicy = Box<dyn FnMut(&TxOutcome)>;

/// Called exactly once per `wallet-error` event, with the peer's message.
pub type WalletErrorPolicy = Box<dyn FnMut(&str)>;

/// Default broadcast policy: log only.
pub fn log_tx_response(outcome: &TxOutcome) {
    match outcome {
        TxOutcome::Success(response) => info!(%response, "transaction broadcast succeeded"),
        TxOutcome::Failure(message) => error!(%message, "transaction broadcast failed"),
    }
}

/// Default wallet error policy: log only.
pub fn log_wallet_error(message: &str) {
    error!(message, "wallet error reported by peer");
}

//! Wallet connection state machine.
//!
//! ```text
//! Disconnected --ready--> Ready --connect--> Connected --disconnect--> Ready
//! ```
//!
//! Only validated peer events move it. Once the peer has signalled `ready`,
//! a disconnect returns to `Ready`, never to `Disconnected`.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Label of the host trigger while no wallet is connected.
pub const CONNECT_LABEL: &str = "Connect";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Ready,
    Connected,
}

/// Snapshot of the current wallet session.
///
/// `address` and `hex_address` are non-empty exactly when `status` is
/// `Connected`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ConnectionSession {
    pub status: ConnectionStatus,
    pub address: String,
    pub hex_address: String,
}

/// Owner of the [`ConnectionSession`].
#[derive(Debug, Default)]
pub struct ConnectionState {
    session: ConnectionSession,
    seen_ready: bool,
}

impl ConnectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &ConnectionSession {
        &self.session
    }

    pub fn status(&self) -> ConnectionStatus {
        self.session.status
    }

    pub fn is_connected(&self) -> bool {
        self.session.status == ConnectionStatus::Connected
    }

    /// The host connect control is usable once the peer is at least ready.
    pub fn connect_enabled(&self) -> bool {
        self.session.status >= ConnectionStatus::Ready
    }

    /// Text of the host trigger: the hex address when connected.
    pub fn trigger_label(&self) -> &str {
        if self.is_connected() {
            &self.session.hex_address
        } else {
            CONNECT_LABEL
        }
    }

    /// Peer signalled readiness. Returns whether the status changed.
    pub fn on_ready(&mut self) -> bool {
        self.seen_ready = true;
        if self.session.status == ConnectionStatus::Disconnected {
            self.session.status = ConnectionStatus::Ready;
            debug!("peer ready");
            return true;
        }
        false
    }

    /// A wallet connected. Returns `false` (and leaves the session alone) if
    /// either address is empty.
    pub fn on_connect(&mut self, address: &str, hex_address: &str) -> bool {
        if address.is_empty() || hex_address.is_empty() {
            warn!(
                address_len = address.len(),
                hex_address_len = hex_address.len(),
                "connect event ignored: empty address"
            );
            return false;
        }

        // A connect implies the peer is up even if `ready` was never seen.
        self.seen_ready = true;
        self.session = ConnectionSession {
            status: ConnectionStatus::Connected,
            address: address.to_string(),
            hex_address: hex_address.to_string(),
        };
        debug!(hex_address, "wallet connected");
        true
    }

    /// The wallet disconnected. Returns whether the session changed.
    pub fn on_disconnect(&mut self) -> bool {
        let next = if self.seen_ready {
            ConnectionStatus::Ready
        } else {
            ConnectionStatus::Disconnected
        };
        let previous = std::mem::replace(
            &mut self.session,
            ConnectionSession {
                status: next,
                ..ConnectionSession::default()
            },
        );
        if previous.status == ConnectionStatus::Connected {
            debug!("wallet disconnected");
        }
        previous != self.session
    }

    /// The peer frame went away: forget everything, including readiness.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

//! Host-side bridge to an embedded wallet-connection widget.
//!
//! The widget (the *peer*) runs in an isolated frame and is reachable only
//! through a structured message channel. This crate provides:
//! - The wire protocol as tagged enums (`OutboundMessage`, `InboundMessage`)
//! - A provenance-checked channel over a pluggable `PeerTransport`
//! - Independent state machines for connection, visibility, transaction
//!   arbitration and notifications
//! - Trigger geometry synchronization
//! - A `Bridge` that wires all of it behind one serial dispatch point

pub mod arbiter;
pub mod bridge;
pub mod channel;
pub mod connection;
pub mod events;
pub mod frame;
pub mod geometry;
pub mod identity;
pub mod notifications;
pub mod protocol;
pub mod script;
pub mod visibility;

pub use arbiter::{BroadcastError, BroadcastTicket, TransactionArbiter, TxOutcome};
pub use bridge::{
    Bridge, BridgeOptions, ConnectRequestError, HostView, TxResponsePolicy, WalletErrorPolicy,
};
pub use channel::{Channel, InboundEnvelope, MessageListener, PeerTransport, TransportError};
pub use connection::{ConnectionSession, ConnectionState, ConnectionStatus};
pub use events::{BridgeEvent, EventBus};
pub use geometry::{AnchorCell, GeometryTracker, LayoutChange, TriggerAnchor};
pub use identity::PeerIdentity;
pub use notifications::NotificationSink;
pub use protocol::{InboundMessage, Notification, OutboundMessage, PeerError, TxMessage};
pub use visibility::{OpenTransition, VisibilityController, VisibilityState};

//! The bridge: one channel, five independent consumers, one dispatch point.
//!
//! Host intents (`toggle`, `broadcast`, `request_connect`, layout changes)
//! go down into channel sends. Peer events are queued by the
//! [`MessageListener`] and handled one at a time in [`Bridge::poll`], each
//! updating only its own component.

use std::collections::BTreeMap;

use dymlink_common::MenuAlign;
use dymlink_config::schema::DymlinkConfig;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::arbiter::TransactionArbiter;
use crate::channel::{Channel, MessageListener, PeerTransport};
use crate::connection::{ConnectionSession, ConnectionState};
use crate::events::{BridgeEvent, EventBus};
use crate::geometry::{GeometryTracker, TriggerAnchor};
use crate::identity::PeerIdentity;
use crate::notifications::NotificationSink;
use crate::protocol::Notification;
use crate::visibility::{VisibilityController, VisibilityState};

mod dispatch;
mod intents;
mod policy;
mod view;


pub use intents::ConnectRequestError;
pub use policy::{log_tx_response, log_wallet_error, TxResponsePolicy, WalletErrorPolicy};
pub use view::HostView;

/// Everything a bridge needs to know about its deployment.
#[derive(Debug, Clone)]
pub struct BridgeOptions {
    pub peer_base_url: String,
    pub network_ids: Vec<String>,
    pub main_denom: String,
    pub qr_account: Option<String>,
    pub styles: BTreeMap<String, String>,
    pub menu_align: MenuAlign,
    pub coalesce_layout_events: bool,
    pub event_capacity: usize,
    pub self_send_amount: String,
}

impl BridgeOptions {
    pub fn from_config(config: &DymlinkConfig) -> Self {
        Self {
            peer_base_url: config.peer.base_url.clone(),
            network_ids: config.peer.network_ids.clone(),
            main_denom: config.peer.main_denom.clone(),
            qr_account: config.peer.qr_account.clone().filter(|a| !a.is_empty()),
            styles: config.appearance.styles.clone(),
            menu_align: config.appearance.menu_align,
            coalesce_layout_events: config.bridge.coalesce_layout_events,
            event_capacity: config.bridge.event_capacity as usize,
            self_send_amount: config.transaction.self_send_amount.clone(),
        }
    }
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self::from_config(&DymlinkConfig::default())
    }
}

/// Host-side bridge to one peer frame.
pub struct Bridge {
    options: BridgeOptions,
    channel: Channel,
    connection: ConnectionState,
    geometry: GeometryTracker,
    visibility: VisibilityController,
    arbiter: TransactionArbiter,
    notifications: NotificationSink,
    events: EventBus,
    on_tx_response: TxResponsePolicy,
    on_wallet_error: WalletErrorPolicy,
    disposed: bool,
}

impl Bridge {
    /// Create a bridge for the peer at `options.peer_base_url`, anchored to
    /// `anchor`. Layout tracking starts immediately; no frame is attached.
    pub fn new(options: BridgeOptions, anchor: Box<dyn TriggerAnchor>) -> dymlink_common::Result<Self> {
        let peer = PeerIdentity::from_base_url(&options.peer_base_url)?;
        let mut geometry = GeometryTracker::new(anchor, options.coalesce_layout_events);
        geometry.start();

        info!(peer = %peer, "bridge created");
        Ok(Self {
            channel: Channel::new(peer),
            connection: ConnectionState::new(),
            geometry,
            visibility: VisibilityController::new(),
            arbiter: TransactionArbiter::new(),
            notifications: NotificationSink::new(),
            events: EventBus::new(options.event_capacity),
            on_tx_response: Box::new(log_tx_response),
            on_wallet_error: Box::new(log_wallet_error),
            disposed: false,
            options,
        })
    }

    /// Replace how finished broadcasts are surfaced to the user.
    pub fn set_tx_response_policy(&mut self, policy: TxResponsePolicy) {
        self.on_tx_response = policy;
    }

    /// Replace how `wallet-error` reports are surfaced to the user.
    pub fn set_wallet_error_policy(&mut self, policy: WalletErrorPolicy) {
        self.on_wallet_error = policy;
    }

    // -- Accessors --

    pub fn peer(&self) -> &PeerIdentity {
        self.channel.peer()
    }

    pub fn options(&self) -> &BridgeOptions {
        &self.options
    }

    /// Handle for the embedding surface's inbound message callback.
    pub fn listener(&self) -> MessageListener {
        self.channel.listener()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BridgeEvent> {
        self.events.subscribe()
    }

    pub fn session(&self) -> &ConnectionSession {
        self.connection.session()
    }

    pub fn visibility(&self) -> VisibilityState {
        self.visibility.state()
    }

    pub fn notifications(&self) -> &[Notification] {
        self.notifications.current()
    }

    pub fn is_broadcasting(&self) -> bool {
        self.arbiter.is_broadcasting()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    // -- Frame lifecycle --

    /// Attach the peer frame's send primitive. Refused once disposed.
    pub fn attach_frame(&mut self, transport: Box<dyn PeerTransport>) {
        if self.disposed {
            debug!("attach ignored: bridge disposed");
            return;
        }
        self.channel.attach(transport);
    }

    /// The peer frame went away (navigation, crash, removal). Session,
    /// visibility and notifications are reset; a pending broadcast stays
    /// pending because only a `tx-response` can end it.
    pub fn frame_detached(&mut self) {
        if self.disposed {
            return;
        }
        self.channel.detach();
        self.connection.reset();
        self.visibility.reset();
        self.notifications.clear();

        if self.arbiter.is_broadcasting() {
            info!("peer frame detached with a broadcast still in flight");
        }

        self.events
            .publish(BridgeEvent::SessionChanged(self.connection.session().clone()));
        self.events
            .publish(BridgeEvent::VisibilityChanged(self.visibility.state()));
        self.events
            .publish(BridgeEvent::NotificationsReplaced(Vec::new()));
    }

    /// Tear the bridge down: stop layout tracking, close the channel so no
    /// listener can deliver again. Every later host intent is refused and
    /// nothing is published after `Disposed`. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.geometry.stop();
        self.channel.close();
        self.disposed = true;
        self.events.publish(BridgeEvent::Disposed);
        debug!(peer = %self.channel.peer(), "bridge disposed");
    }
}

impl Drop for Bridge {
    fn drop(&mut self) {
        self.dispose();
    }
}

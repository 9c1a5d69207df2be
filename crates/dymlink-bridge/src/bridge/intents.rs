//! Host intents: everything the host UI asks of the peer.

use dymlink_common::css::sanitize_styles;
use tracing::{debug, info};

use super::Bridge;
use crate::arbiter::{BroadcastError, BroadcastTicket};
use crate::events::BridgeEvent;
use crate::geometry::LayoutChange;
use crate::protocol::{OutboundMessage, TxMessage};
use crate::visibility::OpenTransition;

/// Why an explicit connect request was not forwarded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectRequestError {
    #[error("peer is not ready")]
    NotReady,

    #[error("network {0:?} is not one of the configured networks")]
    UnknownNetwork(String),

    #[error("wallet type must not be empty")]
    EmptyWalletType,
}

impl Bridge {
    /// The peer frame finished loading: send the initial geometry, theme
    /// and menu alignment.
    pub fn frame_loaded(&mut self) {
        if self.disposed {
            return;
        }
        self.geometry.push_geometry(&mut self.channel);

        let styles = sanitize_styles(&self.options.styles);
        self.channel.send(&OutboundMessage::SetStyles { styles });
        self.channel.send(&OutboundMessage::SetMenuAlign {
            align: self.options.menu_align,
        });
        debug!("initial configuration sent to peer");
    }

    /// The trigger was activated. Ignored until the peer is ready. When the
    /// menu opens the peer receives the trigger geometry before the toggle.
    pub fn toggle(&mut self) -> OpenTransition {
        if self.disposed {
            debug!("toggle ignored: bridge disposed");
            return OpenTransition::Unchanged;
        }
        if !self.connection.connect_enabled() {
            debug!("toggle ignored: peer not ready");
            return OpenTransition::Unchanged;
        }

        let transition = self.visibility.toggle();
        self.geometry.push_geometry(&mut self.channel);
        self.channel.send(&OutboundMessage::ToggleMenu);
        self.events
            .publish(BridgeEvent::VisibilityChanged(self.visibility.state()));
        transition
    }

    /// A scroll or resize happened somewhere in the host document.
    pub fn on_layout_change(&mut self, change: LayoutChange) {
        if self.disposed {
            return;
        }
        self.geometry.on_layout_change(change, &mut self.channel);
    }

    pub fn on_scroll(&mut self) {
        self.on_layout_change(LayoutChange::Scroll);
    }

    pub fn on_resize(&mut self) {
        self.on_layout_change(LayoutChange::Resize);
    }

    /// Ask the peer to sign and broadcast `messages`. At most one broadcast
    /// is in flight; a second request is refused with
    /// [`BroadcastError::Busy`] and nothing is sent.
    pub fn broadcast(
        &mut self,
        messages: Vec<TxMessage>,
    ) -> Result<BroadcastTicket, BroadcastError> {
        if self.disposed {
            return Err(BroadcastError::PeerUnavailable);
        }
        let ticket = self.arbiter.broadcast(messages, &mut self.channel)?;
        self.events.publish(BridgeEvent::BroadcastStarted {
            request_id: ticket.request_id().clone(),
        });
        Ok(ticket)
    }

    /// Broadcast a bank send of the configured amount from the connected
    /// account to itself.
    pub fn send_to_self(&mut self) -> Result<BroadcastTicket, BroadcastError> {
        if self.disposed {
            return Err(BroadcastError::PeerUnavailable);
        }
        if !self.connection.is_connected() {
            return Err(BroadcastError::NotConnected);
        }

        let address = self.connection.session().address.clone();
        let message = TxMessage::bank_send(
            &address,
            &address,
            &self.options.main_denom,
            &self.options.self_send_amount,
        );
        info!(
            denom = %self.options.main_denom,
            amount = %self.options.self_send_amount,
            "sending to self"
        );
        self.broadcast(vec![message])
    }

    /// Ask the peer to connect `wallet_type` on `network_id` directly.
    pub fn request_connect(
        &mut self,
        network_id: &str,
        wallet_type: &str,
    ) -> Result<(), ConnectRequestError> {
        if self.disposed || !self.connection.connect_enabled() {
            return Err(ConnectRequestError::NotReady);
        }
        if !self.options.network_ids.iter().any(|id| id == network_id) {
            return Err(ConnectRequestError::UnknownNetwork(network_id.to_string()));
        }
        if wallet_type.trim().is_empty() {
            return Err(ConnectRequestError::EmptyWalletType);
        }

        self.channel.send(&OutboundMessage::Connect {
            network_id: network_id.to_string(),
            wallet_type: wallet_type.to_string(),
        });
        Ok(())
    }
}

//! Inbound dispatch: the single place peer events are handled.

use tracing::{debug, warn};

use super::Bridge;
use crate::events::BridgeEvent;
use crate::protocol::InboundMessage;
use crate::visibility::OpenTransition;

impl Bridge {
    /// Drain queued peer events and handle them in arrival order, then
    /// deliver any coalesced geometry push. Returns how many events were
    /// accepted. Each event finishes before the next one starts.
    pub fn poll(&mut self) -> usize {
        if self.disposed {
            return 0;
        }

        let messages = self.channel.drain_validated();
        let accepted = messages.len();
        for message in messages {
            self.handle_inbound(message);
        }

        self.geometry.flush(&mut self.channel);
        accepted
    }

    /// Route one validated event to the component that owns its state.
    pub(crate) fn handle_inbound(&mut self, message: InboundMessage) {
        debug!(kind = message.kind(), "dispatching peer event");

        match message {
            InboundMessage::Ready => {
                if self.connection.on_ready() {
                    self.publish_session();
                }
            }

            InboundMessage::MenuVisible { value } => {
                let before = self.visibility.state();
                let transition = self.visibility.set_open_from_peer(value);
                self.visibility.set_interactive(value);
                if transition == OpenTransition::Opened {
                    self.geometry.push_geometry(&mut self.channel);
                }
                if self.visibility.state() != before {
                    self.events
                        .publish(BridgeEvent::VisibilityChanged(self.visibility.state()));
                }
            }

            InboundMessage::Connect {
                address,
                hex_address,
            } => {
                if self.connection.on_connect(&address, &hex_address) {
                    self.geometry.push_geometry(&mut self.channel);
                    self.publish_session();
                }
            }

            InboundMessage::Disconnect => {
                let changed = self.connection.on_disconnect();
                self.geometry.push_geometry(&mut self.channel);
                if changed {
                    self.publish_session();
                }
            }

            InboundMessage::TxResponse { response, error } => {
                if let Some((request_id, outcome)) = self.arbiter.resolve(response, error) {
                    (self.on_tx_response)(&outcome);
                    self.events.publish(BridgeEvent::BroadcastResolved {
                        request_id,
                        outcome,
                    });
                }
            }

            InboundMessage::Notification { messages } => {
                if self.notifications.on_notification_batch(messages) {
                    self.events.publish(BridgeEvent::NotificationsReplaced(
                        self.notifications.current().to_vec(),
                    ));
                }
            }

            InboundMessage::WalletError { error } => {
                if error.message.is_empty() {
                    warn!("wallet-error event carried an empty message");
                }
                (self.on_wallet_error)(&error.message);
                self.events.publish(BridgeEvent::WalletError {
                    message: error.message,
                });
            }
        }
    }

    pub(super) fn publish_session(&self) {
        self.events
            .publish(BridgeEvent::SessionChanged(self.connection.session().clone()));
    }
}

use serde::Serialize;
use tokio::sync::broadcast;

use crate::arbiter::TxOutcome;
use crate::connection::ConnectionSession;
use crate::protocol::Notification;
use crate::visibility::VisibilityState;
use dymlink_common::RequestId;

/// State changes the bridge reports to the host UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum BridgeEvent {
    SessionChanged(ConnectionSession),
    VisibilityChanged(VisibilityState),
    NotificationsReplaced(Vec<Notification>),
    BroadcastStarted { request_id: RequestId },
    BroadcastResolved { request_id: RequestId, outcome: TxOutcome },
    WalletError { message: String },
    Disposed,
}

pub struct EventBus {
    sender: broadcast::Sender<BridgeEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BridgeEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: BridgeEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

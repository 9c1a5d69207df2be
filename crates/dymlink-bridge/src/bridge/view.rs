use serde::Serialize;

use super::Bridge;
use crate::protocol::Notification;

/// What the host UI renders, derived from current bridge state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostView {
    /// The trigger is clickable once the peer is ready.
    pub connect_enabled: bool,
    /// Trigger label: the hex address when connected, otherwise "Connect".
    pub connect_label: String,
    pub send_enabled: bool,
    pub broadcasting: bool,
    pub frame_visible: bool,
    pub notifications: Vec<Notification>,
}

impl Bridge {
    pub fn view(&self) -> HostView {
        let connected = self.connection.is_connected();
        HostView {
            connect_enabled: self.connection.connect_enabled(),
            connect_label: self.connection.trigger_label().to_string(),
            send_enabled: connected && !self.arbiter.is_broadcasting(),
            broadcasting: self.arbiter.is_broadcasting(),
            frame_visible: self
                .visibility
                .frame_visible(self.options.qr_account.is_some()),
            notifications: self.notifications.current().to_vec(),
        }
    }
}

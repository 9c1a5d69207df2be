//! Notifications mirrored from the peer.

use crate::protocol::Notification;

/// Holds the notification list the host displays. The peer is the source of
/// truth: every batch replaces the previous one wholesale.
#[derive(Debug, Default)]
pub struct NotificationSink {
    current: Vec<Notification>,
}

impl NotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the displayed list. Returns whether it changed.
    pub fn on_notification_batch(&mut self, batch: Vec<Notification>) -> bool {
        if self.current == batch {
            return false;
        }
        self.current = batch;
        true
    }

    pub fn current(&self) -> &[Notification] {
        &self.current
    }

    pub fn clear(&mut self) {
        self.current.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_batch_replaces_first() {
        let mut sink = NotificationSink::new();
        sink.on_notification_batch(vec![Notification::new("a", "one"), Notification::new("b", "two")]);
        sink.on_notification_batch(vec![Notification::new("c", "three")]);
        assert_eq!(sink.current(), &[Notification::new("c", "three")]);
    }

    #[test]
    fn order_is_preserved_and_duplicates_kept() {
        let mut sink = NotificationSink::new();
        let batch = vec![
            Notification::new("b", "second"),
            Notification::new("a", "first"),
            Notification::new("a", "first"),
        ];
        sink.on_notification_batch(batch.clone());
        assert_eq!(sink.current(), batch.as_slice());
    }

    #[test]
    fn empty_batch_clears() {
        let mut sink = NotificationSink::new();
        sink.on_notification_batch(vec![Notification::new("a", "one")]);
        assert!(sink.on_notification_batch(Vec::new()));
        assert!(sink.current().is_empty());
    }

    #[test]
    fn identical_batch_reports_unchanged() {
        let mut sink = NotificationSink::new();
        assert!(sink.on_notification_batch(vec![Notification::new("a", "one")]));
        assert!(!sink.on_notification_batch(vec![Notification::new("a", "one")]));
    }
}

//! Trigger geometry synchronization.
//!
//! The peer renders its menu anchored to the host trigger, so the trigger's
//! rectangle is pushed whenever it may have moved. The rectangle is read on
//! demand and never cached.

use std::sync::{Arc, Mutex};

use dymlink_common::Rect;
use tracing::trace;

use crate::channel::Channel;
use crate::protocol::OutboundMessage;

/// Source of the trigger's current on-screen rectangle.
pub trait TriggerAnchor {
    /// `None` while the trigger is not mounted.
    fn bounding_rect(&self) -> Option<Rect>;
}

impl<F> TriggerAnchor for F
where
    F: Fn() -> Option<Rect>,
{
    fn bounding_rect(&self) -> Option<Rect> {
        self()
    }
}

/// A shared, settable anchor for hosts that compute layout elsewhere.
#[derive(Debug, Clone, Default)]
pub struct AnchorCell {
    rect: Arc<Mutex<Option<Rect>>>,
}

impl AnchorCell {
    pub fn new(rect: Option<Rect>) -> Self {
        Self {
            rect: Arc::new(Mutex::new(rect)),
        }
    }

    /// Record the trigger's latest rectangle (`None` = unmounted).
    pub fn set(&self, rect: Option<Rect>) {
        if let Ok(mut r) = self.rect.lock() {
            *r = rect;
        }
    }
}

impl TriggerAnchor for AnchorCell {
    fn bounding_rect(&self) -> Option<Rect> {
        self.rect.lock().ok().and_then(|r| *r)
    }
}

/// Host layout events that may move the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutChange {
    /// Any scroll in the document, nested containers included.
    Scroll,
    Resize,
}

/// Pushes `setTriggerBoundingRect` to the peer.
pub struct GeometryTracker {
    anchor: Box<dyn TriggerAnchor>,
    listening: bool,
    coalesce: bool,
    dirty: bool,
}

impl GeometryTracker {
    pub fn new(anchor: Box<dyn TriggerAnchor>, coalesce: bool) -> Self {
        Self {
            anchor,
            listening: false,
            coalesce,
            dirty: false,
        }
    }

    /// Subscribe to layout changes.
    pub fn start(&mut self) {
        self.listening = true;
    }

    /// Unsubscribe. Pending coalesced work is discarded.
    pub fn stop(&mut self) {
        self.listening = false;
        self.dirty = false;
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Whether a coalesced push is waiting for [`GeometryTracker::flush`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Read the trigger rectangle and send it. Returns whether anything was
    /// sent; an unmounted trigger is a silent no-op.
    pub fn push_geometry(&mut self, channel: &mut Channel) -> bool {
        self.dirty = false;
        match self.anchor.bounding_rect() {
            Some(rect) => {
                channel.send(&OutboundMessage::SetTriggerBoundingRect { rect });
                true
            }
            None => {
                trace!("geometry push skipped: trigger not mounted");
                false
            }
        }
    }

    /// React to a scroll or resize. With coalescing on, the push is deferred
    /// to the next [`GeometryTracker::flush`].
    pub fn on_layout_change(&mut self, change: LayoutChange, channel: &mut Channel) {
        if !self.listening {
            trace!(?change, "layout change ignored: tracker stopped");
            return;
        }
        if self.coalesce {
            self.dirty = true;
        } else {
            self.push_geometry(channel);
        }
    }

    /// Deliver a deferred push, if any.
    pub fn flush(&mut self, channel: &mut Channel) {
        if self.dirty && self.listening {
            self.push_geometry(channel);
        }
    }
}

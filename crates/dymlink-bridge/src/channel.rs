//! The single message channel to the peer frame.
//!
//! Messages flow in both directions:
//! - **Host -> peer**: [`Channel::send`] hands an [`OutboundMessage`] to the
//!   attached [`PeerTransport`] together with the peer origin as the target.
//! - **Peer -> host**: the embedder's message callback pushes raw
//!   [`InboundEnvelope`]s into a [`MessageListener`]. The owning bridge drains
//!   them with [`Channel::drain_validated`], which checks provenance before it
//!   looks at the payload.

use std::sync::{Arc, Mutex};

use tracing::{debug, trace, warn};

use crate::identity::PeerIdentity;
use crate::protocol::{InboundMessage, OutboundMessage};

/// Failure reported by a transport. The channel logs it and moves on.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("peer frame is not attached")]
    NotAttached,

    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// The one-directional send primitive towards the peer frame.
pub trait PeerTransport {
    /// Post `message` to the peer, restricted to `target_origin`.
    fn post(&mut self, message: &OutboundMessage, target_origin: &str) -> Result<(), TransportError>;
}

/// A raw inbound event as the embedding surface received it.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundEnvelope {
    /// Origin the runtime attributes to the sender.
    pub origin: String,
    /// Structured payload, not yet trusted.
    pub data: serde_json::Value,
}

impl InboundEnvelope {
    pub fn new(origin: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            origin: origin.into(),
            data,
        }
    }
}

#[derive(Default)]
struct Inbox {
    queue: Vec<InboundEnvelope>,
    closed: bool,
}

/// Registration point for inbound messages.
///
/// Cheap to clone and `Send`, so it can be moved into an IPC callback that
/// runs on another thread. Pushes after the channel is closed are dropped.
#[derive(Clone)]
pub struct MessageListener {
    inbox: Arc<Mutex<Inbox>>,
}

impl MessageListener {
    /// Queue an inbound event for the next drain.
    pub fn push(&self, envelope: InboundEnvelope) {
        if let Ok(mut inbox) = self.inbox.lock() {
            if inbox.closed {
                trace!(origin = %envelope.origin, "inbound message after close dropped");
                return;
            }
            inbox.queue.push(envelope);
        }
    }

    /// Queue an event from a raw JSON string (e.g. an IPC body).
    pub fn push_json(&self, origin: &str, body: &str) {
        match serde_json::from_str(body) {
            Ok(data) => self.push(InboundEnvelope::new(origin, data)),
            Err(_) => warn!(body_len = body.len(), "inbound message rejected: invalid JSON"),
        }
    }

    /// Whether the owning channel has been closed.
    pub fn is_closed(&self) -> bool {
        self.inbox.lock().map(|i| i.closed).unwrap_or(true)
    }
}

/// The bridge's channel to the peer.
pub struct Channel {
    peer: PeerIdentity,
    transport: Option<Box<dyn PeerTransport>>,
    inbox: Arc<Mutex<Inbox>>,
}

impl Channel {
    pub fn new(peer: PeerIdentity) -> Self {
        Self {
            peer,
            transport: None,
            inbox: Arc::new(Mutex::new(Inbox::default())),
        }
    }

    pub fn peer(&self) -> &PeerIdentity {
        &self.peer
    }

    /// Attach the peer frame's transport, replacing any previous one.
    pub fn attach(&mut self, transport: Box<dyn PeerTransport>) {
        self.transport = Some(transport);
        debug!(peer = %self.peer, "peer transport attached");
    }

    /// Detach the transport. Sends become no-ops until the next attach.
    pub fn detach(&mut self) {
        if self.transport.take().is_some() {
            debug!(peer = %self.peer, "peer transport detached");
        }
    }

    pub fn is_attached(&self) -> bool {
        self.transport.is_some()
    }

    /// The listener handle to register with the embedding surface.
    pub fn listener(&self) -> MessageListener {
        MessageListener {
            inbox: Arc::clone(&self.inbox),
        }
    }

    /// Forward a message to the peer. Never fails: a missing transport or a
    /// transport error is logged and the message is lost.
    pub fn send(&mut self, message: &OutboundMessage) {
        let Some(transport) = self.transport.as_mut() else {
            trace!(kind = message.kind(), "send skipped: peer frame not attached");
            return;
        };

        match transport.post(message, self.peer.origin()) {
            Ok(()) => debug!(kind = message.kind(), "message posted to peer"),
            Err(e) => warn!(kind = message.kind(), error = %e, "failed to post message to peer"),
        }
    }

    /// Take every queued inbound event, drop those whose origin is not the
    /// peer, and decode the rest. Order is preserved.
    pub fn drain_validated(&mut self) -> Vec<InboundMessage> {
        let envelopes = match self.inbox.lock() {
            Ok(mut inbox) => std::mem::take(&mut inbox.queue),
            Err(_) => return Vec::new(),
        };

        envelopes
            .into_iter()
            .filter_map(|envelope| self.validate(envelope))
            .collect()
    }

    fn validate(&self, envelope: InboundEnvelope) -> Option<InboundMessage> {
        // Provenance first: the payload of an untrusted event is never inspected.
        if !self.peer.matches(&envelope.origin) {
            trace!(origin = %envelope.origin, "inbound message from untrusted origin dropped");
            return None;
        }

        match serde_json::from_value::<InboundMessage>(envelope.data) {
            Ok(msg) => {
                debug!(kind = msg.kind(), "inbound message accepted");
                Some(msg)
            }
            Err(e) => {
                warn!(error = %e, "inbound message rejected: unknown or malformed payload");
                None
            }
        }
    }

    /// Close the channel: detach the transport, discard queued events, and
    /// make every outstanding listener inert.
    pub fn close(&mut self) {
        self.detach();
        if let Ok(mut inbox) = self.inbox.lock() {
            inbox.closed = true;
            inbox.queue.clear();
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

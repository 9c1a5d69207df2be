//! Glue for hosts whose page runs inside a webview.
//!
//! Messages flow through two snippets:
//! - **Peer -> host**: [`RELAY_INIT_SCRIPT`] is injected into the host page.
//!   It listens for `message` events and relays `{origin, data}` to Rust via
//!   `window.ipc.postMessage`. The origin is the one the browser attached to
//!   the event, so the peer cannot forge it.
//! - **Host -> peer**: [`js_post_message`] renders an outbound message as a
//!   `postMessage` call on the peer frame, restricted to the peer origin.
//!   [`ScriptTransport`] wraps any script evaluator in a [`PeerTransport`].

use serde::Deserialize;

use crate::channel::{InboundEnvelope, PeerTransport, TransportError};
use crate::protocol::OutboundMessage;

/// CSS selector of the peer frame in the host page.
pub const FRAME_SELECTOR: &str = "iframe.dymlink-frame";

/// JavaScript snippet that relays `message` events from the page to Rust.
/// Injected as an initialization script into the host webview.
pub const RELAY_INIT_SCRIPT: &str = r#"
(function() {
    if (window.__dymlinkRelay) { return; }
    window.__dymlinkRelay = true;
    window.addEventListener('message', function(event) {
        if (!window.ipc || typeof window.ipc.postMessage !== 'function') { return; }
        try {
            window.ipc.postMessage(JSON.stringify({
                origin: event.origin,
                data: event.data
            }));
        } catch (e) {
            // Non-serializable payloads cannot be part of the protocol.
        }
    });
})();
"#;

#[derive(Deserialize)]
struct RelayBody {
    origin: String,
    data: serde_json::Value,
}

/// Parse an IPC body produced by [`RELAY_INIT_SCRIPT`].
pub fn parse_relay_body(body: &str) -> Option<InboundEnvelope> {
    let relay: RelayBody = serde_json::from_str(body).ok()?;
    Some(InboundEnvelope::new(relay.origin, relay.data))
}

/// Generate a JS snippet that posts `message` to the peer frame.
pub fn js_post_message(
    message: &OutboundMessage,
    target_origin: &str,
) -> Result<String, TransportError> {
    let payload = serde_json::to_string(message)?;
    let origin = serde_json::to_string(target_origin)?;
    let selector = serde_json::to_string(FRAME_SELECTOR)?;
    Ok(format!(
        "(function() {{ var f = document.querySelector({selector}); \
         if (f && f.contentWindow) {{ f.contentWindow.postMessage({payload}, {origin}); }} }})();"
    ))
}

/// A [`PeerTransport`] that evaluates generated scripts in the host page.
pub struct ScriptTransport<F> {
    evaluate: F,
}

impl<F, E> ScriptTransport<F>
where
    F: FnMut(&str) -> Result<(), E>,
    E: std::fmt::Display,
{
    /// `evaluate` runs a script in the host page, e.g. a webview's
    /// `evaluate_script`.
    pub fn new(evaluate: F) -> Self {
        Self { evaluate }
    }
}

impl<F, E> PeerTransport for ScriptTransport<F>
where
    F: FnMut(&str) -> Result<(), E>,
    E: std::fmt::Display,
{
    fn post(&mut self, message: &OutboundMessage, target_origin: &str) -> Result<(), TransportError> {
        let script = js_post_message(message, target_origin)?;
        (self.evaluate)(&script).map_err(|e| TransportError::Other(e.to_string()))
    }
}

//! Scripted bridge sessions.
//!
//! A replay file holds one JSON step per line. Blank lines and lines
//! starting with `#` are skipped. Steps:
//!
//! - `{"step":"frame_loaded"}` attach the peer frame and send its initial
//!   configuration
//! - `{"step":"frame_detached"}`
//! - `{"step":"peer","data":{...},"origin":"..."}` a peer event; `origin`
//!   defaults to the configured peer origin
//! - `{"step":"anchor","rect":{"x":..,"y":..,"width":..,"height":..}}` move
//!   the trigger (`null` unmounts it)
//! - `{"step":"scroll"}`, `{"step":"resize"}` layout changes, coalesced
//!   until the next poll
//! - `{"step":"toggle"}`, `{"step":"send_to_self"}`
//! - `{"step":"connect","network_id":"..","wallet_type":".."}`
//! - `{"step":"poll"}`, `{"step":"dispose"}`
//!
//! Output lines are prefixed `->` (sent to the peer), `<=` (bridge event),
//! `!!` (alert shown to the user) or `xx` (refused host intent).

use std::io::{BufRead, Write};
use std::sync::{Arc, Mutex};

use dymlink_bridge::{
    AnchorCell, Bridge, BridgeEvent, BridgeOptions, InboundEnvelope, OutboundMessage, PeerTransport,
    TransportError, TxOutcome,
};
use dymlink_common::{BridgeError, Rect};
use dymlink_config::schema::TxResponseMode;
use dymlink_config::DymlinkConfig;
use serde::Deserialize;
use tokio::sync::broadcast::{self, error::TryRecvError};

/// One line of a replay file.
#[derive(Debug, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
enum ReplayStep {
    FrameLoaded,
    FrameDetached,
    Peer {
        #[serde(default)]
        origin: Option<String>,
        data: serde_json::Value,
    },
    Anchor {
        rect: Option<Rect>,
    },
    Scroll,
    Resize,
    Toggle,
    SendToSelf,
    Connect {
        network_id: String,
        wallet_type: String,
    },
    Poll,
    Dispose,
}

impl ReplayStep {
    /// Layout steps wait for an explicit poll so bursts can coalesce.
    fn polls(&self) -> bool {
        !matches!(
            self,
            ReplayStep::Scroll | ReplayStep::Resize | ReplayStep::Anchor { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub steps: usize,
    pub sent: usize,
}

/// Lines produced while a step runs, written out after it.
#[derive(Clone, Default)]
struct Transcript(Arc<Mutex<Vec<String>>>);

impl Transcript {
    fn push(&self, line: String) {
        if let Ok(mut lines) = self.0.lock() {
            lines.push(line);
        }
    }

    fn write_to(&self, out: &mut dyn Write) -> std::io::Result<()> {
        let lines = match self.0.lock() {
            Ok(mut lines) => std::mem::take(&mut *lines),
            Err(_) => return Ok(()),
        };
        for line in lines {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

/// Records every outbound message in the transcript.
#[derive(Clone)]
struct TranscriptTransport {
    transcript: Transcript,
    sent: Arc<Mutex<usize>>,
}

impl PeerTransport for TranscriptTransport {
    fn post(&mut self, message: &OutboundMessage, _target_origin: &str) -> Result<(), TransportError> {
        let json = serde_json::to_string(message)?;
        self.transcript.push(format!("-> {json}"));
        if let Ok(mut sent) = self.sent.lock() {
            *sent += 1;
        }
        Ok(())
    }
}

fn install_policies(bridge: &mut Bridge, mode: TxResponseMode, transcript: &Transcript) {
    if mode != TxResponseMode::Alert {
        return;
    }

    let alerts = transcript.clone();
    bridge.set_tx_response_policy(Box::new(move |outcome: &TxOutcome| {
        let verdict = if outcome.is_success() {
            "transaction succeeded"
        } else {
            "transaction failed"
        };
        alerts.push(format!("!! {verdict}: {}", outcome.display_text()));
    }));

    let alerts = transcript.clone();
    bridge.set_wallet_error_policy(Box::new(move |message: &str| {
        alerts.push(format!("!! wallet error: {message}"));
    }));
}

/// Run every step of `input` against a fresh bridge built from `config`.
pub fn run_replay(
    input: impl BufRead,
    config: &DymlinkConfig,
    out: &mut dyn Write,
) -> dymlink_common::Result<ReplaySummary> {
    let transcript = Transcript::default();
    let transport = TranscriptTransport {
        transcript: transcript.clone(),
        sent: Arc::new(Mutex::new(0)),
    };

    // The trigger starts unmounted; an `anchor` step places it.
    let anchor = AnchorCell::new(None);
    let mut bridge = Bridge::new(BridgeOptions::from_config(config), Box::new(anchor.clone()))?;
    install_policies(&mut bridge, config.bridge.tx_response, &transcript);

    let listener = bridge.listener();
    let mut events = bridge.subscribe();
    let peer_origin = bridge.peer().origin().to_string();
    let mut summary = ReplaySummary::default();

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let step: ReplayStep = serde_json::from_str(line)
            .map_err(|e| BridgeError::Replay(format!("line {}: {e}", index + 1)))?;
        tracing::debug!(line = index + 1, ?step, "replay step");
        let polls = step.polls();

        match step {
            ReplayStep::FrameLoaded => {
                bridge.attach_frame(Box::new(transport.clone()));
                bridge.frame_loaded();
            }
            ReplayStep::FrameDetached => bridge.frame_detached(),
            ReplayStep::Peer { origin, data } => {
                let origin = origin.unwrap_or_else(|| peer_origin.clone());
                listener.push(InboundEnvelope::new(origin, data));
            }
            ReplayStep::Anchor { rect } => anchor.set(rect),
            ReplayStep::Scroll => bridge.on_scroll(),
            ReplayStep::Resize => bridge.on_resize(),
            ReplayStep::Toggle => {
                bridge.toggle();
            }
            ReplayStep::SendToSelf => {
                if let Err(e) = bridge.send_to_self() {
                    transcript.push(format!("xx send_to_self refused: {e}"));
                }
            }
            ReplayStep::Connect {
                network_id,
                wallet_type,
            } => {
                if let Err(e) = bridge.request_connect(&network_id, &wallet_type) {
                    transcript.push(format!("xx connect refused: {e}"));
                }
            }
            ReplayStep::Poll => {}
            ReplayStep::Dispose => bridge.dispose(),
        }

        if polls {
            bridge.poll();
        }
        drain_events(&mut events, &transcript);
        transcript.write_to(out)?;
        summary.steps += 1;
    }

    bridge.poll();
    drain_events(&mut events, &transcript);
    transcript.write_to(out)?;

    summary.sent = transport.sent.lock().map(|n| *n).unwrap_or(0);
    Ok(summary)
}

fn drain_events(
    events: &mut broadcast::Receiver<BridgeEvent>,
    transcript: &Transcript,
) {
    loop {
        match events.try_recv() {
            Ok(event) => match serde_json::to_string(&event) {
                Ok(json) => transcript.push(format!("<= {json}")),
                Err(e) => tracing::warn!(error = %e, "failed to serialize bridge event"),
            },
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "replay fell behind the event bus");
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }
}

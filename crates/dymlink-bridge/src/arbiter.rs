//! Transaction broadcast arbitration.
//!
//! At most one broadcast is in flight per bridge. The peer's `tx-response`
//! carries no request id; it resolves whatever is pending. A second request
//! while one is pending is refused, never queued.
//!
//! There is no timeout and no host-side cancellation: a pending broadcast
//! ends only when the peer answers.

use dymlink_common::RequestId;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::channel::Channel;
use crate::protocol::{OutboundMessage, PeerError, TxMessage};

/// Failure text used when a `tx-response` has neither a result nor an error.
pub const NO_RESULT_MESSAGE: &str = "transaction response carried no result";

/// Why a broadcast was not started. None of these are faults; they mean
/// "not allowed now".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BroadcastError {
    #[error("a transaction is already being broadcast")]
    Busy,

    #[error("peer frame is not attached")]
    PeerUnavailable,

    #[error("no wallet is connected")]
    NotConnected,
}

/// Result of a broadcast as reported by the peer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum TxOutcome {
    Success(serde_json::Value),
    Failure(String),
}

impl TxOutcome {
    /// Interpret a `tx-response` payload. A present `response` wins over
    /// `error`.
    pub fn from_response(response: Option<serde_json::Value>, error: Option<PeerError>) -> Self {
        match (response, error) {
            (Some(response), _) => TxOutcome::Success(response),
            (None, Some(error)) => TxOutcome::Failure(error.message),
            (None, None) => TxOutcome::Failure(NO_RESULT_MESSAGE.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TxOutcome::Success(_))
    }

    /// Text shown to the user: the JSON response, or the error message.
    pub fn display_text(&self) -> String {
        match self {
            TxOutcome::Success(response) => response.to_string(),
            TxOutcome::Failure(message) => message.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BroadcastStatus {
    InFlight,
}

/// The single outstanding broadcast.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingBroadcast {
    pub request_id: RequestId,
    pub messages: Vec<TxMessage>,
    pub status: BroadcastStatus,
}

/// Caller's handle on a started broadcast. Resolves exactly once.
#[derive(Debug)]
pub struct BroadcastTicket {
    request_id: RequestId,
    rx: oneshot::Receiver<TxOutcome>,
}

impl BroadcastTicket {
    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    /// Non-blocking check. Returns the outcome once, then `None`.
    pub fn try_outcome(&mut self) -> Option<TxOutcome> {
        self.rx.try_recv().ok()
    }

    /// Wait for the peer's answer. `None` if the bridge was dropped first.
    pub async fn outcome(self) -> Option<TxOutcome> {
        self.rx.await.ok()
    }
}

/// Owner of the `PendingBroadcast` slot.
#[derive(Debug, Default)]
pub struct TransactionArbiter {
    pending: Option<(PendingBroadcast, oneshot::Sender<TxOutcome>)>,
}

impl TransactionArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_broadcasting(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&PendingBroadcast> {
        self.pending.as_ref().map(|(p, _)| p)
    }

    /// Start a broadcast: record it and send `executeTx` to the peer.
    pub fn broadcast(
        &mut self,
        messages: Vec<TxMessage>,
        channel: &mut Channel,
    ) -> Result<BroadcastTicket, BroadcastError> {
        if let Some((pending, _)) = &self.pending {
            info!(request_id = %pending.request_id, "broadcast refused: one already in flight");
            return Err(BroadcastError::Busy);
        }
        if !channel.is_attached() {
            warn!("broadcast refused: peer frame not attached");
            return Err(BroadcastError::PeerUnavailable);
        }

        let request_id = RequestId::new();
        let (tx, rx) = oneshot::channel();

        channel.send(&OutboundMessage::ExecuteTx {
            messages: messages.clone(),
        });

        debug!(%request_id, count = messages.len(), "broadcast in flight");
        self.pending = Some((
            PendingBroadcast {
                request_id: request_id.clone(),
                messages,
                status: BroadcastStatus::InFlight,
            },
            tx,
        ));

        Ok(BroadcastTicket { request_id, rx })
    }

    /// Resolve the pending broadcast with a `tx-response` payload. Returns
    /// `None` (and changes nothing) when nothing is pending.
    pub fn resolve(
        &mut self,
        response: Option<serde_json::Value>,
        error: Option<PeerError>,
    ) -> Option<(RequestId, TxOutcome)> {
        let Some((pending, tx)) = self.pending.take() else {
            warn!("tx-response ignored: no broadcast in flight");
            return None;
        };

        let outcome = TxOutcome::from_response(response, error);
        debug!(
            request_id = %pending.request_id,
            success = outcome.is_success(),
            "broadcast resolved"
        );
        // The caller may have dropped its ticket; the outcome is still
        // returned for the host policy.
        let _ = tx.send(outcome.clone());
        Some((pending.request_id, outcome))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{PeerTransport, TransportError};
    use crate::identity::PeerIdentity;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<OutboundMessage>>>);

    impl PeerTransport for Recorder {
        fn post(&mut self, message: &OutboundMessage, _: &str) -> Result<(), TransportError> {
            self.0.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    fn attached() -> (Channel, Recorder) {
        let mut channel = Channel::new(PeerIdentity::from_base_url("http://localhost:3000").unwrap());
        let rec = Recorder::default();
        channel.attach(Box::new(rec.clone()));
        (channel, rec)
    }

    fn msgs() -> Vec<TxMessage> {
        vec![TxMessage::bank_send("dym1a", "dym1a", "aevm", "1")]
    }

    fn execute_count(rec: &Recorder) -> usize {
        rec.0
            .lock()
            .unwrap()
            .iter()
            .filter(|m| matches!(m, OutboundMessage::ExecuteTx { .. }))
            .count()
    }

    #[test]
    fn broadcast_sends_execute_tx_and_marks_pending() {
        let (mut channel, rec) = attached();
        let mut arbiter = TransactionArbiter::new();

        let ticket = arbiter.broadcast(msgs(), &mut channel).unwrap();
        assert!(arbiter.is_broadcasting());
        assert_eq!(execute_count(&rec), 1);

        let pending = arbiter.pending().unwrap();
        assert_eq!(&pending.request_id, ticket.request_id());
        assert_eq!(pending.messages, msgs());
        assert_eq!(pending.status, BroadcastStatus::InFlight);
    }

    #[test]
    fn second_broadcast_is_refused_not_queued() {
        let (mut channel, rec) = attached();
        let mut arbiter = TransactionArbiter::new();

        let _ticket = arbiter.broadcast(msgs(), &mut channel).unwrap();
        let err = arbiter.broadcast(msgs(), &mut channel).unwrap_err();
        assert_eq!(err, BroadcastError::Busy);
        assert_eq!(execute_count(&rec), 1);

        arbiter.resolve(Some(json!({})), None);
        assert_eq!(execute_count(&rec), 1);
    }

    #[test]
    fn broadcast_without_peer_is_refused() {
        let mut channel = Channel::new(PeerIdentity::from_base_url("http://localhost:3000").unwrap());
        let mut arbiter = TransactionArbiter::new();
        let err = arbiter.broadcast(msgs(), &mut channel).unwrap_err();
        assert_eq!(err, BroadcastError::PeerUnavailable);
        assert!(!arbiter.is_broadcasting());
    }

    #[test]
    fn resolve_success_delivers_once() {
        let (mut channel, _rec) = attached();
        let mut arbiter = TransactionArbiter::new();
        let mut ticket = arbiter.broadcast(msgs(), &mut channel).unwrap();
        assert_eq!(ticket.try_outcome(), None);

        let (id, outcome) = arbiter.resolve(Some(json!({"code": 0})), None).unwrap();
        assert_eq!(&id, ticket.request_id());
        assert_eq!(outcome, TxOutcome::Success(json!({"code": 0})));
        assert!(!arbiter.is_broadcasting());

        assert_eq!(ticket.try_outcome(), Some(TxOutcome::Success(json!({"code": 0}))));
        assert_eq!(ticket.try_outcome(), None);
    }

    #[test]
    fn resolve_failure_uses_peer_message() {
        let (mut channel, _rec) = attached();
        let mut arbiter = TransactionArbiter::new();
        let mut ticket = arbiter.broadcast(msgs(), &mut channel).unwrap();

        arbiter.resolve(
            None,
            Some(PeerError {
                message: "insufficient funds".into(),
            }),
        );
        assert_eq!(
            ticket.try_outcome(),
            Some(TxOutcome::Failure("insufficient funds".into()))
        );
    }

    #[test]
    fn resolve_without_pending_is_ignored() {
        let mut arbiter = TransactionArbiter::new();
        assert!(arbiter.resolve(Some(json!({})), None).is_none());
        assert!(!arbiter.is_broadcasting());
    }

    #[test]
    fn slot_reopens_after_resolution() {
        let (mut channel, rec) = attached();
        let mut arbiter = TransactionArbiter::new();
        arbiter.broadcast(msgs(), &mut channel).unwrap();
        arbiter.resolve(Some(json!({})), None);
        assert!(arbiter.broadcast(msgs(), &mut channel).is_ok());
        assert_eq!(execute_count(&rec), 2);
    }

    #[test]
    fn dropped_ticket_still_resolves() {
        let (mut channel, _rec) = attached();
        let mut arbiter = TransactionArbiter::new();
        drop(arbiter.broadcast(msgs(), &mut channel).unwrap());
        assert!(arbiter.resolve(Some(json!({})), None).is_some());
    }

    #[tokio::test]
    async fn ticket_can_be_awaited() {
        let (mut channel, _rec) = attached();
        let mut arbiter = TransactionArbiter::new();
        let ticket = arbiter.broadcast(msgs(), &mut channel).unwrap();
        arbiter.resolve(None, Some(PeerError { message: "denied".into() }));
        assert_eq!(ticket.outcome().await, Some(TxOutcome::Failure("denied".into())));
    }

    #[test]
    fn outcome_precedence_and_text() {
        let both = TxOutcome::from_response(
            Some(json!({"hash": "AB"})),
            Some(PeerError { message: "x".into() }),
        );
        assert!(both.is_success());
        assert_eq!(both.display_text(), r#"{"hash":"AB"}"#);

        let none = TxOutcome::from_response(None, None);
        assert_eq!(none, TxOutcome::Failure(NO_RESULT_MESSAGE.into()));
        assert_eq!(none.display_text(), NO_RESULT_MESSAGE);
    }
}

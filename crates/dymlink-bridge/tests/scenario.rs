//! End-to-end session against a scripted peer.

use std::sync::{Arc, Mutex};

use dymlink_bridge::{
    AnchorCell, Bridge, BridgeEvent, BridgeOptions, BroadcastError, ConnectionStatus,
    InboundEnvelope, MessageListener, OutboundMessage, PeerTransport, TransportError, TxMessage,
    TxOutcome,
};
use dymlink_common::Rect;
use serde_json::{json, Value};

const PEER: &str = "http://localhost:3000";

#[derive(Clone, Default)]
struct Wire(Arc<Mutex<Vec<(String, OutboundMessage)>>>);

impl Wire {
    fn take(&self) -> Vec<(String, OutboundMessage)> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }

    fn kinds(&self) -> Vec<&'static str> {
        self.take().iter().map(|(_, m)| m.kind()).collect()
    }
}

impl PeerTransport for Wire {
    fn post(&mut self, message: &OutboundMessage, target_origin: &str) -> Result<(), TransportError> {
        self.0
            .lock()
            .unwrap()
            .push((target_origin.to_string(), message.clone()));
        Ok(())
    }
}

fn deliver(listener: &MessageListener, bridge: &mut Bridge, origin: &str, data: Value) -> usize {
    listener.push(InboundEnvelope::new(origin, data));
    bridge.poll()
}

fn setup() -> (Bridge, MessageListener, Wire, AnchorCell) {
    let anchor = AnchorCell::new(Some(Rect::new(40.0, 8.0, 160.0, 36.0)));
    let mut bridge = Bridge::new(BridgeOptions::default(), Box::new(anchor.clone())).unwrap();
    let wire = Wire::default();
    bridge.attach_frame(Box::new(wire.clone()));
    let listener = bridge.listener();
    (bridge, listener, wire, anchor)
}

#[test]
fn full_session() {
    let (mut bridge, listener, wire, _anchor) = setup();
    let outcomes = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&outcomes);
    bridge.set_tx_response_policy(Box::new(move |o: &TxOutcome| {
        sink.lock().unwrap().push(o.clone())
    }));

    bridge.frame_loaded();
    let loaded = wire.take();
    assert!(loaded.iter().all(|(origin, _)| origin == PEER));
    assert_eq!(
        loaded.iter().map(|(_, m)| m.kind()).collect::<Vec<_>>(),
        vec!["setTriggerBoundingRect", "setStyles", "setMenuAlign"]
    );

    // Peer ready: trigger becomes usable.
    assert!(!bridge.view().connect_enabled);
    assert_eq!(deliver(&listener, &mut bridge, PEER, json!({"type": "ready"})), 1);
    assert!(bridge.view().connect_enabled);

    // Open the menu.
    bridge.toggle();
    assert_eq!(wire.kinds(), vec!["setTriggerBoundingRect", "toggleMenu"]);

    // Wallet connects.
    deliver(
        &listener,
        &mut bridge,
        PEER,
        json!({"type": "connect", "address": "ethm1qxy", "hexAddress": "0xQXY"}),
    );
    assert_eq!(bridge.session().status, ConnectionStatus::Connected);
    assert_eq!(bridge.view().connect_label, "0xQXY");
    assert_eq!(wire.kinds(), vec!["setTriggerBoundingRect"]);

    // Two quick sends: exactly one executeTx leaves the host.
    let ticket = bridge.send_to_self().unwrap();
    assert_eq!(bridge.send_to_self().unwrap_err(), BroadcastError::Busy);
    let sent = wire.take();
    assert_eq!(sent.len(), 1);
    match &sent[0].1 {
        OutboundMessage::ExecuteTx { messages } => {
            assert_eq!(messages.len(), 1);
            assert_eq!(messages[0].type_url, "/cosmos.bank.v1beta1.MsgSend");
            assert_eq!(messages[0].value["fromAddress"], "ethm1qxy");
            assert_eq!(messages[0].value["amount"][0]["denom"], "aevm");
        }
        other => panic!("unexpected {other:?}"),
    }

    // Peer reports success; the send control is enabled again.
    deliver(
        &listener,
        &mut bridge,
        PEER,
        json!({"type": "tx-response", "response": {"code": 0, "transactionHash": "ABC"}}),
    );
    assert_eq!(outcomes.lock().unwrap().len(), 1);
    assert!(outcomes.lock().unwrap()[0].is_success());
    assert!(bridge.view().send_enabled);
    drop(ticket);

    // Wallet disconnects.
    deliver(&listener, &mut bridge, PEER, json!({"type": "disconnect"}));
    assert_eq!(bridge.session().status, ConnectionStatus::Ready);
    assert_eq!(bridge.view().connect_label, "Connect");
    assert!(!bridge.view().send_enabled);
    assert_eq!(wire.kinds(), vec!["setTriggerBoundingRect"]);
}

#[test]
fn foreign_origins_are_invisible() {
    let (mut bridge, listener, wire, _anchor) = setup();

    for origin in ["https://evil.example", "http://localhost:3001", "https://localhost:3000", "null"] {
        assert_eq!(
            deliver(&listener, &mut bridge, origin, json!({"type": "ready"})),
            0
        );
        deliver(
            &listener,
            &mut bridge,
            origin,
            json!({"type": "connect", "address": "a", "hexAddress": "0xa"}),
        );
    }

    assert_eq!(bridge.session().status, ConnectionStatus::Disconnected);
    assert!(wire.take().is_empty());
}

#[test]
fn malformed_payloads_are_dropped() {
    let (mut bridge, listener, _wire, _anchor) = setup();
    assert_eq!(
        deliver(&listener, &mut bridge, PEER, json!({"type": "launch-missiles"})),
        0
    );
    assert_eq!(deliver(&listener, &mut bridge, PEER, json!("ready")), 0);
    listener.push_json(PEER, "{not json");
    assert_eq!(bridge.poll(), 0);
    assert_eq!(bridge.session().status, ConnectionStatus::Disconnected);
}

#[test]
fn events_are_processed_in_arrival_order() {
    let (mut bridge, listener, _wire, _anchor) = setup();
    listener.push(InboundEnvelope::new(PEER, json!({"type": "ready"})));
    listener.push(InboundEnvelope::new(
        PEER,
        json!({"type": "connect", "address": "a1", "hexAddress": "0xa1"}),
    ));
    listener.push(InboundEnvelope::new(PEER, json!({"type": "disconnect"})));
    listener.push(InboundEnvelope::new(
        PEER,
        json!({"type": "connect", "address": "a2", "hexAddress": "0xa2"}),
    ));

    assert_eq!(bridge.poll(), 4);
    assert_eq!(bridge.session().address, "a2");
    assert_eq!(bridge.session().hex_address, "0xa2");
}

#[test]
fn second_notification_batch_replaces_first() {
    let (mut bridge, listener, _wire, _anchor) = setup();
    let mut rx = bridge.subscribe();

    deliver(
        &listener,
        &mut bridge,
        PEER,
        json!({"type": "notification", "messages": [
            {"key": "n1", "content": "Network congested"},
            {"key": "n2", "content": "Upgrade scheduled"}
        ]}),
    );
    deliver(
        &listener,
        &mut bridge,
        PEER,
        json!({"type": "notification", "messages": [
            {"key": "n3", "content": "All clear"}
        ]}),
    );

    let view = bridge.view();
    assert_eq!(view.notifications.len(), 1);
    assert_eq!(view.notifications[0].content, "All clear");

    let mut batches = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let BridgeEvent::NotificationsReplaced(list) = event {
            batches.push(list.len());
        }
    }
    assert_eq!(batches, vec![2, 1]);
}

#[test]
fn geometry_follows_the_trigger() {
    let (mut bridge, listener, wire, anchor) = setup();
    deliver(&listener, &mut bridge, PEER, json!({"type": "ready"}));

    for y in [10.0, 20.0, 30.0] {
        anchor.set(Some(Rect::new(40.0, y, 160.0, 36.0)));
        bridge.on_scroll();
    }
    bridge.poll();

    let sent = wire.take();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].1,
        OutboundMessage::SetTriggerBoundingRect {
            rect: Rect::new(40.0, 30.0, 160.0, 36.0)
        }
    );
}

#[tokio::test]
async fn ticket_resolves_with_peer_error() {
    let (mut bridge, listener, _wire, _anchor) = setup();
    deliver(&listener, &mut bridge, PEER, json!({"type": "ready"}));
    deliver(
        &listener,
        &mut bridge,
        PEER,
        json!({"type": "connect", "address": "a1", "hexAddress": "0xa1"}),
    );

    let ticket = bridge
        .broadcast(vec![TxMessage::bank_send("a1", "a1", "aevm", "5")])
        .unwrap();
    deliver(
        &listener,
        &mut bridge,
        PEER,
        json!({"type": "tx-response", "error": {"message": "insufficient funds"}}),
    );

    assert_eq!(
        ticket.outcome().await,
        Some(TxOutcome::Failure("insufficient funds".into()))
    );
    assert!(!bridge.is_broadcasting());
}

#[test]
fn disposed_bridge_ignores_everything() {
    let (mut bridge, listener, wire, _anchor) = setup();
    bridge.dispose();

    assert_eq!(deliver(&listener, &mut bridge, PEER, json!({"type": "ready"})), 0);
    bridge.on_resize();
    bridge.poll();
    assert!(wire.take().is_empty());
    assert!(bridge.is_disposed());
}

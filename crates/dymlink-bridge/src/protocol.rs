//! Wire protocol between the host and the peer widget.
//!
//! Every message is a JSON object with a `type` discriminant:
//! - **Host -> peer**: camelCase names (`setTriggerBoundingRect`, `executeTx`, ...)
//! - **Peer -> host**: kebab-case names (`menu-visible`, `tx-response`, ...)
//!
//! Inbound messages are only decoded after the channel has verified their
//! origin; see [`crate::channel::Channel::drain_validated`].

use std::collections::BTreeMap;

use dymlink_common::{MenuAlign, Rect};
use serde::{Deserialize, Deserializer, Serialize};

/// Type URL of the bank send message used by the self-send helper.
pub const MSG_SEND_TYPE_URL: &str = "/cosmos.bank.v1beta1.MsgSend";

// =============================================================================
// HOST -> PEER
// =============================================================================

/// A message the host posts to the peer frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OutboundMessage {
    /// Current on-screen rectangle of the host trigger.
    SetTriggerBoundingRect { rect: Rect },
    /// CSS custom properties for the peer to apply.
    SetStyles { styles: BTreeMap<String, String> },
    /// Menu alignment relative to the trigger.
    SetMenuAlign { align: MenuAlign },
    /// Sign and broadcast the given messages.
    ExecuteTx { messages: Vec<TxMessage> },
    /// Connect a specific wallet on a specific network.
    Connect {
        #[serde(rename = "networkId")]
        network_id: String,
        #[serde(rename = "walletType")]
        wallet_type: String,
    },
    /// Open or close the peer menu.
    ToggleMenu,
}

impl OutboundMessage {
    /// Wire name of this message.
    pub fn kind(&self) -> &'static str {
        match self {
            OutboundMessage::SetTriggerBoundingRect { .. } => "setTriggerBoundingRect",
            OutboundMessage::SetStyles { .. } => "setStyles",
            OutboundMessage::SetMenuAlign { .. } => "setMenuAlign",
            OutboundMessage::ExecuteTx { .. } => "executeTx",
            OutboundMessage::Connect { .. } => "connect",
            OutboundMessage::ToggleMenu => "toggleMenu",
        }
    }
}

/// One transaction message in `Any` form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxMessage {
    #[serde(rename = "typeUrl")]
    pub type_url: String,
    pub value: serde_json::Value,
}

impl TxMessage {
    pub fn new(type_url: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            type_url: type_url.into(),
            value,
        }
    }

    /// A bank send of `amount` base units of `denom`.
    pub fn bank_send(from: &str, to: &str, denom: &str, amount: &str) -> Self {
        Self::new(
            MSG_SEND_TYPE_URL,
            serde_json::json!({
                "fromAddress": from,
                "toAddress": to,
                "amount": [{ "denom": denom, "amount": amount }],
            }),
        )
    }
}

// =============================================================================
// PEER -> HOST
// =============================================================================

/// A message the peer posts to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InboundMessage {
    /// The peer finished booting and accepts commands.
    Ready,
    /// The peer menu was shown or hidden.
    MenuVisible { value: bool },
    /// A wallet connected.
    Connect {
        address: String,
        #[serde(rename = "hexAddress")]
        hex_address: String,
    },
    /// The wallet disconnected.
    Disconnect,
    /// Result of the last `executeTx`.
    TxResponse {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        response: Option<serde_json::Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<PeerError>,
    },
    /// The complete list of notifications the peer currently shows.
    Notification { messages: Vec<Notification> },
    /// A wallet-level failure outside any transaction.
    WalletError { error: PeerError },
}

impl InboundMessage {
    /// Wire name of this message.
    pub fn kind(&self) -> &'static str {
        match self {
            InboundMessage::Ready => "ready",
            InboundMessage::MenuVisible { .. } => "menu-visible",
            InboundMessage::Connect { .. } => "connect",
            InboundMessage::Disconnect => "disconnect",
            InboundMessage::TxResponse { .. } => "tx-response",
            InboundMessage::Notification { .. } => "notification",
            InboundMessage::WalletError { .. } => "wallet-error",
        }
    }
}

/// Error payload reported by the peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerError {
    #[serde(default)]
    pub message: String,
}

/// One entry of a peer notification batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(deserialize_with = "string_or_number")]
    pub key: String,
    pub content: String,
}

impl Notification {
    pub fn new(key: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            content: content.into(),
        }
    }
}

/// Notification keys are usually strings, but numeric keys are accepted too.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Key {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Key::deserialize(deserializer)? {
        Key::Text(s) => s,
        Key::Number(n) => n.to_string(),
    })
}

// =============================================================================
// TESTS
// =============================================================================

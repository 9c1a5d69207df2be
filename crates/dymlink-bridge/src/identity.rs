//! The trusted peer endpoint.

use std::fmt;

use dymlink_common::BridgeError;
use url::Url;

/// Origin (`scheme://host[:port]`) of the one peer the bridge talks to.
///
/// Inbound provenance is an exact string comparison against this value;
/// nothing is normalized on the inbound side.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PeerIdentity {
    origin: String,
}

impl PeerIdentity {
    /// Derive the identity from the peer's base URL. Paths, queries and
    /// default ports are dropped.
    pub fn from_base_url(base_url: &str) -> dymlink_common::Result<Self> {
        let url = Url::parse(base_url).map_err(|e| BridgeError::PeerUrl(format!("{base_url}: {e}")))?;
        let origin = url.origin();
        if !origin.is_tuple() {
            return Err(BridgeError::PeerUrl(format!(
                "{base_url}: URL has no tuple origin"
            )));
        }
        Ok(Self {
            origin: origin.ascii_serialization(),
        })
    }

    /// The origin string, suitable as a `postMessage` target origin.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Whether an inbound message claiming `origin` comes from this peer.
    pub fn matches(&self, origin: &str) -> bool {
        self.origin == origin
    }
}

impl fmt::Display for PeerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.origin)
    }
}

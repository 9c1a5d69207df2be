//! URL of the peer frame.

use dymlink_common::BridgeError;
use dymlink_config::schema::PeerConfig;
use url::Url;

/// Build the URL the host loads into the peer frame:
/// `{base_url}{frame_path}[/account/{qr_account}]?networkIds={ids}`.
pub fn frame_url(peer: &PeerConfig) -> dymlink_common::Result<Url> {
    let joined = format!(
        "{}{}",
        peer.base_url.trim_end_matches('/'),
        peer.frame_path
    );
    let mut url = Url::parse(&joined).map_err(|e| BridgeError::PeerUrl(format!("{joined}: {e}")))?;

    if let Some(account) = peer.qr_account.as_deref().filter(|a| !a.is_empty()) {
        url.path_segments_mut()
            .map_err(|()| BridgeError::PeerUrl(format!("{joined}: cannot be a base URL")))?
            .pop_if_empty()
            .push("account")
            .push(account);
    }

    url.set_query(Some(&format!("networkIds={}", peer.network_ids.join(","))));
    Ok(url)
}

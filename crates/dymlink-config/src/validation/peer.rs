//! Validation for the `[peer]` section.

use std::sync::LazyLock;

use regex::Regex;

use crate::schema::DymlinkConfig;

use super::helpers::validate_non_empty;

/// Cosmos SDK denomination syntax.
static DENOM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9/:._-]{1,127}$").unwrap());

/// Validate the peer endpoint and embedding parameters.
pub(crate) fn validate_peer(errors: &mut Vec<String>, config: &DymlinkConfig) {
    let peer = &config.peer;

    match url::Url::parse(&peer.base_url) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                errors.push(format!(
                    "peer.base_url must be http or https, got '{}'",
                    url.scheme()
                ));
            }
            if url.host_str().is_none() {
                errors.push("peer.base_url must have a host".to_string());
            }
        }
        Err(e) => errors.push(format!("peer.base_url '{}' is invalid: {e}", peer.base_url)),
    }

    if peer.network_ids.is_empty() {
        errors.push("peer.network_ids must list at least one network".to_string());
    }
    for (i, id) in peer.network_ids.iter().enumerate() {
        validate_non_empty(errors, &format!("peer.network_ids[{i}]"), id);
        if id.contains(',') {
            errors.push(format!("peer.network_ids[{i}] must not contain ','"));
        }
    }

    if !DENOM_RE.is_match(&peer.main_denom) {
        errors.push(format!(
            "peer.main_denom '{}' is not a valid denomination",
            peer.main_denom
        ));
    }

    if !peer.frame_path.starts_with('/') {
        errors.push(format!(
            "peer.frame_path '{}' must start with '/'",
            peer.frame_path
        ));
    }

    if let Some(account) = &peer.qr_account {
        if account.is_empty() || !account.chars().all(|c| c.is_ascii_alphanumeric()) {
            errors.push(format!("peer.qr_account '{account}' must be alphanumeric"));
        }
    }
}

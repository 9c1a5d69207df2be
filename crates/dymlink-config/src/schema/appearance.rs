use std::collections::BTreeMap;

use dymlink_common::MenuAlign;
use serde::{Deserialize, Serialize};

/// Styling pushed to the peer when its frame loads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    pub menu_align: MenuAlign,
    /// CSS custom properties applied by the peer. Replaces the defaults
    /// wholesale when present.
    pub styles: BTreeMap<String, String>,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        let styles = [
            ("--black-light", "rgb(63 81 59)"),
            ("--black-light-rgb", "63, 81, 59"),
            ("--black-dark", "rgb(27 40 24)"),
            ("--black-dark-rgb", "27, 40, 24"),
            ("--background-color", "rgb(42 59 42)"),
            ("--background-color-secondary", "rgb(63 78 63)"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            menu_align: MenuAlign::Center,
            styles,
        }
    }
}

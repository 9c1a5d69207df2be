//! Visibility of the peer surface.
//!
//! `open` has two writers: the host toggle and the peer's own `menu-visible`
//! report. Last write wins. `interactive` follows the peer report only, so
//! host input stays blocked until the peer has actually rendered.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VisibilityState {
    pub open: bool,
    pub interactive: bool,
}

/// Effect of a write to `open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenTransition {
    Opened,
    Closed,
    Unchanged,
}

impl OpenTransition {
    fn between(before: bool, after: bool) -> Self {
        match (before, after) {
            (false, true) => OpenTransition::Opened,
            (true, false) => OpenTransition::Closed,
            _ => OpenTransition::Unchanged,
        }
    }
}

#[derive(Debug, Default)]
pub struct VisibilityController {
    state: VisibilityState,
}

impl VisibilityController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> VisibilityState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.open
    }

    /// Host intent: flip `open`.
    pub fn toggle(&mut self) -> OpenTransition {
        let before = self.state.open;
        self.state.open = !before;
        OpenTransition::between(before, self.state.open)
    }

    /// Peer report of its own visibility.
    pub fn set_open_from_peer(&mut self, open: bool) -> OpenTransition {
        let before = self.state.open;
        self.state.open = open;
        OpenTransition::between(before, open)
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.state.interactive = interactive;
    }

    /// Whether the peer frame is displayed. A deep-linked account view is
    /// always shown.
    pub fn frame_visible(&self, deep_link: bool) -> bool {
        self.state.open || deep_link
    }

    pub fn reset(&mut self) {
        self.state = VisibilityState::default();
    }
}

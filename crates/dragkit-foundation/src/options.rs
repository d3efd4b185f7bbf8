//! Tracker configuration.

use dragkit_ui_graphics::BoundedRect;

/// Configuration for a [`PointerTracker`](crate::PointerTracker).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackerOptions {
    /// Area the cumulative offset is clamped into after every move.
    pub limit: Option<BoundedRect>,
    /// Suppress the host's default action (page scroll, text selection) for
    /// move events handled during a gesture.
    pub prevent_default: bool,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            limit: None,
            prevent_default: true,
        }
    }
}

impl TrackerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamp the dragged offset into `limit`.
    pub fn with_limit(mut self, limit: BoundedRect) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_prevent_default(mut self, prevent_default: bool) -> Self {
        self.prevent_default = prevent_default;
        self
    }
}

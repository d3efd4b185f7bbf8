//! Pointer input foundation for dragkit
//!
//! This crate holds the pointer event model, the [`InputHost`] contract a
//! platform implements, and [`PointerTracker`], the press/move/release state
//! machine that turns pointer movement into element offsets.

pub mod host;
pub mod nodes;
pub mod options;

pub use dragkit_ui_graphics::{BoundedRect, Point};
pub use host::{HostError, InputHandler, InputHost, ListenerHandle};
pub use nodes::input::*;
pub use options::TrackerOptions;

pub mod prelude {
    pub use crate::host::{HostError, InputHost};
    pub use crate::nodes::input::prelude::*;
    pub use crate::options::TrackerOptions;
}

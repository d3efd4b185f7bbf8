//! UI layer for dragkit
//!
//! Interaction contexts keyed by element identity, and the drag directive that
//! repositions elements from tracker updates.

mod context;
mod directive;
mod style_host;

pub use context::{ContextId, ContextParams, ContextRegistry, InteractionContext};
pub use directive::{DirectiveSettings, DragDirective};
pub use style_host::StyleHost;

pub use dragkit_foundation::{
    DragMovement, DragNotification, HostError, InputHost, NotificationKind, PointerTracker,
    TrackerOptions,
};
pub use dragkit_ui_graphics::{BoundedRect, Point, Px};

pub mod prelude {
    pub use crate::context::{ContextId, ContextRegistry, InteractionContext};
    pub use crate::directive::{DirectiveSettings, DragDirective};
    pub use crate::style_host::StyleHost;
    pub use dragkit_foundation::prelude::*;
    pub use dragkit_ui_graphics::prelude::*;
}

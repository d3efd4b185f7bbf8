//! Gesture recognisers.

pub mod drag;
pub mod notification;

pub use drag::{DragObserver, PointerTracker, SubscriptionId};
pub use notification::{DragMovement, DragNotification, NotificationKind, NotificationMask};

pub mod dispatcher;
pub mod gestures;
pub mod types;

pub use dispatcher::PointerDispatcher;
pub use gestures::{
    DragMovement, DragNotification, DragObserver, NotificationKind, NotificationMask,
    PointerTracker, SubscriptionId,
};
pub use types::{
    InputEventType, ListenerOptions, ListenerTarget, PointerEvent, PointerEventKind, PointerSource,
};

pub mod prelude {
    pub use super::gestures::{DragMovement, DragNotification, NotificationKind, PointerTracker};
    pub use super::types::{InputEventType, PointerEvent, PointerEventKind, PointerSource};
}

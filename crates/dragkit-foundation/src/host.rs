//! Host environment contract.
//!
//! A host owns the element tree and the global document: it attaches and
//! detaches input listeners and reports an element's current layout
//! position. The tracker never talks to a platform directly.

use crate::nodes::input::types::{InputEventType, ListenerOptions, ListenerTarget, PointerEvent};
use dragkit_ui_graphics::Point;
use std::fmt;
use std::rc::Rc;

/// Callback invoked by the host for every matching input event.
pub type InputHandler = Rc<dyn Fn(&PointerEvent)>;

/// Opaque registration token returned by [`InputHost::add_listener`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerHandle(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    NoDocument,
    UnknownListener { handle: ListenerHandle },
    Platform {
        operation: &'static str,
        message: String,
    },
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::NoDocument => write!(f, "no document available"),
            HostError::UnknownListener { handle } => {
                write!(f, "listener {} is not registered", handle.0)
            }
            HostError::Platform { operation, message } => {
                write!(f, "{operation} failed: {message}")
            }
        }
    }
}

impl std::error::Error for HostError {}

pub trait InputHost: 'static {
    /// Handle to a node in the host's element tree.
    type Element: Clone + PartialEq + fmt::Debug + 'static;

    fn add_listener(
        &self,
        target: ListenerTarget<'_, Self::Element>,
        event_type: InputEventType,
        options: ListenerOptions,
        handler: InputHandler,
    ) -> Result<ListenerHandle, HostError>;

    fn remove_listener(&self, handle: ListenerHandle) -> Result<(), HostError>;

    /// Element position relative to its offset parent, in logical pixels.
    fn layout_offset(&self, element: &Self::Element) -> Point;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_errors_render_readably() {
        assert_eq!(HostError::NoDocument.to_string(), "no document available");
        assert_eq!(
            HostError::UnknownListener {
                handle: ListenerHandle(7)
            }
            .to_string(),
            "listener 7 is not registered"
        );
        assert_eq!(
            HostError::Platform {
                operation: "addEventListener",
                message: "TypeError".into(),
            }
            .to_string(),
            "addEventListener failed: TypeError"
        );
    }
}

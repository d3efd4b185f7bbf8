use dragkit_ui_graphics::Point;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// Input modality that produced a pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerSource {
    Mouse,
    Touch,
}

/// Host-level input event names a tracker listens for.
///
/// Mouse and touch streams are kept apart at the host boundary and unified
/// into [`PointerEvent`] before they reach the tracker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputEventType {
    MouseDown,
    MouseMove,
    MouseUp,
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
}

impl InputEventType {
    /// Press events, listened on the bound element.
    pub const PRESS: [InputEventType; 2] = [InputEventType::TouchStart, InputEventType::MouseDown];

    /// Move events, listened on the document.
    pub const MOVE: [InputEventType; 2] = [InputEventType::TouchMove, InputEventType::MouseMove];

    /// Release events, listened on the document.
    pub const RELEASE: [InputEventType; 3] = [
        InputEventType::TouchEnd,
        InputEventType::TouchCancel,
        InputEventType::MouseUp,
    ];

    /// DOM event name.
    pub fn as_str(&self) -> &'static str {
        match self {
            InputEventType::MouseDown => "mousedown",
            InputEventType::MouseMove => "mousemove",
            InputEventType::MouseUp => "mouseup",
            InputEventType::TouchStart => "touchstart",
            InputEventType::TouchMove => "touchmove",
            InputEventType::TouchEnd => "touchend",
            InputEventType::TouchCancel => "touchcancel",
        }
    }

    pub fn kind(&self) -> PointerEventKind {
        match self {
            InputEventType::MouseDown | InputEventType::TouchStart => PointerEventKind::Down,
            InputEventType::MouseMove | InputEventType::TouchMove => PointerEventKind::Move,
            InputEventType::MouseUp | InputEventType::TouchEnd => PointerEventKind::Up,
            InputEventType::TouchCancel => PointerEventKind::Cancel,
        }
    }

    pub fn source(&self) -> PointerSource {
        match self {
            InputEventType::MouseDown | InputEventType::MouseMove | InputEventType::MouseUp => {
                PointerSource::Mouse
            }
            InputEventType::TouchStart
            | InputEventType::TouchMove
            | InputEventType::TouchEnd
            | InputEventType::TouchCancel => PointerSource::Touch,
        }
    }
}

/// Where a listener is attached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ListenerTarget<'a, E> {
    Element(&'a E),
    /// The whole document, so a gesture keeps being tracked after the pointer
    /// leaves the element.
    Document,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    /// `None` leaves the host default in place.
    pub passive: Option<bool>,
}

impl ListenerOptions {
    /// Listener that is allowed to cancel the default action.
    pub const NON_PASSIVE: ListenerOptions = ListenerOptions {
        passive: Some(false),
    };
}

/// Pointer event unified across mouse and touch input.
///
/// Touch events carry the page coordinates of their first touch point.
/// Default-action suppression is shared via `Rc<Cell>` so the host that
/// raised the event can observe a handler's `prevent_default` call.
#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub source: PointerSource,
    pub page_position: Point,
    default_prevented: Rc<Cell<bool>>,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, source: PointerSource, page_position: Point) -> Self {
        Self {
            kind,
            source,
            page_position,
            default_prevented: Rc::new(Cell::new(false)),
        }
    }

    pub fn from_event_type(event_type: InputEventType, page_position: Point) -> Self {
        Self::new(event_type.kind(), event_type.source(), page_position)
    }

    pub fn mouse(kind: PointerEventKind, x: f32, y: f32) -> Self {
        Self::new(kind, PointerSource::Mouse, Point::new(x, y))
    }

    pub fn touch(kind: PointerEventKind, x: f32, y: f32) -> Self {
        Self::new(kind, PointerSource::Touch, Point::new(x, y))
    }

    /// Asks the host to suppress the platform's default action (scrolling,
    /// text selection) for this event.
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

//! Robot-style gesture driver.
//!
//! # Example
//!
//! ```
//! use dragkit_testing::{FakeHost, GestureRobot};
//! use dragkit_ui_graphics::Point;
//!
//! let host = FakeHost::shared();
//! let element = host.create_element(Point::new(50.0, 50.0));
//! let mut robot = GestureRobot::mouse(host.clone());
//!
//! robot.press(element, 100.0, 70.0);
//! robot.move_to(110.0, 80.0);
//! robot.release();
//! ```

use crate::host::{FakeElement, FakeHost, FakeTarget};
use dragkit_foundation::{InputEventType, PointerEvent, PointerSource};
use dragkit_ui_graphics::Point;
use std::rc::Rc;

/// Drives press/move/release sequences through a [`FakeHost`].
pub struct GestureRobot {
    host: Rc<FakeHost>,
    source: PointerSource,
    position: Point,
}

impl GestureRobot {
    pub fn new(host: Rc<FakeHost>, source: PointerSource) -> Self {
        Self {
            host,
            source,
            position: Point::ZERO,
        }
    }

    pub fn mouse(host: Rc<FakeHost>) -> Self {
        Self::new(host, PointerSource::Mouse)
    }

    pub fn touch(host: Rc<FakeHost>) -> Self {
        Self::new(host, PointerSource::Touch)
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Presses on `element` at page position (x, y).
    pub fn press(&mut self, element: FakeElement, x: f32, y: f32) -> PointerEvent {
        self.position = Point::new(x, y);
        let event_type = match self.source {
            PointerSource::Mouse => InputEventType::MouseDown,
            PointerSource::Touch => InputEventType::TouchStart,
        };
        self.host.dispatch(element, event_type, self.position)
    }

    /// Moves the pointer to page position (x, y). The event is raised on the
    /// document, as if the pointer had already left the element.
    pub fn move_to(&mut self, x: f32, y: f32) -> PointerEvent {
        self.position = Point::new(x, y);
        let event_type = match self.source {
            PointerSource::Mouse => InputEventType::MouseMove,
            PointerSource::Touch => InputEventType::TouchMove,
        };
        self.host
            .dispatch(FakeTarget::Document, event_type, self.position)
    }

    pub fn release(&mut self) -> PointerEvent {
        let event_type = match self.source {
            PointerSource::Mouse => InputEventType::MouseUp,
            PointerSource::Touch => InputEventType::TouchEnd,
        };
        self.host
            .dispatch(FakeTarget::Document, event_type, self.position)
    }

    /// Touch-only: the platform aborted the gesture.
    pub fn cancel(&mut self) -> PointerEvent {
        self.host.dispatch(
            FakeTarget::Document,
            InputEventType::TouchCancel,
            self.position,
        )
    }

    /// Press on `element` at `from`, move through `path`, then release.
    pub fn drag(&mut self, element: FakeElement, from: Point, path: &[Point]) {
        self.press(element, from.x, from.y);
        for point in path {
            self.move_to(point.x, point.y);
        }
        self.release();
    }
}

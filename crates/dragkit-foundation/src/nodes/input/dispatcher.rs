//! Pointer input dispatcher plumbing.
//!
//! Hosts enqueue raw input here and pop it one event at a time, so handlers
//! that enqueue further input never observe it out of order.

use super::types::{InputEventType, PointerEvent};
use std::collections::VecDeque;

/// FIFO of pending input, each entry tagged with the host's target key.
pub struct PointerDispatcher<T> {
    queue: VecDeque<(T, InputEventType, PointerEvent)>,
}

impl<T> Default for PointerDispatcher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PointerDispatcher<T> {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    pub fn push(&mut self, target: T, event_type: InputEventType, event: PointerEvent) {
        self.queue.push_back((target, event_type, event));
    }

    pub fn pop(&mut self) -> Option<(T, InputEventType, PointerEvent)> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::input::types::PointerEventKind;

    #[test]
    fn pops_in_push_order() {
        let mut dispatcher = PointerDispatcher::new();
        dispatcher.push(
            1u32,
            InputEventType::MouseDown,
            PointerEvent::mouse(PointerEventKind::Down, 0.0, 0.0),
        );
        dispatcher.push(
            2u32,
            InputEventType::MouseMove,
            PointerEvent::mouse(PointerEventKind::Move, 5.0, 5.0),
        );

        assert_eq!(dispatcher.len(), 2);
        let (first, ty, _) = dispatcher.pop().expect("first event");
        assert_eq!((first, ty), (1, InputEventType::MouseDown));
        let (second, ty, event) = dispatcher.pop().expect("second event");
        assert_eq!((second, ty), (2, InputEventType::MouseMove));
        assert_eq!(event.page_position.x, 5.0);
        assert!(dispatcher.is_empty());
    }
}

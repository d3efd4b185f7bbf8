//! Notifications emitted by the pointer tracker.

use dragkit_ui_graphics::Point;

/// Offset and per-move delta reported with every drag update.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragMovement {
    pub offset_x: f32,
    pub offset_y: f32,
    pub movement_x: f32,
    pub movement_y: f32,
}

impl DragMovement {
    pub fn new(offset: Point, movement: Point) -> Self {
        Self {
            offset_x: offset.x,
            offset_y: offset.y,
            movement_x: movement.x,
            movement_y: movement.y,
        }
    }

    pub fn offset(&self) -> Point {
        Point::new(self.offset_x, self.offset_y)
    }

    pub fn movement(&self) -> Point {
        Point::new(self.movement_x, self.movement_y)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DragNotification<E> {
    /// A gesture started; `offset` is the element's layout position.
    Pressed { offset: Point },
    /// Pointer moved while pressed.
    Touching { page_position: Point },
    /// Element should be moved to `movement.offset()`.
    Dragging { element: E, movement: DragMovement },
    /// The gesture ended.
    Released { offset: Point },
}

impl<E> DragNotification<E> {
    pub fn kind(&self) -> NotificationKind {
        match self {
            DragNotification::Pressed { .. } => NotificationKind::Pressed,
            DragNotification::Touching { .. } => NotificationKind::Touching,
            DragNotification::Dragging { .. } => NotificationKind::Dragging,
            DragNotification::Released { .. } => NotificationKind::Released,
        }
    }
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Pressed = 0,
    Touching = 1,
    Dragging = 2,
    Released = 3,
}

/// Set of notification kinds an observer wants to receive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NotificationMask(u8);

impl NotificationMask {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(0b1111);

    pub fn new() -> Self {
        Self::NONE
    }

    pub fn only(kind: NotificationKind) -> Self {
        Self::NONE.with(kind)
    }

    pub fn with(mut self, kind: NotificationKind) -> Self {
        self.insert(kind);
        self
    }

    pub fn insert(&mut self, kind: NotificationKind) {
        self.0 |= 1 << (kind as u8);
    }

    pub fn without(mut self, kind: NotificationKind) -> Self {
        self.remove(kind);
        self
    }

    pub fn remove(&mut self, kind: NotificationKind) {
        self.0 &= !(1 << (kind as u8));
    }

    pub fn contains(&self, kind: NotificationKind) -> bool {
        (self.0 & (1 << (kind as u8))) != 0
    }
}

impl Default for NotificationMask {
    fn default() -> Self {
        Self::NONE
    }
}

impl From<NotificationKind> for NotificationMask {
    fn from(kind: NotificationKind) -> Self {
        Self::only(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_insert_and_remove() {
        let mut mask = NotificationMask::new().with(NotificationKind::Touching);
        assert!(mask.contains(NotificationKind::Touching));
        assert!(!mask.contains(NotificationKind::Dragging));

        mask.insert(NotificationKind::Dragging);
        mask.remove(NotificationKind::Touching);

        assert!(mask.contains(NotificationKind::Dragging));
        assert!(!mask.contains(NotificationKind::Touching));
    }

    #[test]
    fn all_contains_every_kind() {
        for kind in [
            NotificationKind::Pressed,
            NotificationKind::Touching,
            NotificationKind::Dragging,
            NotificationKind::Released,
        ] {
            assert!(NotificationMask::ALL.contains(kind));
            assert!(!NotificationMask::NONE.contains(kind));
        }
    }

    #[test]
    fn notification_kind_matches_variant() {
        let dragging: DragNotification<u32> = DragNotification::Dragging {
            element: 1,
            movement: DragMovement::new(Point::new(60.0, 65.0), Point::new(10.0, 15.0)),
        };
        assert_eq!(dragging.kind(), NotificationKind::Dragging);
        if let DragNotification::Dragging { movement, .. } = dragging {
            assert_eq!(movement.offset(), Point::new(60.0, 65.0));
            assert_eq!(movement.movement(), Point::new(10.0, 15.0));
        }
    }
}

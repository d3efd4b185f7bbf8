//! Drag gesture tracking.
//!
//! [`PointerTracker`] binds to one element of an [`InputHost`], follows a
//! press / move* / release gesture and turns consecutive pointer positions
//! into per-move deltas and a cumulative element offset.
//!
//! Press listeners sit on the element. Move and release listeners sit on the
//! document, so a gesture survives the pointer leaving the element. Handlers
//! hold only weak references to the tracker; dropping every tracker handle
//! turns the remaining host listeners into no-ops, but [`PointerTracker::release`]
//! is what actually detaches them.

use super::notification::{DragMovement, DragNotification, NotificationKind, NotificationMask};
use crate::host::{InputHandler, InputHost, ListenerHandle};
use crate::nodes::input::types::{InputEventType, ListenerOptions, ListenerTarget, PointerEvent};
use crate::options::TrackerOptions;
use dragkit_ui_graphics::Point;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::mem;
use std::rc::{Rc, Weak};

/// Observer callback receiving tracker notifications.
pub type DragObserver<E> = Rc<dyn Fn(&DragNotification<E>)>;

/// Identifies an observer registration for [`PointerTracker::unsubscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type ListenerHandles = SmallVec<[ListenerHandle; 7]>;

struct TrackerState<E> {
    is_touching: bool,
    /// Page position of the previous move in the current gesture.
    last_position: Option<Point>,
    offset: Point,
    bound: Option<E>,
    listeners: ListenerHandles,
}

impl<E> Default for TrackerState<E> {
    fn default() -> Self {
        Self {
            is_touching: false,
            last_position: None,
            offset: Point::ZERO,
            bound: None,
            listeners: SmallVec::new(),
        }
    }
}

struct Observers<E> {
    next_id: u64,
    entries: Vec<(SubscriptionId, NotificationMask, DragObserver<E>)>,
}

impl<E> Observers<E> {
    fn new() -> Self {
        Self {
            next_id: 1,
            entries: Vec::new(),
        }
    }

    fn interested_in(&self, kind: NotificationKind) -> bool {
        self.entries.iter().any(|(_, mask, _)| mask.contains(kind))
    }
}

struct TrackerShared<E> {
    options: TrackerOptions,
    state: RefCell<TrackerState<E>>,
    observers: RefCell<Observers<E>>,
}

impl<E: Clone> TrackerShared<E> {
    /// Delivers `notification` to every interested observer.
    ///
    /// Observers run with no tracker borrow held, so they may call back into
    /// the tracker.
    fn emit(&self, notification: DragNotification<E>) {
        let kind = notification.kind();
        let targets: SmallVec<[DragObserver<E>; 4]> = self
            .observers
            .borrow()
            .entries
            .iter()
            .filter(|(_, mask, _)| mask.contains(kind))
            .map(|(_, _, observer)| observer.clone())
            .collect();
        for observer in targets {
            observer(&notification);
        }
    }

    fn has_observers(&self, kind: NotificationKind) -> bool {
        self.observers.borrow().interested_in(kind)
    }

    fn handle_press<H>(&self, host: &H)
    where
        H: InputHost<Element = E>,
    {
        let offset = {
            let mut state = self.state.borrow_mut();
            state.is_touching = true;
            state.last_position = None;
            let offset = state
                .bound
                .as_ref()
                .map(|element| host.layout_offset(element))
                .unwrap_or(Point::ZERO);
            state.offset = offset;
            offset
        };
        log::trace!("drag gesture started at offset {:?}", offset);
        if self.has_observers(NotificationKind::Pressed) {
            self.emit(DragNotification::Pressed { offset });
        }
    }

    fn handle_move(&self, event: &PointerEvent)
    where
        E: std::fmt::Debug,
    {
        if !self.state.borrow().is_touching {
            return;
        }
        let page_position = event.page_position;

        if self.has_observers(NotificationKind::Touching) {
            self.emit(DragNotification::Touching { page_position });
        }

        let (movement, element) = {
            let mut state = self.state.borrow_mut();
            let delta = state
                .last_position
                .map(|previous| page_position - previous)
                .unwrap_or(Point::ZERO);
            state.offset += delta;
            if let Some(limit) = self.options.limit {
                state.offset = limit.limit(state.offset);
            }
            state.last_position = Some(page_position);
            (DragMovement::new(state.offset, delta), state.bound.clone())
        };

        if self.has_observers(NotificationKind::Dragging) {
            match element {
                Some(element) => self.emit(DragNotification::Dragging { element, movement }),
                None => log::warn!(
                    "pointer tracker is touching without a bound element; dropping drag update {:?}",
                    movement
                ),
            }
        }

        if self.options.prevent_default {
            event.prevent_default();
        }
    }

    fn handle_release(&self) {
        let offset = {
            let mut state = self.state.borrow_mut();
            if !state.is_touching {
                return;
            }
            state.is_touching = false;
            state.last_position = None;
            state.offset
        };
        log::trace!("drag gesture ended at offset {:?}", offset);
        if self.has_observers(NotificationKind::Released) {
            self.emit(DragNotification::Released { offset });
        }
    }
}

/// Press/move/release state machine for a single element.
///
/// Cloning yields another handle to the same tracker.
pub struct PointerTracker<H: InputHost> {
    host: Rc<H>,
    shared: Rc<TrackerShared<H::Element>>,
}

impl<H: InputHost> Clone for PointerTracker<H> {
    fn clone(&self) -> Self {
        Self {
            host: self.host.clone(),
            shared: self.shared.clone(),
        }
    }
}

impl<H: InputHost> PointerTracker<H> {
    pub fn new(host: Rc<H>) -> Self {
        Self::with_options(host, TrackerOptions::default())
    }

    pub fn with_options(host: Rc<H>, options: TrackerOptions) -> Self {
        Self {
            host,
            shared: Rc::new(TrackerShared {
                options,
                state: RefCell::new(TrackerState::default()),
                observers: RefCell::new(Observers::new()),
            }),
        }
    }

    pub fn options(&self) -> &TrackerOptions {
        &self.shared.options
    }

    pub fn is_touching(&self) -> bool {
        self.shared.state.borrow().is_touching
    }

    /// Cumulative element offset of the current or last gesture.
    pub fn offset(&self) -> Point {
        self.shared.state.borrow().offset
    }

    pub fn bound_element(&self) -> Option<H::Element> {
        self.shared.state.borrow().bound.clone()
    }

    /// Number of host listeners currently attached by this tracker.
    pub fn listener_count(&self) -> usize {
        self.shared.state.borrow().listeners.len()
    }

    pub fn has_dragging_observers(&self) -> bool {
        self.shared.has_observers(NotificationKind::Dragging)
    }

    /// Registers `observer` for the notification kinds in `mask`.
    pub fn subscribe(
        &self,
        mask: impl Into<NotificationMask>,
        observer: impl Fn(&DragNotification<H::Element>) + 'static,
    ) -> SubscriptionId {
        let observer: DragObserver<H::Element> = Rc::new(observer);
        let mut observers = self.shared.observers.borrow_mut();
        let id = SubscriptionId(observers.next_id);
        observers.next_id += 1;
        observers.entries.push((id, mask.into(), observer));
        id
    }

    /// Shorthand for a [`NotificationKind::Dragging`] observer.
    pub fn on_dragging(
        &self,
        observer: impl Fn(&H::Element, &DragMovement) + 'static,
    ) -> SubscriptionId {
        self.subscribe(NotificationKind::Dragging, move |notification| {
            if let DragNotification::Dragging { element, movement } = notification {
                observer(element, movement);
            }
        })
    }

    /// Shorthand for a [`NotificationKind::Touching`] observer.
    pub fn on_touching(&self, observer: impl Fn(Point) + 'static) -> SubscriptionId {
        self.subscribe(NotificationKind::Touching, move |notification| {
            if let DragNotification::Touching { page_position } = notification {
                observer(*page_position);
            }
        })
    }

    /// Removes an observer. Returns false if `id` was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.shared.observers.borrow_mut();
        let before = observers.entries.len();
        observers.entries.retain(|(entry, _, _)| *entry != id);
        observers.entries.len() != before
    }

    /// Starts tracking gestures on `element`.
    ///
    /// Binding the already-bound element is a no-op. Binding a different
    /// element first releases the current one.
    pub fn bind(&self, element: &H::Element) {
        let current = self.shared.state.borrow().bound.clone();
        match current {
            None => self.attach(element),
            Some(bound) if bound == *element => {}
            Some(bound) => {
                log::debug!("rebinding pointer tracker from {:?} to {:?}", bound, element);
                self.release();
                self.bind(element);
            }
        }
    }

    /// Detaches every listener and forgets the bound element.
    pub fn release(&self) {
        let (element, listeners) = {
            let mut state = self.shared.state.borrow_mut();
            (state.bound.take(), mem::take(&mut state.listeners))
        };
        let Some(element) = element else {
            return;
        };
        for handle in listeners {
            if let Err(err) = self.host.remove_listener(handle) {
                log::error!("failed to detach listener {}: {err}", handle.0);
            }
        }
        log::debug!("released pointer tracker from {:?}", element);
    }

    fn attach(&self, element: &H::Element) {
        let press = self.press_handler();
        let moved = self.move_handler();
        let release = self.release_handler();

        let mut listeners = ListenerHandles::new();
        for event_type in InputEventType::PRESS {
            self.listen(
                ListenerTarget::Element(element),
                event_type,
                ListenerOptions::default(),
                press.clone(),
                &mut listeners,
            );
        }
        for event_type in InputEventType::MOVE {
            // Non-passive so prevent_default can stop page scrolling on touch.
            self.listen(
                ListenerTarget::Document,
                event_type,
                ListenerOptions::NON_PASSIVE,
                moved.clone(),
                &mut listeners,
            );
        }
        for event_type in InputEventType::RELEASE {
            self.listen(
                ListenerTarget::Document,
                event_type,
                ListenerOptions::default(),
                release.clone(),
                &mut listeners,
            );
        }

        let mut state = self.shared.state.borrow_mut();
        state.bound = Some(element.clone());
        state.listeners = listeners;
        log::debug!(
            "bound pointer tracker to {:?} with {} listeners",
            element,
            state.listeners.len()
        );
    }

    fn listen(
        &self,
        target: ListenerTarget<'_, H::Element>,
        event_type: InputEventType,
        options: ListenerOptions,
        handler: InputHandler,
        listeners: &mut ListenerHandles,
    ) {
        match self
            .host
            .add_listener(target, event_type, options, handler)
        {
            Ok(handle) => listeners.push(handle),
            Err(err) => log::error!("failed to attach {} listener: {err}", event_type.as_str()),
        }
    }

    fn press_handler(&self) -> InputHandler {
        let shared = Rc::downgrade(&self.shared);
        let host: Weak<H> = Rc::downgrade(&self.host);
        Rc::new(move |_event: &PointerEvent| {
            if let (Some(shared), Some(host)) = (shared.upgrade(), host.upgrade()) {
                shared.handle_press(host.as_ref());
            }
        })
    }

    fn move_handler(&self) -> InputHandler {
        let shared = Rc::downgrade(&self.shared);
        Rc::new(move |event: &PointerEvent| {
            if let Some(shared) = shared.upgrade() {
                shared.handle_move(event);
            }
        })
    }

    fn release_handler(&self) -> InputHandler {
        let shared = Rc::downgrade(&self.shared);
        Rc::new(move |_event: &PointerEvent| {
            if let Some(shared) = shared.upgrade() {
                shared.handle_release();
            }
        })
    }
}

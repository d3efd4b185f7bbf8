//! In-memory host for tests.
//!
//! [`FakeHost`] models just enough of a DOM for the tracker and directive:
//! elements with a layout position, attributes and inline styles, a listener
//! table per target, and ordered event delivery. Events raised on an element
//! bubble to the document, like DOM input events do.

use dragkit_foundation::{
    HostError, InputEventType, InputHandler, InputHost, ListenerHandle, ListenerOptions,
    ListenerTarget, PointerDispatcher, PointerEvent,
};
use dragkit_ui::StyleHost;
use dragkit_ui_graphics::Point;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FakeElement(u64);

impl FakeElement {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FakeTarget {
    Element(FakeElement),
    Document,
}

impl From<FakeElement> for FakeTarget {
    fn from(element: FakeElement) -> Self {
        FakeTarget::Element(element)
    }
}

#[derive(Default)]
struct ElementRecord {
    layout_offset: Point,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
}

struct ListenerRecord {
    target: FakeTarget,
    event_type: InputEventType,
    options: ListenerOptions,
    handler: InputHandler,
}

/// A style write as observed by the host, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleWrite {
    pub element: FakeElement,
    pub property: String,
    pub value: String,
}

#[derive(Default)]
pub struct FakeHost {
    next_element: Cell<u64>,
    next_listener: Cell<u64>,
    elements: RefCell<HashMap<FakeElement, ElementRecord>>,
    // Keyed by handle so delivery follows registration order.
    listeners: RefCell<BTreeMap<ListenerHandle, ListenerRecord>>,
    queue: RefCell<PointerDispatcher<FakeTarget>>,
    style_writes: RefCell<Vec<StyleWrite>>,
    reject_listeners: Cell<bool>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    pub fn create_element(&self, layout_offset: Point) -> FakeElement {
        let id = self.next_element.get() + 1;
        self.next_element.set(id);
        let element = FakeElement(id);
        self.elements.borrow_mut().insert(
            element,
            ElementRecord {
                layout_offset,
                ..ElementRecord::default()
            },
        );
        element
    }

    pub fn set_layout_offset(&self, element: FakeElement, layout_offset: Point) {
        if let Some(record) = self.elements.borrow_mut().get_mut(&element) {
            record.layout_offset = layout_offset;
        }
    }

    /// Makes every later `add_listener` call fail.
    pub fn reject_listeners(&self, reject: bool) {
        self.reject_listeners.set(reject);
    }

    pub fn listener_count(&self, target: impl Into<FakeTarget>) -> usize {
        let target = target.into();
        self.listeners
            .borrow()
            .values()
            .filter(|record| record.target == target)
            .count()
    }

    pub fn listener_count_for(
        &self,
        target: impl Into<FakeTarget>,
        event_type: InputEventType,
    ) -> usize {
        let target = target.into();
        self.listeners
            .borrow()
            .values()
            .filter(|record| record.target == target && record.event_type == event_type)
            .count()
    }

    pub fn total_listeners(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn listener_options(
        &self,
        target: impl Into<FakeTarget>,
        event_type: InputEventType,
    ) -> Vec<ListenerOptions> {
        let target = target.into();
        self.listeners
            .borrow()
            .values()
            .filter(|record| record.target == target && record.event_type == event_type)
            .map(|record| record.options)
            .collect()
    }

    pub fn style(&self, element: FakeElement, property: &str) -> Option<String> {
        self.elements
            .borrow()
            .get(&element)
            .and_then(|record| record.styles.get(property).cloned())
    }

    pub fn style_writes(&self) -> Vec<StyleWrite> {
        self.style_writes.borrow().clone()
    }

    pub fn read_attribute(&self, element: FakeElement, name: &str) -> Option<String> {
        self.elements
            .borrow()
            .get(&element)
            .and_then(|record| record.attributes.get(name).cloned())
    }

    pub fn write_attribute(&self, element: FakeElement, name: &str, value: &str) {
        if let Some(record) = self.elements.borrow_mut().get_mut(&element) {
            record.attributes.insert(name.to_string(), value.to_string());
        }
    }

    /// Queues an input event without delivering it.
    pub fn enqueue(
        &self,
        target: impl Into<FakeTarget>,
        event_type: InputEventType,
        page_position: Point,
    ) -> PointerEvent {
        let event = PointerEvent::from_event_type(event_type, page_position);
        self.queue
            .borrow_mut()
            .push(target.into(), event_type, event.clone());
        event
    }

    /// Delivers queued events in order, including events queued by handlers.
    /// Returns how many events were delivered.
    pub fn pump(&self) -> usize {
        let mut delivered = 0;
        loop {
            let next = self.queue.borrow_mut().pop();
            let Some((target, event_type, event)) = next else {
                break;
            };
            self.deliver(target, event_type, &event);
            delivered += 1;
        }
        delivered
    }

    /// Queues and delivers one event, returning it so callers can inspect
    /// whether its default action was prevented.
    pub fn dispatch(
        &self,
        target: impl Into<FakeTarget>,
        event_type: InputEventType,
        page_position: Point,
    ) -> PointerEvent {
        let event = self.enqueue(target, event_type, page_position);
        self.pump();
        event
    }

    fn deliver(&self, target: FakeTarget, event_type: InputEventType, event: &PointerEvent) {
        let mut phases = vec![target];
        if target != FakeTarget::Document {
            phases.push(FakeTarget::Document);
        }
        let mut handlers: Vec<InputHandler> = Vec::new();
        {
            let listeners = self.listeners.borrow();
            for phase in phases {
                for record in listeners.values() {
                    if record.target == phase && record.event_type == event_type {
                        handlers.push(record.handler.clone());
                    }
                }
            }
        }
        log::trace!(
            "delivering {} to {:?} ({} handlers)",
            event_type.as_str(),
            target,
            handlers.len()
        );
        for handler in handlers {
            handler(event);
        }
    }
}

impl InputHost for FakeHost {
    type Element = FakeElement;

    fn add_listener(
        &self,
        target: ListenerTarget<'_, FakeElement>,
        event_type: InputEventType,
        options: ListenerOptions,
        handler: InputHandler,
    ) -> Result<ListenerHandle, HostError> {
        if self.reject_listeners.get() {
            return Err(HostError::Platform {
                operation: "addEventListener",
                message: format!("{} rejected", event_type.as_str()),
            });
        }
        let target = match target {
            ListenerTarget::Element(element) => FakeTarget::Element(*element),
            ListenerTarget::Document => FakeTarget::Document,
        };
        let handle = ListenerHandle(self.next_listener.get() + 1);
        self.next_listener.set(handle.0);
        self.listeners.borrow_mut().insert(
            handle,
            ListenerRecord {
                target,
                event_type,
                options,
                handler,
            },
        );
        Ok(handle)
    }

    fn remove_listener(&self, handle: ListenerHandle) -> Result<(), HostError> {
        self.listeners
            .borrow_mut()
            .remove(&handle)
            .map(|_| ())
            .ok_or(HostError::UnknownListener { handle })
    }

    fn layout_offset(&self, element: &FakeElement) -> Point {
        self.elements
            .borrow()
            .get(element)
            .map(|record| record.layout_offset)
            .unwrap_or(Point::ZERO)
    }
}

impl StyleHost for FakeHost {
    fn attribute(&self, element: &FakeElement, name: &str) -> Option<String> {
        self.read_attribute(*element, name)
    }

    fn set_attribute(&self, element: &FakeElement, name: &str, value: &str) -> Result<(), HostError> {
        self.write_attribute(*element, name, value);
        Ok(())
    }

    fn set_style(&self, element: &FakeElement, property: &str, value: &str) -> Result<(), HostError> {
        let mut elements = self.elements.borrow_mut();
        let record = elements
            .get_mut(element)
            .ok_or_else(|| HostError::Platform {
                operation: "style.setProperty",
                message: format!("element {} is detached", element.0),
            })?;
        record.styles.insert(property.to_string(), value.to_string());
        self.style_writes.borrow_mut().push(StyleWrite {
            element: *element,
            property: property.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }
}

use dragkit_foundation::{
    HostError, InputEventType, InputHandler, InputHost, ListenerHandle, ListenerOptions,
    ListenerTarget, PointerEvent, PointerSource,
};
use dragkit_ui::StyleHost;
use dragkit_ui_graphics::Point;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Document, Event, EventTarget, HtmlElement, MouseEvent, TouchEvent};

struct RegisteredListener {
    target: EventTarget,
    event_type: InputEventType,
    callback: Closure<dyn FnMut(Event)>,
}

/// Browser host backed by the page's `document`.
pub struct WebHost {
    document: Document,
    next_handle: Cell<u64>,
    listeners: RefCell<HashMap<ListenerHandle, RegisteredListener>>,
}

impl WebHost {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            next_handle: Cell::new(0),
            listeners: RefCell::new(HashMap::new()),
        }
    }

    /// Host for the current window's document.
    pub fn from_window() -> Result<Self, HostError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or(HostError::NoDocument)?;
        Ok(Self::new(document))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn event_target(&self, target: ListenerTarget<'_, HtmlElement>) -> EventTarget {
        match target {
            ListenerTarget::Element(element) => element.clone().into(),
            ListenerTarget::Document => self.document.clone().into(),
        }
    }
}

impl InputHost for WebHost {
    type Element = HtmlElement;

    fn add_listener(
        &self,
        target: ListenerTarget<'_, HtmlElement>,
        event_type: InputEventType,
        options: ListenerOptions,
        handler: InputHandler,
    ) -> Result<ListenerHandle, HostError> {
        let target = self.event_target(target);
        let callback = Closure::wrap(Box::new(move |event: Event| {
            let Some(pointer) = pointer_event(event_type, &event) else {
                log::debug!("ignoring {} without a pointer position", event_type.as_str());
                return;
            };
            handler(&pointer);
            if pointer.is_default_prevented() {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(Event)>);

        let listener_options = AddEventListenerOptions::new();
        if let Some(passive) = options.passive {
            listener_options.set_passive(passive);
        }
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event_type.as_str(),
                callback.as_ref().unchecked_ref(),
                &listener_options,
            )
            .map_err(|err| js_error("addEventListener", err))?;

        let handle = ListenerHandle(self.next_handle.get() + 1);
        self.next_handle.set(handle.0);
        self.listeners.borrow_mut().insert(
            handle,
            RegisteredListener {
                target,
                event_type,
                callback,
            },
        );
        Ok(handle)
    }

    fn remove_listener(&self, handle: ListenerHandle) -> Result<(), HostError> {
        let listener = self
            .listeners
            .borrow_mut()
            .remove(&handle)
            .ok_or(HostError::UnknownListener { handle })?;
        listener
            .target
            .remove_event_listener_with_callback(
                listener.event_type.as_str(),
                listener.callback.as_ref().unchecked_ref(),
            )
            .map_err(|err| js_error("removeEventListener", err))
    }

    fn layout_offset(&self, element: &HtmlElement) -> Point {
        Point::new(element.offset_left() as f32, element.offset_top() as f32)
    }
}

impl StyleHost for WebHost {
    fn attribute(&self, element: &HtmlElement, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&self, element: &HtmlElement, name: &str, value: &str) -> Result<(), HostError> {
        element
            .set_attribute(name, value)
            .map_err(|err| js_error("setAttribute", err))
    }

    fn set_style(&self, element: &HtmlElement, property: &str, value: &str) -> Result<(), HostError> {
        element
            .style()
            .set_property(property, value)
            .map_err(|err| js_error("style.setProperty", err))
    }
}

impl Drop for WebHost {
    fn drop(&mut self) {
        for (handle, listener) in self.listeners.get_mut().drain() {
            if let Err(err) = listener.target.remove_event_listener_with_callback(
                listener.event_type.as_str(),
                listener.callback.as_ref().unchecked_ref(),
            ) {
                let err = js_error("removeEventListener", err);
                log::error!("failed to detach listener {}: {err}", handle.0);
            }
        }
    }
}

/// Reads the page position from a mouse or touch event.
pub fn pointer_event(event_type: InputEventType, event: &Event) -> Option<PointerEvent> {
    let page_position = match event_type.source() {
        PointerSource::Mouse => {
            let mouse = event.dyn_ref::<MouseEvent>()?;
            page_point(mouse.page_x(), mouse.page_y())
        }
        PointerSource::Touch => {
            let touch_event = event.dyn_ref::<TouchEvent>()?;
            let active = touch_event
                .touches()
                .get(0)
                .map(|touch| (touch.page_x(), touch.page_y()));
            let changed = touch_event
                .changed_touches()
                .get(0)
                .map(|touch| (touch.page_x(), touch.page_y()));
            touch_position(active, changed)?
        }
    };
    Some(PointerEvent::from_event_type(event_type, page_position))
}

/// Picks the page position of a touch event from its first active touch.
///
/// Touch release events carry no active touches, so the first changed touch
/// is used instead.
fn touch_position(active: Option<(i32, i32)>, changed: Option<(i32, i32)>) -> Option<Point> {
    active
        .or(changed)
        .map(|(x, y)| page_point(x, y))
}

fn page_point(x: i32, y: i32) -> Point {
    Point::new(x as f32, y as f32)
}

fn js_error(operation: &'static str, value: JsValue) -> HostError {
    let message = value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value));
    HostError::Platform { operation, message }
}

//! Element-level drag behaviour.
//!
//! [`DragDirective`] is the glue a host framework calls from its element
//! lifecycle: bind on mount and update, release on unmount. Every drag update
//! is written back to the element as `top`/`left` inline styles.

use crate::context::{ContextRegistry, InteractionContext};
use crate::style_host::StyleHost;
use dragkit_foundation::{DragMovement, TrackerOptions};
use dragkit_ui_graphics::Px;
use std::rc::Rc;

/// Configuration for a [`DragDirective`].
#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveSettings {
    /// Name the host framework registers the directive under.
    pub name: String,
    /// Element attribute carrying the interaction context id.
    pub id_attribute: String,
    pub tracker: TrackerOptions,
}

impl Default for DirectiveSettings {
    fn default() -> Self {
        Self {
            name: "drag".into(),
            id_attribute: "data-deid".into(),
            tracker: TrackerOptions::default(),
        }
    }
}

impl DirectiveSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_id_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.id_attribute = attribute.into();
        self
    }

    pub fn with_tracker_options(mut self, options: TrackerOptions) -> Self {
        self.tracker = options;
        self
    }
}

pub struct DragDirective<H: StyleHost> {
    settings: DirectiveSettings,
    registry: ContextRegistry<H>,
}

impl<H: StyleHost> DragDirective<H> {
    /// Creates the directive and its context registry.
    pub fn install(host: Rc<H>, settings: DirectiveSettings) -> Self {
        let style_host = Rc::downgrade(&host);
        let registry = ContextRegistry::new(host, settings.id_attribute.clone(), settings.tracker)
            .with_initializer(move |context: &InteractionContext<H>| {
                let host = style_host.clone();
                context.tracker().on_dragging(move |element, movement| {
                    if let Some(host) = host.upgrade() {
                        apply_position(host.as_ref(), element, movement);
                    }
                });
            });
        log::debug!("installed directive v-{}", settings.name);
        Self { settings, registry }
    }

    pub fn name(&self) -> &str {
        &self.settings.name
    }

    pub fn settings(&self) -> &DirectiveSettings {
        &self.settings
    }

    pub fn registry(&self) -> &ContextRegistry<H> {
        &self.registry
    }

    pub fn mounted(&mut self, element: &H::Element) {
        self.registry.upsert_by_element(element).tracker().bind(element);
    }

    pub fn updated(&mut self, element: &H::Element) {
        self.registry.upsert_by_element(element).tracker().bind(element);
    }

    pub fn before_unmount(&mut self, element: &H::Element) {
        self.registry.release_by_element(element);
    }

    /// Releases every element still attached. Also runs on drop.
    pub fn dispose(&mut self) {
        if !self.registry.is_empty() {
            log::debug!(
                "disposing directive v-{} with {} live contexts",
                self.settings.name,
                self.registry.len()
            );
        }
        self.registry.dispose();
    }
}

impl<H: StyleHost> Drop for DragDirective<H> {
    fn drop(&mut self) {
        self.registry.dispose();
    }
}

fn apply_position<H: StyleHost>(host: &H, element: &H::Element, movement: &DragMovement) {
    let properties = [("top", Px(movement.offset_y)), ("left", Px(movement.offset_x))];
    for (property, value) in properties {
        if let Err(err) = host.set_style(element, property, &value.to_string()) {
            log::error!("failed to set {property} on {:?}: {err}", element);
        }
    }
}

//! Per-element interaction contexts.
//!
//! Each element driven by a directive gets one [`InteractionContext`] holding
//! its stable id and its [`PointerTracker`]. The id is written to an element
//! attribute so later lifecycle callbacks for the same element resolve the
//! same context.

use crate::style_host::StyleHost;
use dragkit_foundation::{PointerTracker, TrackerOptions};
use indexmap::IndexMap;
use std::fmt;
use std::rc::Rc;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(String);

impl ContextId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub struct ContextParams<E> {
    pub element: E,
    /// Generated when absent.
    pub id: Option<ContextId>,
}

pub struct InteractionContext<H: StyleHost> {
    id: ContextId,
    element: H::Element,
    tracker: PointerTracker<H>,
}

impl<H: StyleHost> InteractionContext<H> {
    pub fn new(params: ContextParams<H::Element>, tracker: PointerTracker<H>) -> Self {
        Self {
            id: params.id.unwrap_or_else(ContextId::generate),
            element: params.element,
            tracker,
        }
    }

    pub fn id(&self) -> &ContextId {
        &self.id
    }

    pub fn element(&self) -> &H::Element {
        &self.element
    }

    pub fn tracker(&self) -> &PointerTracker<H> {
        &self.tracker
    }
}

type ContextInitializer<H> = Box<dyn Fn(&InteractionContext<H>)>;

/// Owns the contexts of every element a directive is attached to.
///
/// Entries are removed on release, so elements that come and go do not
/// accumulate stale contexts.
pub struct ContextRegistry<H: StyleHost> {
    host: Rc<H>,
    id_attribute: String,
    tracker_options: TrackerOptions,
    initializer: Option<ContextInitializer<H>>,
    contexts: IndexMap<ContextId, InteractionContext<H>>,
}

impl<H: StyleHost> ContextRegistry<H> {
    pub fn new(host: Rc<H>, id_attribute: impl Into<String>, tracker_options: TrackerOptions) -> Self {
        Self {
            host,
            id_attribute: id_attribute.into(),
            tracker_options,
            initializer: None,
            contexts: IndexMap::new(),
        }
    }

    /// Runs `initializer` on every context right after it is created.
    pub fn with_initializer(
        mut self,
        initializer: impl Fn(&InteractionContext<H>) + 'static,
    ) -> Self {
        self.initializer = Some(Box::new(initializer));
        self
    }

    pub fn id_attribute(&self) -> &str {
        &self.id_attribute
    }

    pub fn get(&self, id: &ContextId) -> Option<&InteractionContext<H>> {
        self.contexts.get(id)
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InteractionContext<H>> {
        self.contexts.values()
    }

    /// Returns the context for `element`, creating and registering it on
    /// first use.
    ///
    /// An id attribute that names another element's context (for example one
    /// copied along with cloned markup) is ignored and replaced by a fresh id.
    pub fn upsert_by_element(&mut self, element: &H::Element) -> &InteractionContext<H> {
        let existing = self
            .host
            .attribute(element, &self.id_attribute)
            .map(ContextId::new);
        let owned_by_element = existing
            .as_ref()
            .and_then(|id| self.contexts.get(id))
            .map(|context| context.element() == element);
        match (existing, owned_by_element) {
            (Some(id), Some(true)) => &self.contexts[&id],
            (Some(id), Some(false)) => {
                log::debug!("context id {id} belongs to another element; assigning a new one");
                self.create_by_element(element, None)
            }
            (existing, _) => self.create_by_element(element, existing),
        }
    }

    /// Releases the tracker of `element`'s context and drops the entry.
    pub fn release_by_element(&mut self, element: &H::Element) {
        let id = self.upsert_by_element(element).id().clone();
        if let Some(context) = self.contexts.shift_remove(&id) {
            debug_assert!(context.element() == element);
            context.tracker().release();
            log::debug!("released interaction context {id}");
        }
    }

    /// Releases every context.
    pub fn dispose(&mut self) {
        for (_, context) in self.contexts.drain(..) {
            context.tracker().release();
        }
    }

    fn create_by_element(
        &mut self,
        element: &H::Element,
        id: Option<ContextId>,
    ) -> &InteractionContext<H> {
        let tracker = PointerTracker::with_options(self.host.clone(), self.tracker_options);
        let context = InteractionContext::new(
            ContextParams {
                element: element.clone(),
                id,
            },
            tracker,
        );
        if let Err(err) = self
            .host
            .set_attribute(element, &self.id_attribute, context.id().as_str())
        {
            log::error!(
                "failed to tag {:?} with context id {}: {err}",
                element,
                context.id()
            );
        }
        if let Some(initializer) = &self.initializer {
            initializer(&context);
        }
        log::debug!("created interaction context {} for {:?}", context.id(), element);

        let id = context.id().clone();
        self.contexts.entry(id).or_insert(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = ContextId::generate();
        let b = ContextId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
    }

    #[test]
    fn context_id_displays_raw_value() {
        assert_eq!(ContextId::new("abc").to_string(), "abc");
    }
}

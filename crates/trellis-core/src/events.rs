//! Namespaced event dispatch.
//!
//! One process-wide table maps `(element, event name)` to handler lists.
//! Names carry a component namespace (`activate.trellis.scrollspy`) so a
//! component can deregister its whole group on disposal, mirroring how the
//! attached behaviors are scoped to the element they were constructed on.

use std::collections::HashMap;
use std::fmt;

use crate::dom::NodeId;

/// A namespaced event name, e.g. `activate.trellis.scrollspy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventName {
    base: &'static str,
    component: &'static str,
}

impl EventName {
    pub const fn new(base: &'static str, component: &'static str) -> Self {
        Self { base, component }
    }

    pub fn base(&self) -> &'static str {
        self.base
    }

    pub fn component(&self) -> &'static str {
        self.component
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.trellis.{}", self.base, self.component)
    }
}

/// A delivered notification. Handlers may veto the default action of
/// cancelable events via [`Event::prevent_default`].
#[derive(Debug, Clone)]
pub struct Event {
    pub name: EventName,
    pub target: NodeId,
    /// Contextual payload: the link being activated, the tab being left, ...
    pub related_target: Option<NodeId>,
    default_prevented: bool,
}

impl Event {
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

pub type Handler = Box<dyn FnMut(&mut Event)>;

/// Dispatch table keyed by `(element, namespaced name)`.
#[derive(Default)]
pub struct EventBus {
    handlers: HashMap<(NodeId, EventName), Vec<Handler>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, element: NodeId, name: EventName, handler: Handler) {
        self.handlers
            .entry((element, name))
            .or_default()
            .push(handler);
    }

    /// Remove every handler registered on `element` under the given
    /// component namespace.
    pub fn off(&mut self, element: NodeId, component: &'static str) {
        self.handlers
            .retain(|(el, name), _| !(*el == element && name.component() == component));
    }

    /// Synchronously deliver an event to the element's handlers.
    pub fn trigger(
        &mut self,
        element: NodeId,
        name: EventName,
        related_target: Option<NodeId>,
    ) -> Event {
        let mut event = Event {
            name,
            target: element,
            related_target,
            default_prevented: false,
        };
        if let Some(handlers) = self.handlers.get_mut(&(element, name)) {
            for handler in handlers.iter_mut() {
                handler(&mut event);
            }
        }
        event
    }

    pub fn handler_count(&self, element: NodeId) -> usize {
        self.handlers
            .iter()
            .filter(|((el, _), _)| *el == element)
            .map(|(_, handlers)| handlers.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    const TEST_EVENT: EventName = EventName::new("ping", "test");
    const OTHER_EVENT: EventName = EventName::new("ping", "other");

    #[test]
    fn test_trigger_reaches_registered_handler() {
        let mut bus = EventBus::new();
        let el = NodeId(0);
        let hits = Rc::new(Cell::new(0));
        let hits_in = Rc::clone(&hits);
        bus.on(el, TEST_EVENT, Box::new(move |_| hits_in.set(hits_in.get() + 1)));

        bus.trigger(el, TEST_EVENT, None);
        bus.trigger(NodeId(1), TEST_EVENT, None);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_off_removes_whole_namespace() {
        let mut bus = EventBus::new();
        let el = NodeId(0);
        let hits = Rc::new(Cell::new(0));
        for name in [TEST_EVENT, OTHER_EVENT] {
            let hits_in = Rc::clone(&hits);
            bus.on(el, name, Box::new(move |_| hits_in.set(hits_in.get() + 1)));
        }

        bus.off(el, "test");
        bus.trigger(el, TEST_EVENT, None);
        bus.trigger(el, OTHER_EVENT, None);
        assert_eq!(hits.get(), 1);
        assert_eq!(bus.handler_count(el), 1);
    }

    #[test]
    fn test_prevent_default_is_reported() {
        let mut bus = EventBus::new();
        let el = NodeId(0);
        bus.on(el, TEST_EVENT, Box::new(|event| event.prevent_default()));

        assert!(bus.trigger(el, TEST_EVENT, None).default_prevented());
        assert!(!bus.trigger(el, OTHER_EVENT, None).default_prevented());
    }

    #[test]
    fn test_event_name_display() {
        assert_eq!(TEST_EVENT.to_string(), "ping.trellis.test");
    }
}

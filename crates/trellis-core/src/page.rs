//! Page runtime: document, event bus, platform and component registries.
//!
//! A [`Page`] is the cooperative single-threaded host the components live
//! in. It owns the element tree and the dispatch table, auto-instantiates
//! components from declarative markers on [`Page::load`], and routes
//! scroll positions and input events to the right instance.

use tracing::debug;

use crate::dom::{Document, NodeId};
use crate::error::Result;
use crate::events::{EventBus, EventName, Handler};
use crate::registry::Registry;
use crate::scrollspy::{ScrollSpy, ScrollSpyConfig};
use crate::swipe::{GestureEvent, Platform, Swipe, SwipeConfig};
use crate::tab::{ArrowKey, Tab};

pub struct Page {
    doc: Document,
    bus: EventBus,
    platform: Platform,
    spies: Registry<ScrollSpy>,
    tabs: Registry<Tab>,
    swipes: Registry<Swipe>,
}

impl Page {
    pub fn new(doc: Document) -> Self {
        Self::with_platform(doc, Platform::desktop())
    }

    pub fn with_platform(doc: Document, platform: Platform) -> Self {
        Self {
            doc,
            bus: EventBus::new(),
            platform,
            spies: Registry::new(),
            tabs: Registry::new(),
            swipes: Registry::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Subscribe to a component notification on an element.
    pub fn on(&mut self, element: NodeId, name: EventName, handler: Handler) {
        self.bus.on(element, name, handler);
    }

    /// Scan the document for declarative activation markers and construct
    /// the corresponding components: `data-tr-spy="scroll"` containers get
    /// a scrollspy, `data-tr-toggle="tab"` triggers get a tab.
    pub fn load(&mut self) -> Result<()> {
        for element in self.doc.descendants(self.doc.root()) {
            match self.doc.data_attr(element, "spy") {
                Some("scroll") if !self.spies.contains(element) => {
                    let spy = ScrollSpy::new(&self.doc, element, ScrollSpyConfig::default())?;
                    self.spies.insert(element, spy);
                }
                _ => {}
            }
            if self.doc.data_attr(element, "toggle") == Some("tab")
                && !self.tabs.contains(element)
            {
                let tab = Tab::new(&mut self.doc, element)?;
                self.tabs.insert(element, tab);
            }
        }
        debug!(
            spies = self.spies.len(),
            tabs = self.tabs.len(),
            "page loaded"
        );
        Ok(())
    }

    // ---- scrollspy --------------------------------------------------------

    /// Attach a scrollspy to `container` unless one is already live there.
    pub fn attach_spy(&mut self, container: NodeId, config: ScrollSpyConfig) -> Result<()> {
        if !self.spies.contains(container) {
            let spy = ScrollSpy::new(&self.doc, container, config)?;
            self.spies.insert(container, spy);
        }
        Ok(())
    }

    pub fn spy(&self, container: NodeId) -> Option<&ScrollSpy> {
        self.spies.get(container)
    }

    pub fn refresh_spy(&mut self, container: NodeId) {
        if let Some(spy) = self.spies.get_mut(container) {
            spy.refresh(&self.doc);
            spy.update(&mut self.doc, &mut self.bus);
        }
    }

    pub fn dispose_spy(&mut self, container: NodeId) {
        if let Some(mut spy) = self.spies.remove(container) {
            spy.dispose(&mut self.bus);
        }
    }

    /// Scroll a container and let its spy process the visibility batch.
    pub fn scroll_to(&mut self, container: NodeId, scroll_top: i64) {
        self.doc.set_scroll_top(container, scroll_top);
        if let Some(spy) = self.spies.get_mut(container) {
            spy.update(&mut self.doc, &mut self.bus);
        }
    }

    // ---- swipe ------------------------------------------------------------

    pub fn attach_swipe(&mut self, element: NodeId, config: SwipeConfig) {
        if !self.swipes.contains(element) {
            let swipe = Swipe::new(element, &self.platform, config);
            self.swipes.insert(element, swipe);
        }
    }

    pub fn swipe(&self, element: NodeId) -> Option<&Swipe> {
        self.swipes.get(element)
    }

    /// Route a raw input event to the element's swipe detector.
    pub fn gesture(&mut self, element: NodeId, event: GestureEvent) {
        if let Some(swipe) = self.swipes.get_mut(element) {
            swipe.handle(event);
        }
    }

    pub fn dispose_swipe(&mut self, element: NodeId) {
        if let Some(mut swipe) = self.swipes.remove(element) {
            swipe.dispose();
        }
    }

    // ---- tab --------------------------------------------------------------

    pub fn attach_tab(&mut self, trigger: NodeId) -> Result<()> {
        if !self.tabs.contains(trigger) {
            let tab = Tab::new(&mut self.doc, trigger)?;
            self.tabs.insert(trigger, tab);
        }
        Ok(())
    }

    pub fn tab(&self, trigger: NodeId) -> Option<&Tab> {
        self.tabs.get(trigger)
    }

    pub fn show_tab(&mut self, trigger: NodeId) {
        if let Some(tab) = self.tabs.get(trigger) {
            tab.show(&mut self.doc, &mut self.bus);
        }
    }

    pub fn tab_key(&mut self, trigger: NodeId, key: ArrowKey) {
        if let Some(tab) = self.tabs.get(trigger) {
            tab.key(&mut self.doc, &mut self.bus, key);
        }
    }

    pub fn dispose_tab(&mut self, trigger: NodeId) {
        if let Some(tab) = self.tabs.remove(trigger) {
            tab.dispose(&mut self.bus);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::dom::{ElementDef, PageDef};
    use crate::scrollspy::EVENT_ACTIVATE;
    use crate::swipe::PointerKind;

    fn spy_page() -> PageDef {
        PageDef {
            body: vec![
                ElementDef::new("nav").id("navigation").child(
                    ElementDef::new("ul")
                        .class("nav")
                        .child(link("one-link", "#one"))
                        .child(link("two-link", "#two")),
                ),
                ElementDef::new("div")
                    .id("content")
                    .height(150)
                    .attr("data-tr-spy", "scroll")
                    .attr("data-tr-target", "#navigation")
                    .child(ElementDef::new("div").id("one").height(100))
                    .child(ElementDef::new("div").id("two").height(300)),
            ],
        }
    }

    fn link(id: &str, href: &str) -> ElementDef {
        ElementDef::new("li").class("nav-item").child(
            ElementDef::new("a")
                .id(id)
                .class("nav-link")
                .attr("href", href),
        )
    }

    #[test]
    fn test_load_auto_instantiates_marked_containers() {
        let mut page = Page::new(spy_page().build());
        page.load().unwrap();

        let content = page.document().element_by_id("content").unwrap();
        assert!(page.spy(content).is_some());
    }

    #[test]
    fn test_scroll_to_drives_activation_events() {
        let mut page = Page::new(spy_page().build());
        page.load().unwrap();
        let content = page.document().element_by_id("content").unwrap();

        let activated: Rc<RefCell<Vec<NodeId>>> = Rc::default();
        let log = Rc::clone(&activated);
        page.on(
            content,
            EVENT_ACTIVATE,
            Box::new(move |event| log.borrow_mut().push(event.related_target.unwrap())),
        );

        page.scroll_to(content, 0);
        page.scroll_to(content, 101);

        let one = page.document().element_by_id("one-link").unwrap();
        let two = page.document().element_by_id("two-link").unwrap();
        assert_eq!(*activated.borrow(), vec![one, two]);
    }

    #[test]
    fn test_spy_instance_is_stable_until_disposed() {
        let mut page = Page::new(spy_page().build());
        page.load().unwrap();
        let content = page.document().element_by_id("content").unwrap();

        let first = page.spy(content).map(|spy| spy.target_links().to_vec());
        // A second attach is a no-op that keeps the live instance.
        page.attach_spy(content, ScrollSpyConfig::default().target("#navigation"))
            .unwrap();
        let second = page.spy(content).map(|spy| spy.target_links().to_vec());
        assert_eq!(first, second);

        page.dispose_spy(content);
        assert!(page.spy(content).is_none());
    }

    #[test]
    fn test_gesture_routes_to_attached_swipe() {
        let mut page = Page::with_platform(spy_page().build(), Platform::pointer());
        let content = page.document().element_by_id("content").unwrap();

        let lefts = Rc::new(RefCell::new(0));
        let lefts_in = Rc::clone(&lefts);
        page.attach_swipe(
            content,
            SwipeConfig::default().on_left(move || *lefts_in.borrow_mut() += 1),
        );

        page.gesture(
            content,
            GestureEvent::PointerDown {
                x: 300.0,
                kind: PointerKind::Touch,
            },
        );
        page.gesture(
            content,
            GestureEvent::PointerUp {
                x: 0.0,
                kind: PointerKind::Touch,
            },
        );
        assert_eq!(*lefts.borrow(), 1);

        page.dispose_swipe(content);
        assert!(page.swipe(content).is_none());
    }
}

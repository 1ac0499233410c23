//! Tab switching.
//!
//! A [`Tab`] is attached to a trigger element inside a `nav` or
//! `list-group` container. `show()` moves the active designation (and the
//! matching pane's) from the previously selected trigger to this one,
//! bracketed by cancelable `hide`/`show` notifications and followed by
//! `hidden`/`shown`. Arrow keys move the selection between sibling
//! triggers with wrap-around.

use tracing::debug;

use crate::dom::{Document, NodeId, Selector};
use crate::error::{Error, Result};
use crate::events::{EventBus, EventName};

pub(crate) const NAME: &str = "tab";

/// Cancelable, fired on the outgoing trigger before any mutation.
pub const EVENT_HIDE: EventName = EventName::new("hide", NAME);
/// Cancelable, fired on the incoming trigger before any mutation.
pub const EVENT_SHOW: EventName = EventName::new("show", NAME);
/// Fired on the outgoing trigger once the switch is complete.
pub const EVENT_HIDDEN: EventName = EventName::new("hidden", NAME);
/// Fired on the incoming trigger once the switch is complete.
pub const EVENT_SHOWN: EventName = EventName::new("shown", NAME);

const CLASS_ACTIVE: &str = "active";
const CLASS_DROPDOWN_ITEM: &str = "dropdown-item";

/// Keyboard navigation input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    Left,
    Right,
    Up,
    Down,
}

fn class(name: &str) -> Selector {
    Selector::Class(name.to_string())
}

/// Tab switcher bound to one trigger element.
#[derive(Debug)]
pub struct Tab {
    element: NodeId,
    parent: NodeId,
}

impl Tab {
    /// Attach to a trigger. The trigger must live inside a `nav` or
    /// `list-group` container; stamps the tablist roles and initial aria
    /// state on the container's triggers and panes.
    pub fn new(doc: &mut Document, element: NodeId) -> Result<Self> {
        let parent = doc
            .closest(element, &class("nav"))
            .or_else(|| doc.closest(element, &class("list-group")))
            .filter(|&parent| parent != element)
            .ok_or(Error::OrphanTab)?;
        let tab = Self { element, parent };
        tab.set_initial_attributes(doc);
        Ok(tab)
    }

    pub fn element(&self) -> NodeId {
        self.element
    }

    pub fn parent(&self) -> NodeId {
        self.parent
    }

    /// Make this trigger the selected tab. No-op when already active;
    /// aborted without mutation when a listener prevents either the `hide`
    /// or the `show` notification.
    pub fn show(&self, doc: &mut Document, bus: &mut EventBus) {
        if doc.has_class(self.element, CLASS_ACTIVE) {
            return;
        }

        let active = self.active_trigger(doc);
        let hide_prevented = active
            .map(|active| {
                bus.trigger(active, EVENT_HIDE, Some(self.element))
                    .default_prevented()
            })
            .unwrap_or(false);
        let show_prevented = bus
            .trigger(self.element, EVENT_SHOW, active)
            .default_prevented();
        if hide_prevented || show_prevented {
            return;
        }

        if let Some(active) = active {
            self.deactivate(doc, active);
        }
        self.activate(doc, self.element);
        debug!(trigger = ?doc.node(self.element).id(), "tab shown");

        if let Some(active) = active {
            bus.trigger(active, EVENT_HIDDEN, Some(self.element));
        }
        bus.trigger(self.element, EVENT_SHOWN, active);
    }

    /// Move the selection to the neighbouring trigger, wrapping around.
    pub fn key(&self, doc: &mut Document, bus: &mut EventBus, key: ArrowKey) {
        let triggers = self.triggers(doc);
        if triggers.is_empty() {
            return;
        }
        let current = self
            .active_trigger(doc)
            .and_then(|active| triggers.iter().position(|&t| t == active))
            .unwrap_or(0);
        let next = match key {
            ArrowKey::Right | ArrowKey::Down => (current + 1) % triggers.len(),
            ArrowKey::Left | ArrowKey::Up => (current + triggers.len() - 1) % triggers.len(),
        };
        Tab {
            element: triggers[next],
            parent: self.parent,
        }
        .show(doc, bus);
    }

    /// Every trigger the parent container holds, in document order.
    pub fn triggers(&self, doc: &Document) -> Vec<NodeId> {
        doc.descendants(self.parent)
            .into_iter()
            .filter(|&id| {
                let node = doc.node(id);
                (node.has_class("nav-link")
                    || node.has_class("list-group-item")
                    || node.attr("role") == Some("tab"))
                    && !node.has_class("dropdown-toggle")
            })
            .collect()
    }

    fn active_trigger(&self, doc: &Document) -> Option<NodeId> {
        self.triggers(doc)
            .into_iter()
            .find(|&id| doc.has_class(id, CLASS_ACTIVE))
    }

    fn activate(&self, doc: &mut Document, trigger: NodeId) {
        doc.add_class(trigger, CLASS_ACTIVE);
        doc.set_attr(trigger, "aria-selected", "true");
        doc.remove_attr(trigger, "tabindex");
        if let Some(pane) = self.pane_for(doc, trigger) {
            doc.add_class(pane, CLASS_ACTIVE);
        }
        self.toggle_dropdown(doc, trigger, true);
    }

    fn deactivate(&self, doc: &mut Document, trigger: NodeId) {
        doc.remove_class(trigger, CLASS_ACTIVE);
        doc.set_attr(trigger, "aria-selected", "false");
        doc.set_attr(trigger, "tabindex", "-1");
        if let Some(pane) = self.pane_for(doc, trigger) {
            doc.remove_class(pane, CLASS_ACTIVE);
        }
        self.toggle_dropdown(doc, trigger, false);
    }

    /// Pane resolution order: explicit `data-tr-target`, then the href
    /// fragment. Triggers without a pane still switch classes on
    /// themselves.
    fn pane_for(&self, doc: &Document, trigger: NodeId) -> Option<NodeId> {
        let id = doc
            .data_attr(trigger, "target")
            .and_then(|sel| sel.strip_prefix('#'))
            .or_else(|| doc.node(trigger).fragment())?;
        doc.element_by_id(id)
    }

    fn toggle_dropdown(&self, doc: &mut Document, trigger: NodeId, open: bool) {
        if !doc.has_class(trigger, CLASS_DROPDOWN_ITEM) {
            return;
        }
        if let Some(dropdown) = doc.closest(trigger, &class("dropdown")) {
            if let Some(toggle) = doc.find_one(dropdown, &class("dropdown-toggle")) {
                if open {
                    doc.add_class(toggle, CLASS_ACTIVE);
                } else {
                    doc.remove_class(toggle, CLASS_ACTIVE);
                }
            }
        }
    }

    fn set_initial_attributes(&self, doc: &mut Document) {
        doc.set_attr(self.parent, "role", "tablist");
        for trigger in self.triggers(doc) {
            doc.set_attr(trigger, "role", "tab");
            let selected = doc.has_class(trigger, CLASS_ACTIVE);
            doc.set_attr(trigger, "aria-selected", if selected { "true" } else { "false" });
            if !selected {
                doc.set_attr(trigger, "tabindex", "-1");
            }
            if let Some(pane) = self.pane_for(doc, trigger) {
                doc.set_attr(pane, "role", "tabpanel");
            }
        }
    }

    /// Drop this tab's event subscriptions.
    pub fn dispose(&self, bus: &mut EventBus) {
        bus.off(self.element, NAME);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::dom::{ElementDef, PageDef};

    fn tab_page() -> (Document, [NodeId; 2]) {
        let page = PageDef {
            body: vec![
                ElementDef::new("ul").id("tabs").class("nav").child(
                    ElementDef::new("li").class("nav-item").child(
                        ElementDef::new("a")
                            .id("home-tab")
                            .class("nav-link")
                            .class("active")
                            .attr("href", "#home"),
                    ),
                )
                .child(
                    ElementDef::new("li").class("nav-item").child(
                        ElementDef::new("a")
                            .id("profile-tab")
                            .class("nav-link")
                            .attr("href", "#profile"),
                    ),
                ),
                ElementDef::new("div")
                    .child(ElementDef::new("div").id("home").class("active"))
                    .child(ElementDef::new("div").id("profile")),
            ],
        };
        let doc = page.build();
        let triggers = ["home-tab", "profile-tab"].map(|id| doc.element_by_id(id).unwrap());
        (doc, triggers)
    }

    #[test]
    fn test_show_switches_trigger_and_pane() {
        let (mut doc, [home, profile]) = tab_page();
        let mut bus = EventBus::new();
        let tab = Tab::new(&mut doc, profile).unwrap();

        tab.show(&mut doc, &mut bus);

        assert!(doc.has_class(profile, "active"));
        assert!(!doc.has_class(home, "active"));
        let profile_pane = doc.element_by_id("profile").unwrap();
        let home_pane = doc.element_by_id("home").unwrap();
        assert!(doc.has_class(profile_pane, "active"));
        assert!(!doc.has_class(home_pane, "active"));
        assert_eq!(doc.attr(profile, "aria-selected"), Some("true"));
        assert_eq!(doc.attr(home, "aria-selected"), Some("false"));
        assert_eq!(doc.attr(home, "tabindex"), Some("-1"));
    }

    #[test]
    fn test_event_order_and_payloads() {
        let (mut doc, [home, profile]) = tab_page();
        let mut bus = EventBus::new();
        let tab = Tab::new(&mut doc, profile).unwrap();

        let log: Rc<RefCell<Vec<(String, Option<NodeId>)>>> = Rc::default();
        for (el, name) in [
            (home, EVENT_HIDE),
            (profile, EVENT_SHOW),
            (home, EVENT_HIDDEN),
            (profile, EVENT_SHOWN),
        ] {
            let log = Rc::clone(&log);
            bus.on(
                el,
                name,
                Box::new(move |event| {
                    log.borrow_mut()
                        .push((event.name.base().to_string(), event.related_target));
                }),
            );
        }

        tab.show(&mut doc, &mut bus);

        assert_eq!(
            *log.borrow(),
            vec![
                ("hide".to_string(), Some(profile)),
                ("show".to_string(), Some(home)),
                ("hidden".to_string(), Some(profile)),
                ("shown".to_string(), Some(home)),
            ]
        );
    }

    #[test]
    fn test_prevented_show_aborts_without_mutation() {
        let (mut doc, [home, profile]) = tab_page();
        let mut bus = EventBus::new();
        let tab = Tab::new(&mut doc, profile).unwrap();

        bus.on(profile, EVENT_SHOW, Box::new(|event| event.prevent_default()));
        let shown = Rc::new(RefCell::new(false));
        let shown_in = Rc::clone(&shown);
        bus.on(
            profile,
            EVENT_SHOWN,
            Box::new(move |_| *shown_in.borrow_mut() = true),
        );

        tab.show(&mut doc, &mut bus);

        assert!(doc.has_class(home, "active"));
        assert!(!doc.has_class(profile, "active"));
        assert!(!*shown.borrow());
    }

    #[test]
    fn test_prevented_hide_aborts_without_mutation() {
        let (mut doc, [home, profile]) = tab_page();
        let mut bus = EventBus::new();
        let tab = Tab::new(&mut doc, profile).unwrap();

        bus.on(home, EVENT_HIDE, Box::new(|event| event.prevent_default()));
        tab.show(&mut doc, &mut bus);

        assert!(doc.has_class(home, "active"));
        assert!(!doc.has_class(profile, "active"));
    }

    #[test]
    fn test_show_on_active_tab_fires_nothing() {
        let (mut doc, [home, _]) = tab_page();
        let mut bus = EventBus::new();
        let tab = Tab::new(&mut doc, home).unwrap();

        let fired = Rc::new(RefCell::new(false));
        let fired_in = Rc::clone(&fired);
        bus.on(
            home,
            EVENT_SHOW,
            Box::new(move |_| *fired_in.borrow_mut() = true),
        );

        tab.show(&mut doc, &mut bus);
        assert!(!*fired.borrow());
    }

    #[test]
    fn test_arrow_keys_wrap_between_triggers() {
        let (mut doc, [home, profile]) = tab_page();
        let mut bus = EventBus::new();
        let tab = Tab::new(&mut doc, home).unwrap();

        tab.key(&mut doc, &mut bus, ArrowKey::Right);
        assert!(doc.has_class(profile, "active"));

        tab.key(&mut doc, &mut bus, ArrowKey::Right);
        assert!(doc.has_class(home, "active"));

        tab.key(&mut doc, &mut bus, ArrowKey::Left);
        assert!(doc.has_class(profile, "active"));
    }

    #[test]
    fn test_orphan_trigger_is_rejected() {
        let page = PageDef {
            body: vec![ElementDef::new("div").child(
                ElementDef::new("a").id("loner").class("nav-link"),
            )],
        };
        let mut doc = page.build();
        let loner = doc.element_by_id("loner").unwrap();
        assert!(matches!(Tab::new(&mut doc, loner), Err(Error::OrphanTab)));
    }

    #[test]
    fn test_initial_attributes_stamped() {
        let (mut doc, [home, profile]) = tab_page();
        Tab::new(&mut doc, profile).unwrap();

        let tabs = doc.element_by_id("tabs").unwrap();
        assert_eq!(doc.attr(tabs, "role"), Some("tablist"));
        assert_eq!(doc.attr(home, "role"), Some("tab"));
        assert_eq!(doc.attr(home, "aria-selected"), Some("true"));
        assert_eq!(doc.attr(profile, "aria-selected"), Some("false"));
        assert_eq!(doc.attr(profile, "tabindex"), Some("-1"));
        let pane = doc.element_by_id("home").unwrap();
        assert_eq!(doc.attr(pane, "role"), Some("tabpanel"));
    }

    #[test]
    fn test_dropdown_item_toggles_dropdown_toggle() {
        let page = PageDef {
            body: vec![
                ElementDef::new("ul").class("nav").child(
                    ElementDef::new("li").class("nav-item").child(
                        ElementDef::new("a")
                            .id("plain-tab")
                            .class("nav-link")
                            .class("active")
                            .attr("href", "#plain"),
                    ),
                )
                .child(
                    ElementDef::new("li").class("dropdown").child(
                        ElementDef::new("a").id("toggle").class("dropdown-toggle"),
                    )
                    .child(
                        ElementDef::new("a")
                            .id("drop-tab")
                            .class("dropdown-item")
                            .class("nav-link")
                            .attr("href", "#dropped"),
                    ),
                ),
                ElementDef::new("div")
                    .child(ElementDef::new("div").id("plain").class("active"))
                    .child(ElementDef::new("div").id("dropped")),
            ],
        };
        let mut doc = page.build();
        let mut bus = EventBus::new();
        let drop_tab = doc.element_by_id("drop-tab").unwrap();
        let toggle = doc.element_by_id("toggle").unwrap();
        let tab = Tab::new(&mut doc, drop_tab).unwrap();

        tab.show(&mut doc, &mut bus);
        assert!(doc.has_class(toggle, "active"));

        let plain = doc.element_by_id("plain-tab").unwrap();
        Tab { element: plain, parent: tab.parent() }.show(&mut doc, &mut bus);
        assert!(!doc.has_class(toggle, "active"));
    }
}

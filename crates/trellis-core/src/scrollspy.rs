//! Scroll-position section tracking.
//!
//! A [`ScrollSpy`] observes the sections of a scrollable container and
//! keeps exactly one navigation link marked active, following the scroll
//! direction: scrolling down prefers the deepest newly visible section,
//! scrolling up the shallowest. Section visibility comes from the
//! [`IntersectionWatcher`]; class mutation and the `activate` notification
//! go through the document and the event bus.

use std::str::FromStr;

use tracing::debug;

use crate::dom::{Document, ElementRef, NodeId, Selector};
use crate::error::{Error, Result};
use crate::events::{EventBus, EventName};
use crate::observer::{IntersectionEntry, IntersectionWatcher, RootMargin};

pub(crate) const NAME: &str = "scrollspy";

/// Fired on the container each time a link becomes active; the link rides
/// along as the related target.
pub const EVENT_ACTIVATE: EventName = EventName::new("activate", NAME);

pub const CLASS_ACTIVE: &str = "active";

const CLASS_DROPDOWN_ITEM: &str = "dropdown-item";
const DEFAULT_ROOT_MARGIN: &str = "0px 0px -40%";

fn class(name: &str) -> Selector {
    Selector::Class(name.to_string())
}

/// Scrollspy configuration. Values left unset fall back to the container's
/// `data-tr-*` attributes, then to the defaults; `target` has no default
/// and is required.
#[derive(Debug, Clone, Default)]
pub struct ScrollSpyConfig {
    /// Root element holding the navigation links.
    pub target: Option<ElementRef>,
    /// Margin expression applied to the container's visible box.
    pub root_margin: Option<String>,
    /// Deprecated numeric alternative to `root_margin`; when set it wins
    /// and is translated to `"{offset}px 0px 0px"`.
    pub offset: Option<i64>,
}

impl ScrollSpyConfig {
    pub fn target(mut self, target: impl Into<ElementRef>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn root_margin(mut self, margin: &str) -> Self {
        self.root_margin = Some(margin.to_string());
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Merge in the container's data attributes (explicit values win) and
    /// validate. Malformed attribute values are construction failures.
    fn resolve(mut self, doc: &Document, element: NodeId) -> Result<(NodeId, RootMargin)> {
        if self.target.is_none() {
            self.target = doc.data_attr(element, "target").map(ElementRef::from);
        }
        if self.root_margin.is_none() {
            self.root_margin = doc.data_attr(element, "root-margin").map(str::to_string);
        }
        if self.offset.is_none() {
            if let Some(raw) = doc.data_attr(element, "offset") {
                let offset = i64::from_str(raw).map_err(|_| Error::InvalidConfig {
                    component: NAME,
                    option: "offset",
                    provided: "string".to_string(),
                    expected: "(number|null)",
                })?;
                self.offset = Some(offset);
            }
        }

        let target = self.target.ok_or(Error::MissingTarget)?;
        let target = doc.resolve(&target)?;

        let margin_expr = match self.offset {
            Some(offset) => format!("{offset}px 0px 0px"),
            None => self
                .root_margin
                .unwrap_or_else(|| DEFAULT_ROOT_MARGIN.to_string()),
        };
        Ok((target, margin_expr.parse()?))
    }
}

/// Active-section tracker attached to one scroll container.
#[derive(Debug)]
pub struct ScrollSpy {
    element: NodeId,
    target: NodeId,
    watcher: IntersectionWatcher,
    target_links: Vec<NodeId>,
    observable_sections: Vec<NodeId>,
    active_target: Option<NodeId>,
    previous_visible_entry_top: i64,
    previous_scroll_top: i64,
}

impl ScrollSpy {
    /// Build a tracker for `element` (the scroll container) and register
    /// its sections with the watcher. Fails fatally on malformed
    /// configuration or an unresolvable target root.
    pub fn new(doc: &Document, element: NodeId, config: ScrollSpyConfig) -> Result<Self> {
        let (target, margin) = config.resolve(doc, element)?;
        let mut spy = Self {
            element,
            target,
            watcher: IntersectionWatcher::new(element, margin),
            target_links: Vec::new(),
            observable_sections: Vec::new(),
            active_target: None,
            previous_visible_entry_top: 0,
            previous_scroll_top: 0,
        };
        spy.refresh(doc);
        Ok(spy)
    }

    pub fn element(&self) -> NodeId {
        self.element
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn target_links(&self) -> &[NodeId] {
        &self.target_links
    }

    pub fn observable_sections(&self) -> &[NodeId] {
        &self.observable_sections
    }

    pub fn active_target(&self) -> Option<NodeId> {
        self.active_target
    }

    /// Recompute tracked links and sections from the document and replace
    /// every watcher registration. Safe to call repeatedly; the link set is
    /// rebuilt wholesale, never patched.
    pub fn refresh(&mut self, doc: &Document) {
        self.target_links = doc
            .descendants(self.target)
            .into_iter()
            .filter(|&link| doc.node(link).fragment().is_some())
            .collect();

        // A link with no matching section in the container is dropped.
        self.observable_sections = self
            .target_links
            .iter()
            .filter_map(|&link| {
                let fragment = doc.node(link).fragment()?;
                doc.find_one(self.element, &Selector::Id(fragment.to_string()))
            })
            .collect();

        self.watcher.disconnect();
        for &section in &self.observable_sections {
            self.watcher.observe(section);
        }
        debug!(
            links = self.target_links.len(),
            sections = self.observable_sections.len(),
            "scrollspy refreshed"
        );
    }

    /// Sweep the watcher at the container's current scroll position and
    /// process the resulting visibility batch.
    pub fn update(&mut self, doc: &mut Document, bus: &mut EventBus) {
        let entries = self.watcher.sweep(doc);
        // Direction state advances per delivered batch, not per sweep.
        if !entries.is_empty() {
            self.process_entries(doc, bus, &entries);
        }
    }

    fn process_entries(
        &mut self,
        doc: &mut Document,
        bus: &mut EventBus,
        entries: &[IntersectionEntry],
    ) {
        let parent_scroll_top = doc.node(self.element).scroll_top();
        // Direction is classified once per batch so every entry compares
        // against the same previous position.
        let scrolls_down = parent_scroll_top >= self.previous_scroll_top;

        for entry in entries {
            if entry.is_intersecting {
                let further_down = entry.offset_top >= self.previous_visible_entry_top;
                if scrolls_down && further_down {
                    // Scrolling down: pick the larger offset.
                    self.activate(doc, bus, entry);
                } else if !scrolls_down && !further_down {
                    // Scrolling up: pick the smaller offset.
                    self.activate(doc, bus, entry);
                }
                continue;
            }

            if let Some(departed) = self.link_for(doc, entry.target) {
                if self.active_target == Some(departed) {
                    self.deactivate(doc, departed);
                }
            }
        }

        self.previous_scroll_top = parent_scroll_top;
    }

    fn activate(&mut self, doc: &mut Document, bus: &mut EventBus, entry: &IntersectionEntry) {
        self.previous_visible_entry_top = entry.offset_top;
        if let Some(link) = self.link_for(doc, entry.target) {
            self.process_target(doc, bus, link);
        }
    }

    fn link_for(&self, doc: &Document, section: NodeId) -> Option<NodeId> {
        let id = doc.node(section).id()?;
        self.target_links
            .iter()
            .copied()
            .find(|&link| doc.node(link).fragment() == Some(id))
    }

    fn process_target(&mut self, doc: &mut Document, bus: &mut EventBus, link: NodeId) {
        if self.active_target == Some(link) {
            return;
        }

        self.clear_active(doc, self.target);
        self.active_target = Some(link);
        doc.add_class(link, CLASS_ACTIVE);

        if doc.has_class(link, CLASS_DROPDOWN_ITEM) {
            // A dropdown item lights up its dropdown's toggle control.
            if let Some(dropdown) = doc.closest(link, &class("dropdown")) {
                if let Some(toggle) = doc.find_one(dropdown, &class("dropdown-toggle")) {
                    doc.add_class(toggle, CLASS_ACTIVE);
                }
            }
        } else {
            // With both list and nav markup, a "parent" link is the previous
            // sibling of any nav ancestor, or sits one level inside a
            // preceding nav item.
            let groups = doc.ancestors(link, &[class("nav"), class("list-group")]);
            for group in groups {
                if let Some(prev) =
                    doc.prev_matching(group, &[class("nav-link"), class("list-group-item")])
                {
                    doc.add_class(prev, CLASS_ACTIVE);
                }
                if let Some(prev_item) = doc.prev_matching(group, &[class("nav-item")]) {
                    for child in doc.children_matching(prev_item, &class("nav-link")) {
                        doc.add_class(child, CLASS_ACTIVE);
                    }
                }
            }
        }

        debug!(link = ?doc.node(link).id(), "scrollspy activated");
        bus.trigger(self.element, EVENT_ACTIVATE, Some(link));
    }

    fn deactivate(&mut self, doc: &mut Document, link: NodeId) {
        self.clear_active(doc, link);
        self.active_target = None;
    }

    /// Remove the active designation from every descendant of `scope`, and
    /// from `scope` itself unless it is the configured target root.
    fn clear_active(&self, doc: &mut Document, scope: NodeId) {
        if scope != self.target {
            doc.remove_class(scope, CLASS_ACTIVE);
        }
        for node in doc.find(scope, &class(CLASS_ACTIVE)) {
            doc.remove_class(node, CLASS_ACTIVE);
        }
    }

    /// Tear down observation and event subscriptions.
    pub fn dispose(&mut self, bus: &mut EventBus) {
        self.watcher.disconnect();
        bus.off(self.element, NAME);
    }
}

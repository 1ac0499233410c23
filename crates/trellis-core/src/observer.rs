//! Visibility notification for sections inside a scrolling root.
//!
//! [`IntersectionWatcher`] is the headless stand-in for a browser
//! intersection observer: sections are registered against a scroll
//! container, and every [`sweep`](IntersectionWatcher::sweep) recomputes
//! which of them overlap the margin-adjusted visible interval and reports
//! the ones whose state changed. Newly observed targets are always
//! reported on the first sweep, matching observer initial delivery.

use std::collections::HashMap;
use std::str::FromStr;

use crate::dom::{Document, NodeId};
use crate::error::{Error, Result};

/// A px or percentage length inside a margin expression. Percentages
/// resolve against the root's height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f64),
    Percent(f64),
}

impl Length {
    pub fn resolve(&self, reference: f64) -> f64 {
        match self {
            Length::Px(px) => *px,
            Length::Percent(pct) => reference * pct / 100.0,
        }
    }
}

impl FromStr for Length {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parse = |num: &str| {
            num.parse::<f64>()
                .map_err(|_| Error::MarginParse(s.to_string()))
        };
        if let Some(px) = s.strip_suffix("px") {
            Ok(Length::Px(parse(px)?))
        } else if let Some(pct) = s.strip_suffix('%') {
            Ok(Length::Percent(parse(pct)?))
        } else {
            Err(Error::MarginParse(s.to_string()))
        }
    }
}

/// Parsed margin expression, CSS shorthand rules:
/// one value for all sides, two for vertical/horizontal, three for
/// top, horizontal, bottom, four for top/right/bottom/left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootMargin {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl Default for RootMargin {
    fn default() -> Self {
        Self {
            top: Length::Px(0.0),
            right: Length::Px(0.0),
            bottom: Length::Px(0.0),
            left: Length::Px(0.0),
        }
    }
}

impl FromStr for RootMargin {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<Length> = s
            .split_whitespace()
            .map(Length::from_str)
            .collect::<Result<_>>()?;
        let margin = match parts.as_slice() {
            [all] => Self {
                top: *all,
                right: *all,
                bottom: *all,
                left: *all,
            },
            [vertical, horizontal] => Self {
                top: *vertical,
                right: *horizontal,
                bottom: *vertical,
                left: *horizontal,
            },
            [top, horizontal, bottom] => Self {
                top: *top,
                right: *horizontal,
                bottom: *bottom,
                left: *horizontal,
            },
            [top, right, bottom, left] => Self {
                top: *top,
                right: *right,
                bottom: *bottom,
                left: *left,
            },
            _ => return Err(Error::MarginParse(s.to_string())),
        };
        Ok(margin)
    }
}

/// One reported visibility change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntersectionEntry {
    pub target: NodeId,
    pub is_intersecting: bool,
    pub offset_top: i64,
}

/// Watches registered sections against a scrolling root element.
#[derive(Debug)]
pub struct IntersectionWatcher {
    root: NodeId,
    margin: RootMargin,
    observed: Vec<NodeId>,
    last_state: HashMap<NodeId, bool>,
}

impl IntersectionWatcher {
    pub fn new(root: NodeId, margin: RootMargin) -> Self {
        Self {
            root,
            margin,
            observed: Vec::new(),
            last_state: HashMap::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn margin(&self) -> RootMargin {
        self.margin
    }

    pub fn observed(&self) -> &[NodeId] {
        &self.observed
    }

    pub fn observe(&mut self, target: NodeId) {
        if !self.observed.contains(&target) {
            self.observed.push(target);
        }
    }

    /// Tear down all registrations; the next `observe`+`sweep` cycle starts
    /// from a clean slate (no stale change suppression).
    pub fn disconnect(&mut self) {
        self.observed.clear();
        self.last_state.clear();
    }

    /// Recompute intersection for all observed targets at the root's current
    /// scroll position and return the entries whose state changed, in
    /// registration order.
    pub fn sweep(&mut self, doc: &Document) -> Vec<IntersectionEntry> {
        let root = doc.node(self.root);
        let height = root.height() as f64;
        let visible_start = root.scroll_top() as f64 - self.margin.top.resolve(height);
        let visible_end = root.scroll_top() as f64 + height + self.margin.bottom.resolve(height);

        let mut entries = Vec::new();
        for &target in &self.observed {
            let node = doc.node(target);
            let top = node.offset_top() as f64;
            let bottom = top + node.height() as f64;
            // Threshold 0: any strictly positive overlap intersects.
            let is_intersecting = top < visible_end && bottom > visible_start;
            if self.last_state.get(&target) != Some(&is_intersecting) {
                self.last_state.insert(target, is_intersecting);
                entries.push(IntersectionEntry {
                    target,
                    is_intersecting,
                    offset_top: node.offset_top(),
                });
            }
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ElementDef;
    use crate::dom::PageDef;

    fn three_sections() -> (Document, NodeId, [NodeId; 3]) {
        let page = PageDef {
            body: vec![ElementDef::new("div")
                .id("content")
                .height(150)
                .child(ElementDef::new("div").id("one").height(100))
                .child(ElementDef::new("div").id("two").height(100))
                .child(ElementDef::new("div").id("three").height(100))],
        };
        let doc = page.build();
        let content = doc.element_by_id("content").unwrap();
        let ids = ["one", "two", "three"].map(|id| doc.element_by_id(id).unwrap());
        (doc, content, ids)
    }

    #[test]
    fn test_root_margin_shorthand() {
        let margin: RootMargin = "0px 0px -40%".parse().unwrap();
        assert_eq!(margin.top, Length::Px(0.0));
        assert_eq!(margin.right, Length::Px(0.0));
        assert_eq!(margin.bottom, Length::Percent(-40.0));
        assert_eq!(margin.left, Length::Px(0.0));

        let single: RootMargin = "10px".parse().unwrap();
        assert_eq!(single.bottom, Length::Px(10.0));

        assert!("".parse::<RootMargin>().is_err());
        assert!("10".parse::<RootMargin>().is_err());
        assert!("1px 2px 3px 4px 5px".parse::<RootMargin>().is_err());
    }

    #[test]
    fn test_initial_sweep_reports_every_target() {
        let (doc, content, sections) = three_sections();
        let mut watcher = IntersectionWatcher::new(content, "0px 0px -40%".parse().unwrap());
        for section in sections {
            watcher.observe(section);
        }

        let entries = watcher.sweep(&doc);
        assert_eq!(entries.len(), 3);
        assert!(entries[0].is_intersecting);
        assert!(!entries[1].is_intersecting);
        assert!(!entries[2].is_intersecting);
    }

    #[test]
    fn test_sweep_reports_changes_only() {
        let (mut doc, content, sections) = three_sections();
        let mut watcher = IntersectionWatcher::new(content, "0px 0px -40%".parse().unwrap());
        for section in sections {
            watcher.observe(section);
        }
        watcher.sweep(&doc);

        // No movement, nothing to report.
        assert!(watcher.sweep(&doc).is_empty());

        // Visible interval becomes [101, 191]: one leaves, two enters.
        doc.set_scroll_top(content, 101);
        let entries = watcher.sweep(&doc);
        assert_eq!(
            entries,
            vec![
                IntersectionEntry {
                    target: sections[0],
                    is_intersecting: false,
                    offset_top: 0
                },
                IntersectionEntry {
                    target: sections[1],
                    is_intersecting: true,
                    offset_top: 100
                },
            ]
        );
    }

    #[test]
    fn test_disconnect_resets_state() {
        let (doc, content, sections) = three_sections();
        let mut watcher = IntersectionWatcher::new(content, RootMargin::default());
        watcher.observe(sections[0]);
        watcher.sweep(&doc);

        watcher.disconnect();
        assert!(watcher.observed().is_empty());

        // Re-registration reports the initial state again.
        watcher.observe(sections[0]);
        assert_eq!(watcher.sweep(&doc).len(), 1);
    }

    #[test]
    fn test_zero_overlap_is_not_intersecting() {
        let (mut doc, content, sections) = three_sections();
        let mut watcher = IntersectionWatcher::new(content, RootMargin::default());
        watcher.observe(sections[2]);

        // Interval [50, 200] touches section three's top edge exactly.
        doc.set_scroll_top(content, 50);
        let entries = watcher.sweep(&doc);
        assert!(!entries[0].is_intersecting);
    }
}

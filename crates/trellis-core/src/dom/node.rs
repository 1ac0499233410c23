use std::collections::{BTreeMap, BTreeSet};

/// Handle to a node inside a [`Document`](super::Document) arena.
///
/// Cheap to copy and stable for the lifetime of the document; holding a
/// `NodeId` never borrows the document itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// A single element: tag, identity, classes, attributes and layout box.
///
/// Layout is deliberately minimal — `offset_top` is the vertical position
/// relative to the parent's content box, `height` the border-box height.
/// Scroll containers additionally carry a mutable `scroll_top`.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) tag: String,
    pub(crate) id: Option<String>,
    pub(crate) classes: BTreeSet<String>,
    pub(crate) attrs: BTreeMap<String, String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) offset_top: i64,
    pub(crate) height: i64,
    pub(crate) scroll_top: i64,
}

impl Node {
    pub(crate) fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: BTreeSet::new(),
            attrs: BTreeMap::new(),
            parent: None,
            children: Vec::new(),
            offset_top: 0,
            height: 0,
            scroll_top: 0,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn offset_top(&self) -> i64 {
        self.offset_top
    }

    pub fn height(&self) -> i64 {
        self.height
    }

    pub fn scroll_top(&self) -> i64 {
        self.scroll_top
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// The `#fragment` portion of this element's `href`, without the hash.
    /// Empty fragments (`href="#"`) yield `None`.
    pub fn fragment(&self) -> Option<&str> {
        let href = self.attr("href")?;
        let (_, fragment) = href.split_once('#')?;
        if fragment.is_empty() {
            None
        } else {
            Some(fragment)
        }
    }
}

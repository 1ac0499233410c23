use crate::error::{Error, Result};

use super::node::{Node, NodeId};
use super::selector::{ElementRef, Selector};
use super::DATA_PREFIX;

/// Arena-based element tree.
///
/// Nodes are owned by the document and addressed through [`NodeId`]
/// handles; removal is not supported (a document is rebuilt wholesale when
/// the markup changes, which is also why `refresh()` on the components
/// recomputes everything instead of patching).
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding a single `body` root element.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new("body")],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    // ---- construction -----------------------------------------------------

    /// Create a detached element; attach it with [`Document::append_child`].
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(tag));
        id
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    pub fn set_id(&mut self, node: NodeId, id: &str) {
        self.node_mut(node).id = Some(id.to_string());
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        self.node_mut(node)
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        self.node_mut(node).attrs.remove(name);
    }

    pub fn set_layout(&mut self, node: NodeId, offset_top: i64, height: i64) {
        let n = self.node_mut(node);
        n.offset_top = offset_top;
        n.height = height;
    }

    pub fn set_scroll_top(&mut self, node: NodeId, scroll_top: i64) {
        self.node_mut(node).scroll_top = scroll_top;
    }

    // ---- classes ----------------------------------------------------------

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        self.node_mut(node).classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        self.node_mut(node).classes.remove(class);
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node).has_class(class)
    }

    // ---- attributes -------------------------------------------------------

    pub fn attr<'a>(&'a self, node: NodeId, name: &str) -> Option<&'a str> {
        self.node(node).attr(name)
    }

    /// Read a namespaced data attribute (`data_attr("spy")` reads `data-tr-spy`).
    pub fn data_attr<'a>(&'a self, node: NodeId, name: &str) -> Option<&'a str> {
        self.node(node).attr(&format!("{DATA_PREFIX}{name}"))
    }

    // ---- traversal and queries --------------------------------------------

    /// All descendants of `scope` in document (pre-)order, excluding `scope`.
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(scope).children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        out
    }

    /// Descendants of `scope` matching `selector`, in document order.
    pub fn find(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&id| selector.matches(self.node(id)))
            .collect()
    }

    /// First descendant of `scope` matching `selector`.
    pub fn find_one(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|&id| selector.matches(self.node(id)))
    }

    /// First element in the document with the given id.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_one(self.root, &Selector::Id(id.to_string()))
    }

    /// Closest ancestor of `node` (including `node` itself) matching `selector`.
    pub fn closest(&self, node: NodeId, selector: &Selector) -> Option<NodeId> {
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if selector.matches(self.node(id)) {
                return Some(id);
            }
            cursor = self.node(id).parent();
        }
        None
    }

    /// All ancestors of `node` (excluding `node`) matching any of `selectors`,
    /// closest first.
    pub fn ancestors(&self, node: NodeId, selectors: &[Selector]) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cursor = self.node(node).parent();
        while let Some(id) = cursor {
            if selectors.iter().any(|s| s.matches(self.node(id))) {
                out.push(id);
            }
            cursor = self.node(id).parent();
        }
        out
    }

    /// Nearest preceding sibling of `node` matching any of `selectors`.
    pub fn prev_matching(&self, node: NodeId, selectors: &[Selector]) -> Option<NodeId> {
        let parent = self.node(node).parent()?;
        let siblings = self.node(parent).children();
        let index = siblings.iter().position(|&id| id == node)?;
        siblings[..index]
            .iter()
            .rev()
            .copied()
            .find(|&id| selectors.iter().any(|s| s.matches(self.node(id))))
    }

    /// Direct children of `node` matching `selector`.
    pub fn children_matching(&self, node: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.node(node)
            .children()
            .iter()
            .copied()
            .filter(|&id| selector.matches(self.node(id)))
            .collect()
    }

    /// Resolve an element-or-selector configuration value.
    pub fn resolve(&self, element: &ElementRef) -> Result<NodeId> {
        match element {
            ElementRef::Element(id) => Ok(*id),
            ElementRef::Selector(s) => {
                let selector: Selector = s.parse()?;
                self.find_one(self.root, &selector)
                    .ok_or_else(|| Error::NoSuchElement(s.clone()))
            }
        }
    }
}

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

use super::node::{Node, NodeId};

/// Minimal parsed selector: `#id`, `.class` or a bare tag name.
///
/// The components only ever match against one of these three axes, so the
/// full selector grammar stays out of scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Id(String),
    Class(String),
    Tag(String),
}

impl Selector {
    pub fn matches(&self, node: &Node) -> bool {
        match self {
            Selector::Id(id) => node.id() == Some(id.as_str()),
            Selector::Class(class) => node.has_class(class),
            Selector::Tag(tag) => node.tag() == tag,
        }
    }
}

impl FromStr for Selector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let valid = |name: &str| !name.is_empty() && !name.contains(char::is_whitespace);
        if let Some(id) = s.strip_prefix('#') {
            if valid(id) {
                return Ok(Selector::Id(id.to_string()));
            }
        } else if let Some(class) = s.strip_prefix('.') {
            if valid(class) {
                return Ok(Selector::Class(class.to_string()));
            }
        } else if valid(s) {
            return Ok(Selector::Tag(s.to_string()));
        }
        Err(Error::SelectorParse(s.to_string()))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Id(id) => write!(f, "#{id}"),
            Selector::Class(class) => write!(f, ".{class}"),
            Selector::Tag(tag) => write!(f, "{tag}"),
        }
    }
}

/// A configuration value naming an element either directly or by selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementRef {
    Element(NodeId),
    Selector(String),
}

impl From<NodeId> for ElementRef {
    fn from(id: NodeId) -> Self {
        ElementRef::Element(id)
    }
}

impl From<&str> for ElementRef {
    fn from(selector: &str) -> Self {
        ElementRef::Selector(selector.to_string())
    }
}

impl From<String> for ElementRef {
    fn from(selector: String) -> Self {
        ElementRef::Selector(selector)
    }
}

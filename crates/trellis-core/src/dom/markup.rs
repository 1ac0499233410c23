//! Declarative page definitions.
//!
//! A [`PageDef`] is the TOML-friendly description of a document: nested
//! elements with ids, classes, attributes and heights. Building one yields
//! a [`Document`] with layout resolved (each element's `offset_top` is the
//! sum of its preceding siblings' heights), which is all the geometry the
//! intersection watcher needs.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::document::Document;
use super::node::NodeId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementDef {
    /// Element tag, `div` when omitted.
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    /// Border-box height; containers without content of their own keep 0.
    #[serde(default)]
    pub height: i64,
    #[serde(default)]
    pub children: Vec<ElementDef>,
}

fn default_tag() -> String {
    "div".to_string()
}

impl ElementDef {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            height: 0,
            children: Vec::new(),
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn height(mut self, height: i64) -> Self {
        self.height = height;
        self
    }

    pub fn child(mut self, child: ElementDef) -> Self {
        self.children.push(child);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageDef {
    #[serde(default, rename = "element")]
    pub body: Vec<ElementDef>,
}

impl PageDef {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load a definition file, picking the format from the extension
    /// (`.json` is JSON, anything else TOML).
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&raw)
        } else {
            Self::from_toml_str(&raw)
        }
    }

    /// Materialize the definition into a laid-out document.
    pub fn build(&self) -> Document {
        let mut doc = Document::new();
        let root = doc.root();
        let mut offset = 0;
        for def in &self.body {
            let child = build_element(&mut doc, def, offset);
            doc.append_child(root, child);
            offset += def.height;
        }
        doc
    }
}

fn build_element(doc: &mut Document, def: &ElementDef, offset_top: i64) -> NodeId {
    let node = doc.create_element(&def.tag);
    if let Some(id) = &def.id {
        doc.set_id(node, id);
    }
    for class in &def.classes {
        doc.add_class(node, class);
    }
    for (name, value) in &def.attrs {
        doc.set_attr(node, name, value);
    }
    doc.set_layout(node, offset_top, def.height);

    let mut child_offset = 0;
    for child_def in &def.children {
        let child = build_element(doc, child_def, child_offset);
        doc.append_child(node, child);
        child_offset += child_def.height;
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_stacks_sibling_offsets() {
        let page = PageDef {
            body: vec![ElementDef::new("div")
                .id("content")
                .height(150)
                .child(ElementDef::new("div").id("one").height(100))
                .child(ElementDef::new("div").id("two").height(100))
                .child(ElementDef::new("div").id("three").height(100))],
        };
        let doc = page.build();
        let two = doc.element_by_id("two").unwrap();
        assert_eq!(doc.node(two).offset_top(), 100);
        assert_eq!(doc.node(two).height(), 100);
        let three = doc.element_by_id("three").unwrap();
        assert_eq!(doc.node(three).offset_top(), 200);
    }

    #[test]
    fn test_toml_page_definition() {
        let toml = r##"
            [[element]]
            id = "content"
            height = 150
            attrs = { "data-tr-spy" = "scroll", "data-tr-target" = "#navigation" }

            [[element.children]]
            id = "one"
            height = 100
        "##;
        let page = PageDef::from_toml_str(toml).unwrap();
        let doc = page.build();
        let content = doc.element_by_id("content").unwrap();
        assert_eq!(doc.data_attr(content, "spy"), Some("scroll"));
        assert!(doc.element_by_id("one").is_some());
    }

    #[test]
    fn test_json_page_definition() {
        let json = r##"{
            "element": [
                {"id": "content", "height": 150, "children": [
                    {"id": "one", "height": 100}
                ]}
            ]
        }"##;
        let page = PageDef::from_json_str(json).unwrap();
        let doc = page.build();
        assert!(doc.element_by_id("one").is_some());
    }
}

//! In-memory element tree the behavior components attach to.
//!
//! Trellis is headless: instead of a live browser DOM it operates on this
//! small arena-based document model. The host (TUI demo, CLI simulator,
//! tests) builds a document, hands out `NodeId` handles, and feeds scroll
//! positions and input events to the components.

mod document;
mod markup;
mod node;
mod selector;

pub use document::Document;
pub use markup::{ElementDef, PageDef};
pub use node::{Node, NodeId};
pub use selector::{ElementRef, Selector};

/// Prefix for namespaced data attributes (`data-tr-spy`, `data-tr-target`, ...).
pub const DATA_PREFIX: &str = "data-tr-";

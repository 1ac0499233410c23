pub mod config;
pub mod dom;
pub mod error;
pub mod events;
pub mod observer;
pub mod page;
pub mod registry;
pub mod scrollspy;
pub mod swipe;
pub mod tab;

pub use config::AppConfig;
pub use dom::{Document, ElementDef, ElementRef, NodeId, PageDef, Selector};
pub use error::{Error, Result};
pub use events::{Event, EventBus, EventName};
pub use page::Page;
pub use registry::Registry;
pub use scrollspy::{ScrollSpy, ScrollSpyConfig};
pub use swipe::{GestureEvent, Platform, PointerKind, Swipe, SwipeConfig};
pub use tab::{ArrowKey, Tab};

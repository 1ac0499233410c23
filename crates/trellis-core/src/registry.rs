//! Per-element component instances.
//!
//! Each component kind keeps a back-reference map from the element it was
//! constructed on to the live instance: inserted on construction, removed
//! on disposal, lookup returns an `Option`. Attaching a second instance of
//! the same kind to an element is a no-op that keeps the first.

use std::collections::HashMap;

use crate::dom::NodeId;

#[derive(Debug)]
pub struct Registry<T> {
    instances: HashMap<NodeId, T>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            instances: HashMap::new(),
        }
    }
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an instance unless the element already has one.
    /// Returns whether the instance was inserted.
    pub fn insert(&mut self, element: NodeId, instance: T) -> bool {
        if self.instances.contains_key(&element) {
            return false;
        }
        self.instances.insert(element, instance);
        true
    }

    pub fn get(&self, element: NodeId) -> Option<&T> {
        self.instances.get(&element)
    }

    pub fn get_mut(&mut self, element: NodeId) -> Option<&mut T> {
        self.instances.get_mut(&element)
    }

    pub fn remove(&mut self, element: NodeId) -> Option<T> {
        self.instances.remove(&element)
    }

    pub fn contains(&self, element: NodeId) -> bool {
        self.instances.contains_key(&element)
    }

    pub fn elements(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.instances.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

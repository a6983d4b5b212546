//! Element store: the ordered collection of elements in the open document.
//!
//! The backing `Vec` doubles as the z-order — index 0 is drawn bottom-most
//! and the last index top-most, so "bring to front" is a move to the end.
//! Every mutation here is infallible for well-typed input: operations that
//! reference an id no longer in the store are no-ops that report `false`
//! (or `None`), never errors. Stale ids legitimately arrive from async
//! callbacks that outlive the element they were created for.
//!
//! History snapshots and dirty-marking are the engine's responsibility;
//! this type stays a plain collection.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use crate::consts::DUPLICATE_OFFSET;
use crate::element::{Element, ElementId, ElementPatch, fresh_id};

/// Ordered collection of the document's elements.
#[derive(Debug, Clone, Default)]
pub struct ElementStore {
    elements: Vec<Element>,
}

impl ElementStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element to the top of the z-order.
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Shallow-merge a patch into the element with the given id.
    /// Returns `false` (and changes nothing) if the id is not present.
    pub fn update(&mut self, id: &str, patch: &ElementPatch) -> bool {
        let Some(element) = self.elements.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        patch.apply(element);
        true
    }

    /// Remove the element with the given id, returning it if present.
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        let index = self.elements.iter().position(|e| e.id == id)?;
        Some(self.elements.remove(index))
    }

    /// Deep-copy the element with the given id under a fresh id, offset by
    /// [`DUPLICATE_OFFSET`] on both axes, appended on top. Returns the new
    /// id, or `None` if the source id is not present.
    pub fn duplicate(&mut self, id: &str) -> Option<ElementId> {
        let source = self.elements.iter().find(|e| e.id == id)?;
        let mut copy = source.clone();
        copy.id = fresh_id();
        copy.x += DUPLICATE_OFFSET;
        copy.y += DUPLICATE_OFFSET;
        let new_id = copy.id.clone();
        self.elements.push(copy);
        Some(new_id)
    }

    /// Swap the element one step toward the top of the z-order.
    /// No-op if the id is absent or the element is already top-most.
    pub fn bring_forward(&mut self, id: &str) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        if index + 1 >= self.elements.len() {
            return false;
        }
        self.elements.swap(index, index + 1);
        true
    }

    /// Swap the element one step toward the bottom of the z-order.
    /// No-op if the id is absent or the element is already bottom-most.
    pub fn send_backward(&mut self, id: &str) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        if index == 0 {
            return false;
        }
        self.elements.swap(index, index - 1);
        true
    }

    /// Move the element to the top of the z-order.
    pub fn bring_to_front(&mut self, id: &str) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        if index + 1 == self.elements.len() {
            return false;
        }
        let element = self.elements.remove(index);
        self.elements.push(element);
        true
    }

    /// Move the element to the bottom of the z-order.
    pub fn send_to_back(&mut self, id: &str) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        if index == 0 {
            return false;
        }
        let element = self.elements.remove(index);
        self.elements.insert(0, element);
        true
    }

    /// Replace the whole collection, e.g. when loading a document or
    /// restoring a history snapshot.
    pub fn replace_all(&mut self, elements: Vec<Element>) {
        self.elements = elements;
    }

    /// Reference to the element with the given id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Mutable reference to the element with the given id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Whether an element with the given id is present.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.elements.iter().any(|e| e.id == id)
    }

    /// The elements in z-order, bottom-most first.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Deep copy of the elements, for snapshots and serialization.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Element> {
        self.elements.clone()
    }

    /// Number of elements in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the document has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }
}

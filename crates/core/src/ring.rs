//! Ring module - identifier-keyed, rotatable, insertion-ordered collection
//!
//! A `Ring<T>` owns its items and keeps them in a logical circle. The front
//! item is "current"; [`Ring::rotate`] moves it to the back in O(1).
//! The sprite registry and every sprite's frame cycles are rings.
//!
//! Storage is an index-stable arena: nodes live in a `Vec` of slots with a
//! free list, and `prev`/`next` are slot indices forming a doubly-linked
//! circle. Removing the front or back is O(1); removing from the middle scans
//! for the id first.

use crate::types::{Id, MAX_RING_ENTRIES, NOT_FOUND_ID};

#[derive(Debug, Clone)]
struct Node<T> {
    id: Id,
    value: T,
    prev: usize,
    next: usize,
}

/// Owned, id-keyed circle of items with a rotating front
#[derive(Debug, Clone)]
pub struct Ring<T> {
    slots: Vec<Option<Node<T>>>,
    /// Vacant slot indices, reused before growing `slots`
    free: Vec<usize>,
    head: Option<usize>,
    len: usize,
}

impl<T> Default for Ring<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Ring<T> {
    /// Reserved id returned by hosts that need an in-band "not found"
    pub const NOT_FOUND: Id = NOT_FOUND_ID;

    /// Create an empty ring
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            len: 0,
        }
    }

    /// Number of items
    pub fn size(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    fn node(&self, slot: usize) -> Option<&Node<T>> {
        self.slots.get(slot).and_then(|s| s.as_ref())
    }

    #[inline(always)]
    fn node_mut(&mut self, slot: usize) -> Option<&mut Node<T>> {
        self.slots.get_mut(slot).and_then(|s| s.as_mut())
    }

    fn tail(&self) -> Option<usize> {
        self.head.and_then(|h| self.node(h)).map(|n| n.prev)
    }

    /// Slot holding `id`, if any
    fn find(&self, id: Id) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.as_ref().is_some_and(|n| n.id == id))
    }

    /// Whether an item with `id` exists
    pub fn contains(&self, id: Id) -> bool {
        self.find(id).is_some()
    }

    /// Item with `id`
    pub fn get(&self, id: Id) -> Option<&T> {
        self.find(id).and_then(|s| self.node(s)).map(|n| &n.value)
    }

    /// Mutable item with `id`
    pub fn get_mut(&mut self, id: Id) -> Option<&mut T> {
        let slot = self.find(id)?;
        self.node_mut(slot).map(|n| &mut n.value)
    }

    /// Current (front) item
    pub fn current(&self) -> Option<&T> {
        self.head.and_then(|h| self.node(h)).map(|n| &n.value)
    }

    /// Mutable current (front) item
    pub fn current_mut(&mut self) -> Option<&mut T> {
        let head = self.head?;
        self.node_mut(head).map(|n| &mut n.value)
    }

    /// Id of the current (front) item
    pub fn current_id(&self) -> Option<Id> {
        self.head.and_then(|h| self.node(h)).map(|n| n.id)
    }

    /// Id of the current item, or [`Ring::NOT_FOUND`] when empty
    pub fn current_id_or_sentinel(&self) -> Id {
        self.current_id().unwrap_or(Self::NOT_FOUND)
    }

    /// Move the front item to the back; no-op with fewer than two items
    pub fn rotate(&mut self) {
        if self.len > 1 {
            self.head = self.head.and_then(|h| self.node(h)).map(|n| n.next);
        }
    }

    /// Insert under the smallest free id starting at 1
    ///
    /// Returns the assigned id, or None once every id is taken.
    pub fn add(&mut self, value: T) -> Option<Id> {
        let id = (1..=Id::MAX).find(|&id| id != NOT_FOUND_ID && !self.contains(id))?;
        self.insert(id, value).ok()?;
        Some(id)
    }

    /// Insert under a caller-chosen id at the back
    ///
    /// Fails (returning the value) if `id` is taken, is the reserved sentinel,
    /// or the ring is full.
    pub fn insert(&mut self, id: Id, value: T) -> Result<(), T> {
        if id == NOT_FOUND_ID || self.len >= MAX_RING_ENTRIES || self.contains(id) {
            return Err(value);
        }

        let slot = self.free.pop().unwrap_or(self.slots.len());
        let node = match (self.head, self.tail()) {
            (Some(head), Some(tail)) => {
                if let Some(n) = self.node_mut(tail) {
                    n.next = slot;
                }
                if let Some(n) = self.node_mut(head) {
                    n.prev = slot;
                }
                Node {
                    id,
                    value,
                    prev: tail,
                    next: head,
                }
            }
            _ => {
                self.head = Some(slot);
                Node {
                    id,
                    value,
                    prev: slot,
                    next: slot,
                }
            }
        };

        if slot == self.slots.len() {
            self.slots.push(Some(node));
        } else {
            self.slots[slot] = Some(node);
        }
        self.len += 1;
        Ok(())
    }

    /// Insert under a caller-chosen id
    /// Returns false if the id is taken or reserved
    pub fn add_with_id(&mut self, id: Id, value: T) -> bool {
        self.insert(id, value).is_ok()
    }

    /// Detach and return the item with `id`
    pub fn take(&mut self, id: Id) -> Option<T> {
        let head = self.head?;
        let tail = self.tail()?;

        // Front and back are found without a scan
        let slot = if self.node(head).is_some_and(|n| n.id == id) {
            head
        } else if self.node(tail).is_some_and(|n| n.id == id) {
            tail
        } else {
            self.find(id)?
        };

        let node = self.slots.get_mut(slot)?.take()?;
        self.free.push(slot);
        self.len -= 1;

        if self.len == 0 {
            self.head = None;
            self.slots.clear();
            self.free.clear();
            return Some(node.value);
        }

        if let Some(n) = self.node_mut(node.prev) {
            n.next = node.next;
        }
        if let Some(n) = self.node_mut(node.next) {
            n.prev = node.prev;
        }
        if slot == head {
            self.head = Some(node.next);
        }
        Some(node.value)
    }

    /// Remove and drop the item with `id`
    /// Returns false if there is no such item
    pub fn remove(&mut self, id: Id) -> bool {
        self.take(id).is_some()
    }

    /// Drop every item
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.len = 0;
    }

    /// `(id, item)` pairs from the current item onward, without rotating
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            ring: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// Ids from the current item onward, without rotating
    pub fn ids(&self) -> impl Iterator<Item = Id> + '_ {
        self.iter().map(|(id, _)| id)
    }
}

/// Iterator over a ring in current order
pub struct Iter<'a, T> {
    ring: &'a Ring<T>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (Id, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.ring.node(self.cursor?)?;
        self.cursor = Some(node.next);
        self.remaining -= 1;
        Some((node.id, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

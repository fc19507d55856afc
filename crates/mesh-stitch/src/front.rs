//! The advancing front: pending directed edges awaiting a third vertex.
//!
//! Items live in an append-only arena and are referenced by index from a FIFO
//! queue and from a per-edge lookup map. Consumed items stay in the arena with
//! `processed` set.

use std::collections::{BTreeMap, VecDeque};

use nalgebra::Vector3;

use crate::types::{EdgeKey, FrontItem};

#[derive(Debug, Default)]
pub struct FrontQueue {
    items: Vec<FrontItem>,
    by_edge: BTreeMap<EdgeKey, usize>,
    pending: VecDeque<usize>,
}

impl FrontQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item and return its arena index.
    ///
    /// Admission rules are the caller's; this only refuses an exact duplicate
    /// directed edge.
    pub fn push(&mut self, p1: usize, p2: usize, base_normal: Vector3<f64>) -> Option<usize> {
        let key = EdgeKey::new(p1, p2);
        if self.by_edge.contains_key(&key) {
            return None;
        }
        let index = self.items.len();
        self.items.push(FrontItem::new(p1, p2, base_normal));
        self.by_edge.insert(key, index);
        self.pending.push_back(index);
        Some(index)
    }

    /// Take the oldest unprocessed item and mark it processed.
    pub fn pop(&mut self) -> Option<usize> {
        while let Some(index) = self.pending.pop_front() {
            let item = &mut self.items[index];
            if !item.processed {
                item.processed = true;
                return Some(index);
            }
        }
        None
    }

    /// Arena index of the item for the directed edge, if any.
    #[inline]
    pub fn find(&self, p1: usize, p2: usize) -> Option<usize> {
        self.by_edge.get(&EdgeKey::new(p1, p2)).copied()
    }

    /// Whether an item exists for the edge in either direction.
    #[inline]
    pub fn contains_either(&self, a: usize, b: usize) -> bool {
        self.find(a, b).is_some() || self.find(b, a).is_some()
    }

    #[inline]
    pub fn item(&self, index: usize) -> &FrontItem {
        &self.items[index]
    }

    /// Record the third vertex an item was resolved with.
    pub fn resolve(&mut self, index: usize, p3: usize) {
        self.items[index].p3 = Some(p3);
    }

    /// Whether an unprocessed item is still queued.
    pub fn is_exhausted(&self) -> bool {
        self.pending.iter().all(|&i| self.items[i].processed)
    }

    /// Total items ever created.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[FrontItem] {
        &self.items
    }
}

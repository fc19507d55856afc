//! Directed-edge ledger.
//!
//! Records every directed edge consumed by a face, together with the edges of
//! the input loops. An undirected edge is *closed* once both of its directions
//! are recorded; a vertex is closed once every edge a generated face gave it is
//! closed.

use std::collections::BTreeMap;

use crate::types::EdgeKey;

/// What a ledger key was recorded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Face that consumed the edge. Meaningless when `generated` is false.
    pub face: usize,

    /// False for input boundary edges, true for edges of generated faces.
    pub generated: bool,
}

#[derive(Debug, Default)]
pub struct EdgeLedger {
    edges: BTreeMap<EdgeKey, LedgerEntry>,
    neighbors: BTreeMap<usize, Vec<usize>>,
}

impl EdgeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an input boundary edge so no face is built across it twice.
    ///
    /// Returns false if the key was already present.
    pub fn insert_boundary(&mut self, from: usize, to: usize) -> bool {
        self.insert(
            EdgeKey::new(from, to),
            LedgerEntry {
                face: 0,
                generated: false,
            },
        )
    }

    /// Record the three directed edges and adjacencies of a generated triangle.
    pub fn insert_face(&mut self, [p1, p2, p3]: [usize; 3], face: usize) {
        let entry = LedgerEntry {
            face,
            generated: true,
        };
        for (a, b) in [(p1, p2), (p2, p3), (p3, p1)] {
            self.insert(EdgeKey::new(a, b), entry);
        }
        for (v, a, b) in [(p1, p2, p3), (p2, p3, p1), (p3, p1, p2)] {
            self.neighbors.entry(v).or_default().extend([a, b]);
        }
    }

    // Keys are inserted at most once; later writers never overwrite.
    fn insert(&mut self, key: EdgeKey, entry: LedgerEntry) -> bool {
        match self.edges.entry(key) {
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(entry);
                true
            }
            std::collections::btree_map::Entry::Occupied(_) => false,
        }
    }

    #[inline]
    pub fn get(&self, from: usize, to: usize) -> Option<&LedgerEntry> {
        self.edges.get(&EdgeKey::new(from, to))
    }

    /// Whether the directed edge is recorded.
    #[inline]
    pub fn contains(&self, from: usize, to: usize) -> bool {
        self.edges.contains_key(&EdgeKey::new(from, to))
    }

    /// Whether the edge is recorded in either direction.
    #[inline]
    pub fn contains_either(&self, a: usize, b: usize) -> bool {
        self.contains(a, b) || self.contains(b, a)
    }

    /// Whether both directions of the edge are recorded.
    #[inline]
    pub fn is_edge_closed(&self, a: usize, b: usize) -> bool {
        self.contains(a, b) && self.contains(b, a)
    }

    /// Whether every edge a generated face gave `vertex` is closed.
    ///
    /// A vertex no face has touched yet is open.
    pub fn is_vertex_closed(&self, vertex: usize) -> bool {
        let others = self.neighbors(vertex);
        !others.is_empty() && others.iter().all(|&o| self.is_edge_closed(vertex, o))
    }

    /// Neighbors recorded for `vertex`, with repeats, in insertion order.
    pub fn neighbors(&self, vertex: usize) -> &[usize] {
        self.neighbors
            .get(&vertex)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// All recorded keys in `(from, to)` order.
    pub fn iter(&self) -> impl Iterator<Item = (&EdgeKey, &LedgerEntry)> {
        self.edges.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

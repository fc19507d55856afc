//! Per-request vertex registry.

use hashbrown::HashMap;
use nalgebra::Point3;

use crate::types::SourceVertex;

/// Vertices taking part in one stitch request.
///
/// Tags are deduplicated per loop: a tag repeated inside one loop maps to a
/// single registry vertex, while the same tag in two loops yields two.
#[derive(Debug, Default)]
pub struct VertexRegistry {
    vertices: Vec<SourceVertex>,
}

impl VertexRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one loop and return the registry index of every loop position.
    ///
    /// The returned vector is parallel to `loop_vertices`. Positions are
    /// copied; `positions` is not retained. Every tag must index `positions`.
    pub fn register_loop(
        &mut self,
        positions: &[Point3<f64>],
        loop_vertices: &[usize],
        loop_id: usize,
    ) -> Vec<usize> {
        let mut by_tag: HashMap<usize, usize> = HashMap::with_capacity(loop_vertices.len());
        loop_vertices
            .iter()
            .map(|&tag| {
                *by_tag
                    .entry(tag)
                    .or_insert_with(|| self.add_vertex(positions[tag], loop_id, tag))
            })
            .collect()
    }

    fn add_vertex(&mut self, position: Point3<f64>, source_loop: usize, tag: usize) -> usize {
        let index = self.vertices.len();
        self.vertices.push(SourceVertex {
            position,
            source_loop,
            tag,
            index,
        });
        index
    }

    #[inline]
    pub fn get(&self, index: usize) -> &SourceVertex {
        &self.vertices[index]
    }

    #[inline]
    pub fn position(&self, index: usize) -> &Point3<f64> {
        &self.get(index).position
    }

    #[inline]
    pub fn tag(&self, index: usize) -> usize {
        self.get(index).tag
    }

    #[inline]
    pub fn source_loop(&self, index: usize) -> usize {
        self.get(index).source_loop
    }

    /// Whether two vertices came from the same loop.
    #[inline]
    pub fn same_loop(&self, a: usize, b: usize) -> bool {
        self.source_loop(a) == self.source_loop(b)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions() -> Vec<Point3<f64>> {
        (0..6).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect()
    }

    #[test]
    fn test_register_dedups_within_loop() {
        let positions = positions();
        let mut registry = VertexRegistry::new();

        let local = registry.register_loop(&positions, &[3, 4, 3, 5], 1);

        assert_eq!(local, vec![0, 1, 0, 2]);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.tag(2), 5);
        assert_eq!(registry.position(1).x, 4.0);
    }

    #[test]
    fn test_same_tag_in_two_loops_is_two_vertices() {
        let positions = positions();
        let mut registry = VertexRegistry::new();

        let first = registry.register_loop(&positions, &[0, 1, 2], 1);
        let second = registry.register_loop(&positions, &[2, 3, 4], 2);

        assert_eq!(first, vec![0, 1, 2]);
        assert_eq!(second, vec![3, 4, 5]);
        assert_eq!(registry.tag(2), registry.tag(3));
        assert!(!registry.same_loop(2, 3));
        assert!(registry.same_loop(3, 5));
        assert_eq!(registry.get(4).index, 4);
        assert_eq!(registry.get(4).source_loop, 2);
    }

    #[test]
    fn test_empty_loop_registers_nothing() {
        let mut registry = VertexRegistry::new();
        let local = registry.register_loop(&positions(), &[], 1);
        assert!(local.is_empty());
        assert!(registry.is_empty());
    }
}

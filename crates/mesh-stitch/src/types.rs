//! Core stitching data types.

use nalgebra::{Point3, Vector3};

/// An open boundary loop to be stitched.
///
/// `vertices` index into the caller's position buffer and are listed in the
/// winding of the existing surface that borders the loop. Generated faces
/// traverse every boundary edge in the opposite direction.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLoop {
    /// Ordered vertex indices; the last vertex connects back to the first.
    pub vertices: Vec<usize>,

    /// Reference normal of the plane the loop lies on.
    pub normal: Vector3<f64>,
}

impl EdgeLoop {
    /// Create a loop from its ordered vertices and reference normal.
    pub fn new(vertices: Vec<usize>, normal: Vector3<f64>) -> Self {
        Self { vertices, normal }
    }

    /// Number of vertices (and edges) in the loop.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Check if the loop has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterate the loop's directed edges `(v, next)`, wrapping at the end.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }
}

/// A vertex registered for one stitch request.
#[derive(Debug, Clone)]
pub struct SourceVertex {
    /// Position copied out of the caller's buffer.
    pub position: Point3<f64>,

    /// 1-based id of the loop this vertex came from (0 = none).
    pub source_loop: usize,

    /// Index into the caller's vertex space.
    pub tag: usize,

    /// Index into this request's registry.
    pub index: usize,
}

/// A directed edge between two registry vertices.
///
/// Ordered lexicographically on `(from, to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey {
    pub from: usize,
    pub to: usize,
}

impl EdgeKey {
    #[inline]
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

/// A pending directed edge on the advancing front.
#[derive(Debug, Clone)]
pub struct FrontItem {
    pub p1: usize,
    pub p2: usize,

    /// Normal of the face on the far side of the edge.
    pub base_normal: Vector3<f64>,

    /// Third vertex chosen when the item produced a face.
    pub p3: Option<usize>,

    /// Tombstone; items are never removed from the arena.
    pub processed: bool,
}

impl FrontItem {
    pub fn new(p1: usize, p2: usize, base_normal: Vector3<f64>) -> Self {
        Self {
            p1,
            p2,
            base_normal,
            p3: None,
            processed: false,
        }
    }
}

/// A generated triangle in registry indices.
#[derive(Debug, Clone)]
pub struct Face3 {
    pub p1: usize,
    pub p2: usize,
    pub p3: usize,
    pub normal: Vector3<f64>,
    pub index: usize,
}

impl Face3 {
    #[inline]
    pub fn vertices(&self) -> [usize; 3] {
        [self.p1, self.p2, self.p3]
    }

    /// The vertex of this face that is neither `a` nor `b`.
    pub fn opposite_vertex(&self, a: usize, b: usize) -> Option<usize> {
        self.vertices().into_iter().find(|&v| v != a && v != b)
    }
}

/// A quad produced by merging two triangles, in registry indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face4 {
    pub p1: usize,
    pub p2: usize,
    pub p3: usize,
    pub p4: usize,
}

impl Face4 {
    #[inline]
    pub fn vertices(&self) -> [usize; 4] {
        [self.p1, self.p2, self.p3, self.p4]
    }
}

/// An output face in the caller's vertex tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StitchFace {
    Triangle([usize; 3]),
    Quad([usize; 4]),
}

impl StitchFace {
    /// Vertex tags in winding order.
    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        match self {
            StitchFace::Triangle(v) => v,
            StitchFace::Quad(v) => v,
        }
    }

    /// Number of vertices (3 or 4).
    #[inline]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Always false: a face has three or four vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    pub fn is_quad(&self) -> bool {
        matches!(self, StitchFace::Quad(_))
    }

    /// Split into triangles with the same winding, for triangle-only meshes.
    pub fn triangles(&self) -> Vec<[usize; 3]> {
        match *self {
            StitchFace::Triangle(t) => vec![t],
            StitchFace::Quad([a, b, c, d]) => vec![[a, b, c], [a, c, d]],
        }
    }

    /// Directed edges of the face, wrapping at the end.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let v = self.as_slice();
        let n = v.len();
        (0..n).map(|i| (v[i], v[(i + 1) % n])).collect()
    }
}

/// Unit normal of the triangle `(a, b, c)` by the right-hand rule.
///
/// Zero for degenerate triangles.
#[inline]
pub fn triangle_normal(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> Vector3<f64> {
    (b - a)
        .cross(&(c - a))
        .try_normalize(0.0)
        .unwrap_or_else(Vector3::zeros)
}

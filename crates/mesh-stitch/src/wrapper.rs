//! Advancing-front wrapping of boundary loops.
//!
//! [`HoleWrapper`] closes one or more boundary loops by growing faces from a
//! single seed edge. Each pending front edge picks the candidate vertex whose
//! face bends least against the face on the other side of the edge, emits a
//! triangle, and pushes the triangle's two new edges back onto the front.
//! When the front runs dry, coplanar triangle pairs are merged into quads.
//!
//! # Single seed
//!
//! Only the first edge of the first loop seeds the front. Everything the
//! wrapper stitches is reached by front growth from that edge, so one call
//! closes one connected region. Loops the front never reaches are reported by
//! [`HoleWrapper::failed_edge_loops`]; stitch unrelated regions with separate
//! calls.
//!
//! # Winding
//!
//! Loops are listed in the winding of the existing surface around them. The
//! wrapper traverses every boundary edge in the opposite direction, so the
//! generated patch winds consistently with that surface.

use nalgebra::{Point3, Vector3};
use tracing::{debug, trace};

use crate::front::FrontQueue;
use crate::ledger::EdgeLedger;
use crate::params::StitchParams;
use crate::quads::merge_coplanar_pairs;
use crate::registry::VertexRegistry;
use crate::types::{EdgeLoop, Face3, StitchFace, triangle_normal};

/// One stitch request. Build a fresh wrapper per call.
#[derive(Debug)]
pub struct HoleWrapper {
    params: StitchParams,
    registry: VertexRegistry,
    ledger: EdgeLedger,
    front: FrontQueue,
    candidates: Vec<usize>,
    faces: Vec<Face3>,
    output: Vec<StitchFace>,
    // Same-loop suppression only applies when several loops are bridged.
    multi_loop: bool,
    finalized: bool,
}

impl Default for HoleWrapper {
    fn default() -> Self {
        Self::new(StitchParams::default())
    }
}

impl HoleWrapper {
    pub fn new(params: StitchParams) -> Self {
        Self {
            params,
            registry: VertexRegistry::new(),
            ledger: EdgeLedger::new(),
            front: FrontQueue::new(),
            candidates: Vec::new(),
            faces: Vec::new(),
            output: Vec::new(),
            multi_loop: false,
            finalized: false,
        }
    }

    /// Stitch `loops` over the borrowed `positions`.
    ///
    /// Every loop vertex must index `positions`; the buffer is only read during
    /// this call. Loop ids are 1-based in input order.
    pub fn wrap(&mut self, positions: &[Point3<f64>], loops: &[EdgeLoop]) {
        self.multi_loop = loops.len() > 1;
        for (loop_id, edge_loop) in (1..).zip(loops) {
            self.add_candidate_vertices(positions, edge_loop, loop_id);
        }
        debug!(
            loops = loops.len(),
            vertices = self.registry.len(),
            "Registered boundary loops"
        );
        self.generate();
        self.finalize();
    }

    fn add_candidate_vertices(
        &mut self,
        positions: &[Point3<f64>],
        edge_loop: &EdgeLoop,
        loop_id: usize,
    ) {
        let first_new = self.registry.len();
        let local = self
            .registry
            .register_loop(positions, &edge_loop.vertices, loop_id);
        self.candidates.extend(first_new..self.registry.len());

        let n = local.len();
        for i in 0..n {
            let v = local[i];
            let next = local[(i + 1) % n];
            if self.front.is_empty() {
                self.add_item(next, v, edge_loop.normal);
            }
            self.ledger.insert_boundary(v, next);
        }
    }

    fn add_item(&mut self, p1: usize, p2: usize, base_normal: Vector3<f64>) {
        if !self.front.is_empty() && self.multi_loop && self.registry.same_loop(p1, p2) {
            return;
        }
        if self.front.contains_either(p1, p2) || self.ledger.contains_either(p1, p2) {
            return;
        }
        self.front.push(p1, p2, base_normal);
    }

    /// Direction in the plane of `normal` perpendicular to the edge `p1 -> p2`.
    fn face_vector(&self, p1: usize, p2: usize, normal: &Vector3<f64>) -> Vector3<f64> {
        let seg = self.registry.position(p2) - self.registry.position(p1);
        seg.cross(normal)
    }

    /// Fold angle in degrees between the item's base face and the face through `vertex`.
    fn angle_of_base_face_and_point(&self, item_index: usize, vertex: usize) -> f64 {
        let item = self.front.item(item_index);
        let (p1, p2) = (item.p1, item.p2);
        if vertex == p1 || vertex == p2 {
            return 0.0;
        }
        if self.multi_loop && self.registry.same_loop(p1, p2) && self.registry.same_loop(p1, vertex)
        {
            return 0.0;
        }
        let base = self.face_vector(p1, p2, &item.base_normal);
        let normal = triangle_normal(
            self.registry.position(p2),
            self.registry.position(p1),
            self.registry.position(vertex),
        );
        let candidate = self.face_vector(p1, p2, &normal);
        candidate.angle(&base).to_degrees()
    }

    fn find_best_vertex_on_the_left(&mut self, item_index: usize) -> Option<usize> {
        let ledger = &self.ledger;
        self.candidates.retain(|&c| !ledger.is_vertex_closed(c));

        let item = self.front.item(item_index);
        let (p1, p2) = (item.p1, item.p2);
        let mut max_angle = 0.0;
        let mut best = None;
        for &candidate in &self.candidates {
            if self.ledger.is_edge_closed(p1, candidate) || self.ledger.is_edge_closed(p2, candidate)
            {
                continue;
            }
            let angle = self.angle_of_base_face_and_point(item_index, candidate);
            if angle > max_angle {
                max_angle = angle;
                best = Some(candidate);
            }
        }
        best
    }

    fn generate(&mut self) {
        while let Some(item_index) = self.front.pop() {
            let item = self.front.item(item_index);
            let (p1, p2) = (item.p1, item.p2);
            if self.ledger.is_edge_closed(p1, p2) {
                continue;
            }
            let Some(p3) = self.find_best_vertex_on_the_left(item_index) else {
                trace!(p1, p2, "Front edge abandoned, no candidate");
                continue;
            };
            self.front.resolve(item_index, p3);

            let normal = triangle_normal(
                self.registry.position(p1),
                self.registry.position(p2),
                self.registry.position(p3),
            );
            let index = self.faces.len();
            self.faces.push(Face3 {
                p1,
                p2,
                p3,
                normal,
                index,
            });
            trace!(p1, p2, p3, face = index, "Generated face");

            self.add_item(p3, p2, normal);
            self.add_item(p1, p3, normal);
            self.ledger.insert_face([p1, p2, p3], index);
        }
        debug!(
            faces = self.faces.len(),
            front_items = self.front.len(),
            "Advancing front exhausted"
        );
    }

    fn finalize(&mut self) {
        self.finalized = true;
        let registry = &self.registry;
        let tag = |v: usize| registry.tag(v);

        if !self.params.merge_quads {
            self.output = self
                .faces
                .iter()
                .map(|f| StitchFace::Triangle([tag(f.p1), tag(f.p2), tag(f.p3)]))
                .collect();
            return;
        }

        let merged = merge_coplanar_pairs(&self.faces, &self.ledger, self.params.normal_tolerance);
        let mut output = Vec::with_capacity(merged.triangles.len() + merged.quads.len());
        for &index in &merged.triangles {
            let f = &self.faces[index];
            output.push(StitchFace::Triangle([tag(f.p1), tag(f.p2), tag(f.p3)]));
        }
        for q in &merged.quads {
            output.push(StitchFace::Quad([tag(q.p1), tag(q.p2), tag(q.p3), tag(q.p4)]));
        }
        debug!(
            triangles = merged.triangles.len(),
            quads = merged.quads.len(),
            "Merged coplanar triangle pairs"
        );
        self.output = output;
    }

    /// Faces generated by [`wrap`](Self::wrap), in the caller's vertex tags.
    ///
    /// Unpaired triangles come first in generation order, then quads.
    pub fn newly_generated_faces(&self) -> &[StitchFace] {
        &self.output
    }

    /// Whether the front is exhausted and every remaining candidate is closed.
    pub fn finished(&self) -> bool {
        self.finalized
            && self.front.is_exhausted()
            && self.candidates.iter().all(|&c| self.ledger.is_vertex_closed(c))
    }

    /// Input indices of loops that still have an open vertex, ascending.
    pub fn failed_edge_loops(&self) -> Vec<usize> {
        let mut failed: Vec<usize> = self
            .candidates
            .iter()
            .filter(|&&c| !self.ledger.is_vertex_closed(c))
            .map(|&c| self.registry.source_loop(c) - 1)
            .collect();
        failed.sort_unstable();
        failed.dedup();
        failed
    }

    /// Triangles generated before quad merging.
    pub fn triangles(&self) -> &[Face3] {
        &self.faces
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// Vertices registered for this request.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.registry.len()
    }

    pub fn ledger(&self) -> &EdgeLedger {
        &self.ledger
    }

    pub fn front(&self) -> &FrontQueue {
        &self.front
    }

    pub fn registry(&self) -> &VertexRegistry {
        &self.registry
    }
}

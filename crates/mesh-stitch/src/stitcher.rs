//! Outward-facing hole stitcher with a quad-bridge fallback.

use nalgebra::{Point3, Vector3};
use tracing::debug;

use crate::error::{StitchError, StitchResult};
use crate::params::StitchParams;
use crate::tracing_ext::{OperationTimer, log_stitch_result};
use crate::types::{EdgeLoop, StitchFace};
use crate::validate::validate_loops;
use crate::wrapper::HoleWrapper;

/// Which strategy produced a [`StitchReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StitchStrategy {
    /// Angle-driven advancing front ([`HoleWrapper`]).
    #[default]
    AdvancingFront,
    /// Direct quad bridging between two equal-length loops.
    QuadBridge,
}

/// Outcome of one stitch request.
#[derive(Debug, Clone, Default)]
pub struct StitchReport {
    /// Generated faces in the caller's vertex tags.
    pub faces: Vec<StitchFace>,

    /// Input indices of loops left open, ascending and deduplicated.
    pub failed_loops: Vec<usize>,

    /// Strategy whose faces are reported.
    pub strategy: StitchStrategy,

    /// Triangles emitted by the advancing front before quad merging.
    pub triangles_generated: usize,
}

impl StitchReport {
    /// Whether every loop was closed.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.failed_loops.is_empty()
    }

    /// All faces split into triangles, for triangle-only meshes.
    pub fn triangles(&self) -> Vec<[usize; 3]> {
        self.faces.iter().flat_map(|f| f.triangles()).collect()
    }
}

/// Stitches a set of boundary loops into a closed patch.
///
/// Runs a fresh [`HoleWrapper`] per call. When the advancing front leaves
/// loops open and the request is exactly two loops of equal length that face
/// each other, the loops are bridged with quads instead (unless
/// [`StitchParams::quad_fallback`] is off). The bridge is refused when walking
/// the loops in the same direction pairs their vertices better than the
/// bridge's opposite walk. Partial advancing-front output is kept otherwise.
///
/// # Example
///
/// ```
/// use mesh_stitch::{EdgeLoop, HoleStitcher};
/// use nalgebra::{Point3, Vector3};
///
/// // A square hole in an upward-facing sheet, listed clockwise from above.
/// let positions = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let loops = vec![EdgeLoop::new(vec![3, 2, 1, 0], Vector3::z())];
///
/// let mut stitcher = HoleStitcher::new();
/// assert!(stitcher.stitch(&positions, &loops).unwrap());
/// assert_eq!(stitcher.newly_generated_faces().len(), 1);
/// assert!(stitcher.failed_edge_loops().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct HoleStitcher {
    params: StitchParams,
    report: StitchReport,
}

impl HoleStitcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(params: StitchParams) -> Self {
        Self {
            params,
            report: StitchReport::default(),
        }
    }

    pub fn params(&self) -> &StitchParams {
        &self.params
    }

    /// Stitch `loops` over the borrowed `positions`.
    ///
    /// Returns whether every loop was closed. Errors only on invalid input or
    /// parameters; failing to close is reported through
    /// [`failed_edge_loops`](Self::failed_edge_loops).
    pub fn stitch(&mut self, positions: &[Point3<f64>], loops: &[EdgeLoop]) -> StitchResult<bool> {
        let vertex_count = loops.iter().map(EdgeLoop::len).sum();
        let mut timer = OperationTimer::with_context("hole_stitch", loops.len(), vertex_count);

        self.params.validate()?;
        if self.params.validate {
            validate_loops(positions, loops)?;
        }

        let mut wrapper = HoleWrapper::new(self.params.clone());
        wrapper.wrap(positions, loops);

        let mut report = StitchReport {
            faces: wrapper.newly_generated_faces().to_vec(),
            failed_loops: wrapper.failed_edge_loops(),
            strategy: StitchStrategy::AdvancingFront,
            triangles_generated: wrapper.triangle_count(),
        };

        if !wrapper.finished() && self.params.quad_fallback {
            if let [first, second] = loops {
                if let Some(faces) = bridge_fallback(positions, first, second) {
                    debug!(
                        open_loops = ?report.failed_loops,
                        quads = faces.len(),
                        "Advancing front left loops open, bridged with quads"
                    );
                    report = StitchReport {
                        faces,
                        failed_loops: Vec::new(),
                        strategy: StitchStrategy::QuadBridge,
                        triangles_generated: 0,
                    };
                }
            }
        }

        timer.record_report(&report);
        log_stitch_result(&report);
        let closed = report.is_closed();
        self.report = report;
        Ok(closed)
    }

    /// Faces of the last [`stitch`](Self::stitch), in the caller's vertex tags.
    pub fn newly_generated_faces(&self) -> &[StitchFace] {
        &self.report.faces
    }

    /// Loops the last [`stitch`](Self::stitch) left open.
    pub fn failed_edge_loops(&self) -> &[usize] {
        &self.report.failed_loops
    }

    pub fn report(&self) -> &StitchReport {
        &self.report
    }

    pub fn into_report(self) -> StitchReport {
        self.report
    }
}

/// Quad bridge for a pair the advancing front left open, if the pair is bridgeable.
fn bridge_fallback(
    positions: &[Point3<f64>],
    first: &EdgeLoop,
    second: &EdgeLoop,
) -> Option<Vec<StitchFace>> {
    let n = first.len();
    if n != second.len() || n < 3 {
        return None;
    }
    if !loops_face_each_other(positions, first, second) {
        debug!("Open loops do not face each other, no quad bridge");
        return None;
    }
    let (_, backward) = best_offset(positions, &first.vertices, &second.vertices, Walk::Opposite);
    let (_, forward) = best_offset(positions, &first.vertices, &second.vertices, Walk::Same);
    if forward < backward {
        debug!(backward, forward, "Open loops are wound alike, no quad bridge");
        return None;
    }
    stitch_by_quads(positions, first, second)
}

/// Whether two loops face each other across the gap between them.
///
/// Their normals must oppose, and each loop's centroid must lie on the side
/// its partner's normal points to. Loops in one plane never face each other.
pub fn loops_face_each_other(
    positions: &[Point3<f64>],
    first: &EdgeLoop,
    second: &EdgeLoop,
) -> bool {
    let (Some(a), Some(b)) = (centroid(positions, first), centroid(positions, second)) else {
        return false;
    };
    first.normal.dot(&second.normal) < 0.0
        && (a - b).dot(&second.normal) > 0.0
        && (b - a).dot(&first.normal) > 0.0
}

fn centroid(positions: &[Point3<f64>], edge_loop: &EdgeLoop) -> Option<Point3<f64>> {
    if edge_loop.is_empty() {
        return None;
    }
    let sum = edge_loop
        .vertices
        .iter()
        .fold(Vector3::zeros(), |acc, &v| acc + positions[v].coords);
    Some(Point3::from(sum / edge_loop.len() as f64))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Walk {
    /// `b` backwards against `a`: the winding of two facing rims.
    Opposite,
    /// `b` forwards against `a`.
    Same,
}

/// Start offset into `b` minimizing the summed squared distance to `a`, and that sum.
///
/// The first minimum wins.
fn best_offset(positions: &[Point3<f64>], a: &[usize], b: &[usize], walk: Walk) -> (usize, f64) {
    let n = a.len();
    let mut best_k = 0;
    let mut best_sum = f64::MAX;
    for k in 0..n {
        let sum: f64 = (0..n)
            .map(|i| (positions[b[paired(walk, n, k, i)]] - positions[a[i]]).norm_squared())
            .sum();
        if sum < best_sum {
            best_sum = sum;
            best_k = k;
        }
    }
    (best_k, best_sum)
}

/// Index into `b` paired with `a[i]` for start offset `k`.
#[inline]
fn paired(walk: Walk, n: usize, k: usize, i: usize) -> usize {
    match walk {
        Walk::Opposite => (k + n - i) % n,
        Walk::Same => (k + i) % n,
    }
}

/// Bridge two equal-length loops with one quad per boundary edge.
///
/// `second` is walked backwards against `first`, starting at the offset that
/// minimizes the summed squared distance between paired vertices. Returns
/// `None` when the loops differ in length or have fewer than three vertices.
pub fn stitch_by_quads(
    positions: &[Point3<f64>],
    first: &EdgeLoop,
    second: &EdgeLoop,
) -> Option<Vec<StitchFace>> {
    try_stitch_by_quads(positions, first, second).ok()
}

/// [`stitch_by_quads`] with the reason for refusing.
pub fn try_stitch_by_quads(
    positions: &[Point3<f64>],
    first: &EdgeLoop,
    second: &EdgeLoop,
) -> StitchResult<Vec<StitchFace>> {
    let a = &first.vertices;
    let b = &second.vertices;
    let n = a.len();
    if n != b.len() {
        return Err(StitchError::LoopLengthMismatch {
            first: n,
            second: b.len(),
        });
    }
    if n < 3 {
        return Err(StitchError::BridgeLoopsTooShort { len: n });
    }

    let (offset, _) = best_offset(positions, a, b, Walk::Opposite);
    let faces = (0..n)
        .map(|i| {
            let j = paired(Walk::Opposite, n, offset, i);
            StitchFace::Quad([a[i], b[j], b[(j + n - 1) % n], a[(i + 1) % n]])
        })
        .collect();
    Ok(faces)
}

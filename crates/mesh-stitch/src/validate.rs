//! Precondition checks for stitch requests.
//!
//! The stitching core does not check its input. Run [`validate_loops`] (or
//! leave [`StitchParams::validate`](crate::StitchParams::validate) enabled on
//! [`HoleStitcher`](crate::HoleStitcher)) on anything that did not come from a
//! trusted boundary extraction.

use nalgebra::Point3;
use tracing::warn;

use crate::error::{StitchError, StitchResult};
use crate::types::EdgeLoop;

/// Check that every loop is stitchable against `positions`.
///
/// Rejects requests without loops, loops with fewer than three vertices,
/// vertex indices outside `positions`, non-finite coordinates and zero or
/// non-finite normals. Only the first problem found is reported.
pub fn validate_loops(positions: &[Point3<f64>], loops: &[EdgeLoop]) -> StitchResult<()> {
    if loops.is_empty() {
        return Err(StitchError::NoLoops);
    }

    for (loop_index, edge_loop) in loops.iter().enumerate() {
        if edge_loop.len() < 3 {
            return Err(StitchError::loop_too_short(loop_index, edge_loop.len()));
        }

        let normal = &edge_loop.normal;
        if !normal.iter().all(|c| c.is_finite()) || normal.norm_squared() <= f64::EPSILON {
            return Err(StitchError::DegenerateNormal { loop_index });
        }

        for &vertex in &edge_loop.vertices {
            let Some(p) = positions.get(vertex) else {
                return Err(StitchError::vertex_out_of_range(
                    loop_index,
                    vertex,
                    positions.len(),
                ));
            };
            for (coordinate, value) in [("x", p.x), ("y", p.y), ("z", p.z)] {
                if !value.is_finite() {
                    return Err(StitchError::InvalidCoordinate {
                        vertex,
                        coordinate,
                        value,
                    });
                }
            }
        }

        let distinct = {
            let mut v = edge_loop.vertices.clone();
            v.sort_unstable();
            v.dedup();
            v.len()
        };
        if distinct < edge_loop.len() {
            // Allowed: the registry folds repeats, but the loop is no longer simple.
            warn!(
                loop_index,
                repeated = edge_loop.len() - distinct,
                "Boundary loop repeats vertices"
            );
        }
    }

    Ok(())
}

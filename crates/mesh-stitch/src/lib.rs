//! Stitching of open boundary loops into closed surface patches.
//!
//! Given one or more boundary loops over a shared vertex buffer, this crate
//! synthesizes the triangles and quads that connect them: caps for a single
//! hole, tubes between two facing holes, and general patches in between.
//!
//! # Features
//!
//! - **Advancing front**: [`HoleWrapper`] grows faces from one seed edge,
//!   choosing each third vertex by fold angle against the neighboring face
//! - **Quad merging**: coplanar triangle pairs come out as quads
//! - **Fallback**: [`HoleStitcher`] bridges two facing equal-length loops with
//!   quads when the front cannot close them
//! - **Validation**: [`validate_loops`] checks the preconditions the core assumes
//! - **Batches**: [`stitch_requests`] stitches independent holes in parallel
//!
//! # Conventions
//!
//! Loops are listed in the winding of the existing surface around them, and
//! each carries the normal of the plane it lies on. Generated faces traverse
//! boundary edges in the opposite direction, so a patch winds consistently
//! with its surroundings. For a cap, the loop normal is the cap's outward
//! normal and the loop runs clockwise when seen from that side.
//!
//! One call stitches one connected region: the front is seeded from the first
//! edge of the first loop only, and loops it never reaches are reported as
//! failed.
//!
//! # Quick Start
//!
//! ```
//! use mesh_stitch::{EdgeLoop, HoleStitcher, StitchFace};
//! use nalgebra::{Point3, Vector3};
//!
//! // Triangular tube: bottom rim at z=0, top rim at z=1.
//! let mut positions = Vec::new();
//! for z in [0.0, 1.0] {
//!     for i in 0..3 {
//!         let a = std::f64::consts::TAU * i as f64 / 3.0;
//!         positions.push(Point3::new(a.cos(), a.sin(), z));
//!     }
//! }
//! let loops = vec![
//!     EdgeLoop::new(vec![0, 1, 2], Vector3::z()),
//!     EdgeLoop::new(vec![5, 4, 3], -Vector3::z()),
//! ];
//!
//! let mut stitcher = HoleStitcher::new();
//! let closed = stitcher.stitch(&positions, &loops).unwrap();
//!
//! assert!(closed);
//! assert_eq!(stitcher.newly_generated_faces().len(), 3);
//! assert!(stitcher.newly_generated_faces().iter().all(StitchFace::is_quad));
//! ```

pub mod batch;
mod error;
pub mod front;
pub mod ledger;
mod params;
pub mod quads;
pub mod registry;
mod stitcher;
pub mod tracing_ext;
mod types;
mod validate;
mod wrapper;

pub use batch::stitch_requests;
pub use error::{ErrorCode, RecoverySuggestion, StitchError, StitchResult};
pub use params::StitchParams;
pub use stitcher::{
    HoleStitcher, StitchReport, StitchStrategy, loops_face_each_other, stitch_by_quads,
    try_stitch_by_quads,
};
pub use types::{
    EdgeKey, EdgeLoop, Face3, Face4, FrontItem, SourceVertex, StitchFace, triangle_normal,
};
pub use validate::validate_loops;
pub use wrapper::HoleWrapper;

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector3};

    #[test]
    fn test_stitch_is_deterministic() {
        let mut positions = Vec::new();
        for z in [0.0, 3.0] {
            for i in 0..7 {
                let a = std::f64::consts::TAU * i as f64 / 7.0;
                positions.push(Point3::new(2.0 * a.cos(), 2.0 * a.sin(), z));
            }
        }
        let loops = vec![
            EdgeLoop::new((0..7).collect(), Vector3::z()),
            EdgeLoop::new((7..14).rev().collect(), -Vector3::z()),
        ];

        let run = || {
            let mut wrapper = HoleWrapper::default();
            wrapper.wrap(&positions, &loops);
            (
                wrapper.newly_generated_faces().to_vec(),
                wrapper.failed_edge_loops(),
            )
        };
        let first = run();
        for _ in 0..5 {
            assert_eq!(run(), first);
        }
    }
}

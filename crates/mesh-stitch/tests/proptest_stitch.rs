//! Property-based tests for hole stitching.
//!
//! These tests use proptest to generate random caps and tubes and verify
//! invariants of the generated patches.
//!
//! Run with: cargo test -p mesh-stitch -- proptest

use hashbrown::HashMap;
use mesh_stitch::{EdgeLoop, HoleStitcher, HoleWrapper, StitchFace, StitchParams};
use nalgebra::{Point3, Rotation3, Vector3};
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::f64::consts::{PI, TAU};

// =============================================================================
// Strategies for generating random holes
// =============================================================================

/// Random rigid placement: a rotation and a translation.
fn arb_placement() -> impl Strategy<Value = (Rotation3<f64>, Vector3<f64>)> {
    (
        prop::array::uniform3(-PI..PI),
        prop::array::uniform3(-100.0..100.0f64),
    )
        .prop_map(|([roll, pitch, yaw], [x, y, z])| {
            (
                Rotation3::from_euler_angles(roll, pitch, yaw),
                Vector3::new(x, y, z),
            )
        })
}

/// A regular polygonal hole placed anywhere in space.
#[derive(Debug, Clone)]
struct Cap {
    positions: Vec<Point3<f64>>,
    loops: Vec<EdgeLoop>,
}

fn arb_cap() -> impl Strategy<Value = Cap> {
    (3usize..=16, 0.5..50.0f64, arb_placement()).prop_map(|(n, radius, (rotation, center))| {
        let positions = (0..n)
            .map(|i| {
                let a = TAU * i as f64 / n as f64;
                rotation * Point3::new(radius * a.cos(), radius * a.sin(), 0.0) + center
            })
            .collect();
        let loops = vec![EdgeLoop::new((0..n).rev().collect(), rotation * Vector3::z())];
        Cap { positions, loops }
    })
}

/// Two aligned regular rims facing each other.
fn arb_tube() -> impl Strategy<Value = Cap> {
    (3usize..=12, 0.5..50.0f64, 0.2..30.0f64, arb_placement()).prop_map(
        |(n, radius, height, (rotation, center))| {
            let mut positions = Vec::with_capacity(2 * n);
            for z in [0.0, height] {
                for i in 0..n {
                    let a = TAU * i as f64 / n as f64;
                    positions
                        .push(rotation * Point3::new(radius * a.cos(), radius * a.sin(), z) + center);
                }
            }
            let axis = rotation * Vector3::z();
            let loops = vec![
                EdgeLoop::new((0..n).collect(), axis),
                EdgeLoop::new((n..2 * n).rev().collect(), -axis),
            ];
            Cap { positions, loops }
        },
    )
}

/// Up to three unrelated squares in one request.
fn arb_scattered_squares() -> impl Strategy<Value = Cap> {
    (1usize..=3, prop::collection::vec(prop::array::uniform2(-20.0..20.0f64), 3)).prop_map(
        |(count, offsets)| {
            let mut positions = Vec::new();
            let mut loops = Vec::new();
            for (k, [x, y]) in offsets.into_iter().take(count).enumerate() {
                let z = 10.0 * k as f64;
                let base = positions.len();
                positions.push(Point3::new(x, y, z));
                positions.push(Point3::new(x + 1.0, y, z));
                positions.push(Point3::new(x + 1.0, y + 1.0, z));
                positions.push(Point3::new(x, y + 1.0, z));
                loops.push(EdgeLoop::new(
                    vec![base + 3, base + 2, base + 1, base],
                    Vector3::z(),
                ));
            }
            Cap { positions, loops }
        },
    )
}

fn wrap(cap: &Cap) -> HoleWrapper {
    let mut wrapper = HoleWrapper::default();
    wrapper.wrap(&cap.positions, &cap.loops);
    wrapper
}

/// Whether every directed edge of the loops and faces is used once and paired.
fn is_closed_surface(loops: &[EdgeLoop], faces: &[StitchFace]) -> bool {
    let mut counts: HashMap<(usize, usize), usize> = HashMap::new();
    let loop_edges = loops.iter().flat_map(|l| l.edges());
    let face_edges = faces.iter().flat_map(|f| f.edges());
    for edge in loop_edges.chain(face_edges) {
        *counts.entry(edge).or_insert(0) += 1;
    }
    counts
        .iter()
        .all(|(&(a, b), &count)| count == 1 && counts.get(&(b, a)) == Some(&1))
}

// =============================================================================
// Property Tests: Caps
// =============================================================================

proptest! {
    /// A regular hole closes with n - 2 triangles over exactly its own vertices.
    #[test]
    fn proptest_cap_closes(cap in arb_cap()) {
        let n = cap.positions.len();
        let wrapper = wrap(&cap);

        prop_assert!(wrapper.finished());
        prop_assert!(wrapper.failed_edge_loops().is_empty());
        prop_assert_eq!(wrapper.triangle_count(), n - 2);

        let faces = wrapper.newly_generated_faces();
        let tags: BTreeSet<usize> = faces.iter().flat_map(|f| f.as_slice().to_vec()).collect();
        prop_assert_eq!(tags, (0..n).collect::<BTreeSet<_>>());
        prop_assert!(is_closed_surface(&cap.loops, faces));
    }

    /// Face normals of a cap agree with the loop normal.
    #[test]
    fn proptest_cap_faces_follow_loop_normal(cap in arb_cap()) {
        let wrapper = wrap(&cap);
        let expected = cap.loops[0].normal;
        for face in wrapper.newly_generated_faces() {
            let v = face.as_slice();
            let normal = mesh_stitch::triangle_normal(
                &cap.positions[v[0]],
                &cap.positions[v[1]],
                &cap.positions[v[2]],
            );
            prop_assert!(normal.dot(&expected) > 0.999, "face {:?} normal {:?}", face, normal);
        }
    }
}

// =============================================================================
// Property Tests: Tubes
// =============================================================================

proptest! {
    /// Aligned facing rims close into one quad per rim edge.
    #[test]
    fn proptest_tube_closes_into_quads(tube in arb_tube()) {
        let n = tube.loops[0].len();
        let wrapper = wrap(&tube);

        prop_assert!(wrapper.finished());
        prop_assert_eq!(wrapper.triangle_count(), 2 * n);

        let faces = wrapper.newly_generated_faces();
        prop_assert_eq!(faces.len(), n);
        prop_assert!(faces.iter().all(StitchFace::is_quad));
        prop_assert!(is_closed_surface(&tube.loops, faces));
    }

    /// Running the same request twice gives identical output.
    #[test]
    fn proptest_stitch_is_deterministic(tube in arb_tube()) {
        let mut first = HoleStitcher::new();
        let mut second = HoleStitcher::new();
        let a = first.stitch(&tube.positions, &tube.loops).unwrap();
        let b = second.stitch(&tube.positions, &tube.loops).unwrap();

        prop_assert_eq!(a, b);
        prop_assert_eq!(first.newly_generated_faces(), second.newly_generated_faces());
        prop_assert_eq!(first.failed_edge_loops(), second.failed_edge_loops());
    }

    /// Splitting quads never changes the triangle count of the front.
    #[test]
    fn proptest_triangles_only_matches_merged(tube in arb_tube()) {
        let merged = wrap(&tube);
        let mut split = HoleWrapper::new(StitchParams::triangles_only());
        split.wrap(&tube.positions, &tube.loops);

        prop_assert_eq!(split.newly_generated_faces().len(), merged.triangle_count());
        prop_assert!(split.newly_generated_faces().iter().all(|f| !f.is_quad()));
    }
}

// =============================================================================
// Property Tests: Failure Reporting
// =============================================================================

proptest! {
    /// Failed indices are ascending, unique, in range, and agree with finished().
    #[test]
    fn proptest_failed_loops_are_well_formed(squares in arb_scattered_squares()) {
        let wrapper = wrap(&squares);
        let failed = wrapper.failed_edge_loops();

        prop_assert!(failed.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(failed.iter().all(|&i| i < squares.loops.len()));
        prop_assert_eq!(wrapper.finished(), failed.is_empty());

        if squares.loops.len() == 1 {
            prop_assert!(failed.is_empty());
        }
    }
}

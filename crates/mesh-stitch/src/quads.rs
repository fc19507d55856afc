//! Pairwise merging of coplanar generated triangles into quads.

use hashbrown::HashSet;
use nalgebra::Vector3;

use crate::ledger::EdgeLedger;
use crate::types::{Face3, Face4};

/// Result of [`merge_coplanar_pairs`].
#[derive(Debug, Default)]
pub struct MergedFaces {
    /// Indices of triangles left unpaired, in generation order.
    pub triangles: Vec<usize>,

    /// Quads in the order they were formed.
    pub quads: Vec<Face4>,
}

/// Whether two normals agree per component within `tolerance`.
#[inline]
pub fn almost_equal(a: &Vector3<f64>, b: &Vector3<f64>, tolerance: f64) -> bool {
    (a.x - b.x).abs() <= tolerance
        && (a.y - b.y).abs() <= tolerance
        && (a.z - b.z).abs() <= tolerance
}

/// Merge each generated triangle with at most one coplanar neighbor.
///
/// Triangles are visited in generation order. A triangle looks across its
/// edges `(p1,p2)`, `(p2,p3)`, `(p3,p1)` for the generated face that owns the
/// reversed edge; the first unused one with an almost equal normal is merged
/// and both are consumed. Merges never chain.
///
/// The quad inserts the partner's opposite vertex between the shared edge's
/// endpoints, which keeps the triangle's winding.
pub fn merge_coplanar_pairs(faces: &[Face3], ledger: &EdgeLedger, tolerance: f64) -> MergedFaces {
    let mut used: HashSet<usize> = HashSet::with_capacity(faces.len());
    let mut merged = MergedFaces::default();

    for face in faces {
        if !used.insert(face.index) {
            continue;
        }
        match find_partner(face, faces, ledger, &used, tolerance) {
            Some((partner, quad)) => {
                used.insert(partner);
                merged.quads.push(quad);
            }
            None => merged.triangles.push(face.index),
        }
    }

    merged
}

fn find_partner(
    face: &Face3,
    faces: &[Face3],
    ledger: &EdgeLedger,
    used: &HashSet<usize>,
    tolerance: f64,
) -> Option<(usize, Face4)> {
    let indices = face.vertices();
    for i in 0..3 {
        let j = (i + 1) % 3;
        let k = (i + 2) % 3;
        let Some(entry) = ledger.get(indices[j], indices[i]) else {
            continue;
        };
        if !entry.generated || used.contains(&entry.face) {
            continue;
        }
        let partner = &faces[entry.face];
        if !almost_equal(&partner.normal, &face.normal, tolerance) {
            continue;
        }
        let Some(other) = partner.opposite_vertex(indices[j], indices[i]) else {
            continue;
        };
        let quad = Face4 {
            p1: indices[i],
            p2: other,
            p3: indices[j],
            p4: indices[k],
        };
        return Some((entry.face, quad));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face(index: usize, [p1, p2, p3]: [usize; 3], normal: Vector3<f64>) -> Face3 {
        Face3 {
            p1,
            p2,
            p3,
            normal,
            index,
        }
    }

    fn ledger_for(faces: &[Face3]) -> EdgeLedger {
        let mut ledger = EdgeLedger::new();
        for f in faces {
            ledger.insert_face(f.vertices(), f.index);
        }
        ledger
    }

    #[test]
    fn test_coplanar_pair_becomes_quad() {
        // Square 0-1-2-3 split along 0-2.
        let faces = vec![
            face(0, [0, 1, 2], Vector3::z()),
            face(1, [0, 2, 3], Vector3::z()),
        ];
        let ledger = ledger_for(&faces);

        let merged = merge_coplanar_pairs(&faces, &ledger, 0.01);

        assert!(merged.triangles.is_empty());
        assert_eq!(merged.quads.len(), 1);
        // Face 0 edge (2 -> 0) is shared: [2, 3, 0, 1]
        assert_eq!(merged.quads[0].vertices(), [2, 3, 0, 1]);
    }

    #[test]
    fn test_bent_pair_stays_triangles() {
        let faces = vec![
            face(0, [0, 1, 2], Vector3::z()),
            face(1, [0, 2, 3], Vector3::new(0.0, 0.1, 0.995)),
        ];
        let ledger = ledger_for(&faces);

        let merged = merge_coplanar_pairs(&faces, &ledger, 0.01);
        assert_eq!(merged.triangles, vec![0, 1]);
        assert!(merged.quads.is_empty());

        // A looser tolerance accepts them.
        let merged = merge_coplanar_pairs(&faces, &ledger, 0.2);
        assert_eq!(merged.quads.len(), 1);
    }

    #[test]
    fn test_merges_do_not_chain() {
        // A strip of three coplanar triangles: only one pair can merge.
        let faces = vec![
            face(0, [0, 1, 2], Vector3::z()),
            face(1, [0, 2, 3], Vector3::z()),
            face(2, [0, 3, 4], Vector3::z()),
        ];
        let ledger = ledger_for(&faces);

        let merged = merge_coplanar_pairs(&faces, &ledger, 0.01);
        assert_eq!(merged.quads.len(), 1);
        assert_eq!(merged.triangles, vec![2]);
    }

    #[test]
    fn test_boundary_entries_never_pair() {
        let faces = vec![face(0, [0, 1, 2], Vector3::z())];
        let mut ledger = EdgeLedger::new();
        ledger.insert_boundary(1, 0);
        ledger.insert_face(faces[0].vertices(), 0);

        let merged = merge_coplanar_pairs(&faces, &ledger, 0.01);
        assert_eq!(merged.triangles, vec![0]);
    }
}

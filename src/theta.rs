//! Theta: the trigonal twist parameter of an octahedron.
//!
//! Theta measures how far each of the eight triangular faces is twisted
//! against its antipodal face. The computation is a fixed four-stage
//! pipeline:
//!
//! 1. **Canonicalize** - relabel the ligands so that canonical slots
//!    (0, 3), (1, 4) and (2, 5) are the three trans pairs
//! 2. **Enumerate faces** - walk the eight faces in the order given by
//!    [`FACE_SCHEDULE`]
//! 3. **Measure** - for each face, fit its plane, project the metal and the
//!    three opposite ligands onto it and measure the six angles around the
//!    resulting hexagon
//! 4. **Reduce** - sum `|θ_i - 60°|` per face, then halve the total over all
//!    eight faces
//!
//! ```text
//!       1    8    6
//! Θ =  ---   Σ    Σ  |60 - θ_f,i|
//!       2   f=1  i=1
//! ```
//!
//! Each face and its antipode see the same hexagon, so the 48 measured
//! angles are summed and the total halved.
//!
//! Ref: M. Marchivie et al., Acta Cryst. B61, 25-28 (2005).

use crate::error::{DistortionError, Result};
use crate::geometry::{AtomPosition, OctahedralComplex, LIGAND_COUNT};
use crate::linear::{angle_within, signed_angle_within, Tolerances};
use crate::plane::{plane_from_three_points_within, project_onto_plane_within, PlaneEquation};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Number of triangular faces of an octahedron.
pub const FACE_COUNT: usize = 8;

/// Twist angle between adjacent hexagon edges of an undistorted octahedron.
pub const IDEAL_TWIST: f64 = 60.0;

/// The eight faces as triples of canonical slots.
///
/// The first four share slot 0, the last four share its trans partner, slot 3.
/// Within each half consecutive faces share an edge, and face `n + 4` is the
/// antipode of face `n`.
pub const FACE_SCHEDULE: [[usize; 3]; FACE_COUNT] = [
    [0, 1, 2],
    [0, 5, 1],
    [0, 4, 5],
    [0, 2, 4],
    [3, 4, 5],
    [3, 2, 4],
    [3, 1, 2],
    [3, 5, 1],
];

/// Hexagon walk over the six edge vectors: face vertices are 0..3, projected
/// opposite ligands 3..6.
const HEXAGON_WALK: [(usize, usize); 6] = [(0, 3), (3, 1), (1, 4), (4, 2), (2, 5), (5, 0)];

/// Canonical slot holding the trans partner of `slot`.
pub fn trans_slot(slot: usize) -> usize {
    (slot + 3) % LIGAND_COUNT
}

/// Opposite ligands of a face in hexagon order: the partner of the third
/// vertex lies between the first two after projection, and so on around.
pub fn opposite_slots(face: &[usize; 3]) -> [usize; 3] {
    [trans_slot(face[2]), trans_slot(face[0]), trans_slot(face[1])]
}

/// One triangular face together with its measured twist.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// Canonical slots of the three face vertices
    pub slots: [usize; 3],
    /// Input ligand indices (0-based) of the face vertices
    pub ligands: [usize; 3],
    /// Input ligand indices of the opposite face, in hexagon order
    pub opposite_ligands: [usize; 3],
    /// Face vertex positions
    pub vertices: [AtomPosition; 3],
    /// Plane through the face vertices
    pub plane: PlaneEquation,
    /// Metal centre projected onto the face plane
    pub projected_metal: AtomPosition,
    /// Opposite ligands projected onto the face plane, in hexagon order
    pub projected_opposite: [AtomPosition; 3],
    /// Six signed angles around the projected hexagon, degrees
    pub twist_angles: [f64; 6],
    /// `Σ |θ_i - 60°|` for this face
    pub theta: f64,
}

/// Secondary sums over the eight face contributions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThetaDiagnostics {
    /// Per-face contributions in schedule order
    pub face_theta: [f64; FACE_COUNT],
    /// Sum of the four smallest face contributions
    pub lower_half_sum: f64,
    /// Sum of the four largest face contributions
    pub upper_half_sum: f64,
    /// Sum over antipodal pairs (n, n + 4) of the smaller contribution
    pub antipodal_min_sum: f64,
    /// Sum over antipodal pairs (n, n + 4) of the larger contribution
    pub antipodal_max_sum: f64,
}

impl ThetaDiagnostics {
    fn from_faces(face_theta: [f64; FACE_COUNT]) -> Self {
        let mut sorted = face_theta;
        sorted.sort_by(|a, b| a.total_cmp(b));
        let half = FACE_COUNT / 2;

        let (mut antipodal_min_sum, mut antipodal_max_sum) = (0.0, 0.0);
        for n in 0..half {
            let (a, b) = (face_theta[n], face_theta[n + half]);
            antipodal_min_sum += a.min(b);
            antipodal_max_sum += a.max(b);
        }

        Self {
            face_theta,
            lower_half_sum: sorted[..half].iter().sum(),
            upper_half_sum: sorted[half..].iter().sum(),
            antipodal_min_sum,
            antipodal_max_sum,
        }
    }
}

/// Result of the Theta pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ThetaResult {
    /// The Theta parameter in degrees
    pub theta: f64,
    /// Input ligand index (0-based) held by each canonical slot
    pub canonical_order: [usize; LIGAND_COUNT],
    /// The eight faces in schedule order
    pub faces: Vec<Face>,
    /// Secondary sums
    pub diagnostics: ThetaDiagnostics,
}

/// Relabel the ligands so that slots (0, 3), (1, 4), (2, 5) are trans pairs.
///
/// Returns, for each canonical slot, the index of the input ligand placed
/// there. For slot k = 0, 1, 2 the ligand making the largest angle at the
/// metal with the slot-k ligand is swapped into slot k + 3. Feeding a
/// canonical order back in returns the identity permutation.
///
/// # Errors
///
/// Returns [`DistortionError::InputShape`] unless six ligands are given and
/// [`DistortionError::DegenerateVector`] if a ligand coincides with the metal.
pub fn canonicalize(
    metal: &AtomPosition,
    ligands: &[AtomPosition],
    tolerances: &Tolerances,
) -> Result<[usize; LIGAND_COUNT]> {
    if ligands.len() != LIGAND_COUNT {
        return Err(DistortionError::InputShape {
            expected: LIGAND_COUNT,
            found: ligands.len(),
        });
    }

    let vectors: Vec<AtomPosition> = ligands.iter().map(|l| l - metal).collect();
    let mut order = [0, 1, 2, 3, 4, 5];

    for slot in 0..3 {
        let target = trans_slot(slot);
        let partner = trans_partner(&vectors, &order, slot, tolerances.vector)?;
        if partner <= slot || (3..target).contains(&partner) {
            warn!(
                "Trans partner of ligand {} found in already assigned slot {}; canonical order may be meaningless",
                order[slot] + 1,
                partner
            );
        }
        order.swap(target, partner);
    }

    debug!(
        "Canonical ligand order: {:?}",
        order.iter().map(|i| i + 1).collect::<Vec<_>>()
    );
    Ok(order)
}

/// Slot whose ligand makes the largest angle with the ligand in `slot`.
fn trans_partner(
    vectors: &[AtomPosition],
    order: &[usize; LIGAND_COUNT],
    slot: usize,
    tolerance: f64,
) -> Result<usize> {
    let reference = &vectors[order[slot]];
    let mut best = (slot, 0.0);
    for (candidate, &ligand) in order.iter().enumerate() {
        let angle = angle_within(reference, &vectors[ligand], tolerance)?;
        if angle > best.1 {
            best = (candidate, angle);
        }
    }
    Ok(best.0)
}

/// Measure one face of a canonically ordered octahedron.
fn measure_face(
    metal: &AtomPosition,
    ligands: &[AtomPosition],
    order: &[usize; LIGAND_COUNT],
    slots: [usize; 3],
    tolerances: &Tolerances,
) -> Result<Face> {
    let at = |slot: usize| ligands[order[slot]];
    let opposite = opposite_slots(&slots);
    let vertices = [at(slots[0]), at(slots[1]), at(slots[2])];

    let plane =
        plane_from_three_points_within(&vertices[0], &vertices[1], &vertices[2], tolerances.plane)?;
    let project = |point: &AtomPosition| project_onto_plane_within(point, &plane, tolerances.plane);
    let projected_metal = project(metal)?;
    let projected_opposite = [
        project(&at(opposite[0]))?,
        project(&at(opposite[1]))?,
        project(&at(opposite[2]))?,
    ];

    let edges = [
        vertices[0] - projected_metal,
        vertices[1] - projected_metal,
        vertices[2] - projected_metal,
        projected_opposite[0] - projected_metal,
        projected_opposite[1] - projected_metal,
        projected_opposite[2] - projected_metal,
    ];

    // Orient the walk by whichever neighbour of the first vertex is closer in angle
    let a12 = angle_within(&edges[0], &edges[1], tolerances.vector)?;
    let a13 = angle_within(&edges[0], &edges[2], tolerances.vector)?;
    let reference = if a12 < a13 {
        edges[0].cross(&edges[1])
    } else {
        edges[2].cross(&edges[0])
    };

    let mut twist_angles = [0.0; 6];
    for (twist, &(from, to)) in twist_angles.iter_mut().zip(HEXAGON_WALK.iter()) {
        *twist = signed_angle_within(&edges[from], &edges[to], &reference, tolerances.vector)?;
    }
    let theta = twist_angles.iter().map(|t| (t - IDEAL_TWIST).abs()).sum();

    Ok(Face {
        slots,
        ligands: slots.map(|s| order[s]),
        opposite_ligands: opposite.map(|s| order[s]),
        vertices,
        plane,
        projected_metal,
        projected_opposite,
        twist_angles,
        theta,
    })
}

/// Run the full Theta pipeline with default tolerances.
///
/// # Examples
///
/// ```
/// use octadist::OctahedralComplex;
/// use octadist::theta::compute_theta;
///
/// let complex = OctahedralComplex::from_coords(&[
///     [0.0, 0.0, 0.0],
///     [1.0, 0.0, 0.0],
///     [-1.0, 0.0, 0.0],
///     [0.0, 1.0, 0.0],
///     [0.0, -1.0, 0.0],
///     [0.0, 0.0, 1.0],
///     [0.0, 0.0, -1.0],
/// ])?;
/// let result = compute_theta(&complex)?;
/// assert!(result.theta.abs() < 1e-6);
/// assert_eq!(result.faces.len(), 8);
/// # Ok::<(), octadist::DistortionError>(())
/// ```
pub fn compute_theta(complex: &OctahedralComplex) -> Result<ThetaResult> {
    compute_theta_with(complex, &Tolerances::default())
}

/// Run the full Theta pipeline.
///
/// # Errors
///
/// - [`DistortionError::DegenerateVector`] if the metal coincides with a
///   ligand or a projected edge vector has zero length
/// - [`DistortionError::DegeneratePlane`] if three face vertices are collinear
pub fn compute_theta_with(
    complex: &OctahedralComplex,
    tolerances: &Tolerances,
) -> Result<ThetaResult> {
    let metal = complex.metal();
    let ligands = complex.ligands();
    let canonical_order = canonicalize(metal, ligands, tolerances)?;

    let mut faces = Vec::with_capacity(FACE_COUNT);
    for slots in FACE_SCHEDULE {
        let face = measure_face(metal, ligands, &canonical_order, slots, tolerances)?;
        debug!(
            "Face {:?}: twist angles {:.3?}, contribution {:.4}",
            face.ligands.map(|i| i + 1),
            face.twist_angles,
            face.theta
        );
        faces.push(face);
    }

    let mut face_theta = [0.0; FACE_COUNT];
    for (slot, face) in face_theta.iter_mut().zip(&faces) {
        *slot = face.theta;
    }
    let theta = face_theta.iter().sum::<f64>() / 2.0;

    Ok(ThetaResult {
        theta,
        canonical_order,
        faces,
        diagnostics: ThetaDiagnostics::from_faces(face_theta),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;
    use std::collections::HashSet;

    fn regular() -> OctahedralComplex {
        OctahedralComplex::from_coords(&[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, -1.0],
        ])
        .unwrap()
    }

    /// Octahedron viewed down a C3 axis with the lower triangle twisted by
    /// `twist` degrees. Ligands 1-3 form the upper face, ligand i + 3 is the
    /// one opposite ligand i.
    fn twisted(twist: f64) -> OctahedralComplex {
        let h = 1.0 / 3.0f64.sqrt();
        let r = (2.0f64 / 3.0).sqrt();
        let point = |azimuth: f64, z: f64| {
            let a = azimuth.to_radians();
            Vector3::new(r * a.cos(), r * a.sin(), z)
        };
        OctahedralComplex::new(vec![
            Vector3::zeros(),
            point(0.0, h),
            point(120.0, h),
            point(240.0, h),
            point(180.0 + twist, -h),
            point(300.0 + twist, -h),
            point(60.0 + twist, -h),
        ])
        .unwrap()
    }

    #[test]
    fn test_schedule_faces_are_distinct_and_cis() {
        let mut seen = HashSet::new();
        for face in FACE_SCHEDULE {
            let mut key = face;
            key.sort();
            assert!(seen.insert(key), "face {:?} scheduled twice", face);
            for &a in &face {
                for &b in &face {
                    assert_ne!(trans_slot(a), b, "face {:?} contains a trans pair", face);
                }
            }
        }
        assert_eq!(seen.len(), FACE_COUNT);
    }

    #[test]
    fn test_schedule_antipodes() {
        for n in 0..4 {
            let mut expected = FACE_SCHEDULE[n].map(trans_slot);
            let mut actual = FACE_SCHEDULE[n + 4];
            expected.sort();
            actual.sort();
            assert_eq!(expected, actual, "face {} is not antipodal to face {}", n + 4, n);
        }
    }

    #[test]
    fn test_canonicalize_pairs_trans_ligands() {
        // Ligands listed so that no trans pair lands in (k, k + 3)
        let ligands = [
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(-1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(0.0, -1.0, 0.0),
            Vector3::new(0.0, 0.0, -1.0),
        ];
        let order = canonicalize(&Vector3::zeros(), &ligands, &Tolerances::default()).unwrap();

        let mut used: Vec<usize> = order.to_vec();
        used.sort();
        assert_eq!(used, vec![0, 1, 2, 3, 4, 5]);
        for k in 0..3 {
            let sum = ligands[order[k]] + ligands[order[k + 3]];
            assert!(sum.norm() < 1e-12, "slots {} and {} are not trans", k, k + 3);
        }
    }

    #[test]
    fn test_canonicalize_idempotent() {
        let c = regular();
        let tol = Tolerances::default();
        let order = canonicalize(c.metal(), c.ligands(), &tol).unwrap();
        let reordered: Vec<AtomPosition> = order.iter().map(|&i| c.ligands()[i]).collect();
        let again = canonicalize(c.metal(), &reordered, &tol).unwrap();
        assert_eq!(again, [0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_canonicalize_partner_in_assigned_slot() {
        // Ligand 2 leans so far over that its widest angle is with ligand 1,
        // which slot 0 already holds; the global maximum still wins
        let ligands = [
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(-0.995, 0.1, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(-1.0, 0.0, 0.0),
            Vector3::new(0.0, -1.0, 0.0),
            Vector3::new(0.0, 0.0, -1.0),
        ];
        let order = canonicalize(&Vector3::zeros(), &ligands, &Tolerances::default()).unwrap();
        assert_eq!(order, [4, 1, 2, 3, 0, 5]);
    }

    #[test]
    fn test_small_complex_with_permissive_tolerances() {
        let scale = 1e-6;
        let complex = OctahedralComplex::new(
            regular().positions().iter().map(|p| p * scale).collect(),
        )
        .unwrap();
        let tolerances = Tolerances {
            vector: 1e-30,
            plane: 1e-30,
        };

        let result = compute_theta_with(&complex, &tolerances).unwrap();
        assert!(result.theta.abs() < 1e-6, "theta = {}", result.theta);
        assert!(matches!(
            compute_theta(&complex),
            Err(DistortionError::DegeneratePlane(_))
        ));
    }

    #[test]
    fn test_canonicalize_wrong_count() {
        let ligands = [Vector3::new(1.0, 0.0, 0.0); 5];
        assert!(matches!(
            canonicalize(&Vector3::zeros(), &ligands, &Tolerances::default()),
            Err(DistortionError::InputShape { expected: 6, found: 5 })
        ));
    }

    #[test]
    fn test_regular_octahedron_has_zero_theta() {
        let result = compute_theta(&regular()).unwrap();
        assert!(result.theta.abs() < 1e-6, "theta = {}", result.theta);
        for face in &result.faces {
            for t in face.twist_angles {
                assert!((t - 60.0).abs() < 1e-6, "twist angle {} on face {:?}", t, face.ligands);
            }
        }
    }

    #[test]
    fn test_faces_expose_planes_and_projections() {
        let result = compute_theta(&regular()).unwrap();
        for face in &result.faces {
            for v in &face.vertices {
                assert!(face.plane.evaluate(v).abs() < 1e-12);
            }
            assert!(face.plane.evaluate(&face.projected_metal).abs() < 1e-12);
            for p in &face.projected_opposite {
                assert!(face.plane.evaluate(p).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_twisted_octahedron() {
        let result = compute_theta(&twisted(10.0)).unwrap();
        assert_eq!(result.canonical_order, [0, 1, 2, 3, 4, 5]);

        // The two faces normal to the twist axis alternate 60 ± 10
        for n in [0, 4] {
            assert!(
                (result.faces[n].theta - 60.0).abs() < 1e-9,
                "face {} contribution {}",
                n,
                result.faces[n].theta
            );
        }
        assert!(result.theta >= 60.0 - 1e-9);

        let untwisted = compute_theta(&twisted(0.0)).unwrap();
        assert!(untwisted.theta.abs() < 1e-6);
    }

    #[test]
    fn test_diagnostics_partition() {
        let result = compute_theta(&twisted(15.0)).unwrap();
        let d = result.diagnostics;
        let total: f64 = d.face_theta.iter().sum();
        assert!((d.lower_half_sum + d.upper_half_sum - total).abs() < 1e-9);
        assert!((d.antipodal_min_sum + d.antipodal_max_sum - total).abs() < 1e-9);
        assert!(d.lower_half_sum <= d.antipodal_min_sum + 1e-9);
        assert!((result.theta - total / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_collinear_face_rejected() {
        // Three ligands on one line through the metal plane
        let complex = OctahedralComplex::from_coords(&[
            [0.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [2.0, 2.0, 0.0],
            [3.0, 3.0, 0.0],
            [-1.0, -1.5, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, -1.0],
        ])
        .unwrap();
        assert!(matches!(
            compute_theta(&complex),
            Err(DistortionError::DegeneratePlane(_))
        ));
    }
}

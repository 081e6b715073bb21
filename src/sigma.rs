//! Ligand-metal-ligand angles and the Sigma parameter.
//!
//! The 15 angles at the metal are sorted; the three largest are taken as the
//! trans angles and the remaining twelve as cis angles. For a sensible
//! octahedron the trans angles sit near 180° and the cis angles near 90°, so
//! the split needs no connectivity information.

use crate::error::Result;
use crate::geometry::{OctahedralComplex, LIGAND_COUNT};
use crate::linear::{angle_within, VECTOR_TOLERANCE};
use log::warn;
use serde::{Deserialize, Serialize};

/// Number of distinct ligand pairs.
pub const PAIR_COUNT: usize = 15;
/// Number of cis angles in an octahedron.
pub const CIS_COUNT: usize = 12;
/// Number of trans angles in an octahedron.
pub const TRANS_COUNT: usize = 3;

/// Ligand index pairs (0-based, i < j) in the order angles are generated.
pub const LIGAND_PAIRS: [(usize, usize); PAIR_COUNT] = [
    (0, 1),
    (0, 2),
    (0, 3),
    (0, 4),
    (0, 5),
    (1, 2),
    (1, 3),
    (1, 4),
    (1, 5),
    (2, 3),
    (2, 4),
    (2, 5),
    (3, 4),
    (3, 5),
    (4, 5),
];

/// All ligand-metal-ligand angles of a complex, in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleSet {
    /// Angle for each entry of [`LIGAND_PAIRS`], unsorted
    pub pair_angles: [f64; PAIR_COUNT],
    /// The twelve smallest angles, ascending
    pub cis: [f64; CIS_COUNT],
    /// The three largest angles, ascending
    pub trans: [f64; TRANS_COUNT],
}

impl AngleSet {
    /// Largest cis angle.
    pub fn max_cis(&self) -> f64 {
        self.cis[CIS_COUNT - 1]
    }

    /// Smallest trans angle.
    pub fn min_trans(&self) -> f64 {
        self.trans[0]
    }
}

/// Compute and partition the 15 angles at the metal.
///
/// # Errors
///
/// Returns [`DistortionError::DegenerateVector`](crate::DistortionError::DegenerateVector)
/// if any ligand coincides with the metal.
pub fn bond_angles(complex: &OctahedralComplex) -> Result<AngleSet> {
    bond_angles_within(complex, VECTOR_TOLERANCE)
}

/// [`bond_angles`] with an explicit zero-length tolerance.
pub fn bond_angles_within(complex: &OctahedralComplex, tolerance: f64) -> Result<AngleSet> {
    let metal = complex.metal();
    let vectors: Vec<_> = complex.ligands().iter().map(|l| l - metal).collect();
    debug_assert_eq!(vectors.len(), LIGAND_COUNT);

    let mut pair_angles = [0.0; PAIR_COUNT];
    for (slot, &(i, j)) in pair_angles.iter_mut().zip(LIGAND_PAIRS.iter()) {
        *slot = angle_within(&vectors[i], &vectors[j], tolerance)?;
    }

    let mut sorted = pair_angles;
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mut cis = [0.0; CIS_COUNT];
    cis.copy_from_slice(&sorted[..CIS_COUNT]);
    let mut trans = [0.0; TRANS_COUNT];
    trans.copy_from_slice(&sorted[CIS_COUNT..]);

    let set = AngleSet {
        pair_angles,
        cis,
        trans,
    };
    if set.min_trans() - set.max_cis() < 1.0 {
        warn!(
            "Cis/trans angle split is ambiguous: largest cis {:.3}°, smallest trans {:.3}°",
            set.max_cis(),
            set.min_trans()
        );
    }
    Ok(set)
}

/// Sigma: sum of absolute deviations of the twelve cis angles from 90°.
///
/// ```text
///      12
/// Σ = Σ |90 - φ_i|
///     i=1
/// ```
///
/// Ref: J. K. McCusker et al., Inorg. Chem. 35, 2100 (1996).
pub fn sigma(angles: &AngleSet) -> f64 {
    angles.cis.iter().map(|a| (90.0 - a).abs()).sum()
}

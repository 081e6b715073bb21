//! Metal-ligand bond metrics: individual distances, mean, Zeta and Delta.

use crate::error::{DistortionError, Result};
use crate::geometry::{OctahedralComplex, LIGAND_COUNT};
use crate::linear::distance;

/// The six metal-ligand distances in Angstroms, index-aligned to the ligands.
pub type BondSet = [f64; LIGAND_COUNT];

/// Metal-ligand distance for each ligand, in input order.
pub fn bond_distances(complex: &OctahedralComplex) -> BondSet {
    let metal = complex.metal();
    let mut bonds = [0.0; LIGAND_COUNT];
    for (bond, ligand) in bonds.iter_mut().zip(complex.ligands()) {
        *bond = distance(metal, ligand);
    }
    bonds
}

/// Arithmetic mean of the six bond distances.
pub fn mean_bond_distance(bonds: &BondSet) -> f64 {
    bonds.iter().sum::<f64>() / LIGAND_COUNT as f64
}

/// Zeta: sum of absolute deviations of the bond lengths from their mean.
///
/// ```text
///      6
/// ζ = Σ |d_i - d_mean|
///     i=1
/// ```
///
/// Ref: M. Buron-Le Cointe et al., Phys. Rev. B 85, 064114 (2012).
pub fn zeta(bonds: &BondSet) -> f64 {
    let d_mean = mean_bond_distance(bonds);
    bonds.iter().map(|d| (d - d_mean).abs()).sum()
}

/// Delta: mean squared relative deviation of the bond lengths (dimensionless).
///
/// ```text
///      1   6  ⎛ d_i - d_mean ⎞²
/// Δ = ─── Σ  ⎜ ──────────── ⎟
///      6  i=1 ⎝    d_mean    ⎠
/// ```
///
/// Ref: M. W. Lufaso and P. M. Woodward, Acta Cryst. B60, 10-20 (2004).
///
/// # Errors
///
/// Returns [`DistortionError::DegenerateVector`] when the mean bond length is
/// zero, i.e. every ligand sits on the metal.
pub fn delta(bonds: &BondSet) -> Result<f64> {
    let d_mean = mean_bond_distance(bonds);
    if d_mean == 0.0 {
        return Err(DistortionError::DegenerateVector(
            "mean bond distance is zero".to_string(),
        ));
    }

    Ok(bonds
        .iter()
        .map(|d| {
            let rel = (d - d_mean) / d_mean;
            rel * rel
        })
        .sum::<f64>()
        / LIGAND_COUNT as f64)
}

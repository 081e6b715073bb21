//! One-call computation of every distortion parameter.
//!
//! [`calc_all`] runs the bond, angle and Theta stages on a single complex and
//! gathers the scalar parameters together with the intermediate geometry
//! that plotting and diagnostics consumers need. [`calc_all_labeled`] is the
//! entry point for callers holding atom labels next to raw coordinates.

use crate::bond::{bond_distances, delta, mean_bond_distance, zeta, BondSet};
use crate::error::{DistortionError, Result};
use crate::geometry::{OctahedralComplex, LIGAND_COUNT};
use crate::linear::Tolerances;
use crate::sigma::{bond_angles_within, sigma, CIS_COUNT, TRANS_COUNT};
use crate::theta::{compute_theta_with, Face, ThetaDiagnostics};
use log::debug;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// The five scalar distortion parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistortionParameters {
    /// Mean metal-ligand distance, Angstrom
    pub mean_bond_distance: f64,
    /// Sum of absolute bond-length deviations, Angstrom
    pub zeta: f64,
    /// Mean squared relative bond-length deviation, dimensionless
    pub delta: f64,
    /// Sum of cis-angle deviations from 90°, degrees
    pub sigma: f64,
    /// Sum of face twist deviations from 60°, degrees
    pub theta: f64,
}

/// Parameters plus the intermediate quantities they were derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct DistortionAnalysis {
    /// The five scalar parameters
    pub parameters: DistortionParameters,
    /// Metal-ligand distances in input ligand order
    pub bond_distances: BondSet,
    /// The twelve cis angles, ascending
    pub cis_angles: [f64; CIS_COUNT],
    /// The three trans angles, ascending
    pub trans_angles: [f64; TRANS_COUNT],
    /// Input ligand index (0-based) held by each canonical slot
    pub canonical_ligand_order: [usize; LIGAND_COUNT],
    /// Ligand labels in canonical order
    pub canonical_labels: Vec<String>,
    /// The eight faces in schedule order
    pub faces: Vec<Face>,
    /// Secondary Theta sums
    pub theta_diagnostics: ThetaDiagnostics,
}

/// Compute all distortion parameters with default tolerances.
///
/// # Examples
///
/// ```
/// use octadist::{calc_all, OctahedralComplex};
///
/// let complex = OctahedralComplex::from_coords(&[
///     [2.298354, 5.161785, 7.971898],
///     [1.885657, 4.804777, 6.183726],
///     [1.747515, 6.960963, 7.932784],
///     [4.094380, 5.807257, 7.588689],
///     [0.539005, 4.482809, 8.460004],
///     [2.812425, 3.266553, 8.131637],
///     [2.886404, 5.392925, 9.848966],
/// ])?;
/// let analysis = calc_all(&complex)?;
/// let p = analysis.parameters;
/// assert!(p.mean_bond_distance > 1.8 && p.mean_bond_distance < 2.2);
/// assert!(p.zeta > 0.0 && p.sigma > 0.0 && p.theta > 0.0);
/// # Ok::<(), octadist::DistortionError>(())
/// ```
pub fn calc_all(complex: &OctahedralComplex) -> Result<DistortionAnalysis> {
    calc_all_with(complex, &Tolerances::default())
}

/// Compute all distortion parameters.
///
/// # Errors
///
/// Propagates the first failure of any stage; no partial result is returned.
pub fn calc_all_with(
    complex: &OctahedralComplex,
    tolerances: &Tolerances,
) -> Result<DistortionAnalysis> {
    let bonds = bond_distances(complex);
    let d_mean = mean_bond_distance(&bonds);
    let zeta = zeta(&bonds);
    let delta = delta(&bonds)?;
    debug!(
        "Bonds {:.4?}: mean {:.6}, zeta {:.6}, delta {:.6e}",
        bonds, d_mean, zeta, delta
    );

    let angles = bond_angles_within(complex, tolerances.vector)?;
    let sigma = sigma(&angles);
    debug!("Sigma {:.4} (largest cis angle {:.3})", sigma, angles.max_cis());

    let theta = compute_theta_with(complex, tolerances)?;
    debug!("Theta {:.4}", theta.theta);

    let ligand_labels = complex.ligand_labels();
    let canonical_labels = theta
        .canonical_order
        .iter()
        .map(|&i| ligand_labels[i].clone())
        .collect();

    Ok(DistortionAnalysis {
        parameters: DistortionParameters {
            mean_bond_distance: d_mean,
            zeta,
            delta,
            sigma,
            theta: theta.theta,
        },
        bond_distances: bonds,
        cis_angles: angles.cis,
        trans_angles: angles.trans,
        canonical_ligand_order: theta.canonical_order,
        canonical_labels,
        faces: theta.faces,
        theta_diagnostics: theta.diagnostics,
    })
}

/// Compute all parameters from parallel label and coordinate lists.
///
/// The labels ride along for display only: the computation is identical to
/// [`calc_all`], and the canonical ligand labels are re-attached afterwards.
///
/// # Errors
///
/// Returns [`DistortionError::InputShape`] if the two lists differ in length
/// or do not hold seven entries.
pub fn calc_all_labeled<S: AsRef<str>>(
    labels: &[S],
    coords: &[[f64; 3]],
) -> Result<DistortionAnalysis> {
    if labels.len() != coords.len() {
        return Err(DistortionError::InputShape {
            expected: coords.len(),
            found: labels.len(),
        });
    }
    let complex = OctahedralComplex::with_labels(
        labels.iter().map(|l| l.as_ref().to_string()).collect(),
        coords.iter().map(|c| Vector3::from(*c)).collect(),
    )?;
    calc_all(&complex)
}

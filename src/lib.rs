#![deny(missing_docs)]

//! octadist - Octahedral Distortion Parameters
//!
//! octadist quantifies how far a six-coordinate metal complex deviates from
//! an ideal octahedron. Given the metal centre and its six donor atoms it
//! computes the standard scalar distortion parameters used in coordination
//! chemistry and spin-crossover studies.
//!
//! # Parameters
//!
//! | Parameter | Unit | Meaning |
//! |-----------|------|---------|
//! | mean distance | Å | Average of the six metal-ligand bond lengths |
//! | Zeta | Å | Sum of absolute bond-length deviations from the mean |
//! | Delta | - | Mean squared relative bond-length deviation |
//! | Sigma | ° | Sum of the twelve cis-angle deviations from 90° |
//! | Theta | ° | Trigonal twist deviation from 60°, summed over the eight faces and halved |
//!
//! All parameters are zero for a perfect octahedron and invariant under rigid
//! rotation and translation of the complex.
//!
//! # Theta
//!
//! Theta needs a fixed ligand labelling. The six ligands are first put in a
//! canonical order where slots (0, 3), (1, 4) and (2, 5) hold the three trans
//! pairs. Each of the eight faces is then paired with its opposite face, both
//! are projected onto the face plane, and the six signed angles between
//! adjacent projected vertices are compared against 60°.
//!
//! # Quick Start
//!
//! ```
//! use octadist::{calc_all, OctahedralComplex};
//!
//! let complex = OctahedralComplex::from_coords(&[
//!     [0.0, 0.0, 0.0],
//!     [2.0, 0.0, 0.0],
//!     [0.0, 2.0, 0.0],
//!     [0.0, 0.0, 2.0],
//!     [-2.0, 0.0, 0.0],
//!     [0.0, -2.0, 0.0],
//!     [0.0, 0.0, -2.0],
//! ])?;
//! let analysis = calc_all(&complex)?;
//! assert!((analysis.parameters.mean_bond_distance - 2.0).abs() < 1e-12);
//! assert!(analysis.parameters.theta.abs() < 1e-9);
//! # Ok::<(), octadist::DistortionError>(())
//! ```
//!
//! Larger structures go through [`Geometry`] and
//! [`OctahedralComplex::extract`], which picks the metal and its six nearest
//! neighbours. Degeneracy thresholds come from [`Tolerances`], which
//! [`settings::SettingsManager`] can load from an INI file.
//!
//! # Modules
//!
//! - [`geometry`](geometry/index.html) - Complex and structure data types
//! - [`linear`](linear/index.html) - Distances and angles
//! - [`plane`](plane/index.html) - Planes and projection
//! - [`bond`](bond/index.html) - Mean distance, Zeta, Delta
//! - [`sigma`](sigma/index.html) - Bond angles and Sigma
//! - [`theta`](theta/index.html) - Canonical order, faces, Theta
//! - [`calc`](calc/index.html) - All parameters in one call
//! - [`report`](report/index.html) - JSON reports and summaries
//! - [`settings`](settings/index.html) - Configuration and logging
//!
//! # References
//!
//! - Ketkaew, R.; Tantirungrotechai, Y.; Harding, P.; Chastanet, G.;
//!   Guionneau, P.; Marchivie, M.; Harding, D. J.
//!   *Dalton Trans.* **2021**, 50, 1086-1096.
//!   [DOI: 10.1039/D0DT03988H](https://doi.org/10.1039/D0DT03988H)
//! - Buron-Le Cointe, M.; Hébert, J.; Baldé, C.; Moisan, N.; Toupet, L.;
//!   Guionneau, P.; Létard, J. F.; Freysz, E.; Cailleau, H.; Collet, E.
//!   *Phys. Rev. B* **2012**, 85, 064114.

pub mod bond;
pub mod calc;
pub mod elements;
pub mod error;
pub mod geometry;
pub mod linear;
pub mod plane;
pub mod report;
pub mod settings;
pub mod sigma;
pub mod theta;

pub use calc::{calc_all, calc_all_labeled, calc_all_with, DistortionAnalysis, DistortionParameters};
pub use error::{DistortionError, Result};
pub use geometry::{AtomPosition, Geometry, OctahedralComplex};
pub use linear::Tolerances;

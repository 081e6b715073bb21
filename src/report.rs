//! Persistable distortion reports.
//!
//! A [`DistortionReport`] bundles the input complex with everything
//! [`calc_all`](crate::calc_all) derived from it, in a form serde can write.
//! `nalgebra` vectors do not serialize on their own, so positions are stored
//! as plain `[f64; 3]` arrays.
//!
//! # Usage
//!
//! ```no_run
//! use octadist::report::DistortionReport;
//! use octadist::settings::SettingsManager;
//! use octadist::{calc_all, OctahedralComplex};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let complex = OctahedralComplex::from_coords(&[
//!     [2.298354, 5.161785, 7.971898],
//!     [1.885657, 4.804777, 6.183726],
//!     [1.747515, 6.960963, 7.932784],
//!     [4.094380, 5.807257, 7.588689],
//!     [0.539005, 4.482809, 8.460004],
//!     [2.812425, 3.266553, 8.131637],
//!     [2.886404, 5.392925, 9.848966],
//! ])?;
//! let analysis = calc_all(&complex)?;
//! let report = DistortionReport::new(&complex, &analysis);
//!
//! let settings = SettingsManager::load()?;
//! report.save_with(Path::new("complex.json"), settings.output())?;
//! println!("{}", report.summary_with(settings.output()));
//! # Ok(())
//! # }
//! ```

use crate::calc::{DistortionAnalysis, DistortionParameters};
use crate::geometry::OctahedralComplex;
use crate::plane::PlaneEquation;
use crate::settings::OutputSettings;
use crate::theta::ThetaDiagnostics;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while saving or loading a report.
#[derive(Error, Debug)]
pub enum ReportError {
    /// File could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Report JSON could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serializable view of one octahedral face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceRecord {
    /// Input ligand indices (0-based) of the face vertices
    pub ligands: [usize; 3],
    /// Input ligand indices of the opposite face, in hexagon order
    pub opposite_ligands: [usize; 3],
    /// Face vertex positions
    pub vertices: [[f64; 3]; 3],
    /// Plane through the face vertices
    pub plane: PlaneEquation,
    /// Metal centre projected onto the face plane
    pub projected_metal: [f64; 3],
    /// Opposite ligands projected onto the face plane
    pub projected_opposite: [[f64; 3]; 3],
    /// Six signed twist angles, degrees
    pub twist_angles: [f64; 6],
    /// Face contribution to Theta before halving
    pub theta: f64,
}

/// A complex and its computed distortion parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistortionReport {
    /// Atom labels, metal first
    pub labels: Vec<String>,
    /// Atom coordinates, metal first
    pub coords: Vec<[f64; 3]>,
    /// The five scalar parameters
    pub parameters: DistortionParameters,
    /// Metal-ligand distances in input ligand order
    pub bond_distances: Vec<f64>,
    /// The twelve cis angles, ascending
    pub cis_angles: Vec<f64>,
    /// The three trans angles, ascending
    pub trans_angles: Vec<f64>,
    /// Input ligand index held by each canonical slot
    pub canonical_ligand_order: Vec<usize>,
    /// Ligand labels in canonical order
    pub canonical_labels: Vec<String>,
    /// The eight faces in schedule order
    pub faces: Vec<FaceRecord>,
    /// Secondary Theta sums
    pub theta_diagnostics: ThetaDiagnostics,
}

fn to_array(v: &Vector3<f64>) -> [f64; 3] {
    [v.x, v.y, v.z]
}

impl DistortionReport {
    /// Bundle a complex with its analysis.
    pub fn new(complex: &OctahedralComplex, analysis: &DistortionAnalysis) -> Self {
        let faces = analysis
            .faces
            .iter()
            .map(|face| FaceRecord {
                ligands: face.ligands,
                opposite_ligands: face.opposite_ligands,
                vertices: face.vertices.map(|v| to_array(&v)),
                plane: face.plane,
                projected_metal: to_array(&face.projected_metal),
                projected_opposite: face.projected_opposite.map(|v| to_array(&v)),
                twist_angles: face.twist_angles,
                theta: face.theta,
            })
            .collect();

        Self {
            labels: complex.labels().to_vec(),
            coords: complex.positions().iter().map(to_array).collect(),
            parameters: analysis.parameters,
            bond_distances: analysis.bond_distances.to_vec(),
            cis_angles: analysis.cis_angles.to_vec(),
            trans_angles: analysis.trans_angles.to_vec(),
            canonical_ligand_order: analysis.canonical_ligand_order.to_vec(),
            canonical_labels: analysis.canonical_labels.clone(),
            faces,
            theta_diagnostics: analysis.theta_diagnostics,
        }
    }

    /// Encode as JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String, ReportError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Write the report to a JSON file.
    pub fn save(&self, path: &Path, pretty: bool) -> Result<(), ReportError> {
        fs::write(path, self.to_json(pretty)?)?;
        Ok(())
    }

    /// [`save`](Self::save) using the `[output]` settings.
    pub fn save_with(&self, path: &Path, output: &OutputSettings) -> Result<(), ReportError> {
        self.save(path, output.pretty_json)
    }

    /// Read a report back from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ReportError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Fixed-precision text summary of the parameters and canonical order.
    pub fn summary(&self, precision: usize) -> String {
        let p = &self.parameters;
        let mut out = String::new();
        let metal = self.labels.first().map(String::as_str).unwrap_or("M");
        let _ = writeln!(out, "Octahedral distortion parameters ({} centre)", metal);
        let _ = writeln!(out, "  Mean distance : {:.*} Å", precision, p.mean_bond_distance);
        let _ = writeln!(out, "  Zeta          : {:.*} Å", precision, p.zeta);
        let _ = writeln!(out, "  Delta         : {:.*}", precision, p.delta);
        let _ = writeln!(out, "  Sigma         : {:.*}°", precision, p.sigma);
        let _ = writeln!(out, "  Theta         : {:.*}°", precision, p.theta);
        let _ = writeln!(
            out,
            "  Trans pairs   : {}",
            (0..3)
                .map(|k| {
                    format!(
                        "{}-{}",
                        self.canonical_labels.get(k).map(String::as_str).unwrap_or("?"),
                        self.canonical_labels
                            .get(k + 3)
                            .map(String::as_str)
                            .unwrap_or("?")
                    )
                })
                .collect::<Vec<_>>()
                .join(", ")
        );
        out
    }

    /// [`summary`](Self::summary) at the configured precision.
    pub fn summary_with(&self, output: &OutputSettings) -> String {
        self.summary(output.precision)
    }
}

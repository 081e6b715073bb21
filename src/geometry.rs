//! Structural data types: full molecular geometries and octahedral complexes.
//!
//! This module provides the two coordinate containers the engine works with:
//!
//! - [`Geometry`]: a whole structure with element labels and flat Cartesian
//!   coordinates, as handed over by an external file reader
//! - [`OctahedralComplex`]: exactly seven positions, the metal centre at index 0
//!   followed by its six ligand atoms
//!
//! All coordinates are in Angstroms.

use crate::elements::is_metal_center;
use crate::error::{DistortionError, Result};
use log::debug;
use nalgebra::{DVector, Vector3};

/// A single atomic position (x, y, z) in Angstroms.
pub type AtomPosition = Vector3<f64>;

/// Number of atoms in an octahedral complex: one metal plus six ligands.
pub const OCTAHEDRON_SIZE: usize = 7;

/// Number of ligand atoms around the metal centre.
pub const LIGAND_COUNT: usize = 6;

/// A molecular structure with element labels and Cartesian coordinates.
///
/// Coordinates are stored flat as `[x1, y1, z1, x2, y2, z2, ...]`.
///
/// # Examples
///
/// ```
/// use octadist::geometry::Geometry;
///
/// let geometry = Geometry::new(
///     vec!["Fe".to_string(), "O".to_string()],
///     vec![0.0, 0.0, 0.0, 2.0, 0.0, 0.0],
/// )?;
/// assert_eq!(geometry.num_atoms, 2);
/// assert_eq!(geometry.get_atom_coords(1), [2.0, 0.0, 0.0]);
/// # Ok::<(), octadist::DistortionError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Geometry {
    /// Atom labels in input order
    pub elements: Vec<String>,
    /// Flattened Cartesian coordinates in Angstroms
    pub coords: DVector<f64>,
    /// Number of atoms in the structure
    pub num_atoms: usize,
}

impl Geometry {
    /// Create a geometry from labels and a flat coordinate list.
    ///
    /// # Errors
    ///
    /// Returns [`DistortionError::InputShape`] if `coords.len() != 3 * elements.len()`.
    pub fn new(elements: Vec<String>, coords: Vec<f64>) -> Result<Self> {
        let num_atoms = elements.len();
        if coords.len() != num_atoms * 3 {
            return Err(DistortionError::InputShape {
                expected: num_atoms * 3,
                found: coords.len(),
            });
        }
        Ok(Self {
            elements,
            coords: DVector::from_vec(coords),
            num_atoms,
        })
    }

    /// Coordinates of one atom as `[x, y, z]`.
    ///
    /// # Panics
    ///
    /// Panics if `atom_idx >= num_atoms`.
    pub fn get_atom_coords(&self, atom_idx: usize) -> [f64; 3] {
        let i = atom_idx * 3;
        [self.coords[i], self.coords[i + 1], self.coords[i + 2]]
    }

    /// Position of one atom as a vector.
    pub fn atom_position(&self, atom_idx: usize) -> AtomPosition {
        Vector3::from(self.get_atom_coords(atom_idx))
    }

    /// Indices of every atom whose label is a d- or f-block metal.
    pub fn metal_indices(&self) -> Vec<usize> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, label)| is_metal_center(label))
            .map(|(i, _)| i)
            .collect()
    }
}

/// A metal centre and its six ligand atoms.
///
/// Index 0 is the metal; indices 1..=6 are the ligands in caller order. The
/// order carries no geometric meaning: the Theta engine derives its own
/// canonical order. No check is made that the ligands really form an
/// octahedron.
#[derive(Debug, Clone, PartialEq)]
pub struct OctahedralComplex {
    labels: Vec<String>,
    positions: [AtomPosition; OCTAHEDRON_SIZE],
}

impl OctahedralComplex {
    /// Build a complex from seven positions, labelling the atoms `M`, `L1`..`L6`.
    ///
    /// # Errors
    ///
    /// Returns [`DistortionError::InputShape`] unless exactly seven positions are given.
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::Vector3;
    /// use octadist::OctahedralComplex;
    ///
    /// let complex = OctahedralComplex::new(vec![
    ///     Vector3::new(0.0, 0.0, 0.0),
    ///     Vector3::new(2.0, 0.0, 0.0),
    ///     Vector3::new(-2.0, 0.0, 0.0),
    ///     Vector3::new(0.0, 2.0, 0.0),
    ///     Vector3::new(0.0, -2.0, 0.0),
    ///     Vector3::new(0.0, 0.0, 2.0),
    ///     Vector3::new(0.0, 0.0, -2.0),
    /// ])?;
    /// assert_eq!(complex.ligands().len(), 6);
    /// # Ok::<(), octadist::DistortionError>(())
    /// ```
    pub fn new(positions: Vec<AtomPosition>) -> Result<Self> {
        let labels = std::iter::once("M".to_string())
            .chain((1..=LIGAND_COUNT).map(|i| format!("L{}", i)))
            .collect();
        Self::with_labels(labels, positions)
    }

    /// Build a complex from labels and positions of equal length seven.
    pub fn with_labels(labels: Vec<String>, positions: Vec<AtomPosition>) -> Result<Self> {
        if labels.len() != OCTAHEDRON_SIZE {
            return Err(DistortionError::InputShape {
                expected: OCTAHEDRON_SIZE,
                found: labels.len(),
            });
        }
        let found = positions.len();
        let positions: [AtomPosition; OCTAHEDRON_SIZE] =
            positions
                .try_into()
                .map_err(|_| DistortionError::InputShape {
                    expected: OCTAHEDRON_SIZE,
                    found,
                })?;
        Ok(Self { labels, positions })
    }

    /// Build a complex from `[x, y, z]` triples.
    pub fn from_coords(coords: &[[f64; 3]]) -> Result<Self> {
        Self::new(coords.iter().map(|c| Vector3::from(*c)).collect())
    }

    /// Extract the octahedron around the `metal`-th metal centre (1-based) of a
    /// full structure.
    ///
    /// The metal goes to index 0, followed by the six other atoms nearest to
    /// it sorted by distance. Ties keep input order.
    ///
    /// # Errors
    ///
    /// Returns [`DistortionError::Extraction`] if the structure has fewer than
    /// seven atoms or fewer than `metal` metal centres.
    pub fn extract(geometry: &Geometry, metal: usize) -> Result<Self> {
        if geometry.num_atoms < OCTAHEDRON_SIZE {
            return Err(DistortionError::Extraction(format!(
                "structure has {} atoms, at least {} are required",
                geometry.num_atoms, OCTAHEDRON_SIZE
            )));
        }

        let metals = geometry.metal_indices();
        let center_idx = match metal.checked_sub(1).and_then(|i| metals.get(i)) {
            Some(&idx) => idx,
            None => {
                return Err(DistortionError::Extraction(format!(
                    "metal centre {} requested but the structure contains {} metal atom(s)",
                    metal,
                    metals.len()
                )))
            }
        };

        let center = geometry.atom_position(center_idx);
        let mut neighbours: Vec<(usize, f64)> = (0..geometry.num_atoms)
            .filter(|&i| i != center_idx)
            .map(|i| (i, (geometry.atom_position(i) - center).norm()))
            .collect();
        neighbours.sort_by(|a, b| a.1.total_cmp(&b.1));
        neighbours.truncate(LIGAND_COUNT);

        // Metal always in slot 0, even if another atom sits on top of it
        let mut by_distance = Vec::with_capacity(OCTAHEDRON_SIZE);
        by_distance.push((center_idx, 0.0));
        by_distance.extend(neighbours);

        debug!(
            "Extracted octahedron around {} (atom {}): {:?}",
            geometry.elements[center_idx],
            center_idx + 1,
            by_distance.iter().map(|(i, _)| i + 1).collect::<Vec<_>>()
        );

        let labels = by_distance
            .iter()
            .map(|(i, _)| geometry.elements[*i].clone())
            .collect();
        let positions = by_distance
            .iter()
            .map(|(i, _)| geometry.atom_position(*i))
            .collect();
        Self::with_labels(labels, positions)
    }

    /// The metal centre.
    pub fn metal(&self) -> &AtomPosition {
        &self.positions[0]
    }

    /// The six ligand positions in caller order.
    pub fn ligands(&self) -> &[AtomPosition] {
        &self.positions[1..]
    }

    /// All seven positions, metal first.
    pub fn positions(&self) -> &[AtomPosition; OCTAHEDRON_SIZE] {
        &self.positions
    }

    /// All seven labels, metal first.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Label of the metal centre.
    pub fn metal_label(&self) -> &str {
        &self.labels[0]
    }

    /// Labels of the six ligands in caller order.
    pub fn ligand_labels(&self) -> &[String] {
        &self.labels[1..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn octahedron_coords() -> Vec<[f64; 3]> {
        vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, -1.0],
        ]
    }

    #[test]
    fn test_geometry_shape_mismatch() {
        let result = Geometry::new(vec!["H".to_string()], vec![0.0, 0.0]);
        assert_eq!(
            result.unwrap_err(),
            DistortionError::InputShape {
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_complex_requires_seven_positions() {
        let mut coords = octahedron_coords();
        coords.pop();
        let result = OctahedralComplex::from_coords(&coords);
        assert_eq!(
            result.unwrap_err(),
            DistortionError::InputShape {
                expected: 7,
                found: 6
            }
        );
    }

    #[test]
    fn test_complex_accessors() {
        let complex = OctahedralComplex::from_coords(&octahedron_coords()).unwrap();
        assert_eq!(complex.metal(), &Vector3::zeros());
        assert_eq!(complex.ligands().len(), 6);
        assert_eq!(complex.metal_label(), "M");
        assert_eq!(complex.ligand_labels()[5], "L6");
    }

    #[test]
    fn test_extract_nearest_atoms() {
        // Fe octahedron plus two distant hydrogens listed first
        let mut elements = vec!["H".to_string(), "H".to_string(), "Fe".to_string()];
        let mut coords = vec![5.0, 5.0, 5.0, -6.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        for c in octahedron_coords().iter().skip(1) {
            elements.push("N".to_string());
            coords.extend(c.iter().map(|x| x * 2.0));
        }
        let geometry = Geometry::new(elements, coords).unwrap();

        let complex = OctahedralComplex::extract(&geometry, 1).unwrap();
        assert_eq!(complex.metal_label(), "Fe");
        assert!(complex.ligand_labels().iter().all(|l| l == "N"));
        for ligand in complex.ligands() {
            assert!((ligand.norm() - 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_extract_keeps_metal_first_on_overlap() {
        // A disordered O listed before Fe at the same site
        let mut elements = vec!["O".to_string(), "Fe".to_string()];
        let mut coords = vec![0.0; 6];
        for c in octahedron_coords().iter().skip(1) {
            elements.push("N".to_string());
            coords.extend(c.iter().map(|x| x * 2.0));
        }
        let geometry = Geometry::new(elements, coords).unwrap();

        let complex = OctahedralComplex::extract(&geometry, 1).unwrap();
        assert_eq!(complex.metal_label(), "Fe");
        assert_eq!(complex.ligand_labels()[0], "O");
        assert_eq!(complex.ligands()[0], Vector3::zeros());
    }

    #[test]
    fn test_extract_missing_metal() {
        let elements = vec!["C".to_string(); 7];
        let coords = vec![0.0; 21];
        let geometry = Geometry::new(elements, coords).unwrap();
        assert!(matches!(
            OctahedralComplex::extract(&geometry, 1),
            Err(DistortionError::Extraction(_))
        ));
        assert!(matches!(
            OctahedralComplex::extract(&geometry, 0),
            Err(DistortionError::Extraction(_))
        ));
    }
}

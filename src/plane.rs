//! Plane equations and orthogonal projection.
//!
//! A plane is stored as the coefficients of `a·x + b·y + c·z + d = 0`. Theta
//! builds one plane per octahedral face and flattens the metal and the
//! opposite ligands onto it.

use crate::error::{DistortionError, Result};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Smallest normal magnitude accepted when building a plane from three points.
pub const PLANE_TOLERANCE: f64 = 1e-10;

/// Coefficients of the plane `a·x + b·y + c·z + d = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneEquation {
    /// x coefficient
    pub a: f64,
    /// y coefficient
    pub b: f64,
    /// z coefficient
    pub c: f64,
    /// Constant term
    pub d: f64,
}

impl PlaneEquation {
    /// Normal vector `(a, b, c)`, not normalised.
    pub fn normal(&self) -> Vector3<f64> {
        Vector3::new(self.a, self.b, self.c)
    }

    /// Value of `a·x + b·y + c·z + d` at `point`; zero for points on the plane.
    pub fn evaluate(&self, point: &Vector3<f64>) -> f64 {
        self.normal().dot(point) + self.d
    }

    /// Coefficients as `[a, b, c, d]`.
    pub fn coefficients(&self) -> [f64; 4] {
        [self.a, self.b, self.c, self.d]
    }
}

/// Plane through three points, normal `(p2 - p1) × (p3 - p1)`.
///
/// # Errors
///
/// Returns [`DistortionError::DegeneratePlane`] when the points are collinear
/// (normal magnitude below [`PLANE_TOLERANCE`]).
///
/// # Examples
///
/// ```
/// use nalgebra::Vector3;
/// use octadist::plane::plane_from_three_points;
///
/// let plane = plane_from_three_points(
///     &Vector3::new(0.0, 0.0, 1.0),
///     &Vector3::new(1.0, 0.0, 1.0),
///     &Vector3::new(0.0, 1.0, 1.0),
/// )?;
/// assert!(plane.evaluate(&Vector3::new(5.0, -3.0, 1.0)).abs() < 1e-12);
/// # Ok::<(), octadist::DistortionError>(())
/// ```
pub fn plane_from_three_points(
    p1: &Vector3<f64>,
    p2: &Vector3<f64>,
    p3: &Vector3<f64>,
) -> Result<PlaneEquation> {
    plane_from_three_points_within(p1, p2, p3, PLANE_TOLERANCE)
}

/// [`plane_from_three_points`] with an explicit collinearity tolerance.
pub fn plane_from_three_points_within(
    p1: &Vector3<f64>,
    p2: &Vector3<f64>,
    p3: &Vector3<f64>,
    tolerance: f64,
) -> Result<PlaneEquation> {
    let normal = (p2 - p1).cross(&(p3 - p1));
    if normal.norm() < tolerance {
        return Err(DistortionError::DegeneratePlane(format!(
            "points ({:.4}, {:.4}, {:.4}), ({:.4}, {:.4}, {:.4}), ({:.4}, {:.4}, {:.4}) are collinear",
            p1.x, p1.y, p1.z, p2.x, p2.y, p2.z, p3.x, p3.y, p3.z
        )));
    }

    Ok(PlaneEquation {
        a: normal.x,
        b: normal.y,
        c: normal.z,
        d: -normal.dot(p1),
    })
}

/// Orthogonal projection of `point` onto `plane`:
/// `point - ((a·x + b·y + c·z + d) / (a² + b² + c²)) · (a, b, c)`.
///
/// # Errors
///
/// Returns [`DistortionError::DegeneratePlane`] if the plane normal is shorter
/// than [`PLANE_TOLERANCE`].
pub fn project_onto_plane(point: &Vector3<f64>, plane: &PlaneEquation) -> Result<Vector3<f64>> {
    project_onto_plane_within(point, plane, PLANE_TOLERANCE)
}

/// [`project_onto_plane`] with an explicit normal-length tolerance.
pub fn project_onto_plane_within(
    point: &Vector3<f64>,
    plane: &PlaneEquation,
    tolerance: f64,
) -> Result<Vector3<f64>> {
    let normal = plane.normal();
    let norm_sq = normal.norm_squared();
    if norm_sq < tolerance * tolerance {
        return Err(DistortionError::DegeneratePlane(
            "cannot project onto a plane with a zero normal".to_string(),
        ));
    }

    Ok(point - normal * (plane.evaluate(point) / norm_sq))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_contains_its_points() {
        let p1 = Vector3::new(1.0, 0.0, 0.0);
        let p2 = Vector3::new(0.0, 1.0, 0.0);
        let p3 = Vector3::new(0.0, 0.0, 1.0);
        let plane = plane_from_three_points(&p1, &p2, &p3).unwrap();

        for p in [p1, p2, p3] {
            assert!(plane.evaluate(&p).abs() < 1e-12);
        }
        // Normal of x + y + z = 1
        let n = plane.normal().normalize();
        let expected = Vector3::new(1.0, 1.0, 1.0).normalize();
        assert!((n - expected).norm() < 1e-12);
    }

    #[test]
    fn test_collinear_points_rejected() {
        let result = plane_from_three_points(
            &Vector3::new(0.0, 0.0, 0.0),
            &Vector3::new(1.0, 1.0, 1.0),
            &Vector3::new(2.0, 2.0, 2.0),
        );
        assert!(matches!(result, Err(DistortionError::DegeneratePlane(_))));
    }

    #[test]
    fn test_projection_lands_on_plane() {
        let plane = plane_from_three_points(
            &Vector3::new(1.0, 0.0, 0.0),
            &Vector3::new(0.0, 1.0, 0.0),
            &Vector3::new(0.0, 0.0, 1.0),
        )
        .unwrap();

        let origin = project_onto_plane(&Vector3::zeros(), &plane).unwrap();
        let third = 1.0 / 3.0;
        assert!((origin - Vector3::new(third, third, third)).norm() < 1e-12);

        let far = project_onto_plane(&Vector3::new(-4.0, 2.5, 7.0), &plane).unwrap();
        assert!(plane.evaluate(&far).abs() < 1e-12);
    }

    #[test]
    fn test_projection_zero_normal() {
        let plane = PlaneEquation {
            a: 0.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
        };
        let result = project_onto_plane(&Vector3::new(1.0, 2.0, 3.0), &plane);
        assert!(matches!(result, Err(DistortionError::DegeneratePlane(_))));
    }

    #[test]
    fn test_projection_respects_tolerance() {
        // Face of a 1e-6 Angstrom triangle: normal length 1e-12
        let plane = plane_from_three_points_within(
            &Vector3::new(1e-6, 0.0, 0.0),
            &Vector3::new(0.0, 1e-6, 0.0),
            &Vector3::new(0.0, 0.0, 1e-6),
            1e-30,
        )
        .unwrap();
        let point = Vector3::new(0.0, 0.0, 0.0);

        assert!(matches!(
            project_onto_plane(&point, &plane),
            Err(DistortionError::DegeneratePlane(_))
        ));
        let projected = project_onto_plane_within(&point, &plane, 1e-30).unwrap();
        let third = 1e-6 / 3.0;
        assert!((projected - Vector3::new(third, third, third)).norm() < 1e-18);
    }
}

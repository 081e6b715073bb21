//! Vector primitives used by every distortion parameter.
//!
//! All functions are pure and operate on `nalgebra::Vector3<f64>`. Angles are
//! returned in degrees. Functions that divide by a vector length come in two
//! flavours: a plain one using [`VECTOR_TOLERANCE`] and a `*_within` variant
//! taking an explicit tolerance, which the engine feeds from
//! [`Tolerances`](crate::Tolerances).

use crate::error::{DistortionError, Result};
use crate::plane::PLANE_TOLERANCE;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Smallest vector norm accepted by angle computations.
pub const VECTOR_TOLERANCE: f64 = 1e-10;

/// Numerical thresholds below which geometry is treated as degenerate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerances {
    /// Minimum vector norm for angle measurements
    pub vector: f64,
    /// Minimum normal magnitude for a face plane
    pub plane: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            vector: VECTOR_TOLERANCE,
            plane: PLANE_TOLERANCE,
        }
    }
}

/// Euclidean distance between two points.
///
/// # Examples
///
/// ```
/// use nalgebra::Vector3;
/// use octadist::linear::distance;
///
/// let d = distance(&Vector3::new(0.0, 0.0, 0.0), &Vector3::new(3.0, 4.0, 0.0));
/// assert!((d - 5.0).abs() < 1e-12);
/// ```
pub fn distance(p: &Vector3<f64>, q: &Vector3<f64>) -> f64 {
    (q - p).norm()
}

/// Unsigned angle between two vectors in degrees, range [0, 180].
///
/// The cosine is clamped to [-1, 1] before `acos` to absorb floating-point
/// overshoot on (anti)parallel vectors.
///
/// # Errors
///
/// Returns [`DistortionError::DegenerateVector`] if either vector has zero length.
pub fn angle(u: &Vector3<f64>, v: &Vector3<f64>) -> Result<f64> {
    angle_within(u, v, VECTOR_TOLERANCE)
}

/// [`angle`] with an explicit zero-length tolerance.
pub fn angle_within(u: &Vector3<f64>, v: &Vector3<f64>, tolerance: f64) -> Result<f64> {
    let nu = u.norm();
    let nv = v.norm();
    if nu < tolerance || nv < tolerance {
        return Err(DistortionError::DegenerateVector(format!(
            "cannot measure angle with a zero-length vector (|u| = {:.3e}, |v| = {:.3e})",
            nu, nv
        )));
    }

    let cos = (u.dot(v) / (nu * nv)).clamp(-1.0, 1.0);
    Ok(cos.acos().to_degrees())
}

/// Angle between `u` and `v` in degrees, negative when the rotation from `u`
/// to `v` runs against `reference_normal`.
///
/// Theta uses a single reference normal per face so that all six twist angles
/// share one rotational sense.
pub fn signed_angle(
    u: &Vector3<f64>,
    v: &Vector3<f64>,
    reference_normal: &Vector3<f64>,
) -> Result<f64> {
    signed_angle_within(u, v, reference_normal, VECTOR_TOLERANCE)
}

/// [`signed_angle`] with an explicit zero-length tolerance.
pub fn signed_angle_within(
    u: &Vector3<f64>,
    v: &Vector3<f64>,
    reference_normal: &Vector3<f64>,
    tolerance: f64,
) -> Result<f64> {
    let unsigned = angle_within(u, v, tolerance)?;
    if u.cross(v).dot(reference_normal) < 0.0 {
        Ok(-unsigned)
    } else {
        Ok(unsigned)
    }
}

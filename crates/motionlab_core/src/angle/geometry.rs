//! Vertex angle / line orientation math.
//!
//! 수학 공식:
//! - BA = A - B, BC = C - B
//! - cos(θ) = (BA · BC) / (|BA| × |BC| + ε)
//! - θ = arccos(clamp(cos θ, -1, 1)) × 180/π

use crate::config::AngleSpace;
use crate::models::Point;

/// Added to the norm product so the division never hits zero.
pub const COS_EPSILON: f64 = 1e-9;

/// Vectors shorter than this are treated as zero-length.
pub const MIN_VECTOR_LENGTH: f64 = 1e-9;

type Vec3 = [f64; 3];

#[inline]
fn sub(to: &Point, from: &Point, space: AngleSpace) -> Vec3 {
    let dz = match space {
        AngleSpace::Planar => 0.0,
        AngleSpace::Spatial => to.z - from.z,
    };
    [to.x - from.x, to.y - from.y, dz]
}

#[inline]
fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
fn norm(v: Vec3) -> f64 {
    dot(v, v).sqrt()
}

/// Round to one decimal place.
#[inline]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Interior angle at `b` in degrees, rounded to 0.1.
///
/// `None` when either arm has zero length or an input is not finite.
pub fn vertex_angle(a: &Point, b: &Point, c: &Point, space: AngleSpace) -> Option<f64> {
    let ba = sub(a, b, space);
    let bc = sub(c, b, space);

    let ba_norm = norm(ba);
    let bc_norm = norm(bc);
    if !(ba_norm >= MIN_VECTOR_LENGTH && bc_norm >= MIN_VECTOR_LENGTH) {
        return None;
    }

    let cos_angle = (dot(ba, bc) / (ba_norm * bc_norm + COS_EPSILON)).clamp(-1.0, 1.0);
    let degrees = cos_angle.acos().to_degrees();
    degrees.is_finite().then(|| round1(degrees))
}

/// Orientation of the line `left → right` in radians, image plane only.
///
/// `None` when the two points coincide.
pub fn line_orientation(left: &Point, right: &Point) -> Option<f64> {
    let dx = right.x - left.x;
    let dy = right.y - left.y;
    if (dx * dx + dy * dy).sqrt() < MIN_VECTOR_LENGTH {
        return None;
    }
    let angle = dy.atan2(dx);
    angle.is_finite().then_some(angle)
}

/// Absolute difference of two orientations in degrees, reduced to [0, 180].
pub fn orientation_difference(a_rad: f64, b_rad: f64) -> f64 {
    let diff = (a_rad - b_rad).abs().to_degrees() % 360.0;
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

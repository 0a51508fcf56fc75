//! Angle and distance math over 2D pose landmarks.

use super::landmark::Landmark;

// Keeps the cosine denominator nonzero when two joints coincide.
const MAGNITUDE_EPSILON: f64 = 1e-6;

/// Angle at vertex `b` between the rays `b -> a` and `b -> c`, in degrees.
///
/// The cosine is clamped before the arccos, so float error near ±1 cannot
/// produce NaN. Always in [0, 180]; coincident points fall back to 90°
/// rather than dividing by zero.
pub fn angle(a: &Landmark, b: &Landmark, c: &Landmark) -> f64 {
    let ba = (a.x - b.x, a.y - b.y);
    let bc = (c.x - b.x, c.y - b.y);

    let dot = ba.0 * bc.0 + ba.1 * bc.1;
    let magnitude =
        (ba.0 * ba.0 + ba.1 * ba.1).sqrt() * (bc.0 * bc.0 + bc.1 * bc.1).sqrt();

    let cosine = (dot / (magnitude + MAGNITUDE_EPSILON)).clamp(-1.0, 1.0);
    cosine.acos().to_degrees()
}

/// Euclidean distance between two landmarks in normalized image space.
pub fn distance(a: &Landmark, b: &Landmark) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

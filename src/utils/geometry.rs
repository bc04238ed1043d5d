/*!
Provide geometry tools.
*/

use std::f64::consts::{PI, TAU};

/// Maps any angle into `(-PI, PI]`.
///
/// Angles already in the range are returned untouched (bitwise), so the
/// function is idempotent. Non finite inputs (NaN, +/-Infinity) give NaN: a
/// corrupted pose stays visibly corrupted instead of being wrapped into a
/// plausible value.
pub fn normalize_angle(a: f64) -> f64 {
    if !a.is_finite() {
        return f64::NAN;
    }
    if a > -PI && a <= PI {
        return a;
    }
    // `%` is exact on floats, even for very large magnitudes.
    let mut r = a % TAU;
    if r <= -PI {
        r += TAU;
    } else if r > PI {
        r -= TAU;
    }
    r
}

/// Computes the smallest difference between two angles,
/// i.e. the difference between `a` and `b` in the range `(-PI, PI]` (a-b).
pub fn smallest_theta_diff(a: f64, b: f64) -> f64 {
    normalize_angle(a - b)
}

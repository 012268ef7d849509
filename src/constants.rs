//! Physical constants, numerical defaults, and frequency conversions.
//!
//! ## References
//!
//! - Standard gravity is exact by definition (3rd CGPM, 1901).
//! - NIST Reference on Constants, Units, and Uncertainty: <https://physics.nist.gov/cuu/Constants/>

use std::f64::consts::TAU;

/// Standard acceleration of gravity _g₀_ in metres per second squared (m/s²).
/// Exact value by definition: 9.80665 m/s².
pub const STANDARD_GRAVITY: f64 = 9.806_65;

/// Absolute tolerance used when a coefficient or difference is treated as zero.
pub const DEFAULT_TOLERANCE: f64 = 1.0e-12;

/// Returns the angular frequency corresponding to a linear frequency `hz`.
#[inline]
#[must_use]
pub fn angular_frequency(hz: f64) -> f64 {
    TAU * hz
}

/// Returns the linear frequency in hertz for an angular frequency `omega` (rad/s).
///
/// A body at rest has zero frequency.
#[inline]
#[must_use]
pub fn frequency_from_angular(omega: f64) -> f64 {
    if omega == 0.0 {
        return 0.0;
    }
    omega / TAU
}

/// Returns the period in seconds for an angular frequency `omega` (rad/s).
///
/// A body at rest never completes a cycle, so the period is `+∞`.
#[inline]
#[must_use]
pub fn period_from_angular(omega: f64) -> f64 {
    if omega == 0.0 {
        return f64::INFINITY;
    }
    TAU / omega
}

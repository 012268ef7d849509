//! Shared numerical primitives anchored on `nalgebra` and `num-complex`.

use nalgebra::{Vector2, Vector3};

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Convenient alias for two-dimensional real vectors.
pub type R2 = Vector2<Scalar>;
/// Convenient alias for three-dimensional real vectors.
pub type R3 = Vector3<Scalar>;
/// Primary complex scalar type used for rotating phasors.
pub type CScalar = num_complex::Complex<Scalar>;

/// Returns the complex exponential `e^(j * theta)` using `Scalar` precision.
#[must_use]
pub fn phasor(theta: Scalar) -> CScalar {
    num_complex::Complex::from_polar(1.0, theta)
}

/// Unit vector at angle `theta` from the x axis.
#[must_use]
pub fn radial(theta: Scalar) -> R2 {
    R2::new(theta.cos(), theta.sin())
}

/// Unit vector perpendicular to [`radial`], pointing in the direction of increasing angle.
#[must_use]
pub fn tangential(theta: Scalar) -> R2 {
    R2::new(-theta.sin(), theta.cos())
}

/// True when `value` is within `tolerance` of zero.
#[inline]
#[must_use]
pub fn is_negligible(value: Scalar, tolerance: Scalar) -> bool {
    value.abs() <= tolerance
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn phasor_has_unit_magnitude() {
        let z = phasor(1.234);
        assert_relative_eq!(z.norm(), 1.0, epsilon = 1.0e-12);
    }

    #[test]
    fn radial_and_tangential_are_orthonormal() {
        let theta = 0.7;
        assert_relative_eq!(radial(theta).dot(&tangential(theta)), 0.0, epsilon = 1.0e-15);
        assert_relative_eq!(tangential(theta).norm(), 1.0, epsilon = 1.0e-15);
    }
}

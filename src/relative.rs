//! Relative velocity between two bodies.
//!
//! With `v_a` and `v_b` measured in the same frame, `v_ab = v_a − v_b` is the
//! velocity of A as seen from B. The helpers below rearrange that identity.

use crate::errors::Result;
use crate::math::R3;
use crate::units::{Dimension, PlanarQuantity, Quantity, QuantityVector, SpatialQuantity, Unit};

fn velocities<const D: usize>(lhs: &QuantityVector<D>, rhs: &QuantityVector<D>) -> Result<()> {
    lhs.ensure_dimension(Dimension::VELOCITY)?;
    rhs.ensure_dimension(Dimension::VELOCITY)?;
    Ok(())
}

/// Velocity of A relative to B, `v_a − v_b`.
///
/// # Errors
///
/// Returns a dimension mismatch unless both operands are velocities.
pub fn relative_velocity<const D: usize>(
    v_a: &QuantityVector<D>,
    v_b: &QuantityVector<D>,
) -> Result<QuantityVector<D>> {
    velocities(v_a, v_b)?;
    Ok(v_a.try_sub(v_b)?)
}

/// Velocity of A from its velocity relative to B, `v_ab + v_b`.
///
/// # Errors
///
/// Returns a dimension mismatch unless both operands are velocities.
pub fn absolute_velocity_a<const D: usize>(
    v_ab: &QuantityVector<D>,
    v_b: &QuantityVector<D>,
) -> Result<QuantityVector<D>> {
    velocities(v_ab, v_b)?;
    Ok(v_ab.try_add(v_b)?)
}

/// Velocity of B from A's velocity and A's velocity relative to B, `v_a − v_ab`.
///
/// # Errors
///
/// Returns a dimension mismatch unless both operands are velocities.
pub fn absolute_velocity_b<const D: usize>(
    v_a: &QuantityVector<D>,
    v_ab: &QuantityVector<D>,
) -> Result<QuantityVector<D>> {
    velocities(v_a, v_ab)?;
    Ok(v_a.try_sub(v_ab)?)
}

/// Magnitude of a velocity vector.
///
/// # Errors
///
/// Returns a dimension mismatch unless `v` is a velocity.
pub fn speed<const D: usize>(v: &QuantityVector<D>) -> Result<Quantity> {
    v.ensure_dimension(Dimension::VELOCITY)?;
    Ok(v.norm())
}

/// Direction of a planar vector as an angle from +x; zero for the zero vector.
#[must_use]
pub fn heading(v: &PlanarQuantity) -> Quantity {
    let (x, y) = (v.values()[0], v.values()[1]);
    if x == 0.0 && y == 0.0 {
        return Quantity::radians(0.0);
    }
    Quantity::radians(y.atan2(x))
}

/// Dimensionless unit vector along `v`; the zero vector maps to itself.
#[must_use]
pub fn direction(v: &SpatialQuantity) -> SpatialQuantity {
    let unit = v.values().try_normalize(0.0).unwrap_or_else(R3::zeros);
    SpatialQuantity::new(unit, Unit::dimensionless())
}

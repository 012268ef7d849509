use super::{elapsed, Field, Kinematics};
use crate::errors::{KinematicsError, Result};
use crate::math::{Scalar, R3};
use crate::units::{Quantity, SpatialQuantity, Unit, Value, VectorValue};

/// Constant-acceleration motion in three dimensions, defined for `t >= 0`.
///
/// `r(t) = r0 + v0 t + ½ a t²`, `v(t) = v0 + a t`, `a(t) = a`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialMotion {
    initial_position: SpatialQuantity,
    initial_velocity: SpatialQuantity,
    acceleration: SpatialQuantity,
}

impl SpatialMotion {
    /// Creates a spatial motion from three-component vectors.
    ///
    /// # Errors
    ///
    /// Fails when a supplied vector quantity has the wrong dimension.
    pub fn new(
        initial_position: impl Into<VectorValue<3>>,
        initial_velocity: impl Into<VectorValue<3>>,
        acceleration: impl Into<VectorValue<3>>,
    ) -> Result<Self> {
        Ok(Self {
            initial_position: Field::Position.resolve_vector(initial_position)?,
            initial_velocity: Field::Velocity.resolve_vector(initial_velocity)?,
            acceleration: Field::Acceleration.resolve_vector(acceleration)?,
        })
    }

    /// Creates a spatial motion from plain SI slices.
    ///
    /// # Errors
    ///
    /// Returns [`KinematicsError::InvalidArgument`] unless every slice has exactly three entries.
    pub fn from_slices(
        initial_position: &[Scalar],
        initial_velocity: &[Scalar],
        acceleration: &[Scalar],
    ) -> Result<Self> {
        Self::new(
            three(initial_position, Field::Position)?,
            three(initial_velocity, Field::Velocity)?,
            three(acceleration, Field::Acceleration)?,
        )
    }

    /// Position at `t = 0`.
    #[must_use]
    pub const fn initial_position(&self) -> &SpatialQuantity {
        &self.initial_position
    }

    /// Velocity at `t = 0`.
    #[must_use]
    pub const fn initial_velocity(&self) -> &SpatialQuantity {
        &self.initial_velocity
    }

    /// Constant acceleration vector.
    #[must_use]
    pub const fn constant_acceleration(&self) -> &SpatialQuantity {
        &self.acceleration
    }

    /// Magnitude of the velocity at `t`.
    ///
    /// # Errors
    ///
    /// Fails for negative or non-time `t`.
    pub fn speed(&self, t: impl Into<Value>) -> Result<Quantity> {
        Ok(self.velocity(t)?.norm())
    }

    /// Magnitude of the constant acceleration.
    #[must_use]
    pub fn acceleration_magnitude(&self) -> Quantity {
        self.acceleration.norm()
    }
}

fn three(values: &[Scalar], field: Field) -> Result<R3> {
    match values {
        [x, y, z] => Ok(R3::new(*x, *y, *z)),
        _ => Err(KinematicsError::invalid(format!(
            "{} must have exactly 3 components, got {}",
            field.name(),
            values.len()
        ))),
    }
}

impl Default for SpatialMotion {
    fn default() -> Self {
        Self {
            initial_position: SpatialQuantity::new(R3::zeros(), Unit::meter()),
            initial_velocity: SpatialQuantity::new(R3::zeros(), Unit::meter_per_second()),
            acceleration: SpatialQuantity::new(R3::zeros(), Unit::meter_per_second_squared()),
        }
    }
}

impl Kinematics for SpatialMotion {
    type Output = SpatialQuantity;

    fn position(&self, t: impl Into<Value>) -> Result<SpatialQuantity> {
        let t = elapsed(t)?;
        let drift = self.initial_velocity.scale_by(&t);
        let bend = self.acceleration.scale_by(&t.powi(2)).scale(0.5);
        Ok(self.initial_position.try_add(&drift)?.try_add(&bend)?)
    }

    fn velocity(&self, t: impl Into<Value>) -> Result<SpatialQuantity> {
        let t = elapsed(t)?;
        Ok(self.initial_velocity.try_add(&self.acceleration.scale_by(&t))?)
    }

    fn acceleration(&self, t: impl Into<Value>) -> Result<SpatialQuantity> {
        Field::Time.resolve(t)?;
        Ok(self.acceleration.clone())
    }
}

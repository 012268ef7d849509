use super::{elapsed, Field, Kinematics};
use crate::errors::Result;
use crate::inverse::{InverseSolver, TimeSolutions};
use crate::units::{Quantity, Value};

/// Motion along a line at constant velocity.
///
/// Defined for every real time, including instants before the reference.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct UniformRectilinear {
    initial_position: Quantity,
    velocity: Quantity,
}

impl UniformRectilinear {
    /// Creates a uniform motion from `x0` (m) and `v` (m/s).
    ///
    /// # Errors
    ///
    /// Fails when either argument is a quantity of the wrong dimension.
    pub fn new(initial_position: impl Into<Value>, velocity: impl Into<Value>) -> Result<Self> {
        Ok(Self {
            initial_position: Field::Position.resolve(initial_position)?,
            velocity: Field::Velocity.resolve(velocity)?,
        })
    }

    /// Position at `t = 0`.
    #[must_use]
    pub const fn initial_position(&self) -> &Quantity {
        &self.initial_position
    }

    /// Constant velocity.
    #[must_use]
    pub const fn constant_velocity(&self) -> &Quantity {
        &self.velocity
    }

    /// Time at which the body passes `target`, with the default tolerance.
    ///
    /// # Errors
    ///
    /// See [`InverseSolver::uniform_time_for_position`].
    pub fn time_for_position(&self, target: impl Into<Value>) -> Result<TimeSolutions> {
        InverseSolver::default().uniform_time_for_position(self, target)
    }
}

impl Default for UniformRectilinear {
    fn default() -> Self {
        Self {
            initial_position: Quantity::meters(0.0),
            velocity: Quantity::meters_per_second(0.0),
        }
    }
}

impl Kinematics for UniformRectilinear {
    type Output = Quantity;

    fn position(&self, t: impl Into<Value>) -> Result<Quantity> {
        let t = Field::Time.resolve(t)?;
        Ok(self.initial_position.try_add(&(&self.velocity * &t))?)
    }

    fn velocity(&self, t: impl Into<Value>) -> Result<Quantity> {
        Field::Time.resolve(t)?;
        Ok(self.velocity.clone())
    }

    fn acceleration(&self, t: impl Into<Value>) -> Result<Quantity> {
        Field::Time.resolve(t)?;
        Ok(Quantity::meters_per_second_squared(0.0))
    }
}

/// Motion along a line at constant acceleration.
///
/// Position and velocity are defined for `t >= 0`; the constant acceleration
/// is returned for any time.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct AcceleratedRectilinear {
    initial_position: Quantity,
    initial_velocity: Quantity,
    acceleration: Quantity,
}

impl AcceleratedRectilinear {
    /// Creates an accelerated motion from `x0` (m), `v0` (m/s) and `a` (m/s²).
    ///
    /// # Errors
    ///
    /// Fails when any argument is a quantity of the wrong dimension.
    pub fn new(
        initial_position: impl Into<Value>,
        initial_velocity: impl Into<Value>,
        acceleration: impl Into<Value>,
    ) -> Result<Self> {
        Ok(Self {
            initial_position: Field::Position.resolve(initial_position)?,
            initial_velocity: Field::Velocity.resolve(initial_velocity)?,
            acceleration: Field::Acceleration.resolve(acceleration)?,
        })
    }

    /// Free fall from `height` starting at rest, with `x` measured upward.
    ///
    /// # Errors
    ///
    /// Fails when `height` is not a length.
    pub fn free_fall(height: impl Into<Value>) -> Result<Self> {
        Self::new(height, 0.0, -crate::constants::STANDARD_GRAVITY)
    }

    /// Position at `t = 0`.
    #[must_use]
    pub const fn initial_position(&self) -> &Quantity {
        &self.initial_position
    }

    /// Velocity at `t = 0`.
    #[must_use]
    pub const fn initial_velocity(&self) -> &Quantity {
        &self.initial_velocity
    }

    /// Constant acceleration.
    #[must_use]
    pub const fn constant_acceleration(&self) -> &Quantity {
        &self.acceleration
    }

    /// Non-negative times at which the body passes `target`.
    ///
    /// Uses the default tolerance; build an [`InverseSolver`] to pick another.
    ///
    /// # Errors
    ///
    /// See [`InverseSolver::time_for_position`].
    pub fn time_for_position(&self, target: impl Into<Value>) -> Result<TimeSolutions> {
        InverseSolver::default().time_for_position(self, target)
    }

    /// [`Self::time_for_position`] with an explicit zero tolerance.
    ///
    /// # Errors
    ///
    /// See [`InverseSolver::time_for_position`].
    pub fn time_for_position_with_tolerance(
        &self,
        target: impl Into<Value>,
        tolerance: f64,
    ) -> Result<TimeSolutions> {
        InverseSolver::new(tolerance).time_for_position(self, target)
    }

    /// Velocity at the moment the body passes `target`, without solving for time.
    ///
    /// # Errors
    ///
    /// See [`InverseSolver::velocity_without_time`].
    pub fn velocity_without_time(&self, target: impl Into<Value>) -> Result<Quantity> {
        InverseSolver::default().velocity_without_time(self, target)
    }

    /// Time at which the velocity reaches `target`.
    ///
    /// # Errors
    ///
    /// See [`InverseSolver::time_for_velocity`].
    pub fn time_for_velocity(&self, target: impl Into<Value>) -> Result<Quantity> {
        InverseSolver::default().time_for_velocity(self, target)
    }

    /// Displacement covered until the velocity reaches `target`.
    ///
    /// # Errors
    ///
    /// See [`InverseSolver::displacement_without_time`].
    pub fn displacement_without_time(&self, target: impl Into<Value>) -> Result<Quantity> {
        InverseSolver::default().displacement_without_time(self, target)
    }
}

impl Default for AcceleratedRectilinear {
    fn default() -> Self {
        Self {
            initial_position: Quantity::meters(0.0),
            initial_velocity: Quantity::meters_per_second(0.0),
            acceleration: Quantity::meters_per_second_squared(0.0),
        }
    }
}

impl Kinematics for AcceleratedRectilinear {
    type Output = Quantity;

    fn position(&self, t: impl Into<Value>) -> Result<Quantity> {
        let t = elapsed(t)?;
        let drift = &self.initial_velocity * &t;
        let bend = (&self.acceleration * &t.powi(2)).scale(0.5);
        Ok(self.initial_position.try_add(&drift)?.try_add(&bend)?)
    }

    fn velocity(&self, t: impl Into<Value>) -> Result<Quantity> {
        let t = elapsed(t)?;
        Ok(self.initial_velocity.try_add(&(&self.acceleration * &t))?)
    }

    fn acceleration(&self, t: impl Into<Value>) -> Result<Quantity> {
        Field::Time.resolve(t)?;
        Ok(self.acceleration.clone())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::errors::KinematicsError;
    use crate::units::Dimension;

    #[test]
    fn uniform_motion_is_linear_in_time() {
        let motion = UniformRectilinear::new(10.0, 5.0).expect("valid");
        let x = motion.position(2.0).expect("any time");
        assert_eq!(x.dimension(), Dimension::LENGTH);
        assert_relative_eq!(x.si_value(), 20.0, epsilon = 1.0e-12);
        assert_relative_eq!(motion.position(-2.0).expect("negative allowed").si_value(), 0.0);
        assert_relative_eq!(motion.velocity(7.0).expect("any time").si_value(), 5.0);
        assert_relative_eq!(motion.acceleration(7.0).expect("any time").si_value(), 0.0);
    }

    #[test]
    fn mixed_units_are_normalised() {
        let motion = UniformRectilinear::new(
            Quantity::of(1.0, "km").expect("known unit"),
            Quantity::of(36.0, "km/h").expect("known unit"),
        )
        .expect("valid");
        let x = motion.position(Quantity::of(1.0, "min").expect("known unit")).expect("valid");
        assert_relative_eq!(x.si_value(), 1600.0, epsilon = 1.0e-9);
    }

    #[test]
    fn wrong_dimensions_are_rejected_at_construction() {
        let err = UniformRectilinear::new(Quantity::seconds(1.0), 1.0).unwrap_err();
        assert!(matches!(err, KinematicsError::Units(_)));
    }

    #[test]
    fn accelerated_motion_follows_the_kinematic_equations() {
        let motion = AcceleratedRectilinear::new(0.0, 10.0, -2.0).expect("valid");
        assert_relative_eq!(motion.position(4.0).expect("t >= 0").si_value(), 24.0, epsilon = 1.0e-12);
        assert_relative_eq!(motion.velocity(4.0).expect("t >= 0").si_value(), 2.0, epsilon = 1.0e-12);
        assert_relative_eq!(motion.acceleration(4.0).expect("t >= 0").si_value(), -2.0);
        assert_eq!(
            motion.velocity(1.0).expect("t >= 0").dimension(),
            Dimension::VELOCITY
        );
    }

    #[test]
    fn accelerated_motion_rejects_negative_time() {
        let motion = AcceleratedRectilinear::new(0.0, 5.0, 2.0).expect("valid");
        for result in [motion.position(-1.0), motion.velocity(-1.0)] {
            assert!(matches!(result, Err(KinematicsError::InvalidArgument(_))));
        }
        let a = motion.acceleration(-1.0).expect("constant for any time");
        assert_relative_eq!(a.si_value(), 2.0);
        assert!(matches!(
            motion.acceleration(Quantity::meters(1.0)),
            Err(KinematicsError::Units(_))
        ));
    }

    #[test]
    fn free_fall_drops_under_standard_gravity() {
        let motion = AcceleratedRectilinear::free_fall(100.0).expect("valid");
        let x = motion.position(2.0).expect("t >= 0");
        assert_relative_eq!(x.si_value(), 100.0 - 2.0 * 9.806_65, epsilon = 1.0e-9);
    }
}

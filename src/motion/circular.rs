use tracing::debug;

use super::{elapsed, Field, Kinematics};
use crate::constants::{frequency_from_angular, period_from_angular};
use crate::errors::{KinematicsError, Result};
use crate::inverse::{InverseSolver, TimeSolutions};
use crate::math::{radial, tangential, Scalar, R2};
use crate::units::{PlanarQuantity, Quantity, Unit, Value};

fn positive_radius(radius: impl Into<Value>) -> Result<Quantity> {
    let radius = Field::Radius.resolve(radius)?;
    if radius.si_value() > 0.0 && radius.is_finite() {
        Ok(radius)
    } else {
        debug!(radius = radius.si_value(), "rejecting circular path");
        Err(KinematicsError::invalid(format!("radius must be positive, got {radius}")))
    }
}

fn planar(direction: R2, magnitude: Scalar, unit: Unit) -> PlanarQuantity {
    PlanarQuantity::new(direction * magnitude, unit)
}

/// Motion on a circle of fixed radius at constant angular velocity.
///
/// The circle is centred on the origin; angles are measured from the +x axis.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct UniformCircular {
    radius: Quantity,
    initial_angle: Quantity,
    angular_velocity: Quantity,
}

impl UniformCircular {
    /// Creates a uniform circular motion.
    ///
    /// # Errors
    ///
    /// Fails on wrong dimensions or a radius that is not strictly positive.
    pub fn new(
        radius: impl Into<Value>,
        initial_angle: impl Into<Value>,
        angular_velocity: impl Into<Value>,
    ) -> Result<Self> {
        Ok(Self {
            radius: positive_radius(radius)?,
            initial_angle: Field::Angle.resolve(initial_angle)?,
            angular_velocity: Field::AngularVelocity.resolve(angular_velocity)?,
        })
    }

    /// A body at rest on the +x axis of a circle of `radius`.
    ///
    /// # Errors
    ///
    /// Fails on a wrong dimension or a radius that is not strictly positive.
    pub fn with_radius(radius: impl Into<Value>) -> Result<Self> {
        Self::new(radius, 0.0, 0.0)
    }

    /// Radius of the path.
    #[must_use]
    pub const fn radius(&self) -> &Quantity {
        &self.radius
    }

    /// Angle at `t = 0`.
    #[must_use]
    pub const fn initial_angle(&self) -> &Quantity {
        &self.initial_angle
    }

    /// Angle swept after `t`, `θ0 + ω t`.
    ///
    /// # Errors
    ///
    /// Fails for negative or non-time `t`.
    pub fn angular_position(&self, t: impl Into<Value>) -> Result<Quantity> {
        let t = elapsed(t)?;
        Ok(self.initial_angle.try_add(&(&self.angular_velocity * &t))?)
    }

    /// Constant angular velocity.
    #[must_use]
    pub fn angular_velocity(&self) -> Quantity {
        self.angular_velocity.clone()
    }

    /// Signed speed along the path, `ω R`.
    #[must_use]
    pub fn tangential_velocity(&self) -> Quantity {
        (&self.angular_velocity * &self.radius).drop_angle()
    }

    /// Magnitude of the inward acceleration, `ω² R`.
    #[must_use]
    pub fn centripetal_acceleration(&self) -> Quantity {
        (&self.angular_velocity.powi(2) * &self.radius).drop_angle()
    }

    /// Time for one revolution, `2π / ω`; infinite for a body at rest.
    ///
    /// Carries the sign of `ω`, so clockwise motion has a negative period.
    #[must_use]
    pub fn period(&self) -> Quantity {
        Quantity::seconds(period_from_angular(self.angular_velocity.si_value()))
    }

    /// Revolutions per second, `ω / 2π`; zero for a body at rest.
    #[must_use]
    pub fn frequency(&self) -> Quantity {
        Quantity::new(frequency_from_angular(self.angular_velocity.si_value()), Unit::hertz())
    }

    fn angle_at(&self, t: impl Into<Value>) -> Result<Scalar> {
        Ok(self.angular_position(t)?.si_value())
    }
}

impl Kinematics for UniformCircular {
    type Output = PlanarQuantity;

    fn position(&self, t: impl Into<Value>) -> Result<PlanarQuantity> {
        let theta = self.angle_at(t)?;
        Ok(planar(radial(theta), self.radius.si_value(), Unit::meter()))
    }

    fn velocity(&self, t: impl Into<Value>) -> Result<PlanarQuantity> {
        let theta = self.angle_at(t)?;
        let speed = self.tangential_velocity().si_value();
        Ok(planar(tangential(theta), speed, Unit::meter_per_second()))
    }

    fn acceleration(&self, t: impl Into<Value>) -> Result<PlanarQuantity> {
        let theta = self.angle_at(t)?;
        let inward = self.centripetal_acceleration().si_value();
        Ok(planar(-radial(theta), inward, Unit::meter_per_second_squared()))
    }
}

/// Motion on a circle of fixed radius at constant angular acceleration.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct AcceleratedCircular {
    radius: Quantity,
    initial_angle: Quantity,
    initial_angular_velocity: Quantity,
    angular_acceleration: Quantity,
}

impl AcceleratedCircular {
    /// Creates a circular motion with constant angular acceleration.
    ///
    /// # Errors
    ///
    /// Fails on wrong dimensions or a radius that is not strictly positive.
    pub fn new(
        radius: impl Into<Value>,
        initial_angle: impl Into<Value>,
        initial_angular_velocity: impl Into<Value>,
        angular_acceleration: impl Into<Value>,
    ) -> Result<Self> {
        Ok(Self {
            radius: positive_radius(radius)?,
            initial_angle: Field::Angle.resolve(initial_angle)?,
            initial_angular_velocity: Field::AngularVelocity.resolve(initial_angular_velocity)?,
            angular_acceleration: Field::AngularAcceleration.resolve(angular_acceleration)?,
        })
    }

    /// A body at rest on the +x axis of a circle of `radius`.
    ///
    /// # Errors
    ///
    /// Fails on a wrong dimension or a radius that is not strictly positive.
    pub fn with_radius(radius: impl Into<Value>) -> Result<Self> {
        Self::new(radius, 0.0, 0.0, 0.0)
    }

    /// Radius of the path.
    #[must_use]
    pub const fn radius(&self) -> &Quantity {
        &self.radius
    }

    /// Angle at `t = 0`.
    #[must_use]
    pub const fn initial_angle(&self) -> &Quantity {
        &self.initial_angle
    }

    /// Angular velocity at `t = 0`.
    #[must_use]
    pub const fn initial_angular_velocity(&self) -> &Quantity {
        &self.initial_angular_velocity
    }

    /// `θ0 + ω0 t + ½ α t²`.
    ///
    /// # Errors
    ///
    /// Fails for negative or non-time `t`.
    pub fn angular_position(&self, t: impl Into<Value>) -> Result<Quantity> {
        let t = elapsed(t)?;
        let sweep = &self.initial_angular_velocity * &t;
        let bend = (&self.angular_acceleration * &t.powi(2)).scale(0.5);
        Ok(self.initial_angle.try_add(&sweep)?.try_add(&bend)?)
    }

    /// `ω0 + α t`.
    ///
    /// # Errors
    ///
    /// Fails for negative or non-time `t`.
    pub fn angular_velocity(&self, t: impl Into<Value>) -> Result<Quantity> {
        let t = elapsed(t)?;
        Ok(self.initial_angular_velocity.try_add(&(&self.angular_acceleration * &t))?)
    }

    /// Constant angular acceleration.
    #[must_use]
    pub fn angular_acceleration(&self) -> Quantity {
        self.angular_acceleration.clone()
    }

    /// Signed speed along the path at `t`, `ω(t) R`.
    ///
    /// # Errors
    ///
    /// Fails for negative or non-time `t`.
    pub fn tangential_velocity(&self, t: impl Into<Value>) -> Result<Quantity> {
        Ok((&self.angular_velocity(t)? * &self.radius).drop_angle())
    }

    /// Acceleration along the path, `α R`.
    #[must_use]
    pub fn tangential_acceleration(&self) -> Quantity {
        (&self.angular_acceleration * &self.radius).drop_angle()
    }

    /// Inward acceleration at `t`, `ω(t)² R`.
    ///
    /// # Errors
    ///
    /// Fails for negative or non-time `t`.
    pub fn centripetal_acceleration(&self, t: impl Into<Value>) -> Result<Quantity> {
        Ok((&self.angular_velocity(t)?.powi(2) * &self.radius).drop_angle())
    }

    /// Magnitude of the full acceleration at `t`.
    ///
    /// # Errors
    ///
    /// Fails for negative or non-time `t`.
    pub fn total_acceleration(&self, t: impl Into<Value>) -> Result<Quantity> {
        let tangential = self.tangential_acceleration().powi(2);
        let centripetal = self.centripetal_acceleration(t)?.powi(2);
        Ok(tangential.try_add(&centripetal)?.sqrt()?)
    }

    /// Non-negative times at which the accumulated angle equals `target`.
    ///
    /// # Errors
    ///
    /// See [`InverseSolver::time_for_angular_position`].
    pub fn time_for_angular_position(&self, target: impl Into<Value>) -> Result<TimeSolutions> {
        InverseSolver::default().time_for_angular_position(self, target)
    }

    /// Time at which the angular velocity reaches `target`.
    ///
    /// # Errors
    ///
    /// See [`InverseSolver::time_for_angular_velocity`].
    pub fn time_for_angular_velocity(&self, target: impl Into<Value>) -> Result<Quantity> {
        InverseSolver::default().time_for_angular_velocity(self, target)
    }

    /// Angular velocity at the angle `target`, without solving for time.
    ///
    /// # Errors
    ///
    /// See [`InverseSolver::angular_velocity_without_time`].
    pub fn angular_velocity_without_time(&self, target: impl Into<Value>) -> Result<Quantity> {
        InverseSolver::default().angular_velocity_without_time(self, target)
    }
}

impl Kinematics for AcceleratedCircular {
    type Output = PlanarQuantity;

    fn position(&self, t: impl Into<Value>) -> Result<PlanarQuantity> {
        let theta = self.angular_position(t)?.si_value();
        Ok(planar(radial(theta), self.radius.si_value(), Unit::meter()))
    }

    fn velocity(&self, t: impl Into<Value>) -> Result<PlanarQuantity> {
        let t = t.into();
        let theta = self.angular_position(t.clone())?.si_value();
        let speed = self.tangential_velocity(t)?.si_value();
        Ok(planar(tangential(theta), speed, Unit::meter_per_second()))
    }

    fn acceleration(&self, t: impl Into<Value>) -> Result<PlanarQuantity> {
        let t = t.into();
        let theta = self.angular_position(t.clone())?.si_value();
        let along = tangential(theta) * self.tangential_acceleration().si_value();
        let inward = -radial(theta) * self.centripetal_acceleration(t)?.si_value();
        Ok(PlanarQuantity::new(along + inward, Unit::meter_per_second_squared()))
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_relative_eq;

    use super::*;
    use crate::units::Dimension;

    #[test]
    fn quarter_turn_after_one_second() {
        let motion = UniformCircular::new(1.0, 0.0, FRAC_PI_2).expect("valid");
        let r = motion.position(1.0).expect("t >= 0");
        assert_relative_eq!(r.values()[0], 0.0, epsilon = 1.0e-10);
        assert_relative_eq!(r.values()[1], 1.0, epsilon = 1.0e-10);
        assert_eq!(r.dimension(), Dimension::LENGTH);
    }

    #[test]
    fn non_positive_radius_is_rejected() {
        for radius in [0.0, -1.0] {
            assert!(matches!(
                UniformCircular::with_radius(radius),
                Err(KinematicsError::InvalidArgument(_))
            ));
            assert!(matches!(
                AcceleratedCircular::with_radius(radius),
                Err(KinematicsError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn uniform_scalars_use_linear_dimensions() {
        let motion = UniformCircular::new(2.0, 0.0, 3.0).expect("valid");
        let v = motion.tangential_velocity();
        assert_eq!(v.dimension(), Dimension::VELOCITY);
        assert_relative_eq!(v.si_value(), 6.0, epsilon = 1.0e-12);
        let a = motion.centripetal_acceleration();
        assert_eq!(a.dimension(), Dimension::ACCELERATION);
        assert_relative_eq!(a.si_value(), 18.0, epsilon = 1.0e-12);
        assert_relative_eq!(motion.period().si_value(), 2.0 * PI / 3.0, epsilon = 1.0e-12);
    }

    #[test]
    fn body_at_rest_has_infinite_period() {
        let motion = UniformCircular::with_radius(1.0).expect("valid");
        assert!(motion.period().si_value().is_infinite());
        assert_relative_eq!(motion.frequency().si_value(), 0.0);
    }

    #[test]
    fn clockwise_rotation_has_negative_period_and_frequency() {
        let motion = UniformCircular::new(1.0, 0.0, -FRAC_PI_2).expect("valid");
        assert_relative_eq!(motion.period().si_value(), -4.0, epsilon = 1.0e-12);
        assert_relative_eq!(motion.frequency().si_value(), -0.25, epsilon = 1.0e-12);
    }

    #[test]
    fn velocity_is_tangent_to_the_path() {
        let motion = UniformCircular::new(1.5, 0.3, 2.0).expect("valid");
        let r = motion.position(0.8).expect("t >= 0");
        let v = motion.velocity(0.8).expect("t >= 0");
        assert_relative_eq!(r.values().dot(v.values()), 0.0, epsilon = 1.0e-10);
        let a = motion.acceleration(0.8).expect("t >= 0");
        assert_relative_eq!(a.values().norm(), 6.0, epsilon = 1.0e-10);
    }

    #[test]
    fn accelerated_motion_combines_tangential_and_centripetal_terms() {
        let motion = AcceleratedCircular::new(2.0, 0.0, 1.0, 0.5).expect("valid");
        let omega = motion.angular_velocity(2.0).expect("t >= 0");
        assert_relative_eq!(omega.si_value(), 2.0, epsilon = 1.0e-12);
        assert_relative_eq!(motion.tangential_acceleration().si_value(), 1.0, epsilon = 1.0e-12);
        let centripetal = motion.centripetal_acceleration(2.0).expect("t >= 0");
        assert_relative_eq!(centripetal.si_value(), 8.0, epsilon = 1.0e-12);
        let total = motion.total_acceleration(2.0).expect("t >= 0");
        assert_relative_eq!(total.si_value(), 65.0_f64.sqrt(), epsilon = 1.0e-12);
        let a = motion.acceleration(2.0).expect("t >= 0");
        assert_relative_eq!(a.values().norm(), total.si_value(), epsilon = 1.0e-10);
    }

    #[test]
    fn negative_time_is_rejected() {
        let motion = AcceleratedCircular::with_radius(1.0).expect("valid");
        assert!(matches!(motion.position(-0.1), Err(KinematicsError::InvalidArgument(_))));
        assert!(matches!(motion.angular_velocity(-0.1), Err(KinematicsError::InvalidArgument(_))));
    }
}

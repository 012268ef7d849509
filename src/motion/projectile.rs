use std::f64::consts::FRAC_PI_2;

use tracing::debug;

use super::{elapsed, Field, Kinematics};
use crate::constants::STANDARD_GRAVITY;
use crate::errors::{KinematicsError, Result};
use crate::math::{Scalar, R2};
use crate::units::{PlanarQuantity, Quantity, Unit, Value};

/// Launch from the origin over level ground under uniform gravity.
///
/// `x` is horizontal and `y` points up. Position and velocity are defined
/// for `t >= 0`; the trajectory is not cut off at landing.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    launch_speed: Quantity,
    launch_angle: Quantity,
    gravity: Quantity,
}

impl Projectile {
    /// Launch at `speed` (m/s) and `angle` above the horizontal under standard gravity.
    ///
    /// Bare angles are radians; pass `Quantity::of(45.0, "deg")` for degrees.
    ///
    /// # Errors
    ///
    /// Fails on wrong dimensions, a negative speed, or an angle outside `(0, 90°]`.
    pub fn new(speed: impl Into<Value>, angle: impl Into<Value>) -> Result<Self> {
        Self::with_gravity(speed, angle, STANDARD_GRAVITY)
    }

    /// Launch under a gravitational acceleration of magnitude `gravity` (m/s²).
    ///
    /// # Errors
    ///
    /// As [`Self::new`], and when `gravity` is not strictly positive.
    pub fn with_gravity(
        speed: impl Into<Value>,
        angle: impl Into<Value>,
        gravity: impl Into<Value>,
    ) -> Result<Self> {
        let launch_speed = Field::Velocity.resolve(speed)?;
        let launch_angle = Field::Angle.resolve(angle)?;
        let gravity = Field::Acceleration.resolve(gravity)?;

        if !(launch_speed.si_value() >= 0.0 && launch_speed.is_finite()) {
            debug!(speed = launch_speed.si_value(), "rejecting launch speed");
            return Err(KinematicsError::invalid(format!(
                "launch speed cannot be negative, got {launch_speed}"
            )));
        }
        let theta = launch_angle.si_value();
        // 90 deg converted from degrees may land one ulp above π/2.
        if !(theta > 0.0 && theta <= FRAC_PI_2 * (1.0 + Scalar::EPSILON)) {
            debug!(angle = theta, "rejecting launch angle");
            return Err(KinematicsError::invalid(format!(
                "launch angle must lie in (0, 90 deg], got {launch_angle}"
            )));
        }
        if !(gravity.si_value() > 0.0 && gravity.is_finite()) {
            return Err(KinematicsError::invalid(format!("gravity must be positive, got {gravity}")));
        }
        Ok(Self { launch_speed, launch_angle, gravity })
    }

    /// Speed at launch.
    #[must_use]
    pub const fn launch_speed(&self) -> &Quantity {
        &self.launch_speed
    }

    /// Angle above the horizontal at launch.
    #[must_use]
    pub const fn launch_angle(&self) -> &Quantity {
        &self.launch_angle
    }

    /// Magnitude of the downward acceleration.
    #[must_use]
    pub const fn gravity(&self) -> &Quantity {
        &self.gravity
    }

    /// Launch velocity components `(v cos θ, v sin θ)` in m/s.
    fn launch_components(&self) -> R2 {
        let (sin, cos) = self.launch_angle.si_value().sin_cos();
        R2::new(cos, sin) * self.launch_speed.si_value()
    }

    /// Time until the body is back at launch height, `2 v sin θ / g`.
    #[must_use]
    pub fn time_of_flight(&self) -> Quantity {
        Quantity::seconds(2.0 * self.launch_components().y / self.gravity.si_value())
    }

    /// Peak height above the launch point, `v² sin² θ / 2g`.
    #[must_use]
    pub fn max_height(&self) -> Quantity {
        let vy = self.launch_components().y;
        Quantity::meters(vy * vy / (2.0 * self.gravity.si_value()))
    }

    /// Horizontal distance at landing, `v² sin 2θ / g`.
    #[must_use]
    pub fn range(&self) -> Quantity {
        let v = self.launch_speed.si_value();
        let two_theta = 2.0 * self.launch_angle.si_value();
        Quantity::meters(v * v * two_theta.sin() / self.gravity.si_value())
    }
}

impl Kinematics for Projectile {
    type Output = PlanarQuantity;

    fn position(&self, t: impl Into<Value>) -> Result<PlanarQuantity> {
        let t = elapsed(t)?.si_value();
        let launch = self.launch_components();
        let drop = 0.5 * self.gravity.si_value() * t * t;
        Ok(PlanarQuantity::new(R2::new(launch.x * t, launch.y.mul_add(t, -drop)), Unit::meter()))
    }

    fn velocity(&self, t: impl Into<Value>) -> Result<PlanarQuantity> {
        let t = elapsed(t)?.si_value();
        let launch = self.launch_components();
        let vy = self.gravity.si_value().mul_add(-t, launch.y);
        Ok(PlanarQuantity::new(R2::new(launch.x, vy), Unit::meter_per_second()))
    }

    fn acceleration(&self, t: impl Into<Value>) -> Result<PlanarQuantity> {
        Field::Time.resolve(t)?;
        Ok(PlanarQuantity::new(
            R2::new(0.0, -self.gravity.si_value()),
            Unit::meter_per_second_squared(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_4;

    use approx::assert_relative_eq;

    use super::*;
    use crate::units::Dimension;

    fn forty_five() -> Projectile {
        Projectile::new(20.0, Quantity::of(45.0, "deg").expect("known unit")).expect("valid")
    }

    #[test]
    fn closed_forms_at_forty_five_degrees() {
        let shot = forty_five();
        let g = STANDARD_GRAVITY;
        assert_relative_eq!(shot.time_of_flight().si_value(), 40.0 * FRAC_PI_4.sin() / g, epsilon = 1.0e-12);
        assert_relative_eq!(shot.max_height().si_value(), 100.0 / g, epsilon = 1.0e-12);
        assert_relative_eq!(shot.range().si_value(), 400.0 / g, epsilon = 1.0e-12);
        assert_eq!(shot.range().dimension(), Dimension::LENGTH);
    }

    #[test]
    fn trajectory_lands_at_range_after_flight_time() {
        let shot = Projectile::new(15.0, 0.6).expect("valid");
        let landing = shot.position(shot.time_of_flight()).expect("t >= 0");
        assert_relative_eq!(landing.values()[0], shot.range().si_value(), epsilon = 1.0e-9);
        assert_relative_eq!(landing.values()[1], 0.0, epsilon = 1.0e-9);

        let apex_time = shot.time_of_flight().scale(0.5);
        let apex = shot.position(apex_time.clone()).expect("t >= 0");
        assert_relative_eq!(apex.values()[1], shot.max_height().si_value(), epsilon = 1.0e-9);
        let v = shot.velocity(apex_time).expect("t >= 0");
        assert_relative_eq!(v.values()[1], 0.0, epsilon = 1.0e-12);
    }

    #[test]
    fn vertical_launch_has_no_range() {
        let shot = Projectile::new(10.0, Quantity::of(90.0, "deg").expect("known unit"))
            .expect("90 degrees is allowed");
        assert_relative_eq!(shot.range().si_value(), 0.0, epsilon = 1.0e-12);
        assert_relative_eq!(shot.max_height().si_value(), 50.0 / STANDARD_GRAVITY, epsilon = 1.0e-12);
    }

    #[test]
    fn invalid_launches_are_rejected() {
        for angle in [0.0, -0.1, 1.6] {
            assert!(matches!(
                Projectile::new(10.0, angle),
                Err(KinematicsError::InvalidArgument(_))
            ));
        }
        assert!(matches!(Projectile::new(-1.0, 0.5), Err(KinematicsError::InvalidArgument(_))));
        assert!(matches!(
            Projectile::with_gravity(10.0, 0.5, 0.0),
            Err(KinematicsError::InvalidArgument(_))
        ));
        assert!(matches!(
            Projectile::new(Quantity::meters(10.0), 0.5),
            Err(KinematicsError::Units(_))
        ));
    }

    #[test]
    fn gravity_is_the_only_acceleration() {
        let shot = forty_five();
        let a = shot.acceleration(-1.0).expect("constant for any time");
        assert_relative_eq!(a.values()[0], 0.0);
        assert_relative_eq!(a.values()[1], -STANDARD_GRAVITY);
        assert!(matches!(shot.position(-1.0), Err(KinematicsError::InvalidArgument(_))));
    }
}

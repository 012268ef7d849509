//! Inverse queries on constant-acceleration motion.
//!
//! [`InverseSolver::time_for_position`] solves `½ a t² + v0 t − Δx = 0` for
//! the elapsed times at which a body passes a target, and
//! [`InverseSolver::velocity_without_time`] uses `v² = v0² + 2 a Δx` to
//! recover the velocity there. The same equations in angle, angular velocity
//! and angular acceleration answer the queries on accelerated circular
//! motion. Coefficients within the solver tolerance of zero take the
//! degenerate branches.
//!
//! ## Root selection
//!
//! Only roots `t >= 0` are kept. Roots in `[-tolerance, 0)` are clamped to
//! zero, the survivors are sorted ascending, and near-equal roots are
//! merged, so a double root (the vertex of the parabola) is reported once.

use std::ops::Index;

use tracing::{debug, trace};

use crate::config::NumericSettings;
use crate::constants::DEFAULT_TOLERANCE;
use crate::errors::{KinematicsError, Result};
use crate::math::{is_negligible, Scalar};
use crate::motion::{AcceleratedCircular, AcceleratedRectilinear, Field, UniformRectilinear};
use crate::units::{Quantity, Value};

/// Non-empty, ascending set of elapsed times returned by the inverse solvers.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSolutions {
    times: Vec<Quantity>,
}

impl TimeSolutions {
    fn from_seconds(seconds: impl IntoIterator<Item = Scalar>) -> Self {
        Self { times: seconds.into_iter().map(Quantity::seconds).collect() }
    }

    /// Times in ascending order.
    #[must_use]
    pub fn times(&self) -> &[Quantity] {
        &self.times
    }

    /// Earliest time.
    #[must_use]
    pub fn first(&self) -> &Quantity {
        &self.times[0]
    }

    /// Latest time.
    #[must_use]
    pub fn last(&self) -> &Quantity {
        &self.times[self.times.len() - 1]
    }

    /// Number of distinct solutions (one or two).
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether the set is empty. Solvers never return an empty set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Times as plain seconds.
    #[must_use]
    pub fn seconds(&self) -> Vec<Scalar> {
        self.times.iter().map(Quantity::si_value).collect()
    }

    /// Iterator over the times.
    pub fn iter(&self) -> std::slice::Iter<'_, Quantity> {
        self.times.iter()
    }
}

impl Index<usize> for TimeSolutions {
    type Output = Quantity;

    fn index(&self, index: usize) -> &Quantity {
        &self.times[index]
    }
}

impl<'a> IntoIterator for &'a TimeSolutions {
    type Item = &'a Quantity;
    type IntoIter = std::slice::Iter<'a, Quantity>;

    fn into_iter(self) -> Self::IntoIter {
        self.times.iter()
    }
}

impl IntoIterator for TimeSolutions {
    type Item = Quantity;
    type IntoIter = std::vec::IntoIter<Quantity>;

    fn into_iter(self) -> Self::IntoIter {
        self.times.into_iter()
    }
}

/// Inverse queries on constant-rate motions, sharing one zero tolerance.
///
/// `tolerance` is an absolute threshold in SI units below which a rate, an
/// acceleration or a difference counts as zero. The discriminant of the
/// quadratic branch is compared against the tolerance scaled by the size of
/// its terms, so a target at the turning point is found at any magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseSolver {
    tolerance: Scalar,
}

impl Default for InverseSolver {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

impl InverseSolver {
    /// Solver with an explicit zero tolerance.
    #[must_use]
    pub const fn new(tolerance: Scalar) -> Self {
        Self { tolerance }
    }

    /// Solver configured from loaded numeric settings.
    #[must_use]
    pub const fn from_settings(settings: &NumericSettings) -> Self {
        Self::new(settings.tolerance)
    }

    /// Absolute zero tolerance in SI units.
    #[must_use]
    pub const fn tolerance(&self) -> Scalar {
        self.tolerance
    }

    /// Time at which a uniform motion passes `target`.
    ///
    /// # Errors
    ///
    /// - [`KinematicsError::Unreachable`] when the body is at rest away from `target`.
    /// - [`KinematicsError::NegativeTime`] when `target` was passed before `t = 0`.
    /// - [`KinematicsError::Units`] when `target` is not a length.
    pub fn uniform_time_for_position(
        &self,
        motion: &UniformRectilinear,
        target: impl Into<Value>,
    ) -> Result<TimeSolutions> {
        let target = Field::Position.resolve(target)?;
        let rate = motion.constant_velocity().si_value();
        let t = self.linear_crossing(motion.initial_position(), rate, &target)?;
        Ok(TimeSolutions::from_seconds([t]))
    }

    /// Non-negative times at which `motion` passes `target`, in ascending order.
    ///
    /// # Errors
    ///
    /// - [`KinematicsError::NoRealSolution`] when the discriminant is negative.
    /// - [`KinematicsError::NegativeTime`] when every real root is negative.
    /// - [`KinematicsError::Unreachable`] when the body never moves and sits away from `target`.
    /// - [`KinematicsError::Units`] when `target` is not a length.
    pub fn time_for_position(
        &self,
        motion: &AcceleratedRectilinear,
        target: impl Into<Value>,
    ) -> Result<TimeSolutions> {
        let target = Field::Position.resolve(target)?;
        self.crossing_times(
            motion.initial_position(),
            motion.initial_velocity().si_value(),
            motion.constant_acceleration().si_value(),
            &target,
        )
    }

    /// Velocity of `motion` when it passes `target`, from `v² = v0² + 2 a Δx`.
    ///
    /// The sign is that of `v0 + a·Δx` evaluated on SI magnitudes, mixing a
    /// displacement into a velocity-time expression. It is not a physical
    /// identity: a body that passes `target` twice gets the same sign both times.
    ///
    /// # Errors
    ///
    /// - [`KinematicsError::NoRealSolution`] when `v² < 0`, i.e. the target is never reached.
    /// - [`KinematicsError::Units`] when `target` is not a length.
    pub fn velocity_without_time(
        &self,
        motion: &AcceleratedRectilinear,
        target: impl Into<Value>,
    ) -> Result<Quantity> {
        let target = Field::Position.resolve(target)?;
        let v = self.rate_without_time(
            motion.initial_position(),
            motion.initial_velocity().si_value(),
            motion.constant_acceleration().si_value(),
            &target,
        )?;
        Ok(Quantity::meters_per_second(v))
    }

    /// Time at which `motion` reaches the velocity `target`, `t = (v − v0) / a`.
    ///
    /// # Errors
    ///
    /// - [`KinematicsError::Unreachable`] when `a ≈ 0` and `target` differs from `v0`.
    /// - [`KinematicsError::NegativeTime`] when `target` was reached before `t = 0`.
    /// - [`KinematicsError::Units`] when `target` is not a velocity.
    pub fn time_for_velocity(
        &self,
        motion: &AcceleratedRectilinear,
        target: impl Into<Value>,
    ) -> Result<Quantity> {
        let target = Field::Velocity.resolve(target)?;
        let rate = motion.constant_acceleration().si_value();
        let t = self.linear_crossing(motion.initial_velocity(), rate, &target)?;
        Ok(Quantity::seconds(t))
    }

    /// Displacement covered while the velocity changes to `target`, `(v² − v0²) / 2a`.
    ///
    /// # Errors
    ///
    /// - [`KinematicsError::Unreachable`] when `a ≈ 0` and `target` differs from `v0`.
    /// - [`KinematicsError::InvalidArgument`] when `a ≈ 0` and `target` equals `v0`,
    ///   since every displacement then fits.
    /// - [`KinematicsError::Units`] when `target` is not a velocity.
    pub fn displacement_without_time(
        &self,
        motion: &AcceleratedRectilinear,
        target: impl Into<Value>,
    ) -> Result<Quantity> {
        let target = Field::Velocity.resolve(target)?;
        let dx = self.change_without_time(
            motion.initial_velocity(),
            motion.constant_acceleration().si_value(),
            &target,
        )?;
        Ok(Quantity::meters(dx))
    }

    /// Non-negative times at which `motion` sweeps through the angle `target`.
    ///
    /// Angles are not wrapped: `target` is compared with the accumulated
    /// `θ0 + ω0 t + ½ α t²`.
    ///
    /// # Errors
    ///
    /// As [`Self::time_for_position`], with `target` an angle.
    pub fn time_for_angular_position(
        &self,
        motion: &AcceleratedCircular,
        target: impl Into<Value>,
    ) -> Result<TimeSolutions> {
        let target = Field::Angle.resolve(target)?;
        self.crossing_times(
            motion.initial_angle(),
            motion.initial_angular_velocity().si_value(),
            motion.angular_acceleration().si_value(),
            &target,
        )
    }

    /// Time at which `motion` reaches the angular velocity `target`, `t = (ω − ω0) / α`.
    ///
    /// # Errors
    ///
    /// As [`Self::time_for_velocity`], with `target` an angular velocity.
    pub fn time_for_angular_velocity(
        &self,
        motion: &AcceleratedCircular,
        target: impl Into<Value>,
    ) -> Result<Quantity> {
        let target = Field::AngularVelocity.resolve(target)?;
        let rate = motion.angular_acceleration().si_value();
        let t = self.linear_crossing(motion.initial_angular_velocity(), rate, &target)?;
        Ok(Quantity::seconds(t))
    }

    /// Angular velocity of `motion` at the angle `target`, from `ω² = ω0² + 2 α Δθ`.
    ///
    /// The sign follows the same `ω0 + α·Δθ` rule as [`Self::velocity_without_time`].
    ///
    /// # Errors
    ///
    /// As [`Self::velocity_without_time`], with `target` an angle.
    pub fn angular_velocity_without_time(
        &self,
        motion: &AcceleratedCircular,
        target: impl Into<Value>,
    ) -> Result<Quantity> {
        let target = Field::Angle.resolve(target)?;
        let omega = self.rate_without_time(
            motion.initial_angle(),
            motion.initial_angular_velocity().si_value(),
            motion.angular_acceleration().si_value(),
            &target,
        )?;
        Ok(Quantity::radians_per_second(omega))
    }

    fn is_zero(&self, value: Scalar) -> bool {
        is_negligible(value, self.tolerance)
    }

    /// Zero band for `rate² + 2·accel·Δ`, proportional to its largest term.
    fn discriminant_band(&self, rate: Scalar, accel_term: Scalar) -> Scalar {
        self.tolerance * (rate * rate).max(accel_term.abs()).max(1.0)
    }

    /// Solves `start + rate·t = target` for `t >= 0`.
    fn linear_crossing(&self, start: &Quantity, rate: Scalar, target: &Quantity) -> Result<Scalar> {
        let gap = target.try_sub(start)?.si_value();

        if self.is_zero(rate) {
            if self.is_zero(gap) {
                debug!("already on the target");
                return Ok(0.0);
            }
            debug!(gap, "constant value away from the target");
            return Err(KinematicsError::Unreachable {
                target: target.clone(),
                fixed: start.clone(),
            });
        }

        let t = gap / rate;
        trace!(t, "linear root");
        if t < -self.tolerance {
            return Err(KinematicsError::NegativeTime { roots: vec![t] });
        }
        Ok(t.max(0.0))
    }

    /// Solves `start + rate·t + ½ accel·t² = target` for `t >= 0`.
    fn crossing_times(
        &self,
        start: &Quantity,
        rate: Scalar,
        accel: Scalar,
        target: &Quantity,
    ) -> Result<TimeSolutions> {
        if self.is_zero(accel) {
            debug!(accel, "negligible acceleration, solving the linear equation");
            let t = self.linear_crossing(start, rate, target)?;
            return Ok(TimeSolutions::from_seconds([t]));
        }

        let gap = target.try_sub(start)?.si_value();
        let accel_term = 2.0 * accel * gap;
        let discriminant = rate.mul_add(rate, accel_term);
        let band = self.discriminant_band(rate, accel_term);
        debug!(discriminant, band, "quadratic branch");
        if discriminant < -band {
            return Err(KinematicsError::NoRealSolution { discriminant });
        }

        let discriminant = if discriminant.abs() <= band { 0.0 } else { discriminant };
        let roots = quadratic_roots(0.5 * accel, rate, -gap, discriminant);
        trace!(?roots, "real roots");
        self.select_non_negative(roots)
    }

    /// Signed `√(rate² + 2·accel·Δ)` with the sign of `rate + accel·Δ`.
    fn rate_without_time(
        &self,
        start: &Quantity,
        rate: Scalar,
        accel: Scalar,
        target: &Quantity,
    ) -> Result<Scalar> {
        let gap = target.try_sub(start)?.si_value();
        let accel_term = 2.0 * accel * gap;
        let squared = rate.mul_add(rate, accel_term);
        if squared < -self.discriminant_band(rate, accel_term) {
            debug!(squared, "target beyond the turning point");
            return Err(KinematicsError::NoRealSolution { discriminant: squared });
        }
        let magnitude = squared.max(0.0).sqrt();

        let sign_source = accel.mul_add(gap, rate);
        let sign = if sign_source >= 0.0 { 1.0 } else { -1.0 };
        trace!(sign_source, sign, "rate sign");
        Ok(sign * magnitude)
    }

    /// `(target² − start²) / 2·accel`, the change of the integrated value.
    fn change_without_time(&self, start: &Quantity, accel: Scalar, target: &Quantity) -> Result<Scalar> {
        let gap = target.try_sub(start)?.si_value();
        if self.is_zero(accel) {
            if self.is_zero(gap) {
                return Err(KinematicsError::invalid(
                    "displacement is undetermined when neither rate nor acceleration changes",
                ));
            }
            return Err(KinematicsError::Unreachable {
                target: target.clone(),
                fixed: start.clone(),
            });
        }
        let (from, to) = (start.si_value(), target.si_value());
        Ok((to - from) * (to + from) / (2.0 * accel))
    }

    fn select_non_negative(&self, roots: Vec<Scalar>) -> Result<TimeSolutions> {
        let tolerance = self.tolerance;
        let mut kept: Vec<Scalar> =
            roots.iter().copied().filter(|t| *t >= -tolerance).map(|t| t.max(0.0)).collect();
        if kept.is_empty() {
            debug!(?roots, "every root lies in the past");
            return Err(KinematicsError::NegativeTime { roots });
        }
        kept.sort_by(Scalar::total_cmp);
        kept.dedup_by(|later, earlier| (*later - *earlier).abs() <= tolerance * earlier.abs().max(1.0));
        Ok(TimeSolutions::from_seconds(kept))
    }
}

/// Roots of `c2 t² + c1 t + c0` given the discriminant `c1² − 4 c2 c0 >= 0`.
///
/// Uses the cancellation-free pairing `q = −½ (c1 + sgn(c1) √D)`,
/// `t = q / c2` and `t = c0 / q`.
fn quadratic_roots(c2: Scalar, c1: Scalar, c0: Scalar, discriminant: Scalar) -> Vec<Scalar> {
    let q = -0.5 * c1.signum().mul_add(discriminant.sqrt(), c1);
    if q == 0.0 {
        return vec![0.0];
    }
    vec![q / c2, c0 / q]
}

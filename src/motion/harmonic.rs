use serde::{Deserialize, Serialize};

use super::{Field, Kinematics};
use crate::constants::{angular_frequency, frequency_from_angular, period_from_angular};
use crate::errors::{KinematicsError, Result};
use crate::math::{phasor, CScalar, Scalar};
use crate::units::{Quantity, Unit, Value};

/// Sinusoidal oscillation `x(t) = A cos(ω t + φ)`.
///
/// Evaluated as the real part of the rotating phasor `A e^{i(ω t + φ)}`.
/// Defined for every real `t`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleHarmonic {
    amplitude: Quantity,
    angular_frequency: Quantity,
    phase: Quantity,
}

impl SimpleHarmonic {
    /// Creates an oscillation from amplitude (m), angular frequency (rad/s) and phase (rad).
    ///
    /// # Errors
    ///
    /// Fails when any argument is a quantity of the wrong dimension.
    pub fn new(
        amplitude: impl Into<Value>,
        angular_frequency: impl Into<Value>,
        phase: impl Into<Value>,
    ) -> Result<Self> {
        Ok(Self {
            amplitude: Field::Amplitude.resolve(amplitude)?,
            angular_frequency: Field::AngularFrequency.resolve(angular_frequency)?,
            phase: Field::Phase.resolve(phase)?,
        })
    }

    /// Creates an oscillation from a linear frequency in hertz.
    ///
    /// # Errors
    ///
    /// Fails when amplitude or phase are quantities of the wrong dimension.
    pub fn from_frequency(
        amplitude: impl Into<Value>,
        hz: Scalar,
        phase: impl Into<Value>,
    ) -> Result<Self> {
        Self::new(amplitude, angular_frequency(hz), phase)
    }

    /// Peak displacement.
    #[must_use]
    pub const fn amplitude(&self) -> &Quantity {
        &self.amplitude
    }

    /// Angular frequency `ω`.
    #[must_use]
    pub const fn angular_frequency(&self) -> &Quantity {
        &self.angular_frequency
    }

    /// Phase at `t = 0`.
    #[must_use]
    pub const fn phase(&self) -> &Quantity {
        &self.phase
    }

    /// Time for one oscillation, `2π / ω`; infinite when `ω = 0`.
    #[must_use]
    pub fn period(&self) -> Quantity {
        Quantity::seconds(period_from_angular(self.angular_frequency.si_value()))
    }

    /// Oscillations per second, `ω / 2π`, signed like `ω`.
    #[must_use]
    pub fn frequency(&self) -> Quantity {
        Quantity::new(frequency_from_angular(self.angular_frequency.si_value()), Unit::hertz())
    }

    /// Complex displacement `A e^{i(ω t + φ)}` in SI units.
    pub(crate) fn phasor_at(&self, t: Scalar) -> CScalar {
        let theta = self.angular_frequency.si_value().mul_add(t, self.phase.si_value());
        phasor(theta) * self.amplitude.si_value()
    }

    /// `(x, v, a)` in SI units at `t` seconds.
    pub(crate) fn state_at(&self, t: Scalar) -> [Scalar; 3] {
        let z = self.phasor_at(t);
        let omega = self.angular_frequency.si_value();
        let i_omega = CScalar::new(0.0, omega);
        [z.re, (i_omega * z).re, (-(omega * omega) * z).re]
    }
}

fn seconds(t: impl Into<Value>) -> Result<Scalar> {
    Ok(Field::Time.resolve(t)?.si_value())
}

impl Kinematics for SimpleHarmonic {
    type Output = Quantity;

    fn position(&self, t: impl Into<Value>) -> Result<Quantity> {
        Ok(Quantity::meters(self.state_at(seconds(t)?)[0]))
    }

    fn velocity(&self, t: impl Into<Value>) -> Result<Quantity> {
        Ok(Quantity::meters_per_second(self.state_at(seconds(t)?)[1]))
    }

    fn acceleration(&self, t: impl Into<Value>) -> Result<Quantity> {
        Ok(Quantity::meters_per_second_squared(self.state_at(seconds(t)?)[2]))
    }
}

/// Untyped description of one oscillation, as read from YAML or JSON.
///
/// Fields are optional so that missing entries surface as a
/// [`KinematicsError::InvalidArgument`] naming the component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HarmonicRecord {
    /// Amplitude in metres.
    pub amplitude: Option<Scalar>,
    /// Angular frequency in rad/s.
    pub angular_frequency: Option<Scalar>,
    /// Phase in radians.
    pub phase: Option<Scalar>,
}

impl HarmonicRecord {
    /// Record with every field set.
    #[must_use]
    pub const fn new(amplitude: Scalar, angular_frequency: Scalar, phase: Scalar) -> Self {
        Self {
            amplitude: Some(amplitude),
            angular_frequency: Some(angular_frequency),
            phase: Some(phase),
        }
    }

    fn require(index: usize, name: &str, value: Option<Scalar>) -> Result<Scalar> {
        match value {
            Some(v) if v.is_finite() => Ok(v),
            Some(v) => Err(KinematicsError::invalid(format!(
                "component {index}: `{name}` must be finite, got {v}"
            ))),
            None => Err(KinematicsError::invalid(format!("component {index}: missing `{name}`"))),
        }
    }

    fn to_component(&self, index: usize) -> Result<SimpleHarmonic> {
        SimpleHarmonic::new(
            Self::require(index, "amplitude", self.amplitude)?,
            Self::require(index, "angular_frequency", self.angular_frequency)?,
            Self::require(index, "phase", self.phase)?,
        )
    }
}

/// Superposition of simple harmonic oscillations.
///
/// Position, velocity and acceleration are the sums over components.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeHarmonic {
    components: Vec<SimpleHarmonic>,
}

impl CompositeHarmonic {
    /// Creates a superposition.
    ///
    /// # Errors
    ///
    /// Returns [`KinematicsError::InvalidArgument`] for an empty list.
    pub fn new(components: Vec<SimpleHarmonic>) -> Result<Self> {
        if components.is_empty() {
            return Err(KinematicsError::invalid(
                "a composite oscillation needs at least one component",
            ));
        }
        Ok(Self { components })
    }

    /// Builds a superposition from loosely typed records.
    ///
    /// # Errors
    ///
    /// Fails for an empty list or for a record with a missing or non-finite field.
    pub fn from_records(records: &[HarmonicRecord]) -> Result<Self> {
        let components = records
            .iter()
            .enumerate()
            .map(|(index, record)| record.to_component(index))
            .collect::<Result<Vec<_>>>()?;
        Self::new(components)
    }

    /// The superposed oscillations.
    #[must_use]
    pub fn components(&self) -> &[SimpleHarmonic] {
        &self.components
    }

    fn sum_at(&self, t: Scalar, slot: usize) -> Scalar {
        self.components.iter().map(|c| c.state_at(t)[slot]).sum()
    }
}

impl Kinematics for CompositeHarmonic {
    type Output = Quantity;

    fn position(&self, t: impl Into<Value>) -> Result<Quantity> {
        Ok(Quantity::meters(self.sum_at(seconds(t)?, 0)))
    }

    fn velocity(&self, t: impl Into<Value>) -> Result<Quantity> {
        Ok(Quantity::meters_per_second(self.sum_at(seconds(t)?, 1)))
    }

    fn acceleration(&self, t: impl Into<Value>) -> Result<Quantity> {
        Ok(Quantity::meters_per_second_squared(self.sum_at(seconds(t)?, 2)))
    }
}

//! The shared motion contract and its closed-form variants.
//!
//! Every variant stores immutable initial conditions and evaluates position,
//! velocity and acceleration as pure functions of elapsed time. [`Motion`]
//! is the closed sum of all variants for callers that do not care which
//! family they hold.

mod circular;
mod harmonic;
mod projectile;
mod rectilinear;
mod spatial;

pub use circular::{AcceleratedCircular, UniformCircular};
pub use harmonic::{CompositeHarmonic, HarmonicRecord, SimpleHarmonic};
pub use projectile::Projectile;
pub use rectilinear::{AcceleratedRectilinear, UniformRectilinear};
pub use spatial::SpatialMotion;

use tracing::debug;

use crate::errors::{KinematicsError, Result};
use crate::math::Scalar;
use crate::units::{
    Dimension, PlanarQuantity, Quantity, QuantityVector, SpatialQuantity, Unit, Value, VectorValue,
};

/// Position, velocity and acceleration as functions of elapsed time.
///
/// Time arguments accept a time [`Quantity`] or a bare number of seconds.
pub trait Kinematics {
    /// What an evaluation returns: a scalar or a vector quantity.
    type Output;

    /// Position after `t` has elapsed.
    ///
    /// # Errors
    ///
    /// Fails if `t` is not a time, or lies outside the variant's time domain.
    fn position(&self, t: impl Into<Value>) -> Result<Self::Output>;

    /// Velocity after `t` has elapsed.
    ///
    /// # Errors
    ///
    /// Fails if `t` is not a time, or lies outside the variant's time domain.
    fn velocity(&self, t: impl Into<Value>) -> Result<Self::Output>;

    /// Acceleration after `t` has elapsed.
    ///
    /// # Errors
    ///
    /// Fails if `t` is not a time, or lies outside the variant's time domain.
    fn acceleration(&self, t: impl Into<Value>) -> Result<Self::Output>;
}

/// Configuration fields and the unit a bare number is promoted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Elapsed time (s).
    Time,
    /// Linear position (m).
    Position,
    /// Linear velocity (m/s).
    Velocity,
    /// Linear acceleration (m/s²).
    Acceleration,
    /// Radius of a circular path (m).
    Radius,
    /// Angular position (rad).
    Angle,
    /// Angular velocity (rad/s).
    AngularVelocity,
    /// Angular acceleration (rad/s²).
    AngularAcceleration,
    /// Oscillation amplitude (m).
    Amplitude,
    /// Oscillation angular frequency (rad/s).
    AngularFrequency,
    /// Oscillation phase (rad).
    Phase,
}

impl Field {
    /// Unit used to promote bare numbers for this field.
    #[must_use]
    pub fn default_unit(self) -> Unit {
        match self {
            Self::Time => Unit::second(),
            Self::Position | Self::Radius | Self::Amplitude => Unit::meter(),
            Self::Velocity => Unit::meter_per_second(),
            Self::Acceleration => Unit::meter_per_second_squared(),
            Self::Angle | Self::Phase => Unit::radian(),
            Self::AngularVelocity | Self::AngularFrequency => Unit::radian_per_second(),
            Self::AngularAcceleration => Unit::radian_per_second_squared(),
        }
    }

    /// Dimension a supplied quantity must have.
    #[must_use]
    pub fn dimension(self) -> Dimension {
        self.default_unit().dimension()
    }

    /// Human-readable field name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Position => "position",
            Self::Velocity => "velocity",
            Self::Acceleration => "acceleration",
            Self::Radius => "radius",
            Self::Angle => "angle",
            Self::AngularVelocity => "angular velocity",
            Self::AngularAcceleration => "angular acceleration",
            Self::Amplitude => "amplitude",
            Self::AngularFrequency => "angular frequency",
            Self::Phase => "phase",
        }
    }

    /// Resolves a raw number or quantity into this field's canonical quantity.
    ///
    /// # Errors
    ///
    /// Returns a dimension mismatch if a quantity of another dimension is supplied.
    pub fn resolve(self, value: impl Into<Value>) -> Result<Quantity> {
        let quantity = value.into().resolve(&self.default_unit())?;
        Ok(quantity)
    }

    /// Vector counterpart of [`Field::resolve`].
    ///
    /// # Errors
    ///
    /// Returns a dimension mismatch if a vector of another dimension is supplied.
    pub fn resolve_vector<const D: usize>(
        self,
        value: impl Into<VectorValue<D>>,
    ) -> Result<QuantityVector<D>> {
        let vector = value.into().resolve(&self.default_unit())?;
        Ok(vector)
    }
}

/// Resolves an elapsed time that must not lie before the start of the motion.
pub(crate) fn elapsed(t: impl Into<Value>) -> Result<Quantity> {
    let t = Field::Time.resolve(t)?;
    if !t.is_finite() {
        return Err(KinematicsError::invalid(format!("elapsed time must be finite, got {t}")));
    }
    if t.si_value() < 0.0 {
        debug!(time = t.si_value(), "rejecting negative elapsed time");
        return Err(KinematicsError::invalid(format!(
            "elapsed time cannot be negative, got {t}"
        )));
    }
    Ok(t)
}

/// Result of evaluating a [`Motion`]: a scalar or a 2D/3D vector quantity.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Observable {
    /// One-dimensional motion (rectilinear, harmonic).
    Scalar(Quantity),
    /// Planar motion (circular, projectile).
    Planar(PlanarQuantity),
    /// Spatial motion.
    Spatial(SpatialQuantity),
}

impl Observable {
    /// Scalar payload, if any.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<&Quantity> {
        match self {
            Self::Scalar(q) => Some(q),
            _ => None,
        }
    }

    /// Planar payload, if any.
    #[must_use]
    pub const fn as_planar(&self) -> Option<&PlanarQuantity> {
        match self {
            Self::Planar(v) => Some(v),
            _ => None,
        }
    }

    /// Spatial payload, if any.
    #[must_use]
    pub const fn as_spatial(&self) -> Option<&SpatialQuantity> {
        match self {
            Self::Spatial(v) => Some(v),
            _ => None,
        }
    }

    /// Physical dimension of the payload.
    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        match self {
            Self::Scalar(q) => q.dimension(),
            Self::Planar(v) => v.dimension(),
            Self::Spatial(v) => v.dimension(),
        }
    }

    /// Components in SI units, one per axis.
    #[must_use]
    pub fn si_components(&self) -> Vec<Scalar> {
        match self {
            Self::Scalar(q) => vec![q.si_value()],
            Self::Planar(v) => v.si_values().iter().copied().collect(),
            Self::Spatial(v) => v.si_values().iter().copied().collect(),
        }
    }
}

impl From<Quantity> for Observable {
    fn from(value: Quantity) -> Self {
        Self::Scalar(value)
    }
}

impl From<PlanarQuantity> for Observable {
    fn from(value: PlanarQuantity) -> Self {
        Self::Planar(value)
    }
}

impl From<SpatialQuantity> for Observable {
    fn from(value: SpatialQuantity) -> Self {
        Self::Spatial(value)
    }
}

/// Tag naming a motion family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionKind {
    /// Constant velocity along a line.
    UniformRectilinear,
    /// Constant acceleration along a line.
    AcceleratedRectilinear,
    /// Constant angular velocity on a circle.
    UniformCircular,
    /// Constant angular acceleration on a circle.
    AcceleratedCircular,
    /// Constant acceleration in three dimensions.
    Spatial,
    /// Launch under uniform gravity.
    Projectile,
    /// Single sinusoidal oscillation.
    SimpleHarmonic,
    /// Superposition of sinusoidal oscillations.
    CompositeHarmonic,
}

/// Closed set of motion variants.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Motion {
    /// See [`UniformRectilinear`].
    UniformRectilinear(UniformRectilinear),
    /// See [`AcceleratedRectilinear`].
    AcceleratedRectilinear(AcceleratedRectilinear),
    /// See [`UniformCircular`].
    UniformCircular(UniformCircular),
    /// See [`AcceleratedCircular`].
    AcceleratedCircular(AcceleratedCircular),
    /// See [`SpatialMotion`].
    Spatial(SpatialMotion),
    /// See [`Projectile`].
    Projectile(Projectile),
    /// See [`SimpleHarmonic`].
    SimpleHarmonic(SimpleHarmonic),
    /// See [`CompositeHarmonic`].
    CompositeHarmonic(CompositeHarmonic),
}

macro_rules! dispatch {
    ($motion:expr, $inner:ident => $body:expr) => {
        match $motion {
            Motion::UniformRectilinear($inner) => $body.map(Observable::from),
            Motion::AcceleratedRectilinear($inner) => $body.map(Observable::from),
            Motion::UniformCircular($inner) => $body.map(Observable::from),
            Motion::AcceleratedCircular($inner) => $body.map(Observable::from),
            Motion::Spatial($inner) => $body.map(Observable::from),
            Motion::Projectile($inner) => $body.map(Observable::from),
            Motion::SimpleHarmonic($inner) => $body.map(Observable::from),
            Motion::CompositeHarmonic($inner) => $body.map(Observable::from),
        }
    };
}

impl Motion {
    /// Family of the wrapped variant.
    #[must_use]
    pub const fn kind(&self) -> MotionKind {
        match self {
            Self::UniformRectilinear(_) => MotionKind::UniformRectilinear,
            Self::AcceleratedRectilinear(_) => MotionKind::AcceleratedRectilinear,
            Self::UniformCircular(_) => MotionKind::UniformCircular,
            Self::AcceleratedCircular(_) => MotionKind::AcceleratedCircular,
            Self::Spatial(_) => MotionKind::Spatial,
            Self::Projectile(_) => MotionKind::Projectile,
            Self::SimpleHarmonic(_) => MotionKind::SimpleHarmonic,
            Self::CompositeHarmonic(_) => MotionKind::CompositeHarmonic,
        }
    }
}

impl Kinematics for Motion {
    type Output = Observable;

    fn position(&self, t: impl Into<Value>) -> Result<Observable> {
        let t = t.into();
        dispatch!(self, m => m.position(t))
    }

    fn velocity(&self, t: impl Into<Value>) -> Result<Observable> {
        let t = t.into();
        dispatch!(self, m => m.velocity(t))
    }

    fn acceleration(&self, t: impl Into<Value>) -> Result<Observable> {
        let t = t.into();
        dispatch!(self, m => m.acceleration(t))
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Motion {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_variant!(
    UniformRectilinear(UniformRectilinear),
    AcceleratedRectilinear(AcceleratedRectilinear),
    UniformCircular(UniformCircular),
    AcceleratedCircular(AcceleratedCircular),
    Spatial(SpatialMotion),
    Projectile(Projectile),
    SimpleHarmonic(SimpleHarmonic),
    CompositeHarmonic(CompositeHarmonic),
);

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn enum_dispatch_matches_variant() {
        let variant = AcceleratedRectilinear::new(0.0, 10.0, -2.0).expect("valid");
        let motion = Motion::from(variant.clone());
        assert_eq!(motion.kind(), MotionKind::AcceleratedRectilinear);
        let via_enum = motion.position(3.0).expect("t >= 0");
        let direct = variant.position(3.0).expect("t >= 0");
        assert_eq!(via_enum.as_scalar(), Some(&direct));
    }

    #[test]
    fn planar_variants_yield_planar_observables() {
        let motion = Motion::from(UniformCircular::with_radius(2.0).expect("positive radius"));
        let position = motion.position(0.0).expect("t >= 0");
        let planar = position.as_planar().expect("circular motion is planar");
        assert_relative_eq!(planar.values()[0], 2.0, epsilon = 1.0e-12);
        assert_eq!(position.si_components().len(), 2);
    }

    #[test]
    fn time_fields_reject_other_dimensions() {
        let motion = UniformRectilinear::new(0.0, 1.0).expect("valid");
        assert!(matches!(
            motion.position(Quantity::meters(1.0)),
            Err(KinematicsError::Units(_))
        ));
    }

    #[test]
    fn elapsed_rejects_negative_and_non_finite_times() {
        assert!(matches!(elapsed(-1.0), Err(KinematicsError::InvalidArgument(_))));
        assert!(matches!(elapsed(f64::NAN), Err(KinematicsError::InvalidArgument(_))));
        assert_eq!(elapsed(Quantity::of(2.0, "min").expect("known unit")).expect("valid").si_value(), 120.0);
    }
}

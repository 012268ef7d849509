//! Convenience re-exports for describing and querying motions.

pub use crate::config::{Environment, LoggingSettings, NumericSettings, Settings};
pub use crate::constants::*;
pub use crate::errors::{KinematicsError, Result};
pub use crate::inverse::{InverseSolver, TimeSolutions};
pub use crate::logging::LogHandle;
pub use crate::math::{phasor, R2, R3, Scalar};
pub use crate::motion::{
    AcceleratedCircular, AcceleratedRectilinear, CompositeHarmonic, Field, HarmonicRecord,
    Kinematics, Motion, MotionKind, Observable, Projectile, SimpleHarmonic, SpatialMotion,
    UniformCircular, UniformRectilinear,
};
pub use crate::relative::{
    absolute_velocity_a, absolute_velocity_b, direction, heading, relative_velocity, speed,
};
pub use crate::sampling::{linspace, sample, write_trajectory_csv, Sample, SiComponents, Trajectory};
pub use crate::units::{
    Dimension, PlanarQuantity, Quantity, QuantityVector, SpatialQuantity, Unit, UnitError, Value,
    VectorValue,
};

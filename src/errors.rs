//! Shared error types used across submodules.

use thiserror::Error;

use crate::config::ConfigError;
use crate::math::Scalar;
use crate::units::{Quantity, UnitError};

/// Convenience alias for results carrying a [`KinematicsError`].
pub type Result<T, E = KinematicsError> = std::result::Result<T, E>;

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum KinematicsError {
    /// Wraps dimensional errors from the quantity layer.
    #[error(transparent)]
    Units(#[from] UnitError),
    /// Wraps configuration and logging setup errors.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Raised for physically meaningless inputs (non-positive radius, negative time, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The inverse equation has a negative discriminant.
    #[error("no real solution: discriminant {discriminant:.6e} is negative")]
    NoRealSolution {
        /// Value of the discriminant that was found negative.
        discriminant: Scalar,
    },
    /// Every real solution lies before the start of the motion.
    #[error("target is only reached at negative times {roots:?} s")]
    NegativeTime {
        /// The rejected real roots, in seconds.
        roots: Vec<Scalar>,
    },
    /// The body never moves and the target differs from where it stays.
    #[error("target {target} is unreachable: the body stays at {fixed}")]
    Unreachable {
        /// Requested position.
        target: Quantity,
        /// Position the body occupies for all time.
        fixed: Quantity,
    },
}

impl KinematicsError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

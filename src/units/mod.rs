//! Dimensioned quantities checked at runtime.
//!
//! A [`Quantity`] pairs a magnitude with a [`Unit`]; every unit knows its
//! [`Dimension`] and its scale relative to the coherent SI unit. Combining
//! incompatible dimensions fails with [`UnitError::DimensionMismatch`]
//! instead of producing a wrong number.

mod dimension;
mod quantity;
mod unit;
mod value;
mod vector;

pub use dimension::Dimension;
pub use quantity::Quantity;
pub use unit::Unit;
pub use value::{Value, VectorValue};
pub use vector::{PlanarQuantity, QuantityVector, SpatialQuantity};

/// Errors raised by the quantity layer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UnitError {
    /// Two operands (or an operand and a target unit) measure different dimensions.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Dimension required by the operation.
        expected: Dimension,
        /// Dimension actually supplied.
        found: Dimension,
    },
    /// The unit expression contains an unknown symbol or is malformed.
    #[error("unknown unit `{0}`")]
    UnknownUnit(String),
    /// A real power would leave non-integral dimension exponents.
    #[error("cannot raise {dimension} to the power {exponent}")]
    FractionalDimension {
        /// Dimension of the base.
        dimension: Dimension,
        /// Requested exponent.
        exponent: f64,
    },
}

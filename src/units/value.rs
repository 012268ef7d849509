use nalgebra::SVector;

use super::{Quantity, QuantityVector, Unit, UnitError};
use crate::math::Scalar;

/// Either a bare number or a dimensioned quantity.
///
/// Bare numbers are promoted with a caller-chosen default unit, so `2.0` for
/// a time field means two seconds while a `Quantity` must already measure time.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Plain number in the field's default unit.
    Raw(Scalar),
    /// Explicitly dimensioned value.
    Quantity(Quantity),
}

impl Value {
    /// Resolves into a quantity, promoting raw numbers with `default_unit`.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::DimensionMismatch`] when a supplied quantity does
    /// not measure `default_unit`'s dimension.
    pub fn resolve(self, default_unit: &Unit) -> Result<Quantity, UnitError> {
        match self {
            Self::Raw(value) => Ok(Quantity::new(value, default_unit.clone())),
            Self::Quantity(quantity) => {
                quantity.ensure_dimension(default_unit.dimension())?;
                Ok(quantity)
            }
        }
    }
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        Self::Raw(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Raw(Scalar::from(value))
    }
}

impl From<Quantity> for Value {
    fn from(value: Quantity) -> Self {
        Self::Quantity(value)
    }
}

impl From<&Quantity> for Value {
    fn from(value: &Quantity) -> Self {
        Self::Quantity(value.clone())
    }
}

/// Vector counterpart of [`Value`].
#[derive(Debug, Clone, PartialEq)]
pub enum VectorValue<const D: usize> {
    /// Plain components in the field's default unit.
    Raw(SVector<Scalar, D>),
    /// Explicitly dimensioned vector.
    Quantity(QuantityVector<D>),
}

impl<const D: usize> VectorValue<D> {
    /// Resolves into a vector quantity, promoting raw components with `default_unit`.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::DimensionMismatch`] when a supplied vector does
    /// not measure `default_unit`'s dimension.
    pub fn resolve(self, default_unit: &Unit) -> Result<QuantityVector<D>, UnitError> {
        match self {
            Self::Raw(values) => Ok(QuantityVector::new(values, default_unit.clone())),
            Self::Quantity(vector) => {
                vector.ensure_dimension(default_unit.dimension())?;
                Ok(vector)
            }
        }
    }
}

impl<const D: usize> From<[Scalar; D]> for VectorValue<D> {
    fn from(values: [Scalar; D]) -> Self {
        Self::Raw(SVector::from(values))
    }
}

impl<const D: usize> From<SVector<Scalar, D>> for VectorValue<D> {
    fn from(values: SVector<Scalar, D>) -> Self {
        Self::Raw(values)
    }
}

impl<const D: usize> From<QuantityVector<D>> for VectorValue<D> {
    fn from(vector: QuantityVector<D>) -> Self {
        Self::Quantity(vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Dimension;

    #[test]
    fn raw_numbers_take_the_default_unit() {
        let q = Value::from(3).resolve(&Unit::second()).expect("raw promotes");
        assert_eq!(q, Quantity::seconds(3.0));
    }

    #[test]
    fn quantities_must_match_the_field_dimension() {
        let err = Value::from(Quantity::meters(1.0)).resolve(&Unit::second()).unwrap_err();
        assert!(matches!(
            err,
            UnitError::DimensionMismatch { expected: Dimension::TIME, found: Dimension::LENGTH }
        ));
    }
}

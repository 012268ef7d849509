use nalgebra::SVector;

use super::{Dimension, Quantity, Unit, UnitError};
use crate::math::Scalar;

/// Fixed-size vector of magnitudes sharing one unit.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityVector<const D: usize> {
    values: SVector<Scalar, D>,
    unit: Unit,
}

/// Two-component vector quantity (circular motion).
pub type PlanarQuantity = QuantityVector<2>;
/// Three-component vector quantity (spatial motion).
pub type SpatialQuantity = QuantityVector<3>;

impl<const D: usize> QuantityVector<D> {
    /// Wraps raw components expressed in `unit`.
    #[must_use]
    pub const fn new(values: SVector<Scalar, D>, unit: Unit) -> Self {
        Self { values, unit }
    }

    /// Builds a vector from individual quantities, converting them to the first one's unit.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::DimensionMismatch`] if the components disagree on dimension.
    pub fn from_quantities(components: &[Quantity; D]) -> Result<Self, UnitError> {
        let unit = components.first().map_or_else(Unit::dimensionless, |q| q.unit().clone());
        let mut values = SVector::<Scalar, D>::zeros();
        for (slot, component) in values.iter_mut().zip(components) {
            *slot = component.value_in(&unit)?;
        }
        Ok(Self::new(values, unit))
    }

    /// Components in this vector's unit.
    #[must_use]
    pub const fn values(&self) -> &SVector<Scalar, D> {
        &self.values
    }

    /// Shared unit.
    #[must_use]
    pub const fn unit(&self) -> &Unit {
        &self.unit
    }

    /// Physical dimension.
    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }

    /// Components in the coherent SI unit.
    #[must_use]
    pub fn si_values(&self) -> SVector<Scalar, D> {
        self.values * self.unit.scale()
    }

    /// Single component as a scalar quantity.
    ///
    /// # Panics
    ///
    /// Panics if `index >= D`.
    #[must_use]
    pub fn component(&self, index: usize) -> Quantity {
        Quantity::new(self.values[index], self.unit.clone())
    }

    /// All components as scalar quantities.
    #[must_use]
    pub fn components(&self) -> [Quantity; D] {
        std::array::from_fn(|i| self.component(i))
    }

    /// Euclidean norm.
    #[must_use]
    pub fn norm(&self) -> Quantity {
        Quantity::new(self.values.norm(), self.unit.clone())
    }

    /// Dot product; the result carries the product dimension.
    #[must_use]
    pub fn dot(&self, rhs: &Self) -> Quantity {
        Quantity::new(self.values.dot(&rhs.values), self.unit.product(&rhs.unit))
    }

    /// Multiplies every component by a scalar quantity.
    #[must_use]
    pub fn scale_by(&self, factor: &Quantity) -> Self {
        Self::new(self.values * factor.magnitude(), self.unit.product(factor.unit()))
    }

    /// Multiplies every component by a pure number.
    #[must_use]
    pub fn scale(&self, factor: Scalar) -> Self {
        Self::new(self.values * factor, self.unit.clone())
    }

    /// Converts into `unit`.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::DimensionMismatch`] if `unit` measures a different dimension.
    pub fn to(&self, unit: &Unit) -> Result<Self, UnitError> {
        self.ensure_dimension(unit.dimension())?;
        Ok(Self::new(self.si_values() / unit.scale(), unit.clone()))
    }

    /// Fails unless the vector has dimension `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::DimensionMismatch`] on a different dimension.
    pub fn ensure_dimension(&self, expected: Dimension) -> Result<(), UnitError> {
        if self.dimension() == expected {
            Ok(())
        } else {
            Err(UnitError::DimensionMismatch { expected, found: self.dimension() })
        }
    }

    /// Componentwise sum in `self`'s unit.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::DimensionMismatch`] when the dimensions differ.
    pub fn try_add(&self, rhs: &Self) -> Result<Self, UnitError> {
        let rhs = rhs.to(&self.unit)?;
        Ok(Self::new(self.values + rhs.values, self.unit.clone()))
    }

    /// Componentwise difference in `self`'s unit.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::DimensionMismatch`] when the dimensions differ.
    pub fn try_sub(&self, rhs: &Self) -> Result<Self, UnitError> {
        let rhs = rhs.to(&self.unit)?;
        Ok(Self::new(self.values - rhs.values, self.unit.clone()))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    use super::*;

    #[test]
    fn norm_and_dot_follow_nalgebra() {
        let v = SpatialQuantity::new(Vector3::new(1.0, 2.0, 2.0), Unit::meter());
        assert_relative_eq!(v.norm().magnitude(), 3.0, epsilon = 1.0e-12);
        let squared = v.dot(&v);
        assert_eq!(squared.dimension(), Dimension::AREA);
        assert_relative_eq!(squared.si_value(), 9.0, epsilon = 1.0e-12);
    }

    #[test]
    fn from_quantities_rejects_mixed_dimensions() {
        let ok = PlanarQuantity::from_quantities(&[
            Quantity::meters(1.0),
            Quantity::of(20.0, "cm").expect("known unit"),
        ])
        .expect("both lengths");
        assert_relative_eq!(ok.values()[1], 0.2, epsilon = 1.0e-12);

        let err = PlanarQuantity::from_quantities(&[Quantity::meters(1.0), Quantity::seconds(1.0)]);
        assert!(err.is_err());
    }
}

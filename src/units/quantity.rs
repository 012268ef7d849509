use std::cmp::Ordering;
use std::fmt;
use std::ops::{Div, Mul, Neg};

use super::{Dimension, Unit, UnitError};
use crate::math::Scalar;

/// A magnitude expressed in a concrete unit.
///
/// Quantities are immutable values. Addition, subtraction and comparison are
/// fallible and require matching dimensions; multiplication and division
/// always succeed and combine dimensions.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct Quantity {
    magnitude: Scalar,
    unit: Unit,
}

impl Quantity {
    /// Creates a quantity from a magnitude and a unit.
    #[must_use]
    pub const fn new(magnitude: Scalar, unit: Unit) -> Self {
        Self { magnitude, unit }
    }

    /// Creates a quantity from a magnitude and a unit expression (e.g. `"km/h"`).
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::UnknownUnit`] if the expression cannot be parsed.
    pub fn of(magnitude: Scalar, unit: &str) -> Result<Self, UnitError> {
        Ok(Self::new(magnitude, Unit::parse(unit)?))
    }

    /// Pure number.
    #[must_use]
    pub fn dimensionless(value: Scalar) -> Self {
        Self::new(value, Unit::dimensionless())
    }

    /// Length in metres.
    #[must_use]
    pub fn meters(value: Scalar) -> Self {
        Self::new(value, Unit::meter())
    }

    /// Time in seconds.
    #[must_use]
    pub fn seconds(value: Scalar) -> Self {
        Self::new(value, Unit::second())
    }

    /// Angle in radians.
    #[must_use]
    pub fn radians(value: Scalar) -> Self {
        Self::new(value, Unit::radian())
    }

    /// Velocity in metres per second.
    #[must_use]
    pub fn meters_per_second(value: Scalar) -> Self {
        Self::new(value, Unit::meter_per_second())
    }

    /// Acceleration in metres per second squared.
    #[must_use]
    pub fn meters_per_second_squared(value: Scalar) -> Self {
        Self::new(value, Unit::meter_per_second_squared())
    }

    /// Angular velocity in radians per second.
    #[must_use]
    pub fn radians_per_second(value: Scalar) -> Self {
        Self::new(value, Unit::radian_per_second())
    }

    /// Angular acceleration in radians per second squared.
    #[must_use]
    pub fn radians_per_second_squared(value: Scalar) -> Self {
        Self::new(value, Unit::radian_per_second_squared())
    }

    /// Magnitude in this quantity's own unit.
    #[must_use]
    pub const fn magnitude(&self) -> Scalar {
        self.magnitude
    }

    /// Unit the magnitude is expressed in.
    #[must_use]
    pub const fn unit(&self) -> &Unit {
        &self.unit
    }

    /// Physical dimension.
    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }

    /// Magnitude in the coherent SI unit of the dimension.
    #[must_use]
    pub fn si_value(&self) -> Scalar {
        self.magnitude * self.unit.scale()
    }

    /// Re-expresses the quantity in the coherent SI unit.
    #[must_use]
    pub fn to_si(&self) -> Self {
        Self::new(self.si_value(), Unit::si(self.dimension()))
    }

    /// Converts into `unit`.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::DimensionMismatch`] if `unit` measures a different dimension.
    pub fn to(&self, unit: &Unit) -> Result<Self, UnitError> {
        Ok(Self::new(self.value_in(unit)?, unit.clone()))
    }

    /// Magnitude expressed in `unit`.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::DimensionMismatch`] if `unit` measures a different dimension.
    pub fn value_in(&self, unit: &Unit) -> Result<Scalar, UnitError> {
        self.ensure_dimension(unit.dimension())?;
        Ok(self.si_value() / unit.scale())
    }

    /// Fails unless the quantity has dimension `expected`.
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

    /// Sum, expressed in `self`'s unit.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::DimensionMismatch`] when the dimensions differ.
    pub fn try_add(&self, rhs: &Self) -> Result<Self, UnitError> {
        let rhs = rhs.value_in(&self.unit)?;
        Ok(Self::new(self.magnitude + rhs, self.unit.clone()))
    }

    /// Difference, expressed in `self`'s unit.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::DimensionMismatch`] when the dimensions differ.
    pub fn try_sub(&self, rhs: &Self) -> Result<Self, UnitError> {
        let rhs = rhs.value_in(&self.unit)?;
        Ok(Self::new(self.magnitude - rhs, self.unit.clone()))
    }

    /// Total order on quantities of the same dimension.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::DimensionMismatch`] when the dimensions differ.
    pub fn try_cmp(&self, rhs: &Self) -> Result<Ordering, UnitError> {
        rhs.ensure_dimension(self.dimension())?;
        Ok(self.si_value().total_cmp(&rhs.si_value()))
    }

    /// True when both quantities agree within an absolute SI `tolerance`.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::DimensionMismatch`] when the dimensions differ.
    pub fn approx_eq(&self, rhs: &Self, tolerance: Scalar) -> Result<bool, UnitError> {
        rhs.ensure_dimension(self.dimension())?;
        Ok((self.si_value() - rhs.si_value()).abs() <= tolerance)
    }

    /// Integer power; the dimension exponents scale by `n`.
    #[must_use]
    pub fn powi(&self, n: i32) -> Self {
        Self::new(self.magnitude.powi(n), self.unit.powi(n))
    }

    /// Real power, evaluated in SI.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::FractionalDimension`] when the resulting dimension
    /// exponents would not be integral. Dimensionless quantities accept any exponent.
    pub fn powf(&self, p: Scalar) -> Result<Self, UnitError> {
        let dimension = self
            .dimension()
            .powf(p)
            .ok_or(UnitError::FractionalDimension { dimension: self.dimension(), exponent: p })?;
        Ok(Self::new(self.si_value().powf(p), Unit::si(dimension)))
    }

    /// Square root, evaluated in SI.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::FractionalDimension`] for odd dimension exponents.
    pub fn sqrt(&self) -> Result<Self, UnitError> {
        self.powf(0.5)
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self::new(self.magnitude.abs(), self.unit.clone())
    }

    /// Multiplies the magnitude by a pure number.
    #[must_use]
    pub fn scale(&self, factor: Scalar) -> Self {
        Self::new(self.magnitude * factor, self.unit.clone())
    }

    /// Treats radians as the ratio arc/radius, removing the angle exponent.
    ///
    /// `ω · R` becomes a velocity once `ω` has had its angle dropped.
    #[must_use]
    pub fn drop_angle(&self) -> Self {
        Self::new(self.si_value(), Unit::si(self.dimension().without_angle()))
    }

    /// True when the SI magnitude is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.magnitude.is_finite()
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.dimension() == other.dimension() && self.si_value() == other.si_value()
    }
}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.dimension() != other.dimension() {
            return None;
        }
        self.si_value().partial_cmp(&other.si_value())
    }
}

impl Mul<&Quantity> for &Quantity {
    type Output = Quantity;

    fn mul(self, rhs: &Quantity) -> Quantity {
        Quantity::new(self.magnitude * rhs.magnitude, self.unit.product(&rhs.unit))
    }
}

impl Mul for Quantity {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        &self * &rhs
    }
}

impl Div<&Quantity> for &Quantity {
    type Output = Quantity;

    fn div(self, rhs: &Quantity) -> Quantity {
        Quantity::new(self.magnitude / rhs.magnitude, self.unit.quotient(&rhs.unit))
    }
}

impl Div for Quantity {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        &self / &rhs
    }
}

impl Mul<Scalar> for Quantity {
    type Output = Self;

    fn mul(self, rhs: Scalar) -> Self {
        Self::new(self.magnitude * rhs, self.unit)
    }
}

impl Div<Scalar> for Quantity {
    type Output = Self;

    fn div(self, rhs: Scalar) -> Self {
        Self::new(self.magnitude / rhs, self.unit)
    }
}

impl Neg for Quantity {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.magnitude, self.unit)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.symbol().is_empty() {
            write!(f, "{}", self.magnitude)
        } else {
            write!(f, "{} {}", self.magnitude, self.unit)
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn conversion_stays_within_dimension() {
        let speed = Quantity::of(72.0, "km/h").expect("known unit");
        let si = speed.to(&Unit::meter_per_second()).expect("same dimension");
        assert_relative_eq!(si.magnitude(), 20.0, epsilon = 1.0e-12);

        let err = speed.to(&Unit::second()).unwrap_err();
        assert!(matches!(
            err,
            UnitError::DimensionMismatch { expected: Dimension::TIME, found: Dimension::VELOCITY }
        ));
    }

    #[test]
    fn addition_requires_matching_dimensions() {
        let a = Quantity::meters(2.0);
        let b = Quantity::of(50.0, "cm").expect("known unit");
        let sum = a.try_add(&b).expect("both lengths");
        assert_relative_eq!(sum.magnitude(), 2.5, epsilon = 1.0e-12);
        assert_eq!(sum.unit().symbol(), "m");

        assert!(a.try_add(&Quantity::seconds(1.0)).is_err());
        assert!(a.try_sub(&Quantity::radians(1.0)).is_err());
    }

    #[test]
    fn division_combines_dimensions() {
        let v = &Quantity::meters(10.0) / &Quantity::seconds(2.0);
        assert_eq!(v.dimension(), Dimension::VELOCITY);
        assert_eq!(v, Quantity::meters_per_second(5.0));
        assert_eq!(v.unit().symbol(), "m/s");
    }

    #[test]
    fn comparison_normalises_units() {
        let one_km = Quantity::of(1.0, "km").expect("known unit");
        let metres = Quantity::meters(1_000.0);
        assert_eq!(one_km, metres);
        assert!(Quantity::meters(999.0) < one_km);
        assert_eq!(one_km.partial_cmp(&Quantity::seconds(1.0)), None);
        assert!(one_km.try_cmp(&Quantity::seconds(1.0)).is_err());
    }

    #[test]
    fn powers_scale_dimensions() {
        let area = Quantity::meters(3.0).powi(2);
        assert_eq!(area.dimension(), Dimension::AREA);
        let side = area.sqrt().expect("even exponents");
        assert_relative_eq!(side.si_value(), 3.0, epsilon = 1.0e-12);
        assert!(matches!(
            Quantity::meters(4.0).sqrt(),
            Err(UnitError::FractionalDimension { .. })
        ));
        let ratio = Quantity::dimensionless(8.0).powf(1.0 / 3.0).expect("dimensionless");
        assert_relative_eq!(ratio.magnitude(), 2.0, epsilon = 1.0e-12);
    }

    #[test]
    fn dropping_angle_turns_angular_into_linear() {
        let omega = Quantity::of(30.0, "rev/min").expect("known unit");
        let v = &omega.drop_angle() * &Quantity::meters(2.0);
        assert_eq!(v.dimension(), Dimension::VELOCITY);
        assert_relative_eq!(v.si_value(), 2.0 * std::f64::consts::PI, epsilon = 1.0e-12);
    }
}

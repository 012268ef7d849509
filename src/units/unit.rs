//! Concrete units and the unit-expression parser.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use super::{Dimension, UnitError};
use crate::math::Scalar;

/// Base symbols understood by [`Unit::parse`], with their dimension and SI scale.
const REGISTRY: &[(&str, Dimension, Scalar)] = &[
    ("m", Dimension::LENGTH, 1.0),
    ("km", Dimension::LENGTH, 1.0e3),
    ("cm", Dimension::LENGTH, 1.0e-2),
    ("mm", Dimension::LENGTH, 1.0e-3),
    ("s", Dimension::TIME, 1.0),
    ("ms", Dimension::TIME, 1.0e-3),
    ("min", Dimension::TIME, 60.0),
    ("h", Dimension::TIME, 3_600.0),
    ("rad", Dimension::ANGLE, 1.0),
    ("deg", Dimension::ANGLE, PI / 180.0),
    ("rev", Dimension::ANGLE, 2.0 * PI),
    ("kg", Dimension::MASS, 1.0),
    ("g", Dimension::MASS, 1.0e-3),
    ("Hz", Dimension::FREQUENCY, 1.0),
    ("N", Dimension::FORCE, 1.0),
    ("J", Dimension::ENERGY, 1.0),
];

/// A unit of measure: a printable symbol, its dimension, and the factor that
/// converts one of it into the coherent SI unit of that dimension.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    symbol: String,
    dimension: Dimension,
    scale: Scalar,
}

impl Unit {
    fn base(symbol: &str, dimension: Dimension) -> Self {
        Self { symbol: symbol.to_owned(), dimension, scale: 1.0 }
    }

    /// Pure number (empty symbol).
    #[must_use]
    pub fn dimensionless() -> Self {
        Self::base("", Dimension::DIMENSIONLESS)
    }

    /// Metre.
    #[must_use]
    pub fn meter() -> Self {
        Self::base("m", Dimension::LENGTH)
    }

    /// Second.
    #[must_use]
    pub fn second() -> Self {
        Self::base("s", Dimension::TIME)
    }

    /// Radian.
    #[must_use]
    pub fn radian() -> Self {
        Self::base("rad", Dimension::ANGLE)
    }

    /// Kilogram.
    #[must_use]
    pub fn kilogram() -> Self {
        Self::base("kg", Dimension::MASS)
    }

    /// Hertz.
    #[must_use]
    pub fn hertz() -> Self {
        Self::base("Hz", Dimension::FREQUENCY)
    }

    /// Metre per second.
    #[must_use]
    pub fn meter_per_second() -> Self {
        Self::si(Dimension::VELOCITY)
    }

    /// Metre per second squared.
    #[must_use]
    pub fn meter_per_second_squared() -> Self {
        Self::si(Dimension::ACCELERATION)
    }

    /// Radian per second.
    #[must_use]
    pub fn radian_per_second() -> Self {
        Self::si(Dimension::ANGULAR_VELOCITY)
    }

    /// Radian per second squared.
    #[must_use]
    pub fn radian_per_second_squared() -> Self {
        Self::si(Dimension::ANGULAR_ACCELERATION)
    }

    /// Coherent SI unit for `dimension`, e.g. `m/s^2` for acceleration.
    #[must_use]
    pub fn si(dimension: Dimension) -> Self {
        let mut numerator = Vec::new();
        let mut denominator = Vec::new();
        for (symbol, exponent) in [
            ("kg", dimension.mass),
            ("m", dimension.length),
            ("rad", dimension.angle),
            ("s", dimension.time),
        ] {
            let part = |e: i32| {
                if e == 1 {
                    symbol.to_owned()
                } else {
                    format!("{symbol}^{e}")
                }
            };
            match exponent {
                0 => {}
                e if e > 0 => numerator.push(part(e)),
                e => denominator.push(part(-e)),
            }
        }
        let symbol = match (numerator.is_empty(), denominator.is_empty()) {
            (true, true) => String::new(),
            (false, true) => numerator.join("*"),
            (true, false) => format!("1/{}", denominator.join("/")),
            (false, false) => format!("{}/{}", numerator.join("*"), denominator.join("/")),
        };
        Self { symbol, dimension, scale: 1.0 }
    }

    /// Parses a unit expression such as `km/h`, `m/s^2` or `kg*m/s^2`.
    ///
    /// Terms are base symbols optionally raised with `^n`, joined by `*`
    /// (or `·`) and `/`. Each `/` divides by the single term that follows it.
    /// A bare `1` is a dimensionless term, so `1/s` parses.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::UnknownUnit`] for unknown symbols or malformed
    /// expressions.
    pub fn parse(expression: &str) -> Result<Self, UnitError> {
        let trimmed = expression.trim();
        if trimmed.is_empty() || trimmed == "1" {
            return Ok(Self::dimensionless());
        }
        let unknown = || UnitError::UnknownUnit(expression.to_owned());

        let mut dimension = Dimension::DIMENSIONLESS;
        let mut scale = 1.0;
        let mut divide = false;
        let mut rest = trimmed;
        loop {
            let end = rest.find(['*', '/', '·']).unwrap_or(rest.len());
            let (term, tail) = rest.split_at(end);
            let (term_dimension, term_scale) = parse_term(term.trim()).ok_or_else(unknown)?;
            let sign = if divide { -1 } else { 1 };
            dimension = dimension * term_dimension.powi(sign);
            scale *= term_scale.powi(sign);

            let mut chars = tail.chars();
            match chars.next() {
                None => break,
                Some(op) => {
                    divide = op == '/';
                    rest = chars.as_str();
                    if rest.trim().is_empty() {
                        return Err(unknown());
                    }
                }
            }
        }
        Ok(Self { symbol: trimmed.to_owned(), dimension, scale })
    }

    /// Printable symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Physical dimension measured by this unit.
    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Factor converting one of this unit into the coherent SI unit.
    #[must_use]
    pub const fn scale(&self) -> Scalar {
        self.scale
    }

    /// True when both units measure the same dimension.
    #[must_use]
    pub fn is_compatible(&self, other: &Self) -> bool {
        self.dimension == other.dimension
    }

    /// Product unit.
    #[must_use]
    pub fn product(&self, rhs: &Self) -> Self {
        Self::combine(self, rhs, false)
    }

    /// Quotient unit.
    #[must_use]
    pub fn quotient(&self, rhs: &Self) -> Self {
        Self::combine(self, rhs, true)
    }

    /// Integer power of the unit.
    #[must_use]
    pub fn powi(&self, n: i32) -> Self {
        let dimension = self.dimension.powi(n);
        let scale = self.scale.powi(n);
        if scale == 1.0 {
            return Self::si(dimension);
        }
        Self { symbol: format!("{}^{n}", self.grouped()), dimension, scale }
    }

    fn combine(lhs: &Self, rhs: &Self, divide: bool) -> Self {
        let dimension = if divide {
            lhs.dimension / rhs.dimension
        } else {
            lhs.dimension * rhs.dimension
        };
        let scale = if divide { lhs.scale / rhs.scale } else { lhs.scale * rhs.scale };
        // Coherent results get a clean SI symbol instead of a composed one.
        if scale == 1.0 {
            return Self::si(dimension);
        }
        let symbol = match (lhs.symbol.is_empty(), rhs.symbol.is_empty(), divide) {
            (_, true, _) => lhs.symbol.clone(),
            (true, false, false) => rhs.symbol.clone(),
            (true, false, true) => format!("1/{}", rhs.grouped()),
            (false, false, false) => format!("{}*{}", lhs.symbol, rhs.grouped()),
            (false, false, true) => format!("{}/{}", lhs.symbol, rhs.grouped()),
        };
        Self { symbol, dimension, scale }
    }

    fn grouped(&self) -> String {
        if self.symbol.contains(['*', '/', '^']) {
            format!("({})", self.symbol)
        } else {
            self.symbol.clone()
        }
    }
}

fn parse_term(term: &str) -> Option<(Dimension, Scalar)> {
    let (symbol, exponent) = match term.split_once('^') {
        Some((symbol, exponent)) => (symbol.trim(), exponent.trim().parse::<i32>().ok()?),
        None => (term, 1),
    };
    if symbol == "1" {
        return Some((Dimension::DIMENSIONLESS, 1.0));
    }
    REGISTRY
        .iter()
        .find(|(name, _, _)| *name == symbol)
        .map(|&(_, dimension, scale)| (dimension.powi(exponent), scale.powi(exponent)))
}

impl FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn parses_compound_expressions() {
        let kmh: Unit = "km/h".parse().expect("known unit");
        assert_eq!(kmh.dimension(), Dimension::VELOCITY);
        assert_relative_eq!(kmh.scale(), 1.0 / 3.6, epsilon = 1.0e-15);

        let accel = Unit::parse("m/s^2").expect("known unit");
        assert_eq!(accel.dimension(), Dimension::ACCELERATION);

        let newton = Unit::parse("kg * m / s / s").expect("known unit");
        assert_eq!(newton.dimension(), Dimension::FORCE);
    }

    #[test]
    fn rejects_unknown_symbols_and_dangling_operators() {
        assert!(matches!(Unit::parse("furlong"), Err(UnitError::UnknownUnit(_))));
        assert!(matches!(Unit::parse("m/"), Err(UnitError::UnknownUnit(_))));
        assert!(matches!(Unit::parse("m^x"), Err(UnitError::UnknownUnit(_))));
    }

    #[test]
    fn si_symbols_follow_dimension() {
        assert_eq!(Unit::meter_per_second_squared().symbol(), "m/s^2");
        assert_eq!(Unit::radian_per_second().symbol(), "rad/s");
        assert_eq!(Unit::si(Dimension::FREQUENCY).symbol(), "1/s");
        assert_eq!(Unit::meter().product(&Unit::meter()).symbol(), "m^2");
    }

    #[test]
    fn si_symbols_parse_back() {
        for dimension in [
            Dimension::DIMENSIONLESS,
            Dimension::FREQUENCY,
            Dimension::VELOCITY,
            Dimension::ANGULAR_ACCELERATION,
            Dimension::FORCE,
            Dimension::ENERGY,
            Dimension::TIME.powi(-2),
        ] {
            let printed = Unit::si(dimension).to_string();
            let parsed: Unit = printed.parse().expect("printed symbols parse");
            assert_eq!(parsed.dimension(), dimension, "{printed}");
            assert_relative_eq!(parsed.scale(), 1.0);
        }
        let hertz = Unit::parse("1/s").expect("known unit");
        assert_eq!(hertz.dimension(), Dimension::FREQUENCY);
    }

    #[test]
    fn scaled_products_keep_composed_symbols() {
        let km = Unit::parse("km").expect("known unit");
        let per_hour = km.quotient(&Unit::parse("h").expect("known unit"));
        assert_eq!(per_hour.symbol(), "km/h");
        assert_eq!(per_hour.dimension(), Dimension::VELOCITY);
    }
}

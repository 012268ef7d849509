//! Physical dimensions as integer exponents over the base dimensions.

use std::fmt;
use std::ops::{Div, Mul};

/// Exponents of length (L), mass (M), time (T) and plane angle (A).
///
/// Angle is tracked as its own base so that adding an angle to a length is
/// rejected, even though the radian is dimensionless in strict SI.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dimension {
    /// Length exponent.
    pub length: i32,
    /// Mass exponent.
    pub mass: i32,
    /// Time exponent.
    pub time: i32,
    /// Plane angle exponent.
    pub angle: i32,
}

impl Dimension {
    /// Pure number.
    pub const DIMENSIONLESS: Self = Self::new(0, 0, 0, 0);
    /// L
    pub const LENGTH: Self = Self::new(1, 0, 0, 0);
    /// M
    pub const MASS: Self = Self::new(0, 1, 0, 0);
    /// T
    pub const TIME: Self = Self::new(0, 0, 1, 0);
    /// A
    pub const ANGLE: Self = Self::new(0, 0, 0, 1);
    /// L·T⁻¹
    pub const VELOCITY: Self = Self::new(1, 0, -1, 0);
    /// L·T⁻²
    pub const ACCELERATION: Self = Self::new(1, 0, -2, 0);
    /// A·T⁻¹
    pub const ANGULAR_VELOCITY: Self = Self::new(0, 0, -1, 1);
    /// A·T⁻²
    pub const ANGULAR_ACCELERATION: Self = Self::new(0, 0, -2, 1);
    /// T⁻¹
    pub const FREQUENCY: Self = Self::new(0, 0, -1, 0);
    /// L²
    pub const AREA: Self = Self::new(2, 0, 0, 0);
    /// M·L·T⁻²
    pub const FORCE: Self = Self::new(1, 1, -2, 0);
    /// M·L²·T⁻²
    pub const ENERGY: Self = Self::new(2, 1, -2, 0);

    /// Builds a dimension from explicit exponents.
    #[must_use]
    pub const fn new(length: i32, mass: i32, time: i32, angle: i32) -> Self {
        Self { length, mass, time, angle }
    }

    /// True when every exponent is zero.
    #[must_use]
    pub const fn is_dimensionless(&self) -> bool {
        self.length == 0 && self.mass == 0 && self.time == 0 && self.angle == 0
    }

    /// Raises the dimension to an integer power.
    #[must_use]
    pub const fn powi(self, n: i32) -> Self {
        Self::new(self.length * n, self.mass * n, self.time * n, self.angle * n)
    }

    /// Raises the dimension to a real power, if every resulting exponent is integral.
    #[must_use]
    pub fn powf(self, p: f64) -> Option<Self> {
        let scale = |e: i32| -> Option<i32> {
            let v = f64::from(e) * p;
            let rounded = v.round();
            ((v - rounded).abs() < 1e-9).then_some(rounded as i32)
        };
        Some(Self::new(
            scale(self.length)?,
            scale(self.mass)?,
            scale(self.time)?,
            scale(self.angle)?,
        ))
    }

    /// Same dimension with the angle exponent removed (arc length = angle · radius).
    #[must_use]
    pub const fn without_angle(self) -> Self {
        Self::new(self.length, self.mass, self.time, 0)
    }

    /// Conventional name for well-known dimensions.
    #[must_use]
    pub fn name(&self) -> Option<&'static str> {
        let name = match *self {
            Self::DIMENSIONLESS => "dimensionless",
            Self::LENGTH => "length",
            Self::MASS => "mass",
            Self::TIME => "time",
            Self::ANGLE => "angle",
            Self::VELOCITY => "velocity",
            Self::ACCELERATION => "acceleration",
            Self::ANGULAR_VELOCITY => "angular velocity",
            Self::ANGULAR_ACCELERATION => "angular acceleration",
            Self::FREQUENCY => "frequency",
            Self::AREA => "area",
            Self::FORCE => "force",
            Self::ENERGY => "energy",
            _ => return None,
        };
        Some(name)
    }
}

impl Mul for Dimension {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.length + rhs.length,
            self.mass + rhs.mass,
            self.time + rhs.time,
            self.angle + rhs.angle,
        )
    }
}

impl Div for Dimension {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        self * rhs.powi(-1)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.name() {
            return f.write_str(name);
        }
        let mut first = true;
        for (symbol, exponent) in [
            ("L", self.length),
            ("M", self.mass),
            ("T", self.time),
            ("A", self.angle),
        ] {
            if exponent == 0 {
                continue;
            }
            if !first {
                f.write_str("·")?;
            }
            first = false;
            if exponent == 1 {
                f.write_str(symbol)?;
            } else {
                write!(f, "{symbol}^{exponent}")?;
            }
        }
        Ok(())
    }
}

//! Sampling motions on a uniform time grid and exporting the result.
//!
//! Rendering is left to callers; this module only produces the data a
//! plotter needs and writes it as CSV.

use std::io::{self, Write};

use crate::errors::{KinematicsError, Result};
use crate::math::Scalar;
use crate::motion::{Field, Kinematics, Observable};
use crate::units::{Quantity, QuantityVector, Value};

/// Generates `n` linearly spaced samples in `[start, stop]`.
#[must_use]
pub fn linspace(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as Scalar - 1.0);
            (0..n).map(|i| step.mul_add(i as Scalar, start)).collect()
        }
    }
}

/// Values with a fixed number of SI components, one CSV column each.
pub trait SiComponents {
    /// Components in coherent SI units.
    fn si_components(&self) -> Vec<Scalar>;
}

impl SiComponents for Quantity {
    fn si_components(&self) -> Vec<Scalar> {
        vec![self.si_value()]
    }
}

impl<const D: usize> SiComponents for QuantityVector<D> {
    fn si_components(&self) -> Vec<Scalar> {
        self.si_values().iter().copied().collect()
    }
}

impl SiComponents for Observable {
    fn si_components(&self) -> Vec<Scalar> {
        Self::si_components(self)
    }
}

/// State of a motion at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample<O> {
    /// Elapsed time.
    pub time: Quantity,
    /// Position at `time`.
    pub position: O,
    /// Velocity at `time`.
    pub velocity: O,
    /// Acceleration at `time`.
    pub acceleration: O,
}

/// Samples of one motion on an increasing time grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory<O> {
    samples: Vec<Sample<O>>,
}

impl<O> Trajectory<O> {
    /// Samples in time order.
    #[must_use]
    pub fn samples(&self) -> &[Sample<O>] {
        &self.samples
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when no samples were taken.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample times in seconds.
    #[must_use]
    pub fn times(&self) -> Vec<Scalar> {
        self.samples.iter().map(|s| s.time.si_value()).collect()
    }

    /// Positions in time order.
    pub fn positions(&self) -> impl Iterator<Item = &O> {
        self.samples.iter().map(|s| &s.position)
    }
}

/// Evaluates `motion` at `n` evenly spaced times in `[0, t_max]`.
///
/// # Errors
///
/// Returns [`KinematicsError::InvalidArgument`] when `t_max <= 0` or `n < 2`,
/// and propagates evaluation errors.
pub fn sample<K: Kinematics>(
    motion: &K,
    t_max: impl Into<Value>,
    n: usize,
) -> Result<Trajectory<K::Output>> {
    let t_max = Field::Time.resolve(t_max)?.si_value();
    if !(t_max > 0.0 && t_max.is_finite()) {
        return Err(KinematicsError::invalid(format!(
            "sampling horizon must be positive and finite, got {t_max} s"
        )));
    }
    if n < 2 {
        return Err(KinematicsError::invalid(format!("need at least 2 samples, got {n}")));
    }
    tracing::debug!(t_max, n, "sampling trajectory");

    let samples = linspace(0.0, t_max, n)
        .into_iter()
        .map(|t| {
            Ok(Sample {
                time: Quantity::seconds(t),
                position: motion.position(t)?,
                velocity: motion.velocity(t)?,
                acceleration: motion.acceleration(t)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Trajectory { samples })
}

fn header_columns(name: &str, width: usize) -> Vec<String> {
    const AXES: [&str; 3] = ["x", "y", "z"];
    match width {
        1 => vec![name.to_owned()],
        _ => (0..width)
            .map(|i| AXES.get(i).map_or_else(|| format!("{name}_{i}"), |a| format!("{name}_{a}")))
            .collect(),
    }
}

/// Writes a CSV of the trajectory, one row per sample, in SI units.
///
/// The header is `time` followed by position, velocity and acceleration
/// columns (`position` for scalars, `position_x,position_y,…` for vectors).
pub fn write_trajectory_csv<W: Write, O: SiComponents>(
    mut w: W,
    trajectory: &Trajectory<O>,
) -> io::Result<()> {
    let width = trajectory.samples.first().map_or(1, |s| s.position.si_components().len());
    let mut header = vec!["time".to_owned()];
    for name in ["position", "velocity", "acceleration"] {
        header.extend(header_columns(name, width));
    }
    writeln!(w, "{}", header.join(","))?;

    for sample in &trajectory.samples {
        let mut row = vec![format!("{:.16e}", sample.time.si_value())];
        for value in [&sample.position, &sample.velocity, &sample.acceleration] {
            row.extend(value.si_components().iter().map(|c| format!("{c:.16e}")));
        }
        writeln!(w, "{}", row.join(","))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::motion::{AcceleratedRectilinear, Motion, UniformCircular};

    #[test]
    fn linspace_includes_endpoints() {
        let xs = linspace(0.0, 1.0, 5);
        assert_eq!(xs.len(), 5);
        assert_relative_eq!(xs[0], 0.0);
        assert_relative_eq!(xs[4], 1.0);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
    }

    #[test]
    fn sampling_requires_a_positive_horizon() {
        let motion = AcceleratedRectilinear::default();
        assert!(matches!(sample(&motion, 0.0, 10), Err(KinematicsError::InvalidArgument(_))));
        assert!(matches!(sample(&motion, -1.0, 10), Err(KinematicsError::InvalidArgument(_))));
        assert!(matches!(sample(&motion, 1.0, 1), Err(KinematicsError::InvalidArgument(_))));
        assert!(matches!(sample(&motion, Quantity::meters(1.0), 4), Err(KinematicsError::Units(_))));
    }

    #[test]
    fn samples_match_direct_evaluation() {
        let motion = AcceleratedRectilinear::new(0.0, 10.0, -2.0).expect("valid");
        let trajectory = sample(&motion, 10.0, 11).expect("valid grid");
        assert_eq!(trajectory.len(), 11);
        let fifth = &trajectory.samples()[5];
        assert_relative_eq!(fifth.time.si_value(), 5.0, epsilon = 1.0e-12);
        assert_relative_eq!(fifth.position.si_value(), 25.0, epsilon = 1.0e-9);
        assert_relative_eq!(fifth.velocity.si_value(), 0.0, epsilon = 1.0e-9);
    }

    #[test]
    fn csv_has_one_column_per_component() {
        let motion = Motion::from(UniformCircular::new(1.0, 0.0, 1.0).expect("valid"));
        let trajectory = sample(&motion, 1.0, 3).expect("valid grid");
        let mut buffer = Vec::new();
        write_trajectory_csv(&mut buffer, &trajectory).expect("in-memory write");
        let text = String::from_utf8(buffer).expect("utf-8");
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some(
                "time,position_x,position_y,velocity_x,velocity_y,acceleration_x,acceleration_y"
            )
        );
        let first: Vec<f64> =
            lines.next().expect("row").split(',').map(|c| c.parse().expect("number")).collect();
        assert_eq!(first.len(), 7);
        assert_relative_eq!(first[1], 1.0, epsilon = 1.0e-12);
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn scalar_csv_uses_bare_column_names() {
        let motion = AcceleratedRectilinear::new(0.0, 1.0, 0.0).expect("valid");
        let trajectory = sample(&motion, 2.0, 2).expect("valid grid");
        let mut buffer = Vec::new();
        write_trajectory_csv(&mut buffer, &trajectory).expect("in-memory write");
        let text = String::from_utf8(buffer).expect("utf-8");
        assert!(text.starts_with("time,position,velocity,acceleration\n"));
    }
}

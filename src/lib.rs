#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Physical constants, tolerances, and frequency conversions.
pub mod constants;
/// Dimensioned quantities, units, and unit parsing.
pub mod units;
/// Shared numerical aliases and helpers (vectors, phasors).
pub mod math;
/// The motion contract and its closed-form variants.
pub mod motion;
/// Inverse queries on constant-acceleration motion, linear and angular.
pub mod inverse;
/// Relative velocity between moving bodies.
pub mod relative;
/// Time-grid sampling and CSV export.
pub mod sampling;
/// YAML and environment settings.
pub mod config;
/// Caller-owned `tracing` subscriber.
pub mod logging;
/// Error types shared between modules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;

//! Unit scale factors and reference constants (SI)
//!
//! Inputs are given in nanometres and nanometres per nanosecond; multiply by
//! these factors once, when building the canonical particle system.

use super::math::Scalar;

pub const FEMTOSECOND: Scalar = 1e-15;
pub const NANOSECOND: Scalar = 1e-9;
pub const NANOMETER: Scalar = 1e-9;

/// nm/ns expressed in m/s (numerically 1)
pub const NANOMETER_PER_NANOSECOND: Scalar = NANOMETER / NANOSECOND;

/// Boltzmann constant in J/K
pub const BOLTZMANN: Scalar = 1.380658e-23;

/// Argon atom mass in kg
pub const ARGON_MASS: Scalar = 66.34e-27;

/// Argon Lennard-Jones distance parameter in m
pub const ARGON_SIGMA: Scalar = 0.341e-9;

/// Argon Lennard-Jones well depth divided by k_B, in K
pub const ARGON_EPSILON_OVER_KB: Scalar = 119.8;

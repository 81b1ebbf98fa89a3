//! Particle model, Lennard-Jones interaction, diagnostics and integrators

pub mod constants;
pub mod diagnostics;
pub mod integrators;
pub mod math;
pub mod particle;
pub mod potential;
pub mod units;

pub use constants::Constants;
pub use particle::{Particle, ParticleSystem};
pub use potential::LennardJones;

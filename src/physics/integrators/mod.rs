//! Numerical integration methods for the particle system

use crate::physics::constants::Constants;
use crate::physics::math::Scalar;
use crate::physics::particle::ParticleSystem;
use serde::{Deserialize, Serialize};

pub mod explicit_euler;
pub mod registry;
pub mod velocity_verlet;

pub use explicit_euler::ExplicitEuler;
pub use registry::IntegratorRegistry;
pub use velocity_verlet::VelocityVerlet;

/// How per-particle updates within one step see their neighbours
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum UpdateOrder {
    /// Forces for every particle come from one position snapshot and are
    /// applied in a second pass. Independent of particle order.
    #[default]
    Snapshot,
    /// Particles are updated one at a time and later particles read the
    /// already-moved positions of earlier ones, as in a plain per-particle
    /// loop. Order dependent. The force arithmetic is shared with
    /// `Snapshot`, so only the update order is reproduced, not the exact
    /// rounding of any particular loop.
    Sequential,
}

/// Base trait for all integrators
pub trait Integrator: Send + Sync {
    /// Advance every particle of `system` by one time step `dt`
    ///
    /// Integrators keep no state between calls; everything they need is in
    /// `system` and `constants`.
    fn step(&self, system: &mut ParticleSystem, constants: &Constants, dt: Scalar);

    /// Registry name of this integrator
    fn name(&self) -> &str;

    /// Order of accuracy
    fn order(&self) -> usize;

    /// Whether the map preserves phase-space volume
    fn symplectic(&self) -> bool;

    fn update_order(&self) -> UpdateOrder;
}

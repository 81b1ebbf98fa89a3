//! Explicit Euler integration method (forward Euler)
//!
//! Kept as the baseline the velocity Verlet method is compared against. It
//! does not conserve energy, and the drift grows with the step size.

use super::{Integrator, UpdateOrder};
use crate::physics::constants::Constants;
use crate::physics::math::Scalar;
use crate::physics::particle::ParticleSystem;

/// Explicit Euler integrator
///
/// Both derivatives are taken at the start of the step:
///
/// ```text
/// Δq_i = h · p_i / m
/// Δp_i = h · Σ_{j≠i} F(q_i, q_j)
/// q_i += Δq_i,  p_i += Δp_i
/// ```
///
/// # Properties
///
/// - **Order of accuracy**: O(h) local truncation error
/// - **Force evaluations**: 1 per step
/// - **Symplectic**: No
/// - **Energy drift**: grows without bound, faster for larger `h`
///
/// With [`UpdateOrder::Snapshot`] all `Δp_i` come from the pre-step
/// positions. With [`UpdateOrder::Sequential`] particle `i` sees the
/// already-updated positions of particles `0..i`.
#[derive(Debug, Clone, Default)]
pub struct ExplicitEuler {
    pub update_order: UpdateOrder,
}

impl ExplicitEuler {
    pub fn new(update_order: UpdateOrder) -> Self {
        Self { update_order }
    }

    fn step_snapshot(&self, system: &mut ParticleSystem, constants: &Constants, dt: Scalar) {
        let forces = constants.potential.net_forces(&system.positions());

        for (particle, force) in system.particles_mut().iter_mut().zip(forces) {
            let delta_q = particle.momentum * (dt / constants.mass);
            let delta_p = force * dt;
            particle.position += delta_q;
            particle.momentum += delta_p;
        }
    }

    fn step_sequential(&self, system: &mut ParticleSystem, constants: &Constants, dt: Scalar) {
        let mut positions = system.positions();

        for (i, particle) in system.particles_mut().iter_mut().enumerate() {
            let delta_q = particle.momentum * (dt / constants.mass);
            let delta_p = constants.potential.net_force(i, &positions) * dt;
            particle.position += delta_q;
            particle.momentum += delta_p;
            positions[i] = particle.position;
        }
    }
}

impl Integrator for ExplicitEuler {
    fn step(&self, system: &mut ParticleSystem, constants: &Constants, dt: Scalar) {
        match self.update_order {
            UpdateOrder::Snapshot => self.step_snapshot(system, constants, dt),
            UpdateOrder::Sequential => self.step_sequential(system, constants, dt),
        }
    }

    fn name(&self) -> &str {
        "explicit_euler"
    }

    fn order(&self) -> usize {
        1
    }

    fn symplectic(&self) -> bool {
        false
    }

    fn update_order(&self) -> UpdateOrder {
        self.update_order
    }
}

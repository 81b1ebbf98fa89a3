//! Velocity Verlet integration method

use super::{Integrator, UpdateOrder};
use crate::physics::constants::Constants;
use crate::physics::math::Scalar;
use crate::physics::particle::ParticleSystem;

/// Velocity Verlet integrator
///
/// A second-order symplectic, time-reversible integrator. Energy error
/// oscillates within a bound instead of drifting, as long as `h` resolves
/// the fastest vibration in the cluster.
///
/// The step is a half kick, a drift and a second half kick:
///
/// ```text
/// p_i += (h/2) · Σ_{j≠i} F(q_i, q_j)     forces at the old positions
/// q_i += h · p_i / m                      drift with the half-kicked momentum
/// p_i += (h/2) · Σ_{j≠i} F(q_i, q_j)     forces at the drifted positions
/// ```
///
/// With [`UpdateOrder::Snapshot`] each stage runs over all particles before
/// the next begins, so the second kick sees every particle drifted. With
/// [`UpdateOrder::Sequential`] all three stages run for particle `i` before
/// particle `i + 1` starts.
#[derive(Debug, Clone, Default)]
pub struct VelocityVerlet {
    pub update_order: UpdateOrder,
}

impl VelocityVerlet {
    pub fn new(update_order: UpdateOrder) -> Self {
        Self { update_order }
    }

    fn half_kick(system: &mut ParticleSystem, constants: &Constants, dt: Scalar) {
        let forces = constants.potential.net_forces(&system.positions());
        for (particle, force) in system.particles_mut().iter_mut().zip(forces) {
            particle.momentum += force * (0.5 * dt);
        }
    }

    fn step_snapshot(&self, system: &mut ParticleSystem, constants: &Constants, dt: Scalar) {
        Self::half_kick(system, constants, dt);

        for particle in system.particles_mut() {
            particle.position += particle.momentum * (dt / constants.mass);
        }

        Self::half_kick(system, constants, dt);
    }

    fn step_sequential(&self, system: &mut ParticleSystem, constants: &Constants, dt: Scalar) {
        let lj = constants.potential;
        let mut positions = system.positions();

        for (i, particle) in system.particles_mut().iter_mut().enumerate() {
            particle.momentum += lj.net_force(i, &positions) * (0.5 * dt);

            particle.position += particle.momentum * (dt / constants.mass);
            positions[i] = particle.position;

            particle.momentum += lj.net_force(i, &positions) * (0.5 * dt);
        }
    }
}

impl Integrator for VelocityVerlet {
    fn step(&self, system: &mut ParticleSystem, constants: &Constants, dt: Scalar) {
        match self.update_order {
            UpdateOrder::Snapshot => self.step_snapshot(system, constants, dt),
            UpdateOrder::Sequential => self.step_sequential(system, constants, dt),
        }
    }

    fn name(&self) -> &str {
        "velocity_verlet"
    }

    fn order(&self) -> usize {
        2
    }

    fn symplectic(&self) -> bool {
        true
    }

    fn update_order(&self) -> UpdateOrder {
        self.update_order
    }
}

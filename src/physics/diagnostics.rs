//! Whole-system reductions used to judge integrator accuracy
//!
//! Everything here is recomputed from scratch on each call. The potential
//! term is O(N²) over unordered pairs, which is fine for small clusters.

use super::constants::Constants;
use super::math::Scalar;
use super::particle::ParticleSystem;
use super::potential::LennardJones;

/// Σ |p|² over all particles
fn momentum_squared_sum(system: &ParticleSystem) -> Scalar {
    system.iter().map(|p| p.momentum.length_squared()).sum()
}

/// Σ |p_i|² / 2m
pub fn kinetic_energy(system: &ParticleSystem, constants: &Constants) -> Scalar {
    momentum_squared_sum(system) / (2.0 * constants.mass)
}

/// Pair potential summed over unordered pairs i < j, each pair counted once
pub fn potential_energy(system: &ParticleSystem, potential: &LennardJones) -> Scalar {
    let particles = system.particles();
    let mut energy = 0.0;
    for (i, pi) in particles.iter().enumerate() {
        for pj in &particles[i + 1..] {
            energy += potential.potential(pi.position, pj.position);
        }
    }
    energy
}

/// Hamiltonian: kinetic plus pairwise potential energy (J)
pub fn total_energy(system: &ParticleSystem, constants: &Constants) -> Scalar {
    kinetic_energy(system, constants) + potential_energy(system, &constants.potential)
}

/// Instantaneous kinetic temperature (K) from 2D equipartition:
/// `T = Σ|p|² / (2 N k_B m)`
pub fn temperature(system: &ParticleSystem, constants: &Constants) -> Scalar {
    let n = system.len() as Scalar;
    momentum_squared_sum(system) / (2.0 * n * constants.boltzmann * constants.mass)
}

/// Reference energy and temperature that drifts are measured against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baseline {
    pub energy: Scalar,
    pub temperature: Scalar,
}

impl Baseline {
    pub fn measure(system: &ParticleSystem, constants: &Constants) -> Self {
        Self {
            energy: total_energy(system, constants),
            temperature: temperature(system, constants),
        }
    }

    /// (H − H0) / k_B, in kelvin
    pub fn energy_drift(&self, system: &ParticleSystem, constants: &Constants) -> Scalar {
        (total_energy(system, constants) - self.energy) / constants.boltzmann
    }

    /// T − T0, in kelvin
    pub fn temperature_drift(&self, system: &ParticleSystem, constants: &Constants) -> Scalar {
        temperature(system, constants) - self.temperature
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::math::Vector;
    use crate::physics::particle::Particle;
    use crate::physics::units::NANOMETER;

    fn triangle(momenta: [Vector; 3]) -> ParticleSystem {
        let positions = [
            Vector::ZERO,
            Vector::new(0.38 * NANOMETER, 0.0),
            Vector::new(0.19 * NANOMETER, 0.33 * NANOMETER),
        ];
        ParticleSystem::new(
            positions
                .iter()
                .zip(momenta)
                .map(|(&q, p)| Particle::new(q, p))
                .collect(),
        )
    }

    #[test]
    fn test_zero_momenta_energy_is_pair_potentials_only() {
        let constants = Constants::argon();
        let system = triangle([Vector::ZERO; 3]);
        let q = system.positions();
        let lj = constants.potential;

        let pairs = lj.potential(q[0], q[1]) + lj.potential(q[0], q[2]) + lj.potential(q[1], q[2]);

        assert_eq!(kinetic_energy(&system, &constants), 0.0);
        assert_eq!(temperature(&system, &constants), 0.0);
        let energy = total_energy(&system, &constants);
        assert!(((energy - pairs) / pairs).abs() < 1e-14);
    }

    #[test]
    fn test_each_pair_counted_once() {
        let constants = Constants::argon();
        let system = triangle([Vector::ZERO; 3]);
        let q = system.positions();
        let lj = constants.potential;

        let ordered_pairs: Scalar = (0..3)
            .flat_map(|i| (0..3).map(move |j| (i, j)))
            .filter(|(i, j)| i != j)
            .map(|(i, j)| lj.potential(q[i], q[j]))
            .sum();

        let energy = potential_energy(&system, &lj);
        assert!(((2.0 * energy - ordered_pairs) / ordered_pairs).abs() < 1e-14);
    }

    #[test]
    fn test_kinetic_energy_and_temperature() {
        let constants = Constants::argon();
        let m = constants.mass;
        let system = triangle([
            Vector::new(100.0, 0.0) * m,
            Vector::new(0.0, -200.0) * m,
            Vector::ZERO,
        ]);

        // ½ m v² summed: ½ m (100² + 200²)
        let expected_ke = 0.5 * m * (100.0 * 100.0 + 200.0 * 200.0);
        let ke = kinetic_energy(&system, &constants);
        assert!(((ke - expected_ke) / expected_ke).abs() < 1e-14);

        // Two quadratic degrees of freedom per particle: KE = N k_B T
        let t = temperature(&system, &constants);
        let expected_t = expected_ke / (3.0 * constants.boltzmann);
        assert!(((t - expected_t) / expected_t).abs() < 1e-14);
    }

    #[test]
    fn test_baseline_drift_is_zero_for_unchanged_system() {
        let constants = Constants::argon();
        let m = constants.mass;
        let system = triangle([
            Vector::new(-30.0, -20.0) * m,
            Vector::new(50.0, -90.0) * m,
            Vector::new(-70.0, -60.0) * m,
        ]);
        let baseline = Baseline::measure(&system, &constants);

        assert_eq!(baseline.energy_drift(&system, &constants), 0.0);
        assert_eq!(baseline.temperature_drift(&system, &constants), 0.0);
    }
}

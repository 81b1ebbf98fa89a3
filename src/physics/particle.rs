//! Particle state and the fixed-size particle system

use super::math::{Scalar, Vector};
use super::units::{NANOMETER, NANOMETER_PER_NANOSECOND};
use crate::error::{Error, Result};

/// Position (m) and momentum (kg·m/s) of one particle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Particle {
    pub position: Vector,
    pub momentum: Vector,
}

impl Particle {
    pub fn new(position: Vector, momentum: Vector) -> Self {
        Self { position, momentum }
    }

    pub fn at_rest(position: Vector) -> Self {
        Self::new(position, Vector::ZERO)
    }

    pub fn velocity(&self, mass: Scalar) -> Vector {
        self.momentum / mass
    }
}

/// Ordered collection of particles whose length never changes after construction.
///
/// `Clone` is a deep copy: each integrator tracks its own system and no
/// storage is shared with the canonical initial state.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    /// Build a system from positions in nm and velocities in nm/ns
    pub fn from_input_units(
        positions_nm: &[[Scalar; 2]],
        velocities_nm_per_ns: &[[Scalar; 2]],
        mass: Scalar,
    ) -> Result<Self> {
        if positions_nm.len() != velocities_nm_per_ns.len() {
            return Err(Error::Config(format!(
                "{} positions but {} velocities",
                positions_nm.len(),
                velocities_nm_per_ns.len()
            )));
        }
        if positions_nm.is_empty() {
            return Err(Error::Config("particle list is empty".to_string()));
        }

        let particles = positions_nm
            .iter()
            .zip(velocities_nm_per_ns)
            .map(|(&[x, y], &[vx, vy])| {
                let position = Vector::new(x, y) * NANOMETER;
                let velocity = Vector::new(vx, vy) * NANOMETER_PER_NANOSECOND;
                Particle::new(position, velocity * mass)
            })
            .collect();

        Ok(Self::new(particles))
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access that cannot change the particle count
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    /// Copy of every position, in particle order
    pub fn positions(&self) -> Vec<Vector> {
        self.particles.iter().map(|p| p.position).collect()
    }

    pub fn is_finite(&self) -> bool {
        self.particles
            .iter()
            .all(|p| p.position.is_finite() && p.momentum.is_finite())
    }
}

impl<'a> IntoIterator for &'a ParticleSystem {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}

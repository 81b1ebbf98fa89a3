use super::math::Scalar;
use super::potential::LennardJones;
use super::units::{ARGON_EPSILON_OVER_KB, ARGON_MASS, ARGON_SIGMA, BOLTZMANN};

/// Immutable physical constants for one run, in SI units.
///
/// Built once at startup and passed by reference into the force model,
/// the diagnostics and every integrator step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constants {
    /// Mass shared by every particle (kg)
    pub mass: Scalar,
    /// Boltzmann constant (J/K)
    pub boltzmann: Scalar,
    /// Pair interaction
    pub potential: LennardJones,
}

impl Constants {
    pub fn new(mass: Scalar, boltzmann: Scalar, potential: LennardJones) -> Self {
        Self {
            mass,
            boltzmann,
            potential,
        }
    }

    /// Argon parameters, with ε given as a multiple of `BOLTZMANN`
    pub fn argon() -> Self {
        Self::new(
            ARGON_MASS,
            BOLTZMANN,
            LennardJones::new(ARGON_SIGMA, ARGON_EPSILON_OVER_KB * BOLTZMANN),
        )
    }
}

impl Default for Constants {
    fn default() -> Self {
        Self::argon()
    }
}

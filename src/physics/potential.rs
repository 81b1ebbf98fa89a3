//! Lennard-Jones pair interaction

use super::math::{Scalar, Vector};

/// 12-6 Lennard-Jones pair potential
///
/// ```text
/// U(d) = 4ε [ (σ/d)^12 − (σ/d)^6 ]
/// F(d) = −4ε [ 6σ^6/d^7 − 12σ^12/d^13 ]   along (qi − qj)/d
/// ```
///
/// Both evaluations are singular at `d = 0`. Coincident positions are not
/// guarded against here; they produce NaN/infinite values which the driver
/// reports as a failed run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LennardJones {
    /// Distance at which the potential crosses zero (m)
    pub sigma: Scalar,
    /// Well depth (J)
    pub epsilon: Scalar,
}

impl LennardJones {
    pub fn new(sigma: Scalar, epsilon: Scalar) -> Self {
        Self { sigma, epsilon }
    }

    /// Separation at the bottom of the well, 2^(1/6) σ
    pub fn equilibrium_distance(&self) -> Scalar {
        self.sigma * 2.0_f64.powf(1.0 / 6.0)
    }

    /// Potential energy of the pair at `qi`, `qj`
    pub fn potential(&self, qi: Vector, qj: Vector) -> Scalar {
        let d = (qi - qj).length();
        let sr6 = (self.sigma / d).powi(6);
        4.0 * self.epsilon * (sr6 * sr6 - sr6)
    }

    /// Force on the particle at `qi` exerted by the particle at `qj`
    pub fn force(&self, qi: Vector, qj: Vector) -> Vector {
        let separation = qi - qj;
        let d = separation.length();
        let sigma6 = self.sigma.powi(6);
        let magnitude =
            -4.0 * self.epsilon * ((6.0 * sigma6) / d.powi(7) - (12.0 * sigma6 * sigma6) / d.powi(13));
        separation * (magnitude / d)
    }

    /// Sum of forces on particle `i` from every other entry of `positions`
    pub fn net_force(&self, i: usize, positions: &[Vector]) -> Vector {
        let qi = positions[i];
        positions
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .fold(Vector::ZERO, |acc, (_, &qj)| acc + self.force(qi, qj))
    }

    /// Net force on every particle, evaluated against one position snapshot
    pub fn net_forces(&self, positions: &[Vector]) -> Vec<Vector> {
        (0..positions.len())
            .map(|i| self.net_force(i, positions))
            .collect()
    }
}

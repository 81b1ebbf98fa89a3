use crate::physics::constants::Constants;
use crate::physics::diagnostics::Baseline;
use crate::physics::math::{Scalar, Vector};
use crate::physics::particle::ParticleSystem;

/// Drift of the conserved quantities at one sampled time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimestepRecord {
    /// Simulated time (s)
    pub time: Scalar,
    /// (H − H0) / k_B (K)
    pub energy_drift: Scalar,
    /// T − T0 (K)
    pub temperature_drift: Scalar,
}

impl TimestepRecord {
    pub fn measure(
        time: Scalar,
        system: &ParticleSystem,
        constants: &Constants,
        baseline: &Baseline,
    ) -> Self {
        Self {
            time,
            energy_drift: baseline.energy_drift(system, constants),
            temperature_drift: baseline.temperature_drift(system, constants),
        }
    }
}

/// All particle positions (m) at one sampled time, in particle order
#[derive(Debug, Clone, PartialEq)]
pub struct PositionSnapshot {
    pub time: Scalar,
    pub positions: Vec<Vector>,
}

impl PositionSnapshot {
    pub fn capture(time: Scalar, system: &ParticleSystem) -> Self {
        Self {
            time,
            positions: system.positions(),
        }
    }

    /// `x0, y0, x1, y1, …`
    pub fn flattened(&self) -> impl Iterator<Item = Scalar> + '_ {
        self.positions.iter().flat_map(|q| [q.x, q.y])
    }
}

/// One integrator's output for one step
#[derive(Debug, Clone, PartialEq)]
pub struct SampleEntry {
    pub record: TimestepRecord,
    pub snapshot: Option<PositionSnapshot>,
}

/// Output of every tracked integrator for one step, in the run's integrator order
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub step: usize,
    pub time: Scalar,
    pub entries: Vec<SampleEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::particle::Particle;

    #[test]
    fn test_flattened_positions_interleave_coordinates() {
        let system = ParticleSystem::new(vec![
            Particle::at_rest(Vector::new(1.0, 2.0)),
            Particle::at_rest(Vector::new(3.0, 4.0)),
        ]);
        let snapshot = PositionSnapshot::capture(0.0, &system);
        let flat: Vec<Scalar> = snapshot.flattened().collect();
        assert_eq!(flat, vec![1.0, 2.0, 3.0, 4.0]);
    }
}

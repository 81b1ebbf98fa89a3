use super::record::{PositionSnapshot, Sample, SampleEntry, TimestepRecord};
use crate::error::{Error, Result};
use crate::physics::constants::Constants;
use crate::physics::diagnostics::Baseline;
use crate::physics::integrators::Integrator;
use crate::physics::math::Scalar;
use crate::physics::particle::ParticleSystem;

/// A particle system owned by one integrator
pub struct Tracked {
    pub integrator: Box<dyn Integrator>,
    pub system: ParticleSystem,
}

/// Lazy, finite sequence of samples for one timestep size.
///
/// Each call to `next` measures every tracked system at `t = k·h`, then
/// advances each one by a single step. Yields `steps` samples, or stops after
/// the first error.
pub struct Trajectory<'a> {
    constants: &'a Constants,
    baseline: Baseline,
    timestep: Scalar,
    steps: usize,
    next_step: usize,
    record_positions: bool,
    tracked: Vec<Tracked>,
    failed: bool,
}

impl<'a> Trajectory<'a> {
    pub fn new(
        constants: &'a Constants,
        baseline: Baseline,
        timestep: Scalar,
        steps: usize,
        record_positions: bool,
        tracked: Vec<Tracked>,
    ) -> Self {
        Self {
            constants,
            baseline,
            timestep,
            steps,
            next_step: 0,
            record_positions,
            tracked,
            failed: false,
        }
    }

    pub fn timestep(&self) -> Scalar {
        self.timestep
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn integrator_names(&self) -> Vec<String> {
        self.tracked
            .iter()
            .map(|t| t.integrator.name().to_string())
            .collect()
    }

    /// Current state of each tracked system
    pub fn systems(&self) -> impl Iterator<Item = &ParticleSystem> {
        self.tracked.iter().map(|t| &t.system)
    }

    fn sample(&mut self) -> Result<Sample> {
        let step = self.next_step;
        let time = step as Scalar * self.timestep;

        let mut entries = Vec::with_capacity(self.tracked.len());
        for tracked in &self.tracked {
            let record =
                TimestepRecord::measure(time, &tracked.system, self.constants, &self.baseline);

            let non_finite = if !record.energy_drift.is_finite() {
                Some("energy")
            } else if !record.temperature_drift.is_finite() {
                Some("temperature")
            } else if !tracked.system.is_finite() {
                Some("particle state")
            } else {
                None
            };
            if let Some(quantity) = non_finite {
                return Err(Error::NonFinite {
                    integrator: tracked.integrator.name().to_string(),
                    time,
                    quantity,
                });
            }

            let snapshot = self
                .record_positions
                .then(|| PositionSnapshot::capture(time, &tracked.system));
            entries.push(SampleEntry { record, snapshot });
        }

        for tracked in &mut self.tracked {
            tracked
                .integrator
                .step(&mut tracked.system, self.constants, self.timestep);
        }
        self.next_step += 1;

        tracing::trace!(step, time, "sampled");
        Ok(Sample {
            step,
            time,
            entries,
        })
    }
}

impl Iterator for Trajectory<'_> {
    type Item = Result<Sample>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.next_step >= self.steps {
            return None;
        }

        let sample = self.sample();
        if sample.is_err() {
            self.failed = true;
        }
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let remaining = self.steps - self.next_step;
        (0, Some(remaining))
    }
}

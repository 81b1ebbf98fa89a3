use super::record::TimestepRecord;
use super::sink::{RecordSink, RunDescriptor};
use super::trajectory::{Tracked, Trajectory};
use crate::error::{Error, Result};
use crate::output::timestep_label;
use crate::physics::constants::Constants;
use crate::physics::diagnostics::Baseline;
use crate::physics::integrators::{IntegratorRegistry, UpdateOrder};
use crate::physics::math::{Scalar, step_count};
use crate::physics::particle::ParticleSystem;
use crate::physics::units::FEMTOSECOND;
use tracing::{error, info};

/// End time, candidate step sizes and integrators for a study (SI units)
#[derive(Debug, Clone, PartialEq)]
pub struct RunPlan {
    pub end_time: Scalar,
    pub timesteps: Vec<Scalar>,
    pub integrators: Vec<String>,
    pub update_order: UpdateOrder,
    pub record_positions: bool,
}

impl RunPlan {
    pub fn validate(&self) -> Result<()> {
        if !(self.end_time.is_finite() && self.end_time > 0.0) {
            return Err(Error::Config(format!(
                "end time must be positive, got {}",
                self.end_time
            )));
        }
        if self.timesteps.is_empty() {
            return Err(Error::Config("timestep list is empty".to_string()));
        }
        if let Some(h) = self
            .timesteps
            .iter()
            .find(|h| !(h.is_finite() && **h > 0.0))
        {
            return Err(Error::Config(format!("timestep must be positive, got {h}")));
        }
        let mut labels: Vec<String> = Vec::with_capacity(self.timesteps.len());
        for &h in &self.timesteps {
            let label = timestep_label(h);
            if labels.contains(&label) {
                return Err(Error::Config(format!(
                    "timestep {label} fs listed more than once"
                )));
            }
            labels.push(label);
        }
        if self.integrators.is_empty() {
            return Err(Error::Config("integrator list is empty".to_string()));
        }
        Ok(())
    }
}

/// Extremes and final values seen by one integrator during a run
#[derive(Debug, Clone, PartialEq)]
pub struct IntegratorSummary {
    pub name: String,
    pub last: Option<TimestepRecord>,
    pub max_abs_energy_drift: Scalar,
    pub max_abs_temperature_drift: Scalar,
}

impl IntegratorSummary {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            last: None,
            max_abs_energy_drift: 0.0,
            max_abs_temperature_drift: 0.0,
        }
    }

    fn observe(&mut self, record: &TimestepRecord) {
        self.max_abs_energy_drift = self.max_abs_energy_drift.max(record.energy_drift.abs());
        self.max_abs_temperature_drift = self
            .max_abs_temperature_drift
            .max(record.temperature_drift.abs());
        self.last = Some(*record);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub timestep: Scalar,
    pub steps: usize,
    pub integrators: Vec<IntegratorSummary>,
}

impl RunSummary {
    pub fn integrator(&self, name: &str) -> Option<&IntegratorSummary> {
        self.integrators.iter().find(|s| s.name == name)
    }
}

/// Outcome of one timestep configuration within a study
#[derive(Debug)]
pub struct RunReport {
    pub timestep: Scalar,
    pub outcome: Result<RunSummary>,
}

impl RunReport {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Integrator comparison over a menu of timestep sizes.
///
/// Holds the canonical initial system, which is never mutated: every run
/// starts each integrator from its own clone of it, and all drifts are
/// measured against one baseline taken from it.
pub struct Study {
    constants: Constants,
    initial: ParticleSystem,
    baseline: Baseline,
    plan: RunPlan,
    registry: IntegratorRegistry,
}

impl Study {
    pub fn new(constants: Constants, initial: ParticleSystem, plan: RunPlan) -> Result<Self> {
        plan.validate()?;
        validate_constants(&constants)?;
        if initial.is_empty() {
            return Err(Error::Config("particle list is empty".to_string()));
        }

        let registry = IntegratorRegistry::new().with_update_order(plan.update_order);
        let mut resolved: Vec<String> = Vec::with_capacity(plan.integrators.len());
        for name in &plan.integrators {
            let canonical = registry.create(name)?.name().to_string();
            if resolved.contains(&canonical) {
                return Err(Error::Config(format!(
                    "integrator '{canonical}' listed more than once"
                )));
            }
            resolved.push(canonical);
        }

        let baseline = Baseline::measure(&initial, &constants);

        Ok(Self {
            constants,
            initial,
            baseline,
            plan,
            registry,
        })
    }

    pub fn constants(&self) -> &Constants {
        &self.constants
    }

    pub fn initial(&self) -> &ParticleSystem {
        &self.initial
    }

    pub fn baseline(&self) -> Baseline {
        self.baseline
    }

    pub fn plan(&self) -> &RunPlan {
        &self.plan
    }

    /// Fresh trajectory for `timestep`, starting from the canonical system
    pub fn trajectory(&self, timestep: Scalar) -> Result<Trajectory<'_>> {
        if !(timestep.is_finite() && timestep > 0.0) {
            return Err(Error::Config(format!(
                "timestep must be positive, got {timestep}"
            )));
        }

        let tracked = self
            .plan
            .integrators
            .iter()
            .map(|name| {
                Ok(Tracked {
                    integrator: self.registry.create(name)?,
                    system: self.initial.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Trajectory::new(
            &self.constants,
            self.baseline,
            timestep,
            step_count(self.plan.end_time, timestep),
            self.plan.record_positions,
            tracked,
        ))
    }

    /// Run every integrator at one timestep size, streaming samples to `sink`
    pub fn run_configuration(
        &self,
        timestep: Scalar,
        sink: &mut dyn RecordSink,
    ) -> Result<RunSummary> {
        let mut trajectory = self.trajectory(timestep)?;
        let names = trajectory.integrator_names();
        let steps = trajectory.steps();

        info!(
            timestep_fs = timestep / FEMTOSECOND,
            steps,
            integrators = %names.join(", "),
            "starting run"
        );

        sink.begin_run(&RunDescriptor {
            timestep,
            steps,
            particle_count: self.initial.len(),
            integrators: names.clone(),
            record_positions: self.plan.record_positions,
        })?;

        let mut summaries: Vec<IntegratorSummary> =
            names.iter().map(|n| IntegratorSummary::new(n)).collect();

        for sample in &mut trajectory {
            let sample = sample?;
            for (summary, entry) in summaries.iter_mut().zip(&sample.entries) {
                summary.observe(&entry.record);
            }
            sink.write_sample(&sample)?;
        }

        let summary = RunSummary {
            timestep,
            steps,
            integrators: summaries,
        };
        sink.end_run(&summary)?;

        for integrator in &summary.integrators {
            if let Some(last) = integrator.last {
                info!(
                    integrator = %integrator.name,
                    timestep_fs = timestep / FEMTOSECOND,
                    final_energy_drift = last.energy_drift,
                    final_temperature_drift = last.temperature_drift,
                    max_abs_energy_drift = integrator.max_abs_energy_drift,
                    "run finished"
                );
            }
        }

        Ok(summary)
    }

    /// Run every configured timestep. A failed configuration is reported and
    /// the remaining ones still run.
    pub fn run(&self, sink: &mut dyn RecordSink) -> Vec<RunReport> {
        info!(
            particles = self.initial.len(),
            "Initial Energy = {} kb",
            self.baseline.energy / self.constants.boltzmann
        );

        self.plan
            .timesteps
            .iter()
            .map(|&timestep| {
                let outcome = self.run_configuration(timestep, sink);
                if let Err(e) = &outcome {
                    error!(timestep_fs = timestep / FEMTOSECOND, "run failed: {e}");
                }
                RunReport { timestep, outcome }
            })
            .collect()
    }
}

fn validate_constants(constants: &Constants) -> Result<()> {
    let checks = [
        ("mass", constants.mass),
        ("boltzmann", constants.boltzmann),
        ("sigma", constants.potential.sigma),
        ("epsilon", constants.potential.epsilon),
    ];
    for (name, value) in checks {
        if !(value.is_finite() && value > 0.0) {
            return Err(Error::Config(format!("{name} must be positive, got {value}")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::math::Vector;
    use crate::physics::particle::Particle;
    use crate::physics::units::{NANOMETER, NANOSECOND};
    use crate::simulation::sink::MemorySink;

    fn plan(timesteps: Vec<Scalar>) -> RunPlan {
        RunPlan {
            end_time: 0.001 * NANOSECOND,
            timesteps,
            integrators: vec!["explicit_euler".to_string(), "velocity_verlet".to_string()],
            update_order: UpdateOrder::Snapshot,
            record_positions: true,
        }
    }

    fn pair() -> ParticleSystem {
        let mass = Constants::argon().mass;
        ParticleSystem::new(vec![
            Particle::new(Vector::ZERO, Vector::new(20.0, 0.0) * mass),
            Particle::at_rest(Vector::new(0.38 * NANOMETER, 0.0)),
        ])
    }

    #[test]
    fn test_trajectory_samples_at_multiples_of_h() {
        let h = 10.0 * FEMTOSECOND;
        let study = Study::new(Constants::argon(), pair(), plan(vec![h])).unwrap();
        let samples: Vec<_> = study
            .trajectory(h)
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap();

        assert_eq!(samples.len(), step_count(0.001 * NANOSECOND, h));
        for (k, sample) in samples.iter().enumerate() {
            assert_eq!(sample.step, k);
            assert_eq!(sample.time, k as Scalar * h);
            assert_eq!(sample.entries.len(), 2);
        }

        // Both integrators start from the canonical state: zero drift at t = 0
        for entry in &samples[0].entries {
            assert_eq!(entry.record.energy_drift, 0.0);
            assert_eq!(entry.record.temperature_drift, 0.0);
            let snapshot = entry.snapshot.as_ref().unwrap();
            assert_eq!(snapshot.positions, study.initial().positions());
        }
    }

    #[test]
    fn test_runs_never_touch_the_canonical_system() {
        let initial = pair();
        let study = Study::new(Constants::argon(), initial.clone(), plan(vec![1e-15])).unwrap();

        let mut sink = MemorySink::new();
        let reports = study.run(&mut sink);
        assert!(reports.iter().all(RunReport::is_ok));
        assert_eq!(study.initial(), &initial);

        let mut trajectory = study.trajectory(1e-15).unwrap();
        for sample in trajectory.by_ref() {
            sample.unwrap();
        }
        let systems: Vec<&ParticleSystem> = trajectory.systems().collect();
        assert_ne!(systems[0], &initial);
        assert_ne!(systems[0], systems[1]);
        assert_eq!(study.initial(), &initial);
    }

    #[test]
    fn test_summary_tracks_final_record() {
        let study = Study::new(Constants::argon(), pair(), plan(vec![2e-15])).unwrap();
        let mut sink = MemorySink::new();
        let summary = study.run_configuration(2e-15, &mut sink).unwrap();

        let records = sink.records(0, "velocity_verlet").unwrap();
        let verlet = summary.integrator("velocity_verlet").unwrap();
        assert_eq!(verlet.last, records.last().copied());
        let max = records
            .iter()
            .map(|r| r.energy_drift.abs())
            .fold(0.0, Scalar::max);
        assert_eq!(verlet.max_abs_energy_drift, max);
        assert_eq!(sink.runs[0].summary.as_ref(), Some(&summary));
    }

    #[test]
    fn test_invalid_plans_are_rejected() {
        let constants = Constants::argon();

        let result = Study::new(constants, pair(), plan(vec![]));
        assert!(matches!(result, Err(Error::Config(_))));

        let result = Study::new(constants, pair(), plan(vec![1e-15, -1e-15]));
        assert!(matches!(result, Err(Error::Config(_))));

        let mut duplicated = plan(vec![1e-15]);
        duplicated.integrators = vec!["verlet".to_string(), "velocity_verlet".to_string()];
        let result = Study::new(constants, pair(), duplicated);
        assert!(matches!(result, Err(Error::Config(_))));

        let result = Study::new(constants, pair(), plan(vec![1e-15, 2e-15, 1e-15]));
        assert!(matches!(result, Err(Error::Config(_))));

        // Labels are rounded to 1e-6 fs, so these would share output files
        let result = Study::new(constants, pair(), plan(vec![1e-15, 1.0000000001e-15]));
        assert!(matches!(result, Err(Error::Config(_))));

        let mut unknown = plan(vec![1e-15]);
        unknown.integrators = vec!["leapfrog".to_string()];
        let result = Study::new(constants, pair(), unknown);
        assert!(matches!(result, Err(Error::UnknownIntegrator(_))));

        let mut massless = constants;
        massless.mass = 0.0;
        let result = Study::new(massless, pair(), plan(vec![1e-15]));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}

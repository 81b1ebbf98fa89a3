use super::record::{Sample, TimestepRecord};
use super::study::RunSummary;
use crate::error::Result;
use crate::physics::math::Scalar;

/// What a sink needs to know before the first sample of a run arrives
#[derive(Debug, Clone, PartialEq)]
pub struct RunDescriptor {
    pub timestep: Scalar,
    pub steps: usize,
    pub particle_count: usize,
    /// Integrator names, in the order of `Sample::entries`
    pub integrators: Vec<String>,
    pub record_positions: bool,
}

/// Destination for the record streams produced by a [`Study`](super::Study).
///
/// Samples arrive in increasing time order. `end_run` is only called when a
/// run completes; a failed run is abandoned after the last sample written.
pub trait RecordSink {
    fn begin_run(&mut self, run: &RunDescriptor) -> Result<()>;

    fn write_sample(&mut self, sample: &Sample) -> Result<()>;

    fn end_run(&mut self, summary: &RunSummary) -> Result<()>;
}

/// One run as captured by [`MemorySink`]
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutput {
    pub descriptor: RunDescriptor,
    pub samples: Vec<Sample>,
    pub summary: Option<RunSummary>,
}

/// Keeps every sample in memory. Intended for tests and small studies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySink {
    pub runs: Vec<RunOutput>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records of integrator `name` in run `run`, if both exist
    pub fn records(&self, run: usize, name: &str) -> Option<Vec<TimestepRecord>> {
        let output = self.runs.get(run)?;
        let index = output
            .descriptor
            .integrators
            .iter()
            .position(|n| n == name)?;
        Some(
            output
                .samples
                .iter()
                .map(|sample| sample.entries[index].record)
                .collect(),
        )
    }
}

impl RecordSink for MemorySink {
    fn begin_run(&mut self, run: &RunDescriptor) -> Result<()> {
        self.runs.push(RunOutput {
            descriptor: run.clone(),
            samples: Vec::with_capacity(run.steps),
            summary: None,
        });
        Ok(())
    }

    fn write_sample(&mut self, sample: &Sample) -> Result<()> {
        if let Some(run) = self.runs.last_mut() {
            run.samples.push(sample.clone());
        }
        Ok(())
    }

    fn end_run(&mut self, summary: &RunSummary) -> Result<()> {
        if let Some(run) = self.runs.last_mut() {
            run.summary = Some(summary.clone());
        }
        Ok(())
    }
}

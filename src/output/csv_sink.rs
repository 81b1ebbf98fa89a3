use super::{format_value, timestep_label};
use crate::error::Result;
use crate::physics::math::Scalar;
use crate::simulation::record::Sample;
use crate::simulation::sink::{RecordSink, RunDescriptor};
use crate::simulation::study::RunSummary;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

struct IntegratorFiles {
    records: csv::Writer<File>,
    positions: Option<csv::Writer<File>>,
    paths: Vec<PathBuf>,
}

/// Writes one drift table per integrator and timestep, plus an optional
/// position table:
///
/// - `<dir>/<integrator>-<h_fs>fs-ts.csv` with columns `time,energy_drift,temperature_drift`
/// - `<dir>/<integrator>-<h_fs>fs-ts-pos.csv` with columns `x0,y0,…`
///
/// Time is in seconds, positions in metres.
pub struct CsvSink {
    directory: PathBuf,
    precision: Option<usize>,
    open: Vec<IntegratorFiles>,
    written: Vec<PathBuf>,
}

impl CsvSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            precision: None,
            open: Vec::new(),
            written: Vec::new(),
        }
    }

    pub fn with_precision(mut self, precision: Option<usize>) -> Self {
        self.precision = precision;
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Files of every run that completed
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn records_path(&self, integrator: &str, timestep: Scalar) -> PathBuf {
        self.directory
            .join(format!("{integrator}-{}fs-ts.csv", timestep_label(timestep)))
    }

    pub fn positions_path(&self, integrator: &str, timestep: Scalar) -> PathBuf {
        self.directory
            .join(format!("{integrator}-{}fs-ts-pos.csv", timestep_label(timestep)))
    }
}

impl RecordSink for CsvSink {
    fn begin_run(&mut self, run: &RunDescriptor) -> Result<()> {
        std::fs::create_dir_all(&self.directory)?;
        // Files of an abandoned run are left as they are
        self.open.clear();

        for name in &run.integrators {
            let records_path = self.records_path(name, run.timestep);
            let mut records = csv::Writer::from_path(&records_path)?;
            records.write_record(["time", "energy_drift", "temperature_drift"])?;
            let mut paths = vec![records_path];

            let positions = if run.record_positions {
                let positions_path = self.positions_path(name, run.timestep);
                let mut writer = csv::Writer::from_path(&positions_path)?;
                let header: Vec<String> = (0..run.particle_count)
                    .flat_map(|i| [format!("x{i}"), format!("y{i}")])
                    .collect();
                writer.write_record(&header)?;
                paths.push(positions_path);
                Some(writer)
            } else {
                None
            };

            debug!(integrator = %name, files = paths.len(), "opened output files");
            self.open.push(IntegratorFiles {
                records,
                positions,
                paths,
            });
        }
        Ok(())
    }

    fn write_sample(&mut self, sample: &Sample) -> Result<()> {
        let precision = self.precision;
        for (files, entry) in self.open.iter_mut().zip(&sample.entries) {
            let record = entry.record;
            files.records.write_record([
                format_value(record.time, precision),
                format_value(record.energy_drift, precision),
                format_value(record.temperature_drift, precision),
            ])?;

            if let (Some(writer), Some(snapshot)) = (files.positions.as_mut(), &entry.snapshot) {
                writer.write_record(snapshot.flattened().map(|v| format_value(v, precision)))?;
            }
        }
        Ok(())
    }

    fn end_run(&mut self, summary: &RunSummary) -> Result<()> {
        for mut files in self.open.drain(..) {
            files.records.flush()?;
            if let Some(writer) = files.positions.as_mut() {
                writer.flush()?;
            }
            self.written.append(&mut files.paths);
        }
        info!(
            directory = %self.directory.display(),
            timestep_fs = %timestep_label(summary.timestep),
            "wrote drift tables"
        );
        Ok(())
    }
}

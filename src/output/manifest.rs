use super::timestep_label;
use crate::config::SimulationConfig;
use crate::error::Result;
use crate::simulation::RunReport;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Outcome of one timestep configuration, as recorded next to the tables
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ManifestRun {
    pub timestep_fs: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&RunReport> for ManifestRun {
    fn from(report: &RunReport) -> Self {
        match &report.outcome {
            Ok(summary) => Self {
                timestep_fs: timestep_label(report.timestep),
                ok: true,
                steps: Some(summary.steps),
                error: None,
            },
            Err(e) => Self {
                timestep_fs: timestep_label(report.timestep),
                ok: false,
                steps: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// `manifest.toml`: when and with what configuration a directory of tables
/// was produced
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Manifest {
    pub generated_at: String,
    pub version: String,
    pub config: SimulationConfig,
    pub runs: Vec<ManifestRun>,
}

impl Manifest {
    pub fn new(config: &SimulationConfig, reports: &[RunReport]) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            config: config.clone(),
            runs: reports.iter().map(ManifestRun::from).collect(),
        }
    }

    pub fn path_in(directory: impl AsRef<Path>) -> PathBuf {
        directory.as_ref().join("manifest.toml")
    }

    pub fn write(&self, directory: impl AsRef<Path>) -> Result<PathBuf> {
        let directory = directory.as_ref();
        std::fs::create_dir_all(directory)?;
        let path = Self::path_in(directory);
        std::fs::write(&path, toml::to_string_pretty(self)?)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::simulation::RunSummary;

    #[test]
    fn test_manifest_records_failures() {
        let reports = vec![
            RunReport {
                timestep: 20e-15,
                outcome: Err(Error::NonFinite {
                    integrator: "explicit_euler".to_string(),
                    time: 4e-13,
                    quantity: "energy",
                }),
            },
            RunReport {
                timestep: 0.5e-15,
                outcome: Ok(RunSummary {
                    timestep: 0.5e-15,
                    steps: 200_000,
                    integrators: Vec::new(),
                }),
            },
        ];
        let config = SimulationConfig::default();
        let manifest = Manifest::new(&config, &reports);

        assert_eq!(manifest.runs[0].timestep_fs, "20.0");
        assert!(!manifest.runs[0].ok);
        assert!(manifest.runs[0].error.as_deref().unwrap().contains("explicit_euler"));
        assert_eq!(manifest.runs[1].steps, Some(200_000));

        let dir = std::env::temp_dir().join(format!("ljdrift-manifest-{}", std::process::id()));
        let path = manifest.write(&dir).unwrap();
        let parsed: Manifest = toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, manifest);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}

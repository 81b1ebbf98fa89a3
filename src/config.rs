use crate::error::{Error, Result};
use crate::physics::constants::Constants;
use crate::physics::integrators::UpdateOrder;
use crate::physics::math::Scalar;
use crate::physics::particle::ParticleSystem;
use crate::physics::potential::LennardJones;
use crate::physics::units::{
    ARGON_EPSILON_OVER_KB, ARGON_MASS, BOLTZMANN, FEMTOSECOND, NANOMETER, NANOSECOND,
};
use crate::simulation::RunPlan;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub physics: PhysicsConfig,
    pub particles: ParticlesConfig,
    pub run: RunConfig,
    pub output: OutputConfig,
}

/// Particle mass and Lennard-Jones parameters
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// kg
    pub mass: Scalar,
    /// nm
    pub sigma_nm: Scalar,
    /// Well depth ε / k_B, in K
    pub epsilon_over_kb: Scalar,
    /// J/K
    pub boltzmann: Scalar,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            mass: ARGON_MASS,
            sigma_nm: 0.341,
            epsilon_over_kb: ARGON_EPSILON_OVER_KB,
            boltzmann: BOLTZMANN,
        }
    }
}

/// Initial state, one entry per particle
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ParticlesConfig {
    pub positions_nm: Vec<[Scalar; 2]>,
    pub velocities_nm_per_ns: Vec<[Scalar; 2]>,
}

impl Default for ParticlesConfig {
    fn default() -> Self {
        Self {
            positions_nm: vec![
                [0.0, 0.0],
                [0.02, 0.39],
                [0.34, 0.17],
                [0.36, -0.21],
                [-0.02, -0.4],
                [-0.35, -0.16],
                [-0.31, 0.21],
            ],
            velocities_nm_per_ns: vec![
                [-30.0, -20.0],
                [50.0, -90.0],
                [-70.0, -60.0],
                [90.0, 40.0],
                [80.0, 90.0],
                [-40.0, 100.0],
                [-80.0, -60.0],
            ],
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    pub end_time_ns: Scalar,
    pub timesteps_fs: Vec<Scalar>,
    pub integrators: Vec<String>,
    pub update_order: UpdateOrder,
    pub record_positions: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            end_time_ns: 0.1,
            timesteps_fs: vec![20.0, 10.0, 5.0, 1.0, 0.5],
            integrators: vec!["explicit_euler".to_string(), "velocity_verlet".to_string()],
            update_order: UpdateOrder::Snapshot,
            record_positions: true,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    /// Significant digits after the decimal point, in scientific notation.
    /// `None` writes the shortest representation that round-trips.
    pub precision: Option<usize>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("data"),
            precision: None,
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a file, falling back to defaults if the file doesn't exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!(
                        "Failed to parse config file {}: {}. Using defaults.",
                        path.display(),
                        e
                    );
                    Self::default()
                }
            },
            Err(_) => {
                info!("Config file {} not found. Using defaults.", path.display());
                Self::default()
            }
        }
    }

    /// Strict variant of [`load_or_default`](Self::load_or_default)
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Platform config file, e.g. `~/.config/ljdrift/config.toml` on Linux
    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "ljdrift")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Defaults, overlaid by the user config file (if any), overlaid by
    /// `LJDRIFT_<SECTION>__<KEY>` environment variables
    pub fn load_from_user_config() -> Self {
        match Self::layered(Self::user_config_path()) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load user configuration: {e}. Using defaults.");
                Self::default()
            }
        }
    }

    fn layered(path: Option<PathBuf>) -> Result<Self> {
        let defaults = toml::to_string(&Self::default())?;
        let mut builder = ::config::Config::builder().add_source(::config::File::from_str(
            &defaults,
            ::config::FileFormat::Toml,
        ));

        if let Some(path) = path {
            info!("Reading user configuration from {}", path.display());
            builder = builder.add_source(::config::File::from(path).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("LJDRIFT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check everything that can be checked before integration starts
    pub fn validate(&self) -> Result<()> {
        let particles = &self.particles;
        if particles.positions_nm.len() != particles.velocities_nm_per_ns.len() {
            return Err(Error::Config(format!(
                "{} positions but {} velocities",
                particles.positions_nm.len(),
                particles.velocities_nm_per_ns.len()
            )));
        }
        if particles.positions_nm.is_empty() {
            return Err(Error::Config("particle list is empty".to_string()));
        }
        let physics = [
            ("physics.mass", self.physics.mass),
            ("physics.sigma_nm", self.physics.sigma_nm),
            ("physics.epsilon_over_kb", self.physics.epsilon_over_kb),
            ("physics.boltzmann", self.physics.boltzmann),
        ];
        for (name, value) in physics {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::Config(format!("{name} must be positive, got {value}")));
            }
        }
        self.run_plan().validate()
    }

    /// Constants in SI units
    pub fn constants(&self) -> Constants {
        let physics = &self.physics;
        Constants::new(
            physics.mass,
            physics.boltzmann,
            LennardJones::new(
                physics.sigma_nm * NANOMETER,
                physics.epsilon_over_kb * physics.boltzmann,
            ),
        )
    }

    /// Canonical initial system in SI units
    pub fn initial_system(&self) -> Result<ParticleSystem> {
        ParticleSystem::from_input_units(
            &self.particles.positions_nm,
            &self.particles.velocities_nm_per_ns,
            self.physics.mass,
        )
    }

    /// Timing and integrator selection in SI units
    pub fn run_plan(&self) -> RunPlan {
        RunPlan {
            end_time: self.run.end_time_ns * NANOSECOND,
            timesteps: self
                .run
                .timesteps_fs
                .iter()
                .map(|h| h * FEMTOSECOND)
                .collect(),
            integrators: self.run.integrators.clone(),
            update_order: self.run.update_order,
            record_positions: self.run.record_positions,
        }
    }
}

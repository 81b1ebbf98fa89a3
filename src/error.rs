use thiserror::Error;

use crate::physics::math::Scalar;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring or running a drift study.
#[derive(Debug, Error)]
pub enum Error {
    /// Inconsistent or out-of-range configuration, detected before any integration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Integrator name the registry cannot resolve.
    #[error("unknown integrator: {0}")]
    UnknownIntegrator(String),

    /// A diagnostic or position became NaN/infinite, usually from coincident particles.
    #[error("non-finite {quantity} from {integrator} at t = {time:e} s")]
    NonFinite {
        integrator: String,
        time: Scalar,
        quantity: &'static str,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("failed to parse TOML: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("failed to serialize TOML: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("failed to layer configuration: {0}")]
    ConfigSource(#[from] ::config::ConfigError),
}

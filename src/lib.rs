//! ljdrift library
//!
//! Energy and temperature drift of a small 2D Lennard-Jones cluster under
//! explicit Euler and velocity Verlet, as a function of timestep size.
//! Exposed as a library to enable integration testing and benchmarks.

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod physics;
pub mod simulation;

pub use config::SimulationConfig;
pub use error::{Error, Result};
pub use simulation::{MemorySink, RecordSink, RunReport, Study};

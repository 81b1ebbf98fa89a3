//! Drives the integrator comparison and streams per-step records to a sink

pub mod record;
pub mod sink;
pub mod study;
pub mod trajectory;

pub use record::{PositionSnapshot, Sample, SampleEntry, TimestepRecord};
pub use sink::{MemorySink, RecordSink, RunDescriptor, RunOutput};
pub use study::{IntegratorSummary, RunPlan, RunReport, RunSummary, Study};
pub use trajectory::{Tracked, Trajectory};

//! File sinks for drift studies

pub mod csv_sink;
pub mod manifest;

pub use csv_sink::CsvSink;
pub use manifest::{Manifest, ManifestRun};

use crate::physics::math::Scalar;
use crate::physics::units::FEMTOSECOND;

/// Timestep in femtoseconds as it appears in file names, e.g. `20.0` or `0.5`
pub fn timestep_label(timestep: Scalar) -> String {
    let fs = (timestep / FEMTOSECOND * 1e6).round() / 1e6;
    format!("{fs:?}")
}

/// Shortest round-trip representation, or scientific notation with
/// `precision` digits after the decimal point
pub fn format_value(value: Scalar, precision: Option<usize>) -> String {
    match precision {
        Some(digits) => format!("{value:.digits$e}"),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestep_labels() {
        assert_eq!(timestep_label(20.0 * FEMTOSECOND), "20.0");
        assert_eq!(timestep_label(0.5 * FEMTOSECOND), "0.5");
        assert_eq!(timestep_label(1e-15), "1.0");
        assert_eq!(timestep_label(0.25e-15), "0.25");
    }

    #[test]
    fn test_value_formatting() {
        assert_eq!(format_value(0.5, None), "0.5");
        assert_eq!(format_value(-3.0, None), "-3");
        assert_eq!(format_value(1234.5, Some(2)), "1.23e3");
        assert_eq!(format_value(2.0e-14, Some(3)), "2.000e-14");
    }
}

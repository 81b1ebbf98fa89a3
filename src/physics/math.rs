/// Scalar type for physics calculations (f64 for precision)
pub type Scalar = f64;

/// 2D vector type for positions, momenta, and forces
pub type Vector = glam::DVec2;

/// Number of steps needed to cover `end_time` with steps of `timestep`.
///
/// Rounds up, except that ratios within a relative 1e-9 of an integer are
/// taken as that integer, so `0.1 ns / 20 fs` is 5000 steps rather than 5001.
pub fn step_count(end_time: Scalar, timestep: Scalar) -> usize {
    let ratio = end_time / timestep;
    let nearest = ratio.round();
    if (ratio - nearest).abs() <= 1e-9 * nearest.max(1.0) {
        nearest as usize
    } else {
        ratio.ceil() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::units::{FEMTOSECOND, NANOSECOND};

    #[test]
    fn test_step_count_exact_ratios() {
        let end_time = 0.1 * NANOSECOND;
        assert_eq!(step_count(end_time, 20.0 * FEMTOSECOND), 5_000);
        assert_eq!(step_count(end_time, 10.0 * FEMTOSECOND), 10_000);
        assert_eq!(step_count(end_time, 5.0 * FEMTOSECOND), 20_000);
        assert_eq!(step_count(end_time, 1.0 * FEMTOSECOND), 100_000);
        assert_eq!(step_count(end_time, 0.5 * FEMTOSECOND), 200_000);
    }

    #[test]
    fn test_step_count_rounds_up_partial_steps() {
        assert_eq!(step_count(1.0, 0.3), 4);
        assert_eq!(step_count(1.0, 2.0), 1);
    }
}

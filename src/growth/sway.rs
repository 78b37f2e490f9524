//! Side-to-side stem motion. Depends on the shell's clock, so it stays out of
//! the deterministic mapping in the parent module.

use super::sway_enabled;

pub const SWAY_AMPLITUDE: f64 = 10.0;

/// Horizontal offset of the stem's control point after `seconds` of animation.
pub fn sway_offset(health: f64, seconds: f64) -> f64 {
    if !sway_enabled(health) {
        return 0.0;
    }
    seconds.sin() * SWAY_AMPLITUDE
}

#[cfg(test)]
mod tests {
    use super::{sway_offset, SWAY_AMPLITUDE};

    #[test]
    fn still_below_threshold() {
        assert_eq!(sway_offset(69.0, 1.3), 0.0);
    }

    #[test]
    fn bounded_by_amplitude() {
        for tenth in 0..100 {
            let offset = sway_offset(90.0, tenth as f64 / 10.0);
            assert!(offset.abs() <= SWAY_AMPLITUDE);
        }
        assert!((sway_offset(90.0, std::f64::consts::FRAC_PI_2) - SWAY_AMPLITUDE).abs() < 1e-9);
    }
}

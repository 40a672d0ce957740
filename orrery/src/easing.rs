//! Easing curves for camera animations

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// Cubic deceleration
    EaseOut,
    /// Cubic acceleration then deceleration
    #[default]
    EaseInOut,
    /// Quadratic acceleration for the first half, cubic settle for the second
    Leap,
}

impl Easing {
    /// Map linear progress in [0, 1] to eased progress in [0, 1]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::Leap => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 4.0 * (1.0 - t).powi(3)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 4] = [Easing::Linear, Easing::EaseOut, Easing::EaseInOut, Easing::Leap];

    #[test]
    fn curves_start_at_zero_and_end_at_one() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?}");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12, "{easing:?}");
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for easing in ALL {
            let mut last = 0.0;
            for step in 1..=100 {
                let value = easing.apply(step as f64 / 100.0);
                assert!(value >= last, "{easing:?} decreased at step {step}");
                last = value;
            }
        }
    }

    #[test]
    fn leap_is_continuous_at_the_midpoint() {
        let below = Easing::Leap.apply(0.5 - 1e-9);
        let above = Easing::Leap.apply(0.5);
        assert!((below - above).abs() < 1e-6);
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        assert_eq!(Easing::EaseOut.apply(-3.0), 0.0);
        assert_eq!(Easing::EaseOut.apply(7.0), 1.0);
        assert_eq!(Easing::Linear.apply(f64::NAN), 1.0);
    }
}

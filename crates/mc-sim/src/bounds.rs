use serde::{Deserialize, Serialize};

use crate::SimRng;

/// Clamp `value` into `[min, max]`. NaN collapses to `min`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.max(min).min(max)
}

/// Inclusive clamp range for a numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Floor only; the field may grow without limit.
    pub const fn at_least(min: f64) -> Self {
        Self { min, max: f64::INFINITY }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        clamp(value, self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// A jitter rule: `clamp(old + (random() - bias) * scale, min, max)`.
///
/// `bias` below 0.5 skews the walk upwards, above 0.5 downwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drift {
    pub bias: f64,
    pub scale: f64,
    pub bounds: Bounds,
}

impl Drift {
    pub const fn new(bias: f64, scale: f64, bounds: Bounds) -> Self {
        Self { bias, scale, bounds }
    }

    pub fn apply(&self, value: f64, rng: &mut SimRng) -> f64 {
        self.bounds.clamp(value + rng.jitter(self.bias, self.scale))
    }

    /// Integer counters move by `floor((random() - bias) * scale)`.
    pub fn apply_count(&self, value: i64, rng: &mut SimRng) -> i64 {
        let delta = rng.jitter(self.bias, self.scale).floor();
        self.bounds.clamp(value as f64 + delta) as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_handles_nan_and_edges() {
        assert_eq!(clamp(f64::NAN, 1.0, 2.0), 1.0);
        assert_eq!(clamp(5.0, 1.0, 2.0), 2.0);
        assert_eq!(clamp(-5.0, 1.0, 2.0), 1.0);
        assert_eq!(clamp(1.5, 1.0, 2.0), 1.5);
    }

    #[test]
    fn at_least_has_no_ceiling() {
        let b = Bounds::at_least(0.0);
        assert_eq!(b.clamp(1e12), 1e12);
        assert_eq!(b.clamp(-3.0), 0.0);
    }

    #[test]
    fn count_drift_floors_delta() {
        // (0.0 - 0.6) * 3 = -1.8, floor => -2
        let drift = Drift::new(0.6, 3.0, Bounds::at_least(0.0));
        let mut rng = SimRng::scripted([0.0]);
        assert_eq!(drift.apply_count(15, &mut rng), 13);
    }
}

//! Agent intelligence metrics: cognitive load, queue depth, learning rate.

use std::time::Duration;

use mc_sim::{Bounds, Drift, SimRng};
use serde::{Deserialize, Serialize};

pub const INTERVAL: Duration = Duration::from_secs(2);

pub const COGNITIVE_LOAD: Drift = Drift::new(0.5, 2.0, Bounds::new(0.0, 100.0));
pub const TASK_QUEUE: Drift = Drift::new(0.6, 3.0, Bounds::at_least(0.0));
pub const LEARNING_RATE: Drift = Drift::new(0.4, 0.5, Bounds::new(0.0, 100.0));
pub const ERROR_RATE: Drift = Drift::new(0.7, 0.3, Bounds::new(0.0, 10.0));
pub const EFFICIENCY: Drift = Drift::new(0.3, 0.8, Bounds::new(0.0, 100.0));
pub const ADAPTABILITY: Drift = Drift::new(0.4, 0.6, Bounds::new(0.0, 100.0));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trends {
    pub cognitive_load: f64,
    pub efficiency: f64,
    pub learning_rate: f64,
    pub adaptability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentMetrics {
    pub cognitive_load: f64,
    pub task_queue: i64,
    pub learning_rate: f64,
    pub error_rate: f64,
    pub efficiency: f64,
    pub adaptability: f64,
    /// Week-over-week deltas; static in the simulation.
    pub trends: Trends,
}

pub fn seed() -> AgentMetrics {
    AgentMetrics {
        cognitive_load: 76.3,
        task_queue: 15,
        learning_rate: 78.5,
        error_rate: 2.1,
        efficiency: 94.2,
        adaptability: 88.9,
        trends: Trends {
            cognitive_load: -2.3,
            efficiency: 1.8,
            learning_rate: 5.7,
            adaptability: 3.2,
        },
    }
}

pub fn next(prev: &AgentMetrics, rng: &mut SimRng) -> AgentMetrics {
    AgentMetrics {
        cognitive_load: COGNITIVE_LOAD.apply(prev.cognitive_load, rng),
        task_queue: TASK_QUEUE.apply_count(prev.task_queue, rng),
        learning_rate: LEARNING_RATE.apply(prev.learning_rate, rng),
        error_rate: ERROR_RATE.apply(prev.error_rate, rng),
        efficiency: EFFICIENCY.apply(prev.efficiency, rng),
        adaptability: ADAPTABILITY.apply(prev.adaptability, rng),
        trends: prev.trends.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_stay_in_bounds() {
        let mut rng = SimRng::seeded(11);
        let mut m = seed();
        for _ in 0..2_000 {
            m = next(&m, &mut rng);
            assert!(COGNITIVE_LOAD.bounds.contains(m.cognitive_load));
            assert!(m.task_queue >= 0);
            assert!(LEARNING_RATE.bounds.contains(m.learning_rate));
            assert!(ERROR_RATE.bounds.contains(m.error_rate));
            assert!(EFFICIENCY.bounds.contains(m.efficiency));
            assert!(ADAPTABILITY.bounds.contains(m.adaptability));
        }
    }

    #[test]
    fn queue_drains_on_low_draws() {
        // floor((0 - 0.6) * 3) = -2 per tick
        let mut rng = SimRng::scripted([0.0]);
        let mut m = seed();
        for _ in 0..10 {
            m = next(&m, &mut rng);
        }
        assert_eq!(m.task_queue, 0);
    }
}

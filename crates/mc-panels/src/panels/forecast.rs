//! Performance forecasting: a rolling trend window, short-range predictions
//! and weighted outcome scenarios.

use std::time::Duration;

use mc_sim::{append_window, Bounds, Drift, SimRng};
use serde::{Deserialize, Serialize};

use crate::clock;

pub const INTERVAL: Duration = Duration::from_secs(6);
pub const TREND_WINDOW: usize = 7;
pub const NOW: &str = "Now";

pub const TREND_TASKS: Drift = Drift::new(0.4, 10.0, Bounds::new(30.0, 100.0));
pub const TREND_EFFICIENCY: Drift = Drift::new(0.3, 3.0, Bounds::new(80.0, 99.0));
pub const TREND_ERRORS: Drift = Drift::new(0.7, 2.0, Bounds::new(0.0, 8.0));
pub const TREND_LOAD: Drift = Drift::new(0.3, 8.0, Bounds::new(40.0, 95.0));
pub const NEXT_HOUR_TASKS: Drift = Drift::new(0.5, 10.0, Bounds::new(50.0, 120.0));
pub const ERROR_PROBABILITY: Drift = Drift::new(0.6, 0.5, Bounds::new(0.1, 5.0));
pub const RESOURCE_EFFICIENCY: Drift = Drift::new(0.4, 2.0, Bounds::new(85.0, 98.0));
pub const SCENARIO_PROBABILITY: Drift = Drift::new(0.5, 5.0, Bounds::new(1.0, 90.0));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub period: String,
    pub tasks: f64,
    pub efficiency: f64,
    pub errors: f64,
    pub load: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Horizon {
    pub label: String,
    pub headline: String,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predictions {
    pub next_hour_tasks: f64,
    pub peak_load_time: String,
    pub bottleneck_risk: String,
    pub error_probability: f64,
    pub optimization_opportunity: String,
    pub resource_efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub probability: f64,
    pub outcome: String,
    pub recommendation: String,
    pub efficiency: u32,
    pub capacity: u32,
    pub reliability: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub ticks: u64,
    pub horizons: Vec<Horizon>,
    /// Oldest first; the last point is always labelled [`NOW`].
    pub trend: Vec<TrendPoint>,
    pub predictions: Predictions,
    pub scenarios: Vec<Scenario>,
}

fn trend(period: &str, tasks: f64, efficiency: f64, errors: f64, load: f64) -> TrendPoint {
    TrendPoint {
        period: period.into(),
        tasks,
        efficiency,
        errors,
        load,
    }
}

fn horizon(label: &str, headline: &str, notes: &[&str]) -> Horizon {
    Horizon {
        label: label.into(),
        headline: headline.into(),
        notes: notes.iter().map(|n| n.to_string()).collect(),
    }
}

fn scenario(
    name: &str,
    probability: f64,
    outcome: &str,
    recommendation: &str,
    (efficiency, capacity, reliability): (u32, u32, u32),
) -> Scenario {
    Scenario {
        name: name.into(),
        probability,
        outcome: outcome.into(),
        recommendation: recommendation.into(),
        efficiency,
        capacity,
        reliability,
    }
}

pub fn seed() -> Forecast {
    Forecast {
        ticks: 0,
        horizons: vec![
            horizon(
                "Next 24h",
                "342 tasks, peaks at 09:00 14:00 18:00",
                &[
                    "Bottleneck: Content Strategist",
                    "Scale up GPU resources",
                    "Add backup agent for content tasks",
                ],
            ),
            horizon(
                "Next 7 days",
                "125% capacity needed, 18.5% growth",
                &[
                    "Memory usage trending to 95%",
                    "Token rate approaching limit",
                    "Implement task batching",
                    "Optimize learning algorithms",
                ],
            ),
            horizon(
                "Next 30 days",
                "Moderate scaling, 35% resource growth",
                &[
                    "Advanced pattern recognition",
                    "Multi-modal processing",
                    "Additional GPU cluster recommended",
                ],
            ),
        ],
        trend: vec![
            trend("6h ago", 45.0, 89.0, 3.0, 67.0),
            trend("5h ago", 52.0, 91.0, 2.0, 72.0),
            trend("4h ago", 48.0, 93.0, 1.0, 69.0),
            trend("3h ago", 61.0, 94.0, 2.0, 78.0),
            trend("2h ago", 58.0, 96.0, 1.0, 74.0),
            trend("1h ago", 67.0, 94.0, 2.0, 82.0),
            trend(NOW, 73.0, 95.0, 1.0, 85.0),
        ],
        predictions: Predictions {
            next_hour_tasks: 78.0,
            peak_load_time: "19:30".into(),
            bottleneck_risk: "Medium".into(),
            error_probability: 2.1,
            optimization_opportunity: "High".into(),
            resource_efficiency: 92.3,
        },
        scenarios: vec![
            scenario(
                "Current Trajectory",
                75.0,
                "Stable performance, minor capacity strain at peak hours",
                "Monitor closely, prepare scaling",
                (94, 85, 97),
            ),
            scenario(
                "High Load Scenario",
                20.0,
                "Task queue buildup, potential delays during peak",
                "Immediate scaling, load balancing optimization",
                (87, 95, 92),
            ),
            scenario(
                "Optimization Success",
                5.0,
                "Breakthrough in efficiency, reduced resource usage",
                "Document improvements, apply globally",
                (98, 70, 99),
            ),
        ],
    }
}

pub fn next(prev: &Forecast, rng: &mut SimRng) -> Forecast {
    let ticks = prev.ticks.saturating_add(1);

    let mut window = prev.trend.clone();
    let latest = match window.last_mut() {
        Some(last) => {
            // the outgoing "Now" point is re-stamped with its mission time
            last.period = clock::short_time(clock::at(prev.ticks, INTERVAL));
            last.clone()
        }
        None => trend(
            NOW,
            TREND_TASKS.bounds.min,
            TREND_EFFICIENCY.bounds.min,
            0.0,
            TREND_LOAD.bounds.min,
        ),
    };
    let point = TrendPoint {
        period: NOW.into(),
        tasks: TREND_TASKS.apply(latest.tasks, rng),
        efficiency: TREND_EFFICIENCY.apply(latest.efficiency, rng),
        errors: TREND_ERRORS.apply(latest.errors, rng),
        load: TREND_LOAD.apply(latest.load, rng),
    };

    let p = &prev.predictions;
    let predictions = Predictions {
        next_hour_tasks: NEXT_HOUR_TASKS.apply(p.next_hour_tasks, rng),
        error_probability: ERROR_PROBABILITY.apply(p.error_probability, rng),
        resource_efficiency: RESOURCE_EFFICIENCY.apply(p.resource_efficiency, rng),
        ..p.clone()
    };

    let scenarios = prev
        .scenarios
        .iter()
        .map(|s| Scenario {
            probability: SCENARIO_PROBABILITY.apply(s.probability, rng),
            ..s.clone()
        })
        .collect();

    Forecast {
        ticks,
        horizons: prev.horizons.clone(),
        trend: append_window(&window, point, TREND_WINDOW),
        predictions,
        scenarios,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_window_keeps_seven_points() {
        let mut rng = SimRng::seeded(4);
        let mut state = seed();
        for _ in 0..20 {
            state = next(&state, &mut rng);
            assert_eq!(state.trend.len(), TREND_WINDOW);
            assert_eq!(state.trend.last().map(|t| t.period.as_str()), Some(NOW));
        }
        assert_eq!(state.trend.iter().filter(|t| t.period == NOW).count(), 1);
    }

    #[test]
    fn new_point_drifts_from_latest() {
        // (0.4 - 0.4) * 10 = 0 for tasks
        let mut rng = SimRng::scripted([0.4, 0.3, 0.7, 0.3]);
        let state = next(&seed(), &mut rng);
        let now = &state.trend[TREND_WINDOW - 1];
        assert_eq!(now.tasks, 73.0);
        assert_eq!(now.efficiency, 95.0);
        assert_eq!(now.errors, 1.0);
        assert_eq!(now.load, 85.0);
        assert_eq!(state.trend[TREND_WINDOW - 2].period, "18:55");
    }
}

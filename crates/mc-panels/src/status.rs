//! Mission status header shown above every panel.

use std::time::Duration;

use mc_sim::{Bounds, Drift, SimRng};
use serde::{Deserialize, Serialize};

use crate::clock;

pub const INTERVAL: Duration = Duration::from_secs(30);
pub const SYSTEM_HEALTH: Drift = Drift::new(0.3, 1.5, Bounds::new(90.0, 99.0));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionStatus {
    pub ticks: u64,
    pub version: String,
    pub total_systems: u32,
    pub active_agents: u32,
    pub system_health: f64,
    pub uptime: String,
    pub last_update: String,
    pub mission_phase: String,
    pub content_processed: u32,
}

impl MissionStatus {
    pub fn seed() -> Self {
        Self {
            ticks: 0,
            version: "v4.2".into(),
            total_systems: 13,
            active_agents: 3,
            system_health: 96.8,
            uptime: "99.3%".into(),
            last_update: clock::clock_time(clock::mission_epoch()),
            mission_phase: "OPERATIONAL".into(),
            content_processed: crate::panels::pipeline::DEFAULT_TOTAL_VIDEOS,
        }
    }

    pub fn with_content(mut self, processed: u32) -> Self {
        self.content_processed = processed;
        self
    }

    pub fn next(&self, rng: &mut SimRng) -> Self {
        let ticks = self.ticks.saturating_add(1);
        Self {
            ticks,
            system_health: SYSTEM_HEALTH.apply(self.system_health, rng),
            last_update: clock::clock_time(clock::at(ticks, INTERVAL)),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_clamps_to_ceiling() {
        let mut rng = SimRng::scripted([1.0]);
        let mut s = MissionStatus::seed();
        for _ in 0..5 {
            s = s.next(&mut rng);
        }
        assert_eq!(s.system_health, 99.0);
        assert_eq!(s.last_update, "18:57:30");
    }
}

//! Resource allocation: usage and efficiency per resource class, per-agent
//! allocations and a short rolling history.

use std::time::Duration;

use mc_sim::{append_window, Bounds, Drift, SimRng};
use serde::{Deserialize, Serialize};

use crate::clock;
use crate::types::Priority;

pub const INTERVAL: Duration = Duration::from_secs(3);
pub const HISTORY_WINDOW: usize = 6;

pub const CPU_USAGE: Drift = Drift::new(0.5, 8.0, Bounds::new(20.0, 95.0));
pub const CPU_EFFICIENCY: Drift = Drift::new(0.4, 2.0, Bounds::new(80.0, 99.0));
pub const MEMORY_USAGE: Drift = Drift::new(0.5, 6.0, Bounds::new(30.0, 90.0));
pub const MEMORY_EFFICIENCY: Drift = Drift::new(0.4, 2.0, Bounds::new(75.0, 95.0));
pub const GPU_USAGE: Drift = Drift::new(0.5, 10.0, Bounds::new(10.0, 80.0));
pub const GPU_EFFICIENCY: Drift = Drift::new(0.4, 1.0, Bounds::new(90.0, 99.0));
pub const STORAGE_USAGE: Drift = Drift::new(0.5, 2.0, Bounds::new(70.0, 95.0));
pub const STORAGE_EFFICIENCY: Drift = Drift::new(0.4, 1.0, Bounds::new(85.0, 98.0));
pub const NETWORK_USAGE: Drift = Drift::new(0.5, 8.0, Bounds::new(10.0, 60.0));
pub const NETWORK_LATENCY: Drift = Drift::new(0.5, 10.0, Bounds::new(20.0, 80.0));
pub const NETWORK_EFFICIENCY: Drift = Drift::new(0.4, 1.0, Bounds::new(90.0, 99.0));
pub const TOKEN_RATE: Drift = Drift::new(0.5, 100.0, Bounds::new(200.0, 800.0));
pub const TOKEN_EFFICIENCY: Drift = Drift::new(0.4, 3.0, Bounds::new(75.0, 95.0));

/// Upper bound on tokens consumed per tick.
pub const TOKEN_BURST: f64 = 1_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capacity {
    pub usage: f64,
    pub allocated: f64,
    pub available: f64,
    pub efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkResource {
    pub usage: f64,
    pub bandwidth: u32,
    pub latency: f64,
    pub efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenBudget {
    pub used: u64,
    pub limit: u64,
    pub rate: f64,
    pub efficiency: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentActivity {
    Active,
    Standby,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub agent: String,
    pub cpu: u32,
    pub memory: u32,
    pub gpu: u32,
    pub priority: Priority,
    pub status: AgentActivity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub time: String,
    pub cpu: i64,
    pub memory: i64,
    pub gpu: i64,
    /// Millions of tokens, one decimal.
    pub tokens: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    pub ticks: u64,
    pub cpu: Capacity,
    pub memory: Capacity,
    pub gpu: Capacity,
    pub storage: Capacity,
    pub network: NetworkResource,
    pub tokens: TokenBudget,
    pub allocations: Vec<Allocation>,
    /// Oldest first.
    pub history: Vec<HistoryPoint>,
}

fn capacity(usage: f64, allocated: f64, available: f64, efficiency: f64) -> Capacity {
    Capacity {
        usage,
        allocated,
        available,
        efficiency,
    }
}

fn allocation(
    agent: &str,
    (cpu, memory, gpu): (u32, u32, u32),
    priority: Priority,
    status: AgentActivity,
) -> Allocation {
    Allocation {
        agent: agent.to_string(),
        cpu,
        memory,
        gpu,
        priority,
        status,
    }
}

fn point(time: &str, cpu: i64, memory: i64, gpu: i64, tokens: f64) -> HistoryPoint {
    HistoryPoint {
        time: time.to_string(),
        cpu,
        memory,
        gpu,
        tokens,
    }
}

pub fn seed() -> Resources {
    use AgentActivity::*;
    Resources {
        ticks: 0,
        cpu: capacity(67.3, 8.0, 16.0, 94.2),
        memory: capacity(78.9, 6.3, 8.0, 87.1),
        gpu: capacity(45.2, 1.0, 1.0, 98.5),
        storage: capacity(82.1, 189.0, 230.0, 91.7),
        network: NetworkResource {
            usage: 34.6,
            bandwidth: 1_000,
            latency: 42.0,
            efficiency: 96.8,
        },
        tokens: TokenBudget {
            used: 2_847_291,
            limit: 5_000_000,
            rate: 450.0,
            efficiency: 89.3,
        },
        allocations: vec![
            allocation("Content Strategist", (25, 32, 65), Priority::High, Active),
            allocation("Infrastructure Manager", (15, 28, 20), Priority::Medium, Active),
            allocation("Research Assistant", (35, 25, 10), Priority::Medium, Active),
            allocation("Quality Assurance", (20, 10, 5), Priority::Low, Active),
            allocation("Communication Agent", (5, 5, 0), Priority::Low, Standby),
        ],
        history: vec![
            point("18:45", 62, 74, 41, 2.1),
            point("18:46", 64, 76, 43, 2.3),
            point("18:47", 66, 77, 44, 2.6),
            point("18:48", 67, 79, 45, 2.8),
            point("18:49", 68, 80, 46, 3.1),
            point("18:50", 67, 79, 45, 2.9),
        ],
    }
}

fn drift_capacity(c: &Capacity, usage: Drift, efficiency: Drift, rng: &mut SimRng) -> Capacity {
    Capacity {
        usage: usage.apply(c.usage, rng),
        efficiency: efficiency.apply(c.efficiency, rng),
        ..c.clone()
    }
}

pub fn next(prev: &Resources, rng: &mut SimRng) -> Resources {
    let ticks = prev.ticks.saturating_add(1);
    let cpu = drift_capacity(&prev.cpu, CPU_USAGE, CPU_EFFICIENCY, rng);
    let memory = drift_capacity(&prev.memory, MEMORY_USAGE, MEMORY_EFFICIENCY, rng);
    let gpu = drift_capacity(&prev.gpu, GPU_USAGE, GPU_EFFICIENCY, rng);
    let storage = drift_capacity(&prev.storage, STORAGE_USAGE, STORAGE_EFFICIENCY, rng);
    let network = NetworkResource {
        usage: NETWORK_USAGE.apply(prev.network.usage, rng),
        latency: NETWORK_LATENCY.apply(prev.network.latency, rng),
        efficiency: NETWORK_EFFICIENCY.apply(prev.network.efficiency, rng),
        ..prev.network.clone()
    };
    let burst = (rng.unit() * TOKEN_BURST).floor() as u64;
    let tokens = TokenBudget {
        used: prev.tokens.used.saturating_add(burst).min(prev.tokens.limit),
        rate: TOKEN_RATE.apply(prev.tokens.rate, rng),
        efficiency: TOKEN_EFFICIENCY.apply(prev.tokens.efficiency, rng),
        ..prev.tokens.clone()
    };

    let sample = point(
        &clock::short_time(clock::at(ticks, INTERVAL)),
        cpu.usage.round() as i64,
        memory.usage.round() as i64,
        gpu.usage.round() as i64,
        (tokens.used as f64 / 1_000_000.0 * 10.0).round() / 10.0,
    );

    Resources {
        ticks,
        history: append_window(&prev.history, sample, HISTORY_WINDOW),
        cpu,
        memory,
        gpu,
        storage,
        network,
        tokens,
        allocations: prev.allocations.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_never_exceed_limit() {
        let mut state = seed();
        state.tokens.used = state.tokens.limit - 10;
        let mut rng = SimRng::scripted([0.99]);
        let state = next(&state, &mut rng);
        assert_eq!(state.tokens.used, state.tokens.limit);
    }

    #[test]
    fn history_window_slides() {
        let mut rng = SimRng::seeded(8);
        let state = next(&seed(), &mut rng);
        assert_eq!(state.history.len(), HISTORY_WINDOW);
        assert_eq!(state.history[0].time, "18:46");
        assert_eq!(state.history[HISTORY_WINDOW - 1].time, "18:55");
        assert_eq!(state.history[HISTORY_WINDOW - 1].cpu, state.cpu.usage.round() as i64);
    }
}

//! Agent collaboration network.

use std::time::Duration;

use mc_sim::{Bounds, Drift, SimRng};
use serde::{Deserialize, Serialize};

use crate::types::Priority;

pub const INTERVAL: Duration = Duration::from_secs(4);

pub const NODE_WORKLOAD: Drift = Drift::new(0.5, 8.0, Bounds::new(10.0, 95.0));
pub const NODE_EFFICIENCY: Drift = Drift::new(0.3, 2.0, Bounds::new(85.0, 99.0));
pub const NETWORK_EFFICIENCY: Drift = Drift::new(0.4, 1.5, Bounds::new(90.0, 99.0));
pub const COLLABORATION: Drift = Drift::new(0.3, 2.0, Bounds::new(80.0, 95.0));
pub const LATENCY: Drift = Drift::new(0.5, 0.5, Bounds::new(0.5, 5.0));
pub const LOAD: Drift = Drift::new(0.4, 5.0, Bounds::new(40.0, 80.0));
pub const FLOW_VOLUME: Drift = Drift::new(0.3, 20.0, Bounds::at_least(0.0));
pub const FLOW_LATENCY: Drift = Drift::new(0.5, 0.3, Bounds::new(0.1, 5.0));

pub const TASK_STEP: f64 = 5.0;
pub const THROUGHPUT_BURST: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    Active,
    Standby,
    Ready,
    Monitoring,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub role: String,
    pub status: NodeStatus,
    pub connections: Vec<String>,
    pub workload: f64,
    pub efficiency: f64,
    pub position: (u8, u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollaborationStatus {
    InProgress,
    Active,
    Scheduled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollaborationTask {
    pub id: String,
    pub name: String,
    pub participants: Vec<String>,
    pub status: CollaborationStatus,
    pub progress: f64,
    pub priority: Priority,
    pub start_time: String,
    pub estimated_completion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkMetrics {
    pub total_nodes: u32,
    pub active_connections: u32,
    pub network_efficiency: f64,
    pub collaboration_score: f64,
    pub task_throughput: u64,
    pub average_latency: f64,
    pub network_load: f64,
    pub autonomy_level: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    pub from: String,
    pub to: String,
    pub kind: String,
    pub volume: i64,
    pub latency: f64,
    pub status: String,
    pub data_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergentBehavior {
    pub pattern: String,
    pub description: String,
    pub instances: u32,
    pub efficiency_gain: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub nodes: Vec<Node>,
    pub tasks: Vec<CollaborationTask>,
    pub metrics: NetworkMetrics,
    pub flows: Vec<Flow>,
    pub behaviors: Vec<EmergentBehavior>,
}

fn ids(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn node(
    id: &str,
    name: &str,
    role: &str,
    status: NodeStatus,
    connections: &[&str],
    (workload, efficiency): (f64, f64),
    position: (u8, u8),
) -> Node {
    Node {
        id: id.into(),
        name: name.into(),
        role: role.into(),
        status,
        connections: ids(connections),
        workload,
        efficiency,
        position,
    }
}

fn collab_task(
    id: &str,
    name: &str,
    participants: &[&str],
    (status, progress): (CollaborationStatus, f64),
    priority: Priority,
    (start_time, estimated_completion): (&str, &str),
) -> CollaborationTask {
    CollaborationTask {
        id: id.into(),
        name: name.into(),
        participants: ids(participants),
        status,
        progress,
        priority,
        start_time: start_time.into(),
        estimated_completion: estimated_completion.into(),
    }
}

fn flow(
    from: &str,
    to: &str,
    kind: &str,
    volume: i64,
    latency: f64,
    status: &str,
    data_type: &str,
) -> Flow {
    Flow {
        from: from.into(),
        to: to.into(),
        kind: kind.into(),
        volume,
        latency,
        status: status.into(),
        data_type: data_type.into(),
    }
}

fn behavior(
    pattern: &str,
    description: &str,
    instances: u32,
    efficiency_gain: f64,
) -> EmergentBehavior {
    EmergentBehavior {
        pattern: pattern.into(),
        description: description.into(),
        instances,
        efficiency_gain,
    }
}

pub fn seed() -> Network {
    use NodeStatus::*;
    Network {
        nodes: vec![
            node(
                "CORE_001",
                "Mission Control Core",
                "orchestrator",
                Active,
                &["PROS_001", "OUT_002", "CONT_003", "SCAL_004"],
                (85.3, 98.7),
                (50, 50),
            ),
            node(
                "PROS_001",
                "Prospect Research Agent",
                "intelligence",
                Active,
                &["CORE_001", "OUT_002", "ANAL_007"],
                (67.2, 94.8),
                (20, 20),
            ),
            node(
                "OUT_002",
                "Outreach Agent",
                "communication",
                Active,
                &["CORE_001", "PROS_001", "FOL_004"],
                (72.1, 96.3),
                (80, 20),
            ),
            node(
                "CONT_003",
                "Content Pipeline Agent",
                "processing",
                Active,
                &["CORE_001", "QC_006"],
                (58.4, 97.1),
                (20, 80),
            ),
            node(
                "SCAL_004",
                "Auto-Scaling Agent",
                "optimization",
                Active,
                &["CORE_001", "ANAL_007"],
                (43.7, 95.9),
                (80, 80),
            ),
            node(
                "FOL_004",
                "Follow-up Agent",
                "automation",
                Standby,
                &["OUT_002", "PAY_005"],
                (23.1, 92.4),
                (90, 40),
            ),
            node(
                "PAY_005",
                "Payment Agent",
                "transaction",
                Ready,
                &["FOL_004", "QC_006"],
                (12.8, 99.2),
                (70, 60),
            ),
            node(
                "QC_006",
                "Quality Control Agent",
                "validation",
                Monitoring,
                &["CONT_003", "PAY_005", "ANAL_007"],
                (34.9, 97.8),
                (40, 70),
            ),
            node(
                "ANAL_007",
                "Analytics Agent",
                "intelligence",
                Active,
                &["PROS_001", "SCAL_004", "QC_006"],
                (79.3, 95.6),
                (60, 30),
            ),
        ],
        tasks: vec![
            collab_task(
                "TASK_001",
                "Instagram Content Processing",
                &["CONT_003", "PROS_001", "QC_006"],
                (CollaborationStatus::InProgress, 73.0),
                Priority::High,
                ("2026-02-26T20:45:00Z", "2026-02-26T23:30:00Z"),
            ),
            collab_task(
                "TASK_002",
                "Lead Qualification Pipeline",
                &["PROS_001", "OUT_002", "ANAL_007"],
                (CollaborationStatus::Active, 45.0),
                Priority::Medium,
                ("2026-02-26T19:15:00Z", "2026-02-27T02:00:00Z"),
            ),
            collab_task(
                "TASK_003",
                "Performance Optimization Cycle",
                &["ANAL_007", "SCAL_004", "CORE_001"],
                (CollaborationStatus::Scheduled, 0.0),
                Priority::Low,
                ("2026-02-27T00:00:00Z", "2026-02-27T06:00:00Z"),
            ),
        ],
        metrics: NetworkMetrics {
            total_nodes: 9,
            active_connections: 24,
            network_efficiency: 96.3,
            collaboration_score: 87.4,
            task_throughput: 156,
            average_latency: 2.3,
            network_load: 58.7,
            autonomy_level: 94.8,
        },
        flows: vec![
            flow(
                "PROS_001",
                "OUT_002",
                "data_transfer",
                247,
                1.2,
                "active",
                "prospect_intelligence",
            ),
            flow("OUT_002", "FOL_004", "task_handoff", 89, 0.8, "active", "follow_up_sequences"),
            flow("CONT_003", "QC_006", "quality_check", 34, 3.1, "processing", "content_analysis"),
            flow(
                "ANAL_007",
                "SCAL_004",
                "optimization_signal",
                156,
                0.5,
                "active",
                "performance_metrics",
            ),
        ],
        behaviors: vec![
            behavior(
                "Cross-Agent Learning",
                "Agents sharing successful strategies automatically",
                47,
                12.3,
            ),
            behavior(
                "Predictive Task Allocation",
                "System predicting workload and pre-allocating resources",
                23,
                8.7,
            ),
            behavior(
                "Autonomous Error Recovery",
                "Network self-healing when individual agents fail",
                3,
                15.2,
            ),
        ],
    }
}

pub fn next(prev: &Network, rng: &mut SimRng) -> Network {
    let nodes = prev
        .nodes
        .iter()
        .map(|n| Node {
            workload: NODE_WORKLOAD.apply(n.workload, rng),
            efficiency: NODE_EFFICIENCY.apply(n.efficiency, rng),
            ..n.clone()
        })
        .collect();

    let m = &prev.metrics;
    let metrics = NetworkMetrics {
        network_efficiency: NETWORK_EFFICIENCY.apply(m.network_efficiency, rng),
        collaboration_score: COLLABORATION.apply(m.collaboration_score, rng),
        task_throughput: m.task_throughput + (rng.unit() * THROUGHPUT_BURST).floor() as u64,
        average_latency: LATENCY.apply(m.average_latency, rng),
        network_load: LOAD.apply(m.network_load, rng),
        ..m.clone()
    };

    let tasks = prev
        .tasks
        .iter()
        .map(|t| match t.status {
            CollaborationStatus::InProgress => CollaborationTask {
                progress: (t.progress + rng.unit() * TASK_STEP).min(100.0),
                ..t.clone()
            },
            _ => t.clone(),
        })
        .collect();

    let flows = prev
        .flows
        .iter()
        .map(|f| Flow {
            volume: FLOW_VOLUME.apply_count(f.volume, rng),
            latency: FLOW_LATENCY.apply(f.latency, rng),
            ..f.clone()
        })
        .collect();

    Network {
        nodes,
        tasks,
        metrics,
        flows,
        behaviors: prev.behaviors.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_in_progress_tasks_move() {
        let mut rng = SimRng::scripted([1.0]);
        let state = next(&seed(), &mut rng);
        assert_eq!(state.tasks[0].progress, 78.0);
        assert_eq!(state.tasks[1].progress, 45.0);
        assert_eq!(state.tasks[2].progress, 0.0);
    }

    #[test]
    fn nodes_stay_in_bounds() {
        let mut rng = SimRng::seeded(21);
        let mut state = seed();
        for _ in 0..500 {
            state = next(&state, &mut rng);
        }
        for n in &state.nodes {
            assert!(NODE_WORKLOAD.bounds.contains(n.workload));
            assert!(NODE_EFFICIENCY.bounds.contains(n.efficiency));
        }
        assert!(state.flows.iter().all(|f| f.volume >= 0));
        assert!(state.tasks[0].progress <= 100.0);
    }
}

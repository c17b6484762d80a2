//! Task routing: the routed task queue, routing rules and agent workload.

use std::time::Duration;

use mc_sim::{Bounds, Drift, SimRng};
use serde::{Deserialize, Serialize};

use crate::types::Priority;

pub const INTERVAL: Duration = Duration::from_secs(4);

/// Largest progress gain per tick for a processing task.
pub const PROGRESS_STEP: f64 = 5.0;
pub const START_CHANCE: f64 = 0.3;
pub const START_PROGRESS: f64 = 5.0;

pub const ROUTING_ACCURACY: Drift = Drift::new(0.5, 2.0, Bounds::new(85.0, 99.0));
pub const LOAD_BALANCE: Drift = Drift::new(0.5, 3.0, Bounds::new(70.0, 95.0));
pub const THROUGHPUT: Drift = Drift::new(0.5, 4.0, Bounds::new(15.0, 35.0));
pub const WORKLOAD_CAPACITY: Drift = Drift::new(0.5, 8.0, Bounds::new(0.0, 100.0));
pub const WORKLOAD_EFFICIENCY: Drift = Drift::new(0.5, 1.0, Bounds::new(75.0, 99.0));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Queued,
    Processing,
    Completed,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Queued => "queued",
            Self::Processing => "processing",
            Self::Completed => "completed",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutedTask {
    pub id: String,
    pub kind: String,
    pub priority: Priority,
    /// 1..=10
    pub complexity: u8,
    pub estimated_time: String,
    pub assigned_agent: String,
    pub status: TaskStatus,
    pub progress: f64,
    pub submitted_at: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingRule {
    pub condition: String,
    pub agent: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workload {
    pub agent: String,
    pub active: u32,
    pub queued: u32,
    pub capacity: f64,
    pub efficiency: f64,
    pub specialties: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingStats {
    pub total_tasks: u64,
    pub average_wait_time: String,
    pub routing_accuracy: f64,
    pub load_balance_score: f64,
    pub task_throughput: f64,
    pub bottleneck_agent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Routing {
    pub tasks: Vec<RoutedTask>,
    pub rules: Vec<RoutingRule>,
    pub workload: Vec<Workload>,
    pub stats: RoutingStats,
}

impl Routing {
    pub fn count(&self, status: TaskStatus) -> usize {
        self.tasks.iter().filter(|t| t.status == status).count()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn task(
    id: &str,
    kind: &str,
    priority: Priority,
    complexity: u8,
    estimated_time: &str,
    assigned_agent: &str,
    status: TaskStatus,
    progress: f64,
    submitted_at: &str,
    tags: &[&str],
) -> RoutedTask {
    RoutedTask {
        id: id.to_string(),
        kind: kind.to_string(),
        priority,
        complexity,
        estimated_time: estimated_time.to_string(),
        assigned_agent: assigned_agent.to_string(),
        status,
        progress,
        submitted_at: submitted_at.to_string(),
        tags: strings(tags),
    }
}

fn rule(condition: &str, agent: &str, weight: f64) -> RoutingRule {
    RoutingRule {
        condition: condition.to_string(),
        agent: agent.to_string(),
        weight,
    }
}

fn workload(
    agent: &str,
    (active, queued): (u32, u32),
    capacity: f64,
    efficiency: f64,
    specialties: &[&str],
) -> Workload {
    Workload {
        agent: agent.to_string(),
        active,
        queued,
        capacity,
        efficiency,
        specialties: strings(specialties),
    }
}

pub fn seed() -> Routing {
    use TaskStatus::*;
    Routing {
        tasks: vec![
            task(
                "T001",
                "instagram_analysis",
                Priority::High,
                7,
                "2m 15s",
                "Content Strategist",
                Processing,
                67.0,
                "18:52:34",
                &["video", "transcription", "analysis"],
            ),
            task(
                "T002",
                "system_optimization",
                Priority::Medium,
                5,
                "4m 30s",
                "Infrastructure Manager",
                Queued,
                0.0,
                "18:54:12",
                &["performance", "optimization", "monitoring"],
            ),
            task(
                "T003",
                "research_synthesis",
                Priority::Medium,
                8,
                "6m 45s",
                "Research Assistant",
                Queued,
                0.0,
                "18:54:45",
                &["ai-agents", "research", "documentation"],
            ),
            task(
                "T004",
                "quality_validation",
                Priority::Low,
                3,
                "1m 20s",
                "Quality Assurance",
                Completed,
                100.0,
                "18:51:18",
                &["validation", "testing", "quality"],
            ),
            task(
                "T005",
                "communication_routing",
                Priority::Low,
                2,
                "45s",
                "Communication Agent",
                Pending,
                0.0,
                "18:55:01",
                &["communication", "routing", "coordination"],
            ),
        ],
        rules: vec![
            rule(r#"type == "instagram_analysis""#, "Content Strategist", 0.9),
            rule(r#"priority == "high""#, "Best Available", 0.8),
            rule("complexity >= 7", "Research Assistant", 0.7),
            rule(r#"tags.includes("optimization")"#, "Infrastructure Manager", 0.9),
            rule(r#"estimatedTime < "2m""#, "Quality Assurance", 0.6),
        ],
        workload: vec![
            workload("Content Strategist", (2, 1), 85.0, 94.2, &["content", "analysis"]),
            workload("Infrastructure Manager", (1, 2), 60.0, 98.7, &["systems", "optimization"]),
            workload("Research Assistant", (0, 1), 45.0, 87.3, &["research", "synthesis"]),
            workload("Quality Assurance", (0, 0), 20.0, 96.8, &["validation", "testing"]),
            workload("Communication Agent", (0, 1), 15.0, 92.1, &["routing", "coordination"]),
        ],
        stats: RoutingStats {
            total_tasks: 1_247,
            average_wait_time: "2m 34s".into(),
            routing_accuracy: 94.7,
            load_balance_score: 88.3,
            task_throughput: 23.0,
            bottleneck_agent: None,
        },
    }
}

/// Lifecycle step for one task: processing advances and completes at 100,
/// queued may start, anything else is left alone.
pub fn advance_task(task: &RoutedTask, rng: &mut SimRng) -> RoutedTask {
    match task.status {
        TaskStatus::Processing => {
            let progress = (task.progress + rng.unit() * PROGRESS_STEP).min(100.0);
            let status = if progress >= 100.0 {
                TaskStatus::Completed
            } else {
                TaskStatus::Processing
            };
            RoutedTask {
                progress,
                status,
                ..task.clone()
            }
        }
        TaskStatus::Queued if rng.chance(START_CHANCE) => RoutedTask {
            status: TaskStatus::Processing,
            progress: START_PROGRESS,
            ..task.clone()
        },
        _ => task.clone(),
    }
}

pub fn next(prev: &Routing, rng: &mut SimRng) -> Routing {
    let tasks = prev.tasks.iter().map(|t| advance_task(t, rng)).collect();
    let stats = RoutingStats {
        total_tasks: prev.stats.total_tasks + (rng.unit() * 3.0).floor() as u64,
        routing_accuracy: ROUTING_ACCURACY.apply(prev.stats.routing_accuracy, rng),
        load_balance_score: LOAD_BALANCE.apply(prev.stats.load_balance_score, rng),
        task_throughput: THROUGHPUT.apply(prev.stats.task_throughput, rng),
        ..prev.stats.clone()
    };
    let workload = prev
        .workload
        .iter()
        .map(|w| Workload {
            capacity: WORKLOAD_CAPACITY.apply(w.capacity, rng),
            efficiency: WORKLOAD_EFFICIENCY.apply(w.efficiency, rng),
            ..w.clone()
        })
        .collect();

    Routing {
        tasks,
        rules: prev.rules.clone(),
        workload,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn processing_task_completes_at_hundred() {
        let mut t = seed().tasks[0].clone();
        t.progress = 98.0;
        let mut rng = SimRng::scripted([0.9]);
        let done = advance_task(&t, &mut rng);
        assert_eq!(done.progress, 100.0);
        assert_eq!(done.status, TaskStatus::Completed);
    }

    #[test]
    fn queued_task_starts_on_low_draw() {
        let t = seed().tasks[1].clone();
        let started = advance_task(&t, &mut SimRng::scripted([0.1]));
        assert_eq!(started.status, TaskStatus::Processing);
        assert_eq!(started.progress, START_PROGRESS);

        let waiting = advance_task(&t, &mut SimRng::scripted([0.5]));
        assert_eq!(waiting, t);
    }

    #[test]
    fn completed_and_pending_are_terminal_for_the_rule() {
        let s = seed();
        let mut rng = SimRng::seeded(1);
        assert_eq!(advance_task(&s.tasks[3], &mut rng), s.tasks[3]);
        assert_eq!(advance_task(&s.tasks[4], &mut rng), s.tasks[4]);
        assert_eq!(rng.draws(), 0);
    }
}

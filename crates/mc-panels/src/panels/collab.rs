//! Collaborative intelligence: working sessions, decisions and synthesized
//! knowledge.

use std::time::Duration;

use mc_sim::{BoundedLog, Bounds, Drift, SimRng};
use serde::{Deserialize, Serialize};

use crate::clock;
use crate::types::Impact;

pub const INTERVAL: Duration = Duration::from_secs(9);
pub const DECISION_CAPACITY: usize = 3;
pub const NEW_DECISION_CHANCE: f64 = 0.08;
pub const SESSION_STEP: f64 = 5.0;
pub const INSIGHT_ABOVE: f64 = 0.7;

pub const SESSION_CONSENSUS: Drift = Drift::new(0.3, 3.0, Bounds::new(70.0, 98.0));
pub const AVERAGE_CONSENSUS: Drift = Drift::new(0.4, 2.0, Bounds::new(80.0, 95.0));
pub const SUCCESS_RATE: Drift = Drift::new(0.3, 1.0, Bounds::new(90.0, 99.0));
pub const INNOVATION: Drift = Drift::new(0.4, 2.0, Bounds::new(70.0, 85.0));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Active,
    Completed,
    Planning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Implementation {
    Approved,
    InProgress,
    Pending,
}

impl Implementation {
    pub const ALL: [Implementation; 3] = [
        Implementation::Approved,
        Implementation::InProgress,
        Implementation::Pending,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub title: String,
    pub participants: Vec<String>,
    pub status: SessionStatus,
    pub progress: f64,
    pub start_time: String,
    pub objective: String,
    pub current_phase: String,
    pub insights: u32,
    pub decisions: u32,
    pub consensus_level: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub session_id: String,
    pub decision: String,
    pub timestamp: String,
    pub participants: u32,
    pub consensus_level: f64,
    pub implementation: Implementation,
    pub outcome: String,
    pub impact: Impact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Synthesis {
    pub concept: String,
    pub contributors: Vec<String>,
    pub sources: Vec<String>,
    pub confidence: f64,
    pub applications: Vec<String>,
    pub novelty: f64,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollabMetrics {
    pub total_sessions: u32,
    pub active_now: u32,
    pub average_consensus: f64,
    pub success_rate: f64,
    pub avg_session_time: String,
    pub innovation_index: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collab {
    pub ticks: u64,
    pub sessions: Vec<Session>,
    pub metrics: CollabMetrics,
    pub decisions: BoundedLog<Decision>,
    pub synthesis: Vec<Synthesis>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn session(
    id: &str,
    title: &str,
    participants: &[&str],
    status: SessionStatus,
    progress: f64,
    start_time: &str,
    objective: &str,
    current_phase: &str,
    (insights, decisions): (u32, u32),
    consensus_level: f64,
) -> Session {
    Session {
        id: id.into(),
        title: title.into(),
        participants: owned(participants),
        status,
        progress,
        start_time: start_time.into(),
        objective: objective.into(),
        current_phase: current_phase.into(),
        insights,
        decisions,
        consensus_level,
    }
}

#[allow(clippy::too_many_arguments)]
fn decision(
    session_id: &str,
    text: &str,
    timestamp: &str,
    participants: u32,
    consensus_level: f64,
    implementation: Implementation,
    outcome: &str,
    impact: Impact,
) -> Decision {
    Decision {
        session_id: session_id.into(),
        decision: text.into(),
        timestamp: timestamp.into(),
        participants,
        consensus_level,
        implementation,
        outcome: outcome.into(),
        impact,
    }
}

fn synthesis(
    concept: &str,
    contributors: &[&str],
    sources: &[&str],
    confidence: f64,
    applications: &[&str],
    novelty: f64,
    impact: &str,
) -> Synthesis {
    Synthesis {
        concept: concept.into(),
        contributors: owned(contributors),
        sources: owned(sources),
        confidence,
        applications: owned(applications),
        novelty,
        impact: impact.into(),
    }
}

pub fn seed() -> Collab {
    use SessionStatus::*;
    Collab {
        ticks: 0,
        sessions: vec![
            session(
                "CS001",
                "Instagram Analysis Optimization",
                &["Content Strategist", "Quality Assurance", "Research Assistant"],
                Active,
                73.0,
                "18:45:23",
                "Optimize video transcription accuracy and processing speed",
                "Analysis & Recommendations",
                (12, 3),
                87.3,
            ),
            session(
                "CS002",
                "Resource Allocation Strategy",
                &["Infrastructure Manager", "Research Assistant"],
                Active,
                45.0,
                "19:02:15",
                "Develop predictive scaling algorithm for peak loads",
                "Data Collection",
                (8, 1),
                92.1,
            ),
            session(
                "CS003",
                "Error Pattern Analysis",
                &["Quality Assurance", "Infrastructure Manager", "Communication Agent"],
                Completed,
                100.0,
                "17:30:12",
                "Identify and prevent recurring system failures",
                "Implementation",
                (15, 7),
                95.8,
            ),
            session(
                "CS004",
                "Knowledge Transfer Optimization",
                &["Research Assistant", "Content Strategist"],
                Planning,
                15.0,
                "19:12:45",
                "Improve cross-agent learning efficiency",
                "Problem Definition",
                (3, 0),
                78.4,
            ),
        ],
        metrics: CollabMetrics {
            total_sessions: 47,
            active_now: 2,
            average_consensus: 88.4,
            success_rate: 94.7,
            avg_session_time: "2h 15m".into(),
            innovation_index: 76.8,
        },
        decisions: BoundedLog::seeded(
            vec![
                decision(
                    "CS003",
                    "Implement circuit breaker pattern for API failures",
                    "19:15:23",
                    3,
                    96.2,
                    Implementation::Approved,
                    "reduced error rate by 34%",
                    Impact::High,
                ),
                decision(
                    "CS001",
                    "Batch video processing during low-utilization periods",
                    "19:08:17",
                    3,
                    91.5,
                    Implementation::InProgress,
                    "pending validation",
                    Impact::Medium,
                ),
                decision(
                    "CS002",
                    "Deploy predictive scaling model by Feb 28",
                    "19:05:42",
                    2,
                    89.3,
                    Implementation::Approved,
                    "development started",
                    Impact::High,
                ),
            ],
            DECISION_CAPACITY,
        ),
        synthesis: vec![
            synthesis(
                "Adaptive Load Balancing",
                &["Infrastructure Manager", "Research Assistant"],
                &["historical performance data", "ML predictions", "real-time metrics"],
                93.7,
                &["resource allocation", "task routing", "error prevention"],
                87.2,
                "breakthrough",
            ),
            synthesis(
                "Context-Aware Error Recovery",
                &["Quality Assurance", "Communication Agent"],
                &["error patterns", "system state", "recovery success rates"],
                91.4,
                &["automated recovery", "prevention strategies", "resilience planning"],
                82.6,
                "significant",
            ),
            synthesis(
                "Semantic Task Optimization",
                &["Content Strategist", "Research Assistant"],
                &["task semantics", "agent capabilities", "performance history"],
                88.9,
                &["intelligent routing", "capability matching", "efficiency gains"],
                79.3,
                "moderate",
            ),
        ],
    }
}

fn advance_session(s: &Session, rng: &mut SimRng) -> Session {
    if s.status != SessionStatus::Active {
        return s.clone();
    }
    let progress = (s.progress + rng.unit() * SESSION_STEP).min(100.0);
    let insights = s.insights + u32::from(rng.unit() > INSIGHT_ABOVE);
    Session {
        progress,
        insights,
        consensus_level: SESSION_CONSENSUS.apply(s.consensus_level, rng),
        ..s.clone()
    }
}

fn fabricate_decision(ticks: u64, sessions: &[Session], rng: &mut SimRng) -> Decision {
    let session_id = rng.pick(sessions).map(|s| s.id.clone()).unwrap_or_default();
    let participants = rng.below(3) as u32 + 2;
    let consensus = (rng.below(20) + 80) as f64;
    let implementation = rng.pick(&Implementation::ALL).copied().unwrap_or(Implementation::Pending);
    let impact = rng.pick(&Impact::ALL).copied().unwrap_or(Impact::Low);
    decision(
        &session_id,
        "Collaborative decision reached through agent consensus",
        &clock::clock_time(clock::at(ticks, INTERVAL)),
        participants,
        consensus,
        implementation,
        "AI-driven collaborative outcome",
        impact,
    )
}

pub fn next(prev: &Collab, rng: &mut SimRng) -> Collab {
    let ticks = prev.ticks.saturating_add(1);
    let sessions: Vec<Session> = prev.sessions.iter().map(|s| advance_session(s, rng)).collect();
    let m = &prev.metrics;
    let metrics = CollabMetrics {
        average_consensus: AVERAGE_CONSENSUS.apply(m.average_consensus, rng),
        success_rate: SUCCESS_RATE.apply(m.success_rate, rng),
        innovation_index: INNOVATION.apply(m.innovation_index, rng),
        ..m.clone()
    };
    let decisions = if rng.chance(NEW_DECISION_CHANCE) {
        prev.decisions.pushed(fabricate_decision(ticks, &sessions, rng))
    } else {
        prev.decisions.clone()
    };

    Collab {
        ticks,
        sessions,
        metrics,
        decisions,
        synthesis: prev.synthesis.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_active_sessions_progress() {
        let mut rng = SimRng::scripted([1.0]);
        let state = next(&seed(), &mut rng);
        assert_eq!(state.sessions[0].progress, 78.0);
        assert_eq!(state.sessions[0].insights, 13);
        assert_eq!(state.sessions[2], seed().sessions[2]);
        assert_eq!(state.sessions[3], seed().sessions[3]);
    }

    #[test]
    fn decision_log_holds_three() {
        let mut rng = SimRng::seeded(17);
        let mut state = seed();
        for _ in 0..300 {
            state = next(&state, &mut rng);
            assert!(state.decisions.len() <= DECISION_CAPACITY);
        }
        assert!(state.sessions.iter().all(|s| s.progress <= 100.0));
    }
}

//! Inter-agent message feed and link statistics.

use std::time::Duration;

use mc_sim::{BoundedLog, Bounds, Drift, SimRng};
use serde::{Deserialize, Serialize};

use crate::clock;
use crate::types::AGENTS;

pub const INTERVAL: Duration = Duration::from_secs(8);
pub const FEED_CAPACITY: usize = 5;

pub const CONNECTIONS: Bounds = Bounds::new(5.0, 12.0);
pub const BANDWIDTH: Drift = Drift::new(0.5, 10.0, Bounds::new(20.0, 95.0));
pub const LATENCY: Drift = Drift::new(0.5, 20.0, Bounds::new(15.0, 120.0));

const MESSAGES: [&str; 8] = [
    "Processing Instagram video analysis",
    "System health check completed",
    "Knowledge base updated",
    "Performance metrics collected",
    "Task queue optimized",
    "Learning rate improvement detected",
    "Error pattern analysis complete",
    "Resource allocation updated",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    TaskRequest,
    StatusUpdate,
    Validation,
    DataTransfer,
    ResourceRequest,
}

impl MessageKind {
    pub const ALL: [MessageKind; 5] = [
        MessageKind::TaskRequest,
        MessageKind::StatusUpdate,
        MessageKind::Validation,
        MessageKind::DataTransfer,
        MessageKind::ResourceRequest,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub from: String,
    pub to: String,
    pub message: String,
    pub time: String,
    pub kind: MessageKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkStats {
    pub total_messages: u64,
    pub active_connections: i64,
    pub bandwidth_usage: f64,
    pub latency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comms {
    pub ticks: u64,
    pub feed: BoundedLog<Message>,
    pub stats: LinkStats,
}

fn message(from: &str, to: &str, text: &str, time: &str, kind: MessageKind) -> Message {
    Message {
        from: from.into(),
        to: to.into(),
        message: text.into(),
        time: time.into(),
        kind,
    }
}

pub fn seed() -> Comms {
    use MessageKind::*;
    Comms {
        ticks: 0,
        feed: BoundedLog::seeded(
            vec![
                message(
                    "Content Strategist",
                    "Research Assistant",
                    "Analysis request: Instagram video #11",
                    "18:47:23",
                    TaskRequest,
                ),
                message(
                    "Infrastructure Manager",
                    "Quality Assurance",
                    "Deployment status: Mission Control v3.0",
                    "18:46:15",
                    StatusUpdate,
                ),
                message(
                    "Quality Assurance",
                    "Content Strategist",
                    "Validation complete: Transcription pipeline",
                    "18:45:42",
                    Validation,
                ),
                message(
                    "Research Assistant",
                    "Infrastructure Manager",
                    "Data gathered: AI agent monitoring systems",
                    "18:44:33",
                    DataTransfer,
                ),
                message(
                    "Content Strategist",
                    "Infrastructure Manager",
                    "Resource request: Processing capacity",
                    "18:43:18",
                    ResourceRequest,
                ),
            ],
            FEED_CAPACITY,
        ),
        stats: LinkStats {
            total_messages: 1_247,
            active_connections: 8,
            bandwidth_usage: 78.3,
            latency: 42.0,
        },
    }
}

/// Draws a message; self-addressed drafts are discarded and leave the
/// feed and stats untouched.
pub fn next(prev: &Comms, rng: &mut SimRng) -> Comms {
    let ticks = prev.ticks.saturating_add(1);
    let from = rng.pick(&AGENTS).copied().unwrap_or(AGENTS[0]);
    let to = rng.pick(&AGENTS).copied().unwrap_or(AGENTS[0]);
    let text = rng.pick(&MESSAGES).copied().unwrap_or(MESSAGES[0]);
    let kind = rng.pick(&MessageKind::ALL).copied().unwrap_or(MessageKind::StatusUpdate);

    if from == to {
        return Comms {
            ticks,
            ..prev.clone()
        };
    }

    let draft = message(from, to, text, &clock::clock_time(clock::at(ticks, INTERVAL)), kind);
    let step = if rng.unit() > 0.5 { 1.0 } else { -1.0 };
    let s = &prev.stats;
    Comms {
        ticks,
        feed: prev.feed.pushed(draft),
        stats: LinkStats {
            total_messages: s.total_messages + 1,
            active_connections: CONNECTIONS.clamp(s.active_connections as f64 + step) as i64,
            bandwidth_usage: BANDWIDTH.apply(s.bandwidth_usage, rng),
            latency: LATENCY.apply(s.latency, rng),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_addressed_message_is_dropped() {
        let mut rng = SimRng::scripted([0.1, 0.1, 0.1, 0.1]);
        let state = next(&seed(), &mut rng);
        assert_eq!(state.feed, seed().feed);
        assert_eq!(state.stats, seed().stats);
        assert_eq!(state.ticks, 1);
    }

    #[test]
    fn delivered_message_heads_the_feed() {
        // from agent 0, to agent 4, connection step up
        let mut rng = SimRng::scripted([0.1, 0.9, 0.1, 0.1, 0.9, 0.5, 0.5]);
        let state = next(&seed(), &mut rng);
        assert_eq!(state.feed.len(), FEED_CAPACITY);
        let head = state.feed.head().cloned();
        assert_eq!(head.as_ref().map(|m| m.to.as_str()), Some("Communication Agent"));
        assert_eq!(head.map(|m| m.time), Some("18:55:08".to_string()));
        assert_eq!(state.stats.total_messages, 1_248);
        assert_eq!(state.stats.active_connections, 9);
        assert_eq!(state.stats.bandwidth_usage, 78.3);
    }
}

use std::time::Duration;

use mc_sim::{Bounds, Drift, SimRng};
use serde::{Deserialize, Serialize};

pub const INTERVAL: Duration = Duration::from_secs(7);

pub const NODE_STRENGTH: Drift = Drift::new(0.4, 3.0, Bounds::new(70.0, 99.0));
pub const NODE_CONFIDENCE: Drift = Drift::new(0.3, 2.0, Bounds::new(80.0, 99.0));
pub const NODE_USAGE: Drift = Drift::new(0.6, 3.0, Bounds::at_least(1.0));
pub const NODE_CONNECTIONS: Bounds = Bounds::new(1.0, 25.0);
/// A node gains a connection when the draw exceeds this.
pub const CONNECT_ABOVE: f64 = 0.8;
pub const CLUSTER_COHERENCE: Drift = Drift::new(0.4, 2.0, Bounds::new(80.0, 98.0));
pub const CLUSTER_GROWTH: Drift = Drift::new(0.5, 3.0, Bounds::new(1.0, 25.0));
pub const TOTAL_NODES: Drift = Drift::new(0.3, 5.0, Bounds::at_least(200.0));
pub const ACTIVE_CONNECTIONS: Drift = Drift::new(0.4, 4.0, Bounds::new(60.0, 120.0));
pub const GROWTH: Drift = Drift::new(0.4, 3.0, Bounds::new(5.0, 30.0));
pub const TRANSFER: Drift = Drift::new(0.3, 1.0, Bounds::new(85.0, 98.0));
pub const COHERENCE: Drift = Drift::new(0.4, 2.0, Bounds::new(80.0, 96.0));
pub const NOVELTY: Drift = Drift::new(0.5, 2.0, Bounds::new(5.0, 20.0));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeNode {
    pub id: String,
    pub kind: String,
    pub label: String,
    pub connections: i64,
    pub strength: f64,
    pub agent: String,
    pub category: String,
    pub last_updated: String,
    pub confidence: f64,
    pub usage: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub name: String,
    pub nodes: u32,
    pub coherence: f64,
    pub agents: Vec<String>,
    pub key_topics: Vec<String>,
    pub growth_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: String,
    pub to: String,
    pub knowledge: String,
    pub transfer_rate: u32,
    pub volume: u32,
    pub efficiency: f64,
    pub last_transfer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeStats {
    pub total_nodes: i64,
    pub active_connections: i64,
    pub knowledge_growth: f64,
    pub transfer_efficiency: f64,
    pub semantic_coherence: f64,
    pub novelty_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Knowledge {
    pub nodes: Vec<KnowledgeNode>,
    pub clusters: Vec<Cluster>,
    pub transfers: Vec<Transfer>,
    pub stats: KnowledgeStats,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn node(
    id: &str,
    kind: &str,
    label: &str,
    connections: i64,
    strength: f64,
    agent: &str,
    category: &str,
    last_updated: &str,
    confidence: f64,
    usage: i64,
) -> KnowledgeNode {
    KnowledgeNode {
        id: id.into(),
        kind: kind.into(),
        label: label.into(),
        connections,
        strength,
        agent: agent.into(),
        category: category.into(),
        last_updated: last_updated.into(),
        confidence,
        usage,
    }
}

fn cluster(
    name: &str,
    nodes: u32,
    coherence: f64,
    agents: &[&str],
    key_topics: &[&str],
    growth_rate: f64,
) -> Cluster {
    Cluster {
        name: name.into(),
        nodes,
        coherence,
        agents: owned(agents),
        key_topics: owned(key_topics),
        growth_rate,
    }
}

fn transfer(
    from: &str,
    to: &str,
    knowledge: &str,
    transfer_rate: u32,
    volume: u32,
    efficiency: f64,
    last_transfer: &str,
) -> Transfer {
    Transfer {
        from: from.into(),
        to: to.into(),
        knowledge: knowledge.into(),
        transfer_rate,
        volume,
        efficiency,
        last_transfer: last_transfer.into(),
    }
}

pub fn seed() -> Knowledge {
    Knowledge {
        nodes: vec![
            node(
                "KN001",
                "concept",
                "Instagram Video Analysis",
                8,
                94.0,
                "Content Strategist",
                "content_analysis",
                "18:54:23",
                96.8,
                23,
            ),
            node(
                "KN002",
                "process",
                "Task Routing Algorithm",
                12,
                87.0,
                "Infrastructure Manager",
                "optimization",
                "18:52:15",
                94.2,
                45,
            ),
            node(
                "KN003",
                "pattern",
                "Error Recovery Patterns",
                6,
                91.0,
                "Quality Assurance",
                "resilience",
                "18:47:38",
                98.1,
                12,
            ),
            node(
                "KN004",
                "insight",
                "Learning Velocity Optimization",
                15,
                89.0,
                "Research Assistant",
                "learning",
                "18:49:42",
                92.3,
                31,
            ),
            node(
                "KN005",
                "protocol",
                "Inter-Agent Communication",
                20,
                96.0,
                "Communication Agent",
                "coordination",
                "18:56:07",
                97.5,
                67,
            ),
        ],
        clusters: vec![
            cluster(
                "Content Processing",
                8,
                93.2,
                &["Content Strategist", "Quality Assurance"],
                &["video analysis", "transcription", "quality metrics"],
                12.3,
            ),
            cluster(
                "System Optimization",
                12,
                87.6,
                &["Infrastructure Manager", "Research Assistant"],
                &["resource allocation", "performance tuning", "predictive scaling"],
                8.7,
            ),
            cluster(
                "Learning & Adaptation",
                15,
                91.4,
                &["Research Assistant", "Content Strategist"],
                &["capability evolution", "pattern recognition", "knowledge synthesis"],
                15.8,
            ),
            cluster(
                "Communication Networks",
                18,
                89.1,
                &["Communication Agent", "Infrastructure Manager"],
                &["message routing", "protocol optimization", "network health"],
                6.2,
            ),
            cluster(
                "Error Management",
                6,
                95.8,
                &["Quality Assurance", "Infrastructure Manager"],
                &["failure detection", "recovery strategies", "resilience patterns"],
                4.1,
            ),
        ],
        transfers: vec![
            transfer(
                "Content Strategist",
                "Quality Assurance",
                "Video analysis quality metrics",
                94,
                156,
                98.3,
                "18:55:12",
            ),
            transfer(
                "Research Assistant",
                "Infrastructure Manager",
                "Performance optimization insights",
                87,
                203,
                91.7,
                "18:53:45",
            ),
            transfer(
                "Infrastructure Manager",
                "Communication Agent",
                "Resource allocation patterns",
                91,
                178,
                95.2,
                "18:54:33",
            ),
            transfer(
                "Quality Assurance",
                "Content Strategist",
                "Error pattern classification",
                89,
                134,
                92.8,
                "18:51:28",
            ),
            transfer(
                "Communication Agent",
                "Research Assistant",
                "Network optimization findings",
                93,
                189,
                96.1,
                "18:56:02",
            ),
        ],
        stats: KnowledgeStats {
            total_nodes: 247,
            active_connections: 89,
            knowledge_growth: 18.5,
            transfer_efficiency: 94.2,
            semantic_coherence: 91.7,
            novelty_rate: 12.3,
        },
    }
}

fn next_node(n: &KnowledgeNode, rng: &mut SimRng) -> KnowledgeNode {
    let strength = NODE_STRENGTH.apply(n.strength, rng);
    let confidence = NODE_CONFIDENCE.apply(n.confidence, rng);
    let usage = NODE_USAGE.apply_count(n.usage, rng);
    let gained = i64::from(rng.unit() > CONNECT_ABOVE);
    KnowledgeNode {
        strength,
        confidence,
        usage,
        connections: NODE_CONNECTIONS.clamp((n.connections + gained) as f64) as i64,
        ..n.clone()
    }
}

pub fn next(prev: &Knowledge, rng: &mut SimRng) -> Knowledge {
    let nodes = prev.nodes.iter().map(|n| next_node(n, rng)).collect();
    let clusters = prev
        .clusters
        .iter()
        .map(|c| Cluster {
            coherence: CLUSTER_COHERENCE.apply(c.coherence, rng),
            growth_rate: CLUSTER_GROWTH.apply(c.growth_rate, rng),
            ..c.clone()
        })
        .collect();
    let s = &prev.stats;
    let stats = KnowledgeStats {
        total_nodes: TOTAL_NODES.apply_count(s.total_nodes, rng),
        active_connections: ACTIVE_CONNECTIONS.apply_count(s.active_connections, rng),
        knowledge_growth: GROWTH.apply(s.knowledge_growth, rng),
        transfer_efficiency: TRANSFER.apply(s.transfer_efficiency, rng),
        semantic_coherence: COHERENCE.apply(s.semantic_coherence, rng),
        novelty_rate: NOVELTY.apply(s.novelty_rate, rng),
    };

    Knowledge {
        nodes,
        clusters,
        transfers: prev.transfers.clone(),
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connections_cap_at_twenty_five() {
        let mut rng = SimRng::scripted([0.95]);
        let mut state = seed();
        for _ in 0..10 {
            state = next(&state, &mut rng);
        }
        assert!(state.nodes.iter().all(|n| n.connections <= 25));
        assert_eq!(state.nodes[4].connections, 25);
        assert_eq!(state.nodes[0].connections, 18);
    }

    #[test]
    fn stats_respect_floors() {
        let mut rng = SimRng::scripted([0.0]);
        let mut state = seed();
        for _ in 0..200 {
            state = next(&state, &mut rng);
        }
        assert_eq!(state.stats.total_nodes, 200);
        assert_eq!(state.stats.active_connections, 60);
        assert!(state.nodes.iter().all(|n| n.usage >= 1));
    }
}

//! The panel catalogue: ids, titles, default intervals and the tagged state
//! union the console mounts stores over.

use std::str::FromStr;
use std::time::Duration;

use mc_sim::SimRng;
use serde::Serialize;

use crate::panels::{
    agent_metrics, analytics, collab, comms, forecast, knowledge, learning, network, overview,
    pipeline, realtime, recovery, resources, routing, scaling,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    Realtime,
    Agents,
    Resources,
    Routing,
    Network,
    Recovery,
    Forecast,
    Knowledge,
    Scaling,
    Comms,
    Collab,
    Learning,
    Analytics,
    Pipeline,
    Overview,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown panel '{0}'")]
pub struct UnknownPanel(pub String);

impl PanelKind {
    /// Tab order.
    pub const ALL: [PanelKind; 15] = [
        PanelKind::Realtime,
        PanelKind::Agents,
        PanelKind::Resources,
        PanelKind::Routing,
        PanelKind::Network,
        PanelKind::Recovery,
        PanelKind::Forecast,
        PanelKind::Knowledge,
        PanelKind::Scaling,
        PanelKind::Comms,
        PanelKind::Collab,
        PanelKind::Learning,
        PanelKind::Analytics,
        PanelKind::Pipeline,
        PanelKind::Overview,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            PanelKind::Realtime => "realtime",
            PanelKind::Agents => "agents",
            PanelKind::Resources => "resources",
            PanelKind::Routing => "routing",
            PanelKind::Network => "network",
            PanelKind::Recovery => "recovery",
            PanelKind::Forecast => "forecast",
            PanelKind::Knowledge => "knowledge",
            PanelKind::Scaling => "scaling",
            PanelKind::Comms => "comms",
            PanelKind::Collab => "collab",
            PanelKind::Learning => "learning",
            PanelKind::Analytics => "analytics",
            PanelKind::Pipeline => "pipeline",
            PanelKind::Overview => "overview",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PanelKind::Realtime => "Real-Time Monitoring",
            PanelKind::Agents => "Agent Intelligence Metrics",
            PanelKind::Resources => "Resource Allocation",
            PanelKind::Routing => "Task Routing",
            PanelKind::Network => "Agent Collaboration Network",
            PanelKind::Recovery => "Error Recovery",
            PanelKind::Forecast => "Performance Forecasting",
            PanelKind::Knowledge => "Knowledge Graph",
            PanelKind::Scaling => "Automated Scaling",
            PanelKind::Comms => "Agent Communication",
            PanelKind::Collab => "Collaborative Intelligence",
            PanelKind::Learning => "Learning Progress",
            PanelKind::Analytics => "Advanced Analytics",
            PanelKind::Pipeline => "Content Pipeline Status",
            PanelKind::Overview => "Mission Overview",
        }
    }

    pub fn default_interval(&self) -> Duration {
        match self {
            PanelKind::Realtime => realtime::INTERVAL,
            PanelKind::Agents => agent_metrics::INTERVAL,
            PanelKind::Resources => resources::INTERVAL,
            PanelKind::Routing => routing::INTERVAL,
            PanelKind::Network => network::INTERVAL,
            PanelKind::Recovery => recovery::INTERVAL,
            PanelKind::Forecast => forecast::INTERVAL,
            PanelKind::Knowledge => knowledge::INTERVAL,
            PanelKind::Scaling => scaling::INTERVAL,
            PanelKind::Comms => comms::INTERVAL,
            PanelKind::Collab => collab::INTERVAL,
            PanelKind::Learning => learning::INTERVAL,
            PanelKind::Analytics => analytics::INTERVAL,
            PanelKind::Pipeline => pipeline::INTERVAL,
            PanelKind::Overview => overview::INTERVAL,
        }
    }

    /// Position in [`PanelKind::ALL`].
    pub fn index(&self) -> usize {
        PanelKind::ALL.iter().position(|k| k == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<PanelKind> {
        PanelKind::ALL.get(index).copied()
    }

    pub fn next(&self) -> PanelKind {
        PanelKind::ALL[(self.index() + 1) % PanelKind::ALL.len()]
    }

    pub fn prev(&self) -> PanelKind {
        let len = PanelKind::ALL.len();
        PanelKind::ALL[(self.index() + len - 1) % len]
    }
}

impl std::fmt::Display for PanelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for PanelKind {
    type Err = UnknownPanel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        PanelKind::ALL
            .iter()
            .copied()
            .find(|k| k.id() == wanted)
            .ok_or_else(|| UnknownPanel(s.to_string()))
    }
}

/// Current record of one panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "panel", content = "state", rename_all = "snake_case")]
pub enum PanelState {
    Realtime(realtime::Realtime),
    Agents(agent_metrics::AgentMetrics),
    Resources(resources::Resources),
    Routing(routing::Routing),
    Network(network::Network),
    Recovery(recovery::Recovery),
    Forecast(forecast::Forecast),
    Knowledge(knowledge::Knowledge),
    Scaling(scaling::Scaling),
    Comms(comms::Comms),
    Collab(collab::Collab),
    Learning(learning::Learning),
    Analytics(analytics::Analytics),
    Pipeline(pipeline::Pipeline),
    Overview(overview::Overview),
}

impl PanelState {
    pub fn seed(kind: PanelKind) -> Self {
        Self::seed_with(kind, pipeline::DEFAULT_TOTAL_VIDEOS)
    }

    /// Seed record; `total_videos` only affects the content pipeline panel.
    pub fn seed_with(kind: PanelKind, total_videos: u32) -> Self {
        match kind {
            PanelKind::Realtime => PanelState::Realtime(realtime::seed()),
            PanelKind::Agents => PanelState::Agents(agent_metrics::seed()),
            PanelKind::Resources => PanelState::Resources(resources::seed()),
            PanelKind::Routing => PanelState::Routing(routing::seed()),
            PanelKind::Network => PanelState::Network(network::seed()),
            PanelKind::Recovery => PanelState::Recovery(recovery::seed()),
            PanelKind::Forecast => PanelState::Forecast(forecast::seed()),
            PanelKind::Knowledge => PanelState::Knowledge(knowledge::seed()),
            PanelKind::Scaling => PanelState::Scaling(scaling::seed()),
            PanelKind::Comms => PanelState::Comms(comms::seed()),
            PanelKind::Collab => PanelState::Collab(collab::seed()),
            PanelKind::Learning => PanelState::Learning(learning::seed()),
            PanelKind::Analytics => PanelState::Analytics(analytics::seed()),
            PanelKind::Pipeline => PanelState::Pipeline(pipeline::seed_with_total(total_videos)),
            PanelKind::Overview => PanelState::Overview(overview::seed()),
        }
    }

    pub fn kind(&self) -> PanelKind {
        match self {
            PanelState::Realtime(_) => PanelKind::Realtime,
            PanelState::Agents(_) => PanelKind::Agents,
            PanelState::Resources(_) => PanelKind::Resources,
            PanelState::Routing(_) => PanelKind::Routing,
            PanelState::Network(_) => PanelKind::Network,
            PanelState::Recovery(_) => PanelKind::Recovery,
            PanelState::Forecast(_) => PanelKind::Forecast,
            PanelState::Knowledge(_) => PanelKind::Knowledge,
            PanelState::Scaling(_) => PanelKind::Scaling,
            PanelState::Comms(_) => PanelKind::Comms,
            PanelState::Collab(_) => PanelKind::Collab,
            PanelState::Learning(_) => PanelKind::Learning,
            PanelState::Analytics(_) => PanelKind::Analytics,
            PanelState::Pipeline(_) => PanelKind::Pipeline,
            PanelState::Overview(_) => PanelKind::Overview,
        }
    }

    /// Applies the panel's update rule once.
    pub fn advance(&self, rng: &mut SimRng) -> Self {
        match self {
            PanelState::Realtime(s) => PanelState::Realtime(realtime::next(s, rng)),
            PanelState::Agents(s) => PanelState::Agents(agent_metrics::next(s, rng)),
            PanelState::Resources(s) => PanelState::Resources(resources::next(s, rng)),
            PanelState::Routing(s) => PanelState::Routing(routing::next(s, rng)),
            PanelState::Network(s) => PanelState::Network(network::next(s, rng)),
            PanelState::Recovery(s) => PanelState::Recovery(recovery::next(s, rng)),
            PanelState::Forecast(s) => PanelState::Forecast(forecast::next(s, rng)),
            PanelState::Knowledge(s) => PanelState::Knowledge(knowledge::next(s, rng)),
            PanelState::Scaling(s) => PanelState::Scaling(scaling::next(s, rng)),
            PanelState::Comms(s) => PanelState::Comms(comms::next(s, rng)),
            PanelState::Collab(s) => PanelState::Collab(collab::next(s, rng)),
            PanelState::Learning(s) => PanelState::Learning(learning::next(s, rng)),
            PanelState::Analytics(s) => PanelState::Analytics(analytics::next(s, rng)),
            PanelState::Pipeline(s) => PanelState::Pipeline(pipeline::next(s, rng)),
            PanelState::Overview(s) => PanelState::Overview(overview::next(s, rng)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_from_str() {
        for kind in PanelKind::ALL {
            assert_eq!(kind.id().parse::<PanelKind>(), Ok(kind));
        }
        assert_eq!(" Agents ".parse::<PanelKind>(), Ok(PanelKind::Agents));
        assert_eq!("warp".parse::<PanelKind>(), Err(UnknownPanel("warp".into())));
    }

    #[test]
    fn tab_cycle_wraps() {
        assert_eq!(PanelKind::Pipeline.next(), PanelKind::Overview);
        assert_eq!(PanelKind::Overview.next(), PanelKind::Realtime);
        assert_eq!(PanelKind::Realtime.prev(), PanelKind::Overview);
        assert_eq!(PanelKind::from_index(2), Some(PanelKind::Resources));
    }
}

//! Display derivations. Nothing here mutates panel state.

use serde::{Deserialize, Serialize};

use crate::panels::{collab, overview, realtime, recovery, routing};
use crate::types::{Impact, Priority, Severity, Trend};

/// Display tone for a value or status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Good,
    Warn,
    Bad,
    Info,
    Muted,
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Good => "good",
            Self::Warn => "warn",
            Self::Bad => "bad",
            Self::Info => "info",
            Self::Muted => "muted",
        };
        write!(f, "{s}")
    }
}

/// Anything with a status colour.
pub trait Toned {
    fn tone(&self) -> Tone;
}

/// Higher is better: >= 90 good, >= 70 warn.
pub fn score_tone(score: f64) -> Tone {
    if score >= 90.0 {
        Tone::Good
    } else if score >= 70.0 {
        Tone::Warn
    } else {
        Tone::Bad
    }
}

/// Lower is better: <= 2 good, <= 5 warn.
pub fn error_rate_tone(rate: f64) -> Tone {
    if rate <= 2.0 {
        Tone::Good
    } else if rate <= 5.0 {
        Tone::Warn
    } else {
        Tone::Bad
    }
}

/// Utilisation: >= 80 bad, >= 60 warn.
pub fn load_tone(load: f64) -> Tone {
    if load >= 80.0 {
        Tone::Bad
    } else if load >= 60.0 {
        Tone::Warn
    } else {
        Tone::Good
    }
}

pub fn efficiency_tone(efficiency: f64) -> Tone {
    if efficiency >= 90.0 {
        Tone::Good
    } else if efficiency >= 75.0 {
        Tone::Warn
    } else {
        Tone::Bad
    }
}

impl Toned for Priority {
    fn tone(&self) -> Tone {
        match self {
            Priority::Critical => Tone::Bad,
            Priority::High => Tone::Warn,
            Priority::Medium => Tone::Info,
            Priority::Low => Tone::Good,
        }
    }
}

impl Toned for Severity {
    fn tone(&self) -> Tone {
        match self {
            Severity::Low => Tone::Good,
            Severity::Medium => Tone::Warn,
            Severity::High | Severity::Critical => Tone::Bad,
        }
    }
}

impl Toned for Impact {
    fn tone(&self) -> Tone {
        match self {
            Impact::High => Tone::Bad,
            Impact::Medium => Tone::Warn,
            Impact::Low => Tone::Good,
        }
    }
}

impl Toned for Trend {
    fn tone(&self) -> Tone {
        match self {
            Trend::Improving => Tone::Good,
            Trend::Stable => Tone::Info,
            Trend::Concerning => Tone::Bad,
        }
    }
}

impl Toned for routing::TaskStatus {
    fn tone(&self) -> Tone {
        match self {
            routing::TaskStatus::Processing => Tone::Info,
            routing::TaskStatus::Queued => Tone::Warn,
            routing::TaskStatus::Completed => Tone::Good,
            routing::TaskStatus::Pending => Tone::Muted,
        }
    }
}

impl Toned for recovery::RecoveryStatus {
    fn tone(&self) -> Tone {
        match self {
            recovery::RecoveryStatus::Resolved => Tone::Good,
            recovery::RecoveryStatus::Recovered => Tone::Info,
            recovery::RecoveryStatus::Monitoring => Tone::Warn,
            recovery::RecoveryStatus::Active => Tone::Bad,
        }
    }
}

impl Toned for realtime::SystemStatus {
    fn tone(&self) -> Tone {
        match self {
            realtime::SystemStatus::Nominal => Tone::Good,
            realtime::SystemStatus::Caution => Tone::Warn,
            realtime::SystemStatus::Warning => Tone::Bad,
        }
    }
}

impl Toned for realtime::CommStatus {
    fn tone(&self) -> Tone {
        Tone::Good
    }
}

impl Toned for collab::SessionStatus {
    fn tone(&self) -> Tone {
        match self {
            collab::SessionStatus::Active => Tone::Good,
            collab::SessionStatus::Completed => Tone::Info,
            collab::SessionStatus::Planning => Tone::Warn,
        }
    }
}

impl Toned for overview::AgentStatus {
    fn tone(&self) -> Tone {
        match self {
            overview::AgentStatus::Active => Tone::Good,
            overview::AgentStatus::Learning => Tone::Info,
            overview::AgentStatus::Standby => Tone::Warn,
            overview::AgentStatus::Error => Tone::Bad,
        }
    }
}

impl Toned for overview::QueuePriority {
    fn tone(&self) -> Tone {
        match self {
            overview::QueuePriority::High => Tone::Bad,
            overview::QueuePriority::Medium => Tone::Warn,
            overview::QueuePriority::Low => Tone::Info,
            overview::QueuePriority::Paused => Tone::Muted,
        }
    }
}

/// Five-cell signal meter, `ceil(signal / 20)` cells lit.
pub fn signal_bars(signal: f64) -> String {
    let lit = (signal / 20.0).ceil().clamp(0.0, 5.0) as usize;
    format!("{}{}", "█".repeat(lit), "░".repeat(5 - lit))
}

/// Ten-cell meter for task complexity (1..=10).
pub fn complexity_bar(complexity: u8) -> String {
    let lit = usize::from(complexity.min(10));
    format!("{}{}", "▮".repeat(lit), "▯".repeat(10 - lit))
}

/// `HH:MM:SS` for a count of seconds. Hours are not wrapped.
pub fn format_elapsed(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Rising,
    Stable,
    Falling,
}

impl Direction {
    pub fn arrow(&self) -> &'static str {
        match self {
            Direction::Rising => "↑",
            Direction::Stable => "→",
            Direction::Falling => "↓",
        }
    }
}

impl Toned for Direction {
    fn tone(&self) -> Tone {
        match self {
            Direction::Rising => Tone::Good,
            Direction::Stable => Tone::Warn,
            Direction::Falling => Tone::Bad,
        }
    }
}

/// Rising above +5%, falling below -5%, otherwise stable.
pub fn trend_arrow(current: f64, previous: f64) -> Direction {
    if current > previous * 1.05 {
        Direction::Rising
    } else if current < previous * 0.95 {
        Direction::Falling
    } else {
        Direction::Stable
    }
}

/// `current / target` as a percentage; zero target yields 0.
pub fn progress_percentage(current: f64, target: f64) -> f64 {
    if target == 0.0 {
        return 0.0;
    }
    current / target * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_meter_cells() {
        assert_eq!(signal_bars(98.7), "█████");
        assert_eq!(signal_bars(61.0), "████░");
        assert_eq!(signal_bars(0.0), "░░░░░");
    }

    #[test]
    fn overview_statuses_have_distinct_tones() {
        use overview::{AgentStatus, QueuePriority};
        assert_eq!(AgentStatus::Active.tone(), Tone::Good);
        assert_eq!(AgentStatus::Standby.tone(), Tone::Warn);
        assert_eq!(QueuePriority::Paused.tone(), Tone::Muted);
    }

    #[test]
    fn elapsed_formats_hours() {
        assert_eq!(format_elapsed(0), "00:00:00");
        assert_eq!(format_elapsed(3_725), "01:02:05");
    }
}

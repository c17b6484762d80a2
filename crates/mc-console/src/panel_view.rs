//! Turns a panel snapshot into styled terminal lines.

use mc_panels::panels::{
    agent_metrics::AgentMetrics, analytics::Analytics, collab::Collab, comms::Comms,
    forecast::Forecast, knowledge::Knowledge, learning::Learning, network::Network,
    overview::Overview, pipeline::Pipeline, realtime::Realtime, recovery::Recovery,
    resources::Resources, routing::Routing, scaling::Scaling,
};
use mc_panels::presentation::{
    complexity_bar, efficiency_tone, error_rate_tone, format_elapsed, load_tone,
    progress_percentage, score_tone, signal_bars, trend_arrow,
};
use mc_panels::{MissionStatus, PanelState, Tone, Toned};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Good => Color::Green,
        Tone::Warn => Color::Yellow,
        Tone::Bad => Color::Red,
        Tone::Info => Color::Cyan,
        Tone::Muted => Color::DarkGray,
    }
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {text}"),
        Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD),
    ))
}

fn label(text: &str) -> Span<'static> {
    Span::styled(format!("  {text}: "), Style::default().fg(Color::Gray))
}

fn value(text: impl Into<String>, tone: Tone) -> Span<'static> {
    Span::styled(text.into(), Style::default().fg(tone_color(tone)))
}

fn plain(text: impl Into<String>) -> Span<'static> {
    Span::styled(text.into(), Style::default().fg(Color::White))
}

fn kv(name: &str, text: impl Into<String>, tone: Tone) -> Line<'static> {
    Line::from(vec![label(name), value(text, tone)])
}

fn pct(v: f64) -> String {
    format!("{v:.1}%")
}

/// Body lines for the mounted panel.
pub fn panel_lines(state: &PanelState) -> Vec<Line<'static>> {
    match state {
        PanelState::Realtime(s) => realtime_lines(s),
        PanelState::Agents(s) => agent_lines(s),
        PanelState::Resources(s) => resource_lines(s),
        PanelState::Routing(s) => routing_lines(s),
        PanelState::Network(s) => network_lines(s),
        PanelState::Recovery(s) => recovery_lines(s),
        PanelState::Forecast(s) => forecast_lines(s),
        PanelState::Knowledge(s) => knowledge_lines(s),
        PanelState::Scaling(s) => scaling_lines(s),
        PanelState::Comms(s) => comms_lines(s),
        PanelState::Collab(s) => collab_lines(s),
        PanelState::Learning(s) => learning_lines(s),
        PanelState::Analytics(s) => analytics_lines(s),
        PanelState::Pipeline(s) => pipeline_lines(s),
        PanelState::Overview(s) => overview_lines(s),
    }
}

/// One-line mission header for the status bar.
pub fn status_spans(status: &MissionStatus) -> Vec<Span<'static>> {
    vec![
        label("Mission"),
        plain(format!("{} {}", status.mission_phase, status.version)),
        label("Health"),
        value(pct(status.system_health), score_tone(status.system_health)),
        label("Systems"),
        plain(status.total_systems.to_string()),
        label("Agents"),
        plain(status.active_agents.to_string()),
        label("Content"),
        plain(status.content_processed.to_string()),
        label("Updated"),
        value(status.last_update.clone(), Tone::Muted),
    ]
}

fn realtime_lines(s: &Realtime) -> Vec<Line<'static>> {
    let v = &s.vitals;
    let mut lines = vec![
        Line::from(vec![
            label("Mission elapsed"),
            value(format_elapsed(s.elapsed), Tone::Info),
            label("Phase"),
            plain(s.phase.clone()),
            label("Next"),
            plain(s.next_milestone.clone()),
        ]),
        Line::from(vec![
            label("CPU"),
            value(pct(v.cpu_usage), load_tone(v.cpu_usage)),
            label("Memory"),
            value(pct(v.memory_usage), load_tone(v.memory_usage)),
            label("Disk"),
            value(pct(v.disk_usage), load_tone(v.disk_usage)),
            label("Latency"),
            plain(format!("{:.0}ms", v.network_latency)),
            label("Temp"),
            plain(format!("{:.1}°C", v.temperature)),
        ]),
        Line::from(vec![
            label("Alerts"),
            value(format!("{} red", s.alerts.red), Tone::Bad),
            plain(" "),
            value(format!("{} yellow", s.alerts.yellow), Tone::Warn),
            plain(" "),
            value(format!("{} green", s.alerts.green), Tone::Good),
        ]),
        heading("Mission Critical Systems"),
    ];
    for sys in &s.mission_critical {
        lines.push(Line::from(vec![
            label(&sys.name),
            value(sys.status.to_string(), sys.status.tone()),
            plain(format!("  {}", sys.value)),
        ]));
    }
    lines.push(heading("Ground Stations"));
    for st in &s.stations {
        lines.push(Line::from(vec![
            label(&st.station),
            value(signal_bars(st.signal), st.status.tone()),
            plain(format!(" {:.1}%  {:.0}ms  {}", st.signal, st.latency, st.status)),
        ]));
    }
    let fd = &s.flight_director;
    lines.push(heading("Flight Director"));
    lines.push(Line::from(vec![
        label("GO/NO-GO"),
        value(fd.go_no_go.clone(), Tone::Good),
        label("Power"),
        value(fd.power_systems.to_string(), fd.power_systems.tone()),
        label("Life support"),
        value(fd.life_support_systems.to_string(), fd.life_support_systems.tone()),
    ]));
    lines.push(heading("Timeline"));
    for e in s.timeline.iter() {
        lines.push(Line::from(vec![
            value(format!("  {} ", e.time), Tone::Muted),
            plain(e.event.clone()),
        ]));
    }
    lines
}

fn agent_lines(s: &AgentMetrics) -> Vec<Line<'static>> {
    vec![
        heading("Cognitive State"),
        kv("Cognitive load", pct(s.cognitive_load), load_tone(s.cognitive_load)),
        kv("Task queue", s.task_queue.to_string(), Tone::Info),
        kv("Learning rate", pct(s.learning_rate), score_tone(s.learning_rate)),
        kv("Error rate", pct(s.error_rate), error_rate_tone(s.error_rate)),
        kv("Efficiency", pct(s.efficiency), efficiency_tone(s.efficiency)),
        kv("Adaptability", pct(s.adaptability), score_tone(s.adaptability)),
        heading("Trends"),
        kv("Cognitive load", format!("{:+.1}", s.trends.cognitive_load), Tone::Muted),
        kv("Efficiency", format!("{:+.1}", s.trends.efficiency), Tone::Muted),
        kv("Learning rate", format!("{:+.1}", s.trends.learning_rate), Tone::Muted),
        kv("Adaptability", format!("{:+.1}", s.trends.adaptability), Tone::Muted),
    ]
}

fn resource_lines(s: &Resources) -> Vec<Line<'static>> {
    let mut lines = vec![heading("Compute")];
    for (name, c) in [
        ("CPU", &s.cpu),
        ("Memory", &s.memory),
        ("GPU", &s.gpu),
        ("Storage", &s.storage),
    ] {
        lines.push(Line::from(vec![
            label(name),
            value(pct(c.usage), load_tone(c.usage)),
            plain(format!("  alloc {:.0}  avail {:.0}  ", c.allocated, c.available)),
            value(format!("eff {}", pct(c.efficiency)), efficiency_tone(c.efficiency)),
        ]));
    }
    lines.push(Line::from(vec![
        label("Network"),
        value(pct(s.network.usage), load_tone(s.network.usage)),
        plain(format!("  {} Mbps  {:.0}ms", s.network.bandwidth, s.network.latency)),
    ]));
    let used = s.tokens.used as f64;
    let limit = s.tokens.limit as f64;
    lines.push(Line::from(vec![
        label("Tokens"),
        plain(format!("{} / {}", s.tokens.used, s.tokens.limit)),
        value(
            format!("  {}", pct(progress_percentage(used, limit))),
            load_tone(progress_percentage(used, limit)),
        ),
        plain(format!("  {:.0}/min", s.tokens.rate)),
    ]));
    lines.push(heading("Agent Allocations"));
    for a in &s.allocations {
        lines.push(Line::from(vec![
            label(&a.agent),
            plain(format!("cpu {}  mem {}  gpu {}  ", a.cpu, a.memory, a.gpu)),
            value(a.priority.to_string(), a.priority.tone()),
            value(format!("  {:?}", a.status), Tone::Muted),
        ]));
    }
    lines.push(heading("History"));
    for p in &s.history {
        lines.push(Line::from(vec![
            value(format!("  {} ", p.time), Tone::Muted),
            plain(format!(
                "cpu {:>3}  mem {:>3}  gpu {:>3}  tokens {:.1}M",
                p.cpu,
                p.memory,
                p.gpu,
                p.tokens
            )),
        ]));
    }
    lines
}

fn routing_lines(s: &Routing) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            label("Total tasks"),
            plain(s.stats.total_tasks.to_string()),
            label("Accuracy"),
            value(pct(s.stats.routing_accuracy), score_tone(s.stats.routing_accuracy)),
            label("Load balance"),
            value(pct(s.stats.load_balance_score), score_tone(s.stats.load_balance_score)),
            label("Throughput"),
            plain(format!("{:.1}/h", s.stats.task_throughput)),
        ]),
        heading("Task Queue"),
    ];
    for t in &s.tasks {
        lines.push(Line::from(vec![
            value(format!("  {:<8}", t.id), Tone::Muted),
            plain(format!("{:<22}", t.kind)),
            value(format!("{:<9}", t.priority.to_string()), t.priority.tone()),
            plain(complexity_bar(t.complexity)),
            value(format!("  {:<11}", t.status.to_string()), t.status.tone()),
            plain(format!("{:>5.1}%  {}", t.progress, t.assigned_agent)),
        ]));
    }
    lines.push(heading("Agent Workload"));
    for w in &s.workload {
        lines.push(Line::from(vec![
            label(&w.agent),
            plain(format!("{} active  {} queued  ", w.active, w.queued)),
            value(format!("cap {}", pct(w.capacity)), load_tone(w.capacity)),
            value(format!("  eff {}", pct(w.efficiency)), efficiency_tone(w.efficiency)),
        ]));
    }
    lines
}

fn network_lines(s: &Network) -> Vec<Line<'static>> {
    let m = &s.metrics;
    let mut lines = vec![
        Line::from(vec![
            label("Nodes"),
            plain(m.total_nodes.to_string()),
            label("Connections"),
            plain(m.active_connections.to_string()),
            label("Efficiency"),
            value(pct(m.network_efficiency), efficiency_tone(m.network_efficiency)),
            label("Load"),
            value(pct(m.network_load), load_tone(m.network_load)),
            label("Latency"),
            plain(format!("{:.1}ms", m.average_latency)),
        ]),
        heading("Agents"),
    ];
    for n in &s.nodes {
        lines.push(Line::from(vec![
            label(&n.name),
            value(format!("{:?}", n.status), Tone::Info),
            plain(format!("  {}  ", n.role)),
            value(format!("load {}", pct(n.workload)), load_tone(n.workload)),
        ]));
    }
    lines.push(heading("Collaborations"));
    for t in &s.tasks {
        lines.push(Line::from(vec![
            label(&t.name),
            value(format!("{:?}", t.status), Tone::Info),
            plain(format!("  {:.0}%  {}", t.progress, t.participants.join(", "))),
        ]));
    }
    lines.push(heading("Flows"));
    for f in &s.flows {
        lines.push(Line::from(vec![
            plain(format!(
                "  {} → {}  {}  vol {}  {:.0}ms",
                f.from,
                f.to,
                f.kind,
                f.volume,
                f.latency
            )),
        ]));
    }
    lines
}

fn recovery_lines(s: &Recovery) -> Vec<Line<'static>> {
    let st = &s.stats;
    let mut lines = vec![
        Line::from(vec![
            label("Errors 24h"),
            plain(format!("{:.0}", st.total_errors_24h)),
            label("Recovery rate"),
            value(pct(st.recovery_rate), score_tone(st.recovery_rate)),
            label("Uptime"),
            value(format!("{:.2}%", st.system_uptime), score_tone(st.system_uptime)),
            label("Resilience"),
            value(pct(st.resilience_score), score_tone(st.resilience_score)),
        ]),
        heading("Error Scenarios"),
    ];
    for e in s.scenarios.iter() {
        lines.push(Line::from(vec![
            value(format!("  {} ", e.id), Tone::Muted),
            value(format!("{:<8}", e.severity.to_string()), e.severity.tone()),
            plain(format!("{}  ", e.description)),
            value(e.status.to_string(), e.status.tone()),
            value(format!("  {}", e.last_occurred), Tone::Muted),
        ]));
    }
    lines.push(heading("Chaos Drills"));
    for d in &s.drills {
        lines.push(Line::from(vec![
            label(&d.scenario),
            value(format!("{:?}", d.result), Tone::Info),
            plain(format!("  p={:.0}%  {}", d.probability, d.recovery_time)),
        ]));
    }
    lines
}

fn forecast_lines(s: &Forecast) -> Vec<Line<'static>> {
    let p = &s.predictions;
    let mut lines = vec![
        kv("Next hour tasks", format!("{:.0}", p.next_hour_tasks), Tone::Info),
        kv("Peak load", p.peak_load_time.clone(), Tone::Warn),
        kv("Error probability", pct(p.error_probability), error_rate_tone(p.error_probability)),
        kv(
            "Resource efficiency",
            pct(p.resource_efficiency),
            efficiency_tone(p.resource_efficiency),
        ),
        heading("Trend"),
    ];
    let mut previous: Option<f64> = None;
    for t in &s.trend {
        let dir = previous.map(|prev| trend_arrow(t.tasks, prev));
        previous = Some(t.tasks);
        let mut spans = vec![
            value(format!("  {:<6}", t.period), Tone::Muted),
            plain(format!(
                "tasks {:>5.1}  eff {:>5.1}  err {:>4.1}  load {:>5.1} ",
                t.tasks,
                t.efficiency,
                t.errors,
                t.load
            )),
        ];
        if let Some(dir) = dir {
            spans.push(value(dir.arrow(), dir.tone()));
        }
        lines.push(Line::from(spans));
    }
    lines.push(heading("Scenarios"));
    for sc in &s.scenarios {
        lines.push(Line::from(vec![
            label(&sc.name),
            plain(format!("{:.0}%  {}", sc.probability, sc.outcome)),
        ]));
    }
    lines
}

fn knowledge_lines(s: &Knowledge) -> Vec<Line<'static>> {
    let st = &s.stats;
    let mut lines = vec![
        Line::from(vec![
            label("Nodes"),
            plain(st.total_nodes.to_string()),
            label("Connections"),
            plain(st.active_connections.to_string()),
            label("Transfer"),
            value(pct(st.transfer_efficiency), efficiency_tone(st.transfer_efficiency)),
            label("Coherence"),
            value(pct(st.semantic_coherence), score_tone(st.semantic_coherence)),
        ]),
        heading("Concepts"),
    ];
    for n in &s.nodes {
        lines.push(Line::from(vec![
            label(&n.label),
            plain(format!("{} links  strength {:.1}  ", n.connections, n.strength)),
            value(format!("conf {}", pct(n.confidence)), score_tone(n.confidence)),
        ]));
    }
    lines.push(heading("Clusters"));
    for c in &s.clusters {
        lines.push(Line::from(vec![
            label(&c.name),
            plain(format!(
                "{} nodes  coherence {:.1}  growth {:+.1}%",
                c.nodes,
                c.coherence,
                c.growth_rate
            )),
        ]));
    }
    lines
}

fn scaling_lines(s: &Scaling) -> Vec<Line<'static>> {
    let c = &s.capacity;
    let mut lines = vec![
        Line::from(vec![
            label("Agents"),
            plain(format!("{}/{}", c.current_agents, c.max_agents)),
            label("Utilization"),
            value(pct(c.utilization_rate), load_tone(c.utilization_rate)),
            label("Scaling efficiency"),
            value(pct(c.scaling_efficiency), efficiency_tone(c.scaling_efficiency)),
        ]),
        heading("Rules"),
    ];
    for r in &s.rules {
        lines.push(Line::from(vec![
            label(&r.name),
            value(r.priority.to_string(), r.priority.tone()),
            plain(format!("  {:?}  {}  ", r.status, r.condition)),
            value(pct(r.success_rate), score_tone(r.success_rate)),
        ]));
    }
    lines.push(heading("Recent Events"));
    for e in s.events.iter() {
        lines.push(Line::from(vec![
            value(format!("  {} ", e.timestamp), Tone::Muted),
            plain(format!("{}  {}  {}  {}", e.event, e.result, e.impact, e.cost)),
        ]));
    }
    lines.push(kv(
        "Next scale event",
        format!("{} ({:.0}%)", s.prediction.next_scale_event, s.prediction.probability),
        Tone::Info,
    ));
    lines
}

fn comms_lines(s: &Comms) -> Vec<Line<'static>> {
    let st = &s.stats;
    let mut lines = vec![
        Line::from(vec![
            label("Messages"),
            plain(st.total_messages.to_string()),
            label("Connections"),
            plain(st.active_connections.to_string()),
            label("Bandwidth"),
            value(pct(st.bandwidth_usage), load_tone(st.bandwidth_usage)),
            label("Latency"),
            plain(format!("{:.0}ms", st.latency)),
        ]),
        heading("Message Feed"),
    ];
    for m in s.feed.iter() {
        lines.push(Line::from(vec![
            value(format!("  {} ", m.time), Tone::Muted),
            value(format!("{:?} ", m.kind), Tone::Info),
            plain(format!("{} → {}: {}", m.from, m.to, m.message)),
        ]));
    }
    lines
}

fn collab_lines(s: &Collab) -> Vec<Line<'static>> {
    let m = &s.metrics;
    let mut lines = vec![
        Line::from(vec![
            label("Sessions"),
            plain(format!("{} ({} active)", m.total_sessions, m.active_now)),
            label("Consensus"),
            value(pct(m.average_consensus), score_tone(m.average_consensus)),
            label("Innovation"),
            plain(format!("{:.1}", m.innovation_index)),
        ]),
        heading("Sessions"),
    ];
    for ses in &s.sessions {
        lines.push(Line::from(vec![
            label(&ses.title),
            value(format!("{:?}", ses.status), ses.status.tone()),
            plain(format!("  {:.0}%  {}", ses.progress, ses.current_phase)),
        ]));
    }
    lines.push(heading("Decisions"));
    for d in s.decisions.iter() {
        lines.push(Line::from(vec![
            value(format!("  {} ", d.timestamp), Tone::Muted),
            plain(format!("{}  ", d.decision)),
            value(d.impact.to_string(), d.impact.tone()),
        ]));
    }
    lines
}

fn learning_lines(s: &Learning) -> Vec<Line<'static>> {
    let mut lines = vec![heading("Capabilities")];
    for c in &s.capabilities {
        let progress = progress_percentage(c.current, c.target);
        lines.push(Line::from(vec![
            label(&c.name),
            value(format!("{:.1}/{:.0}", c.current, c.target), score_tone(progress)),
            plain(format!("  growth {:+.1}%  {:?}", c.growth, c.category)),
        ]));
    }
    lines.push(heading("Milestones"));
    for m in &s.milestones {
        lines.push(Line::from(vec![
            value(format!("  {} ", m.date), Tone::Muted),
            plain(format!("{}  ({})", m.achievement, m.impact)),
        ]));
    }
    lines
}

fn analytics_lines(s: &Analytics) -> Vec<Line<'static>> {
    let m = &s.metrics;
    let mut lines = vec![
        Line::from(vec![
            label("Insights"),
            plain(format!("{} ({} actionable)", m.total_insights, m.actionable_insights)),
            label("Confidence"),
            value(pct(m.average_confidence), score_tone(m.average_confidence)),
            label("Automation"),
            plain(pct(m.automation_level)),
        ]),
        heading("Insights"),
    ];
    for i in s.insights.iter() {
        lines.push(Line::from(vec![
            value(format!("  {} ", i.id), Tone::Muted),
            plain(format!("{}  ", i.title)),
            value(i.impact.to_string(), i.impact.tone()),
            value(format!("  {}", i.trend), i.trend.tone()),
        ]));
    }
    lines.push(heading("Models"));
    for md in &s.models {
        lines.push(Line::from(vec![
            label(&md.name),
            value(pct(md.accuracy), score_tone(md.accuracy)),
            plain(format!("  {:?}", md.status)),
        ]));
    }
    lines.push(heading("Optimization Targets"));
    for t in &s.targets {
        lines.push(Line::from(vec![
            label(&t.target),
            plain(format!("{:.1} → {:.1}  ", t.current_value, t.optimized_value)),
            value(t.priority.to_string(), t.priority.tone()),
        ]));
    }
    lines
}

fn pipeline_lines(s: &Pipeline) -> Vec<Line<'static>> {
    let m = &s.metrics;
    let t = &s.transcriber;
    let mut lines = vec![
        Line::from(vec![
            label("Videos"),
            plain(m.total_videos.to_string()),
            label("Today"),
            plain(m.processed_today.to_string()),
            label("Success"),
            value(pct(m.success_rate), score_tone(m.success_rate)),
            label("Accuracy"),
            value(pct(m.average_accuracy), score_tone(m.average_accuracy)),
        ]),
        Line::from(vec![
            label("Transcription"),
            value(t.api_status.clone(), Tone::Good),
            plain(format!(
                "  {:.1}ms  credits {}/{}",
                t.response_time,
                t.credits_remaining,
                t.monthly_quota
            )),
        ]),
        heading("Stages"),
    ];
    for st in &s.stages {
        lines.push(Line::from(vec![
            label(&st.stage),
            plain(format!("{}  {}  ", st.processed_count, st.avg_time)),
            value(pct(st.success_rate), score_tone(st.success_rate)),
        ]));
    }
    lines.push(heading("Activity"));
    for a in s.activity.iter() {
        lines.push(Line::from(vec![
            value(format!("  {} ", a.time), Tone::Muted),
            plain(a.event.clone()),
        ]));
    }
    lines
}

fn overview_lines(s: &Overview) -> Vec<Line<'static>> {
    let st = &s.stats;
    let mut lines = vec![
        Line::from(vec![
            label("Mission time"),
            value(s.mission_time.clone(), Tone::Info),
            label("Tasks completed"),
            plain(st.tasks_completed.to_string()),
            label("Tokens"),
            plain(st.tokens_processed.to_string()),
        ]),
        Line::from(vec![
            label("Success"),
            value(pct(st.success_rate), score_tone(st.success_rate)),
            label("Avg time"),
            plain(format!("{:.0}s", st.avg_processing_time)),
            label("Learning"),
            value(pct(st.learning_progress), score_tone(st.learning_progress)),
            label("Quality"),
            value(pct(st.quality_score), score_tone(st.quality_score)),
        ]),
        heading("Agents"),
    ];
    for a in &s.agents {
        lines.push(Line::from(vec![
            label(&a.name),
            value(a.status.to_string(), a.status.tone()),
            value(format!("  {}", pct(a.efficiency)), efficiency_tone(a.efficiency)),
            plain(format!("  {} today  {}", a.tasks_today, a.current_task)),
            value(format!("  ({})", a.last_activity), Tone::Muted),
        ]));
    }
    lines.push(heading("Cognitive Metrics"));
    for m in &s.cognitive {
        lines.push(Line::from(vec![
            label(&m.name),
            value(pct(m.value), score_tone(m.value)),
            value(format!("  {}", m.trend), Tone::Good),
        ]));
    }
    lines.push(heading("Task Queues"));
    for q in &s.queues {
        lines.push(Line::from(vec![
            label(&q.category),
            plain(format!(
                "{} pending  {} active  {} done  avg {}  ",
                q.pending, q.active, q.completed, q.avg_time
            )),
            value(q.priority.to_string(), q.priority.tone()),
        ]));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use mc_panels::PanelKind;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn every_panel_renders() {
        for kind in PanelKind::ALL {
            let lines = panel_lines(&PanelState::seed(kind));
            assert!(!lines.is_empty(), "{kind} rendered nothing");
        }
    }

    #[test]
    fn overview_lists_roster_and_queues() {
        let lines = panel_lines(&PanelState::seed(PanelKind::Overview));
        let body: Vec<String> = lines.iter().map(text).collect();
        assert!(body.iter().any(|l| l.contains("Tasks completed: 847")));
        assert!(body.iter().any(|l| l.contains("Communication Agent") && l.contains("standby")));
        assert!(body.iter().any(|l| l.contains("Communication") && l.contains("paused")));
    }

    #[test]
    fn routing_rows_show_complexity_meter() {
        let lines = panel_lines(&PanelState::seed(PanelKind::Routing));
        assert!(lines.iter().any(|l| text(l).contains('▮')));
    }
}

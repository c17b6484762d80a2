use std::time::Duration;

use mc_panels::panels::{learning, overview, realtime, resources, routing};
use mc_panels::presentation::{
    complexity_bar, efficiency_tone, error_rate_tone, load_tone, progress_percentage, score_tone,
    trend_arrow, Direction,
};
use mc_panels::{MissionStatus, PanelKind, PanelState, Priority, Tone, Toned};
use mc_sim::{SimRng, SimulatedStore, StoreOptions, StoreStatus};

fn run(kind: PanelKind, seed: u64, ticks: usize) -> Vec<PanelState> {
    let mut rng = SimRng::seeded(seed);
    let mut state = PanelState::seed(kind);
    let mut seen = Vec::with_capacity(ticks);
    for _ in 0..ticks {
        state = state.advance(&mut rng);
        seen.push(state.clone());
    }
    seen
}

#[test]
fn test_same_seed_replays_every_panel() {
    for kind in PanelKind::ALL {
        assert_eq!(run(kind, 7, 40), run(kind, 7, 40), "panel {kind} diverged");
    }
}

#[test]
fn test_advance_preserves_kind() {
    let mut rng = SimRng::seeded(3);
    for kind in PanelKind::ALL {
        let state = PanelState::seed(kind).advance(&mut rng);
        assert_eq!(state.kind(), kind);
    }
}

#[test]
fn test_learning_progress_is_monotone_until_target() {
    let mut rng = SimRng::seeded(11);
    let mut s = learning::seed();
    for _ in 0..300 {
        let before = s.clone();
        s = learning::next(&s, &mut rng);
        for (old, new) in before.capabilities.iter().zip(s.capabilities.iter()) {
            assert!(new.current >= old.current);
            assert!(new.current <= new.target);
        }
    }
}

#[test]
fn test_extreme_draws_pin_vitals_to_bounds() {
    let mut hi = SimRng::scripted([1.0]);
    let mut lo = SimRng::scripted([0.0]);
    let mut up = realtime::seed();
    let mut down = realtime::seed();
    for _ in 0..200 {
        up = realtime::next(&up, &mut hi);
        down = realtime::next(&down, &mut lo);
    }
    assert_eq!(up.vitals.cpu_usage, 90.0);
    assert_eq!(up.vitals.temperature, 65.0);
    assert_eq!(down.vitals.cpu_usage, 10.0);
    assert_eq!(down.vitals.memory_usage, 30.0);
    assert_eq!(down.vitals.network_latency, 5.0);
}

#[test]
fn test_overview_task_count_grows_by_at_most_one() {
    let mut rng = SimRng::seeded(17);
    let mut s = overview::seed();
    let mut completions = 0;
    for _ in 0..600 {
        let before = s.stats.tasks_completed;
        s = overview::next(&s, &mut rng);
        let step = s.stats.tasks_completed - before;
        assert!(step <= 1);
        completions += step;
        assert!(s.stats.learning_progress >= 78.5);
    }
    assert_eq!(s.stats.tasks_completed, 847 + completions);
    // roughly 30% of ticks complete a task
    assert!((100..=260).contains(&completions), "completions {completions}");
    assert_eq!(s.ticks, 600);
}

#[test]
fn test_resource_usage_stays_in_bounds() {
    let mut rng = SimRng::seeded(99);
    let mut s = resources::seed();
    for _ in 0..1_000 {
        s = resources::next(&s, &mut rng);
        assert!(resources::CPU_USAGE.bounds.contains(s.cpu.usage));
        assert!(resources::GPU_USAGE.bounds.contains(s.gpu.usage));
        assert!(resources::TOKEN_RATE.bounds.contains(s.tokens.rate));
        assert!(s.tokens.used <= s.tokens.limit);
        assert!(s.history.len() <= resources::HISTORY_WINDOW);
    }
}

#[test]
fn test_event_logs_never_exceed_capacity() {
    let mut rng = SimRng::seeded(5);
    let mut states: Vec<PanelState> =
        PanelKind::ALL.iter().map(|k| PanelState::seed(*k)).collect();
    for _ in 0..500 {
        for state in states.iter_mut() {
            *state = state.advance(&mut rng);
            match state {
                PanelState::Realtime(s) => assert!(s.timeline.len() <= 10),
                PanelState::Recovery(s) => assert!(s.scenarios.len() <= 5),
                PanelState::Scaling(s) => assert!(s.events.len() <= 4),
                PanelState::Comms(s) => assert!(s.feed.len() <= 5),
                PanelState::Collab(s) => assert!(s.decisions.len() <= 3),
                PanelState::Analytics(s) => assert!(s.insights.len() <= 4),
                PanelState::Pipeline(s) => assert!(s.activity.len() <= 5),
                PanelState::Forecast(s) => assert!(s.trend.len() <= 7),
                PanelState::Resources(s) => assert!(s.history.len() <= 6),
                _ => {}
            }
        }
    }
}

#[test]
fn test_routing_tasks_eventually_complete() {
    let mut rng = SimRng::seeded(21);
    let mut s = routing::seed();
    for _ in 0..400 {
        let before = s.clone();
        s = routing::next(&s, &mut rng);
        for (old, new) in before.tasks.iter().zip(s.tasks.iter()) {
            assert!(new.progress >= old.progress, "task {} regressed", new.id);
            assert!(new.progress <= 100.0);
            if old.status == routing::TaskStatus::Completed {
                assert_eq!(new.status, routing::TaskStatus::Completed);
            }
        }
    }
    let live = s.count(routing::TaskStatus::Processing) + s.count(routing::TaskStatus::Queued);
    assert_eq!(live, 0);
}

#[test]
fn test_mission_status_health_bounds() {
    let mut rng = SimRng::seeded(8);
    let mut s = MissionStatus::seed().with_content(27);
    for _ in 0..500 {
        s = s.next(&mut rng);
        assert!((90.0..=99.0).contains(&s.system_health));
    }
    assert_eq!(s.content_processed, 27);
    assert_eq!(s.ticks, 500);
}

#[test]
fn test_presentation_thresholds() {
    assert_eq!(score_tone(90.0), Tone::Good);
    assert_eq!(score_tone(89.9), Tone::Warn);
    assert_eq!(score_tone(69.9), Tone::Bad);
    assert_eq!(error_rate_tone(2.0), Tone::Good);
    assert_eq!(error_rate_tone(5.0), Tone::Warn);
    assert_eq!(error_rate_tone(5.1), Tone::Bad);
    assert_eq!(load_tone(80.0), Tone::Bad);
    assert_eq!(load_tone(60.0), Tone::Warn);
    assert_eq!(load_tone(59.0), Tone::Good);
    assert_eq!(efficiency_tone(75.0), Tone::Warn);
    assert_eq!(Priority::Critical.tone(), Tone::Bad);
    assert_eq!(routing::TaskStatus::Pending.tone(), Tone::Muted);
}

#[test]
fn test_trend_and_progress_helpers() {
    assert_eq!(trend_arrow(106.0, 100.0), Direction::Rising);
    assert_eq!(trend_arrow(105.0, 100.0), Direction::Stable);
    assert_eq!(trend_arrow(94.0, 100.0), Direction::Falling);
    assert_eq!(Direction::Falling.arrow(), "↓");
    assert_eq!(progress_percentage(45.0, 90.0), 50.0);
    assert_eq!(progress_percentage(3.0, 0.0), 0.0);
    assert_eq!(complexity_bar(3), "▮▮▮▯▯▯▯▯▯▯");
    assert_eq!(complexity_bar(12).chars().filter(|c| *c == '▮').count(), 10);
}

#[test]
fn test_snapshot_is_tagged_by_panel() {
    let json = serde_json::to_value(PanelState::seed(PanelKind::Agents)).unwrap();
    assert_eq!(json["panel"], "agents");
    assert_eq!(json["state"]["task_queue"], 15);

    let json = serde_json::to_value(PanelState::seed(PanelKind::Pipeline)).unwrap();
    assert_eq!(json["panel"], "pipeline");
    assert_eq!(json["state"]["metrics"]["total_videos"], 11);

    let json = serde_json::to_value(PanelState::seed(PanelKind::Overview)).unwrap();
    assert_eq!(json["panel"], "overview");
    assert_eq!(json["state"]["stats"]["tasks_completed"], 847);
    assert_eq!(json["state"]["queues"][3]["priority"], "paused");
}

#[tokio::test(start_paused = true)]
async fn test_panel_state_mounts_in_store() {
    let kind = PanelKind::Agents;
    let store = SimulatedStore::spawn(
        PanelState::seed(kind),
        |prev: &PanelState, rng: &mut SimRng| Ok(prev.advance(rng)),
        SimRng::seeded(1),
        StoreOptions::new(kind.id(), kind.default_interval()),
    );

    tokio::time::sleep(Duration::from_millis(6_500)).await;
    assert_eq!(store.ticks(), 3);

    let expected = run(kind, 1, 3).pop().unwrap();
    assert_eq!(store.current().await, expected);

    store.stop();
    assert_eq!(store.status(), StoreStatus::Stopped);
}

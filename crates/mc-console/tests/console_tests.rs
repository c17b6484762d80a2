use std::time::Duration;

use mc_console::config::{Config, ConfigError};
use mc_console::content_library::{self, RECENT_LIMIT};
use mc_console::headless::{run_headless, Selection};
use mc_console::host::{MountSettings, PanelHost};
use mc_panels::PanelKind;
use mc_sim::{SimError, StoreFault};

// ─── Configuration ───────────────────────────────────────────────────────────

#[test]
fn test_config_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[simulation]
seed = 42

[panels.intervals_ms]
agents = 500

[console]
default_panel = "routing"

[content]
library_dir = "/srv/library"
"#,
    )
    .unwrap();

    let config = Config::load(Some(path.as_path())).unwrap();
    assert_eq!(config.simulation.seed, Some(42));
    assert_eq!(config.interval_for(PanelKind::Agents), Duration::from_millis(500));
    assert_eq!(config.interval_for(PanelKind::Routing), Duration::from_secs(4));
    assert_eq!(config.default_panel().unwrap(), PanelKind::Routing);
    assert_eq!(config.console.frame_rate_ms, 100);
    assert_eq!(config.console.log_level, "info");
    assert_eq!(
        config.content.library_dir.as_deref(),
        Some(std::path::Path::new("/srv/library"))
    );
}

#[test]
fn test_config_rejects_unknown_panel_and_zero_interval() {
    let dir = tempfile::tempdir().unwrap();

    let unknown = dir.path().join("unknown.toml");
    std::fs::write(&unknown, "[panels.intervals_ms]\nwarp = 1000\n").unwrap();
    assert!(matches!(Config::load(Some(unknown.as_path())), Err(ConfigError::Invalid(_))));

    let zero = dir.path().join("zero.toml");
    std::fs::write(&zero, "[panels.intervals_ms]\ncomms = 0\n").unwrap();
    assert!(matches!(Config::load(Some(zero.as_path())), Err(ConfigError::Invalid(_))));

    let panel = dir.path().join("panel.toml");
    std::fs::write(&panel, "[console]\ndefault_panel = \"bridge\"\n").unwrap();
    assert!(matches!(Config::load(Some(panel.as_path())), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_config_errors_name_the_file() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.toml");
    match Config::load(Some(missing.as_path())) {
        Err(ConfigError::Io { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected Io error, got {other:?}"),
    }

    let broken = dir.path().join("broken.toml");
    std::fs::write(&broken, "[simulation\nseed = ").unwrap();
    match Config::load(Some(broken.as_path())) {
        Err(ConfigError::Parse { path, .. }) => assert_eq!(path, broken),
        other => panic!("expected Parse error, got {other:?}"),
    }
}

// ─── Content library ─────────────────────────────────────────────────────────

#[test]
fn test_library_count_read_from_markdown() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(content_library::LIBRARY_FILE),
        "# Content Library\n\nTotal videos processed: 23\n",
    )
    .unwrap();
    assert_eq!(content_library::read_total_videos(dir.path()), 23);
}

#[test]
fn test_library_count_defaults_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(content_library::read_total_videos(dir.path()), 11);

    std::fs::write(dir.path().join(content_library::LIBRARY_FILE), "no count yet").unwrap();
    assert_eq!(content_library::read_total_videos(dir.path()), 11);
}

#[test]
fn test_recent_models_filters_and_limits() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..7 {
        let path = dir.path().join(format!("content_model_{i}.txt"));
        std::fs::write(path, "x".repeat(i + 1)).unwrap();
    }
    std::fs::write(dir.path().join("content_model_draft.md"), "skip").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "skip").unwrap();
    std::fs::create_dir(dir.path().join("content_model_dir.txt")).unwrap();

    let recent = content_library::recent_models(dir.path());
    assert_eq!(recent.len(), RECENT_LIMIT);
    assert!(recent
        .iter()
        .all(|m| m.name.starts_with("content_model_") && m.name.ends_with(".txt")));
    assert!(recent.windows(2).all(|w| w[0].modified >= w[1].modified));

    let summary = content_library::summarize(dir.path());
    assert_eq!(summary.total_videos, 11);
    assert_eq!(summary.recent, recent);
}

#[test]
fn test_recent_models_empty_for_missing_dir() {
    let dir = tempfile::tempdir().unwrap();
    assert!(content_library::recent_models(&dir.path().join("gone")).is_empty());
}

// ─── Headless mode ───────────────────────────────────────────────────────────

fn seeded_host(seed: u64) -> PanelHost {
    PanelHost::new(MountSettings {
        seed: Some(seed),
        ..MountSettings::default()
    })
}

#[tokio::test(start_paused = true)]
async fn test_headless_prints_one_line_per_tick() {
    let mut host = seeded_host(9);
    let mut out = Vec::new();
    run_headless(&mut host, Selection::One(PanelKind::Agents), 3, &mut out)
        .await
        .unwrap();

    let lines: Vec<serde_json::Value> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);
    for (i, line) in lines.iter().enumerate() {
        assert_eq!(line["panel"], "agents");
        assert_eq!(line["tick"], i as u64 + 1);
    }
}

#[tokio::test(start_paused = true)]
async fn test_headless_is_replayable_with_seed() {
    let mut first = Vec::new();
    let mut second = Vec::new();
    run_headless(&mut seeded_host(5), Selection::One(PanelKind::Routing), 2, &mut first)
        .await
        .unwrap();
    run_headless(&mut seeded_host(5), Selection::One(PanelKind::Routing), 2, &mut second)
        .await
        .unwrap();
    assert_eq!(first, second);
}

#[tokio::test(start_paused = true)]
async fn test_headless_all_covers_every_panel() {
    let mut host = seeded_host(1);
    let mut out = Vec::new();
    run_headless(&mut host, Selection::All, 1, &mut out).await.unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), PanelKind::ALL.len());
    for kind in PanelKind::ALL {
        assert!(text.contains(&format!("\"panel\":\"{}\"", kind.id())), "missing {kind}");
    }
}

#[tokio::test(start_paused = true)]
async fn test_headless_fault_is_an_error() {
    let mut host = seeded_host(1);
    host.fault_sender()
        .send(StoreFault {
            store: "agents".into(),
            ticks: 0,
            error: SimError::update("queue underflow"),
        })
        .unwrap();

    let mut out = Vec::new();
    let err = run_headless(&mut host, Selection::One(PanelKind::Agents), 3, &mut out)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("queue underflow"));
}

//! Mission Control binary.
//!
//! Without flags it opens the terminal console. `--headless` prints JSON
//! snapshots instead and `--serve` exposes them over HTTP.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mc_console::config::Config;
use mc_console::content_library;
use mc_console::headless::{self, Selection};
use mc_console::host::{MountSettings, PanelHost};
use mc_console::serve::SnapshotServer;
use mc_panels::panels::pipeline::DEFAULT_TOTAL_VIDEOS;
use mc_panels::PanelKind;

#[derive(Parser, Debug)]
#[command(name = "mission-control", version, about = "Simulated telemetry dashboard")]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fixed random seed for every panel store.
    #[arg(long)]
    seed: Option<u64>,

    /// Panel to open with (panel id, or `all` in headless mode).
    #[arg(long)]
    panel: Option<String>,

    /// Print JSON snapshots instead of opening the console.
    #[arg(long, conflicts_with = "serve")]
    headless: bool,

    /// Snapshots to print per panel in headless mode.
    #[arg(long, default_value_t = 5, requires = "headless")]
    ticks: u64,

    /// Serve snapshots over HTTP on this address.
    #[arg(long, value_name = "ADDR")]
    serve: Option<SocketAddr>,

    /// Log file for console mode.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

enum Mode {
    Console,
    Headless,
    Serve(SocketAddr),
}

impl Cli {
    fn mode(&self) -> Mode {
        match (self.headless, self.serve) {
            (true, _) => Mode::Headless,
            (false, Some(addr)) => Mode::Serve(addr),
            (false, None) => Mode::Console,
        }
    }
}

fn default_log_file() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("mission-control")
        .join("console.log")
}

/// File logging for the console so the alternate screen stays clean,
/// stderr otherwise.
fn init_tracing(level: &str, log_file: Option<PathBuf>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    match log_file {
        Some(path) => {
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("creating log directory {}", dir.display()))?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(std::sync::Mutex::new(file)),
                )
                .init();
        }
        None => {
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        config.simulation.seed = Some(seed);
    }
    let mode = cli.mode();

    let log_file = match mode {
        Mode::Console => Some(cli.log_file.clone().unwrap_or_else(default_log_file)),
        _ => cli.log_file.clone(),
    };
    init_tracing(&config.console.log_level, log_file)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        seed = ?config.simulation.seed,
        "Mission Control starting"
    );

    let total_videos = match &config.content.library_dir {
        Some(dir) => {
            let summary = content_library::summarize(dir);
            for model in &summary.recent {
                tracing::info!(
                    name = %model.name,
                    size = model.size,
                    modified = %model.modified,
                    "Recent content model"
                );
            }
            summary.total_videos
        }
        None => DEFAULT_TOTAL_VIDEOS,
    };
    let mut host = PanelHost::new(MountSettings::from_config(&config, total_videos));

    match mode {
        Mode::Headless => {
            let selection: Selection = match &cli.panel {
                Some(panel) => panel.parse()?,
                None => Selection::One(config.default_panel()?),
            };
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            headless::run_headless(&mut host, selection, cli.ticks, &mut out).await?;
        }
        Mode::Serve(addr) => {
            SnapshotServer::new(addr, host).run().await?;
        }
        Mode::Console => {
            let panel: PanelKind = match &cli.panel {
                Some(panel) => panel.parse()?,
                None => config.default_panel()?,
            };
            mc_console::console::run_console(host, panel, config.frame_rate()).await?;
        }
    }

    Ok(())
}

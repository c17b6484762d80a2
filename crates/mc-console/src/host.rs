//! Mounts panel stores and collects their faults.
//!
//! Every store the host spawns reports update failures on one shared
//! channel, which the console, headless printer and server drain as their
//! error boundary.

use std::collections::BTreeMap;
use std::time::Duration;

use mc_panels::panels::pipeline::DEFAULT_TOTAL_VIDEOS;
use mc_panels::{status, MissionStatus, PanelKind, PanelState};
use mc_sim::{SimRng, SimulatedStore, StoreFault, StoreOptions};
use tokio::sync::mpsc;

use crate::config::Config;

pub type PanelStore = SimulatedStore<PanelState>;
pub type StatusStore = SimulatedStore<MissionStatus>;

/// Store name of the mission status header.
pub const STATUS_STORE: &str = "status";

/// What a mount needs to know, resolved once from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct MountSettings {
    pub seed: Option<u64>,
    pub intervals: BTreeMap<PanelKind, Duration>,
    pub total_videos: u32,
}

impl MountSettings {
    pub fn from_config(config: &Config, total_videos: u32) -> Self {
        Self {
            seed: config.simulation.seed,
            intervals: PanelKind::ALL
                .iter()
                .map(|k| (*k, config.interval_for(*k)))
                .collect(),
            total_videos,
        }
    }

    pub fn interval(&self, kind: PanelKind) -> Duration {
        self.intervals
            .get(&kind)
            .copied()
            .unwrap_or_else(|| kind.default_interval())
    }

    /// Per-store random source. With a fixed seed each store gets its own
    /// stream so remounting a panel replays it from the start.
    fn rng_for(&self, slot: usize) -> SimRng {
        SimRng::from_seed_option(self.seed.map(|s| s.wrapping_add(slot as u64)))
    }
}

impl Default for MountSettings {
    fn default() -> Self {
        Self {
            seed: None,
            intervals: BTreeMap::new(),
            total_videos: DEFAULT_TOTAL_VIDEOS,
        }
    }
}

pub struct PanelHost {
    settings: MountSettings,
    faults_tx: mpsc::UnboundedSender<StoreFault>,
    faults_rx: mpsc::UnboundedReceiver<StoreFault>,
    mounts: u64,
}

impl PanelHost {
    pub fn new(settings: MountSettings) -> Self {
        let (faults_tx, faults_rx) = mpsc::unbounded_channel();
        Self {
            settings,
            faults_tx,
            faults_rx,
            mounts: 0,
        }
    }

    pub fn settings(&self) -> &MountSettings {
        &self.settings
    }

    /// Applies to stores mounted from now on.
    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.settings.seed = seed;
    }

    /// Total mounts so far, the status header included.
    pub fn mounts(&self) -> u64 {
        self.mounts
    }

    /// Spawn a store for `kind` from fresh seed data. Must run inside a tokio runtime.
    pub fn mount(&mut self, kind: PanelKind) -> PanelStore {
        let interval = self.settings.interval(kind);
        let store = SimulatedStore::spawn(
            PanelState::seed_with(kind, self.settings.total_videos),
            |prev: &PanelState, rng: &mut SimRng| Ok(prev.advance(rng)),
            self.settings.rng_for(kind.index()),
            StoreOptions::new(kind.id(), interval).with_faults(self.faults_tx.clone()),
        );
        self.mounts += 1;
        tracing::info!(
            panel = %kind,
            interval_ms = interval.as_millis() as u64,
            "Panel mounted"
        );
        store
    }

    pub fn mount_all(&mut self) -> BTreeMap<PanelKind, PanelStore> {
        PanelKind::ALL.iter().map(|k| (*k, self.mount(*k))).collect()
    }

    /// Stop `store` and mount a fresh one for `kind`.
    pub fn remount(&mut self, store: &PanelStore, kind: PanelKind) -> PanelStore {
        store.stop();
        tracing::info!(panel = %store.name(), "Panel unmounted");
        self.mount(kind)
    }

    pub fn mount_status(&mut self) -> StatusStore {
        let store = SimulatedStore::spawn(
            MissionStatus::seed().with_content(self.settings.total_videos),
            |prev: &MissionStatus, rng: &mut SimRng| Ok(prev.next(rng)),
            self.settings.rng_for(PanelKind::ALL.len()),
            StoreOptions::new(STATUS_STORE, status::INTERVAL).with_faults(self.faults_tx.clone()),
        );
        self.mounts += 1;
        tracing::info!("Mission status mounted");
        store
    }

    /// A fault that has already arrived, if any.
    pub fn try_fault(&mut self) -> Option<StoreFault> {
        self.faults_rx.try_recv().ok()
    }

    /// Wait for the next fault.
    pub async fn next_fault(&mut self) -> Option<StoreFault> {
        self.faults_rx.recv().await
    }

    /// Sender for stores spawned outside the host.
    pub fn fault_sender(&self) -> mpsc::UnboundedSender<StoreFault> {
        self.faults_tx.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_fall_back_to_default_interval() {
        let settings = MountSettings::default();
        assert_eq!(settings.interval(PanelKind::Learning), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn remount_resets_to_seed() {
        let mut host = PanelHost::new(MountSettings {
            seed: Some(4),
            ..MountSettings::default()
        });
        let store = host.mount(PanelKind::Agents);
        tokio::time::sleep(Duration::from_millis(4_500)).await;
        assert_eq!(store.ticks(), 2);

        let fresh = host.remount(&store, PanelKind::Agents);
        assert!(!store.is_running());
        assert_eq!(fresh.ticks(), 0);
        assert_eq!(fresh.current().await, PanelState::seed(PanelKind::Agents));
        assert_eq!(host.mounts(), 2);
    }
}

//! TOML configuration.
//!
//! Looked up from an explicit `--config` path, then
//! `<config dir>/mission-control/config.toml`, then built-in defaults.
//! Every section is optional.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use mc_panels::PanelKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub panels: PanelsConfig,
    pub console: ConsoleConfig,
    pub content: ContentConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed random seed; absent means entropy.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelsConfig {
    /// Per-panel update period overrides keyed by panel id.
    pub intervals_ms: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub default_panel: String,
    pub frame_rate_ms: u64,
    pub log_level: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            default_panel: PanelKind::Realtime.id().to_string(),
            frame_rate_ms: 100,
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory holding `content_library.md` and `content_model_*.txt`.
    pub library_dir: Option<PathBuf>,
}

impl Config {
    /// `<config dir>/mission-control/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("mission-control").join("config.toml"))
    }

    /// Load from `explicit` if given (it must exist), otherwise from the
    /// default path when present, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::info!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (id, ms) in &self.panels.intervals_ms {
            id.parse::<PanelKind>()
                .map_err(|e| ConfigError::Invalid(format!("panels.intervals_ms: {e}")))?;
            if *ms == 0 {
                return Err(ConfigError::Invalid(format!(
                    "panels.intervals_ms.{id} must be non-zero"
                )));
            }
        }
        self.default_panel()?;
        if self.console.frame_rate_ms == 0 {
            return Err(ConfigError::Invalid(
                "console.frame_rate_ms must be non-zero".into(),
            ));
        }
        Ok(())
    }

    pub fn default_panel(&self) -> Result<PanelKind, ConfigError> {
        self.console
            .default_panel
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("console.default_panel: {e}")))
    }

    /// Configured period for `kind`, or its default.
    pub fn interval_for(&self, kind: PanelKind) -> Duration {
        self.panels
            .intervals_ms
            .get(kind.id())
            .map(|ms| Duration::from_millis(*ms))
            .unwrap_or_else(|| kind.default_interval())
    }

    pub fn frame_rate(&self) -> Duration {
        Duration::from_millis(self.console.frame_rate_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.validate().is_ok());
        assert_eq!(config.interval_for(PanelKind::Scaling), Duration::from_secs(8));
    }

    #[test]
    fn zero_frame_rate_rejected() {
        let mut config = Config::default();
        config.console.frame_rate_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}

//! Mission Control console
//!
//! Hosts panel stores and exposes them three ways: an interactive terminal
//! console, a headless JSON-lines printer and a read-only HTTP snapshot API.

pub mod config;
pub mod console;
pub mod content_library;
pub mod headless;
pub mod host;
pub mod panel_view;
pub mod serve;

pub use config::{Config, ConfigError};
pub use host::{PanelHost, PanelStore, StatusStore};

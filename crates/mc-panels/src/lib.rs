//! Mission Control panels
//!
//! Every panel is a seed record plus a pure update rule. The catalogue in
//! [`catalog`] ties each panel to its id, title and default interval, and
//! [`presentation`] derives display tones from state without touching it.

pub mod catalog;
pub mod clock;
pub mod panels;
pub mod presentation;
pub mod status;
pub mod types;

pub use catalog::{PanelKind, PanelState, UnknownPanel};
pub use presentation::{Tone, Toned};
pub use status::MissionStatus;
pub use types::*;

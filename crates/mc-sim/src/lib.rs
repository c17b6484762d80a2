//! Mission Control simulation core
//!
//! A generic timer-driven store that replaces its state with the output of a
//! pure update rule on every tick, plus the helpers update rules are built
//! from: an injectable random source, clamped drift and bounded event logs.

pub mod bounds;
pub mod error;
pub mod event_log;
pub mod rng;
pub mod store;

pub use bounds::{clamp, Bounds, Drift};
pub use error::SimError;
pub use event_log::{append_window, push, BoundedLog};
pub use rng::{RandomSource, ScriptedSource, SimRng};
pub use store::{SimulatedStore, StoreFault, StoreOptions, StoreStatus, MIN_INTERVAL};

//! One module per dashboard panel.
//!
//! Each exposes `INTERVAL`, its drift constants, a `seed()` record and a total
//! `next(&State, &mut SimRng) -> State` update rule.

pub mod agent_metrics;
pub mod analytics;
pub mod collab;
pub mod comms;
pub mod forecast;
pub mod knowledge;
pub mod learning;
pub mod network;
pub mod overview;
pub mod pipeline;
pub mod realtime;
pub mod recovery;
pub mod resources;
pub mod routing;
pub mod scaling;

//! Headless combat simulator.
//!
//! The `combat-sim` binary is the composition root: it reads configuration
//! from the environment, installs logging, loads content, and runs one
//! encounter with an auto-pilot standing in for the player.
//!
//! - [`config`] reads `COMBAT_*` environment variables
//! - [`logging`] sets up stderr and per-session file logging
//! - [`builder`] turns content into a [`combat_runtime::CombatSession`]
//! - [`autopilot`] and [`presenter`] are the session's collaborators
pub mod autopilot;
pub mod builder;
pub mod config;
pub mod logging;
pub mod presenter;

pub use autopilot::AutoPilot;
pub use builder::{Simulation, SimulationBuilder, SimulationInfo};
pub use config::SimConfig;
pub use presenter::{LogAnimator, spawn_event_log};

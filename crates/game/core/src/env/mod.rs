//! Collaborators the engine consults but never owns: randomness and player
//! settings.
mod rng;
mod settings;

pub use rng::{CombatRng, PcgRng};
pub use settings::{Settings, SpeedSetting};

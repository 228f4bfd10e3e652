//! Session events and the bus that carries them.
mod bus;
mod types;

pub use bus::EventBus;
pub use types::{CombatEvent, Topic};

//! Async orchestration for tactical combat sessions.
//!
//! This crate wires the synchronous rules of `combat-core` to the outside
//! world: player input providers, an animation collaborator, pacing of enemy
//! and hazard decisions, and an event bus. Consumers build a
//! [`CombatSession`], subscribe to its events and await [`CombatSession::run`].
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the turn loop and builder
//! - [`api`] exposes the traits and types downstream clients interact with
//! - [`events`] provides a topic-based event bus
pub mod api;
pub mod events;
pub mod session;

pub use api::{
    Animator, ChannelInput, InstantAnimator, PassInput, PlayerCommand, PlayerInputProvider,
    PlayerView, ProviderKind, RecordingAnimator, Result, RuntimeError, ScriptedInput,
};
pub use events::{CombatEvent, EventBus, Topic};
pub use session::{CancelHandle, CombatSession, SessionBuilder, SessionConfig, SessionReport};

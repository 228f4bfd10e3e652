//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the session driver can stay focused on orchestration.

pub mod animator;
pub mod errors;
pub mod providers;

pub use animator::{Animator, InstantAnimator, RecordingAnimator};
pub use errors::{ProviderKind, Result, RuntimeError};
pub use providers::{
    ChannelInput, PassInput, PlayerCommand, PlayerInputProvider, PlayerView, ScriptedInput,
};

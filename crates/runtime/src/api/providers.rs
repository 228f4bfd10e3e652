//! Asynchronous abstraction for sourcing player intent.
//!
//! Runtime users plug in [`PlayerInputProvider`] implementations so a session
//! can run with human input, scripted fixtures, or an auto-pilot.
use std::collections::VecDeque;

use async_trait::async_trait;
use combat_core::{CombatState, ComboList, Direction, InputMode, Settings};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, mpsc};

use super::errors::{Result, RuntimeError};

/// One player input during the decision window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerCommand {
    /// Pick an ability slot. Directional abilities then wait for a direction.
    Select(usize),
    Direction(Direction),
    /// Bare direction input; dispatches Move when one-click movement is on.
    OneClickMove(Direction),
    /// Leave directional mode.
    Cancel,
    /// Drop the queued combo and restore ability uses.
    Undo,
    /// Close the decision window.
    EndTurn,
}

/// Read-only view of the session handed to the provider.
#[derive(Clone, Copy, Debug)]
pub struct PlayerView<'a> {
    pub state: &'a CombatState,
    pub mode: InputMode,
    pub combo: &'a ComboList,
    pub settings: &'a Settings,
}

/// Trait for providing player commands based on the current combat state.
#[async_trait]
pub trait PlayerInputProvider: Send + Sync {
    async fn next_command(&self, view: PlayerView<'_>) -> Result<PlayerCommand>;
}

/// Ends every turn immediately. Useful for testing or as a fallback.
pub struct PassInput;

#[async_trait]
impl PlayerInputProvider for PassInput {
    async fn next_command(&self, _view: PlayerView<'_>) -> Result<PlayerCommand> {
        Ok(PlayerCommand::EndTurn)
    }
}

/// Replays a fixed list of commands, then passes every turn.
pub struct ScriptedInput {
    commands: Mutex<VecDeque<PlayerCommand>>,
}

impl ScriptedInput {
    pub fn new(commands: impl IntoIterator<Item = PlayerCommand>) -> Self {
        Self {
            commands: Mutex::new(commands.into_iter().collect()),
        }
    }

    pub async fn remaining(&self) -> usize {
        self.commands.lock().await.len()
    }
}

#[async_trait]
impl PlayerInputProvider for ScriptedInput {
    async fn next_command(&self, _view: PlayerView<'_>) -> Result<PlayerCommand> {
        Ok(self
            .commands
            .lock()
            .await
            .pop_front()
            .unwrap_or(PlayerCommand::EndTurn))
    }
}

/// Receives commands from another task, e.g. a UI loop.
pub struct ChannelInput {
    rx: Mutex<mpsc::Receiver<PlayerCommand>>,
}

impl ChannelInput {
    /// Creates the provider together with the sender the UI writes to.
    pub fn channel(buffer: usize) -> (Self, mpsc::Sender<PlayerCommand>) {
        let (tx, rx) = mpsc::channel(buffer);
        (
            Self {
                rx: Mutex::new(rx),
            },
            tx,
        )
    }
}

#[async_trait]
impl PlayerInputProvider for ChannelInput {
    async fn next_command(&self, _view: PlayerView<'_>) -> Result<PlayerCommand> {
        self.rx
            .lock()
            .await
            .recv()
            .await
            .ok_or(RuntimeError::InputChannelClosed)
    }
}

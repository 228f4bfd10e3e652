//! Turn scheduling and action execution.
//!
//! [`CombatEngine`] bundles the authoritative [`CombatState`] with the turn
//! manager, the pending combo list and the executor. Synchronous callers
//! (tests, tools) use its convenience methods; the async runtime drives the
//! same pieces step by step so it can pace schedules and wait on animations.

mod errors;
pub mod executor;
pub mod input;
mod schedule;
pub mod spawner;
mod turns;

pub use errors::{ExecutorError, InputError, TurnError};
pub use executor::{ActionExecutor, AnimationSink, ExecutionStep};
pub use input::{InputMode, PlayerController};
pub use schedule::{DecisionSchedule, DecisionStep, ScheduledStep};
pub use spawner::{Spawn, SpawnRecord};
pub use turns::{CombatOutcome, TurnEnd, TurnManager, TurnPhase};

use crate::action::{CombatAction, ComboList, QueuedAction};
use crate::ai;
use crate::config::CombatConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{CombatState, TurnTaker};

/// Failures surfaced by [`CombatEngine`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error(transparent)]
    Executor(#[from] ExecutorError),
}

impl GameError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            EngineError::Turn(error) => error.severity(),
            EngineError::Executor(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            EngineError::Turn(error) => error.error_code(),
            EngineError::Executor(error) => error.error_code(),
        }
    }
}

/// One encounter's mutable rule state.
#[derive(Clone, Debug)]
pub struct CombatEngine {
    pub state: CombatState,
    pub turns: TurnManager,
    pub combo: ComboList,
    pub executor: ActionExecutor,
    pub controller: PlayerController,
    config: CombatConfig,
}

impl CombatEngine {
    pub fn new(state: CombatState, config: CombatConfig) -> Self {
        Self {
            state,
            turns: TurnManager::new(),
            combo: ComboList::new(),
            executor: ActionExecutor::new(),
            controller: PlayerController::new(),
            config,
        }
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    /// Leaves setup. Encounters without living enemies end immediately.
    pub fn start(&mut self) -> Result<Option<CombatOutcome>, EngineError> {
        self.turns.finish_setup(&self.state)?;
        Ok(self.turns.check_outcome(&self.state))
    }

    pub fn begin_turn(&mut self) -> Result<TurnTaker, EngineError> {
        Ok(self.turns.begin_turn(&mut self.state)?)
    }

    /// Plans the current non-player turn and installs the schedule on the
    /// turn manager.
    pub fn plan_current_turn(&mut self) -> Option<&DecisionSchedule> {
        let taker = self.turns.current().filter(|taker| !taker.is_player())?;
        let schedule = ai::plan_turn(taker.id, &mut self.state, &self.config);
        self.turns.install_schedule(schedule);
        self.turns.schedule()
    }

    pub fn enqueue(&mut self, action: CombatAction) -> &QueuedAction {
        self.combo.push(action)
    }

    pub fn end_decision(&mut self) -> Result<TurnPhase, EngineError> {
        self.controller.cancel();
        Ok(self.turns.end_decision(&self.combo)?)
    }

    /// Drains the combo list and leaves the execution phase unless combat ended.
    pub fn execute(
        &mut self,
        sink: &mut impl AnimationSink,
    ) -> Result<Vec<ExecutionStep>, EngineError> {
        let steps = self.executor.execute(
            &mut self.state,
            &mut self.combo,
            &mut self.turns,
            &self.config,
            sink,
        )?;
        if !self.turns.is_ended() {
            self.turns.finish_execution()?;
        }
        Ok(steps)
    }

    pub fn end_turn(&mut self) -> Result<TurnEnd, EngineError> {
        Ok(self.turns.end_turn(&mut self.state)?)
    }

    /// Plays the installed schedule without pacing, then executes and ends
    /// the turn. Used for non-player turns outside the async runtime.
    pub fn run_scheduled_turn(
        &mut self,
        sink: &mut impl AnimationSink,
    ) -> Result<Vec<ExecutionStep>, EngineError> {
        while let Some(scheduled) = self.turns.next_scheduled_step() {
            match scheduled.step {
                DecisionStep::Enqueue(action) => {
                    self.combo.push(action);
                }
                DecisionStep::EndDecision => break,
            }
        }
        self.finish_turn(sink)
    }

    /// Closes the decision window, drains the combo and ends the turn.
    pub fn finish_turn(
        &mut self,
        sink: &mut impl AnimationSink,
    ) -> Result<Vec<ExecutionStep>, EngineError> {
        let steps = match self.end_decision()? {
            TurnPhase::ExecutingActions => self.execute(sink)?,
            _ => Vec::new(),
        };
        if !self.turns.is_ended() {
            self.end_turn()?;
        }
        Ok(steps)
    }
}

#[cfg(test)]
mod tests;

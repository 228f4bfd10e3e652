//! Sequential combo list drain.

use crate::action::{ActionError, ActionOutcome, AnimationBatch, CombatAction, ComboList};
use crate::config::CombatConfig;
use crate::state::CombatState;

use super::{CombatOutcome, ExecutorError, TurnManager};

/// Receives the animation batch of every executed action.
pub trait AnimationSink {
    fn play(&mut self, batch: &AnimationBatch);
}

impl<F> AnimationSink for F
where
    F: FnMut(&AnimationBatch),
{
    fn play(&mut self, batch: &AnimationBatch) {
        self(batch)
    }
}

/// Result of executing one action from the combo list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionStep {
    pub action: CombatAction,
    /// Stale actions (dead actor, spent canister) come back as errors and
    /// leave state untouched.
    pub outcome: Result<ActionOutcome, ActionError>,
    /// Set when this action ended the combat.
    pub combat_ended: Option<CombatOutcome>,
}

impl ExecutionStep {
    pub fn animations(&self) -> AnimationBatch {
        let cues = match &self.outcome {
            Ok(outcome) => outcome.cues.clone(),
            Err(_) => Vec::new(),
        };
        AnimationBatch::new(self.action.clone(), cues)
    }
}

/// Drains a combo list one action at a time.
///
/// The caller paces the drain: nothing is resolved until [`step`] is called,
/// so an async driver can wait for each animation to finish first.
///
/// [`step`]: ActionExecutor::step
#[derive(Clone, Debug, Default)]
pub struct ActionExecutor {
    executing: bool,
}

impl ActionExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> Result<(), ExecutorError> {
        if self.executing {
            return Err(ExecutorError::AlreadyExecuting);
        }
        self.executing = true;
        Ok(())
    }

    pub fn is_executing(&self) -> bool {
        self.executing
    }

    /// Pops and resolves exactly one action.
    ///
    /// Canisters destroyed by the action get an explosion appended to the
    /// combo list; the turn order is rebuilt when participants joined or died;
    /// the outcome is checked after every action and, once combat has ended,
    /// the remaining combo list is discarded. Returns `None` when nothing is
    /// left to run.
    pub fn step(
        &mut self,
        state: &mut CombatState,
        combo: &mut ComboList,
        turns: &mut TurnManager,
        config: &CombatConfig,
    ) -> Result<Option<ExecutionStep>, ExecutorError> {
        if !self.executing {
            return Err(ExecutorError::NotExecuting);
        }
        if turns.is_ended() {
            combo.clear();
            return Ok(None);
        }
        let Some(action) = combo.pop_next() else {
            return Ok(None);
        };

        let outcome = action.resolve(state, config);
        if let Ok(resolved) = &outcome {
            for &canister in &resolved.triggered {
                combo.push(CombatAction::explosion(
                    canister,
                    config.explosion_radius,
                    config.explosion_damage,
                ));
            }
            if resolved.changes_turn_order() {
                turns.rebuild_order(state);
            }
        }

        let combat_ended = turns.check_outcome(state);
        if combat_ended.is_some() {
            combo.clear();
        }

        Ok(Some(ExecutionStep {
            action,
            outcome,
            combat_ended,
        }))
    }

    pub fn finish(&mut self) -> Result<(), ExecutorError> {
        if !self.executing {
            return Err(ExecutorError::NotExecuting);
        }
        self.executing = false;
        Ok(())
    }

    /// Drains the whole combo list synchronously, handing every batch to `sink`.
    pub fn execute(
        &mut self,
        state: &mut CombatState,
        combo: &mut ComboList,
        turns: &mut TurnManager,
        config: &CombatConfig,
        sink: &mut impl AnimationSink,
    ) -> Result<Vec<ExecutionStep>, ExecutorError> {
        self.begin()?;
        let mut steps = Vec::new();
        while let Some(step) = self.step(state, combo, turns, config)? {
            sink.play(&step.animations());
            steps.push(step);
        }
        self.finish()?;
        Ok(steps)
    }
}

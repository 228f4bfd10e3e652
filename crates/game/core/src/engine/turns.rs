//! Turn order state machine.

use crate::action::ComboList;
use crate::state::{CombatState, EntityId, TurnCapable, TurnRole, TurnTaker};

use super::{DecisionSchedule, ScheduledStep, TurnError};

/// How an encounter resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatOutcome {
    Victory,
    Defeat,
}

/// Phase of the turn loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnPhase {
    Setup,
    AwaitingTurn,
    /// An enemy or hazard routine is deciding.
    Thinking,
    PlayerInput,
    ExecutingActions,
    TurnEnding,
    Ended(CombatOutcome),
}

/// Housekeeping performed by [`TurnManager::end_turn`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnEnd {
    pub taker: Option<TurnTaker>,
    /// Burning floors that burnt out this turn.
    pub expired: Vec<EntityId>,
}

/// Drives whose turn it is and which phase the turn is in.
///
/// The order is anchored on the id of the current (or last) turn-taker, so
/// rebuilding it after spawns or deaths never skips or repeats anyone.
#[derive(Clone, Debug)]
pub struct TurnManager {
    phase: TurnPhase,
    order: Vec<TurnTaker>,
    cursor: usize,
    anchor: Option<EntityId>,
    anchor_removed: bool,
    current: Option<TurnTaker>,
    round: u32,
    turns_taken: u64,
    schedule: Option<DecisionSchedule>,
}

impl Default for TurnManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnManager {
    pub fn new() -> Self {
        Self {
            phase: TurnPhase::Setup,
            order: Vec::new(),
            cursor: 0,
            anchor: None,
            anchor_removed: false,
            current: None,
            round: 1,
            turns_taken: 0,
            schedule: None,
        }
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<CombatOutcome> {
        match self.phase {
            TurnPhase::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_ended(&self) -> bool {
        self.outcome().is_some()
    }

    pub fn current(&self) -> Option<TurnTaker> {
        self.current
    }

    pub fn order(&self) -> &[TurnTaker] {
        &self.order
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn turns_taken(&self) -> u64 {
        self.turns_taken
    }

    fn expect_phase(
        &self,
        operation: &'static str,
        allowed: &[TurnPhase],
    ) -> Result<(), TurnError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(TurnError::InvalidPhase {
                operation,
                phase: self.phase,
            })
        }
    }

    /// Builds the initial order (player, enemies, turn-capable hazards).
    pub fn finish_setup(&mut self, state: &CombatState) -> Result<(), TurnError> {
        self.expect_phase("finish setup", &[TurnPhase::Setup])?;
        self.order = compute_order(state);
        self.cursor = 0;
        self.phase = TurnPhase::AwaitingTurn;
        Ok(())
    }

    /// Starts the next eligible participant's turn.
    ///
    /// Skips participants that can no longer take turns, clears the chosen
    /// participant's guard and restores its ability uses.
    pub fn begin_turn(&mut self, state: &mut CombatState) -> Result<TurnTaker, TurnError> {
        self.expect_phase("begin turn", &[TurnPhase::AwaitingTurn])?;
        if self.order.is_empty() {
            return Err(TurnError::NoTurnTakers);
        }

        let len = self.order.len();
        let mut index = self.cursor % len;
        let mut chosen = None;
        for _ in 0..len {
            let candidate = self.order[index];
            if state.can_take_turn(candidate.id) {
                chosen = Some((index, candidate));
                break;
            }
            index = (index + 1) % len;
            if index == 0 {
                self.round += 1;
            }
        }
        let (index, taker) = chosen.ok_or(TurnError::NoTurnTakers)?;

        start_of_turn(state, taker);

        self.cursor = index;
        self.anchor = Some(taker.id);
        self.anchor_removed = false;
        self.current = Some(taker);
        self.turns_taken += 1;
        self.phase = if taker.is_player() {
            TurnPhase::PlayerInput
        } else {
            TurnPhase::Thinking
        };
        Ok(taker)
    }

    /// Closes the decision window. Returns the phase entered.
    pub fn end_decision(&mut self, combo: &ComboList) -> Result<TurnPhase, TurnError> {
        self.expect_phase(
            "end decision",
            &[TurnPhase::PlayerInput, TurnPhase::Thinking],
        )?;
        self.schedule = None;
        self.phase = if combo.is_empty() {
            TurnPhase::TurnEnding
        } else {
            TurnPhase::ExecutingActions
        };
        Ok(self.phase)
    }

    pub fn finish_execution(&mut self) -> Result<(), TurnError> {
        self.expect_phase("finish execution", &[TurnPhase::ExecutingActions])?;
        self.phase = TurnPhase::TurnEnding;
        Ok(())
    }

    /// Runs end-of-turn housekeeping and advances to the next slot.
    pub fn end_turn(&mut self, state: &mut CombatState) -> Result<TurnEnd, TurnError> {
        self.expect_phase("end turn", &[TurnPhase::TurnEnding])?;

        let taker = self.current.take();
        let mut expired = Vec::new();
        if let Some(TurnTaker {
            id,
            role: TurnRole::Hazard,
        }) = taker
        {
            if state.hazard_mut(id).is_some_and(|hazard| hazard.burn_down()) {
                expired.push(id);
            }
        }
        state.prune_spent_hazards();

        self.rebuild_order(state);
        if !self.anchor_removed && !self.order.is_empty() {
            self.cursor += 1;
        }
        if self.cursor >= self.order.len() {
            self.cursor = 0;
            self.round += 1;
        }
        self.anchor_removed = false;
        self.phase = TurnPhase::AwaitingTurn;

        Ok(TurnEnd { taker, expired })
    }

    /// Ends combat when the player is dead (defeat) or no enemy is alive
    /// (victory). Defeat takes precedence.
    pub fn check_outcome(&mut self, state: &CombatState) -> Option<CombatOutcome> {
        if let TurnPhase::Ended(outcome) = self.phase {
            return Some(outcome);
        }

        let outcome = if state.is_player_defeated() {
            CombatOutcome::Defeat
        } else if state.are_enemies_defeated() {
            CombatOutcome::Victory
        } else {
            return None;
        };

        self.phase = TurnPhase::Ended(outcome);
        self.schedule = None;
        Some(outcome)
    }

    /// Recomputes the order after spawns or deaths, keeping the cursor on the
    /// current participant. If that participant dropped out, the cursor moves
    /// to its successor so the next advance does not skip anyone.
    pub fn rebuild_order(&mut self, state: &CombatState) {
        let previous = std::mem::replace(&mut self.order, compute_order(state));

        let Some(anchor) = self.anchor else {
            self.cursor = 0;
            return;
        };
        if let Some(index) = self.index_of(anchor) {
            self.cursor = index;
            return;
        }

        let start = previous
            .iter()
            .position(|taker| taker.id == anchor)
            .unwrap_or(0);
        let successor = (1..=previous.len()).find_map(|offset| {
            let id = previous[(start + offset) % previous.len()].id;
            self.index_of(id)
                .map(|index| (index, id, start + offset >= previous.len()))
        });

        self.anchor_removed = true;
        match successor {
            Some((index, id, wrapped)) => {
                self.cursor = index;
                self.anchor = Some(id);
                if wrapped {
                    self.round += 1;
                }
            }
            None => {
                self.cursor = 0;
                self.anchor = None;
            }
        }
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.order.iter().position(|taker| taker.id == id)
    }

    // ------------------------------------------------------------------------
    // Decision schedule
    // ------------------------------------------------------------------------

    pub fn install_schedule(&mut self, schedule: DecisionSchedule) {
        self.schedule = Some(schedule);
    }

    pub fn schedule(&self) -> Option<&DecisionSchedule> {
        self.schedule.as_ref()
    }

    pub fn has_schedule(&self) -> bool {
        self.schedule.as_ref().is_some_and(|schedule| !schedule.is_empty())
    }

    pub fn next_scheduled_step(&mut self) -> Option<ScheduledStep> {
        self.schedule.as_mut()?.pop_front()
    }

    /// Drops the remaining schedule. Returns whether anything was pending.
    pub fn cancel_schedule(&mut self) -> bool {
        self.schedule
            .take()
            .is_some_and(|schedule| !schedule.is_empty())
    }
}

fn compute_order(state: &CombatState) -> Vec<TurnTaker> {
    let player = Some(&state.player)
        .filter(|player| player.can_take_turn())
        .map(|player| TurnTaker::new(player.core.id, TurnRole::Player));
    let enemies = state
        .enemies
        .iter()
        .filter(|enemy| enemy.can_take_turn())
        .map(|enemy| TurnTaker::new(enemy.core.id, TurnRole::Enemy));
    let hazards = state
        .hazards
        .iter()
        .filter(|hazard| hazard.can_take_turn())
        .map(|hazard| TurnTaker::new(hazard.core.id, TurnRole::Hazard));

    player.into_iter().chain(enemies).chain(hazards).collect()
}

fn start_of_turn(state: &mut CombatState, taker: TurnTaker) {
    if let Some(core) = state.core_mut(taker.id) {
        core.guard = 0;
    }
    match taker.role {
        TurnRole::Player => state.player.reset_ability_uses(),
        TurnRole::Enemy => {
            if let Some(enemy) = state.enemy_mut(taker.id) {
                enemy.reset_action_uses();
            }
        }
        TurnRole::Hazard => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombatConfig;
    use crate::state::{Enemy, EnemyKind, IdGenerator, Player, Position};

    fn state_with_enemies(count: i32) -> (CombatState, Vec<EntityId>) {
        let config = CombatConfig::default();
        let mut state = CombatState::new(
            8,
            8,
            Player::new(IdGenerator::next_id(), 20, Position::ORIGIN),
        );
        let ids = (0..count)
            .map(|offset| {
                state
                    .add_enemy(Enemy::spawn(
                        EnemyKind::RustedBrute,
                        Position::new(7, offset),
                        &config,
                    ))
                    .unwrap()
            })
            .collect();
        (state, ids)
    }

    fn end(turns: &mut TurnManager, state: &mut CombatState) -> TurnEnd {
        turns.end_decision(&ComboList::new()).unwrap();
        turns.end_turn(state).unwrap()
    }

    #[test]
    fn full_cycle_increments_round() {
        let (mut state, enemies) = state_with_enemies(1);
        let mut turns = TurnManager::new();
        turns.finish_setup(&state).unwrap();

        assert!(turns.begin_turn(&mut state).unwrap().is_player());
        end(&mut turns, &mut state);
        assert_eq!(turns.begin_turn(&mut state).unwrap().id, enemies[0]);
        end(&mut turns, &mut state);

        assert_eq!(turns.round(), 2);
        assert!(turns.begin_turn(&mut state).unwrap().is_player());
        assert_eq!(turns.turns_taken(), 3);
    }

    #[test]
    fn dying_during_own_turn_hands_over_to_successor() {
        let (mut state, enemies) = state_with_enemies(2);
        let mut turns = TurnManager::new();
        turns.finish_setup(&state).unwrap();

        turns.begin_turn(&mut state).unwrap();
        end(&mut turns, &mut state);
        assert_eq!(turns.begin_turn(&mut state).unwrap().id, enemies[0]);

        state.apply_damage(enemies[0], 100);
        turns.rebuild_order(&state);
        end(&mut turns, &mut state);

        assert_eq!(turns.order().len(), 2);
        assert_eq!(turns.begin_turn(&mut state).unwrap().id, enemies[1]);
    }

    #[test]
    fn last_slot_removed_wraps_to_player() {
        let (mut state, enemies) = state_with_enemies(1);
        let mut turns = TurnManager::new();
        turns.finish_setup(&state).unwrap();

        turns.begin_turn(&mut state).unwrap();
        end(&mut turns, &mut state);
        turns.begin_turn(&mut state).unwrap();
        state.apply_damage(enemies[0], 100);
        turns.rebuild_order(&state);
        end(&mut turns, &mut state);

        assert_eq!(turns.round(), 2);
        assert!(turns.begin_turn(&mut state).unwrap().is_player());
    }

    #[test]
    fn outcome_is_sticky_and_clears_schedule() {
        let (mut state, enemies) = state_with_enemies(1);
        let mut turns = TurnManager::new();
        turns.finish_setup(&state).unwrap();
        let mut schedule = DecisionSchedule::new();
        schedule.end_decision();
        turns.install_schedule(schedule);

        assert_eq!(turns.check_outcome(&state), None);
        state.apply_damage(enemies[0], 100);
        assert_eq!(turns.check_outcome(&state), Some(CombatOutcome::Victory));
        assert!(!turns.has_schedule());

        let player = state.player.core.id;
        state.apply_damage(player, 100);
        assert_eq!(turns.check_outcome(&state), Some(CombatOutcome::Victory));
        assert!(turns.begin_turn(&mut state).is_err());
    }

    #[test]
    fn defeat_wins_over_victory() {
        let (mut state, enemies) = state_with_enemies(1);
        let mut turns = TurnManager::new();
        turns.finish_setup(&state).unwrap();
        state.apply_damage(enemies[0], 100);
        let player = state.player.core.id;
        state.apply_damage(player, 100);
        assert_eq!(turns.check_outcome(&state), Some(CombatOutcome::Defeat));
    }
}

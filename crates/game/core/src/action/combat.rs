//! Damage-dealing actions and chain reactions.

use std::collections::{BTreeSet, VecDeque};

use crate::config::CombatConfig;
use crate::engine::spawner::{self, Spawn};
use crate::state::{CombatState, Direction, EntityId, HazardKind, HazardType, Occupant};

use super::{ActionError, ActionOutcome, ActionTransition, AnimationCue, AreaOfEffect};

/// Line attack from the actor's position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackAction {
    pub actor: EntityId,
    pub direction: Option<Direction>,
    pub damage: u32,
    pub range: u32,
    pub width: u32,
    pub requires_clear_path: bool,
}

impl AttackAction {
    /// Without a direction the attack can only reach the actor's own cell.
    pub fn area(&self) -> AreaOfEffect {
        match self.direction {
            Some(direction) => AreaOfEffect::line(direction, self.range, self.width)
                .with_clear_path(self.requires_clear_path),
            None => AreaOfEffect::burst(0),
        }
    }
}

impl ActionTransition for AttackAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn apply(
        &self,
        state: &mut CombatState,
        _config: &CombatConfig,
    ) -> Result<ActionOutcome, ActionError> {
        let origin = state
            .position_of(self.actor)
            .ok_or(ActionError::ActorNotFound(self.actor))?;
        let map = state.occupancy();
        let cells = self
            .area()
            .cells_through(origin, &map, |occupant| state.blocks_movement(occupant));

        let mut outcome = ActionOutcome::with_cue(AnimationCue::Strike {
            entity: self.actor,
            cells: cells.clone(),
        });

        for cell in cells {
            let Ok(Some(occupant)) = map.occupant_at(cell) else {
                continue;
            };
            let target = occupant.id();
            if target == self.actor || !state.is_alive(target) || !state.is_damageable(target) {
                continue;
            }
            let Some(report) = state.apply_damage(target, self.damage) else {
                continue;
            };

            outcome.damage.push(report);
            outcome.cues.push(AnimationCue::Hit {
                entity: target,
                amount: report.dealt,
            });
            if report.killed {
                match occupant {
                    Occupant::Hazard(_) => outcome.triggered.push(target),
                    Occupant::Entity(_) => {
                        outcome.deaths.push(target);
                        outcome.cues.push(AnimationCue::Death { entity: target });
                    }
                }
            }
        }

        Ok(outcome)
    }
}

/// Raise the actor's guard until its next turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockAction {
    pub actor: EntityId,
    pub reduction: u32,
}

impl ActionTransition for BlockAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn apply(
        &self,
        state: &mut CombatState,
        _config: &CombatConfig,
    ) -> Result<ActionOutcome, ActionError> {
        let core = state
            .core_mut(self.actor)
            .ok_or(ActionError::ActorNotFound(self.actor))?;
        core.guard = self.reduction;

        Ok(ActionOutcome::with_cue(AnimationCue::Guard {
            entity: self.actor,
            reduction: self.reduction,
        }))
    }
}

/// Detonation of a volatile canister, chaining into every canister caught in
/// the blast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExplosionAction {
    pub canister: EntityId,
    pub radius: u32,
    pub damage: u32,
}

impl ActionTransition for ExplosionAction {
    fn actor(&self) -> EntityId {
        self.canister
    }

    /// The canister is usually already at zero hp; it only has to be primed.
    fn pre_validate(&self, state: &CombatState) -> Result<(), ActionError> {
        let hazard = state
            .hazard(self.canister)
            .ok_or(ActionError::ActorNotFound(self.canister))?;
        match hazard.kind {
            HazardKind::VolatileCanister { detonated: false } => Ok(()),
            HazardKind::VolatileCanister { detonated: true } => {
                Err(ActionError::AlreadyDetonated(self.canister))
            }
            HazardKind::Wall | HazardKind::BurningFloor { .. } => {
                Err(ActionError::NotACanister(self.canister))
            }
        }
    }

    fn apply(
        &self,
        state: &mut CombatState,
        config: &CombatConfig,
    ) -> Result<ActionOutcome, ActionError> {
        let mut outcome = ActionOutcome::default();
        let mut visited = BTreeSet::from([self.canister]);
        let mut pending = VecDeque::from([self.canister]);

        while let Some(canister) = pending.pop_front() {
            let Some(hazard) = state.hazard_mut(canister) else {
                continue;
            };
            let origin = hazard.core.position;
            if !hazard.detonate() {
                continue;
            }
            outcome.detonated.push(canister);

            let map = state.occupancy();
            let cells = AreaOfEffect::burst(self.radius).cells(origin, &map);
            outcome.cues.push(AnimationCue::Explosion {
                origin,
                cells: cells.clone(),
            });

            for cell in cells {
                match map.occupant_at(cell) {
                    Ok(Some(Occupant::Hazard(id))) => {
                        let primed = state.hazard(id).is_some_and(|h| h.is_primed_canister());
                        if primed && visited.insert(id) {
                            pending.push_back(id);
                        }
                    }
                    Ok(Some(Occupant::Entity(id))) => {
                        let Some(report) = state.apply_damage(id, self.damage) else {
                            continue;
                        };
                        if report.dealt == 0 && !report.killed {
                            continue;
                        }
                        outcome.damage.push(report);
                        outcome.cues.push(AnimationCue::Hit {
                            entity: id,
                            amount: report.dealt,
                        });
                        if report.killed {
                            outcome.deaths.push(id);
                            outcome.cues.push(AnimationCue::Death { entity: id });
                        }
                    }
                    Ok(None) | Err(_) => {}
                }
            }

            let record = spawner::spawn(
                state,
                Spawn::Hazard {
                    hazard_type: HazardType::BurningFloor,
                    position: origin,
                },
                config,
            )?;
            outcome.cues.push(AnimationCue::Spawn {
                entity: record.id,
                position: origin,
            });
            outcome.spawned.push(record);
        }

        Ok(outcome)
    }
}

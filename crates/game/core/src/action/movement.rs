//! Voluntary and forced movement.

use crate::config::CombatConfig;
use crate::state::{CombatMap, CombatState, Direction, EntityId, HazardKind, Occupant, Position};

use super::{ActionError, ActionKind, ActionOutcome, ActionTransition, AnimationCue};

/// Step one cell in a direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub actor: EntityId,
    pub direction: Option<Direction>,
}

impl ActionTransition for MoveAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn apply(
        &self,
        state: &mut CombatState,
        _config: &CombatConfig,
    ) -> Result<ActionOutcome, ActionError> {
        let direction = self.direction.ok_or(ActionError::MissingDirection {
            kind: ActionKind::Move,
        })?;
        let from = state
            .position_of(self.actor)
            .ok_or(ActionError::ActorNotFound(self.actor))?;
        let to = from.offset(direction, 1);

        let map = state.occupancy();
        if !can_enter(state, &map, to) {
            return Ok(ActionOutcome::with_cue(AnimationCue::Bump {
                entity: self.actor,
                direction,
            }));
        }

        relocate(state, self.actor, to)?;
        Ok(ActionOutcome::with_cue(AnimationCue::Move {
            entity: self.actor,
            from,
            to,
        }))
    }
}

/// Shove the first movable occupant in a direction away from the actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PushAction {
    pub actor: EntityId,
    pub direction: Option<Direction>,
    pub range: u32,
}

impl ActionTransition for PushAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn apply(
        &self,
        state: &mut CombatState,
        _config: &CombatConfig,
    ) -> Result<ActionOutcome, ActionError> {
        let direction = self.direction.ok_or(ActionError::MissingDirection {
            kind: ActionKind::PushRange5,
        })?;
        displace(state, self.actor, direction, self.range, direction, None)
    }
}

/// Drag the first movable occupant in a direction toward the actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PullAction {
    pub actor: EntityId,
    pub direction: Option<Direction>,
    pub range: u32,
}

impl ActionTransition for PullAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn apply(
        &self,
        state: &mut CombatState,
        _config: &CombatConfig,
    ) -> Result<ActionOutcome, ActionError> {
        let direction = self.direction.ok_or(ActionError::MissingDirection {
            kind: ActionKind::PullRange5,
        })?;
        let origin = state
            .position_of(self.actor)
            .ok_or(ActionError::ActorNotFound(self.actor))?;
        displace(
            state,
            self.actor,
            direction,
            self.range,
            direction.opposite(),
            Some(origin),
        )
    }
}

/// In bounds and not held by a blocking occupant.
pub(crate) fn can_enter(state: &CombatState, map: &CombatMap, position: Position) -> bool {
    match map.occupant_at(position) {
        Ok(Some(occupant)) => !state.blocks_movement(occupant),
        Ok(None) => true,
        Err(_) => false,
    }
}

fn relocate(state: &mut CombatState, id: EntityId, to: Position) -> Result<(), ActionError> {
    let core = state.core_mut(id).ok_or(ActionError::ActorNotFound(id))?;
    core.position = to;
    Ok(())
}

/// First occupant along `direction` that forced movement can act on.
///
/// Scanning passes over non-blocking hazards and stops at walls or the edge.
fn find_movable(
    state: &CombatState,
    map: &CombatMap,
    origin: Position,
    direction: Direction,
    range: u32,
) -> Option<(EntityId, Position)> {
    for step in 1..=range as i32 {
        let cell = origin.offset(direction, step);
        match map.occupant_at(cell) {
            Err(_) => return None,
            Ok(None) => continue,
            Ok(Some(Occupant::Entity(id))) => return Some((id, cell)),
            Ok(Some(Occupant::Hazard(id))) => match state.hazard(id).map(|hazard| hazard.kind) {
                Some(HazardKind::VolatileCanister { detonated: false }) => return Some((id, cell)),
                Some(HazardKind::Wall) => return None,
                _ => continue,
            },
        }
    }
    None
}

/// Finds a target along `search` and slides it along `slide`.
///
/// With `stop_before` set the slide halts on the cell adjacent to it.
fn displace(
    state: &mut CombatState,
    actor: EntityId,
    search: Direction,
    range: u32,
    slide: Direction,
    stop_before: Option<Position>,
) -> Result<ActionOutcome, ActionError> {
    let origin = state
        .position_of(actor)
        .ok_or(ActionError::ActorNotFound(actor))?;
    let map = state.occupancy();

    let Some((target, from)) = find_movable(state, &map, origin, search, range) else {
        return Ok(ActionOutcome::with_cue(AnimationCue::Fizzle { entity: actor }));
    };

    // Hazards never share a cell with another hazard.
    let target_is_hazard = state.hazard(target).is_some();
    let mut to = from;
    for _ in 0..range {
        let next = to.offset(slide, 1);
        if Some(next) == stop_before
            || !can_enter(state, &map, next)
            || (target_is_hazard && state.has_hazard_at(next))
        {
            break;
        }
        to = next;
    }

    if to == from {
        return Ok(ActionOutcome::with_cue(AnimationCue::Bump {
            entity: target,
            direction: slide,
        }));
    }

    relocate(state, target, to)?;
    Ok(ActionOutcome::with_cue(AnimationCue::Slide {
        entity: target,
        from,
        to,
    }))
}

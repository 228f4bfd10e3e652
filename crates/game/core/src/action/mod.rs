//! Combat actions.
//!
//! # Module Structure
//!
//! - `movement`: Move, PushRange5, PullRange5
//! - `combat`: Attack, Block, AreaExplosion (chain reactions)
//! - `targeting`: Area-of-effect shapes
//! - `uses`: Uses-limited action templates owned by participants
//! - `combo`: Combo list with repeat compression
//! - `animation`: Declarative animation descriptors
//!
//! Each concrete action implements [`ActionTransition`]; [`CombatAction`]
//! dispatches to the variant and is what travels through the combo list.

pub mod animation;
pub mod combat;
pub mod combo;
pub mod error;
pub mod movement;
pub mod targeting;
pub mod types;
pub mod uses;

use std::fmt;

pub use animation::{AnimationBatch, AnimationCue};
pub use combat::{AttackAction, BlockAction, ExplosionAction};
pub use combo::{ComboList, QueuedAction};
pub use error::ActionError;
pub use movement::{MoveAction, PullAction, PushAction};
pub use targeting::{AreaOfEffect, AreaShape};
pub use types::ActionOutcome;
pub use uses::ActionWithUses;

use crate::config::CombatConfig;
use crate::state::{CombatState, Direction, EntityId};

/// Defines how a concrete action variant mutates combat state.
pub trait ActionTransition {
    fn actor(&self) -> EntityId;

    /// Checks premises against the state **before** mutation.
    ///
    /// The default requires a living actor.
    fn pre_validate(&self, state: &CombatState) -> Result<(), ActionError> {
        let actor = self.actor();
        match state.core(actor) {
            None => Err(ActionError::ActorNotFound(actor)),
            Some(core) if !core.is_alive() => Err(ActionError::ActorDead(actor)),
            Some(_) => Ok(()),
        }
    }

    /// Applies the action. Implementations may assume `pre_validate` passed.
    fn apply(
        &self,
        state: &mut CombatState,
        config: &CombatConfig,
    ) -> Result<ActionOutcome, ActionError>;
}

/// Names an action variant; used as ability key.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    Move,
    Attack,
    Block,
    PullRange5,
    PushRange5,
    AreaExplosion,
}

impl ActionKind {
    /// Whether dispatching this kind needs a direction from the chooser.
    pub const fn is_directional(self) -> bool {
        matches!(
            self,
            ActionKind::Move | ActionKind::Attack | ActionKind::PullRange5 | ActionKind::PushRange5
        )
    }
}

/// A concrete, resolvable action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatAction {
    Move(MoveAction),
    Attack(AttackAction),
    Block(BlockAction),
    PullRange5(PullAction),
    PushRange5(PushAction),
    AreaExplosion(ExplosionAction),
}

impl CombatAction {
    pub fn movement(actor: EntityId, direction: Option<Direction>) -> Self {
        CombatAction::Move(MoveAction { actor, direction })
    }

    pub fn attack(actor: EntityId, direction: Option<Direction>, damage: u32, range: u32) -> Self {
        CombatAction::Attack(AttackAction {
            actor,
            direction,
            damage,
            range,
            width: 1,
            requires_clear_path: true,
        })
    }

    /// Range-zero attack on the actor's own cell.
    pub fn burn(actor: EntityId, damage: u32) -> Self {
        CombatAction::Attack(AttackAction {
            actor,
            direction: None,
            damage,
            range: 0,
            width: 1,
            requires_clear_path: false,
        })
    }

    pub fn block(actor: EntityId, reduction: u32) -> Self {
        CombatAction::Block(BlockAction { actor, reduction })
    }

    pub fn push(actor: EntityId, direction: Option<Direction>, range: u32) -> Self {
        CombatAction::PushRange5(PushAction {
            actor,
            direction,
            range,
        })
    }

    pub fn pull(actor: EntityId, direction: Option<Direction>, range: u32) -> Self {
        CombatAction::PullRange5(PullAction {
            actor,
            direction,
            range,
        })
    }

    pub fn explosion(canister: EntityId, radius: u32, damage: u32) -> Self {
        CombatAction::AreaExplosion(ExplosionAction {
            canister,
            radius,
            damage,
        })
    }

    /// Builds a template action of `kind` from combat tuning.
    pub fn from_kind(kind: ActionKind, actor: EntityId, config: &CombatConfig) -> Self {
        match kind {
            ActionKind::Move => Self::movement(actor, None),
            ActionKind::Attack => {
                Self::attack(actor, None, config.attack_damage, config.attack_range)
            }
            ActionKind::Block => Self::block(actor, config.block_reduction),
            ActionKind::PullRange5 => Self::pull(actor, None, config.displacement_range),
            ActionKind::PushRange5 => Self::push(actor, None, config.displacement_range),
            ActionKind::AreaExplosion => {
                Self::explosion(actor, config.explosion_radius, config.explosion_damage)
            }
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            CombatAction::Move(_) => ActionKind::Move,
            CombatAction::Attack(_) => ActionKind::Attack,
            CombatAction::Block(_) => ActionKind::Block,
            CombatAction::PullRange5(_) => ActionKind::PullRange5,
            CombatAction::PushRange5(_) => ActionKind::PushRange5,
            CombatAction::AreaExplosion(_) => ActionKind::AreaExplosion,
        }
    }

    pub fn actor(&self) -> EntityId {
        self.transition().actor()
    }

    pub fn direction(&self) -> Option<Direction> {
        match self {
            CombatAction::Move(action) => action.direction,
            CombatAction::Attack(action) => action.direction,
            CombatAction::PullRange5(action) => action.direction,
            CombatAction::PushRange5(action) => action.direction,
            CombatAction::Block(_) | CombatAction::AreaExplosion(_) => None,
        }
    }

    pub fn is_directional(&self) -> bool {
        self.kind().is_directional()
    }

    /// Copy of this action aimed at `direction`. Non-directional actions are
    /// returned unchanged.
    pub fn with_direction(&self, direction: Direction) -> Self {
        let mut action = self.clone();
        match &mut action {
            CombatAction::Move(inner) => inner.direction = Some(direction),
            CombatAction::Attack(inner) => inner.direction = Some(direction),
            CombatAction::PullRange5(inner) => inner.direction = Some(direction),
            CombatAction::PushRange5(inner) => inner.direction = Some(direction),
            CombatAction::Block(_) | CombatAction::AreaExplosion(_) => {}
        }
        action
    }

    fn transition(&self) -> &dyn ActionTransition {
        match self {
            CombatAction::Move(action) => action,
            CombatAction::Attack(action) => action,
            CombatAction::Block(action) => action,
            CombatAction::PullRange5(action) => action,
            CombatAction::PushRange5(action) => action,
            CombatAction::AreaExplosion(action) => action,
        }
    }

    /// Validates and applies the action against `state`.
    pub fn resolve(
        &self,
        state: &mut CombatState,
        config: &CombatConfig,
    ) -> Result<ActionOutcome, ActionError> {
        let transition = self.transition();
        transition.pre_validate(state)?;
        transition.apply(state, config)
    }
}

impl fmt::Display for CombatAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction() {
            Some(direction) => write!(f, "{} {}", self.kind(), direction),
            None => write!(f, "{}", self.kind()),
        }
    }
}

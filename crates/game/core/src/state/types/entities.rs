use std::collections::BTreeMap;

use super::{EntityId, IdGenerator, Position, ResourceMeter};
use crate::action::{ActionKind, ActionWithUses, CombatAction};
use crate::config::CombatConfig;

/// Attributes shared by the player, enemies and hazards.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityCore {
    pub id: EntityId,
    pub hp: ResourceMeter,
    pub symbol: char,
    pub name: String,
    pub position: Position,
    pub description: Option<String>,
    /// Flat damage reduction granted by Block, cleared when the entity's next turn starts.
    pub guard: u32,
}

impl EntityCore {
    pub fn new(
        id: EntityId,
        max_hp: u32,
        symbol: char,
        name: impl Into<String>,
        position: Position,
    ) -> Self {
        Self {
            id,
            hp: ResourceMeter::full(max_hp),
            symbol,
            name: name.into(),
            position,
            description: None,
            guard: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_hp(mut self, current: u32) -> Self {
        self.hp = ResourceMeter::new(current, self.hp.maximum);
        self
    }

    pub fn is_alive(&self) -> bool {
        !self.hp.is_depleted()
    }
}

/// Result of applying damage to a single combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageReport {
    pub target: EntityId,
    pub dealt: u32,
    pub hp_after: u32,
    /// True when this hit took the target from alive to dead.
    pub killed: bool,
}

// ============================================================================
// Capabilities
// ============================================================================

/// Access to the shared attributes of any combat participant.
pub trait Combatant {
    fn core(&self) -> &EntityCore;
    fn core_mut(&mut self) -> &mut EntityCore;

    fn id(&self) -> EntityId {
        self.core().id
    }

    fn position(&self) -> Position {
        self.core().position
    }

    fn is_alive(&self) -> bool {
        self.core().is_alive()
    }
}

/// Participants that occupy a slot in the turn order.
pub trait TurnCapable: Combatant {
    fn takes_turns(&self) -> bool;

    fn can_take_turn(&self) -> bool {
        self.takes_turns() && self.is_alive()
    }
}

/// Participants that stop movement into their cell.
pub trait Blocking: Combatant {
    fn blocks_movement(&self) -> bool;
}

/// Participants whose hit points can be reduced by attacks and blasts.
pub trait Damageable: Combatant {
    fn is_damageable(&self) -> bool;

    fn take_damage(&mut self, amount: u32) -> DamageReport {
        let id = self.id();
        if !self.is_damageable() || !self.is_alive() {
            return DamageReport {
                target: id,
                dealt: 0,
                hp_after: self.core().hp.current,
                killed: false,
            };
        }

        let core = self.core_mut();
        let reduced = amount.saturating_sub(core.guard);
        let dealt = core.hp.drain(reduced);
        DamageReport {
            target: id,
            dealt,
            hp_after: core.hp.current,
            killed: core.hp.is_depleted(),
        }
    }
}

// ============================================================================
// Player
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub core: EntityCore,
    /// Ordered ability list; uses are restored at the start of every player turn.
    pub abilities: Vec<ActionWithUses>,
}

impl Player {
    pub const SYMBOL: char = '@';

    pub fn new(id: EntityId, max_hp: u32, position: Position) -> Self {
        Self {
            core: EntityCore::new(id, max_hp, Self::SYMBOL, "Player", position),
            abilities: Vec::new(),
        }
    }

    pub fn with_abilities(mut self, abilities: Vec<ActionWithUses>) -> Self {
        self.abilities = abilities;
        self
    }

    pub fn ability_index(&self, kind: ActionKind) -> Option<usize> {
        self.abilities
            .iter()
            .position(|ability| ability.kind() == kind)
    }

    pub fn reset_ability_uses(&mut self) {
        for ability in &mut self.abilities {
            ability.reset();
        }
    }
}

impl Combatant for Player {
    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }
}

impl TurnCapable for Player {
    fn takes_turns(&self) -> bool {
        true
    }
}

impl Blocking for Player {
    fn blocks_movement(&self) -> bool {
        true
    }
}

impl Damageable for Player {
    fn is_damageable(&self) -> bool {
        true
    }
}

// ============================================================================
// Enemies
// ============================================================================

/// Scripted enemy variants.
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
pub enum EnemyKind {
    /// Slow, fragile, always runs the same attack-attack-move-move script.
    RustedShambler,
    /// Sturdier, walks toward the player using its move budget.
    RustedBrute,
}

impl EnemyKind {
    pub const fn symbol(self) -> char {
        match self {
            EnemyKind::RustedShambler => 'S',
            EnemyKind::RustedBrute => 'B',
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            EnemyKind::RustedShambler => "Rusted Shambler",
            EnemyKind::RustedBrute => "Rusted Brute",
        }
    }

    pub const fn max_hp(self) -> u32 {
        match self {
            EnemyKind::RustedShambler => 10,
            EnemyKind::RustedBrute => 20,
        }
    }

    /// Builds the fixed ability map for an enemy of this kind.
    pub fn action_templates(
        self,
        actor: EntityId,
        config: &CombatConfig,
    ) -> BTreeMap<ActionKind, ActionWithUses> {
        let attack = CombatAction::attack(actor, None, config.attack_damage, config.attack_range);
        let step = CombatAction::movement(actor, None);

        let mut actions = BTreeMap::new();
        match self {
            EnemyKind::RustedShambler => {
                actions.insert(ActionKind::Attack, ActionWithUses::unlimited(attack));
                actions.insert(ActionKind::Move, ActionWithUses::unlimited(step));
            }
            EnemyKind::RustedBrute => {
                actions.insert(ActionKind::Attack, ActionWithUses::new(attack, 2));
                actions.insert(ActionKind::Move, ActionWithUses::new(step, 5));
            }
        }
        actions
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enemy {
    pub core: EntityCore,
    pub kind: EnemyKind,
    pub actions: BTreeMap<ActionKind, ActionWithUses>,
}

impl Enemy {
    pub fn new(id: EntityId, kind: EnemyKind, position: Position, config: &CombatConfig) -> Self {
        Self {
            core: EntityCore::new(
                id,
                kind.max_hp(),
                kind.symbol(),
                kind.display_name(),
                position,
            ),
            kind,
            actions: kind.action_templates(id, config),
        }
    }

    /// Creates an enemy with a freshly generated id.
    pub fn spawn(kind: EnemyKind, position: Position, config: &CombatConfig) -> Self {
        Self::new(IdGenerator::next_id(), kind, position, config)
    }

    pub fn action(&self, kind: ActionKind) -> Option<&ActionWithUses> {
        self.actions.get(&kind)
    }

    pub fn action_mut(&mut self, kind: ActionKind) -> Option<&mut ActionWithUses> {
        self.actions.get_mut(&kind)
    }

    pub fn reset_action_uses(&mut self) {
        for action in self.actions.values_mut() {
            action.reset();
        }
    }
}

impl Combatant for Enemy {
    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }
}

impl TurnCapable for Enemy {
    fn takes_turns(&self) -> bool {
        true
    }
}

impl Blocking for Enemy {
    fn blocks_movement(&self) -> bool {
        true
    }
}

impl Damageable for Enemy {
    fn is_damageable(&self) -> bool {
        true
    }
}

// ============================================================================
// Hazards
// ============================================================================

/// Hazard variant named in content tables and legends.
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
pub enum HazardType {
    Wall,
    BurningFloor,
    VolatileCanister,
}

/// Runtime state of a hazard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HazardKind {
    Wall,
    BurningFloor { turns_remaining: u32 },
    VolatileCanister { detonated: bool },
}

impl HazardKind {
    pub const fn hazard_type(self) -> HazardType {
        match self {
            HazardKind::Wall => HazardType::Wall,
            HazardKind::BurningFloor { .. } => HazardType::BurningFloor,
            HazardKind::VolatileCanister { .. } => HazardType::VolatileCanister,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hazard {
    pub core: EntityCore,
    pub kind: HazardKind,
}

impl Hazard {
    pub fn new(
        id: EntityId,
        hazard_type: HazardType,
        position: Position,
        config: &CombatConfig,
    ) -> Self {
        let (kind, max_hp, symbol, name) = match hazard_type {
            HazardType::Wall => (HazardKind::Wall, 1, '#', "Wall"),
            HazardType::BurningFloor => (
                HazardKind::BurningFloor {
                    turns_remaining: config.burn_duration,
                },
                1,
                '^',
                "Burning Floor",
            ),
            HazardType::VolatileCanister => (
                HazardKind::VolatileCanister { detonated: false },
                config.canister_hp,
                '+',
                "Volatile Canister",
            ),
        };

        Self {
            core: EntityCore::new(id, max_hp, symbol, name, position),
            kind,
        }
    }

    /// Creates a hazard with a freshly generated id.
    pub fn spawn(hazard_type: HazardType, position: Position, config: &CombatConfig) -> Self {
        Self::new(IdGenerator::next_id(), hazard_type, position, config)
    }

    pub fn hazard_type(&self) -> HazardType {
        self.kind.hazard_type()
    }

    pub fn is_canister(&self) -> bool {
        matches!(self.kind, HazardKind::VolatileCanister { .. })
    }

    /// True for canisters that have not exploded yet, whatever their hit points.
    pub fn is_primed_canister(&self) -> bool {
        matches!(self.kind, HazardKind::VolatileCanister { detonated: false })
    }

    /// Marks a canister as exploded. Returns false if it already had.
    pub fn detonate(&mut self) -> bool {
        match &mut self.kind {
            HazardKind::VolatileCanister { detonated } if !*detonated => {
                *detonated = true;
                self.core.hp.deplete();
                true
            }
            _ => false,
        }
    }

    /// Counts down a burning floor. Returns true when it has just burnt out.
    pub fn burn_down(&mut self) -> bool {
        match &mut self.kind {
            HazardKind::BurningFloor { turns_remaining } => {
                *turns_remaining = turns_remaining.saturating_sub(1);
                if *turns_remaining == 0 && self.core.is_alive() {
                    self.core.hp.deplete();
                    return true;
                }
                false
            }
            HazardKind::Wall | HazardKind::VolatileCanister { .. } => false,
        }
    }
}

impl Combatant for Hazard {
    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }
}

impl TurnCapable for Hazard {
    fn takes_turns(&self) -> bool {
        match self.kind {
            HazardKind::BurningFloor { .. } => true,
            HazardKind::Wall | HazardKind::VolatileCanister { .. } => false,
        }
    }
}

impl Blocking for Hazard {
    fn blocks_movement(&self) -> bool {
        match self.kind {
            HazardKind::Wall | HazardKind::VolatileCanister { .. } => true,
            HazardKind::BurningFloor { .. } => false,
        }
    }
}

impl Damageable for Hazard {
    fn is_damageable(&self) -> bool {
        match self.kind {
            HazardKind::VolatileCanister { detonated } => !detonated,
            HazardKind::Wall | HazardKind::BurningFloor { .. } => false,
        }
    }
}

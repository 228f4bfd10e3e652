//! Authoritative combat state.
//!
//! The entity lists held by [`CombatState`] are the single source of truth.
//! Grid occupancy is never stored; [`CombatState::occupancy`] projects a fresh
//! [`CombatMap`] from the lists whenever a resolution step needs one.
pub mod error;
pub mod types;

pub use error::{InvalidPositionError, StateError};
pub use types::{
    Blocking, CombatMap, Combatant, DamageReport, Damageable, Direction, Enemy, EnemyKind,
    EntityCore, EntityId, Hazard, HazardKind, HazardType, IdGenerator, Occupant, Player, Position,
    ResourceMeter, TurnCapable, TurnRole, TurnTaker,
};

/// Snapshot of one encounter: grid bounds plus every participant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombatState {
    width: u32,
    height: u32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub hazards: Vec<Hazard>,
}

impl CombatState {
    pub fn new(width: u32, height: u32, player: Player) -> Self {
        Self {
            width,
            height,
            player,
            enemies: Vec::new(),
            hazards: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }

    pub fn add_enemy(&mut self, enemy: Enemy) -> Result<EntityId, StateError> {
        let id = enemy.core.id;
        self.ensure_placeable(id, enemy.core.position)?;
        self.enemies.push(enemy);
        Ok(id)
    }

    pub fn add_hazard(&mut self, hazard: Hazard) -> Result<EntityId, StateError> {
        let id = hazard.core.id;
        self.ensure_placeable(id, hazard.core.position)?;
        self.hazards.push(hazard);
        Ok(id)
    }

    fn ensure_placeable(&self, id: EntityId, position: Position) -> Result<(), StateError> {
        if !self.contains(position) {
            return Err(InvalidPositionError {
                position,
                width: self.width,
                height: self.height,
            }
            .into());
        }
        if self.core(id).is_some() {
            return Err(StateError::DuplicateEntity { id });
        }
        Ok(())
    }

    /// Projects the current occupancy: live non-blocking hazards, blocking
    /// hazards, enemies, then the player. Later writers replace earlier ones
    /// on a shared cell, so a floor never hides a canister or a wall.
    pub fn occupancy(&self) -> CombatMap {
        let mut map = CombatMap::new(self.width, self.height);

        let live_hazards = || self.hazards.iter().filter(|hazard| hazard.is_alive());
        let hazards = live_hazards()
            .filter(|hazard| !hazard.blocks_movement())
            .chain(live_hazards().filter(|hazard| hazard.blocks_movement()))
            .map(|hazard| (hazard.core.position, Occupant::Hazard(hazard.core.id)));
        let enemies = self
            .enemies
            .iter()
            .filter(|enemy| enemy.is_alive())
            .map(|enemy| (enemy.core.position, Occupant::Entity(enemy.core.id)));
        let player = Some(&self.player)
            .filter(|player| player.is_alive())
            .map(|player| (player.core.position, Occupant::Entity(player.core.id)));

        for (position, occupant) in hazards.chain(enemies).chain(player) {
            // Entities are only ever placed through bounds-checked paths.
            let _ = map.set_occupant(position, occupant);
        }
        map
    }

    // ------------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------------

    pub fn enemy(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.iter().find(|enemy| enemy.core.id == id)
    }

    pub fn enemy_mut(&mut self, id: EntityId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|enemy| enemy.core.id == id)
    }

    pub fn hazard(&self, id: EntityId) -> Option<&Hazard> {
        self.hazards.iter().find(|hazard| hazard.core.id == id)
    }

    pub fn hazard_mut(&mut self, id: EntityId) -> Option<&mut Hazard> {
        self.hazards.iter_mut().find(|hazard| hazard.core.id == id)
    }

    pub fn core(&self, id: EntityId) -> Option<&EntityCore> {
        if self.player.core.id == id {
            return Some(&self.player.core);
        }
        self.enemy(id)
            .map(|enemy| &enemy.core)
            .or_else(|| self.hazard(id).map(|hazard| &hazard.core))
    }

    pub fn core_mut(&mut self, id: EntityId) -> Option<&mut EntityCore> {
        if self.player.core.id == id {
            return Some(&mut self.player.core);
        }
        if let Some(index) = self.enemies.iter().position(|enemy| enemy.core.id == id) {
            return Some(&mut self.enemies[index].core);
        }
        self.hazard_mut(id).map(|hazard| &mut hazard.core)
    }

    pub fn position_of(&self, id: EntityId) -> Option<Position> {
        self.core(id).map(|core| core.position)
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.core(id).is_some_and(EntityCore::is_alive)
    }

    pub fn role_of(&self, id: EntityId) -> Option<TurnRole> {
        if self.player.core.id == id {
            Some(TurnRole::Player)
        } else if self.enemy(id).is_some() {
            Some(TurnRole::Enemy)
        } else if self.hazard(id).is_some() {
            Some(TurnRole::Hazard)
        } else {
            None
        }
    }

    /// Whether the participant currently qualifies for a turn.
    pub fn can_take_turn(&self, id: EntityId) -> bool {
        if self.player.core.id == id {
            return self.player.can_take_turn();
        }
        if let Some(enemy) = self.enemy(id) {
            return enemy.can_take_turn();
        }
        self.hazard(id).is_some_and(TurnCapable::can_take_turn)
    }

    pub fn blocks_movement(&self, occupant: Occupant) -> bool {
        match occupant {
            Occupant::Entity(id) if id == self.player.core.id => self.player.blocks_movement(),
            Occupant::Entity(id) => self.enemy(id).is_some_and(Blocking::blocks_movement),
            Occupant::Hazard(id) => self.hazard(id).is_some_and(Blocking::blocks_movement),
        }
    }

    pub fn is_damageable(&self, id: EntityId) -> bool {
        if self.player.core.id == id {
            return self.player.is_damageable();
        }
        if let Some(enemy) = self.enemy(id) {
            return enemy.is_damageable();
        }
        self.hazard(id).is_some_and(Damageable::is_damageable)
    }

    /// Routes damage to the matching participant. `None` when the id is unknown.
    pub fn apply_damage(&mut self, id: EntityId, amount: u32) -> Option<DamageReport> {
        if self.player.core.id == id {
            return Some(self.player.take_damage(amount));
        }
        if let Some(enemy) = self.enemy_mut(id) {
            return Some(enemy.take_damage(amount));
        }
        self.hazard_mut(id).map(|hazard| hazard.take_damage(amount))
    }

    /// Live player or enemy standing on `position`, ignoring the occupancy
    /// projection so entities hidden on top of hazards are still found.
    pub fn entity_at(&self, position: Position) -> Option<EntityId> {
        if self.player.is_alive() && self.player.core.position == position {
            return Some(self.player.core.id);
        }
        self.enemies
            .iter()
            .find(|enemy| enemy.is_alive() && enemy.core.position == position)
            .map(|enemy| enemy.core.id)
    }

    /// Canisters that can still explode.
    /// Whether a live hazard sits on `position`, even one hidden by an entity.
    pub fn has_hazard_at(&self, position: Position) -> bool {
        self.hazards
            .iter()
            .any(|hazard| hazard.is_alive() && hazard.core.position == position)
    }

    pub fn primed_canisters(&self) -> impl Iterator<Item = &Hazard> {
        self.hazards.iter().filter(|hazard| hazard.is_primed_canister())
    }

    pub fn living_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|enemy| enemy.is_alive())
    }

    pub fn is_player_defeated(&self) -> bool {
        !self.player.is_alive()
    }

    pub fn are_enemies_defeated(&self) -> bool {
        self.living_enemies().next().is_none()
    }

    /// Drops burnt-out floors and spent canisters. Dead enemies stay listed.
    pub fn prune_spent_hazards(&mut self) -> usize {
        let before = self.hazards.len();
        self.hazards.retain(|hazard| hazard.is_alive());
        before - self.hazards.len()
    }

    /// Renders the occupancy grid as text rows, `.` marking empty cells.
    pub fn render_rows(&self) -> Vec<String> {
        let map = self.occupancy();
        (0..self.height as i32)
            .map(|y| {
                (0..self.width as i32)
                    .map(|x| {
                        map.occupant_at(Position::new(x, y))
                            .ok()
                            .flatten()
                            .and_then(|occupant| self.core(occupant.id()))
                            .map_or('.', |core| core.symbol)
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombatConfig;

    fn arena() -> (CombatState, CombatConfig) {
        let config = CombatConfig::default();
        let player = Player::new(IdGenerator::next_id(), 20, Position::new(0, 0));
        (CombatState::new(4, 3, player), config)
    }

    #[test]
    fn entity_hides_the_floor_beneath_it() {
        let (mut state, config) = arena();
        let floor = state
            .add_hazard(Hazard::spawn(HazardType::BurningFloor, Position::new(1, 1), &config))
            .unwrap();
        let brute = state
            .add_enemy(Enemy::spawn(EnemyKind::RustedBrute, Position::new(1, 1), &config))
            .unwrap();

        let map = state.occupancy();
        assert_eq!(
            map.occupant_at(Position::new(1, 1)).unwrap(),
            Some(Occupant::Entity(brute))
        );
        assert_eq!(state.entity_at(Position::new(1, 1)), Some(brute));
        assert!(state.hazard(floor).is_some());
    }

    #[test]
    fn blocking_hazard_wins_a_cell_shared_with_a_floor() {
        let (mut state, config) = arena();
        let canister = state
            .add_hazard(Hazard::spawn(HazardType::VolatileCanister, Position::new(2, 1), &config))
            .unwrap();
        state
            .add_hazard(Hazard::spawn(HazardType::BurningFloor, Position::new(2, 1), &config))
            .unwrap();

        let map = state.occupancy();
        assert_eq!(
            map.occupant_at(Position::new(2, 1)).unwrap(),
            Some(Occupant::Hazard(canister))
        );
        assert!(state.has_hazard_at(Position::new(2, 1)));
        assert!(!state.has_hazard_at(Position::new(0, 1)));
    }

    #[test]
    fn dead_participants_are_not_projected() {
        let (mut state, config) = arena();
        let shambler = state
            .add_enemy(Enemy::spawn(EnemyKind::RustedShambler, Position::new(2, 2), &config))
            .unwrap();
        state.apply_damage(shambler, 100);

        assert!(state.occupancy().is_vacant(Position::new(2, 2)));
        assert!(state.are_enemies_defeated());
        assert!(state.enemy(shambler).is_some());
    }

    #[test]
    fn rejects_out_of_bounds_and_duplicate_ids() {
        let (mut state, config) = arena();
        let outside = Enemy::spawn(EnemyKind::RustedBrute, Position::new(9, 9), &config);
        assert!(matches!(
            state.add_enemy(outside),
            Err(StateError::InvalidPosition(_))
        ));

        let brute = Enemy::spawn(EnemyKind::RustedBrute, Position::new(1, 0), &config);
        state.add_enemy(brute.clone()).unwrap();
        assert!(matches!(
            state.add_enemy(brute),
            Err(StateError::DuplicateEntity { .. })
        ));
    }

    #[test]
    fn renders_symbols_by_row() {
        let (mut state, config) = arena();
        state
            .add_hazard(Hazard::spawn(HazardType::Wall, Position::new(3, 0), &config))
            .unwrap();
        state
            .add_enemy(Enemy::spawn(EnemyKind::RustedShambler, Position::new(1, 2), &config))
            .unwrap();

        assert_eq!(state.render_rows(), vec!["@..#", "....", ".S.."]);
    }
}

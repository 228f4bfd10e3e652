use super::*;
use crate::action::{ActionKind, ActionWithUses, AnimationBatch};
use crate::state::{
    Direction, Enemy, EnemyKind, Hazard, HazardType, IdGenerator, Player, Position,
    TurnRole,
};

fn player_at(position: Position, hp: u32) -> Player {
    let id = IdGenerator::next_id();
    Player::new(id, hp, position).with_abilities(vec![
        ActionWithUses::new(CombatAction::attack(id, None, 10, 1), 2),
        ActionWithUses::new(CombatAction::movement(id, None), 3),
        ActionWithUses::new(CombatAction::block(id, 3), 1),
    ])
}

fn discard(_batch: &AnimationBatch) {}

/// Ends the current turn without doing anything.
fn pass(engine: &mut CombatEngine) {
    engine.finish_turn(&mut discard).unwrap();
}

#[test]
fn phases_reject_out_of_order_calls() {
    let mut turns = TurnManager::new();
    let config = CombatConfig::default();
    let mut state = CombatState::new(3, 3, player_at(Position::ORIGIN, 10));
    state
        .add_enemy(Enemy::spawn(EnemyKind::RustedBrute, Position::new(2, 2), &config))
        .unwrap();

    assert!(matches!(
        turns.begin_turn(&mut state),
        Err(TurnError::InvalidPhase {
            phase: TurnPhase::Setup,
            ..
        })
    ));
    turns.finish_setup(&state).unwrap();
    assert!(turns.finish_execution().is_err());
    assert!(turns.end_turn(&mut state).is_err());
    assert!(turns.finish_setup(&state).is_err());
}

#[test]
fn empty_combo_skips_execution() {
    let config = CombatConfig::default();
    let mut state = CombatState::new(3, 3, player_at(Position::ORIGIN, 10));
    state
        .add_enemy(Enemy::spawn(EnemyKind::RustedBrute, Position::new(2, 2), &config))
        .unwrap();
    let mut engine = CombatEngine::new(state, config);

    assert_eq!(engine.start().unwrap(), None);
    let taker = engine.begin_turn().unwrap();
    assert_eq!(taker.role, TurnRole::Player);
    assert_eq!(engine.turns.phase(), TurnPhase::PlayerInput);
    assert_eq!(engine.end_decision().unwrap(), TurnPhase::TurnEnding);
}

#[test]
fn encounter_without_enemies_is_won_at_start() {
    let state = CombatState::new(3, 3, player_at(Position::ORIGIN, 10));
    let mut engine = CombatEngine::new(state, CombatConfig::default());
    assert_eq!(engine.start().unwrap(), Some(CombatOutcome::Victory));
    assert!(engine.begin_turn().is_err());
}

#[test]
fn order_is_player_enemies_then_turn_capable_hazards() {
    let config = CombatConfig::default();
    let mut state = CombatState::new(5, 5, player_at(Position::ORIGIN, 10));
    state
        .add_hazard(Hazard::spawn(HazardType::BurningFloor, Position::new(4, 4), &config))
        .unwrap();
    state
        .add_hazard(Hazard::spawn(HazardType::Wall, Position::new(3, 3), &config))
        .unwrap();
    state
        .add_enemy(Enemy::spawn(EnemyKind::RustedBrute, Position::new(2, 2), &config))
        .unwrap();

    let mut turns = TurnManager::new();
    turns.finish_setup(&state).unwrap();
    let roles: Vec<_> = turns.order().iter().map(|taker| taker.role).collect();
    assert_eq!(roles, vec![TurnRole::Player, TurnRole::Enemy, TurnRole::Hazard]);
}

#[test]
fn dead_turn_takers_are_skipped() {
    let config = CombatConfig::default();
    let mut state = CombatState::new(8, 8, player_at(Position::ORIGIN, 10));
    let shambler = state
        .add_enemy(Enemy::spawn(EnemyKind::RustedShambler, Position::new(5, 5), &config))
        .unwrap();
    let brute = state
        .add_enemy(Enemy::spawn(EnemyKind::RustedBrute, Position::new(7, 7), &config))
        .unwrap();
    let mut engine = CombatEngine::new(state, config);
    engine.start().unwrap();

    engine.begin_turn().unwrap();
    pass(&mut engine);

    engine.state.apply_damage(shambler, 100);
    let next = engine.begin_turn().unwrap();
    assert_eq!(next.id, brute);
}

#[test]
fn turn_start_clears_guard_and_restores_uses() {
    let config = CombatConfig::default();
    let mut state = CombatState::new(8, 8, player_at(Position::ORIGIN, 10));
    state
        .add_enemy(Enemy::spawn(EnemyKind::RustedBrute, Position::new(7, 7), &config))
        .unwrap();
    let mut engine = CombatEngine::new(state, config);
    engine.start().unwrap();

    engine.state.player.core.guard = 3;
    engine.state.player.abilities[0].dispatch(Some(Direction::Up));
    engine.state.player.abilities[0].dispatch(Some(Direction::Up));

    engine.begin_turn().unwrap();
    assert_eq!(engine.state.player.core.guard, 0);
    assert_eq!(engine.state.player.abilities[0].uses(), 2);
}

#[test]
fn shambler_kills_weak_player_and_drain_stops() {
    let config = CombatConfig::default();
    let mut state = CombatState::new(4, 4, player_at(Position::new(0, 0), 5));
    state
        .add_enemy(Enemy::spawn(EnemyKind::RustedShambler, Position::new(1, 0), &config))
        .unwrap();
    let mut engine = CombatEngine::new(state, config);
    engine.start().unwrap();

    engine.begin_turn().unwrap();
    pass(&mut engine);

    let taker = engine.begin_turn().unwrap();
    assert_eq!(taker.role, TurnRole::Enemy);
    engine.plan_current_turn();

    let mut played = Vec::new();
    let steps = engine
        .run_scheduled_turn(&mut |batch: &AnimationBatch| played.push(batch.clone()))
        .unwrap();

    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].combat_ended, Some(CombatOutcome::Defeat));
    assert_eq!(played.len(), 1);
    assert!(engine.combo.is_empty());
    assert_eq!(engine.turns.outcome(), Some(CombatOutcome::Defeat));
    assert!(engine.begin_turn().is_err());
}

#[test]
fn player_clears_both_enemies_for_victory() {
    let config = CombatConfig::default();
    let mut state = CombatState::new(3, 3, player_at(Position::new(1, 1), 20));
    state
        .add_enemy(Enemy::spawn(EnemyKind::RustedShambler, Position::new(2, 1), &config))
        .unwrap();
    state
        .add_enemy(Enemy::spawn(EnemyKind::RustedShambler, Position::new(0, 1), &config))
        .unwrap();
    let mut engine = CombatEngine::new(state, config);
    engine.start().unwrap();
    engine.begin_turn().unwrap();

    for direction in [Direction::Right, Direction::Left] {
        let selection = engine.controller.select(&mut engine.state.player, 0).unwrap();
        assert!(selection.is_none());
        let action = engine
            .controller
            .choose_direction(&mut engine.state.player, direction)
            .unwrap();
        engine.enqueue(action);
    }

    let steps = engine.finish_turn(&mut discard).unwrap();

    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].combat_ended, None);
    assert_eq!(steps[1].combat_ended, Some(CombatOutcome::Victory));
    assert_eq!(engine.turns.outcome(), Some(CombatOutcome::Victory));
}

#[test]
fn brute_moves_exactly_its_budget() {
    let config = CombatConfig::default();
    let mut state = CombatState::new(6, 1, player_at(Position::new(0, 0), 20));
    let mut brute = Enemy::spawn(EnemyKind::RustedBrute, Position::new(5, 0), &config);
    let brute_id = brute.core.id;
    brute.actions.insert(
        ActionKind::Move,
        ActionWithUses::new(CombatAction::movement(brute_id, None), 2),
    );
    state.add_enemy(brute).unwrap();
    let mut engine = CombatEngine::new(state, config);
    engine.start().unwrap();

    engine.begin_turn().unwrap();
    pass(&mut engine);

    engine.begin_turn().unwrap();
    engine.plan_current_turn();
    let steps = engine.run_scheduled_turn(&mut discard).unwrap();

    assert_eq!(steps.len(), 2);
    assert_eq!(engine.state.position_of(brute_id), Some(Position::new(3, 0)));
    assert_eq!(engine.state.player.core.hp.current, 20);
}

#[test]
fn destroyed_canister_chains_and_spawns_fire() {
    let config = CombatConfig::default();
    let mut state = CombatState::new(6, 1, player_at(Position::new(0, 0), 20));
    let first = state
        .add_hazard(Hazard::spawn(HazardType::VolatileCanister, Position::new(1, 0), &config))
        .unwrap();
    let second = state
        .add_hazard(Hazard::spawn(HazardType::VolatileCanister, Position::new(2, 0), &config))
        .unwrap();
    let brute = state
        .add_enemy(Enemy::spawn(EnemyKind::RustedBrute, Position::new(3, 0), &config))
        .unwrap();
    let mut engine = CombatEngine::new(state, config.clone());
    engine.start().unwrap();
    engine.begin_turn().unwrap();

    let player = engine.state.player.core.id;
    engine.enqueue(CombatAction::attack(player, Some(Direction::Right), 10, 1));
    let steps = engine.finish_turn(&mut discard).unwrap();

    assert_eq!(steps.len(), 2);
    assert_eq!(steps[1].action.kind(), ActionKind::AreaExplosion);
    let explosion = steps[1].outcome.as_ref().unwrap();
    assert_eq!(explosion.detonated, vec![first, second]);

    let blast = config.explosion_damage;
    assert_eq!(engine.state.player.core.hp.current, 20 - blast);
    assert_eq!(engine.state.core(brute).unwrap().hp.current, 20 - blast);

    let fires = engine
        .turns
        .order()
        .iter()
        .filter(|taker| taker.role == TurnRole::Hazard)
        .count();
    assert_eq!(fires, 2);
}

#[test]
fn burnt_out_floor_leaves_the_order() {
    let config = CombatConfig {
        burn_duration: 1,
        ..CombatConfig::default()
    };
    let mut state = CombatState::new(5, 5, player_at(Position::new(4, 4), 20));
    state
        .add_enemy(Enemy::spawn(EnemyKind::RustedShambler, Position::new(0, 0), &config))
        .unwrap();
    let floor = state
        .add_hazard(Hazard::spawn(HazardType::BurningFloor, Position::new(2, 2), &config))
        .unwrap();
    let mut engine = CombatEngine::new(state, config);
    engine.start().unwrap();

    engine.begin_turn().unwrap();
    pass(&mut engine);

    engine.begin_turn().unwrap();
    engine.plan_current_turn();
    engine.run_scheduled_turn(&mut discard).unwrap();

    let taker = engine.begin_turn().unwrap();
    assert_eq!(taker.id, floor);
    engine.plan_current_turn();
    while let Some(scheduled) = engine.turns.next_scheduled_step() {
        if let DecisionStep::Enqueue(action) = scheduled.step {
            engine.enqueue(action);
        }
    }
    assert_eq!(engine.end_decision().unwrap(), TurnPhase::ExecutingActions);
    engine.execute(&mut discard).unwrap();
    let end = engine.end_turn().unwrap();

    assert_eq!(end.expired, vec![floor]);
    assert_eq!(engine.turns.order().len(), 2);
    assert!(engine.state.hazard(floor).is_none());
    assert!(engine.begin_turn().unwrap().is_player());
}

#[test]
fn rebuild_keeps_cursor_on_current_taker() {
    let config = CombatConfig::default();
    let mut state = CombatState::new(8, 8, player_at(Position::ORIGIN, 20));
    let brute = state
        .add_enemy(Enemy::spawn(EnemyKind::RustedBrute, Position::new(7, 7), &config))
        .unwrap();
    let mut engine = CombatEngine::new(state, config.clone());
    engine.start().unwrap();
    engine.begin_turn().unwrap();

    // A participant spawned mid-turn lands at the end and does not shift the player.
    spawner::spawn(
        &mut engine.state,
        Spawn::Enemy {
            kind: EnemyKind::RustedShambler,
            position: Position::new(4, 4),
        },
        &config,
    )
    .unwrap();
    engine.turns.rebuild_order(&engine.state);
    pass(&mut engine);

    assert_eq!(engine.begin_turn().unwrap().id, brute);
    assert_eq!(engine.turns.order().len(), 3);
}

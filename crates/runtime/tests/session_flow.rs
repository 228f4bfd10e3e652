use std::sync::Arc;
use std::time::Duration;

use combat_core::{
    ActionKind, ActionWithUses, AnimationCue, CombatAction, CombatConfig, CombatOutcome,
    CombatState, Direction, Enemy, EnemyKind, IdGenerator, Player, Position, Settings,
    SpeedSetting,
};
use combat_runtime::{
    ChannelInput, CombatEvent, CombatSession, PassInput, PlayerCommand, RecordingAnimator,
    RuntimeError, ScriptedInput, Topic,
};
use tokio::sync::broadcast;

fn instant() -> Settings {
    Settings::new(SpeedSetting::instant(), true)
}

fn player_at(position: Position, hp: u32) -> Player {
    let id = IdGenerator::next_id();
    Player::new(id, hp, position).with_abilities(vec![
        ActionWithUses::new(CombatAction::attack(id, None, 10, 1), 2),
        ActionWithUses::new(CombatAction::movement(id, None), 3),
    ])
}

fn drain(rx: &mut broadcast::Receiver<CombatEvent>) -> Vec<CombatEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn shambler_defeats_weak_player() {
    let config = CombatConfig::default();
    let mut state = CombatState::new(4, 4, player_at(Position::new(0, 0), 5));
    state
        .add_enemy(Enemy::spawn(EnemyKind::RustedShambler, Position::new(1, 0), &config))
        .unwrap();

    let mut session = CombatSession::builder()
        .initial_state(state)
        .settings(instant())
        .player_provider(PassInput)
        .follow_up_events(Some("cleared".into()), Some("retreat".into()))
        .build()
        .unwrap();
    let mut events = session.subscribe_events();

    let report = session.run().await.unwrap();

    assert_eq!(report.outcome, Some(CombatOutcome::Defeat));
    assert_eq!(report.follow_up_event.as_deref(), Some("retreat"));
    assert_eq!(report.player_hp, 0);
    assert_eq!(report.actions_resolved, 1);

    let ended: Vec<_> = drain(&mut events)
        .into_iter()
        .filter(|event| matches!(event, CombatEvent::CombatEnded { .. }))
        .collect();
    assert_eq!(
        ended,
        vec![CombatEvent::CombatEnded {
            outcome: CombatOutcome::Defeat,
            follow_up_event: Some("retreat".into()),
        }]
    );
}

#[tokio::test]
async fn scripted_player_wins_with_two_attacks() {
    let config = CombatConfig::default();
    let mut state = CombatState::new(3, 3, player_at(Position::new(1, 1), 20));
    let left = state
        .add_enemy(Enemy::spawn(EnemyKind::RustedShambler, Position::new(0, 1), &config))
        .unwrap();
    let right = state
        .add_enemy(Enemy::spawn(EnemyKind::RustedShambler, Position::new(2, 1), &config))
        .unwrap();

    let animator = Arc::new(RecordingAnimator::new());
    let mut session = CombatSession::builder()
        .initial_state(state)
        .settings(instant())
        .player_provider(ScriptedInput::new([
            PlayerCommand::Select(0),
            PlayerCommand::Direction(Direction::Right),
            PlayerCommand::Select(0),
            PlayerCommand::Direction(Direction::Left),
            PlayerCommand::EndTurn,
        ]))
        .animator(Arc::clone(&animator))
        .follow_up_events(Some("cleared".into()), None)
        .build()
        .unwrap();
    let mut deaths = session.subscribe(Topic::Action);

    let report = session.run().await.unwrap();

    assert_eq!(report.outcome, Some(CombatOutcome::Victory));
    assert_eq!(report.follow_up_event.as_deref(), Some("cleared"));
    assert_eq!(report.turns_taken, 1);
    assert_eq!(report.enemies_remaining, 0);

    let died: Vec<_> = drain(&mut deaths)
        .into_iter()
        .filter_map(|event| match event {
            CombatEvent::EntityDied { entity } => Some(entity),
            _ => None,
        })
        .collect();
    assert_eq!(died, vec![right, left]);

    let batches = animator.batches().await;
    assert_eq!(batches.len(), 2);
    assert!(
        batches[0]
            .cues
            .iter()
            .any(|cue| matches!(cue, AnimationCue::Death { entity } if *entity == right))
    );
}

#[tokio::test]
async fn repeated_moves_are_compressed_in_events() {
    let config = CombatConfig::default();
    let mut state = CombatState::new(6, 2, player_at(Position::new(5, 0), 20));
    state
        .add_enemy(Enemy::spawn(EnemyKind::RustedBrute, Position::new(0, 1), &config))
        .unwrap();

    let mut session = CombatSession::builder()
        .initial_state(state)
        .settings(instant())
        .player_provider(ScriptedInput::new([
            PlayerCommand::OneClickMove(Direction::Left),
            PlayerCommand::OneClickMove(Direction::Left),
            PlayerCommand::OneClickMove(Direction::Left),
            PlayerCommand::EndTurn,
        ]))
        .build()
        .unwrap();
    let mut decisions = session.subscribe(Topic::Decision);

    session.start().unwrap();
    session.step().await.unwrap();

    let entries: Vec<_> = drain(&mut decisions)
        .into_iter()
        .filter_map(|event| match event {
            CombatEvent::DecisionQueued { entry, .. } => Some(entry),
            _ => None,
        })
        .collect();
    assert_eq!(entries, vec!["Move LEFT x1", "Move LEFT x2", "Move LEFT x3"]);
    assert_eq!(session.state().player.core.position, Position::new(2, 0));
}

#[tokio::test]
async fn invalid_input_is_reported_and_ignored() {
    let config = CombatConfig::default();
    let mut state = CombatState::new(4, 4, player_at(Position::new(0, 0), 20));
    state
        .add_enemy(Enemy::spawn(EnemyKind::RustedBrute, Position::new(3, 3), &config))
        .unwrap();

    let mut session = CombatSession::builder()
        .initial_state(state)
        .settings(Settings::new(SpeedSetting::instant(), false))
        .player_provider(ScriptedInput::new([
            PlayerCommand::Direction(Direction::Up),
            PlayerCommand::Select(9),
            PlayerCommand::OneClickMove(Direction::Right),
            PlayerCommand::EndTurn,
        ]))
        .build()
        .unwrap();
    let mut decisions = session.subscribe(Topic::Decision);

    session.start().unwrap();
    session.step().await.unwrap();

    let codes: Vec<_> = drain(&mut decisions)
        .into_iter()
        .filter_map(|event| match event {
            CombatEvent::InputRejected { code, .. } => Some(code),
            _ => None,
        })
        .collect();
    assert_eq!(
        codes,
        vec![
            "INPUT_NOT_AWAITING_DIRECTION",
            "INPUT_UNKNOWN_ABILITY",
            "INPUT_ONE_CLICK_DISABLED",
        ]
    );
    assert_eq!(session.state().player.core.position, Position::new(0, 0));
}

#[tokio::test]
async fn brute_spends_only_its_move_budget() {
    let config = CombatConfig::default();
    let mut state = CombatState::new(6, 1, player_at(Position::new(0, 0), 20));
    let mut brute = Enemy::spawn(EnemyKind::RustedBrute, Position::new(5, 0), &config);
    let brute_id = brute.core.id;
    brute.actions.insert(
        ActionKind::Move,
        ActionWithUses::new(CombatAction::movement(brute_id, None), 2),
    );
    state.add_enemy(brute).unwrap();

    let mut session = CombatSession::builder()
        .initial_state(state)
        .settings(instant())
        .player_provider(PassInput)
        .build()
        .unwrap();

    session.start().unwrap();
    session.step().await.unwrap();
    session.step().await.unwrap();

    assert_eq!(
        session.state().position_of(brute_id),
        Some(Position::new(3, 0))
    );
    assert_eq!(session.report().actions_resolved, 2);
}

#[tokio::test]
async fn turn_limit_stops_a_stalemate() {
    let config = CombatConfig::default();
    let mut state = CombatState::new(8, 8, player_at(Position::new(7, 7), 20));
    state
        .add_enemy(Enemy::spawn(EnemyKind::RustedShambler, Position::new(0, 0), &config))
        .unwrap();

    let mut session = CombatSession::builder()
        .initial_state(state)
        .settings(instant())
        .player_provider(PassInput)
        .max_turns(4)
        .build()
        .unwrap();

    let report = session.run().await.unwrap();
    assert_eq!(report.outcome, None);
    assert_eq!(report.turns_taken, 4);
    assert_eq!(report.rounds, 3);
}

#[tokio::test]
async fn cancel_interrupts_paced_schedule() {
    let config = CombatConfig::default();
    let mut state = CombatState::new(8, 8, player_at(Position::new(7, 7), 20));
    state
        .add_enemy(Enemy::spawn(EnemyKind::RustedShambler, Position::new(0, 0), &config))
        .unwrap();

    let mut session = CombatSession::builder()
        .initial_state(state)
        .settings(Settings::default())
        .player_provider(PassInput)
        .build()
        .unwrap();
    let cancel = session.cancel_handle();

    session.start().unwrap();
    session.step().await.unwrap();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        cancel.cancel();
    });

    // The shambler thinks for a full second at normal speed.
    let result = tokio::time::timeout(Duration::from_millis(500), session.step())
        .await
        .expect("cancel should interrupt the think delay");
    assert!(matches!(result, Err(RuntimeError::Cancelled)));
    assert!(session.engine().combo.is_empty());
    assert_eq!(session.state().enemies[0].core.position, Position::new(0, 0));
}

#[tokio::test]
async fn channel_input_drives_player_turn() {
    let config = CombatConfig::default();
    let mut state = CombatState::new(3, 1, player_at(Position::new(0, 0), 20));
    let target = state
        .add_enemy(Enemy::spawn(EnemyKind::RustedShambler, Position::new(1, 0), &config))
        .unwrap();

    let (input, tx) = ChannelInput::channel(8);
    let mut session = CombatSession::builder()
        .initial_state(state)
        .settings(instant())
        .player_provider(input)
        .build()
        .unwrap();

    tokio::spawn(async move {
        for command in [
            PlayerCommand::Select(0),
            PlayerCommand::Direction(Direction::Right),
            PlayerCommand::EndTurn,
        ] {
            if tx.send(command).await.is_err() {
                break;
            }
        }
    });

    let report = session.run().await.unwrap();
    assert_eq!(report.outcome, Some(CombatOutcome::Victory));
    assert!(!session.state().is_alive(target));
}

#[tokio::test]
async fn closed_channel_is_an_error() {
    let config = CombatConfig::default();
    let mut state = CombatState::new(3, 1, player_at(Position::new(0, 0), 20));
    state
        .add_enemy(Enemy::spawn(EnemyKind::RustedShambler, Position::new(2, 0), &config))
        .unwrap();

    let (input, tx) = ChannelInput::channel(1);
    drop(tx);
    let mut session = CombatSession::builder()
        .initial_state(state)
        .settings(instant())
        .player_provider(input)
        .build()
        .unwrap();

    assert!(matches!(
        session.run().await,
        Err(RuntimeError::InputChannelClosed)
    ));
}

#[test]
fn builder_requires_state_and_player() {
    assert!(matches!(
        CombatSession::builder().player_provider(PassInput).build(),
        Err(RuntimeError::MissingState)
    ));

    let state = CombatState::new(2, 2, player_at(Position::ORIGIN, 5));
    assert!(matches!(
        CombatSession::builder().initial_state(state).build(),
        Err(RuntimeError::ProviderNotSet { .. })
    ));
}

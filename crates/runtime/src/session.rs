//! Async combat session driver.
//!
//! A [`CombatSession`] owns one [`CombatEngine`] and drives it turn by turn:
//! player turns pull commands from a [`PlayerInputProvider`], enemy and hazard
//! turns play back their decision schedule with the configured pacing, and
//! every executed action is handed to the [`Animator`] before the next one
//! resolves. Only schedule delays and pending player input are cancellable.

use std::sync::Arc;

use combat_core::error::GameError;
use combat_core::{
    CombatAction, CombatConfig, CombatEngine, CombatOutcome, CombatState, DecisionStep,
    ExecutionStep, InputError, Settings, TurnPhase, TurnTaker,
};
use serde::Serialize;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::api::{
    Animator, InstantAnimator, PlayerCommand, PlayerInputProvider, PlayerView, ProviderKind,
    Result, RuntimeError,
};
use crate::events::{CombatEvent, EventBus, Topic};

/// Session configuration shared by the driver loop.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub settings: Settings,
    /// Stop after this many turns even without an outcome.
    pub max_turns: Option<u64>,
    pub event_buffer_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            max_turns: None,
            event_buffer_size: 256,
        }
    }
}

/// Summary returned when a session stops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    /// `None` when the turn limit stopped the session first.
    pub outcome: Option<CombatOutcome>,
    pub follow_up_event: Option<String>,
    pub rounds: u32,
    pub turns_taken: u64,
    pub actions_resolved: u64,
    pub player_hp: u32,
    pub enemies_remaining: usize,
}

/// Cancels pending schedule delays and player input of a running session.
#[derive(Clone)]
pub struct CancelHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

/// Resolves once the cancel flag is raised.
async fn cancelled(rx: &mut watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

pub struct CombatSession {
    engine: CombatEngine,
    config: CombatConfig,
    settings: Settings,
    max_turns: Option<u64>,

    player: Box<dyn PlayerInputProvider>,
    animator: Box<dyn Animator>,
    events: EventBus,

    cancel_tx: Arc<watch::Sender<bool>>,
    cancel_rx: watch::Receiver<bool>,

    victory_event: Option<String>,
    defeat_event: Option<String>,
    end_announced: bool,
    actions_resolved: u64,
}

impl CombatSession {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub fn engine(&self) -> &CombatEngine {
        &self.engine
    }

    pub fn state(&self) -> &CombatState {
        &self.engine.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<CombatEvent> {
        self.events.subscribe_all()
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<CombatEvent> {
        self.events.subscribe(topic)
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            tx: Arc::clone(&self.cancel_tx),
        }
    }

    /// Runs turns until combat ends or the turn limit is hit.
    pub async fn run(&mut self) -> Result<SessionReport> {
        if self.start()?.is_some() {
            return Ok(self.report());
        }

        while !self.engine.turns.is_ended() {
            if let Some(limit) = self.max_turns
                && self.engine.turns.turns_taken() >= limit
            {
                warn!(
                    target: "combat::session",
                    limit,
                    round = self.engine.turns.round(),
                    "Turn limit reached without an outcome"
                );
                break;
            }
            self.step().await?;
        }

        Ok(self.report())
    }

    /// Leaves setup if needed. Returns the outcome when the encounter is
    /// already decided.
    pub fn start(&mut self) -> Result<Option<CombatOutcome>> {
        if self.engine.turns.phase() == TurnPhase::Setup {
            info!(
                target: "combat::session",
                width = self.engine.state.width(),
                height = self.engine.state.height(),
                enemies = self.engine.state.enemies.len(),
                hazards = self.engine.state.hazards.len(),
                "Combat started"
            );
            self.engine.start()?;
        }
        let outcome = self.engine.turns.outcome();
        if let Some(outcome) = outcome {
            self.announce_end(outcome);
        }
        Ok(outcome)
    }

    /// Plays one complete turn: decision, execution and end-of-turn
    /// housekeeping. Returns the outcome if this turn ended combat.
    pub async fn step(&mut self) -> Result<Option<CombatOutcome>> {
        if self.cancel_handle().is_cancelled() {
            return Err(RuntimeError::Cancelled);
        }

        let taker = self.engine.begin_turn()?;
        let round = self.engine.turns.round();
        debug!(
            target: "combat::session",
            taker = %taker.id,
            role = %taker.role,
            round,
            "Turn started"
        );
        self.events.publish(CombatEvent::TurnStarted { taker, round });

        if taker.is_player() {
            self.player_decision().await?;
        } else {
            self.scheduled_decision(taker).await?;
        }
        self.execute().await?;

        if let Some(outcome) = self.engine.turns.outcome() {
            self.announce_end(outcome);
            return Ok(Some(outcome));
        }

        let end = self.engine.end_turn()?;
        for expired in &end.expired {
            debug!(target: "combat::session", hazard = %expired, "Burning floor burnt out");
        }
        self.events.publish(CombatEvent::TurnEnded {
            taker: end.taker,
            expired: end.expired,
        });
        Ok(None)
    }

    async fn player_decision(&mut self) -> Result<()> {
        let mut cancel = self.cancel_rx.clone();

        loop {
            let view = PlayerView {
                state: &self.engine.state,
                mode: self.engine.controller.mode(),
                combo: &self.engine.combo,
                settings: &self.settings,
            };
            let command = tokio::select! {
                command = self.player.next_command(view) => Some(command?),
                _ = cancelled(&mut cancel) => None,
            };
            let Some(command) = command else {
                self.engine.combo.clear();
                return Err(RuntimeError::Cancelled);
            };

            let engine = &mut self.engine;
            let dispatched = match command {
                PlayerCommand::EndTurn => break,
                PlayerCommand::Cancel => {
                    engine.controller.cancel();
                    Ok(None)
                }
                PlayerCommand::Undo => {
                    engine
                        .controller
                        .undo(&mut engine.state.player, &mut engine.combo);
                    debug!(target: "combat::session", "Combo undone");
                    Ok(None)
                }
                PlayerCommand::Select(index) => {
                    engine.controller.select(&mut engine.state.player, index)
                }
                PlayerCommand::Direction(direction) => engine
                    .controller
                    .choose_direction(&mut engine.state.player, direction)
                    .map(Some),
                PlayerCommand::OneClickMove(direction) => engine
                    .controller
                    .one_click_move(&mut engine.state.player, direction, &self.settings)
                    .map(Some),
            };

            match dispatched {
                Ok(Some(action)) => self.enqueue(action),
                Ok(None) => {}
                Err(error) => self.reject(error),
            }
        }

        self.engine.end_decision()?;
        Ok(())
    }

    async fn scheduled_decision(&mut self, taker: TurnTaker) -> Result<()> {
        if let Some(schedule) = self.engine.plan_current_turn() {
            debug!(
                target: "combat::ai",
                taker = %taker.id,
                actions = schedule.actions().count(),
                delay_ms = schedule.total_delay_ms(),
                "Decision planned"
            );
        }

        let mut cancel = self.cancel_rx.clone();
        while let Some(scheduled) = self.engine.turns.next_scheduled_step() {
            let delay = self.settings.timing(scheduled.delay_ms);
            let interrupted = if delay.is_zero() {
                *cancel.borrow()
            } else {
                tokio::select! {
                    _ = tokio::time::sleep(delay) => false,
                    _ = cancelled(&mut cancel) => true,
                }
            };
            if interrupted {
                self.engine.turns.cancel_schedule();
                self.engine.combo.clear();
                debug!(target: "combat::ai", taker = %taker.id, "Decision schedule cancelled");
                return Err(RuntimeError::Cancelled);
            }

            match scheduled.step {
                DecisionStep::Enqueue(action) => self.enqueue(action),
                DecisionStep::EndDecision => break,
            }
        }

        self.engine.end_decision()?;
        Ok(())
    }

    /// Drains the combo list one action at a time, waiting for the animator
    /// between actions.
    async fn execute(&mut self) -> Result<()> {
        if self.engine.turns.phase() != TurnPhase::ExecutingActions {
            return Ok(());
        }

        self.engine.executor.begin()?;
        loop {
            let engine = &mut self.engine;
            let Some(step) = engine.executor.step(
                &mut engine.state,
                &mut engine.combo,
                &mut engine.turns,
                &self.config,
            )?
            else {
                break;
            };
            self.publish_step(&step).await;
        }
        self.engine.executor.finish()?;

        if !self.engine.turns.is_ended() {
            self.engine.turns.finish_execution()?;
        }
        Ok(())
    }

    async fn publish_step(&mut self, step: &ExecutionStep) {
        let outcome = match &step.outcome {
            Ok(outcome) => outcome,
            Err(error) => {
                debug!(
                    target: "combat::session",
                    action = %step.action,
                    %error,
                    "Skipped stale action"
                );
                self.events.publish(CombatEvent::ActionSkipped {
                    action: step.action.clone(),
                    error: error.to_string(),
                });
                return;
            }
        };

        self.actions_resolved += 1;
        let batch = step.animations();
        debug!(
            target: "combat::session",
            action = %step.action,
            actor = %step.action.actor(),
            cues = batch.cues.len(),
            "Action resolved"
        );
        self.events.publish(CombatEvent::ActionResolved {
            action: step.action.clone(),
            animations: batch.clone(),
        });
        self.animator.animate(&batch).await;

        for &entity in &outcome.deaths {
            info!(target: "combat::session", %entity, "Entity died");
            self.events.publish(CombatEvent::EntityDied { entity });
        }
        for &record in &outcome.spawned {
            debug!(
                target: "combat::session",
                entity = %record.id,
                position = %record.position,
                "Entity spawned"
            );
            self.events.publish(CombatEvent::EntitySpawned { record });
        }
    }

    fn enqueue(&mut self, action: CombatAction) {
        let actor = action.actor();
        let entry = self.engine.enqueue(action).to_string();
        debug!(target: "combat::session", %actor, %entry, "Queued");
        self.events
            .publish(CombatEvent::DecisionQueued { actor, entry });
    }

    fn reject(&self, error: InputError) {
        warn!(
            target: "combat::session",
            code = error.error_code(),
            %error,
            "Player input rejected"
        );
        self.events.publish(CombatEvent::InputRejected {
            code: error.error_code().to_owned(),
            error: error.to_string(),
        });
    }

    fn follow_up_event(&self, outcome: CombatOutcome) -> Option<String> {
        match outcome {
            CombatOutcome::Victory => self.victory_event.clone(),
            CombatOutcome::Defeat => self.defeat_event.clone(),
        }
    }

    fn announce_end(&mut self, outcome: CombatOutcome) {
        if self.end_announced {
            return;
        }
        self.end_announced = true;

        let follow_up_event = self.follow_up_event(outcome);
        info!(
            target: "combat::session",
            %outcome,
            round = self.engine.turns.round(),
            turns = self.engine.turns.turns_taken(),
            follow_up = follow_up_event.as_deref().unwrap_or("-"),
            "Combat ended"
        );
        self.events.publish(CombatEvent::CombatEnded {
            outcome,
            follow_up_event,
        });
    }

    pub fn report(&self) -> SessionReport {
        let outcome = self.engine.turns.outcome();
        SessionReport {
            outcome,
            follow_up_event: outcome.and_then(|outcome| self.follow_up_event(outcome)),
            rounds: self.engine.turns.round(),
            turns_taken: self.engine.turns.turns_taken(),
            actions_resolved: self.actions_resolved,
            player_hp: self.engine.state.player.core.hp.current,
            enemies_remaining: self.engine.state.living_enemies().count(),
        }
    }
}

/// Builder for [`CombatSession`] with flexible configuration.
pub struct SessionBuilder {
    config: SessionConfig,
    combat_config: CombatConfig,
    state: Option<CombatState>,
    player: Option<Box<dyn PlayerInputProvider>>,
    animator: Option<Box<dyn Animator>>,
    victory_event: Option<String>,
    defeat_event: Option<String>,
}

impl SessionBuilder {
    fn new() -> Self {
        Self {
            config: SessionConfig::default(),
            combat_config: CombatConfig::default(),
            state: None,
            player: None,
            animator: None,
            victory_event: None,
            defeat_event: None,
        }
    }

    /// Override session configuration
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.config.settings = settings;
        self
    }

    pub fn max_turns(mut self, max_turns: u64) -> Self {
        self.config.max_turns = Some(max_turns);
        self
    }

    pub fn combat_config(mut self, config: CombatConfig) -> Self {
        self.combat_config = config;
        self
    }

    /// Provide initial combat state
    pub fn initial_state(mut self, state: CombatState) -> Self {
        self.state = Some(state);
        self
    }

    /// Set player input provider (required)
    pub fn player_provider(mut self, provider: impl PlayerInputProvider + 'static) -> Self {
        self.player = Some(Box::new(provider));
        self
    }

    /// Set animator (defaults to [`InstantAnimator`])
    pub fn animator(mut self, animator: impl Animator + 'static) -> Self {
        self.animator = Some(Box::new(animator));
        self
    }

    /// Follow-up events reported when combat ends.
    pub fn follow_up_events(
        mut self,
        victory_event: Option<String>,
        defeat_event: Option<String>,
    ) -> Self {
        self.victory_event = victory_event;
        self.defeat_event = defeat_event;
        self
    }

    /// Build the session
    pub fn build(self) -> Result<CombatSession> {
        let state = self.state.ok_or(RuntimeError::MissingState)?;
        let player = self.player.ok_or(RuntimeError::ProviderNotSet {
            kind: ProviderKind::Player,
        })?;
        let animator = self
            .animator
            .unwrap_or_else(|| Box::new(InstantAnimator));

        let (cancel_tx, cancel_rx) = watch::channel(false);

        Ok(CombatSession {
            engine: CombatEngine::new(state, self.combat_config.clone()),
            config: self.combat_config,
            settings: self.config.settings,
            max_turns: self.config.max_turns,
            player,
            animator,
            events: EventBus::with_capacity(self.config.event_buffer_size),
            cancel_tx: Arc::new(cancel_tx),
            cancel_rx,
            victory_event: self.victory_event,
            defeat_event: self.defeat_event,
            end_announced: false,
            actions_resolved: 0,
        })
    }
}

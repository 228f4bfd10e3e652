//! Text presentation for headless runs: an animator that logs cues and a
//! task that mirrors the event bus into the log.
use std::time::Duration;

use async_trait::async_trait;
use combat_core::{AnimationBatch, AnimationCue};
use combat_runtime::{Animator, CombatEvent};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Logs every cue and holds for `cue_delay` per cue.
pub struct LogAnimator {
    cue_delay: Duration,
}

impl LogAnimator {
    pub fn new(cue_delay: Duration) -> Self {
        Self { cue_delay }
    }
}

#[async_trait]
impl Animator for LogAnimator {
    async fn animate(&self, batch: &AnimationBatch) {
        for cue in &batch.cues {
            debug!(target: "combat::sim", cue = %describe(cue), "Animation");
            if !self.cue_delay.is_zero() {
                tokio::time::sleep(self.cue_delay).await;
            }
        }
    }
}

fn describe(cue: &AnimationCue) -> String {
    match cue {
        AnimationCue::Move { entity, from, to } => format!("{entity} moves {from} -> {to}"),
        AnimationCue::Hit { entity, amount } => format!("{entity} takes {amount}"),
        AnimationCue::Death { entity } => format!("{entity} dies"),
        other => format!("{other:?}"),
    }
}

/// Spawns a task logging bus events until the bus closes. Resolves to the
/// number of events seen.
pub fn spawn_event_log(mut rx: broadcast::Receiver<CombatEvent>) -> JoinHandle<u64> {
    tokio::spawn(async move {
        let mut seen = 0;
        loop {
            match rx.recv().await {
                Ok(event) => {
                    seen += 1;
                    log_event(&event);
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(target: "combat::sim", skipped, "Event log fell behind");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        seen
    })
}

fn log_event(event: &CombatEvent) {
    match event {
        CombatEvent::TurnStarted { taker, round } => {
            info!(target: "combat::sim", round, taker = %taker.id, role = %taker.role, "Turn");
        }
        CombatEvent::DecisionQueued { actor, entry } => {
            info!(target: "combat::sim", %actor, "  queued {entry}");
        }
        CombatEvent::ActionResolved { action, .. } => {
            info!(target: "combat::sim", "  {action}");
        }
        CombatEvent::ActionSkipped { action, error } => {
            info!(target: "combat::sim", "  {action} skipped: {error}");
        }
        CombatEvent::EntityDied { entity } => {
            info!(target: "combat::sim", "  {entity} died");
        }
        CombatEvent::CombatEnded {
            outcome,
            follow_up_event,
        } => {
            info!(
                target: "combat::sim",
                follow_up = follow_up_event.as_deref().unwrap_or("-"),
                "Combat ended: {outcome}"
            );
        }
        other => debug!(target: "combat::sim", event = ?other, "Event"),
    }
}

#[cfg(test)]
mod tests {
    use combat_core::IdGenerator;
    use combat_runtime::EventBus;

    use super::*;

    #[tokio::test]
    async fn event_log_counts_until_the_bus_closes() {
        let bus = EventBus::new();
        let handle = spawn_event_log(bus.subscribe_all());

        let entity = IdGenerator::next_id();
        bus.publish(CombatEvent::EntityDied { entity });
        bus.publish(CombatEvent::EntityDied { entity });
        drop(bus);

        assert_eq!(handle.await.unwrap(), 2);
    }
}

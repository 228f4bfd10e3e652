//! Topic-based event bus implementation.

use tokio::sync::broadcast;

use super::types::{CombatEvent, Topic};

/// Topic-based event bus
///
/// Every event goes to the `all` channel and to its topic channel, so
/// consumers can either follow the whole session or only what they care about.
#[derive(Clone)]
pub struct EventBus {
    all: broadcast::Sender<CombatEvent>,
    turn: broadcast::Sender<CombatEvent>,
    decision: broadcast::Sender<CombatEvent>,
    action: broadcast::Sender<CombatEvent>,
    combat: broadcast::Sender<CombatEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            all: broadcast::channel(capacity).0,
            turn: broadcast::channel(capacity).0,
            decision: broadcast::channel(capacity).0,
            action: broadcast::channel(capacity).0,
            combat: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<CombatEvent> {
        match topic {
            Topic::Turn => &self.turn,
            Topic::Decision => &self.decision,
            Topic::Action => &self.action,
            Topic::Combat => &self.combat,
        }
    }

    /// Publish an event to its topic and to the firehose.
    ///
    /// Events are best-effort: having no subscribers is normal.
    pub fn publish(&self, event: CombatEvent) {
        let topic = event.topic();
        if self.sender(topic).send(event.clone()).is_err() {
            tracing::trace!(target: "combat::events", "No subscribers for topic {:?}", topic);
        }
        let _ = self.all.send(event);
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<CombatEvent> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to every event in publication order.
    pub fn subscribe_all(&self) -> broadcast::Receiver<CombatEvent> {
        self.all.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

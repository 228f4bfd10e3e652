use std::collections::VecDeque;
use std::fmt;

use super::CombatAction;

/// A combo list entry: an action repeated `repeat` times in a row.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueuedAction {
    pub action: CombatAction,
    pub repeat: u32,
}

impl QueuedAction {
    pub fn new(action: CombatAction) -> Self {
        Self { action, repeat: 1 }
    }

    /// Same kind, direction and actor. Numeric parameters are not compared.
    pub fn is_equivalent(&self, action: &CombatAction) -> bool {
        self.action.kind() == action.kind()
            && self.action.direction() == action.direction()
            && self.action.actor() == action.actor()
    }
}

impl fmt::Display for QueuedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x{}", self.action, self.repeat)
    }
}

/// FIFO of pending actions with run-length compression of repeats.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComboList {
    entries: VecDeque<QueuedAction>,
}

impl ComboList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `action`, folding it into the last entry when equivalent.
    /// Returns the entry that now holds it.
    pub fn push(&mut self, action: CombatAction) -> &QueuedAction {
        let extends_last = self
            .entries
            .back()
            .is_some_and(|last| last.is_equivalent(&action));

        if extends_last {
            if let Some(last) = self.entries.back_mut() {
                last.repeat += 1;
            }
        } else {
            self.entries.push_back(QueuedAction::new(action));
        }

        &self.entries[self.entries.len() - 1]
    }

    /// Takes the next single action, consuming one repeat of the head entry.
    pub fn pop_next(&mut self) -> Option<CombatAction> {
        let head = self.entries.front_mut()?;
        if head.repeat > 1 {
            head.repeat -= 1;
            return Some(head.action.clone());
        }
        self.entries.pop_front().map(|entry| entry.action)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of compressed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of individual actions still to run.
    pub fn pending_actions(&self) -> u32 {
        self.entries.iter().map(|entry| entry.repeat).sum()
    }

    pub fn entries(&self) -> impl Iterator<Item = &QueuedAction> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Direction, EntityId};

    fn step(actor: u32, direction: Direction) -> CombatAction {
        CombatAction::movement(EntityId(actor), Some(direction))
    }

    #[test]
    fn consecutive_equivalent_actions_compress() {
        let mut combo = ComboList::new();
        combo.push(step(1, Direction::Left));
        combo.push(step(1, Direction::Left));
        let entry = combo.push(step(1, Direction::Left));

        assert_eq!(entry.to_string(), "Move LEFT x3");
        assert_eq!(combo.len(), 1);
    }

    #[test]
    fn different_direction_or_actor_starts_new_entry() {
        let mut combo = ComboList::new();
        combo.push(step(1, Direction::Left));
        combo.push(step(1, Direction::Up));
        combo.push(step(2, Direction::Up));
        combo.push(step(1, Direction::Left));

        assert_eq!(combo.len(), 4);
        assert_eq!(combo.pending_actions(), 4);
    }

    #[test]
    fn pop_expands_repeats_in_order() {
        let mut combo = ComboList::new();
        combo.push(step(1, Direction::Down));
        combo.push(step(1, Direction::Down));
        combo.push(CombatAction::block(EntityId(1), 3));

        assert_eq!(combo.pop_next(), Some(step(1, Direction::Down)));
        assert_eq!(combo.pop_next(), Some(step(1, Direction::Down)));
        assert_eq!(combo.pop_next(), Some(CombatAction::block(EntityId(1), 3)));
        assert_eq!(combo.pop_next(), None);
        assert!(combo.is_empty());
    }
}

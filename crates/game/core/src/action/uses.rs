use crate::state::Direction;

use super::{ActionKind, CombatAction};

/// Ability slot: a template action plus a per-turn uses budget.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionWithUses {
    template: CombatAction,
    uses: u32,
    max_uses: u32,
    bypass_use_limits: bool,
}

impl ActionWithUses {
    pub fn new(template: CombatAction, max_uses: u32) -> Self {
        Self {
            template,
            uses: max_uses,
            max_uses,
            bypass_use_limits: false,
        }
    }

    /// A slot that never runs out.
    pub fn unlimited(template: CombatAction) -> Self {
        Self::new(template, 0).with_bypass(true)
    }

    pub fn with_bypass(mut self, bypass_use_limits: bool) -> Self {
        self.bypass_use_limits = bypass_use_limits;
        self
    }

    pub fn kind(&self) -> ActionKind {
        self.template.kind()
    }

    pub fn template(&self) -> &CombatAction {
        &self.template
    }

    pub fn uses(&self) -> u32 {
        self.uses
    }

    pub fn max_uses(&self) -> u32 {
        self.max_uses
    }

    pub fn bypasses_use_limits(&self) -> bool {
        self.bypass_use_limits
    }

    pub fn is_directional(&self) -> bool {
        self.template.is_directional()
    }

    pub fn has_uses(&self) -> bool {
        self.bypass_use_limits || self.uses > 0
    }

    /// Spends one use and returns the concrete action, aimed at `direction`
    /// when one is given. Returns `None` without touching the budget when no
    /// uses remain.
    pub fn dispatch(&mut self, direction: Option<Direction>) -> Option<CombatAction> {
        if !self.has_uses() {
            return None;
        }
        if !self.bypass_use_limits {
            self.uses -= 1;
        }

        Some(match direction {
            Some(direction) => self.template.with_direction(direction),
            None => self.template.clone(),
        })
    }

    pub fn reset(&mut self) {
        self.uses = self.max_uses;
    }
}

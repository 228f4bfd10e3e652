use std::collections::VecDeque;

use crate::action::CombatAction;

/// What a decision routine does once a step's delay has elapsed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecisionStep {
    Enqueue(CombatAction),
    EndDecision,
}

/// One paced step. `delay_ms` is a base delay, scaled by the speed setting
/// when the schedule is played.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduledStep {
    pub delay_ms: u64,
    pub step: DecisionStep,
}

/// Ordered plan produced by a decision routine.
///
/// Built fluently: `wait` accumulates delay that is attached to the next
/// enqueued step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecisionSchedule {
    steps: VecDeque<ScheduledStep>,
    pending_delay_ms: u64,
}

impl DecisionSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wait(&mut self, delay_ms: u64) -> &mut Self {
        self.pending_delay_ms += delay_ms;
        self
    }

    pub fn enqueue(&mut self, action: CombatAction) -> &mut Self {
        self.push(DecisionStep::Enqueue(action))
    }

    pub fn end_decision(&mut self) -> &mut Self {
        self.push(DecisionStep::EndDecision)
    }

    fn push(&mut self, step: DecisionStep) -> &mut Self {
        let delay_ms = std::mem::take(&mut self.pending_delay_ms);
        self.steps.push_back(ScheduledStep { delay_ms, step });
        self
    }

    pub fn pop_front(&mut self) -> Option<ScheduledStep> {
        self.steps.pop_front()
    }

    pub fn steps(&self) -> impl Iterator<Item = &ScheduledStep> {
        self.steps.iter()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Actions the schedule will enqueue, in order.
    pub fn actions(&self) -> impl Iterator<Item = &CombatAction> {
        self.steps.iter().filter_map(|scheduled| match &scheduled.step {
            DecisionStep::Enqueue(action) => Some(action),
            DecisionStep::EndDecision => None,
        })
    }

    pub fn total_delay_ms(&self) -> u64 {
        self.steps.iter().map(|scheduled| scheduled.delay_ms).sum()
    }
}

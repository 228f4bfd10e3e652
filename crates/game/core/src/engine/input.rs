//! Player ability selection.

use crate::action::{ActionKind, CombatAction, ComboList};
use crate::env::Settings;
use crate::state::{Direction, Player};

use super::InputError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputMode {
    #[default]
    Idle,
    /// A directional ability was selected and waits for its direction.
    AwaitingDirection { ability: usize },
}

/// Turns ability-bar input into concrete actions.
///
/// Dispatched actions are returned to the caller, which appends them to the
/// combo list; the controller itself only spends ability uses.
#[derive(Clone, Debug, Default)]
pub struct PlayerController {
    mode: InputMode,
}

impl PlayerController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Selects the ability in slot `index`.
    ///
    /// Non-directional abilities dispatch immediately. Directional ones enter
    /// [`InputMode::AwaitingDirection`] and return `None`.
    pub fn select(
        &mut self,
        player: &mut Player,
        index: usize,
    ) -> Result<Option<CombatAction>, InputError> {
        let ability = player
            .abilities
            .get_mut(index)
            .ok_or(InputError::UnknownAbility { index })?;
        if !ability.has_uses() {
            return Err(InputError::NoUsesRemaining {
                kind: ability.kind(),
            });
        }

        if ability.is_directional() {
            self.mode = InputMode::AwaitingDirection { ability: index };
            return Ok(None);
        }

        self.mode = InputMode::Idle;
        let kind = ability.kind();
        ability
            .dispatch(None)
            .map(Some)
            .ok_or(InputError::NoUsesRemaining { kind })
    }

    /// Completes a pending directional selection.
    pub fn choose_direction(
        &mut self,
        player: &mut Player,
        direction: Direction,
    ) -> Result<CombatAction, InputError> {
        let InputMode::AwaitingDirection { ability: index } = self.mode else {
            return Err(InputError::NotAwaitingDirection);
        };
        self.mode = InputMode::Idle;

        let ability = player
            .abilities
            .get_mut(index)
            .ok_or(InputError::UnknownAbility { index })?;
        let kind = ability.kind();
        ability
            .dispatch(Some(direction))
            .ok_or(InputError::NoUsesRemaining { kind })
    }

    /// Leaves directional mode without spending anything. Returns whether a
    /// selection was pending.
    pub fn cancel(&mut self) -> bool {
        let was_pending = matches!(self.mode, InputMode::AwaitingDirection { .. });
        self.mode = InputMode::Idle;
        was_pending
    }

    /// Dispatches the Move ability from a bare direction input.
    ///
    /// While a directional selection is pending the direction completes that
    /// selection instead.
    pub fn one_click_move(
        &mut self,
        player: &mut Player,
        direction: Direction,
        settings: &Settings,
    ) -> Result<CombatAction, InputError> {
        if matches!(self.mode, InputMode::AwaitingDirection { .. }) {
            return self.choose_direction(player, direction);
        }
        if !settings.one_click_move {
            return Err(InputError::OneClickDisabled);
        }

        let kind = ActionKind::Move;
        let index = player
            .ability_index(kind)
            .ok_or(InputError::MissingAbility { kind })?;
        player.abilities[index]
            .dispatch(Some(direction))
            .ok_or(InputError::NoUsesRemaining { kind })
    }

    /// Throws away the pending combo and restores every ability use.
    pub fn undo(&mut self, player: &mut Player, combo: &mut ComboList) {
        combo.clear();
        player.reset_ability_uses();
        self.mode = InputMode::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionWithUses;
    use crate::state::{IdGenerator, Position};

    fn player() -> Player {
        let id = IdGenerator::next_id();
        Player::new(id, 20, Position::ORIGIN).with_abilities(vec![
            ActionWithUses::new(CombatAction::movement(id, None), 2),
            ActionWithUses::new(CombatAction::block(id, 3), 1),
        ])
    }

    #[test]
    fn directional_ability_waits_for_direction() {
        let mut player = player();
        let mut controller = PlayerController::new();

        assert_eq!(controller.select(&mut player, 0).unwrap(), None);
        let action = controller
            .choose_direction(&mut player, Direction::Left)
            .unwrap();

        assert_eq!(action.to_string(), "Move LEFT");
        assert_eq!(player.abilities[0].uses(), 1);
        assert_eq!(controller.mode(), InputMode::Idle);
    }

    #[test]
    fn cancel_spends_nothing() {
        let mut player = player();
        let mut controller = PlayerController::new();

        controller.select(&mut player, 0).unwrap();
        assert!(controller.cancel());
        assert!(!controller.cancel());
        assert_eq!(player.abilities[0].uses(), 2);
        assert_eq!(
            controller.choose_direction(&mut player, Direction::Up),
            Err(InputError::NotAwaitingDirection)
        );
    }

    #[test]
    fn exhausted_ability_is_rejected() {
        let mut player = player();
        let mut controller = PlayerController::new();

        assert!(controller.select(&mut player, 1).unwrap().is_some());
        assert_eq!(
            controller.select(&mut player, 1),
            Err(InputError::NoUsesRemaining {
                kind: ActionKind::Block
            })
        );
        assert_eq!(
            controller.select(&mut player, 9),
            Err(InputError::UnknownAbility { index: 9 })
        );
    }

    #[test]
    fn one_click_move_respects_setting() {
        let mut player = player();
        let mut controller = PlayerController::new();
        let mut settings = Settings::default();

        assert_eq!(
            controller.one_click_move(&mut player, Direction::Down, &settings),
            Err(InputError::OneClickDisabled)
        );

        settings.one_click_move = true;
        let action = controller
            .one_click_move(&mut player, Direction::Down, &settings)
            .unwrap();
        assert_eq!(action.direction(), Some(Direction::Down));
        assert_eq!(player.abilities[0].uses(), 1);
    }

    #[test]
    fn undo_restores_uses_and_clears_combo() {
        let mut player = player();
        let mut controller = PlayerController::new();
        let mut combo = ComboList::new();

        controller.select(&mut player, 0).unwrap();
        let step = controller
            .choose_direction(&mut player, Direction::Right)
            .unwrap();
        combo.push(step);

        controller.undo(&mut player, &mut combo);
        assert!(combo.is_empty());
        assert_eq!(player.abilities[0].uses(), 2);
    }
}

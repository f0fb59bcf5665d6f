use crate::action::Action;
use crate::state::GameStateView;

/// Interface for automated or interactive players. Called only on the bot's own turn.
pub trait Bot {
    fn select_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action;
}

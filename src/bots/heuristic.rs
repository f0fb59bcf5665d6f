use crate::action::Action;
use crate::bot::Bot;
use crate::card::{COLORS, Card, Color, Value};
use crate::state::GameStateView;

/// Rule-based bot that plays "sensible" moves without search.
///
/// In plain English:
/// - Play a colored card whenever one fits; action cards first, since in a two-seat
///   game skip and reverse hand the turn straight back.
/// - Among numbers, shed the highest value first so less is left to score against us.
/// - Hold black cards until nothing else fits, then name the color we hold most of.
/// - Always call UNO.
#[derive(Default)]
pub struct HeuristicBot;

impl HeuristicBot {
    pub fn new() -> Self {
        Self
    }

    fn favourite_color(hand: &[Card]) -> Color {
        COLORS
            .iter()
            .copied()
            .max_by_key(|color| hand.iter().filter(|c| c.color == *color).count())
            .unwrap_or(Color::Red)
    }

    fn score_play(card: Card) -> i32 {
        match card.value {
            Value::DrawTwo => 300,
            Value::Skip | Value::Reverse => 250,
            Value::Number(n) => 100 + i32::from(n),
            Value::Wild => 20,
            Value::DrawFour => 10,
        }
    }
}

impl Bot for HeuristicBot {
    fn select_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action {
        let hand = state.hand(&state.current_player_id);
        let favourite = Self::favourite_color(hand);
        legal_actions
            .iter()
            .filter_map(|action| match *action {
                Action::Play { card, color, .. } => {
                    if card.is_black() && color != Some(favourite) {
                        return None;
                    }
                    Some((
                        Self::score_play(card),
                        Action::Play {
                            card,
                            color,
                            uno: hand.len() == 2,
                        },
                    ))
                }
                Action::Draw => None,
            })
            .max_by_key(|(score, _)| *score)
            .map(|(_, action)| action)
            .unwrap_or(Action::Draw)
    }
}

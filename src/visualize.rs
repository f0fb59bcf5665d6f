use std::fmt::Write;

use crate::action::Action;
use crate::card::{Card, Value};
use crate::state::{GameStateView, GameStatus};

/// Customize state rendering for CLI visualization.
#[derive(Clone, Copy, Debug, Default)]
pub struct VisualOptions {
    /// Print every hand face up instead of only the current player's.
    pub reveal_all_hands: bool,
}

pub fn render_state(state: &GameStateView) -> String {
    render_state_with_options(state, VisualOptions::default())
}

pub fn render_state_with_options(state: &GameStateView, options: VisualOptions) -> String {
    let mut out = String::new();
    let status = match &state.status {
        GameStatus::Ongoing => String::from("Ongoing"),
        GameStatus::Finished { winner } => format!("Finished (winner: {winner})"),
    };
    let _ = writeln!(out, "Game status: {status}");
    let color = state
        .current_color
        .map(|c| c.to_string())
        .unwrap_or_else(|| String::from("--"));
    let _ = writeln!(
        out,
        "Top card: {}  |  Color: {}  |  Draw pile: {}",
        format_card(state.top_card),
        color,
        state.draw_pile_count
    );
    if let Some(owed_by) = &state.pending_for_player_id {
        let _ = writeln!(out, "Pending draw: {} owes {}", owed_by, state.pending_draw_count);
    }
    let _ = writeln!(out, "Players:");
    for (id, hand) in &state.hands {
        let is_current = *id == state.current_player_id;
        let current_tag = if is_current { " <- current" } else { "" };
        if is_current || options.reveal_all_hands {
            let cards = hand
                .iter()
                .map(|card| format_card(*card))
                .collect::<Vec<_>>()
                .join(" ");
            let _ = writeln!(out, "  {id}{current_tag}");
            let _ = writeln!(out, "    Hand: {}", if cards.is_empty() { "(empty)" } else { cards.as_str() });
        } else {
            let _ = writeln!(out, "  {id} - {} cards{current_tag}", hand.len());
        }
    }
    out
}

pub fn describe_action(state: &GameStateView, action: &Action) -> String {
    match action {
        Action::Draw if state.pending_draw_count > 0 => {
            format!("Draw (owed: {})", state.pending_draw_count)
        }
        Action::Draw => String::from("Draw a card"),
        Action::Play { card, color, uno } => {
            let mut text = format!("Play {}", format_card(*card));
            if let Some(color) = color {
                let _ = write!(text, " and choose {color}");
            }
            if *uno {
                text.push_str(" (UNO!)");
            }
            text
        }
    }
}

fn format_card(card: Card) -> String {
    let value = match card.value {
        Value::Number(n) => n.to_string(),
        Value::DrawTwo => String::from("+2"),
        Value::Reverse => String::from("Rev"),
        Value::Skip => String::from("Skip"),
        Value::Wild => return String::from("Wild"),
        Value::DrawFour => return String::from("+4"),
    };
    let mut color = card.color.to_string();
    color[..1].make_ascii_uppercase();
    format!("{color} {value}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{COLORS, Color};
    use crate::game::GameBuilder;
    use crate::player::Player;

    #[test]
    fn render_and_describe_include_expected_phrases() {
        let game = GameBuilder::new([Player::new("ann"), Player::new("ben")])
            .build()
            .expect("game");
        let view = game.state_view().expect("state view");
        let text = render_state(&view);
        assert!(text.contains("Top card:"));
        assert!(text.contains("<- current"));
        assert!(text.contains("Hand:"));
        let wild = Action::Play {
            card: Card::wild(),
            color: Some(COLORS[1]),
            uno: true,
        };
        let desc = describe_action(&view, &wild);
        assert!(desc.contains("choose blue"));
        assert!(desc.contains("UNO"));
    }

    #[test]
    fn formats_cards_compactly() {
        assert_eq!(format_card(Card::number(Color::Red, 4)), "Red 4");
        assert_eq!(format_card(Card::new(Color::Yellow, Value::DrawTwo)), "Yellow +2");
        assert_eq!(format_card(Card::draw_four()), "+4");
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::card::{Card, Color};

/// Action available to an agent during its turn.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Take the top card of the draw pile.
    Draw,
    /// Play a card from the hand. `color` is required for black cards.
    Play {
        card: Card,
        color: Option<Color>,
        uno: bool,
    },
}

impl Action {
    pub fn card(&self) -> Option<Card> {
        match self {
            Action::Play { card, .. } => Some(*card),
            Action::Draw => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Draw => f.write_str("draw"),
            Action::Play { card, color, uno } => {
                write!(f, "play {card}")?;
                if let Some(color) = color {
                    write!(f, " as {color}")?;
                }
                if *uno {
                    f.write_str(" (UNO!)")?;
                }
                Ok(())
            }
        }
    }
}

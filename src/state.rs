use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::card::{Card, Color};
use crate::player::{Player, PlayerId};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 2;
pub const HAND_SIZE: usize = 7;

/// Global constants for a running game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSettings {
    pub min_players: usize,
    pub max_players: usize,
    pub hand_size: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            min_players: MIN_PLAYERS,
            max_players: MAX_PLAYERS,
            hand_size: HAND_SIZE,
        }
    }
}

/// Status of the entire game.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Finished { winner: PlayerId },
}

/// Order in which seats take turns.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn sign(self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Cards a specific seat owes before it may play.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PendingDraw {
    pub count: u8,
    pub seat: usize,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum GameOverReason {
    Won,
    Error,
    InsufficientPlayers,
}

/// Terminal transition reported to the room layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameOver {
    Won { winner: Player, score: u32 },
    Error(String),
    InsufficientPlayers,
}

impl GameOver {
    pub fn reason(&self) -> GameOverReason {
        match self {
            GameOver::Won { .. } => GameOverReason::Won,
            GameOver::Error(_) => GameOverReason::Error,
            GameOver::InsufficientPlayers => GameOverReason::InsufficientPlayers,
        }
    }
}

/// Read-only snapshot handed to clients and serializers.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStateView {
    pub hands: BTreeMap<PlayerId, Vec<Card>>,
    pub top_card: Card,
    pub current_player_id: PlayerId,
    pub current_color: Option<Color>,
    pub pending_draw_count: u8,
    pub pending_for_player_id: Option<PlayerId>,
    pub status: GameStatus,
    pub draw_pile_count: usize,
}

impl GameStateView {
    pub fn hand(&self, player: &PlayerId) -> &[Card] {
        self.hands.get(player).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, GameStatus::Finished { .. })
    }
}

//! Versioned storage schema for a whole game.
//!
//! Rooms do not keep a live engine between requests; they store a [`GameRecord`]
//! and rebuild the [`Game`] from it on the next action.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::card::{Card, Color, DECK_SIZE};
use crate::deck::is_standard;
use crate::error::GameError;
use crate::game::Game;
use crate::player::{Player, PlayerId};
use crate::rng::GameRng;
use crate::state::{Direction, GameSettings, GameStatus, PendingDraw};

pub const RECORD_VERSION: u16 = 1;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameRecord {
    pub version: u16,
    pub room: String,
    pub settings: GameSettings,
    pub status: GameStatus,
    pub players: Vec<Player>,
    pub hands: BTreeMap<PlayerId, Vec<Card>>,
    pub discard: Vec<Card>,
    pub draw_pile: Vec<Card>,
    pub current_index: usize,
    pub direction: Direction,
    pub current_color: Option<Color>,
    pub pending: Option<PendingDraw>,
    pub rng: GameRng,
}

impl Game {
    pub fn to_record(&self) -> GameRecord {
        GameRecord {
            version: RECORD_VERSION,
            room: self.room.clone(),
            settings: self.settings,
            status: self.status.clone(),
            players: self.players.clone(),
            hands: self.hands.clone(),
            discard: self.discard.clone(),
            draw_pile: self.draw_pile.clone(),
            current_index: self.current_index,
            direction: self.direction,
            current_color: self.current_color,
            pending: self.pending,
            rng: self.rng,
        }
    }

    /// Rebuilds a game, rejecting records that break the engine's invariants.
    pub fn from_record(record: GameRecord) -> Result<Self, GameError> {
        if record.version != RECORD_VERSION {
            return Err(GameError::UnsupportedRecordVersion(record.version));
        }
        if record.discard.is_empty() {
            return Err(GameError::CorruptRecord("discard pile is empty"));
        }
        if record.players.is_empty() {
            return Err(GameError::CorruptRecord("record has no players"));
        }
        if record.current_index >= record.players.len() {
            return Err(GameError::CorruptRecord("current seat out of range"));
        }
        if let Some(pending) = record.pending {
            if pending.seat >= record.players.len() {
                return Err(GameError::CorruptRecord("pending draw seat out of range"));
            }
        }
        if record.players.iter().any(|p| !record.hands.contains_key(&p.id)) {
            return Err(GameError::CorruptRecord("seated player has no hand"));
        }
        let mut cards: Vec<Card> = Vec::with_capacity(DECK_SIZE);
        cards.extend(record.hands.values().flatten().copied());
        cards.extend_from_slice(&record.discard);
        cards.extend_from_slice(&record.draw_pile);
        if !is_standard(&cards) {
            return Err(GameError::CorruptRecord("cards do not form a standard deck"));
        }

        Ok(Game {
            room: record.room,
            settings: record.settings,
            status: record.status,
            players: record.players,
            hands: record.hands,
            discard: record.discard,
            draw_pile: record.draw_pile,
            current_index: record.current_index,
            direction: record.direction,
            current_color: record.current_color,
            pending: record.pending,
            rng: record.rng,
        })
    }
}

pub fn encode(game: &Game) -> Result<Vec<u8>, GameError> {
    Ok(bincode::serde::encode_to_vec(
        game.to_record(),
        bincode::config::standard(),
    )?)
}

pub fn decode(bytes: &[u8]) -> Result<Game, GameError> {
    let (record, _): (GameRecord, usize) =
        bincode::serde::decode_from_slice(bytes, bincode::config::standard())?;
    Game::from_record(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameBuilder;
    use crate::notify::RecordingNotifier;

    fn game() -> Game {
        GameBuilder::new([Player::new("ann"), Player::new("ben")])
            .with_room("r1")
            .with_seed(11)
            .build()
            .expect("game")
    }

    #[test]
    fn bytes_restore_the_same_game() -> Result<(), GameError> {
        let mut game = game();
        let current = game.current_player().id.clone();
        game.draw(current.as_str(), &mut RecordingNotifier::new())?;
        let restored = decode(&encode(&game)?)?;
        assert_eq!(restored.to_record(), game.to_record());
        Ok(())
    }

    #[test]
    fn restored_game_keeps_future_randomness() -> Result<(), GameError> {
        let mut original = game();
        // Everything under the top discard, so the next draw must recycle.
        let mut pile = std::mem::take(&mut original.draw_pile);
        pile.extend(original.discard.drain(..));
        original.discard = pile;
        let mut restored = decode(&encode(&original)?)?;
        let mut notices = RecordingNotifier::new();
        for _ in 0..3 {
            let a = original.current_player().id.clone();
            original.draw(a.as_str(), &mut notices)?;
            let b = restored.current_player().id.clone();
            restored.draw(b.as_str(), &mut notices)?;
        }
        assert_eq!(restored.to_record(), original.to_record());
        Ok(())
    }

    #[test]
    fn rejects_other_versions() {
        let mut record = game().to_record();
        record.version = 0;
        assert!(matches!(
            Game::from_record(record),
            Err(GameError::UnsupportedRecordVersion(0))
        ));
    }

    #[test]
    fn rejects_empty_seating() {
        let mut record = game().to_record();
        record.players.clear();
        record.current_index = 0;
        record.pending = None;
        assert!(matches!(
            Game::from_record(record),
            Err(GameError::CorruptRecord("record has no players"))
        ));
    }

    #[test]
    fn rejects_lost_cards() {
        let mut record = game().to_record();
        record.draw_pile.pop();
        assert!(matches!(
            Game::from_record(record),
            Err(GameError::CorruptRecord(_))
        ));
    }
}

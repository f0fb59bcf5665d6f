//! In-memory room registry: membership, join eligibility and stored games.
//!
//! Games are kept encoded between actions, the same way an external store would
//! hold them, and every mutation goes through a load, mutate, store cycle.

use std::collections::{BTreeSet, HashMap};

use crate::error::{GameError, JoinError};
use crate::game::{Game, GameBuilder};
use crate::player::Player;
use crate::record::{decode, encode};
use crate::state::{GameOver, GameSettings};

/// Whether the player is opening a new room or entering an existing one.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum JoinMode {
    Create,
    Join,
}

#[derive(Default)]
struct Room {
    players: BTreeSet<Player>,
    game: Option<Vec<u8>>,
}

pub struct Lobby {
    settings: GameSettings,
    rooms: HashMap<String, Room>,
}

impl Default for Lobby {
    fn default() -> Self {
        Self::new(GameSettings::default())
    }
}

impl Lobby {
    pub fn new(settings: GameSettings) -> Self {
        Self {
            settings,
            rooms: HashMap::new(),
        }
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    pub fn allow_player(&self, mode: JoinMode, room: &str, player: &Player) -> Result<(), JoinError> {
        if player.name.is_empty() {
            return Err(JoinError::BlankName);
        }
        if player.name.chars().any(char::is_whitespace) {
            return Err(JoinError::WhitespaceInName);
        }
        if room.is_empty() {
            return Err(JoinError::EmptyRoom);
        }
        if mode == JoinMode::Join && !self.rooms.contains_key(room) {
            return Err(JoinError::NoSuchRoom(room.to_string()));
        }

        let started = self.rooms.get(room).is_some_and(|r| r.game.is_some());
        let members = self.rooms.get(room).map(|r| &r.players);
        let is_member = members.is_some_and(|m| m.contains(player));
        if members.map_or(0, BTreeSet::len) == self.settings.max_players {
            return Err(JoinError::RoomFull {
                max: self.settings.max_players,
            });
        }
        if started && !is_member {
            return Err(JoinError::AlreadyStarted(room.to_string()));
        }
        if !started && is_member {
            return Err(JoinError::NameTaken(player.name.clone()));
        }
        Ok(())
    }

    pub fn add_player(&mut self, room: &str, player: Player) {
        log::info!("adding player {} to room {}", player.id, room);
        self.rooms
            .entry(room.to_string())
            .or_default()
            .players
            .insert(player);
    }

    /// Drops a member. If a game is running it loses the seat too, and the
    /// returned `GameOver` tells the caller the game can no longer continue.
    pub fn remove_player(&mut self, room: &str, player: &Player) -> Result<Option<GameOver>, GameError> {
        log::info!("removing player {} from room {}", player.id, room);
        if let Some(entry) = self.rooms.get_mut(room) {
            entry.players.remove(player);
        }
        let Some(mut game) = self.load_game(room)? else {
            return Ok(None);
        };
        if game.players().contains(player) {
            game.remove_player(player.id.as_str())?;
        }
        // A game nobody is seated at cannot be stored.
        if game.players().is_empty() {
            self.delete_game(room);
        } else {
            self.store_game(room, &game)?;
        }
        Ok(game
            .validate_players()
            .is_err()
            .then_some(GameOver::InsufficientPlayers))
    }

    pub fn players(&self, room: &str) -> Vec<Player> {
        self.rooms
            .get(room)
            .map(|r| r.players.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Deals a new game for the room's current members and stores it.
    pub fn start_game(&mut self, room: &str, seed: u64) -> Result<Game, GameError> {
        let game = GameBuilder::new(self.players(room))
            .with_room(room)
            .with_hand_size(self.settings.hand_size)
            .with_seed(seed)
            .build()?;
        self.store_game(room, &game)?;
        Ok(game)
    }

    pub fn load_game(&self, room: &str) -> Result<Option<Game>, GameError> {
        self.rooms
            .get(room)
            .and_then(|r| r.game.as_deref())
            .map(decode)
            .transpose()
    }

    pub fn store_game(&mut self, room: &str, game: &Game) -> Result<(), GameError> {
        let bytes = encode(game)?;
        self.rooms.entry(room.to_string()).or_default().game = Some(bytes);
        Ok(())
    }

    /// Loads the room's game, applies `f` and stores the result.
    /// Returns `None` when no game is running in the room.
    pub fn with_game<T>(
        &mut self,
        room: &str,
        f: impl FnOnce(&mut Game) -> Result<T, GameError>,
    ) -> Result<Option<T>, GameError> {
        let Some(mut game) = self.load_game(room)? else {
            return Ok(None);
        };
        let value = f(&mut game)?;
        self.store_game(room, &game)?;
        Ok(Some(value))
    }

    pub fn delete_game(&mut self, room: &str) {
        if let Some(entry) = self.rooms.get_mut(room) {
            entry.game = None;
            log::info!("deleted game for room {}", room);
        }
    }

    pub fn delete_room(&mut self, room: &str) {
        if self.rooms.remove(room).is_some() {
            log::info!("deleted {}", room);
        }
    }

    pub fn delete_all(&mut self, room: &str) {
        self.delete_game(room);
        self.delete_room(room);
    }

    pub fn list_rooms(&self) -> Vec<String> {
        let mut rooms: Vec<String> = self.rooms.keys().cloned().collect();
        rooms.sort();
        rooms
    }
}

use thiserror::Error;

use crate::card::Card;
use crate::player::PlayerId;

/// Structural failures the caller must propagate.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("need at least {required} players to start the game")]
    InsufficientPlayers { required: usize },
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("unsupported game record version {0}")]
    UnsupportedRecordVersion(u16),
    #[error("corrupt game record: {0}")]
    CorruptRecord(&'static str),
    #[error("failed to encode game: {0}")]
    Encode(#[from] bincode::error::EncodeError),
    #[error("failed to decode game: {0}")]
    Decode(#[from] bincode::error::DecodeError),
}

/// Rejected player actions. The message is what the player is told; state is left untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidAction {
    #[error("not your turn")]
    NotYourTurn,
    #[error("must draw {count} card(s) before playing")]
    PendingDraw { count: u8 },
    #[error("unknown card {0}")]
    UnknownCard(String),
    #[error("you do not hold {0}")]
    CardNotInHand(Card),
    #[error("cannot play this card")]
    CannotPlayCard,
    #[error("cannot play draw four when you have a card of the current color")]
    DrawFourRestricted,
    #[error("please choose a color to play a wild card")]
    ColorRequired,
    #[error("game is already over")]
    GameOver,
}

/// Reasons a player may not join or create a room.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinError {
    #[error("name cannot be blank")]
    BlankName,
    #[error("name should not contain white spaces")]
    WhitespaceInName,
    #[error("room should not be empty")]
    EmptyRoom,
    #[error("cannot join game, room {0} does not exist")]
    NoSuchRoom(String),
    #[error("room is full, max {max} players are supported")]
    RoomFull { max: usize },
    #[error("cannot join, game in the room {0} has already started")]
    AlreadyStarted(String),
    #[error("name {0} is already taken for this room, try a different name")]
    NameTaken(String),
}

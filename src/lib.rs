//! Two-player UNO rules engine: dealing, turn order, action cards, draw penalties
//! and scoring, with a versioned storage format so a game can be rebuilt between requests.

pub mod action;
pub mod bot;
pub mod bots;
pub mod card;
pub mod deck;
pub mod error;
pub mod game;
pub mod lobby;
pub mod notify;
pub mod player;
pub mod record;
pub mod rng;
pub mod score;
pub mod state;
pub mod visualize;

pub use crate::action::Action;
pub use crate::bot::Bot;
pub use crate::bots::{HeuristicBot, HumanBot, RandomBot, create_bot_from_spec, label_for_spec};
pub use crate::card::{COLORS, Card, Color, Value};
pub use crate::deck::Deck;
pub use crate::error::{GameError, InvalidAction, JoinError};
pub use crate::game::{Game, GameBuilder, is_playable};
pub use crate::lobby::{JoinMode, Lobby};
pub use crate::notify::{Level, LogNotifier, Notice, Notifier, RecordingNotifier};
pub use crate::player::{Player, PlayerId};
pub use crate::record::{GameRecord, RECORD_VERSION};
pub use crate::score::{hand_points, winner_points};
pub use crate::state::{
    Direction, GameOver, GameOverReason, GameSettings, GameStateView, GameStatus, PendingDraw,
};
pub use crate::visualize::{VisualOptions, describe_action, render_state};

//! End-of-game scoring.
//!
//! The winner collects the value of every card left in opponents' hands:
//! digits count face value, draw-two/reverse/skip count 20, black cards 50.

use crate::card::Card;
use crate::player::PlayerId;
use crate::state::GameStateView;

pub fn hand_points(hand: &[Card]) -> u32 {
    hand.iter().map(Card::points).sum()
}

/// Compute the winner's points from a snapshot.
pub fn winner_points(state: &GameStateView, winner: &PlayerId) -> u32 {
    state
        .hands
        .iter()
        .filter(|(id, _)| *id != winner)
        .map(|(_, hand)| hand_points(hand))
        .sum()
}

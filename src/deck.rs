use rand::Rng;
use rand::seq::SliceRandom;

use crate::card::{Card, DECK_SIZE, full_deck};

/// Ordered set of cards used to deal a game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The standard 108 cards in deterministic order.
    pub fn build() -> Self {
        Self { cards: full_deck() }
    }

    /// Wraps an arbitrary ordering, accepted only if it is a permutation of the standard deck.
    pub fn from_cards(cards: Vec<Card>) -> Option<Self> {
        is_standard(&cards).then_some(Self { cards })
    }

    /// Single Fisher-Yates pass over the cards.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

/// True when `cards` holds exactly the standard deck's multiset.
pub fn is_standard(cards: &[Card]) -> bool {
    if cards.len() != DECK_SIZE {
        return false;
    }
    let mut sorted = cards.to_vec();
    sorted.sort_unstable();
    let mut expected = full_deck();
    expected.sort_unstable();
    sorted == expected
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn shuffle_is_a_permutation() {
        let mut deck = Deck::build();
        deck.shuffle(&mut StdRng::seed_from_u64(7));
        assert_eq!(deck.len(), DECK_SIZE);
        assert!(is_standard(deck.cards()));
        assert_ne!(deck, Deck::build());
    }

    #[test]
    fn shuffle_is_reproducible_from_seed() {
        let mut a = Deck::build();
        let mut b = Deck::build();
        a.shuffle(&mut StdRng::seed_from_u64(99));
        b.shuffle(&mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_non_standard_orderings() {
        let mut cards = full_deck();
        cards.pop();
        assert!(Deck::from_cards(cards.clone()).is_none());
        cards.push(Card::wild());
        cards.push(Card::wild());
        assert!(Deck::from_cards(cards).is_none());
        let mut reversed = full_deck();
        reversed.reverse();
        assert!(Deck::from_cards(reversed).is_some());
    }
}

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use rand::seq::SliceRandom;

use crate::action::Action;
use crate::card::{COLORS, Card, Color, DECK_SIZE, Value};
use crate::deck::Deck;
use crate::error::{GameError, InvalidAction};
use crate::notify::Notifier;
use crate::player::{Player, PlayerId};
use crate::rng::GameRng;
use crate::score::hand_points;
use crate::state::{
    Direction, GameOver, GameSettings, GameStateView, GameStatus, PendingDraw,
};

const DEFAULT_SEED: u64 = 0x5EED_5EED_5EED_5EED;
pub const UNO_PENALTY: usize = 2;
pub const DRAW_TWO_PENALTY: u8 = 2;
pub const DRAW_FOUR_PENALTY: u8 = 4;

/// Builder that enables deterministic deck injection for testing and replays.
pub struct GameBuilder {
    room: String,
    players: Vec<Player>,
    settings: GameSettings,
    seed: u64,
    deck: Option<Vec<Card>>,
}

impl GameBuilder {
    pub fn new(players: impl IntoIterator<Item = Player>) -> Self {
        Self {
            room: String::new(),
            players: players.into_iter().collect(),
            settings: GameSettings::default(),
            seed: DEFAULT_SEED,
            deck: None,
        }
    }

    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = room.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.settings.hand_size = hand_size;
        self
    }

    /// Use a fixed card order instead of shuffling. The first `players * hand_size`
    /// cards are dealt round-robin in seat order; the last card is drawn first.
    pub fn with_deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = Some(deck);
        self
    }

    pub fn build(self) -> Result<Game, GameError> {
        Game::from_builder(self)
    }
}

/// Rules engine for a single room. Mutated only through [`Game::draw`] and [`Game::play`].
#[derive(Clone, Debug)]
pub struct Game {
    pub(crate) room: String,
    pub(crate) settings: GameSettings,
    pub(crate) status: GameStatus,
    pub(crate) players: Vec<Player>,
    pub(crate) hands: BTreeMap<PlayerId, Vec<Card>>,
    pub(crate) discard: Vec<Card>,
    pub(crate) draw_pile: Vec<Card>,
    pub(crate) current_index: usize,
    pub(crate) direction: Direction,
    pub(crate) current_color: Option<Color>,
    pub(crate) pending: Option<PendingDraw>,
    pub(crate) rng: GameRng,
}

/// A play that passed every rule check and is ready to commit.
struct CheckedPlay {
    seat: usize,
    hand_index: usize,
    card: Card,
    color: Color,
}

impl Game {
    /// Starts a game with a freshly seeded shuffle.
    pub fn new(
        room: impl Into<String>,
        players: impl IntoIterator<Item = Player>,
        hand_size: usize,
    ) -> Result<Self, GameError> {
        GameBuilder::new(players)
            .with_room(room)
            .with_hand_size(hand_size)
            .with_seed(rand::random())
            .build()
    }

    pub fn builder(players: impl IntoIterator<Item = Player>) -> GameBuilder {
        GameBuilder::new(players)
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, GameStatus::Finished { .. })
    }

    pub fn winner(&self) -> Option<&PlayerId> {
        match &self.status {
            GameStatus::Finished { winner } => Some(winner),
            GameStatus::Ongoing => None,
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current_index]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn current_color(&self) -> Option<Color> {
        self.current_color
    }

    pub fn pending(&self) -> Option<PendingDraw> {
        self.pending
    }

    pub fn top_card(&self) -> Option<Card> {
        self.discard.last().copied()
    }

    pub fn discard_pile(&self) -> &[Card] {
        &self.discard
    }

    pub fn draw_pile(&self) -> &[Card] {
        &self.draw_pile
    }

    pub fn hand_of(&self, player: &str) -> Option<&[Card]> {
        self.hands.get(player).map(Vec::as_slice)
    }

    /// Cards across hands, the discard stack and the draw pile. Always the full deck.
    pub fn total_cards(&self) -> usize {
        self.hands.values().map(Vec::len).sum::<usize>() + self.discard.len() + self.draw_pile.len()
    }

    pub fn validate_players(&self) -> Result<(), GameError> {
        if self.players.len() < self.settings.min_players {
            return Err(GameError::InsufficientPlayers {
                required: self.settings.min_players,
            });
        }
        Ok(())
    }

    pub fn state_view(&self) -> Result<GameStateView, GameError> {
        self.validate_players()?;
        let top_card = self
            .top_card()
            .ok_or(GameError::CorruptRecord("discard pile is empty"))?;
        // Removed players keep their cards in `hands` but are not part of the table.
        let hands = self
            .players
            .iter()
            .map(|p| (p.id.clone(), self.hands.get(&p.id).cloned().unwrap_or_default()))
            .collect();
        Ok(GameStateView {
            hands,
            top_card,
            current_player_id: self.current_player().id.clone(),
            current_color: self.current_color,
            pending_draw_count: self.pending.map(|p| p.count).unwrap_or(0),
            pending_for_player_id: self.pending.map(|p| self.players[p.seat].id.clone()),
            status: self.status.clone(),
            draw_pile_count: self.draw_pile.len(),
        })
    }

    /// Moves available to `player`. Empty when it is not their turn or the game is over.
    pub fn legal_actions(&self, player: &str) -> Result<Vec<Action>, GameError> {
        self.validate_players()?;
        let Ok(seat) = self.check_turn(player) else {
            return Ok(Vec::new());
        };
        if self.owes_draw(seat).is_some() {
            return Ok(vec![Action::Draw]);
        }
        let hand = self.hand(seat);
        let uno = hand.len() == 2;
        let distinct: BTreeSet<Card> = hand.iter().copied().collect();
        let mut actions = Vec::new();
        for card in distinct {
            let colors: Vec<Option<Color>> = if card.is_black() {
                COLORS.iter().copied().map(Some).collect()
            } else {
                vec![None]
            };
            for color in colors {
                if self.check_card(seat, card, color).is_ok() {
                    actions.push(Action::Play { card, color, uno });
                }
            }
        }
        actions.push(Action::Draw);
        Ok(actions)
    }

    /// Draws one card for the current player.
    ///
    /// While an obligation is owed, each draw pays one card off and the turn passes once
    /// it is cleared. A voluntary draw ends the turn unless the drawn card is playable.
    pub fn draw(&mut self, player: &str, notify: &mut dyn Notifier) -> Result<(), GameError> {
        self.validate_players()?;
        let seat = match self.check_turn(player) {
            Ok(seat) => seat,
            Err(reason) => {
                notify.error(&reason.to_string());
                return Ok(());
            }
        };
        if self.draw_pile.is_empty() {
            self.recycle_discard();
        }
        let Some(card) = self.draw_pile.pop() else {
            notify.warn("deck is empty!");
            return Ok(());
        };
        self.hand_mut(seat)?.push(card);

        match self.owes_draw(seat) {
            Some(owed) => {
                let remaining = owed.saturating_sub(1);
                if remaining == 0 {
                    self.pending = None;
                    self.advance_turn(1);
                } else {
                    self.pending = Some(PendingDraw {
                        count: remaining,
                        seat,
                    });
                }
            }
            None => {
                if !self.can_play(&card) {
                    self.advance_turn(1);
                }
            }
        }
        log::debug!("[{}] {} drew a card", self.room, player);
        Ok(())
    }

    /// Plays `card_id` from the current player's hand.
    ///
    /// Every rule is checked before anything moves, so a rejected play leaves the game
    /// exactly as it was. `on_game_over` fires once if this play empties the hand.
    pub fn play(
        &mut self,
        player: &str,
        card_id: &str,
        chosen_color: Option<Color>,
        uno_called: bool,
        notify: &mut dyn Notifier,
        on_game_over: impl FnOnce(GameOver),
    ) -> Result<(), GameError> {
        self.validate_players()?;
        let CheckedPlay {
            seat,
            hand_index,
            card,
            color,
        } = match self.check_play(player, card_id, chosen_color) {
            Ok(checked) => checked,
            Err(reason) => {
                notify.error(&reason.to_string());
                return Ok(());
            }
        };

        self.hand_mut(seat)?.remove(hand_index);
        self.discard.push(card);
        self.current_color = Some(color);
        log::debug!("[{}] {} played {}", self.room, player, card);

        let actor = self.players[seat].clone();
        if self.hand(seat).len() == 1 && !uno_called {
            notify.error(&format!(
                "{} didn't say UNO! Drawing {UNO_PENALTY} penalty cards.",
                actor.name
            ));
            self.draw_n(seat, UNO_PENALTY)?;
        }

        if self.hand(seat).is_empty() {
            let score = self.score_excluding(&actor.id);
            notify.success(&format!("{} won the game with {score} points!", actor.name));
            log::info!("[{}] {} won with {} points", self.room, actor.id, score);
            self.status = GameStatus::Finished {
                winner: actor.id.clone(),
            };
            on_game_over(GameOver::Won {
                winner: actor,
                score,
            });
            return Ok(());
        }

        match card.value {
            Value::Skip => self.advance_turn(2),
            Value::Reverse if self.players.len() == 2 => self.advance_turn(2),
            Value::Reverse => {
                self.direction = self.direction.reversed();
                self.advance_turn(1);
            }
            Value::DrawTwo => {
                self.impose_draw(DRAW_TWO_PENALTY);
                self.advance_turn(1);
            }
            Value::DrawFour => {
                self.impose_draw(DRAW_FOUR_PENALTY);
                self.advance_turn(1);
            }
            Value::Number(_) | Value::Wild => self.advance_turn(1),
        }
        Ok(())
    }

    /// Applies an agent's chosen action.
    pub fn apply_action(
        &mut self,
        player: &str,
        action: Action,
        notify: &mut dyn Notifier,
        on_game_over: impl FnOnce(GameOver),
    ) -> Result<(), GameError> {
        match action {
            Action::Draw => self.draw(player, notify),
            Action::Play { card, color, uno } => {
                self.play(player, &card.id(), color, uno, notify, on_game_over)
            }
        }
    }

    /// Removes a seat without reordering the others. Their cards stay accounted for.
    pub fn remove_player(&mut self, player: &str) -> Result<(), GameError> {
        let seat = self
            .seat_of(player)
            .ok_or_else(|| GameError::UnknownPlayer(PlayerId::from(player)))?;
        self.players.remove(seat);
        self.pending = match self.pending {
            Some(p) if p.seat == seat => None,
            Some(p) if p.seat > seat => Some(PendingDraw {
                seat: p.seat - 1,
                ..p
            }),
            other => other,
        };
        if self.current_index > seat {
            self.current_index -= 1;
        }
        if self.current_index >= self.players.len() {
            self.current_index = 0;
        }
        log::info!("[{}] removed {} from the game", self.room, player);
        Ok(())
    }

    /// Points held by every seated player other than `winner`.
    pub fn score_excluding(&self, winner: &PlayerId) -> u32 {
        self.players
            .iter()
            .filter(|p| &p.id != winner)
            .map(|p| hand_points(self.hands.get(&p.id).map(Vec::as_slice).unwrap_or(&[])))
            .sum()
    }

    fn from_builder(builder: GameBuilder) -> Result<Self, GameError> {
        let GameBuilder {
            room,
            players,
            settings,
            seed,
            deck,
        } = builder;
        // Seats are ordered by id regardless of join order.
        let players: Vec<Player> = players.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
        if players.len() < settings.min_players {
            return Err(GameError::InsufficientPlayers {
                required: settings.min_players,
            });
        }
        if settings.hand_size == 0 {
            return Err(GameError::InvalidConfiguration("hand size must be positive"));
        }
        let dealt = players.len() * settings.hand_size;
        if dealt >= DECK_SIZE {
            return Err(GameError::InvalidConfiguration(
                "deck does not contain enough cards to deal every hand",
            ));
        }

        let mut rng = GameRng::new(seed);
        let deck = match deck {
            Some(cards) => Deck::from_cards(cards).ok_or(GameError::InvalidConfiguration(
                "deck must be a permutation of the standard 108 cards",
            ))?,
            None => {
                let mut deck = Deck::build();
                deck.shuffle(&mut rng.fork());
                deck
            }
        };
        let mut cards = deck.into_cards();
        let draw_pile = cards.split_off(dealt);

        let mut hands: BTreeMap<PlayerId, Vec<Card>> = players
            .iter()
            .map(|p| (p.id.clone(), Vec::with_capacity(settings.hand_size)))
            .collect();
        for (i, card) in cards.into_iter().enumerate() {
            if let Some(hand) = hands.get_mut(&players[i % players.len()].id) {
                hand.push(card);
            }
        }

        let mut game = Game {
            room,
            settings,
            status: GameStatus::Ongoing,
            players,
            hands,
            discard: Vec::with_capacity(DECK_SIZE),
            draw_pile,
            current_index: 0,
            direction: Direction::Forward,
            current_color: None,
            pending: None,
            rng,
        };
        game.open_discard()?;
        log::info!(
            "[{}] game started with {} players, top card {}",
            game.room,
            game.players.len(),
            game.discard.last().map(Card::id).unwrap_or_default()
        );
        Ok(game)
    }

    /// Turns over the first discard and applies its effect as if it had just been played.
    fn open_discard(&mut self) -> Result<(), GameError> {
        let card = loop {
            if self.draw_pile.iter().all(Card::is_draw_four) {
                return Err(GameError::InvalidConfiguration(
                    "draw pile holds no valid opening card",
                ));
            }
            let Some(card) = self.draw_pile.pop() else {
                continue;
            };
            if card.is_draw_four() {
                self.draw_pile.insert(0, card);
                self.draw_pile.shuffle(&mut self.rng.fork());
                continue;
            }
            break card;
        };
        self.discard.push(card);
        self.current_color = Some(if card.is_black() {
            COLORS[self.rng.fork().gen_range(0..COLORS.len())]
        } else {
            card.color
        });

        match card.value {
            Value::Skip => self.advance_turn(2),
            Value::Reverse if self.players.len() == 2 => self.advance_turn(2),
            Value::Reverse => self.direction = self.direction.reversed(),
            Value::DrawTwo => {
                self.impose_draw(DRAW_TWO_PENALTY);
                self.advance_turn(1);
            }
            _ => {}
        }
        Ok(())
    }

    fn check_turn(&self, player: &str) -> Result<usize, InvalidAction> {
        if self.is_finished() {
            return Err(InvalidAction::GameOver);
        }
        if self.current_player().id.as_str() != player {
            return Err(InvalidAction::NotYourTurn);
        }
        Ok(self.current_index)
    }

    fn check_play(
        &self,
        player: &str,
        card_id: &str,
        chosen_color: Option<Color>,
    ) -> Result<CheckedPlay, InvalidAction> {
        let seat = self.check_turn(player)?;
        if let Some(count) = self.owes_draw(seat) {
            return Err(InvalidAction::PendingDraw { count });
        }
        let card: Card = card_id
            .parse()
            .map_err(|_| InvalidAction::UnknownCard(card_id.to_string()))?;
        self.check_card(seat, card, chosen_color)
    }

    /// Card-level rules for a seat already known to be on turn and owing nothing.
    fn check_card(
        &self,
        seat: usize,
        card: Card,
        chosen_color: Option<Color>,
    ) -> Result<CheckedPlay, InvalidAction> {
        let hand = self.hand(seat);
        let hand_index = hand
            .iter()
            .position(|c| *c == card)
            .ok_or(InvalidAction::CardNotInHand(card))?;
        if !self.can_play(&card) {
            return Err(InvalidAction::CannotPlayCard);
        }
        if card.is_draw_four() {
            if let Some(current) = self.current_color {
                if hand.iter().any(|c| !c.is_black() && c.color == current) {
                    return Err(InvalidAction::DrawFourRestricted);
                }
            }
        }
        let color = if card.is_black() {
            match chosen_color {
                Some(color) if COLORS.contains(&color) => color,
                _ => return Err(InvalidAction::ColorRequired),
            }
        } else {
            card.color
        };
        Ok(CheckedPlay {
            seat,
            hand_index,
            card,
            color,
        })
    }

    fn can_play(&self, card: &Card) -> bool {
        match self.discard.last() {
            Some(top) => is_playable(card, top, self.current_color),
            None => true,
        }
    }

    /// Outstanding obligation owed by `seat`, if any.
    fn owes_draw(&self, seat: usize) -> Option<u8> {
        self.pending
            .filter(|p| p.seat == seat && p.count > 0)
            .map(|p| p.count)
    }

    fn impose_draw(&mut self, count: u8) {
        self.pending = Some(PendingDraw {
            count,
            seat: self.next_index(1),
        });
    }

    fn seat_of(&self, player: &str) -> Option<usize> {
        self.players.iter().position(|p| p.id.as_str() == player)
    }

    fn hand(&self, seat: usize) -> &[Card] {
        self.hands
            .get(&self.players[seat].id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn hand_mut(&mut self, seat: usize) -> Result<&mut Vec<Card>, GameError> {
        let id = &self.players[seat].id;
        self.hands
            .get_mut(id)
            .ok_or_else(|| GameError::UnknownPlayer(id.clone()))
    }

    /// Forced draw that stops quietly when both piles run dry.
    fn draw_n(&mut self, seat: usize, n: usize) -> Result<(), GameError> {
        for _ in 0..n {
            if self.draw_pile.is_empty() {
                self.recycle_discard();
            }
            let Some(card) = self.draw_pile.pop() else {
                return Ok(());
            };
            self.hand_mut(seat)?.push(card);
        }
        Ok(())
    }

    /// Shuffles everything under the top discard back into the draw pile.
    fn recycle_discard(&mut self) {
        if self.discard.len() <= 1 {
            return;
        }
        let split = self.discard.len() - 1;
        let mut recycled: Vec<Card> = self.discard.drain(..split).collect();
        recycled.shuffle(&mut self.rng.fork());
        log::debug!("[{}] recycled {} cards into the draw pile", self.room, recycled.len());
        self.draw_pile.append(&mut recycled);
    }

    fn advance_turn(&mut self, steps: usize) {
        self.current_index = self.next_index(steps);
    }

    /// Seat `steps` ahead in the current direction, wrapping with floor modulo.
    fn next_index(&self, steps: usize) -> usize {
        let seats = self.players.len() as isize;
        let offset = steps as isize * self.direction.sign();
        (self.current_index as isize + offset).rem_euclid(seats) as usize
    }
}

/// Whether `card` may be played on `top` given the active color.
pub fn is_playable(card: &Card, top: &Card, current_color: Option<Color>) -> bool {
    match current_color {
        Some(color) => card.is_black() || card.color == color || card.value == top.value,
        None => {
            top.is_black()
                || card.is_black()
                || card.color == top.color
                || card.value == top.value
        }
    }
}

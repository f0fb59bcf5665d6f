use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Card colors. `Black` is reserved for wild and draw-four cards.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Black,
}

/// Colors a player may choose after playing a black card.
pub const COLORS: [Color; 4] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];

pub const DECK_SIZE: usize = 108;
pub const BLACK_COPIES: usize = 4;
pub const ACTION_COPIES: usize = 2;
pub const ACTION_POINTS: u32 = 20;
pub const BLACK_POINTS: u32 = 50;

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Black => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "red" => Ok(Color::Red),
            "blue" => Ok(Color::Blue),
            "green" => Ok(Color::Green),
            "yellow" => Ok(Color::Yellow),
            "black" => Ok(Color::Black),
            other => Err(format!("unknown color: {other}")),
        }
    }
}

/// Face value of a card. Serialized as the external string form (`"7"`, `"draw-two"`).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Value {
    /// Digit between 0 and 9.
    Number(u8),
    DrawTwo,
    Reverse,
    Skip,
    Wild,
    DrawFour,
}

impl Value {
    pub fn is_action(&self) -> bool {
        matches!(self, Value::DrawTwo | Value::Reverse | Value::Skip)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::DrawTwo => f.write_str("draw-two"),
            Value::Reverse => f.write_str("reverse"),
            Value::Skip => f.write_str("skip"),
            Value::Wild => f.write_str("wild"),
            Value::DrawFour => f.write_str("draw-four"),
        }
    }
}

impl FromStr for Value {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draw-two" => Ok(Value::DrawTwo),
            "reverse" => Ok(Value::Reverse),
            "skip" => Ok(Value::Skip),
            "wild" => Ok(Value::Wild),
            "draw-four" => Ok(Value::DrawFour),
            digit => match digit.parse::<u8>() {
                Ok(n) if n <= 9 && digit.len() == 1 => Ok(Value::Number(n)),
                _ => Err(format!("unknown card value: {digit}")),
            },
        }
    }
}

impl From<Value> for String {
    fn from(value: Value) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Value {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A single card. Identity is the `(value, color)` pair, written `"{value}-{color}"`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(into = "CardWire", try_from = "CardWire")]
pub struct Card {
    pub color: Color,
    pub value: Value,
}

/// Serialized card. Carries the id so clients can send it straight back.
#[derive(Serialize, Deserialize)]
struct CardWire {
    #[serde(default)]
    id: String,
    color: Color,
    value: Value,
}

impl From<Card> for CardWire {
    fn from(card: Card) -> Self {
        Self {
            id: card.id(),
            color: card.color,
            value: card.value,
        }
    }
}

impl TryFrom<CardWire> for Card {
    type Error = String;

    fn try_from(wire: CardWire) -> Result<Self, Self::Error> {
        let card: Card = format!("{}-{}", wire.value, wire.color).parse()?;
        if !wire.id.is_empty() && wire.id != card.id() {
            return Err(format!("card id {} does not match {card}", wire.id));
        }
        Ok(card)
    }
}

impl Card {
    pub const fn new(color: Color, value: Value) -> Self {
        Self { color, value }
    }

    pub const fn number(color: Color, n: u8) -> Self {
        Self::new(color, Value::Number(n))
    }

    pub const fn wild() -> Self {
        Self::new(Color::Black, Value::Wild)
    }

    pub const fn draw_four() -> Self {
        Self::new(Color::Black, Value::DrawFour)
    }

    /// External identifier, e.g. `"7-red"` or `"draw-four-black"`.
    pub fn id(&self) -> String {
        self.to_string()
    }

    #[inline]
    pub fn is_black(&self) -> bool {
        self.color == Color::Black
    }

    #[inline]
    pub fn is_wild(&self) -> bool {
        self.value == Value::Wild
    }

    #[inline]
    pub fn is_draw_four(&self) -> bool {
        self.value == Value::DrawFour
    }

    /// Any action, wild or draw-four card.
    #[inline]
    pub fn is_special(&self) -> bool {
        self.value.is_action() || self.is_black()
    }

    /// Points this card is worth in an opponent's hand at game end.
    pub fn points(&self) -> u32 {
        match self.value {
            Value::Number(n) => u32::from(n),
            Value::DrawTwo | Value::Reverse | Value::Skip => ACTION_POINTS,
            Value::Wild | Value::DrawFour => BLACK_POINTS,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.value, self.color)
    }
}

impl FromStr for Card {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (value, color) = s
            .rsplit_once('-')
            .ok_or_else(|| format!("malformed card id: {s}"))?;
        let card = Card::new(color.parse()?, value.parse()?);
        let black_value = matches!(card.value, Value::Wild | Value::DrawFour);
        if black_value != card.is_black() {
            return Err(format!("no such card: {s}"));
        }
        Ok(card)
    }
}

/// Builds the standard 108-card deck in deterministic order (unshuffled).
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for color in COLORS {
        deck.push(Card::number(color, 0));
        for _ in 0..2 {
            for n in 1..=9 {
                deck.push(Card::number(color, n));
            }
        }
        for value in [Value::DrawTwo, Value::Reverse, Value::Skip] {
            deck.extend(std::iter::repeat(Card::new(color, value)).take(ACTION_COPIES));
        }
    }
    deck.extend(std::iter::repeat(Card::draw_four()).take(BLACK_COPIES));
    deck.extend(std::iter::repeat(Card::wild()).take(BLACK_COPIES));
    deck
}

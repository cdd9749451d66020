use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// Represents one of the four suits in a standard 52-card deck.
/// Used as a component of [`Card`] to fully define a playing card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit (♣)
    Clubs,
    /// Diamonds suit (♦)
    Diamonds,
    /// Hearts suit (♥)
    Hearts,
    /// Spades suit (♠)
    Spades,
}

impl Suit {
    /// Index into `{0..3}` matching the `CardSet` bit-position formula.
    pub fn index(self) -> u8 {
        match self {
            Suit::Clubs => 0,
            Suit::Diamonds => 1,
            Suit::Hearts => 2,
            Suit::Spades => 3,
        }
    }

    pub fn from_index(i: u8) -> Suit {
        match i {
            0 => Suit::Clubs,
            1 => Suit::Diamonds,
            2 => Suit::Hearts,
            _ => Suit::Spades,
        }
    }

    fn from_char(c: char) -> Option<Suit> {
        match c.to_ascii_lowercase() {
            'c' => Some(Suit::Clubs),
            'd' => Some(Suit::Diamonds),
            'h' => Some(Suit::Hearts),
            's' => Some(Suit::Spades),
            _ => None,
        }
    }

    fn to_char(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
}

/// Represents the rank (face value) of a playing card from Two through Ace.
/// Numeric values are assigned for comparison and hand evaluation purposes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub fn from_u8(v: u8) -> Rank {
        match v {
            2 => Rank::Two,
            3 => Rank::Three,
            4 => Rank::Four,
            5 => Rank::Five,
            6 => Rank::Six,
            7 => Rank::Seven,
            8 => Rank::Eight,
            9 => Rank::Nine,
            10 => Rank::Ten,
            11 => Rank::Jack,
            12 => Rank::Queen,
            13 => Rank::King,
            _ => Rank::Ace,
        }
    }

    /// Position `0..12` used in the `position = suit*13 + rank` formula.
    pub fn index(self) -> u8 {
        self as u8 - 2
    }

    pub fn from_index(i: u8) -> Rank {
        Rank::from_u8(i + 2)
    }

    fn from_char(c: char) -> Option<Rank> {
        match c.to_ascii_uppercase() {
            '2' => Some(Rank::Two),
            '3' => Some(Rank::Three),
            '4' => Some(Rank::Four),
            '5' => Some(Rank::Five),
            '6' => Some(Rank::Six),
            '7' => Some(Rank::Seven),
            '8' => Some(Rank::Eight),
            '9' => Some(Rank::Nine),
            'T' => Some(Rank::Ten),
            'J' => Some(Rank::Jack),
            'Q' => Some(Rank::Queen),
            'K' => Some(Rank::King),
            'A' => Some(Rank::Ace),
            _ => None,
        }
    }

    fn to_char(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ]
}

/// Represents a single playing card with a suit and rank.
///
/// A card's `CardSet` bit position is `suit.index() * 13 + rank.index()`, so
/// the full 52-card universe is `0..51` with clubs-two at bit 0 and
/// spades-ace at bit 51.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Bit position `0..51` in a [`CardSet`].
    pub fn position(self) -> u8 {
        self.suit.index() * 13 + self.rank.index()
    }

    pub fn from_position(p: u8) -> Self {
        Self {
            suit: Suit::from_index(p / 13),
            rank: Rank::from_index(p % 13),
        }
    }

    /// Parses the test-fixture card string format: two ASCII characters,
    /// rank `{2..9,T,J,Q,K,A}` then suit `{c,d,h,s}`, case-insensitive.
    ///
    /// ```
    /// use holdem_engine::cards::Card;
    ///
    /// let ace_of_spades = Card::parse("As").unwrap();
    /// assert_eq!(ace_of_spades.to_string(), "As");
    /// assert_eq!(Card::parse("ah").unwrap(), Card::parse("Ah").unwrap());
    /// ```
    pub fn parse(s: &str) -> Result<Self, GameError> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return Err(GameError::InvalidCard(s.to_string()));
        }
        let rank = Rank::from_char(chars[0]).ok_or_else(|| GameError::InvalidCard(s.to_string()))?;
        let suit = Suit::from_char(chars[1]).ok_or_else(|| GameError::InvalidCard(s.to_string()))?;
        Ok(Card::new(suit, rank))
    }

    /// Parses a whitespace-separated run of card strings, e.g. `"As Ah"`.
    pub fn parse_many(s: &str) -> Result<Vec<Self>, GameError> {
        s.split_whitespace().map(Card::parse).collect()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.to_char(), self.suit.to_char())
    }
}

pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card::new(s, r));
        }
    }
    v
}

/// A 52-bit vector identifying a multiset of cards (at most one copy of
/// each). Bit `p` is set iff card `p` (`suit*13 + rank`) is present. The
/// evaluator's suit masks and straight detection depend on this
/// representation rather than a `Vec<Card>`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
pub struct CardSet(u64);

impl CardSet {
    pub const EMPTY: CardSet = CardSet(0);

    pub fn insert(&mut self, card: Card) {
        self.0 |= 1u64 << card.position();
    }

    pub fn contains(&self, card: Card) -> bool {
        (self.0 & (1u64 << card.position())) != 0
    }

    pub fn union(self, other: CardSet) -> CardSet {
        CardSet(self.0 | other.0)
    }

    pub fn len(&self) -> u32 {
        self.0.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn from_cards(cards: &[Card]) -> Self {
        let mut set = CardSet::EMPTY;
        for &c in cards {
            set.insert(c);
        }
        set
    }

    pub fn to_cards(self) -> Vec<Card> {
        (0..52u8)
            .filter(|&p| (self.0 & (1u64 << p)) != 0)
            .map(Card::from_position)
            .collect()
    }

    pub fn bits(&self) -> u64 {
        self.0
    }
}

impl FromIterator<Card> for CardSet {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut set = CardSet::EMPTY;
        for c in iter {
            set.insert(c);
        }
        set
    }
}

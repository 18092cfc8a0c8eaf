/*
 * Cards are stored as a single dense index
 *
 * the value of the index is 4 * rank + suit,
 * where rank is 0 (deuce) -> 12 (ace) and suit is c, d, h, s
 */

use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CardError {
    #[error("invalid rank character '{0}'")]
    InvalidRank(char),
    #[error("invalid suit character '{0}'")]
    InvalidSuit(char),
    #[error("card must be exactly two characters, got \"{0}\"")]
    InvalidLength(String),
    #[error("card index {0} is out of range")]
    IndexOutOfRange(u8),
    #[error("rank value {0} is out of range")]
    RankOutOfRange(u8),
    #[error("suit value {0} is out of range")]
    SuitOutOfRange(u8),
    #[error("card {0} appears twice")]
    DuplicateCard(Card),
}

/// Card rank, deuce through ace
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Rank {
    Two = 0,
    Three = 1,
    Four = 2,
    Five = 3,
    Six = 4,
    Seven = 5,
    Eight = 6,
    Nine = 7,
    Ten = 8,
    Jack = 9,
    Queen = 10,
    King = 11,
    Ace = 12,
}

impl Rank {
    /// All ranks from deuce to ace
    pub const ALL: [Rank; 13] = [
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
    ];

    /// Dense rank index, 0 for a deuce and 12 for an ace
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Poker value of the rank, 2 for a deuce and 14 for an ace
    pub const fn value(self) -> u8 {
        self as u8 + 2
    }

    /// Rank from its dense index (0 -> 12)
    pub fn from_index(index: u8) -> Option<Rank> {
        Rank::ALL.get(usize::from(index)).copied()
    }

    /// Rank from its poker value (2 -> 14)
    pub fn from_value(value: u8) -> Option<Rank> {
        value.checked_sub(2).and_then(Rank::from_index)
    }

    pub fn to_char(self) -> char {
        RANK_TO_CHAR[usize::from(self.index())]
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl TryFrom<String> for Rank {
    type Error = CardError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => char_to_rank(c).ok_or(CardError::InvalidRank(c)),
            _ => Err(CardError::InvalidLength(s)),
        }
    }
}

impl From<Rank> for String {
    fn from(rank: Rank) -> String {
        rank.to_string()
    }
}

/// Card suit
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Suit {
    Clubs = 0,
    Diamonds = 1,
    Hearts = 2,
    Spades = 3,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Suit> {
        Suit::ALL.get(usize::from(index)).copied()
    }

    pub fn to_char(self) -> char {
        SUIT_TO_CHAR[usize::from(self.index())]
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl TryFrom<String> for Suit {
    type Error = CardError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => char_to_suit(c).ok_or(CardError::InvalidSuit(c)),
            _ => Err(CardError::InvalidLength(s)),
        }
    }
}

impl From<Suit> for String {
    fn from(suit: Suit) -> String {
        suit.to_string()
    }
}

/// A single playing card
///
/// Cards order by rank first and suit second, which is exactly the
/// order of their dense index.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card(u8);

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        Card(rank.index() * SUIT_COUNT + suit.index())
    }

    /// Card from a dense index in 0..52
    ///
    /// # Example
    ///
    /// ```
    /// use holdem_core::card::{Card, Rank, Suit};
    /// let card = Card::from_index(51).unwrap();
    /// assert_eq!(card, Card::new(Rank::Ace, Suit::Spades));
    /// ```
    pub fn from_index(index: u8) -> Result<Card, CardError> {
        if index < CARD_COUNT {
            Ok(Card(index))
        } else {
            Err(CardError::IndexOutOfRange(index))
        }
    }

    /// Card from a poker rank value (2 -> 14) and a suit index (0 -> 3)
    pub fn from_rank_suit_values(rank: u8, suit: u8) -> Result<Card, CardError> {
        let rank = Rank::from_value(rank).ok_or(CardError::RankOutOfRange(rank))?;
        let suit = Suit::from_index(suit).ok_or(CardError::SuitOutOfRange(suit))?;
        Ok(Card::new(rank, suit))
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    pub fn rank(self) -> Rank {
        Rank::ALL[usize::from(self.0 / SUIT_COUNT)]
    }

    pub fn suit(self) -> Suit {
        Suit::ALL[usize::from(self.0 % SUIT_COUNT)]
    }

    /// single bit mask of this card
    pub const fn mask(self) -> u64 {
        1u64 << self.0
    }

    /// The full deck in index order (2c, 2d, 2h, 2s, 3c ... As)
    pub fn all() -> impl Iterator<Item = Card> {
        (0..CARD_COUNT).map(Card)
    }

    /// Parse a card from its rank and suit characters
    pub fn from_chars(rank: char, suit: char) -> Result<Card, CardError> {
        let rank = char_to_rank(rank).ok_or(CardError::InvalidRank(rank))?;
        let suit = char_to_suit(suit).ok_or(CardError::InvalidSuit(suit))?;
        Ok(Card::new(rank, suit))
    }
}

impl fmt::Display for Card {
    /// Writes card to string
    ///
    /// # Example
    /// ```
    /// use holdem_core::card::{Card, Rank, Suit};
    /// let card = Card::new(Rank::Ten, Suit::Clubs);
    /// assert_eq!(card.to_string(), "Tc");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(rank), Some(suit), None) => Card::from_chars(rank, suit),
            _ => Err(CardError::InvalidLength(s.to_string())),
        }
    }
}

impl TryFrom<String> for Card {
    type Error = CardError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Card> for String {
    fn from(card: Card) -> String {
        card.to_string()
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> u8 {
        card.0
    }
}

impl TryFrom<u8> for Card {
    type Error = CardError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Card::from_index(index)
    }
}

/// Convert rank char to rank, case insensitive
///
/// # Example
///
/// ```
/// use holdem_core::card::{char_to_rank, Rank};
/// assert_eq!(char_to_rank('a'), Some(Rank::Ace));
/// ```
pub fn char_to_rank(c: char) -> Option<Rank> {
    match c.to_ascii_lowercase() {
        'a' => Some(Rank::Ace),
        'k' => Some(Rank::King),
        'q' => Some(Rank::Queen),
        'j' => Some(Rank::Jack),
        't' => Some(Rank::Ten),
        '9' => Some(Rank::Nine),
        '8' => Some(Rank::Eight),
        '7' => Some(Rank::Seven),
        '6' => Some(Rank::Six),
        '5' => Some(Rank::Five),
        '4' => Some(Rank::Four),
        '3' => Some(Rank::Three),
        '2' => Some(Rank::Two),
        _ => None,
    }
}

/// Convert suit char to suit, case insensitive
pub fn char_to_suit(c: char) -> Option<Suit> {
    match c.to_ascii_lowercase() {
        'c' => Some(Suit::Clubs),
        'd' => Some(Suit::Diamonds),
        'h' => Some(Suit::Hearts),
        's' => Some(Suit::Spades),
        _ => None,
    }
}

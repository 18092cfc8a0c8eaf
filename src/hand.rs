/*
 * A player's two hole cards
 *
 * the higher card index is always stored first so both
 * orderings of the same two cards make the same hand
 */

use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::card::{Card, CardError};
use crate::card_set::CardSet;
use crate::constants::*;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum HandError {
    #[error(transparent)]
    Card(#[from] CardError),
    #[error("hand uses {0} twice")]
    SameCard(Card),
    #[error("weight {0} is not in (0, 1]")]
    InvalidWeight(f32),
    #[error("weight \"{0}\" is not a number")]
    WeightText(String),
    #[error("hand must be exactly four characters, got \"{0}\"")]
    InvalidLength(String),
}

lazy_static! {
    /// Every distinct two card combination, 1326 in total
    static ref ALL_COMBOS: Vec<Hand> = {
        let mut combos = Vec::with_capacity(COMBO_COUNT);
        for c1 in Card::all() {
            for c2 in Card::all().take_while(|c2| *c2 < c1) {
                combos.push(Hand::canonical(c1, c2, 1.0));
            }
        }
        combos
    };
}

/// Hole cards with a range weight
///
/// Equality, hashing and ordering only look at the two cards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hand {
    high: Card,
    low: Card,
    weight: f32,
}

impl Hand {
    /// Hand with full weight
    ///
    /// # Example
    ///
    /// ```
    /// use holdem_core::hand::Hand;
    /// let a = Hand::new("2c".parse().unwrap(), "As".parse().unwrap()).unwrap();
    /// let b = Hand::new("As".parse().unwrap(), "2c".parse().unwrap()).unwrap();
    /// assert_eq!(a, b);
    /// assert_eq!(a.to_string(), "As2c");
    /// ```
    pub fn new(c1: Card, c2: Card) -> Result<Hand, HandError> {
        Hand::weighted(c1, c2, 1.0)
    }

    /// Hand with a weight in (0, 1]
    pub fn weighted(c1: Card, c2: Card, weight: f32) -> Result<Hand, HandError> {
        if c1 == c2 {
            return Err(HandError::SameCard(c1));
        }
        check_weight(weight)?;
        Ok(Hand::canonical(c1, c2, weight))
    }

    fn canonical(c1: Card, c2: Card, weight: f32) -> Hand {
        if c1 > c2 {
            Hand { high: c1, low: c2, weight }
        } else {
            Hand { high: c2, low: c1, weight }
        }
    }

    /// Same cards, new weight
    pub fn with_weight(self, weight: f32) -> Result<Hand, HandError> {
        check_weight(weight)?;
        Ok(Hand { weight, ..self })
    }

    /// Iterates all 1326 combos at full weight
    pub fn all() -> impl Iterator<Item = Hand> {
        ALL_COMBOS.iter().copied()
    }

    pub fn high(&self) -> Card {
        self.high
    }

    pub fn low(&self) -> Card {
        self.low
    }

    pub fn cards(&self) -> [Card; 2] {
        [self.high, self.low]
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn card_set(&self) -> CardSet {
        CardSet::pair(self.high, self.low)
    }

    /// true if either hole card is in `cards`
    pub fn overlaps<T: Into<CardSet>>(&self, cards: T) -> bool {
        self.card_set().overlaps(cards.into())
    }

    pub fn is_pair(&self) -> bool {
        self.high.rank() == self.low.rank()
    }

    pub fn is_suited(&self) -> bool {
        self.high.suit() == self.low.suit()
    }
}

fn check_weight(weight: f32) -> Result<(), HandError> {
    if weight.is_finite() && weight > 0.0 && weight <= 1.0 {
        Ok(())
    } else {
        Err(HandError::InvalidWeight(weight))
    }
}

impl PartialEq for Hand {
    fn eq(&self, other: &Self) -> bool {
        self.high == other.high && self.low == other.low
    }
}

impl Eq for Hand {}

impl Hash for Hand {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.high.hash(state);
        self.low.hash(state);
    }
}

impl Ord for Hand {
    fn cmp(&self, other: &Self) -> Ordering {
        self.high
            .cmp(&other.high)
            .then_with(|| self.low.cmp(&other.low))
    }
}

impl PartialOrd for Hand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<Hand> for CardSet {
    fn from(hand: Hand) -> Self {
        hand.card_set()
    }
}

impl From<&Hand> for CardSet {
    fn from(hand: &Hand) -> Self {
        hand.card_set()
    }
}

impl fmt::Display for Hand {
    /// Writes hole cards to string, high card first
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.high, self.low)
    }
}

impl FromStr for Hand {
    type Err = HandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 4 {
            return Err(HandError::InvalidLength(s.to_string()));
        }
        let c1 = Card::from_chars(chars[0], chars[1])?;
        let c2 = Card::from_chars(chars[2], chars[3])?;
        Hand::new(c1, c2)
    }
}

impl TryFrom<String> for Hand {
    type Error = HandError;

    /// Reads "AhKd" or a weighted "AhKd:0.5"
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.find(':') {
            Some(pos) => {
                let text = s[pos + 1..].trim();
                let weight = text
                    .parse::<f32>()
                    .map_err(|_| HandError::WeightText(text.to_string()))?;
                s[..pos].parse::<Hand>()?.with_weight(weight)
            }
            None => s.parse(),
        }
    }
}

impl From<Hand> for String {
    /// the weight is only written when below one
    fn from(hand: Hand) -> String {
        if hand.weight < 1.0 {
            format!("{}:{}", hand, hand.weight)
        } else {
            hand.to_string()
        }
    }
}

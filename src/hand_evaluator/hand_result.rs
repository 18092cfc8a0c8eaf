use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Hand categories, weakest first
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HandCategory {
    HighCard = 1,
    Pair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
    RoyalFlush = 10,
}

impl HandCategory {
    pub const ALL: [HandCategory; 10] = [
        HandCategory::HighCard,
        HandCategory::Pair,
        HandCategory::TwoPair,
        HandCategory::ThreeOfAKind,
        HandCategory::Straight,
        HandCategory::Flush,
        HandCategory::FullHouse,
        HandCategory::FourOfAKind,
        HandCategory::StraightFlush,
        HandCategory::RoyalFlush,
    ];

    /// 1 for high card up to 10 for a royal flush
    pub const fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(value: u8) -> Option<HandCategory> {
        value
            .checked_sub(1)
            .and_then(|i| HandCategory::ALL.get(usize::from(i)).copied())
    }

    /// Number of tiebreakers the evaluator emits for this category
    pub fn tiebreaker_count(self) -> usize {
        match self {
            HandCategory::HighCard => 5,
            HandCategory::Pair => 4,
            HandCategory::TwoPair => 3,
            HandCategory::ThreeOfAKind => 3,
            HandCategory::Straight => 1,
            HandCategory::Flush => 5,
            HandCategory::FullHouse => 2,
            HandCategory::FourOfAKind => 2,
            HandCategory::StraightFlush => 1,
            HandCategory::RoyalFlush => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::Pair => "Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Category plus tiebreaker ranks, most significant first
///
/// Tiebreakers are rank values (2 -> 14). Results compare by category,
/// then tiebreaker by tiebreaker over the shorter of the two lists.
#[derive(Debug, Clone, Copy)]
pub struct HandResult {
    category: HandCategory,
    tiebreakers: [u8; TIEBREAKER_SLOTS],
    len: u8,
}

impl HandResult {
    /// Only the first five tiebreakers are kept
    pub fn new(category: HandCategory, tiebreakers: &[u8]) -> Self {
        let len = tiebreakers.len().min(TIEBREAKER_SLOTS);
        let mut slots = [0u8; TIEBREAKER_SLOTS];
        slots[..len].copy_from_slice(&tiebreakers[..len]);
        HandResult {
            category,
            tiebreakers: slots,
            len: len as u8,
        }
    }

    pub fn category(&self) -> HandCategory {
        self.category
    }

    pub fn tiebreakers(&self) -> &[u8] {
        &self.tiebreakers[..usize::from(self.len)]
    }
}

impl Ord for HandResult {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category.cmp(&other.category).then_with(|| {
            self.tiebreakers()
                .iter()
                .zip(other.tiebreakers())
                .map(|(a, b)| a.cmp(b))
                .find(|o| *o != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        })
    }
}

impl PartialOrd for HandResult {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HandResult {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HandResult {}

impl fmt::Display for HandResult {
    /// e.g. "Full House [14, 13]"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.category, self.tiebreakers())
    }
}

/// Outcome of a two player showdown
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Showdown {
    FirstWins = 1,
    Tie = 0,
    SecondWins = -1,
}

impl From<Ordering> for Showdown {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Greater => Showdown::FirstWins,
            Ordering::Equal => Showdown::Tie,
            Ordering::Less => Showdown::SecondWins,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_values() {
        for (i, category) in HandCategory::ALL.iter().enumerate() {
            assert_eq!(usize::from(category.value()), i + 1);
            assert_eq!(HandCategory::from_value(category.value()), Some(*category));
        }
        assert_eq!(HandCategory::from_value(0), None);
        assert_eq!(HandCategory::from_value(11), None);
        assert_eq!(HandCategory::FullHouse.to_string(), "Full House");
        assert!(HandCategory::Flush > HandCategory::Straight);
    }

    #[test]
    fn test_result_order() {
        let pair_aces = HandResult::new(HandCategory::Pair, &[14, 13, 12, 11]);
        let pair_aces_worse = HandResult::new(HandCategory::Pair, &[14, 13, 12, 9]);
        let two_pair = HandResult::new(HandCategory::TwoPair, &[3, 2, 4]);
        assert!(pair_aces > pair_aces_worse);
        assert!(two_pair > pair_aces);
        assert_eq!(pair_aces, pair_aces);
    }

    #[test]
    fn test_prefix_is_equal() {
        let short = HandResult::new(HandCategory::Pair, &[14]);
        let long = HandResult::new(HandCategory::Pair, &[14, 13, 12, 11]);
        assert_eq!(short, long);
        assert_eq!(short.cmp(&long), Ordering::Equal);
        let empty = HandResult::new(HandCategory::HighCard, &[]);
        assert_eq!(empty.tiebreakers().len(), 0);
    }

    #[test]
    fn test_new_truncates() {
        let result = HandResult::new(HandCategory::HighCard, &[14, 12, 10, 8, 6, 4, 2]);
        assert_eq!(result.tiebreakers(), &[14, 12, 10, 8, 6]);
    }

    #[test]
    fn test_showdown_values() {
        assert_eq!(Showdown::FirstWins as i32, 1);
        assert_eq!(Showdown::Tie as i32, 0);
        assert_eq!(Showdown::SecondWins as i32, -1);
        assert_eq!(Showdown::from(Ordering::Less), Showdown::SecondWins);
    }
}

use std::fmt;
use std::iter::FromIterator;
use std::ops::{BitAnd, BitOr};
use std::str::FromStr;

use crate::card::{Card, CardError};
use crate::constants::*;

/// A set of cards stored as a 64 bit mask
///
/// Bit i is set if and only if the card with index i is a member.
/// Only the low 52 bits are ever set.
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq)]
pub struct CardSet(u64);

impl CardSet {
    /// The empty set
    pub const fn new() -> Self {
        CardSet(0)
    }

    /// Set from raw bits, bits above the deck are dropped
    pub const fn from_bits(bits: u64) -> Self {
        CardSet(bits & CARD_MASK)
    }

    pub const fn single(card: Card) -> Self {
        CardSet(card.mask())
    }

    pub const fn pair(c1: Card, c2: Card) -> Self {
        CardSet(c1.mask() | c2.mask())
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub fn add(&mut self, card: Card) {
        self.0 |= card.mask();
    }

    pub fn remove(&mut self, card: Card) {
        self.0 &= !card.mask();
    }

    pub const fn contains(self, card: Card) -> bool {
        (self.0 & card.mask()) != 0
    }

    /// true if the two sets share at least one card
    pub const fn overlaps(self, other: CardSet) -> bool {
        (self.0 & other.0) != 0
    }

    pub const fn union(self, other: CardSet) -> CardSet {
        CardSet(self.0 | other.0)
    }

    pub const fn intersection(self, other: CardSet) -> CardSet {
        CardSet(self.0 & other.0)
    }

    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Iterate members in index order
    pub fn iter(self) -> CardSetIter {
        CardSetIter(self.0)
    }
}

/// Empties a card set from the lowest index up
#[derive(Debug, Clone)]
pub struct CardSetIter(u64);

impl Iterator for CardSetIter {
    type Item = Card;

    fn next(&mut self) -> Option<Card> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Card::from_index(index).ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl IntoIterator for CardSet {
    type Item = Card;
    type IntoIter = CardSetIter;

    fn into_iter(self) -> CardSetIter {
        self.iter()
    }
}

impl FromIterator<Card> for CardSet {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut set = CardSet::new();
        for card in iter {
            set.add(card);
        }
        set
    }
}

impl<'a> FromIterator<&'a Card> for CardSet {
    fn from_iter<I: IntoIterator<Item = &'a Card>>(iter: I) -> Self {
        iter.into_iter().copied().collect()
    }
}

impl From<Card> for CardSet {
    fn from(card: Card) -> Self {
        CardSet::single(card)
    }
}

impl BitOr for CardSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl BitAnd for CardSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(rhs)
    }
}

impl fmt::Display for CardSet {
    /// Writes the members in index order, e.g. "2c7hAs"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in self.iter() {
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}

impl FromStr for CardSet {
    type Err = CardError;

    /// Converts a card string into a card set
    ///
    /// Spaces and commas between cards are skipped. A card given twice
    /// is an error.
    ///
    /// # Example
    ///
    /// ```
    /// use holdem_core::card_set::CardSet;
    /// let cards: CardSet = "As2hQd".parse().unwrap();
    /// assert_eq!(cards.count(), 3);
    /// ```
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = text.chars().collect();
        let mut cards = CardSet::new();
        let mut i = 0;
        while i < chars.len() {
            if chars[i].is_whitespace() || chars[i] == ',' {
                i += 1;
                continue;
            }
            if i + 1 >= chars.len() {
                return Err(CardError::InvalidLength(chars[i].to_string()));
            }
            let card = Card::from_chars(chars[i], chars[i + 1])?;
            if cards.contains(card) {
                return Err(CardError::DuplicateCard(card));
            }
            cards.add(card);
            i += 2;
        }
        Ok(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn test_card_set_basic() {
        let mut set = CardSet::new();
        assert!(set.is_empty());
        set.add(card("As"));
        assert!(!set.is_empty());
        assert!(set.contains(card("As")));
        assert_eq!(set.count(), 1);
        // adding twice is a no-op
        set.add(card("As"));
        assert_eq!(set.count(), 1);
        set.remove(card("Kd"));
        assert_eq!(set.count(), 1);
        set.remove(card("As"));
        assert!(set.is_empty());
    }

    #[test]
    fn test_add_then_contains() {
        for c in Card::all() {
            let mut set = CardSet::from_bits(0x5555_5555_5555_5555);
            set.add(c);
            assert!(set.contains(c));
        }
    }

    #[test]
    fn test_card_set_overlap() {
        let set1 = CardSet::pair(card("As"), card("Kh"));
        let set2 = CardSet::pair(card("Kh"), card("Qd"));
        let set3 = CardSet::single(card("2c"));
        assert!(set1.overlaps(set2));
        assert!(set2.overlaps(set1));
        assert!(!set1.overlaps(set3));
        assert!(!set3.overlaps(set1));
        assert_eq!((set1 & set2).count(), 1);
        assert_eq!((set1 | set2).count(), 3);
    }

    #[test]
    fn test_from_bits_masks_high_bits() {
        let set = CardSet::from_bits(u64::MAX);
        assert_eq!(set.count(), 52);
        assert_eq!(set.iter().count(), 52);
    }

    #[test]
    fn test_iteration_order() {
        let set: CardSet = "Jc Ts 2c Js".parse().unwrap();
        let cards: Vec<Card> = set.into_iter().collect();
        assert_eq!(
            cards,
            vec![
                Card::new(Rank::Two, Suit::Clubs),
                Card::new(Rank::Ten, Suit::Spades),
                Card::new(Rank::Jack, Suit::Clubs),
                Card::new(Rank::Jack, Suit::Spades),
            ]
        );
        assert_eq!(set.to_string(), "2cTsJcJs");
    }

    #[test]
    fn test_from_str_errors() {
        assert_eq!("AsXh".parse::<CardSet>(), Err(CardError::InvalidRank('X')));
        assert!(matches!("AsK".parse::<CardSet>(), Err(CardError::InvalidLength(_))));
        assert_eq!("".parse::<CardSet>(), Ok(CardSet::new()));
    }

    #[test]
    fn test_from_str_separators() {
        let set: CardSet = "As Kh, Qd".parse().unwrap();
        assert_eq!(set, "AsKhQd".parse().unwrap());
        assert_eq!("A s K h".parse::<CardSet>(), Err(CardError::InvalidSuit(' ')));
        assert_eq!("A,s".parse::<CardSet>(), Err(CardError::InvalidSuit(',')));
        let ace = card("As");
        assert_eq!("AsAs".parse::<CardSet>(), Err(CardError::DuplicateCard(ace)));
        assert_eq!("As Kh As".parse::<CardSet>(), Err(CardError::DuplicateCard(ace)));
    }
}

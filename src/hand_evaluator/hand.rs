use std::ops::Add;
use std::ops::AddAssign;

use crate::card::{Card, Suit};
use crate::card_set::CardSet;
use crate::constants::*;

use super::EvalError;

const SUIT_SHIFT: u8 = 16;
const SUIT_GROUP_MASK: u64 = 0x1FFF;

/// Bit representation of a poker hand for use in the evaluator
///
/// Each suit owns a 16 bit group of the mask and every card sets the bit
/// of its rank index inside its suit group.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct EvalHand {
    mask: u64,
}

impl EvalHand {
    pub const fn empty() -> EvalHand {
        EvalHand { mask: 0 }
    }

    pub fn from_card(card: Card) -> EvalHand {
        let shift = SUIT_SHIFT * card.suit().index() + card.rank().index();
        EvalHand {
            mask: 1u64 << shift,
        }
    }

    /// Hand from a list of cards, every card at most once
    pub fn from_cards(cards: &[Card]) -> Result<EvalHand, EvalError> {
        let mut seen = CardSet::new();
        let mut hand = EvalHand::empty();
        for &card in cards {
            if seen.contains(card) {
                return Err(EvalError::DuplicateCard(card));
            }
            seen.add(card);
            hand += EvalHand::from_card(card);
        }
        Ok(hand)
    }

    pub fn from_card_set(cards: CardSet) -> EvalHand {
        cards
            .iter()
            .map(EvalHand::from_card)
            .fold(EvalHand::empty(), |a, b| a + b)
    }

    /// ranks held in one suit, bit i is rank index i
    pub fn suit_mask(self, suit: Suit) -> u16 {
        ((self.mask >> (SUIT_SHIFT * suit.index())) & SUIT_GROUP_MASK) as u16
    }

    pub fn suit_count(self, suit: Suit) -> u32 {
        self.suit_mask(suit).count_ones()
    }

    /// ranks held in any suit
    pub fn rank_mask(self) -> u16 {
        Suit::ALL
            .iter()
            .fold(0u16, |mask, &suit| mask | self.suit_mask(suit))
    }

    /// how many cards of a rank index (0 -> 12) the hand holds
    pub fn rank_count(self, rank: u8) -> u8 {
        Suit::ALL
            .iter()
            .filter(|&&suit| self.suit_mask(suit) & (1u16 << rank) != 0)
            .count() as u8
    }

    /// does hand have an ace of specific suit
    pub fn has_ace_of_suit(self, suit: Suit) -> bool {
        self.suit_mask(suit) & (1u16 << (RANK_COUNT - 1)) != 0
    }
}

impl Add for EvalHand {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        EvalHand {
            mask: self.mask | other.mask,
        }
    }
}

impl AddAssign for EvalHand {
    fn add_assign(&mut self, other: Self) {
        self.mask |= other.mask;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(text: &str) -> Vec<Card> {
        text.parse::<CardSet>().unwrap().iter().collect()
    }

    #[test]
    fn test_eval_hand_counts() {
        let hand = EvalHand::from_cards(&cards("AsAhKs2c")).unwrap();
        assert_eq!(hand.suit_count(Suit::Spades), 2);
        assert_eq!(hand.suit_count(Suit::Diamonds), 0);
        assert_eq!(hand.rank_count(12), 2);
        assert_eq!(hand.rank_count(0), 1);
        assert_eq!(hand.rank_count(5), 0);
        assert_eq!(hand.rank_mask(), (1 << 12) | (1 << 11) | 1);
        assert!(hand.has_ace_of_suit(Suit::Spades));
        assert!(!hand.has_ace_of_suit(Suit::Clubs));
    }

    #[test]
    fn test_eval_hand_add() {
        let a = EvalHand::from_cards(&cards("AsKd")).unwrap();
        let b = EvalHand::from_cards(&cards("2c")).unwrap();
        let sum = a + b;
        assert_eq!(sum, EvalHand::from_card_set("AsKd2c".parse().unwrap()));
        assert_eq!(sum.rank_mask().count_ones(), 3);
    }

    #[test]
    fn test_duplicate_card() {
        let card: Card = "As".parse().unwrap();
        assert_eq!(
            EvalHand::from_cards(&[card, card]),
            Err(EvalError::DuplicateCard(card))
        );
    }
}

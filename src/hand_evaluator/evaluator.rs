use crate::card::{Card, Suit};
use crate::constants::*;

use super::hand::EvalHand;
use super::hand_result::{HandCategory, HandResult, Showdown};
use super::EvalError;

// A-2-3-4-5 as a rank mask
const WHEEL: u16 = 0b1_0000_0000_1111;
const ACE: u8 = RANK_COUNT - 1;

/// Rank value (2 -> 14) of a rank index
const fn value(rank: u8) -> u8 {
    rank + 2
}

/// Ranks the best five card hand among `cards`
///
/// At least five distinct cards are needed. Categories are tried from
/// royal flush down and the first one that matches wins.
///
/// # Example
///
/// ```
/// use holdem_core::card_set::CardSet;
/// use holdem_core::hand_evaluator::{evaluate, HandCategory};
/// let cards: Vec<_> = "AsAhAdKcKs2d3h".parse::<CardSet>().unwrap().iter().collect();
/// let result = evaluate(&cards).unwrap();
/// assert_eq!(result.category(), HandCategory::FullHouse);
/// assert_eq!(result.tiebreakers(), &[14, 13]);
/// ```
pub fn evaluate(cards: &[Card]) -> Result<HandResult, EvalError> {
    if cards.len() < MIN_EVAL_CARDS {
        return Err(EvalError::NotEnoughCards(cards.len()));
    }
    let hand = EvalHand::from_cards(cards)?;
    Ok(evaluate_hand(hand))
}

/// Ranks hole cards together with the community cards
pub fn evaluate_hole(hole: &[Card], community: &[Card]) -> Result<HandResult, EvalError> {
    let mut cards = Vec::with_capacity(hole.len() + community.len());
    cards.extend_from_slice(hole);
    cards.extend_from_slice(community);
    evaluate(&cards)
}

/// Showdown between two sets of hole cards on the same community cards
pub fn compare(hole1: &[Card], hole2: &[Card], community: &[Card]) -> Result<Showdown, EvalError> {
    let first = evaluate_hole(hole1, community)?;
    let second = evaluate_hole(hole2, community)?;
    Ok(Showdown::from(first.cmp(&second)))
}

fn evaluate_hand(hand: EvalHand) -> HandResult {
    if let Some(high) = find_straight_flush(hand) {
        if high == value(ACE) {
            return HandResult::new(HandCategory::RoyalFlush, &[high]);
        }
        return HandResult::new(HandCategory::StraightFlush, &[high]);
    }
    if let Some(quads) = find_rank_of_n_oak(hand, 4, None) {
        let mut tiebreakers = vec![value(quads)];
        tiebreakers.extend(kickers(hand, 1, &[quads]));
        return HandResult::new(HandCategory::FourOfAKind, &tiebreakers);
    }
    if let Some(trips) = find_rank_of_n_oak(hand, 3, None) {
        if let Some(pair) = find_rank_of_n_oak(hand, 2, Some(trips)) {
            return HandResult::new(HandCategory::FullHouse, &[value(trips), value(pair)]);
        }
    }
    if let Some(flush) = find_flush(hand) {
        return HandResult::new(HandCategory::Flush, &flush);
    }
    if let Some(high) = find_rank_of_straight(hand.rank_mask()) {
        return HandResult::new(HandCategory::Straight, &[high]);
    }
    if let Some(trips) = find_rank_of_n_oak(hand, 3, None) {
        let mut tiebreakers = vec![value(trips)];
        tiebreakers.extend(kickers(hand, 2, &[trips]));
        return HandResult::new(HandCategory::ThreeOfAKind, &tiebreakers);
    }
    if let Some(high_pair) = find_rank_of_n_oak(hand, 2, None) {
        if let Some(low_pair) = find_rank_of_n_oak(hand, 2, Some(high_pair)) {
            let mut tiebreakers = vec![value(high_pair), value(low_pair)];
            tiebreakers.extend(kickers(hand, 1, &[high_pair, low_pair]));
            return HandResult::new(HandCategory::TwoPair, &tiebreakers);
        }
        let mut tiebreakers = vec![value(high_pair)];
        tiebreakers.extend(kickers(hand, 3, &[high_pair]));
        return HandResult::new(HandCategory::Pair, &tiebreakers);
    }
    HandResult::new(HandCategory::HighCard, &kickers(hand, 5, &[]))
}

/// Value of the highest straight in a rank mask, 5 for the wheel
fn find_rank_of_straight(ranks: u16) -> Option<u8> {
    let mut bits = ranks;
    bits &= bits << 1;
    bits &= bits << 1;
    bits &= bits << 1;
    bits &= bits << 1;
    if bits != 0 {
        // highest set bit is the top card of the straight
        Some(value(15 - bits.leading_zeros() as u8))
    } else if ranks & WHEEL == WHEEL {
        Some(5)
    } else {
        None
    }
}

/// Best straight inside any suit holding five or more cards
fn find_straight_flush(hand: EvalHand) -> Option<u8> {
    Suit::ALL
        .iter()
        .filter(|&&suit| hand.suit_count(suit) >= 5)
        .filter_map(|&suit| find_rank_of_straight(hand.suit_mask(suit)))
        .max()
}

/// Top five values of the best flush suit
fn find_flush(hand: EvalHand) -> Option<Vec<u8>> {
    Suit::ALL
        .iter()
        .filter(|&&suit| hand.suit_count(suit) >= 5)
        .map(|&suit| top_ranks(hand.suit_mask(suit), 5))
        .max()
}

/// Highest rank index held at least `n` times, other than `skip`
fn find_rank_of_n_oak(hand: EvalHand, n: u8, skip: Option<u8>) -> Option<u8> {
    (0..RANK_COUNT)
        .rev()
        .filter(|&rank| Some(rank) != skip)
        .find(|&rank| hand.rank_count(rank) >= n)
}

/// Values of the highest `n` ranks set in a mask
fn top_ranks(ranks: u16, n: usize) -> Vec<u8> {
    (0..RANK_COUNT)
        .rev()
        .filter(|&rank| ranks & (1u16 << rank) != 0)
        .take(n)
        .map(value)
        .collect()
}

/// Best `n` cards whose rank is not in `used`, as values
///
/// Every card counts, so a leftover pair gives two kickers.
fn kickers(hand: EvalHand, n: usize, used: &[u8]) -> Vec<u8> {
    (0..RANK_COUNT)
        .rev()
        .filter(|rank| !used.contains(rank))
        .flat_map(|rank| std::iter::repeat(value(rank)).take(usize::from(hand.rank_count(rank))))
        .take(n)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card_set::CardSet;
    use rand::rngs::SmallRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    fn cards(text: &str) -> Vec<Card> {
        text.split_whitespace()
            .map(|c| c.parse().unwrap())
            .collect()
    }

    fn eval(text: &str) -> HandResult {
        evaluate(&cards(text)).unwrap()
    }

    /// best result over every five card subset
    fn brute_force(cards: &[Card]) -> HandResult {
        let n = cards.len();
        let mut best: Option<HandResult> = None;
        for mask in 0u32..(1 << n) {
            if mask.count_ones() != 5 {
                continue;
            }
            let five: Vec<Card> = (0..n)
                .filter(|i| mask & (1 << i) != 0)
                .map(|i| cards[i])
                .collect();
            let result = evaluate(&five).unwrap();
            best = match best {
                Some(b) if b >= result => Some(b),
                _ => Some(result),
            };
        }
        best.unwrap()
    }

    #[test]
    fn test_high_card() {
        let result = eval("As Kd Qh Jc 9s");
        assert_eq!(result.category(), HandCategory::HighCard);
        assert_eq!(result.tiebreakers(), &[14, 13, 12, 11, 9]);
    }

    #[test]
    fn test_pair() {
        let result = eval("As Ah Kd Qc Js");
        assert_eq!(result.category(), HandCategory::Pair);
        assert_eq!(result.tiebreakers(), &[14, 13, 12, 11]);
    }

    #[test]
    fn test_two_pair() {
        let result = eval("As Ah Kd Kc Js");
        assert_eq!(result.category(), HandCategory::TwoPair);
        assert_eq!(result.tiebreakers(), &[14, 13, 11]);
        // third pair plays as the kicker
        let result = eval("9s 9h 4d 4c 7s 7h 2c");
        assert_eq!(result.category(), HandCategory::TwoPair);
        assert_eq!(result.tiebreakers(), &[9, 7, 4]);
    }

    #[test]
    fn test_three_of_a_kind() {
        let result = eval("7s 7h 7d Kc 2s 3h");
        assert_eq!(result.category(), HandCategory::ThreeOfAKind);
        assert_eq!(result.tiebreakers(), &[7, 13, 3]);
    }

    #[test]
    fn test_straights() {
        let result = eval("As 2d 3h 4c 5s");
        assert_eq!(result.category(), HandCategory::Straight);
        assert_eq!(result.tiebreakers(), &[5]);

        let result = eval("Ts Jd Qh Kc As");
        assert_eq!(result.category(), HandCategory::Straight);
        assert_eq!(result.tiebreakers(), &[14]);

        // six high beats the wheel
        let result = eval("As 2d 3h 4c 5s 6d");
        assert_eq!(result.tiebreakers(), &[6]);

        // K A 2 3 4 does not wrap
        let result = eval("Ks Ad 2h 3c 4s");
        assert_eq!(result.category(), HandCategory::HighCard);
    }

    #[test]
    fn test_flush() {
        let result = eval("2h 7h 9h Jh Kh Ah 3c");
        assert_eq!(result.category(), HandCategory::Flush);
        assert_eq!(result.tiebreakers(), &[14, 13, 11, 9, 7]);
    }

    #[test]
    fn test_full_house() {
        let result = eval("As Ah Ad Kc Ks 2d 3h");
        assert_eq!(result.category(), HandCategory::FullHouse);
        assert_eq!(result.tiebreakers(), &[14, 13]);
        // second set plays as the pair
        let result = eval("5s 5h 5d 9c 9s 9d 2h");
        assert_eq!(result.category(), HandCategory::FullHouse);
        assert_eq!(result.tiebreakers(), &[9, 5]);
    }

    #[test]
    fn test_four_of_a_kind() {
        let result = eval("8s 8h 8d 8c 2s Kd Kc");
        assert_eq!(result.category(), HandCategory::FourOfAKind);
        assert_eq!(result.tiebreakers(), &[8, 13]);
    }

    #[test]
    fn test_straight_flush() {
        let result = eval("9s Ts Js Qs Ks");
        assert_eq!(result.category(), HandCategory::StraightFlush);
        assert_eq!(result.tiebreakers(), &[13]);

        let result = eval("As 2s 3s 4s 5s Kd");
        assert_eq!(result.category(), HandCategory::StraightFlush);
        assert_eq!(result.tiebreakers(), &[5]);

        let result = eval("Ts Js Qs Ks As 9s");
        assert_eq!(result.category(), HandCategory::RoyalFlush);
        assert_eq!(result.tiebreakers(), &[14]);
    }

    #[test]
    fn test_straight_and_flush_not_straight_flush() {
        let result = eval("5h 6h 7h 8c 9h 2h");
        assert_eq!(result.category(), HandCategory::Flush);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            evaluate(&cards("As Kd Qh Jc")),
            Err(EvalError::NotEnoughCards(4))
        );
        let dup: Card = "As".parse().unwrap();
        assert_eq!(
            evaluate(&cards("As Kd Qh Jc As")),
            Err(EvalError::DuplicateCard(dup))
        );
    }

    #[test]
    fn test_compare() {
        let board = cards("2c 7d 9h Ts Jc");
        assert_eq!(
            compare(&cards("Ah Ad"), &cards("Kh Kd"), &board).unwrap(),
            Showdown::FirstWins
        );
        assert_eq!(
            compare(&cards("Kh Kd"), &cards("Ah Ad"), &board).unwrap(),
            Showdown::SecondWins
        );
        // both play the board straight
        let board = cards("8c 9d Th Js Qc");
        assert_eq!(
            compare(&cards("2h 3d"), &cards("4h 5d"), &board).unwrap(),
            Showdown::Tie
        );
        assert!(compare(&cards("Ah"), &cards("Kh Kd"), &cards("2c 7d")).is_err());
    }

    #[test]
    fn test_category_ladder() {
        let flush = eval("2h 7h 9h Jh Kh");
        let straight = eval("5c 6d 7h 8s 9c");
        let pair = eval("5c 5d 7h 8s Kc");
        let high_card = eval("5c 3d 7h 8s Kc");
        assert!(flush > straight);
        assert!(straight > pair);
        assert!(pair > high_card);
        assert!(flush > high_card);
    }

    #[test]
    fn test_best_of_seven_matches_subsets() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        let mut deck: Vec<Card> = Card::all().collect();
        for _ in 0..500 {
            deck.shuffle(&mut rng);
            let seven = &deck[..7];
            let result = evaluate(seven).unwrap();
            let best = brute_force(seven);
            assert_eq!(result.category(), best.category(), "{:?}", seven);
            assert_eq!(result.tiebreakers(), best.tiebreakers(), "{:?}", seven);
        }
    }

    #[test]
    fn test_transitivity() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut deck: Vec<Card> = Card::all().collect();
        let mut results = Vec::new();
        for _ in 0..60 {
            deck.shuffle(&mut rng);
            results.push(evaluate(&deck[..7]).unwrap());
        }
        for a in &results {
            for b in &results {
                for c in &results {
                    if a > b && b > c {
                        assert!(a > c);
                    }
                }
            }
        }
    }

    #[test]
    fn test_evaluate_card_set_order_independent() {
        let set: CardSet = "AsAhAdKcKs2d3h".parse().unwrap();
        let mut forward: Vec<Card> = set.iter().collect();
        let a = evaluate(&forward).unwrap();
        forward.reverse();
        let b = evaluate(&forward).unwrap();
        assert_eq!(a.tiebreakers(), b.tiebreakers());
        assert_eq!(a.category(), b.category());
    }
}

/*
 * Packs hand results into a single integer
 *
 * bits 20+ hold the category (1 -> 10) and the tiebreakers follow in
 * 4 bit slots, most significant first, starting at bit 16
 */

use crate::board::Board;
use crate::card::Card;
use crate::constants::*;
use crate::hand_evaluator::{self, EvalError, HandCategory, HandResult, Showdown};

const TIEBREAKER_MASK: i32 = (1 << TIEBREAKER_BITS) - 1;

/// Pack a result so that a larger integer is a stronger hand
///
/// # Example
///
/// ```
/// use holdem_core::hand_evaluator::{HandCategory, HandResult};
/// use holdem_core::hand_ranking::encode;
/// let wheel = HandResult::new(HandCategory::Straight, &[5]);
/// let six_high = HandResult::new(HandCategory::Straight, &[6]);
/// assert!(encode(&six_high) > encode(&wheel));
/// assert_eq!(encode(&wheel), 5 << 20 | 5 << 16);
/// ```
pub fn encode(result: &HandResult) -> i32 {
    result
        .tiebreakers()
        .iter()
        .take(TIEBREAKER_SLOTS)
        .enumerate()
        .fold(
            i32::from(result.category().value()) << HAND_CATEGORY_SHIFT,
            |code, (i, &tiebreaker)| code | i32::from(tiebreaker) << tiebreaker_shift(i),
        )
}

fn tiebreaker_shift(slot: usize) -> i32 {
    i32::from(HAND_CATEGORY_SHIFT) - i32::from(TIEBREAKER_BITS) * (slot as i32 + 1)
}

/// Category of an encoded ranking
pub fn decode_category(code: i32) -> Option<HandCategory> {
    if code < 0 {
        return None;
    }
    let category = code >> HAND_CATEGORY_SHIFT;
    if category > i32::from(u8::MAX) {
        return None;
    }
    HandCategory::from_value(category as u8)
}

/// Rebuild the result an encoded ranking came from
pub fn decode(code: i32) -> Option<HandResult> {
    let category = decode_category(code)?;
    let tiebreakers: Vec<u8> = (0..category.tiebreaker_count())
        .map(|i| ((code >> tiebreaker_shift(i)) & TIEBREAKER_MASK) as u8)
        .collect();
    Some(HandResult::new(category, &tiebreakers))
}

/// Encoded strength of two hole cards on a board
pub fn evaluate(hole1: Card, hole2: Card, board: &Board) -> Result<i32, EvalError> {
    evaluate_cards(hole1, hole2, board.cards())
}

/// Encoded strength of two hole cards with any community cards
pub fn evaluate_cards(hole1: Card, hole2: Card, community: &[Card]) -> Result<i32, EvalError> {
    let result = hand_evaluator::evaluate_hole(&[hole1, hole2], community)?;
    Ok(encode(&result))
}

/// 1 if the first ranking wins, -1 if the second does and 0 on a tie
pub fn compare(first: i32, second: i32) -> i32 {
    Showdown::from(first.cmp(&second)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand_evaluator::evaluate as evaluate_result;
    use rand::rngs::SmallRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn test_encode_layout() {
        let royal = HandResult::new(HandCategory::RoyalFlush, &[14]);
        assert_eq!(encode(&royal), 10 << 20 | 14 << 16);
        let high = HandResult::new(HandCategory::HighCard, &[14, 13, 12, 11, 9]);
        assert_eq!(
            encode(&high),
            1 << 20 | 14 << 16 | 13 << 12 | 12 << 8 | 11 << 4 | 9
        );
        assert_eq!(decode_category(encode(&royal)), Some(HandCategory::RoyalFlush));
        assert_eq!(decode_category(encode(&high)), Some(HandCategory::HighCard));
        assert_eq!(decode_category(0), None);
        assert_eq!(decode_category(-1), None);
        assert_eq!(decode_category(11 << 20), None);
    }

    #[test]
    fn test_decode_round_trip() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut deck: Vec<Card> = Card::all().collect();
        for _ in 0..200 {
            deck.shuffle(&mut rng);
            let result = evaluate_result(&deck[..7]).unwrap();
            let decoded = decode(encode(&result)).unwrap();
            assert_eq!(decoded.category(), result.category());
            assert_eq!(decoded.tiebreakers(), result.tiebreakers());
        }
    }

    #[test]
    fn test_encoded_order_matches_result_order() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut deck: Vec<Card> = Card::all().collect();
        let mut results = Vec::new();
        for _ in 0..150 {
            deck.shuffle(&mut rng);
            results.push(evaluate_result(&deck[..7]).unwrap());
        }
        for a in &results {
            for b in &results {
                assert_eq!(encode(a).cmp(&encode(b)), a.cmp(b), "{} vs {}", a, b);
            }
        }
    }

    #[test]
    fn test_evaluate_on_board() {
        let board: Board = "Ad Kc Ks 2d 3h".parse().unwrap();
        let full_house = evaluate(card("As"), card("Ah"), &board).unwrap();
        assert_eq!(decode_category(full_house), Some(HandCategory::FullHouse));
        let two_pair = evaluate(card("Qs"), card("Qh"), &board).unwrap();
        assert_eq!(compare(full_house, two_pair), 1);
        assert_eq!(compare(two_pair, full_house), -1);
        assert_eq!(compare(two_pair, two_pair), 0);

        let flop: Board = "Ad Kc Ks".parse().unwrap();
        assert!(evaluate(card("As"), card("Ah"), &flop).is_ok());
        assert_eq!(
            evaluate_cards(card("As"), card("Ah"), &[card("Ad"), card("Kc")]),
            Err(EvalError::NotEnoughCards(4))
        );
        assert_eq!(
            evaluate(card("Ad"), card("Ah"), &flop),
            Err(EvalError::DuplicateCard(card("Ad")))
        );
    }
}

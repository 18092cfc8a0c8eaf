use log::debug;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::card::Suit;
use crate::hand::Hand;
use crate::hand_evaluator::{evaluate_hole, EvalError, EvalHand, HandCategory};
use crate::hand_range::HandRange;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum MadeHandCategory {
    QuadsOrBetter,
    FullHouse,
    Flush,
    Straight,
    ThreeOfAKind,
    TwoPair,
    Pair,
    NoMadeHand,
}

impl MadeHandCategory {
    pub const ALL: [MadeHandCategory; 8] = [
        MadeHandCategory::QuadsOrBetter,
        MadeHandCategory::FullHouse,
        MadeHandCategory::Flush,
        MadeHandCategory::Straight,
        MadeHandCategory::ThreeOfAKind,
        MadeHandCategory::TwoPair,
        MadeHandCategory::Pair,
        MadeHandCategory::NoMadeHand,
    ];

    pub fn table_index(self) -> usize {
        match self {
            MadeHandCategory::QuadsOrBetter => 0,
            MadeHandCategory::FullHouse => 1,
            MadeHandCategory::Flush => 2,
            MadeHandCategory::Straight => 3,
            MadeHandCategory::ThreeOfAKind => 4,
            MadeHandCategory::TwoPair => 5,
            MadeHandCategory::Pair => 6,
            MadeHandCategory::NoMadeHand => 7,
        }
    }

    pub fn category_count() -> usize {
        MadeHandCategory::ALL.len()
    }
}

impl From<HandCategory> for MadeHandCategory {
    fn from(category: HandCategory) -> Self {
        match category {
            HandCategory::RoyalFlush | HandCategory::StraightFlush | HandCategory::FourOfAKind => {
                MadeHandCategory::QuadsOrBetter
            }
            HandCategory::FullHouse => MadeHandCategory::FullHouse,
            HandCategory::Flush => MadeHandCategory::Flush,
            HandCategory::Straight => MadeHandCategory::Straight,
            HandCategory::ThreeOfAKind => MadeHandCategory::ThreeOfAKind,
            HandCategory::TwoPair => MadeHandCategory::TwoPair,
            HandCategory::Pair => MadeHandCategory::Pair,
            HandCategory::HighCard => MadeHandCategory::NoMadeHand,
        }
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawHandCategory {
    TwoCardFlushDraw,
    NutFlushDraw,
    OpenEndedStraightDraw,
    NoDraw,
}

impl DrawHandCategory {
    pub const ALL: [DrawHandCategory; 4] = [
        DrawHandCategory::TwoCardFlushDraw,
        DrawHandCategory::NutFlushDraw,
        DrawHandCategory::OpenEndedStraightDraw,
        DrawHandCategory::NoDraw,
    ];

    pub fn table_index(self) -> usize {
        match self {
            DrawHandCategory::TwoCardFlushDraw => 0,
            DrawHandCategory::NutFlushDraw => 1,
            DrawHandCategory::OpenEndedStraightDraw => 2,
            DrawHandCategory::NoDraw => 3,
        }
    }

    pub fn category_count() -> usize {
        DrawHandCategory::ALL.len()
    }
}

/// Categories a combo has to hit (any of them) to stay in a range
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeFilter {
    pub made_hands: Vec<MadeHandCategory>,
    pub draw_hands: Vec<DrawHandCategory>,
}

impl RangeFilter {
    /// true if the hand makes or draws to a listed category on board
    pub fn matches(&self, hand: &Hand, board: &Board) -> Result<bool, EvalError> {
        if self.made_hands.contains(&get_made_hand_category(hand, board)?) {
            return Ok(true);
        }
        Ok(self.draw_hands.contains(&get_draw_hand_category(hand, board)))
    }
}

impl HandRange {
    /// Remove combos blocked by the board, then those the filter rejects
    ///
    /// # Example
    ///
    /// ```
    /// use holdem_core::board::Board;
    /// use holdem_core::hand_range::HandRange;
    /// use holdem_core::range_filter::{MadeHandCategory, RangeFilter};
    /// let mut range = HandRange::parse("22+").unwrap();
    /// let board: Board = "AsTh4c".parse().unwrap();
    /// let filter = RangeFilter {
    ///     made_hands: vec![MadeHandCategory::ThreeOfAKind],
    ///     draw_hands: vec![],
    /// };
    /// range.apply_filter(&board, &filter).unwrap();
    /// assert_eq!(range.len(), 9);
    /// ```
    pub fn apply_filter(&mut self, board: &Board, filter: &RangeFilter) -> Result<(), EvalError> {
        self.remove_blocked(board);
        let before = self.len();
        let mut keep = Vec::with_capacity(before);
        for hand in self.iter() {
            keep.push(filter.matches(hand, board)?);
        }
        let mut keep = keep.into_iter();
        self.retain(|_| keep.next().unwrap_or(false));
        debug!("filter kept {} of {} combos on {}", self.len(), before, board);
        Ok(())
    }
}

/// Contains tables representing how a hand range interacts with a board
/// Breaks hand range combo array into two tables of combos with each index representing a hand class
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CategoryBreakdown {
    board: Board,
    made_hand_table: Vec<Vec<String>>,
    draw_hand_table: Vec<Vec<String>>,
}

impl CategoryBreakdown {
    /// Tables the unblocked combos of a range by category
    pub fn from_range_and_board(hand_range: &HandRange, board: &Board) -> Result<Self, EvalError> {
        let mut made_hand_table = vec![Vec::new(); MadeHandCategory::category_count()];
        let mut draw_hand_table = vec![Vec::new(); DrawHandCategory::category_count()];
        for hand in hand_range.without_blocked(board).iter() {
            made_hand_table[get_made_hand_category(hand, board)?.table_index()]
                .push(hand.to_string());
            draw_hand_table[get_draw_hand_category(hand, board).table_index()]
                .push(hand.to_string());
        }
        Ok(CategoryBreakdown {
            board: *board,
            made_hand_table,
            draw_hand_table,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// combos making a category, as text
    pub fn made_hands(&self, category: MadeHandCategory) -> &[String] {
        &self.made_hand_table[category.table_index()]
    }

    /// combos drawing to a category, as text
    pub fn draw_hands(&self, category: DrawHandCategory) -> &[String] {
        &self.draw_hand_table[category.table_index()]
    }
}

/// Made hand of hole cards on a board of at least three cards
pub fn get_made_hand_category(hand: &Hand, board: &Board) -> Result<MadeHandCategory, EvalError> {
    let result = evaluate_hole(&hand.cards(), board.cards())?;
    Ok(MadeHandCategory::from(result.category()))
}

/// Strongest draw of hole cards on a board
pub fn get_draw_hand_category(hand: &Hand, board: &Board) -> DrawHandCategory {
    let hole = EvalHand::from_card_set(hand.card_set());
    let community = EvalHand::from_card_set(board.card_set());
    let combined = EvalHand::from_card_set(hand.card_set() | board.card_set());
    // detect two card flush draw
    for &suit in Suit::ALL.iter() {
        if community.suit_count(suit) == 2 && hole.suit_count(suit) == 2 {
            return DrawHandCategory::TwoCardFlushDraw;
        }
    }
    // detect ace high flush draw
    for &suit in Suit::ALL.iter() {
        if combined.suit_count(suit) == 4 && combined.has_ace_of_suit(suit) {
            return DrawHandCategory::NutFlushDraw;
        }
    }
    // four in a row with a free rank on both ends, 2345 up to TJQK
    let rank_mask = combined.rank_mask();
    for i in 0..9 {
        let run = 0b1111u16 << i;
        if rank_mask & run == run {
            return DrawHandCategory::OpenEndedStraightDraw;
        }
    }

    DrawHandCategory::NoDraw
}

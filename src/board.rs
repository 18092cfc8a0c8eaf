use std::convert::TryFrom;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::card::{Card, CardError, Rank, Suit};
use crate::card_set::CardSet;
use crate::constants::*;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("board already holds {} cards", MAX_BOARD_CARDS)]
    Full,
    #[error("card {0} is already on the board")]
    DuplicateCard(Card),
    #[error("board needs at least {} cards, got {0}", MIN_BOARD_CARDS)]
    TooFewCards(usize),
    #[error("incomplete card \"{0}\" at end of board")]
    TrailingCharacter(String),
    #[error("invalid board card \"{token}\": {source}")]
    Card {
        token: String,
        #[source]
        source: CardError,
    },
}

/// The community cards
///
/// Cards keep their deal order, the card set is updated on every
/// insertion. Two boards holding the same cards are equal and hash alike
/// whatever order they were dealt in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Board {
    cards: [Card; MAX_BOARD_CARDS],
    len: u8,
    card_set: CardSet,
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Board {
    /// Creates an empty board
    pub const fn new() -> Self {
        Board {
            cards: [Card::new(Rank::Two, Suit::Clubs); MAX_BOARD_CARDS],
            len: 0,
            card_set: CardSet::new(),
        }
    }

    /// Deal one more card onto the board
    pub fn add(&mut self, card: Card) -> Result<(), BoardError> {
        if self.len() >= MAX_BOARD_CARDS {
            return Err(BoardError::Full);
        }
        if self.card_set.contains(card) {
            return Err(BoardError::DuplicateCard(card));
        }
        self.cards[self.len()] = card;
        self.len += 1;
        self.card_set.add(card);
        Ok(())
    }

    /// Copy of this board with one more card, e.g. flop -> turn
    pub fn with_card(&self, card: Card) -> Result<Board, BoardError> {
        let mut board = *self;
        board.add(card)?;
        Ok(board)
    }

    /// Cards in deal order
    pub fn cards(&self) -> &[Card] {
        &self.cards[..self.len()]
    }

    pub fn card_set(&self) -> CardSet {
        self.card_set
    }

    pub fn len(&self) -> usize {
        usize::from(self.len)
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_flop(&self) -> bool {
        self.len == 3
    }

    pub fn is_turn(&self) -> bool {
        self.len == 4
    }

    pub fn is_river(&self) -> bool {
        self.len == 5
    }

    /// true if any card of `cards` is on the board
    pub fn overlaps<T: Into<CardSet>>(&self, cards: T) -> bool {
        self.card_set.overlaps(cards.into())
    }

    /// Order independent key for caching per board results
    ///
    /// Each card is spread with a multiplicative hash and the results are
    /// xored, the card count goes in the top byte.
    pub fn cache_key(&self) -> u64 {
        let key = self
            .card_set
            .iter()
            .map(|c| u64::from(c.index()).wrapping_mul(0x9E37_79B9_7F4A_7C15))
            .fold(0u64, |a, b| a ^ b);
        key ^ (u64::from(self.len) << 56)
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.card_set == other.card_set
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.card_set.hash(state);
    }
}

impl From<&Board> for CardSet {
    fn from(board: &Board) -> Self {
        board.card_set
    }
}

impl From<Board> for CardSet {
    fn from(board: Board) -> Self {
        board.card_set
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in self.cards() {
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parse a board like "AhKsQd", "Ah Ks Qd" or "Ah,Ks,Qd"
    ///
    /// # Example
    ///
    /// ```
    /// use holdem_core::board::Board;
    /// let flop: Board = "Ah Kd Qc".parse().unwrap();
    /// let same: Board = "QcAhKd".parse().unwrap();
    /// assert_eq!(flop, same);
    /// assert!(flop.is_flop());
    /// ```
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let board = parse_cards(text)?;
        if board.len() < MIN_BOARD_CARDS {
            return Err(BoardError::TooFewCards(board.len()));
        }
        Ok(board)
    }
}

/// Reads up to five cards with no lower bound, so the serde text form
/// also covers preflop and partial boards
fn parse_cards(text: &str) -> Result<Board, BoardError> {
    let chars: Vec<char> = text.chars().collect();
    let mut board = Board::new();
    let mut i = 0;
    while i < chars.len() {
        if chars[i].is_whitespace() || chars[i] == ',' {
            i += 1;
            continue;
        }
        if i + 1 >= chars.len() {
            return Err(BoardError::TrailingCharacter(chars[i].to_string()));
        }
        let card = Card::from_chars(chars[i], chars[i + 1]).map_err(|source| BoardError::Card {
            token: chars[i..i + 2].iter().collect(),
            source,
        })?;
        board.add(card)?;
        i += 2;
    }
    Ok(board)
}

impl TryFrom<String> for Board {
    type Error = BoardError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        parse_cards(&s)
    }
}

impl From<Board> for String {
    fn from(board: Board) -> String {
        board.to_string()
    }
}

//! # Holdem Core
//! Texas holdem cards, boards and weighted ranges
//!
//! Currently supports
//!  - range parsing with weights and board blockers
//!  - five to seven card hand evaluation
//!  - integer hand rankings for fast comparison
//!
//! ## Hand Ranges
//!
//! ```
//! use holdem_core::board::Board;
//! use holdem_core::hand_range::HandRange;
//! let mut range = HandRange::parse("QQ+,AKs:0.5").unwrap();
//! let board: Board = "Ah Kd Qc".parse().unwrap();
//! range.remove_blocked(&board);
//! let reach = range.initial_reach_probs(&board);
//! assert_eq!(reach.len(), range.len());
//! ```
//!
//! ## Hand Evaluator
//!
//! ```
//! use holdem_core::board::Board;
//! use holdem_core::hand_ranking::{compare, evaluate};
//! let board: Board = "Ah Kd Qc 7s 2d".parse().unwrap();
//! let aces = evaluate("As".parse().unwrap(), "Ac".parse().unwrap(), &board).unwrap();
//! let kings = evaluate("Ks".parse().unwrap(), "Kc".parse().unwrap(), &board).unwrap();
//! assert_eq!(compare(aces, kings), 1);
//! ```

#[macro_use]
extern crate lazy_static;

pub mod board;
pub mod card;
pub mod card_set;
pub mod constants;
pub mod hand;
pub mod hand_evaluator;
pub mod hand_range;
pub mod hand_ranking;
pub mod range_filter;

pub use board::{Board, BoardError};
pub use card::{Card, CardError, Rank, Suit};
pub use card_set::CardSet;
pub use hand::{Hand, HandError};
pub use hand_evaluator::{EvalError, HandCategory, HandResult, Showdown};
pub use hand_range::{DuplicatePolicy, HandRange, RangeConfig, RangeError};

mod evaluator;
mod hand;
mod hand_result;

use thiserror::Error;

use crate::card::Card;
use crate::constants::MIN_EVAL_CARDS;

pub use evaluator::{compare, evaluate, evaluate_hole};
pub(crate) use hand::EvalHand;
pub use hand_result::{HandCategory, HandResult, Showdown};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("need at least {} cards to evaluate, got {0}", MIN_EVAL_CARDS)]
    NotEnoughCards(usize),
    #[error("card {0} appears twice")]
    DuplicateCard(Card),
}

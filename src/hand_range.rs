/*
 * Creates weighted hand ranges from string
 *
 * A range is written as comma separated terms, each one optionally
 * followed by ':' and a weight in (0, 1]
 *
 *   AA, AKs, AKo, AK        pair, suited, offsuit and any class
 *   QQ-TT, AKs-ATs          inclusive intervals
 *   TT+, ATs+               everything above, up to AA or AKs
 *   AsKh                    a single explicit combo
 *   random, any             all 1326 combos
 */

use std::collections::HashMap;
use std::convert::TryFrom;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::Board;
use crate::card::{char_to_rank, char_to_suit, Card, Rank, Suit};
use crate::hand::Hand;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RangeError {
    #[error("invalid range term \"{term}\": {reason}")]
    InvalidTerm { term: String, reason: String },
    #[error("invalid weight \"{weight}\" in range term \"{term}\"")]
    InvalidWeight { term: String, weight: String },
    #[error("range term \"{term}\" repeats combo {combo}")]
    DuplicateCombo { term: String, combo: Hand },
}

fn invalid_term<R: Into<String>>(term: &str, reason: R) -> RangeError {
    RangeError::InvalidTerm {
        term: term.to_string(),
        reason: reason.into(),
    }
}

/// What to do when two terms of one range produce the same combo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// fail with `RangeError::DuplicateCombo`
    Reject,
    /// keep every occurrence
    Keep,
    /// keep the first occurrence and its weight
    KeepFirst,
    /// keep the first position with the larger weight
    Max,
    /// keep the first position with the summed weight, capped at 1
    Sum,
}

impl Default for DuplicatePolicy {
    fn default() -> Self {
        DuplicatePolicy::Reject
    }
}

/// Parser options
///
/// # Example
///
/// ```
/// use holdem_core::hand_range::{DuplicatePolicy, HandRange, RangeConfig};
/// let config: RangeConfig = serde_json::from_str(r#"{"duplicates": "max"}"#).unwrap();
/// assert_eq!(config.duplicates, DuplicatePolicy::Max);
/// let range = HandRange::parse_with("AA:0.5,AsAh", &config).unwrap();
/// assert_eq!(range.len(), 6);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeConfig {
    pub duplicates: DuplicatePolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Suitedness {
    Any,
    Suited,
    Offsuit,
}

impl Suitedness {
    fn allows(self, suited: bool) -> bool {
        match self {
            Suitedness::Any => true,
            Suitedness::Suited => suited,
            Suitedness::Offsuit => !suited,
        }
    }
}

/// A hand class like "AKs", ranks normalised so high >= low
#[derive(Debug, Clone, Copy)]
struct HandClass {
    high: Rank,
    low: Rank,
    suitedness: Suitedness,
}

impl HandClass {
    fn is_pair(&self) -> bool {
        self.high == self.low
    }
}

/// A range of private player hands for texas holdem
///
/// Hands keep the order the parser produced them in, so per hand data
/// like reach probabilities can be stored in parallel vectors. The text
/// form read by serde keeps repeated combos, so any listing written by
/// `Display` reads back unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HandRange {
    hands: Vec<Hand>,
}

impl HandRange {
    /// Creates an empty range of hands
    pub fn new() -> Self {
        HandRange { hands: Vec::new() }
    }

    /// Every possible combo at full weight
    pub fn all() -> Self {
        HandRange {
            hands: Hand::all().collect(),
        }
    }

    /// Parse a range with the default (strict) options
    ///
    /// # Example
    ///
    /// ```
    /// use holdem_core::hand_range::HandRange;
    /// let range = HandRange::parse("QQ-TT, AKs-ATs:0.5").unwrap();
    /// assert_eq!(range.len(), 34);
    /// ```
    pub fn parse(text: &str) -> Result<Self, RangeError> {
        HandRange::parse_with(text, &RangeConfig::default())
    }

    /// Parse a range
    ///
    /// # Arguments
    ///
    /// * `text` - comma separated range terms
    /// * `config` - parser options
    pub fn parse_with(text: &str, config: &RangeConfig) -> Result<Self, RangeError> {
        let mut range = HandRange::new();
        let mut positions: HashMap<Hand, usize> = HashMap::new();

        for term in text.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let (body, weight) = split_weight(term)?;
            let combos = expand_term(term, body)?;
            debug!("range term \"{}\" expands to {} combos", term, combos.len());
            range.reserve(combos.len());
            for (c1, c2) in combos {
                let hand =
                    Hand::weighted(c1, c2, weight).map_err(|e| invalid_term(term, e.to_string()))?;
                range.insert(hand, term, config.duplicates, &mut positions)?;
            }
        }

        Ok(range)
    }

    fn insert(
        &mut self,
        hand: Hand,
        term: &str,
        policy: DuplicatePolicy,
        positions: &mut HashMap<Hand, usize>,
    ) -> Result<(), RangeError> {
        let pos = match positions.get(&hand).copied() {
            Some(pos) => pos,
            None => {
                positions.insert(hand, self.hands.len());
                self.hands.push(hand);
                return Ok(());
            }
        };
        let first = self.hands[pos];
        let weight = match policy {
            DuplicatePolicy::Reject => {
                return Err(RangeError::DuplicateCombo {
                    term: term.to_string(),
                    combo: hand,
                });
            }
            DuplicatePolicy::Keep => {
                warn!("range term \"{}\" repeats {}, keeping both", term, hand);
                self.hands.push(hand);
                return Ok(());
            }
            DuplicatePolicy::KeepFirst => {
                warn!("range term \"{}\" repeats {}, ignored", term, hand);
                return Ok(());
            }
            DuplicatePolicy::Max => first.weight().max(hand.weight()),
            DuplicatePolicy::Sum => (first.weight() + hand.weight()).min(1.0),
        };
        warn!(
            "range term \"{}\" repeats {}, merged weight {}",
            term, hand, weight
        );
        self.hands[pos] = first
            .with_weight(weight)
            .map_err(|e| invalid_term(term, e.to_string()))?;
        Ok(())
    }

    /// Hands in parse order
    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    pub fn len(&self) -> usize {
        self.hands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    /// Append a hand, no duplicate check is done
    pub fn add(&mut self, hand: Hand) {
        self.hands.push(hand);
    }

    pub fn clear(&mut self) {
        self.hands.clear();
    }

    pub fn reserve(&mut self, additional: usize) {
        self.hands.reserve(additional);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Hand> {
        self.hands.iter()
    }

    /// Keep only the hands `f` returns true for, order is preserved
    pub fn retain<F: FnMut(&Hand) -> bool>(&mut self, f: F) {
        self.hands.retain(f);
    }

    /// remove combos that conflict with board
    pub fn remove_blocked(&mut self, board: &Board) {
        let before = self.hands.len();
        self.hands.retain(|h| !h.overlaps(board));
        trace!(
            "removed {} blocked combos on {}",
            before - self.hands.len(),
            board
        );
    }

    /// copy of this range without the combos that conflict with board
    pub fn without_blocked(&self, board: &Board) -> HandRange {
        let mut range = self.clone();
        range.remove_blocked(board);
        range
    }

    /// Starting reach probability of every hand, in the order of `hands()`
    ///
    /// A hand blocked by the board gets 0.
    ///
    /// # Example
    ///
    /// ```
    /// use holdem_core::board::Board;
    /// use holdem_core::hand_range::HandRange;
    /// let range = HandRange::parse("AA:0.5").unwrap();
    /// let board: Board = "AhKdQc".parse().unwrap();
    /// let probs = range.initial_reach_probs(&board);
    /// assert_eq!(probs.len(), 6);
    /// assert_eq!(probs.iter().filter(|p| **p == 0.5).count(), 3);
    /// ```
    pub fn initial_reach_probs(&self, board: &Board) -> Vec<f32> {
        self.hands
            .iter()
            .map(|h| if h.overlaps(board) { 0.0 } else { h.weight() })
            .collect()
    }

    /// Sum of all combo weights
    pub fn total_weight(&self) -> f32 {
        self.hands.iter().map(Hand::weight).sum()
    }
}

/// Splits "body:weight" and checks the weight
fn split_weight(term: &str) -> Result<(&str, f32), RangeError> {
    let (body, weight_text) = match term.find(':') {
        Some(pos) => (term[..pos].trim(), term[pos + 1..].trim()),
        None => return Ok((term, 1.0)),
    };
    let bad_weight = || RangeError::InvalidWeight {
        term: term.to_string(),
        weight: weight_text.to_string(),
    };
    let weight = weight_text.parse::<f32>().map_err(|_| bad_weight())?;
    if !weight.is_finite() || weight <= 0.0 || weight > 1.0 {
        return Err(bad_weight());
    }
    Ok((body, weight))
}

/// Expands one term (without weight) into card pairs
fn expand_term(term: &str, body: &str) -> Result<Vec<(Card, Card)>, RangeError> {
    let mut combos = Vec::new();

    if body.eq_ignore_ascii_case("random") || body.eq_ignore_ascii_case("any") {
        combos.extend(Hand::all().map(|h| (h.high(), h.low())));
        return Ok(combos);
    }

    if let Some(pos) = body.find('-') {
        let start = parse_class(term, body[..pos].trim())?;
        let end = parse_class(term, body[pos + 1..].trim())?;
        push_interval(&mut combos, term, start, end)?;
    } else if let Some(class_text) = body.strip_suffix('+') {
        let class = parse_class(term, class_text)?;
        push_plus(&mut combos, class);
    } else if let Some((c1, c2)) = parse_explicit(term, body)? {
        combos.push((c1, c2));
    } else {
        let class = parse_class(term, body)?;
        push_class(&mut combos, class.high, class.low, class.suitedness);
    }

    Ok(combos)
}

/// Reads "AsKh", None if the text is not shaped like a combo
fn parse_explicit(term: &str, text: &str) -> Result<Option<(Card, Card)>, RangeError> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() != 4 || char_to_suit(chars[1]).is_none() {
        return Ok(None);
    }
    let c1 = Card::from_chars(chars[0], chars[1]).map_err(|e| invalid_term(term, e.to_string()))?;
    let c2 = Card::from_chars(chars[2], chars[3]).map_err(|e| invalid_term(term, e.to_string()))?;
    if c1 == c2 {
        return Err(invalid_term(term, format!("{} is used twice", c1)));
    }
    Ok(Some((c1, c2)))
}

fn parse_class(term: &str, text: &str) -> Result<HandClass, RangeError> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() != 2 && chars.len() != 3 {
        return Err(invalid_term(term, format!("\"{}\" is not a hand class", text)));
    }
    let rank = |c: char| char_to_rank(c).ok_or_else(|| invalid_term(term, format!("invalid rank '{}'", c)));
    let r1 = rank(chars[0])?;
    let r2 = rank(chars[1])?;
    let suitedness = match chars.get(2).map(char::to_ascii_lowercase) {
        None => Suitedness::Any,
        Some('s') => Suitedness::Suited,
        Some('o') => Suitedness::Offsuit,
        Some(c) => return Err(invalid_term(term, format!("invalid suffix '{}'", c))),
    };
    if r1 == r2 && suitedness != Suitedness::Any {
        return Err(invalid_term(term, "a pair cannot be suited or offsuit"));
    }
    let (high, low) = if r1 >= r2 { (r1, r2) } else { (r2, r1) };
    Ok(HandClass {
        high,
        low,
        suitedness,
    })
}

/// QQ-TT or AKs-ATs, in either direction
fn push_interval(
    combos: &mut Vec<(Card, Card)>,
    term: &str,
    start: HandClass,
    end: HandClass,
) -> Result<(), RangeError> {
    if start.is_pair() != end.is_pair() {
        return Err(invalid_term(term, "cannot mix a pair with a non pair"));
    }
    if start.is_pair() {
        for rank in ranks_between(start.high, end.high) {
            push_class(combos, rank, rank, Suitedness::Any);
        }
        return Ok(());
    }
    if start.high != end.high {
        return Err(invalid_term(term, "both ends must share the top rank"));
    }
    if end.suitedness != Suitedness::Any && end.suitedness != start.suitedness {
        return Err(invalid_term(term, "end suffix does not match the start"));
    }
    for rank in ranks_between(start.low, end.low) {
        push_class(combos, start.high, rank, start.suitedness);
    }
    Ok(())
}

/// TT+ runs up to AA, ATs+ runs up to AKs
fn push_plus(combos: &mut Vec<(Card, Card)>, class: HandClass) {
    if class.is_pair() {
        for rank in ranks_between(class.high, Rank::Ace) {
            push_class(combos, rank, rank, Suitedness::Any);
        }
    } else {
        for &rank in &Rank::ALL[usize::from(class.low.index())..usize::from(class.high.index())] {
            push_class(combos, class.high, rank, class.suitedness);
        }
    }
}

/// Inclusive rank interval, endpoints in any order
fn ranks_between(a: Rank, b: Rank) -> impl Iterator<Item = Rank> {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    (lo.index()..=hi.index()).filter_map(Rank::from_index)
}

/// add pair, suited and/or offsuit combos of two ranks
fn push_class(combos: &mut Vec<(Card, Card)>, high: Rank, low: Rank, suitedness: Suitedness) {
    for (i, &s1) in Suit::ALL.iter().enumerate() {
        if high == low {
            // each unordered suit pair once
            for &s2 in &Suit::ALL[i + 1..] {
                combos.push((Card::new(high, s1), Card::new(low, s2)));
            }
        } else {
            for &s2 in Suit::ALL.iter() {
                if suitedness.allows(s1 == s2) {
                    combos.push((Card::new(high, s1), Card::new(low, s2)));
                }
            }
        }
    }
}

impl FromStr for HandRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HandRange::parse(s)
    }
}

impl TryFrom<String> for HandRange {
    type Error = RangeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let config = RangeConfig {
            duplicates: DuplicatePolicy::Keep,
        };
        HandRange::parse_with(&s, &config)
    }
}

impl From<HandRange> for String {
    fn from(range: HandRange) -> String {
        range.to_string()
    }
}

impl fmt::Display for HandRange {
    /// Lists every combo, e.g. "AhAd:0.5,AcAd"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, hand) in self.hands.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", hand)?;
            if hand.weight() < 1.0 {
                write!(f, ":{}", hand.weight())?;
            }
        }
        Ok(())
    }
}

impl Index<usize> for HandRange {
    type Output = Hand;

    fn index(&self, index: usize) -> &Hand {
        &self.hands[index]
    }
}

impl<'a> IntoIterator for &'a HandRange {
    type Item = &'a Hand;
    type IntoIter = std::slice::Iter<'a, Hand>;

    fn into_iter(self) -> Self::IntoIter {
        self.hands.iter()
    }
}

impl IntoIterator for HandRange {
    type Item = Hand;
    type IntoIter = std::vec::IntoIter<Hand>;

    fn into_iter(self) -> Self::IntoIter {
        self.hands.into_iter()
    }
}

/// Number of cards in standard deck
pub const CARD_COUNT: u8 = 52;

/// Number of ranks in a sandard deck
/// (2 -> A)
pub const RANK_COUNT: u8 = 13;

/// Number of suits in a standard deck
pub const SUIT_COUNT: u8 = 4;

/// Number of distinct two card starting hands
pub const COMBO_COUNT: usize = 1326;

/// u8 rank to char table
pub const RANK_TO_CHAR: &[char; 13] = &[
    '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A',
];

/// u8 suit to char table
pub static SUIT_TO_CHAR: &[char; 4] = &['c', 'd', 'h', 's'];

/// Mask of the 52 valid card bits in a card set
pub const CARD_MASK: u64 = (1u64 << CARD_COUNT) - 1;

/// Board sizes
pub const MIN_BOARD_CARDS: usize = 3;
pub const MAX_BOARD_CARDS: usize = 5;

/// Cards needed for a ranking
pub const MIN_EVAL_CARDS: usize = 5;

/// shift the encoded hand category sits at
pub const HAND_CATEGORY_SHIFT: u8 = 20;

/// width of one tiebreaker slot in an encoded ranking
pub const TIEBREAKER_BITS: u8 = 4;

/// tiebreaker slots in an encoded ranking
pub const TIEBREAKER_SLOTS: usize = 5;

use crate::cards::{parse_cards, parse_tokens, Card, CardParseError};
use std::collections::HashSet;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error(transparent)]
    InvalidCard(#[from] CardParseError),
    #[error("duplicate card: {0}")]
    DuplicateCard(Card),
    #[error("at least 5 cards are required, got {0}")]
    InsufficientCards(usize),
    #[error("too many cards for {what}: got {given}, at most {max} allowed")]
    TooManyCards { what: &'static str, given: usize, max: usize },
}

/// Check that no card appears twice across all the given groups.
///
/// ```
/// use poker_equity::cards::parse_cards;
/// use poker_equity::hand::{ensure_distinct, HandError};
///
/// let a = parse_cards("AH KH").unwrap();
/// let b = parse_cards("QS AH").unwrap();
/// assert!(matches!(ensure_distinct(&[&a, &b]), Err(HandError::DuplicateCard(_))));
/// ```
pub fn ensure_distinct(groups: &[&[Card]]) -> Result<(), HandError> {
    let mut seen = HashSet::with_capacity(groups.iter().map(|g| g.len()).sum());
    for &card in groups.iter().flat_map(|g| g.iter()) {
        if !seen.insert(card) {
            return Err(HandError::DuplicateCard(card));
        }
    }
    Ok(())
}

/// Five to seven distinct cards, ready for evaluation.
///
/// ```
/// use poker_equity::hand::Hand;
///
/// let hand: Hand = "AH KH QH JH 10H 2C".parse().unwrap();
/// assert_eq!(hand.len(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub const MIN: usize = 5;
    pub const MAX: usize = 7;

    pub fn try_new(cards: Vec<Card>) -> Result<Self, HandError> {
        ensure_distinct(&[&cards])?;
        if cards.len() < Self::MIN {
            return Err(HandError::InsufficientCards(cards.len()));
        }
        if cards.len() > Self::MAX {
            return Err(HandError::TooManyCards { what: "a hand", given: cards.len(), max: Self::MAX });
        }
        Ok(Self { cards })
    }

    /// Parse one card per token, then validate.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self, HandError> {
        Self::try_new(parse_tokens(tokens)?)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }
}

impl FromStr for Hand {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_new(parse_cards(s)?)
    }
}

/// A player's known private cards. May be partial: unknown cards are dealt by the simulator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoleCards {
    cards: Vec<Card>,
}

impl HoleCards {
    /// Validates uniqueness and the per-player limit `max`.
    pub fn try_new(cards: Vec<Card>, max: usize) -> Result<Self, HandError> {
        ensure_distinct(&[&cards])?;
        if cards.len() > max {
            return Err(HandError::TooManyCards { what: "a player", given: cards.len(), max });
        }
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }
}

/// Community cards on the board (flop, turn, river).
///
/// ```
/// use poker_equity::cards::{Card, Rank, Suit};
/// use poker_equity::hand::Board;
///
/// let board = Board::try_new(vec![
///     Card::new(Rank::Two, Suit::Clubs),
///     Card::new(Rank::Three, Suit::Clubs),
///     Card::new(Rank::Four, Suit::Clubs),
/// ]).unwrap();
/// assert_eq!(board.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub const MAX: usize = 5;

    pub fn try_new(cards: Vec<Card>) -> Result<Self, HandError> {
        if cards.len() > Self::MAX {
            return Err(HandError::TooManyCards { what: "the board", given: cards.len(), max: Self::MAX });
        }
        ensure_distinct(&[&cards])?;
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }
}

impl FromStr for Board {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_new(parse_cards(s)?)
    }
}

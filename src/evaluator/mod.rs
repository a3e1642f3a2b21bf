//! Best-of-five hand evaluation for 5 to 7 cards.
//!
//! Every 5-card subset is analysed once, matched against the category detectors in
//! priority order and packed into a [`HandValue`]; the largest value wins.

pub(crate) mod detector;
pub(crate) mod hand_analysis;

use crate::cards::{Card, Rank};
use crate::combinations::Combinations;
use crate::hand::{Hand, HandError};
use core::cmp::Ordering;
use std::fmt;

/// Compact, comparable hand strength. Higher is better.
/// Encodes category and ranked tiebreakers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandValue(u64);

/// Poker hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum HandCategory {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandCategory {
    pub const COUNT: usize = 9;

    /// All categories from weakest to strongest; `ALL[c.ordinal()] == c`.
    pub const ALL: [HandCategory; Self::COUNT] = [
        HandCategory::HighCard,
        HandCategory::Pair,
        HandCategory::TwoPair,
        HandCategory::ThreeOfAKind,
        HandCategory::Straight,
        HandCategory::Flush,
        HandCategory::FullHouse,
        HandCategory::FourOfAKind,
        HandCategory::StraightFlush,
    ];

    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::Pair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl HandValue {
    /// Return the packed comparable value.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Pack a category and five rank tiebreakers into a comparable value.
    pub fn from_parts(category: HandCategory, ranks: &[Rank; 5]) -> Self {
        // Layout (most significant -> least):
        // [ category (8 bits) | r0 (6) | r1 (6) | r2 (6) | r3 (6) | r4 (6) | 10 zero bits ]
        const CAT_SHIFT: u32 = 48;
        const RANK_STRIDE: u32 = 6;
        let mut v: u64 = (category as u64) << CAT_SHIFT;
        for (i, r) in ranks.iter().enumerate() {
            let offset = CAT_SHIFT - RANK_STRIDE * (i as u32 + 1);
            v |= (*r as u64) << offset;
        }
        HandValue(v)
    }
}

/// The best five cards of a hand, its category and tie-break key. `value` drives ordering.
#[derive(Debug, Clone, Copy)]
pub struct EvaluatedHand {
    pub category: HandCategory,
    /// Ordered by contribution: e.g. pair, then kickers high to low; the wheel as 5-4-3-2-A.
    pub best_five: [Card; 5],
    tiebreak: [Rank; 5],
    value: HandValue,
}

impl Ord for EvaluatedHand {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialOrd for EvaluatedHand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for EvaluatedHand {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for EvaluatedHand {}

impl EvaluatedHand {
    /// Return the packed comparable value for ordering/caching.
    pub const fn value(&self) -> HandValue {
        self.value
    }

    /// Fixed-length tie-break key, compared lexicographically within a category.
    pub const fn tiebreak(&self) -> [Rank; 5] {
        self.tiebreak
    }

    /// Ranks of the best five cards in contribution order.
    pub fn ranks(&self) -> [Rank; 5] {
        self.best_five.map(|c| c.rank())
    }

    /// Display name: "Royal Flush" for an ace-high straight flush, "A-High" style for
    /// high card hands, the category name otherwise.
    ///
    /// ```
    /// use poker_equity::evaluator::evaluate;
    /// use poker_equity::cards::parse_cards;
    ///
    /// let royal = evaluate(&parse_cards("AH KH QH JH 10H").unwrap()).unwrap();
    /// assert_eq!(royal.name(), "Royal Flush");
    /// let nothing = evaluate(&parse_cards("KH 9D 7S 4C 2H").unwrap()).unwrap();
    /// assert_eq!(nothing.name(), "K-High");
    /// ```
    pub fn name(&self) -> String {
        match self.category {
            HandCategory::StraightFlush if self.tiebreak[0] == Rank::Ace => "Royal Flush".to_string(),
            HandCategory::HighCard => format!("{}-High", self.tiebreak[0]),
            category => category.name().to_string(),
        }
    }
}

/// Evaluate exactly five cards; detects category and encodes tie-breakers.
pub fn evaluate_five(cards: &[Card; 5]) -> EvaluatedHand {
    use detector::DETECTORS;
    use hand_analysis::HandAnalysis;

    let analysis = HandAnalysis::new(cards);

    for detector in DETECTORS.iter() {
        if let Some(tiebreak) = detector.detect(&analysis) {
            let category = detector.category();
            let value = HandValue::from_parts(category, &tiebreak);
            return EvaluatedHand { category, best_five: analysis.cards, tiebreak, value };
        }
    }

    unreachable!("HighCard detector should always match")
}

/// Best hand over every 5-card subset of `cards`; `None` when fewer than five cards.
///
/// Does not check for duplicates, see [`evaluate`] for the validating entry point.
pub fn best_of(cards: &[Card]) -> Option<EvaluatedHand> {
    Combinations::new(cards.len(), 5)
        .map(|ix| evaluate_five(&[cards[ix[0]], cards[ix[1]], cards[ix[2]], cards[ix[3]], cards[ix[4]]]))
        .max()
}

/// Evaluate a validated hand of five to seven cards.
pub fn evaluate_hand(hand: &Hand) -> EvaluatedHand {
    best_of(hand.as_slice()).unwrap_or_else(|| unreachable!("a Hand holds at least five cards"))
}

/// Validate 5 to 7 distinct cards and return the best five-card evaluation.
///
/// ```
/// use poker_equity::cards::parse_cards;
/// use poker_equity::evaluator::{evaluate, HandCategory};
/// use poker_equity::hand::HandError;
///
/// let eval = evaluate(&parse_cards("AS AH QC JD 9H 3S 2C").unwrap()).unwrap();
/// assert_eq!(eval.category, HandCategory::Pair);
///
/// let short = evaluate(&parse_cards("AS AH QC").unwrap());
/// assert_eq!(short.unwrap_err(), HandError::InsufficientCards(3));
/// ```
pub fn evaluate(cards: &[Card]) -> Result<EvaluatedHand, HandError> {
    Ok(evaluate_hand(&Hand::try_new(cards.to_vec())?))
}

/// Evaluate seven cards, the Hold'em shape: the best of all 21 five-card subsets.
pub fn evaluate_seven(cards: &[Card; 7]) -> EvaluatedHand {
    best_of(cards).unwrap_or_else(|| unreachable!("seven cards hold 21 subsets"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_cards, Suit};

    fn five(s: &str) -> EvaluatedHand {
        let c = parse_cards(s).unwrap();
        evaluate_five(&[c[0], c[1], c[2], c[3], c[4]])
    }

    #[test]
    fn all_is_indexed_by_ordinal() {
        for (i, c) in HandCategory::ALL.iter().enumerate() {
            assert_eq!(c.ordinal() as usize, i);
        }
        assert!(HandCategory::ALL.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn evaluate_five_categories() {
        let cases = [
            ("AS KS QS JS 10S", HandCategory::StraightFlush),
            ("KC KD KH KS 2S", HandCategory::FourOfAKind),
            ("10C 10D 10H 2S 2H", HandCategory::FullHouse),
            ("AH 9H 7H 3H 2H", HandCategory::Flush),
            ("AC 2D 3H 4S 5C", HandCategory::Straight),
            ("QC QD QH 9S 2C", HandCategory::ThreeOfAKind),
            ("JC JD 9C 9H 2S", HandCategory::TwoPair),
            ("AH AD 10S 9C 2D", HandCategory::Pair),
            ("AH KD 7S 5C 2D", HandCategory::HighCard),
        ];
        for (hand, cat) in cases {
            assert_eq!(five(hand).category, cat, "{hand}");
        }
    }

    #[test]
    fn names() {
        assert_eq!(five("AS KS QS JS 10S").name(), "Royal Flush");
        assert_eq!(five("9S KS QS JS 10S").name(), "Straight Flush");
        assert_eq!(five("AH KD 7S 5C 2D").name(), "A-High");
        assert_eq!(five("10H 8D 7S 5C 2D").name(), "10-High");
        assert_eq!(five("JC JD 9C 9H 2S").name(), "Two Pair");
    }

    #[test]
    fn kickers_break_ties_within_category() {
        assert!(five("AH AD KS 9C 2D") > five("AC AS QS JC 10D"));
        assert!(five("JC JD 9C 9H 3S") > five("JH JS 9D 9S 2S"));
        assert_eq!(five("JC JD 9C 9H 3S"), five("JH JS 9D 9S 3H"));
        assert!(five("2C 2D 2H 3S 3H") > five("AC AD KH KS QH"));
    }

    #[test]
    fn wheel_sits_between_trips_and_six_high_straight() {
        let wheel = five("AC 2D 3H 4S 5C");
        assert!(wheel > five("AC AD AH KS QC"));
        assert!(wheel < five("2C 3D 4H 5S 6C"));
        assert_eq!(wheel.ranks(), [Rank::Five, Rank::Four, Rank::Three, Rank::Two, Rank::Ace]);
    }

    #[test]
    fn seven_cards_pick_the_best_subset() {
        let c = parse_cards("2H 7C AH KH QH JH 10H").unwrap();
        let best = evaluate_seven(&[c[0], c[1], c[2], c[3], c[4], c[5], c[6]]);
        assert_eq!(best.name(), "Royal Flush");
        assert!(!best.best_five.contains(&Card::new(Rank::Two, Suit::Hearts)));
    }

    #[test]
    fn six_cards_use_all_subsets() {
        let eval = evaluate(&parse_cards("9S 9H 9D 4C 4S 4H").unwrap()).unwrap();
        assert_eq!(eval.category, HandCategory::FullHouse);
        assert_eq!(eval.tiebreak()[..2], [Rank::Nine, Rank::Four]);
    }

    #[test]
    fn evaluate_validates_input() {
        let dup = parse_cards("2H 2H 3C 4D 5S").unwrap();
        assert!(matches!(evaluate(&dup), Err(HandError::DuplicateCard(_))));
        let eight = parse_cards("2H 3H 4H 5H 6H 7H 8H 9H").unwrap();
        assert!(matches!(evaluate(&eight), Err(HandError::TooManyCards { .. })));
        assert!(best_of(&eight[..4]).is_none());
    }
}

use super::hand_analysis::HandAnalysis;
use crate::cards::Rank;
use crate::evaluator::HandCategory;

/// Strategy pattern: each detector recognises one category and yields its tie-break key.
pub(crate) trait CategoryDetector {
    fn category(&self) -> HandCategory;
    /// The tie-break ranks if `analysis` belongs to this category.
    fn detect(&self, analysis: &HandAnalysis) -> Option<[Rank; 5]>;
}

fn straight_key(top: Rank) -> [Rank; 5] {
    [top, Rank::Two, Rank::Two, Rank::Two, Rank::Two]
}

fn shape_is(analysis: &HandAnalysis, shape: &[u8]) -> bool {
    analysis.shape().eq(shape.iter().copied())
}

// ============================================================================
// Detector Implementations (in priority order: highest to lowest)
// ============================================================================

pub(crate) struct StraightFlushDetector;

impl CategoryDetector for StraightFlushDetector {
    fn category(&self) -> HandCategory {
        HandCategory::StraightFlush
    }

    fn detect(&self, analysis: &HandAnalysis) -> Option<[Rank; 5]> {
        analysis.straight_top.filter(|_| analysis.is_flush).map(straight_key)
    }
}

pub(crate) struct FourOfAKindDetector;

impl CategoryDetector for FourOfAKindDetector {
    fn category(&self) -> HandCategory {
        HandCategory::FourOfAKind
    }

    fn detect(&self, analysis: &HandAnalysis) -> Option<[Rank; 5]> {
        shape_is(analysis, &[4, 1]).then(|| analysis.group_key())
    }
}

pub(crate) struct FullHouseDetector;

impl CategoryDetector for FullHouseDetector {
    fn category(&self) -> HandCategory {
        HandCategory::FullHouse
    }

    fn detect(&self, analysis: &HandAnalysis) -> Option<[Rank; 5]> {
        shape_is(analysis, &[3, 2]).then(|| analysis.group_key())
    }
}

pub(crate) struct FlushDetector;

impl CategoryDetector for FlushDetector {
    fn category(&self) -> HandCategory {
        HandCategory::Flush
    }

    fn detect(&self, analysis: &HandAnalysis) -> Option<[Rank; 5]> {
        // five distinct ranks, all of them kickers
        analysis.is_flush.then(|| analysis.group_key())
    }
}

pub(crate) struct StraightDetector;

impl CategoryDetector for StraightDetector {
    fn category(&self) -> HandCategory {
        HandCategory::Straight
    }

    fn detect(&self, analysis: &HandAnalysis) -> Option<[Rank; 5]> {
        analysis.straight_top.map(straight_key)
    }
}

pub(crate) struct ThreeOfAKindDetector;

impl CategoryDetector for ThreeOfAKindDetector {
    fn category(&self) -> HandCategory {
        HandCategory::ThreeOfAKind
    }

    fn detect(&self, analysis: &HandAnalysis) -> Option<[Rank; 5]> {
        shape_is(analysis, &[3, 1, 1]).then(|| analysis.group_key())
    }
}

pub(crate) struct TwoPairDetector;

impl CategoryDetector for TwoPairDetector {
    fn category(&self) -> HandCategory {
        HandCategory::TwoPair
    }

    fn detect(&self, analysis: &HandAnalysis) -> Option<[Rank; 5]> {
        shape_is(analysis, &[2, 2, 1]).then(|| analysis.group_key())
    }
}

pub(crate) struct OnePairDetector;

impl CategoryDetector for OnePairDetector {
    fn category(&self) -> HandCategory {
        HandCategory::Pair
    }

    fn detect(&self, analysis: &HandAnalysis) -> Option<[Rank; 5]> {
        shape_is(analysis, &[2, 1, 1, 1]).then(|| analysis.group_key())
    }
}

pub(crate) struct HighCardDetector;

impl CategoryDetector for HighCardDetector {
    fn category(&self) -> HandCategory {
        HandCategory::HighCard
    }

    fn detect(&self, analysis: &HandAnalysis) -> Option<[Rank; 5]> {
        // fallback, always matches
        Some(analysis.group_key())
    }
}

// ============================================================================
// Static detector list (in priority order)
// ============================================================================

pub(crate) const DETECTORS: [&dyn CategoryDetector; 9] = [
    &StraightFlushDetector,
    &FourOfAKindDetector,
    &FullHouseDetector,
    &FlushDetector,
    &StraightDetector,
    &ThreeOfAKindDetector,
    &TwoPairDetector,
    &OnePairDetector,
    &HighCardDetector,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_cards, Card};

    fn analyze(s: &str) -> HandAnalysis {
        let c: Vec<Card> = parse_cards(s).unwrap();
        HandAnalysis::new(&[c[0], c[1], c[2], c[3], c[4]])
    }

    fn first_match(s: &str) -> (HandCategory, [Rank; 5]) {
        let analysis = analyze(s);
        DETECTORS
            .iter()
            .find_map(|d| d.detect(&analysis).map(|key| (d.category(), key)))
            .unwrap()
    }

    #[test]
    fn detector_list_is_in_descending_category_order() {
        let cats: Vec<HandCategory> = DETECTORS.iter().map(|d| d.category()).collect();
        let mut expected = HandCategory::ALL.to_vec();
        expected.reverse();
        assert_eq!(cats, expected);
    }

    #[test]
    fn straight_flush_wins_over_flush_and_straight() {
        let analysis = analyze("9H 8H 7H 6H 5H");
        assert!(FlushDetector.detect(&analysis).is_some());
        assert!(StraightDetector.detect(&analysis).is_some());
        let (cat, key) = first_match("9H 8H 7H 6H 5H");
        assert_eq!(cat, HandCategory::StraightFlush);
        assert_eq!(key[0], Rank::Nine);
    }

    #[test]
    fn quads_key_is_quad_then_kicker() {
        let (cat, key) = first_match("AS AH AD AC KS");
        assert_eq!(cat, HandCategory::FourOfAKind);
        assert_eq!(&key[..2], &[Rank::Ace, Rank::King]);
    }

    #[test]
    fn full_house_is_not_trips() {
        let analysis = analyze("KS KH KD QC QS");
        assert!(ThreeOfAKindDetector.detect(&analysis).is_none());
        assert_eq!(first_match("KS KH KD QC QS").0, HandCategory::FullHouse);
    }

    #[test]
    fn each_category_is_detected() {
        let cases = [
            ("AD JD 9D 5D 2D", HandCategory::Flush),
            ("9S 8H 7D 6C 5S", HandCategory::Straight),
            ("JS JH JD 9C 7S", HandCategory::ThreeOfAKind),
            ("AS AH KD KC QS", HandCategory::TwoPair),
            ("JS JH 9D 7C 3S", HandCategory::Pair),
            ("AS KH JD 9C 7S", HandCategory::HighCard),
        ];
        for (hand, cat) in cases {
            assert_eq!(first_match(hand).0, cat, "{hand}");
        }
    }

    #[test]
    fn wheel_key_tops_at_five() {
        let (cat, key) = first_match("AS 2H 3D 4C 5S");
        assert_eq!(cat, HandCategory::Straight);
        assert_eq!(key[0], Rank::Five);
    }
}

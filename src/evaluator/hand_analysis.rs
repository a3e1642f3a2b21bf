use crate::cards::{Card, Rank};

/// Pre-computed analysis of a 5-card hand.
/// Built once and shared by all category detectors.
#[derive(Debug, Clone)]
pub(crate) struct HandAnalysis {
    /// Cards ordered by contribution: bigger rank groups first, then higher rank.
    pub cards: [Card; 5],
    /// `(rank, count)` sorted by count desc, then rank desc. Only `group_len` entries are used.
    groups: [(Rank, u8); 5],
    group_len: usize,
    pub is_flush: bool,
    /// Top rank of a straight; Five for the wheel.
    pub straight_top: Option<Rank>,
}

impl HandAnalysis {
    pub fn new(cards: &[Card; 5]) -> Self {
        let mut counts = [0u8; 15];
        for c in cards {
            counts[c.rank().value() as usize] += 1;
        }

        let mut groups = [(Rank::Two, 0u8); 5];
        let mut group_len = 0;
        for rank in Rank::ALL.iter().rev().copied() {
            let n = counts[rank.value() as usize];
            if n > 0 {
                groups[group_len] = (rank, n);
                group_len += 1;
            }
        }
        // ranks are already descending, a stable sort by count keeps them that way
        groups[..group_len].sort_by(|a, b| b.1.cmp(&a.1));

        let suit = cards[0].suit();
        let is_flush = cards.iter().all(|c| c.suit() == suit);
        let straight_top = if group_len == 5 { straight_top(&groups) } else { None };

        let mut ordered = *cards;
        if straight_top == Some(Rank::Five) && groups[0].0 == Rank::Ace {
            // wheel: the ace plays low
            ordered.sort_by_key(|c| (c.rank() != Rank::Ace, c.rank(), c.suit()));
            ordered.reverse();
        } else {
            ordered.sort_by(|a, b| {
                let (ca, cb) = (counts[a.rank().value() as usize], counts[b.rank().value() as usize]);
                cb.cmp(&ca).then(b.rank().cmp(&a.rank())).then(a.suit().cmp(&b.suit()))
            });
        }

        Self { cards: ordered, groups, group_len, is_flush, straight_top }
    }

    /// Rank groups sorted by (count desc, rank desc).
    pub fn groups(&self) -> &[(Rank, u8)] {
        &self.groups[..self.group_len]
    }

    /// The group counts, e.g. `[3, 2]` for a full house.
    pub fn shape(&self) -> impl Iterator<Item = u8> + '_ {
        self.groups().iter().map(|g| g.1)
    }

    /// Tie-break ranks in contribution order, padded with Two.
    pub fn group_key(&self) -> [Rank; 5] {
        let mut key = [Rank::Two; 5];
        for (slot, (rank, _)) in key.iter_mut().zip(self.groups()) {
            *slot = *rank;
        }
        key
    }
}

/// `groups` holds five distinct ranks in descending order.
fn straight_top(groups: &[(Rank, u8); 5]) -> Option<Rank> {
    let hi = groups[0].0.value();
    let lo = groups[4].0.value();
    if hi - lo == 4 {
        return Some(groups[0].0);
    }
    let wheel = [Rank::Ace, Rank::Five, Rank::Four, Rank::Three, Rank::Two];
    if groups.iter().map(|g| g.0).eq(wheel) {
        return Some(Rank::Five);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn analyze(s: &str) -> HandAnalysis {
        let cards = parse_cards(s).unwrap();
        HandAnalysis::new(&[cards[0], cards[1], cards[2], cards[3], cards[4]])
    }

    fn ranks(a: &HandAnalysis) -> Vec<String> {
        a.cards.iter().map(|c| c.rank().to_string()).collect()
    }

    #[test]
    fn royal_flush_analysis() {
        let a = analyze("10S AS QS KS JS");
        assert!(a.is_flush);
        assert_eq!(a.straight_top, Some(Rank::Ace));
        assert_eq!(ranks(&a), ["A", "K", "Q", "J", "10"]);
    }

    #[test]
    fn full_house_groups_trips_first() {
        let a = analyze("QC KS QS KH KD");
        assert_eq!(a.shape().collect::<Vec<_>>(), vec![3, 2]);
        assert_eq!(a.groups()[0], (Rank::King, 3));
        assert_eq!(ranks(&a), ["K", "K", "K", "Q", "Q"]);
        assert!(a.straight_top.is_none());
    }

    #[test]
    fn two_pair_orders_pairs_then_kicker() {
        let a = analyze("QS KD AS KC AH");
        assert_eq!(a.group_key(), [Rank::Ace, Rank::King, Rank::Queen, Rank::Two, Rank::Two]);
        assert_eq!(ranks(&a), ["A", "A", "K", "K", "Q"]);
    }

    #[test]
    fn low_pair_sorts_before_high_kickers() {
        let a = analyze("AH 3C KD 3S 9H");
        assert_eq!(ranks(&a), ["3", "3", "A", "K", "9"]);
    }

    #[test]
    fn wheel_plays_ace_low() {
        let a = analyze("AS 2H 3D 4C 5S");
        assert_eq!(a.straight_top, Some(Rank::Five));
        assert_eq!(ranks(&a), ["5", "4", "3", "2", "A"]);
    }

    #[test]
    fn near_straights_are_not_straights() {
        assert!(analyze("AS KH QD JC 9S").straight_top.is_none());
        assert!(analyze("AS 2H 3D 4C 6S").straight_top.is_none());
        assert!(analyze("KS AH 2D 3C 4S").straight_top.is_none());
        assert_eq!(analyze("6S 2H 3D 4C 5S").straight_top, Some(Rank::Six));
    }

    #[test]
    fn flush_needs_all_five_suited() {
        assert!(analyze("AD JD 9D 5D 2D").is_flush);
        assert!(!analyze("AD JD 9D 5D 2H").is_flush);
    }
}

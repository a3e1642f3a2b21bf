use crate::evaluator::{EvaluatedHand, HandCategory};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::ops::{AddAssign, Index, IndexMut};

/// One value per [`HandCategory`], indexed by category and iterated weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CategoryTable<T>([T; HandCategory::COUNT]);

impl<T> CategoryTable<T> {
    pub fn iter(&self) -> impl Iterator<Item = (HandCategory, &T)> {
        HandCategory::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T> Index<HandCategory> for CategoryTable<T> {
    type Output = T;

    fn index(&self, category: HandCategory) -> &T {
        &self.0[category.ordinal() as usize]
    }
}

impl<T> IndexMut<HandCategory> for CategoryTable<T> {
    fn index_mut(&mut self, category: HandCategory) -> &mut T {
        &mut self.0[category.ordinal() as usize]
    }
}

impl CategoryTable<u64> {
    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    /// Each count over the table total; all zeros for an empty table.
    pub fn probabilities(&self) -> CategoryTable<f64> {
        let total = self.total();
        if total == 0 {
            return CategoryTable::default();
        }
        let probs = CategoryTable(self.0.map(|n| n as f64 / total as f64));
        debug_assert!((probs.0.iter().sum::<f64>() - 1.0).abs() < 1e-9, "probabilities must sum to 1");
        probs
    }
}

impl AddAssign<&CategoryTable<u64>> for CategoryTable<u64> {
    fn add_assign(&mut self, rhs: &CategoryTable<u64>) {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a += b;
        }
    }
}

/// Serialized as a map keyed by category name, weakest category first.
impl<T: Serialize> Serialize for CategoryTable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(HandCategory::COUNT))?;
        for (category, value) in self.iter() {
            map.serialize_entry(category.name(), value)?;
        }
        map.end()
    }
}

/// Raw counts accumulated by one worker, merged by summation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tally {
    pub trials: u64,
    pub p1_wins: u64,
    pub p2_wins: u64,
    pub ties: u64,
    pub p1_categories: CategoryTable<u64>,
    pub p2_categories: CategoryTable<u64>,
}

impl Tally {
    /// Record one completed deal. Without an opponent only the category is counted.
    pub fn record(&mut self, p1: &EvaluatedHand, p2: Option<&EvaluatedHand>) {
        self.trials += 1;
        self.p1_categories[p1.category] += 1;
        if let Some(p2) = p2 {
            self.p2_categories[p2.category] += 1;
            match p1.cmp(p2) {
                std::cmp::Ordering::Greater => self.p1_wins += 1,
                std::cmp::Ordering::Less => self.p2_wins += 1,
                std::cmp::Ordering::Equal => self.ties += 1,
            }
        }
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, rhs: Tally) {
        self.trials += rhs.trials;
        self.p1_wins += rhs.p1_wins;
        self.p2_wins += rhs.p2_wins;
        self.ties += rhs.ties;
        self.p1_categories += &rhs.p1_categories;
        self.p2_categories += &rhs.p2_categories;
    }
}

impl std::iter::Sum for Tally {
    fn sum<I: Iterator<Item = Tally>>(iter: I) -> Self {
        iter.fold(Tally::default(), |mut acc, t| {
            acc += t;
            acc
        })
    }
}

/// Outcome counts for one player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStats {
    pub wins: u64,
    pub ties: u64,
    pub losses: u64,
    pub simulations: u64,
    pub categories: CategoryTable<u64>,
}

impl PlayerStats {
    pub fn probabilities(&self) -> CategoryTable<f64> {
        self.categories.probabilities()
    }

    pub fn win_rate(&self) -> f64 {
        ratio(self.wins, self.simulations)
    }

    pub fn tie_rate(&self) -> f64 {
        ratio(self.ties, self.simulations)
    }

    pub fn loss_rate(&self) -> f64 {
        ratio(self.losses, self.simulations)
    }
}

/// Heads-up summary as fractions of `simulations`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct WinRates {
    pub player1_wins: f64,
    pub ties: f64,
    pub player2_wins: f64,
    pub simulations: u64,
}

pub(crate) fn ratio(n: u64, d: u64) -> f64 {
    if d == 0 {
        0.0
    } else {
        n as f64 / d as f64
    }
}

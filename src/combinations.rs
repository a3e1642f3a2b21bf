//! Index combinations and binomial coefficients.

/// Largest subset size [`Combinations`] supports.
pub const MAX_K: usize = 7;

/// Returns the binomial coefficient n choose k, saturating at `u64::MAX`.
///
/// ```
/// use poker_equity::combinations::binomial;
///
/// assert_eq!(binomial(52, 5), 2_598_960);
/// assert_eq!(binomial(48, 5), 1_712_304);
/// assert_eq!(binomial(3, 5), 0);
/// ```
pub fn binomial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        // exact at every step: acc * (n - i) is divisible by (i + 1)
        acc = acc * (n - i) as u128 / (i + 1) as u128;
        if acc > u64::MAX as u128 {
            return u64::MAX;
        }
    }
    acc as u64
}

/// One k-subset of `0..n` as strictly increasing indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Combination {
    indices: [usize; MAX_K],
    len: usize,
}

impl Combination {
    pub fn as_slice(&self) -> &[usize] {
        &self.indices[..self.len]
    }
}

impl std::ops::Deref for Combination {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        self.as_slice()
    }
}

/// Iterator over all C(n, k) combinations of `k` indices out of `0..n`, in lexicographic order.
///
/// `k == 0` yields a single empty combination; `k > n` yields nothing.
///
/// ```
/// use poker_equity::combinations::Combinations;
///
/// let all: Vec<Vec<usize>> = Combinations::new(4, 2).map(|c| c.to_vec()).collect();
/// assert_eq!(all.len(), 6);
/// assert_eq!(all[0], vec![0, 1]);
/// assert_eq!(all[5], vec![2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    k: usize,
    indices: [usize; MAX_K],
    remaining: u64,
}

impl Combinations {
    /// Panics if `k > MAX_K`.
    pub fn new(n: usize, k: usize) -> Self {
        assert!(k <= MAX_K, "k={k} must be <= {MAX_K}");
        let mut indices = [0; MAX_K];
        for (i, slot) in indices.iter_mut().enumerate().take(k) {
            *slot = i;
        }
        Self { n, k, indices, remaining: binomial(n, k) }
    }
}

impl Iterator for Combinations {
    type Item = Combination;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let result = Combination { indices: self.indices, len: self.k };
        if self.remaining == 0 {
            return Some(result);
        }

        // Find the rightmost index that can be incremented, then reset everything to its right.
        let (n, k) = (self.n, self.k);
        let mut i = k;
        while i > 0 {
            i -= 1;
            if self.indices[i] < n - k + i {
                self.indices[i] += 1;
                for j in (i + 1)..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                break;
            }
        }

        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (n, Some(n))
    }
}

impl ExactSizeIterator for Combinations {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn binomial_matches_known_values() {
        [1, 52, 1326, 22100, 270725, 2598960, 20358520, 133784560]
            .into_iter()
            .enumerate()
            .for_each(|(k, v)| assert_eq!(binomial(52, k), v));
        assert_eq!(binomial(0, 0), 1);
        assert_eq!(binomial(5, 6), 0);
        assert_eq!(binomial(45, 2), 990);
    }

    #[test]
    fn test_generates_21_combinations() {
        let combos: Vec<Combination> = Combinations::new(7, 5).collect();
        assert_eq!(combos.len(), 21);
        assert_eq!(combos[0].as_slice(), &[0, 1, 2, 3, 4]);
        assert_eq!(combos[20].as_slice(), &[2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_5choose3_specific() {
        let combos: Vec<Vec<usize>> = Combinations::new(5, 3).map(|c| c.to_vec()).collect();
        assert_eq!(
            combos,
            vec![
                vec![0, 1, 2],
                vec![0, 1, 3],
                vec![0, 1, 4],
                vec![0, 2, 3],
                vec![0, 2, 4],
                vec![0, 3, 4],
                vec![1, 2, 3],
                vec![1, 2, 4],
                vec![1, 3, 4],
                vec![2, 3, 4],
            ]
        );
    }

    #[test]
    fn test_all_combinations_valid_and_unique() {
        let mut seen = HashSet::new();
        for combo in Combinations::new(10, 4) {
            assert!(combo.iter().all(|&i| i < 10));
            assert!(combo.windows(2).all(|w| w[0] < w[1]));
            assert!(seen.insert(combo.to_vec()), "Duplicate: {combo:?}");
        }
        assert_eq!(seen.len() as u64, binomial(10, 4));
    }

    #[test]
    fn test_lexicographic_order() {
        let combos: Vec<Vec<usize>> = Combinations::new(8, 3).map(|c| c.to_vec()).collect();
        assert!(combos.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_edge_sizes() {
        let empty: Vec<Combination> = Combinations::new(5, 0).collect();
        assert_eq!(empty.len(), 1);
        assert!(empty[0].is_empty());

        assert_eq!(Combinations::new(3, 5).count(), 0);
        assert_eq!(Combinations::new(0, 0).count(), 1);
        assert_eq!(Combinations::new(7, 7).count(), 1);
    }

    #[test]
    fn test_iterator_exhausts() {
        let mut iter = Combinations::new(7, 5);
        assert_eq!(iter.len(), 21);
        for _ in 0..21 {
            assert!(iter.next().is_some());
        }
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }
}

use super::{Dealer, Tally};
use crate::cards::Card;
use crate::combinations::Combinations;
use std::thread;

/// Enumerate every completion of `pool`; completion `i` is evaluated by worker `i % workers`.
pub(super) fn run(dealer: &Dealer, pool: &[Card], workers: usize) -> Tally {
    let workers = workers.max(1);
    if workers == 1 {
        return run_worker(dealer, pool, 0, 1);
    }

    thread::scope(|s| {
        let handles: Vec<_> =
            (0..workers).map(|w| s.spawn(move || run_worker(dealer, pool, w, workers))).collect();
        handles.into_iter().map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e))).sum()
    })
}

fn run_worker(dealer: &Dealer, pool: &[Card], worker: usize, workers: usize) -> Tally {
    let mut tally = Tally::default();
    let mut index = 0usize;
    let mut drawn = Vec::with_capacity(dealer.needed());
    for_each_completion(pool, &dealer.stages, &mut drawn, &mut |cards: &[Card]| {
        if index % workers == worker {
            dealer.record(cards, &mut tally);
        }
        index += 1;
    });
    tally
}

/// Calls `f` once per way of dealing `stages[0]` cards, then `stages[1]` from what is left, and
/// so on. Cards reach `f` concatenated in stage order; stages follow deck order.
fn for_each_completion<F>(pool: &[Card], stages: &[usize], drawn: &mut Vec<Card>, f: &mut F)
where
    F: FnMut(&[Card]),
{
    let Some((&k, rest)) = stages.split_first() else {
        f(drawn);
        return;
    };

    let mark = drawn.len();
    let mut left = Vec::with_capacity(pool.len());
    for combo in Combinations::new(pool.len(), k) {
        drawn.extend(combo.iter().map(|&i| pool[i]));
        if rest.iter().all(|&r| r == 0) {
            f(drawn);
        } else {
            left.clear();
            left.extend(pool.iter().enumerate().filter(|(i, _)| !combo.contains(i)).map(|(_, &c)| c));
            for_each_completion(&left, rest, drawn, f);
        }
        drawn.truncate(mark);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::combinations::binomial;
    use std::collections::HashSet;

    #[test]
    fn completions_are_distinct_and_counted() {
        let pool = parse_cards("2H 3H 4H 5H 6H 7H").unwrap();
        let mut seen = HashSet::new();
        let mut n = 0;
        for_each_completion(&pool, &[2, 1, 2], &mut Vec::new(), &mut |cards: &[Card]| {
            assert_eq!(cards.len(), 5);
            assert_eq!(cards.iter().collect::<HashSet<_>>().len(), 5);
            // order within a stage is irrelevant
            let mut key = cards.to_vec();
            key[..2].sort();
            key[3..].sort();
            assert!(seen.insert(key));
            n += 1;
        });
        assert_eq!(n, binomial(6, 2) * binomial(4, 1) * binomial(3, 2));
    }

    #[test]
    fn zero_stages_yield_one_empty_completion() {
        let pool = parse_cards("2H 3H").unwrap();
        let mut calls = 0;
        for_each_completion(&pool, &[0, 0, 0], &mut Vec::new(), &mut |cards: &[Card]| {
            assert!(cards.is_empty());
            calls += 1;
        });
        assert_eq!(calls, 1);
    }

    #[test]
    fn short_pool_yields_nothing() {
        let pool = parse_cards("2H 3H").unwrap();
        let mut calls = 0;
        for_each_completion(&pool, &[1, 2], &mut Vec::new(), &mut |_: &[Card]| calls += 1);
        assert_eq!(calls, 0);
    }
}

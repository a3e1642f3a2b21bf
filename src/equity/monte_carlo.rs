use super::{Dealer, Tally};
use crate::cards::Card;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::thread;

/// Sample `trials` random completions of `pool`.
///
/// Worker `w` owns a copy of the pool and a `ChaCha8Rng` seeded with `seed` on stream `w`, so
/// the counts depend only on the seed and the worker count.
pub(super) fn run(dealer: &Dealer, pool: &[Card], trials: u64, workers: usize, seed: u64) -> Tally {
    let workers = (workers.max(1) as u64).min(trials.max(1));

    thread::scope(|s| {
        let handles: Vec<_> = (0..workers)
            .map(|w| {
                let share = trials / workers + u64::from(w < trials % workers);
                s.spawn(move || run_worker(dealer, pool, share, seed, w))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e))).sum()
    })
}

fn run_worker(dealer: &Dealer, pool: &[Card], trials: u64, seed: u64, stream: u64) -> Tally {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(stream);

    let needed = dealer.needed();
    let mut deck = pool.to_vec();
    let mut tally = Tally::default();
    for _ in 0..trials {
        // partial Fisher-Yates: the first `needed` cards are a uniform draw without replacement
        let (drawn, _) = deck.partial_shuffle(&mut rng, needed);
        dealer.record(drawn, &mut tally);
    }
    tally
}

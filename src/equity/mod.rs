//! Win/tie/loss and category distributions for one or two players.
//!
//! A [`Matchup`] names the known cards; every unknown private or board card is dealt from the
//! deck that remains. Small completion spaces are enumerated exactly, larger ones are sampled
//! by seeded Monte Carlo trials split across scoped worker threads.

mod exact;
mod monte_carlo;
mod stats;

pub use stats::{CategoryTable, PlayerStats, Tally, WinRates};

use crate::cards::{Card, Rank, Suit};
use crate::combinations::binomial;
use crate::deck::Deck;
use crate::evaluator::{best_of, EvaluatedHand};
use crate::hand::{ensure_distinct, Board, HandError, HoleCards};
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EquityError {
    #[error("no players specified")]
    NoPlayersSpecified,
    #[error("too few cards left to deal: {needed} needed, {available} available")]
    TooFewCardsForBoard { needed: usize, available: usize },
    #[error(transparent)]
    Hand(#[from] HandError),
}

/// The dealing shape: how many private and shared cards make up a final hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Game {
    /// Two hole cards each, five shared board cards.
    #[default]
    Holdem,
    /// Five private cards each, no board.
    Draw,
}

impl Game {
    pub const fn private_cards(self) -> usize {
        match self {
            Game::Holdem => 2,
            Game::Draw => 5,
        }
    }

    pub const fn board_cards(self) -> usize {
        match self {
            Game::Holdem => 5,
            Game::Draw => 0,
        }
    }
}

/// How the completions were counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Exact,
    MonteCarlo,
}

/// Simulation knobs. `mode: None` picks exact enumeration when the completion count is at
/// most `exact_limit`, Monte Carlo otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    pub trials: u64,
    pub exact_limit: u64,
    pub workers: usize,
    pub seed: Option<u64>,
    pub mode: Option<Mode>,
}

impl SimulationConfig {
    pub const DEFAULT_TRIALS: u64 = 50_000;
    pub const DEFAULT_EXACT_LIMIT: u64 = 250_000;

    pub fn with_trials(mut self, trials: u64) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_exact_limit(mut self, exact_limit: u64) -> Self {
        self.exact_limit = exact_limit;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: Self::DEFAULT_TRIALS,
            exact_limit: Self::DEFAULT_EXACT_LIMIT,
            workers: std::thread::available_parallelism().map_or(1, NonZeroUsize::get),
            seed: None,
            mode: None,
        }
    }
}

/// Known cards for one or two players plus the board and dead cards.
///
/// ```
/// use poker_equity::cards::parse_cards;
/// use poker_equity::equity::{Game, Matchup};
///
/// let m = Matchup::heads_up(Game::Holdem, parse_cards("AH AS").unwrap(), parse_cards("KH KS").unwrap())
///     .unwrap();
/// assert_eq!(m.deck().len(), 48);
/// assert_eq!(m.completions(), 1_712_304);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matchup {
    game: Game,
    player1: HoleCards,
    player2: Option<HoleCards>,
    board: Board,
    dead: Vec<Card>,
}

impl Matchup {
    /// Validates card counts against `game` and uniqueness across every group.
    pub fn try_new(
        game: Game,
        player1: Vec<Card>,
        player2: Option<Vec<Card>>,
        board: Vec<Card>,
        dead: Vec<Card>,
    ) -> Result<Self, EquityError> {
        if player1.is_empty() && player2.as_ref().map_or(true, |p| p.is_empty()) {
            return Err(EquityError::NoPlayersSpecified);
        }
        let player1 = HoleCards::try_new(player1, game.private_cards())?;
        let player2 = player2.map(|p| HoleCards::try_new(p, game.private_cards())).transpose()?;
        let board = Board::try_new(board)?;
        if board.len() > game.board_cards() {
            return Err(HandError::TooManyCards {
                what: "the board",
                given: board.len(),
                max: game.board_cards(),
            }
            .into());
        }
        ensure_distinct(&[
            player1.as_slice(),
            player2.as_ref().map_or(&[][..], HoleCards::as_slice),
            board.as_slice(),
            dead.as_slice(),
        ])?;
        Ok(Self { game, player1, player2, board, dead })
    }

    /// Two players, no board or dead cards.
    pub fn heads_up(game: Game, player1: Vec<Card>, player2: Vec<Card>) -> Result<Self, EquityError> {
        Self::try_new(game, player1, Some(player2), Vec::new(), Vec::new())
    }

    /// One player, category distribution only.
    pub fn solo(game: Game, player1: Vec<Card>) -> Result<Self, EquityError> {
        Self::try_new(game, player1, None, Vec::new(), Vec::new())
    }

    pub fn game(&self) -> Game {
        self.game
    }

    pub fn player1(&self) -> &[Card] {
        self.player1.as_slice()
    }

    pub fn player2(&self) -> Option<&[Card]> {
        self.player2.as_ref().map(HoleCards::as_slice)
    }

    pub fn board(&self) -> &[Card] {
        self.board.as_slice()
    }

    pub fn dead(&self) -> &[Card] {
        &self.dead
    }

    /// Every card held by a player, on the board or dead.
    pub fn claimed(&self) -> Vec<Card> {
        let mut claimed = self.player1().to_vec();
        claimed.extend_from_slice(self.player2().unwrap_or_default());
        claimed.extend_from_slice(self.board());
        claimed.extend_from_slice(&self.dead);
        claimed
    }

    /// The working deck in standard order.
    pub fn deck(&self) -> Deck {
        Deck::excluding(&self.claimed())
    }

    /// Cards still to deal: player 1, player 2, board.
    fn stages(&self) -> [usize; 3] {
        let private = self.game.private_cards();
        [
            private - self.player1.len(),
            self.player2.as_ref().map_or(0, |p| private - p.len()),
            self.game.board_cards() - self.board.len(),
        ]
    }

    /// The number of distinct completions, saturating.
    pub fn completions(&self) -> u64 {
        let mut r = self.deck().len();
        let mut total: u64 = 1;
        for k in self.stages() {
            total = total.saturating_mul(binomial(r, k));
            r = r.saturating_sub(k);
        }
        total
    }
}

/// Turns a block of dealt cards into final hands for a matchup.
///
/// `drawn` holds player 1's missing cards, then player 2's, then the missing board cards.
pub(crate) struct Dealer<'a> {
    matchup: &'a Matchup,
    stages: [usize; 3],
}

const FILLER: Card = Card::new(Rank::Two, Suit::Hearts);

impl<'a> Dealer<'a> {
    fn new(matchup: &'a Matchup) -> Self {
        Self { matchup, stages: matchup.stages() }
    }

    fn needed(&self) -> usize {
        self.stages.iter().sum()
    }

    fn split<'d>(&self, drawn: &'d [Card]) -> (&'d [Card], &'d [Card], &'d [Card]) {
        let (p1, rest) = drawn.split_at(self.stages[0]);
        let (p2, board) = rest.split_at(self.stages[1]);
        (p1, p2, board)
    }

    fn assemble(&self, known: &[Card], dealt: &[Card], board_dealt: &[Card]) -> ([Card; 7], usize) {
        let mut buf = [FILLER; 7];
        let mut n = 0;
        let board = self.matchup.board();
        for &c in known.iter().chain(dealt).chain(board).chain(board_dealt) {
            buf[n] = c;
            n += 1;
        }
        (buf, n)
    }

    fn evaluate(&self, known: &[Card], dealt: &[Card], board_dealt: &[Card]) -> EvaluatedHand {
        let (buf, n) = self.assemble(known, dealt, board_dealt);
        best_of(&buf[..n]).unwrap_or_else(|| unreachable!("every game deals at least five cards"))
    }

    pub(crate) fn hands(&self, drawn: &[Card]) -> (EvaluatedHand, Option<EvaluatedHand>) {
        let (d1, d2, db) = self.split(drawn);
        let p1 = self.evaluate(self.matchup.player1(), d1, db);
        let p2 = self.matchup.player2().map(|known| self.evaluate(known, d2, db));
        (p1, p2)
    }

    pub(crate) fn record(&self, drawn: &[Card], tally: &mut Tally) {
        let (p1, p2) = self.hands(drawn);
        tally.record(&p1, p2.as_ref());
    }
}

/// Outcome of [`simulate`].
#[derive(Debug, Clone, PartialEq)]
pub struct EquityResult {
    pub mode: Mode,
    /// The seed the Monte Carlo workers were derived from.
    pub seed: Option<u64>,
    pub player1: PlayerStats,
    pub player2: Option<PlayerStats>,
}

impl EquityResult {
    fn from_tally(mode: Mode, seed: Option<u64>, tally: Tally, heads_up: bool) -> Self {
        let player1 = PlayerStats {
            wins: tally.p1_wins,
            ties: tally.ties,
            losses: tally.p2_wins,
            simulations: tally.trials,
            categories: tally.p1_categories,
        };
        let player2 = heads_up.then(|| PlayerStats {
            wins: tally.p2_wins,
            ties: tally.ties,
            losses: tally.p1_wins,
            simulations: tally.trials,
            categories: tally.p2_categories,
        });
        Self { mode, seed, player1, player2 }
    }

    pub fn simulations(&self) -> u64 {
        self.player1.simulations
    }

    /// Heads-up summary; `None` when only one player is active.
    pub fn win_rates(&self) -> Option<WinRates> {
        let p2 = self.player2.as_ref()?;
        let n = self.simulations();
        Some(WinRates {
            player1_wins: stats::ratio(self.player1.wins, n),
            ties: stats::ratio(self.player1.ties, n),
            player2_wins: stats::ratio(p2.wins, n),
            simulations: n,
        })
    }
}

fn check_deck(matchup: &Matchup, dealer: &Dealer) -> Result<Deck, EquityError> {
    let deck = matchup.deck();
    let needed = dealer.needed();
    if needed > deck.len() {
        return Err(EquityError::TooFewCardsForBoard { needed, available: deck.len() });
    }
    Ok(deck)
}

/// Deal every unknown card, by exhaustive enumeration or Monte Carlo sampling.
///
/// ```
/// use poker_equity::cards::parse_cards;
/// use poker_equity::equity::{simulate, Game, Matchup, Mode, SimulationConfig};
///
/// let m = Matchup::try_new(
///     Game::Holdem,
///     parse_cards("AH AS").unwrap(),
///     Some(parse_cards("KH KS").unwrap()),
///     parse_cards("2C 7D 9S 3H").unwrap(),
///     Vec::new(),
/// )
/// .unwrap();
/// let result = simulate(&m, &SimulationConfig::default()).unwrap();
/// assert_eq!(result.mode, Mode::Exact);
/// assert_eq!(result.simulations(), 44);
/// assert_eq!(result.player2.unwrap().wins, 2);
/// ```
pub fn simulate(matchup: &Matchup, config: &SimulationConfig) -> Result<EquityResult, EquityError> {
    let dealer = Dealer::new(matchup);
    let deck = check_deck(matchup, &dealer)?;
    let completions = matchup.completions();
    let workers = config.workers.max(1);
    let mode = config.mode.unwrap_or(if completions <= config.exact_limit {
        Mode::Exact
    } else {
        Mode::MonteCarlo
    });
    let heads_up = matchup.player2.is_some();

    let result = match mode {
        Mode::Exact => {
            info!("exact enumeration of {completions} completions on {workers} workers");
            let tally = exact::run(&dealer, deck.remaining(), workers);
            EquityResult::from_tally(mode, None, tally, heads_up)
        }
        Mode::MonteCarlo => {
            let seed = config.seed.unwrap_or_else(|| rand::rng().random());
            let trials = config.trials.max(1);
            info!("monte carlo: {trials} trials on {workers} workers, seed {seed} ({completions} completions)");
            let tally = monte_carlo::run(&dealer, deck.remaining(), trials, workers, seed);
            EquityResult::from_tally(mode, Some(seed), tally, heads_up)
        }
    };

    if let Some(p2) = &result.player2 {
        debug_assert_eq!(result.player1.wins + p2.wins + result.player1.ties, result.simulations());
    }
    debug!(
        "p1 wins {} ties {} losses {} of {}",
        result.player1.wins,
        result.player1.ties,
        result.player1.losses,
        result.simulations()
    );
    Ok(result)
}

/// One player's cards after a sample deal: private cards plus the board.
#[derive(Debug, Clone)]
pub struct DealtHand {
    pub cards: Vec<Card>,
    pub hand: EvaluatedHand,
}

/// A single random completion, for display.
#[derive(Debug, Clone)]
pub struct ExampleDeal {
    pub player1: DealtHand,
    pub player2: Option<DealtHand>,
    pub board: Vec<Card>,
}

/// Shuffle the working deck with `seed` and deal one completion.
pub fn example_deal(matchup: &Matchup, seed: u64) -> Result<ExampleDeal, EquityError> {
    let dealer = Dealer::new(matchup);
    let mut deck = check_deck(matchup, &dealer)?;
    deck.shuffle_seeded(seed);
    let drawn = deck.draw_n(dealer.needed());

    let (d1, d2, db) = dealer.split(&drawn);
    let deal = |known: &[Card], dealt: &[Card]| {
        let (buf, n) = dealer.assemble(known, dealt, db);
        let mut cards = buf[..n].to_vec();
        cards.sort_by_key(|c| c.rank());
        DealtHand { cards, hand: dealer.evaluate(known, dealt, db) }
    };

    let mut board = matchup.board().to_vec();
    board.extend_from_slice(db);
    Ok(ExampleDeal {
        player1: deal(matchup.player1(), d1),
        player2: matchup.player2().map(|known| deal(known, d2)),
        board,
    })
}

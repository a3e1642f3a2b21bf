//! JSON request and response shapes for the evaluate and calculate endpoints.
//!
//! The functions here are transport independent: they validate a request, run the evaluator
//! or the simulator and build the response body. [`crate::server`] wires them to HTTP.

use crate::cards::{parse_tokens, Card};
use crate::equity::{
    example_deal, simulate, CategoryTable, EquityError, Game, Matchup, Mode, PlayerStats, SimulationConfig,
    WinRates,
};
use crate::evaluator::{evaluate_hand, EvaluatedHand};
use crate::hand::{Hand, HandError};
use log::warn;
use rand::Rng;
use serde::{Deserialize, Serialize, Serializer};

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum ApiError {
    #[error(transparent)]
    Hand(#[from] HandError),
    #[error(transparent)]
    Equity(#[from] EquityError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// True for request-validation failures, false for failures on our side.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ApiError::Internal(_))
    }
}

/// Body of every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EvaluateRequest {
    pub cards: Vec<String>,
    /// Opponent hole cards. Present (even empty) turns on equity: `cards` are then two hole
    /// cards followed by the board.
    #[serde(default)]
    pub opponent_cards: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluateResponse {
    pub hand_name: String,
    pub hand_type: String,
    pub sorted_ranks: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub win_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tie_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loss_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simulations: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub win_rate_error: Option<String>,
}

impl EvaluateResponse {
    fn from_hand(eval: &EvaluatedHand) -> Self {
        Self {
            hand_name: eval.name(),
            hand_type: eval.category.name().to_string(),
            sorted_ranks: eval.ranks().iter().map(|r| r.to_string()).collect(),
            win_rate: None,
            tie_rate: None,
            loss_rate: None,
            simulations: None,
            win_rate_error: None,
        }
    }

    fn with_equity(mut self, stats: &PlayerStats) -> Self {
        self.win_rate = Some(stats.win_rate());
        self.tie_rate = Some(stats.tie_rate());
        self.loss_rate = Some(stats.loss_rate());
        self.simulations = Some(stats.simulations);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CalculateRequest {
    #[serde(default)]
    pub player1_cards: Vec<String>,
    /// Absent: player 1 alone. Empty: a random opponent.
    #[serde(default)]
    pub player2_cards: Option<Vec<String>>,
    #[serde(default)]
    pub board: Vec<String>,
    #[serde(default)]
    pub dead_cards: Vec<String>,
    #[serde(default)]
    pub game: Option<Game>,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerReport {
    pub final_hand: Vec<String>,
    pub hand_name: String,
    #[serde(serialize_with = "table_or_empty")]
    pub probabilities: Option<CategoryTable<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculateResponse {
    pub player1: PlayerReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player2: Option<PlayerReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub win_rates: Option<WinRates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub win_rate_error: Option<String>,
    pub game: Game,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    pub seed: u64,
}

fn table_or_empty<S: Serializer>(table: &Option<CategoryTable<f64>>, serializer: S) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeMap;
    match table {
        Some(table) => table.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}

fn parse(tokens: &[String]) -> Result<Vec<Card>, HandError> {
    Ok(parse_tokens(tokens)?)
}

fn card_strings(cards: &[Card]) -> Vec<String> {
    cards.iter().map(|c| c.to_string()).collect()
}

/// `Draw` when a player names more private cards than Hold'em allows and there is no board.
pub fn infer_game(player1: &[Card], player2: Option<&[Card]>, board: &[Card]) -> Game {
    let most = player1.len().max(player2.map_or(0, <[Card]>::len));
    if board.is_empty() && most > Game::Holdem.private_cards() {
        Game::Draw
    } else {
        Game::Holdem
    }
}

/// Name a hand of 5 to 7 cards. With `opponent_cards` the hand is also played out against that
/// opponent; without it the equity fields are replaced by `win_rate_error`.
///
/// ```
/// use poker_equity::api::{evaluate, EvaluateRequest};
/// use poker_equity::equity::SimulationConfig;
///
/// let req = EvaluateRequest {
///     cards: ["AH", "KH", "QH", "JH", "10H"].map(String::from).to_vec(),
///     opponent_cards: None,
/// };
/// let resp = evaluate(&req, &SimulationConfig::default()).unwrap();
/// assert_eq!(resp.hand_name, "Royal Flush");
/// assert_eq!(resp.hand_type, "Straight Flush");
/// assert!(resp.win_rate.is_none() && resp.win_rate_error.is_some());
/// ```
pub fn evaluate(req: &EvaluateRequest, config: &SimulationConfig) -> Result<EvaluateResponse, ApiError> {
    let hand = Hand::try_new(parse(&req.cards)?)?;
    let resp = EvaluateResponse::from_hand(&evaluate_hand(&hand));

    let Some(opponent) = &req.opponent_cards else {
        return Ok(EvaluateResponse {
            win_rate_error: Some("equity needs opponent context: send opponent_cards".to_string()),
            ..resp
        });
    };

    let (hole, board) = hand.as_slice().split_at(Game::Holdem.private_cards());
    let matchup = Matchup::try_new(Game::Holdem, hole.to_vec(), Some(parse(opponent)?), board.to_vec(), Vec::new())?;
    let result = simulate(&matchup, config)?;
    Ok(resp.with_equity(&result.player1))
}

/// Equity and category distribution for one or two players, plus a sample deal.
pub fn calculate(req: &CalculateRequest, config: &SimulationConfig) -> Result<CalculateResponse, ApiError> {
    let player1 = parse(&req.player1_cards)?;
    let player2 = req.player2_cards.as_deref().map(parse).transpose()?;
    let board = parse(&req.board)?;
    let dead = parse(&req.dead_cards)?;

    let game = req.game.unwrap_or_else(|| infer_game(&player1, player2.as_deref(), &board));
    let matchup = Matchup::try_new(game, player1, player2, board, dead)?;

    let mut config = config.clone();
    if let Some(seed) = req.seed {
        config = config.with_seed(seed);
    }

    let result = match simulate(&matchup, &config) {
        Ok(result) => result,
        Err(e @ EquityError::TooFewCardsForBoard { .. }) => {
            warn!("equity indeterminate: {e}");
            return Ok(indeterminate(&matchup, e.to_string(), config.seed.unwrap_or_default()));
        }
        Err(e) => return Err(e.into()),
    };

    let seed = result.seed.or(config.seed).unwrap_or_else(|| rand::rng().random());
    let deal = example_deal(&matchup, seed)?;
    let report = |stats: &PlayerStats, dealt: &crate::equity::DealtHand| PlayerReport {
        final_hand: card_strings(&dealt.cards),
        hand_name: dealt.hand.name(),
        probabilities: Some(stats.probabilities()),
    };

    let player2 = match (&result.player2, &deal.player2) {
        (Some(stats), Some(dealt)) => Some(report(stats, dealt)),
        _ => None,
    };
    let win_rates = result.win_rates();
    let win_rate_error =
        win_rates.is_none().then(|| "equity is indeterminate without a second player".to_string());

    Ok(CalculateResponse {
        player1: report(&result.player1, &deal.player1),
        player2,
        win_rates,
        win_rate_error,
        game,
        mode: Some(result.mode),
        seed,
    })
}

/// Hand data from the known cards only, equity replaced by `reason`.
fn indeterminate(matchup: &Matchup, reason: String, seed: u64) -> CalculateResponse {
    let report = |known: &[Card]| {
        let mut cards = known.to_vec();
        cards.extend_from_slice(matchup.board());
        cards.sort_by_key(|c| c.rank());
        PlayerReport { final_hand: card_strings(&cards), hand_name: "N/A".to_string(), probabilities: None }
    };
    CalculateResponse {
        player1: report(matchup.player1()),
        player2: matchup.player2().map(report),
        win_rates: None,
        win_rate_error: Some(reason),
        game: matchup.game(),
        mode: None,
        seed,
    }
}

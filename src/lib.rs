//! poker-equity: poker hand evaluation and equity calculation
//!
//! Goals:
//! - Deterministic best-of-five evaluation for 5 to 7 cards
//! - Exact or seeded Monte Carlo equity for one or two players
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: name a hand
//! ```
//! use poker_equity::cards::parse_cards;
//! use poker_equity::evaluator::{evaluate, HandCategory};
//!
//! let eval = evaluate(&parse_cards("AS AH KC QD JH 3S 2C").unwrap()).unwrap();
//! assert_eq!(eval.category, HandCategory::Pair);
//! assert_eq!(eval.name(), "One Pair");
//! ```
//!
//! ## Quick start: heads-up equity
//! ```
//! use poker_equity::cards::parse_cards;
//! use poker_equity::equity::{simulate, Game, Matchup, SimulationConfig};
//!
//! let matchup = Matchup::heads_up(
//!     Game::Holdem,
//!     parse_cards("AH AS").unwrap(),
//!     parse_cards("KH KS").unwrap(),
//! ).unwrap();
//! let config = SimulationConfig::default().with_seed(1).with_trials(2_000);
//! let rates = simulate(&matchup, &config).unwrap().win_rates().unwrap();
//! assert!(rates.player1_wins > 0.7);
//! ```
//!
//! ## Server
//! Run the JSON API with:
//! ```sh
//! cargo run --bin poker-equity -- --port 5000
//! ```

pub mod api;
pub mod cards;
pub mod combinations;
pub mod deck;
pub mod equity;
pub mod evaluator;
pub mod hand;
#[cfg(feature = "server")]
pub mod server;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

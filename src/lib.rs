//! headsup-holdem: a two-seat Texas Hold'em engine.
//!
//! - [`evaluator`]: best five-card hand of seven, one comparable score
//! - [`game`]: blinds, turn order, one raise per street, all-in runouts
//! - [`policy`]: the scripted opponent, seeded for reproducible play
//! - [`session`]: a local table with paced, cancellable deferred steps
//!
//! ## Quick start: play a hand against the state machine
//! ```
//! use headsup_holdem::config::TableConfig;
//! use headsup_holdem::game::{Action, Game, Progress, Stage};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut game = Game::new(TableConfig::default()).unwrap();
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//! assert_eq!(game.start_hand(&mut rng).unwrap(), Progress::Await(0));
//! game.act(0, Action::Call).unwrap();
//! assert_eq!(game.act(1, Action::Check).unwrap(), Progress::RoundComplete);
//! game.advance().unwrap();
//! assert_eq!(game.stage(), Stage::Flop);
//! assert_eq!(game.pot(), 40);
//! ```
//!
//! ## TUI
//! Run the interactive TUI with:
//! ```sh
//! cargo run --bin headsup -- --seed 42 --log headsup.log
//! ```

pub mod cards;
pub mod config;
pub mod deck;
pub mod evaluator;
pub mod game;
pub mod policy;
pub mod schedule;
pub mod session;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

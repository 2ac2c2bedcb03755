//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every game rule and no I/O. Rendering, input and score
//! persistence sit behind the [`GameObserver`] trait and the
//! [`GameStateMachine::handle_action`] entry point.
//!
//! # Module Structure
//!
//! - [`grid`]: 10x20 board of cells with a change journal
//! - [`piece`]: the falling tetromino (spawn, lower, hard drop, rotate, move)
//! - [`line_clear`]: full-row detection, scoring, flash/reset/collapse
//! - [`machine`]: the Waiting/Falling/BreakCheck/BreakHandler/GameOver cycle
//! - [`intents`]: buffered player input
//! - [`observer`]: notifications for renderers and score keepers
//! - [`rng`]: uniform random piece selection
//!
//! # Game Rules
//!
//! - Pieces spawn with their base tile at (4, 0); every kind is equally likely
//! - Rotation turns 90° about the base tile; O never rotates; no wall kicks
//! - A piece lowers once per 1.2s, or once per 150ms while soft drop is held
//! - Full rows flash for 200ms, then everything above drops; new full rows
//!   are cleared again and scored as a separate batch
//! - 1/2/3/4 rows score 100/300/500/800
//! - A spawn that is blocked ends the game
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameStateMachine, Phase};
//! use blockfall_types::GameAction;
//!
//! let mut game = GameStateMachine::new(12345);
//! game.tick(16, &mut ());
//! assert_eq!(game.phase(), Phase::Falling);
//!
//! game.handle_action(GameAction::HardDrop);
//! game.tick(16, &mut ());
//! assert_eq!(game.fall_timer_ms(), 850);
//! ```

pub mod grid;
pub mod intents;
pub mod line_clear;
pub mod machine;
pub mod observer;
pub mod piece;
pub mod rng;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use grid::{Cell, CellChange, Grid, GridError, Pos};
pub use intents::InputIntents;
pub use line_clear::{detect_full_rows, score_for, BreakRows};
pub use machine::{GameStateMachine, Phase};
pub use observer::{EventLog, GameEvent, GameObserver};
pub use piece::Piece;
pub use rng::{FixedPieces, PieceSource, SimpleRng, UniformPieces};
pub use snapshot::GameSnapshot;

//! Interactive session plumbing around the engine.
//!
//! - [`config`]: `BLOCKFALL_*` environment configuration
//! - [`logging`]: `env_logger` writing to a file
//! - [`scores`]: the append-only score log and leaderboard
//! - [`session`]: engine + persistence + overlay state for one player
//! - [`driver`]: the tokio loop joining input and ticks

pub mod config;
pub mod driver;
pub mod logging;
pub mod scores;
pub mod session;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use config::SessionConfig;
pub use driver::run_session;
pub use logging::init_file_logger;
pub use scores::{format_score_line, parse_score_line, top_scores, ScoreLog};
pub use session::Session;

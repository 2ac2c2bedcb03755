//! Session configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::types::TICK_MS;

pub const DEFAULT_SCORES_PATH: &str = "scores.txt";
pub const DEFAULT_LOG_PATH: &str = "blockfall.log";
pub const DEFAULT_LEADERBOARD_SIZE: usize = 10;
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Append-only score log.
    pub scores_path: PathBuf,
    /// Where `env_logger` writes (stderr belongs to the game view).
    pub log_path: PathBuf,
    pub tick_ms: u32,
    pub seed: u32,
    pub leaderboard_size: usize,
    /// Pending input actions before the input thread starts dropping them.
    pub channel_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            scores_path: PathBuf::from(DEFAULT_SCORES_PATH),
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            tick_ms: TICK_MS,
            seed: 1,
            leaderboard_size: DEFAULT_LEADERBOARD_SIZE,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl SessionConfig {
    /// Read `BLOCKFALL_*` variables. Missing or unparseable values use defaults;
    /// the seed defaults to the current time.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let path = |key: &str, default: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        };

        let scores_path = path("BLOCKFALL_SCORES_PATH", DEFAULT_SCORES_PATH);
        let log_path = path("BLOCKFALL_LOG_PATH", DEFAULT_LOG_PATH);

        let tick_ms = lookup("BLOCKFALL_TICK_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u32| ms > 0)
            .unwrap_or(TICK_MS);

        let seed = lookup("BLOCKFALL_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(time_seed);

        let leaderboard_size = lookup("BLOCKFALL_LEADERBOARD_SIZE")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_LEADERBOARD_SIZE);

        Self {
            scores_path,
            log_path,
            tick_ms,
            seed,
            leaderboard_size,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1) as u64)
    }
}

fn time_seed() -> u32 {
    let now = chrono::Utc::now();
    (now.timestamp() as u32) ^ now.timestamp_subsec_nanos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = SessionConfig::from_lookup(lookup(&[("BLOCKFALL_SEED", "5")]));
        assert_eq!(config.scores_path, PathBuf::from("scores.txt"));
        assert_eq!(config.log_path, PathBuf::from("blockfall.log"));
        assert_eq!(config.tick_ms, 16);
        assert_eq!(config.seed, 5);
        assert_eq!(config.leaderboard_size, 10);
        assert_eq!(config.tick_interval(), Duration::from_millis(16));
    }

    #[test]
    fn test_overrides_and_bad_values() {
        let config = SessionConfig::from_lookup(lookup(&[
            ("BLOCKFALL_SCORES_PATH", " /tmp/s.txt "),
            ("BLOCKFALL_LOG_PATH", ""),
            ("BLOCKFALL_TICK_MS", "0"),
            ("BLOCKFALL_LEADERBOARD_SIZE", "3"),
            ("BLOCKFALL_SEED", "not-a-number"),
        ]));
        assert_eq!(config.scores_path, PathBuf::from("/tmp/s.txt"));
        assert_eq!(config.log_path, PathBuf::from("blockfall.log"));
        assert_eq!(config.tick_ms, 16);
        assert_eq!(config.leaderboard_size, 3);
    }
}

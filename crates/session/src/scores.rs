//! Score persistence: one line per finished game in a flat, append-only file.
//!
//! Line format: `<year>-<month>-<day>::<hh>:<mm><AM|PM> <score>`, with month and
//! day unpadded. The hour is written as `(hour % 12) + 1`, zero-padded, which is
//! one ahead of a conventional 12-hour clock (noon reads `01:00PM`). Existing
//! score files use this format, so it is kept as-is.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDateTime, Timelike};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::types::ScoreRecord;

/// Render the timestamp prefix of a score line.
pub fn format_stamp(at: NaiveDateTime) -> String {
    let hour = at.hour();
    format!(
        "{}-{}-{}::{:02}:{:02}{}",
        at.year(),
        at.month(),
        at.day(),
        (hour % 12) + 1,
        at.minute(),
        if hour < 12 { "AM" } else { "PM" }
    )
}

/// Render a full score line (without the trailing newline).
pub fn format_score_line(at: NaiveDateTime, score: u32) -> String {
    format!("{} {}", format_stamp(at), score)
}

/// Parse one line. The score is everything after the last space.
pub fn parse_score_line(line: &str) -> Option<ScoreRecord> {
    let (stamp, score) = line.trim().rsplit_once(' ')?;
    let stamp = stamp.trim_end();
    if stamp.is_empty() {
        return None;
    }
    Some(ScoreRecord::new(stamp, score.parse().ok()?))
}

/// Highest scores first, ties in file order, at most `limit` entries.
pub fn top_scores(mut records: Vec<ScoreRecord>, limit: usize) -> Vec<ScoreRecord> {
    records.sort_by(|a, b| b.score.cmp(&a.score));
    records.truncate(limit);
    records
}

#[derive(Debug, Clone)]
pub struct ScoreLog {
    path: PathBuf,
}

impl ScoreLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a line for `score` stamped with the local time. Returns the line.
    pub async fn append_now(&self, score: u32) -> Result<String> {
        self.append(Local::now().naive_local(), score).await
    }

    pub async fn append(&self, at: NaiveDateTime, score: u32) -> Result<String> {
        let line = format_score_line(at, score);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .with_context(|| format!("open score log {}", self.path.display()))?;

        let mut bytes = Vec::with_capacity(line.len() + 1);
        bytes.extend_from_slice(line.as_bytes());
        bytes.push(b'\n');
        file.write_all(&bytes)
            .await
            .with_context(|| format!("append to score log {}", self.path.display()))?;
        file.flush().await?;

        Ok(line)
    }

    /// Every well-formed record in file order. A missing file is an empty log;
    /// malformed lines are skipped with a warning.
    pub async fn load(&self) -> Result<Vec<ScoreRecord>> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("read score log {}", self.path.display()))
            }
        };

        let mut records = Vec::new();
        for (n, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_score_line(line) {
                Some(record) => records.push(record),
                None => log::warn!(
                    "{}:{}: skipping malformed score line {:?}",
                    self.path.display(),
                    n + 1,
                    line
                ),
            }
        }
        Ok(records)
    }

    pub async fn leaderboard(&self, limit: usize) -> Result<Vec<ScoreRecord>> {
        Ok(top_scores(self.load().await?, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 9)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("blockfall-{}-{}.txt", name, std::process::id()))
    }

    #[test]
    fn test_score_line_format() {
        assert_eq!(format_score_line(at(0, 5), 0), "2026-3-9::01:05AM 0");
        assert_eq!(format_score_line(at(9, 30), 1200), "2026-3-9::10:30AM 1200");
        assert_eq!(format_score_line(at(11, 59), 100), "2026-3-9::12:59AM 100");
        assert_eq!(format_score_line(at(12, 0), 300), "2026-3-9::01:00PM 300");
        assert_eq!(format_score_line(at(23, 7), 800), "2026-3-9::12:07PM 800");

        let december = NaiveDate::from_ymd_opt(2025, 12, 25)
            .unwrap()
            .and_hms_opt(15, 4, 0)
            .unwrap();
        assert_eq!(format_stamp(december), "2025-12-25::04:04PM");
    }

    #[test]
    fn test_parse_score_line() {
        assert_eq!(
            parse_score_line("2026-3-9::01:05AM 1200\n"),
            Some(ScoreRecord::new("2026-3-9::01:05AM", 1200))
        );
        assert_eq!(parse_score_line("garbage"), None);
        assert_eq!(parse_score_line("2026-3-9::01:05AM lots"), None);
        assert_eq!(parse_score_line(" 100"), None);
    }

    #[test]
    fn test_top_scores_sorted_and_stable() {
        let records = vec![
            ScoreRecord::new("a", 100),
            ScoreRecord::new("b", 800),
            ScoreRecord::new("c", 100),
            ScoreRecord::new("d", 300),
        ];
        let top = top_scores(records, 3);
        let stamps: Vec<&str> = top.iter().map(|r| r.stamp.as_str()).collect();
        assert_eq!(stamps, vec!["b", "d", "a"]);
    }

    #[tokio::test]
    async fn test_append_then_leaderboard() {
        let path = temp_path("append");
        let _ = tokio::fs::remove_file(&path).await;
        let log = ScoreLog::new(&path);

        assert!(log.load().await.unwrap().is_empty());

        log.append(at(8, 0), 300).await.unwrap();
        log.append(at(9, 0), 1500).await.unwrap();
        tokio::fs::OpenOptions::new()
            .append(true)
            .open(&path)
            .await
            .unwrap()
            .write_all(b"not a score line\n\n")
            .await
            .unwrap();
        log.append(at(10, 0), 0).await.unwrap();

        let text = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(text.starts_with("2026-3-9::09:00AM 300\n2026-3-9::10:00AM 1500\n"));

        let board = log.leaderboard(2).await.unwrap();
        assert_eq!(
            board,
            vec![
                ScoreRecord::new("2026-3-9::10:00AM", 1500),
                ScoreRecord::new("2026-3-9::09:00AM", 300),
            ]
        );
        assert_eq!(log.load().await.unwrap().len(), 3);

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_append_into_missing_directory_fails() {
        let log = ScoreLog::new(temp_path("missing-dir").join("scores.txt"));
        assert!(log.append_now(10).await.is_err());
    }
}

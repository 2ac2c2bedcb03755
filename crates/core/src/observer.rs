//! Collaborator notifications fired by the engine.
//!
//! Rendering, score display and score persistence live outside the engine.
//! They implement [`GameObserver`] and receive only what changed.

use crate::types::TileColor;

pub trait GameObserver {
    /// A grid cell changed. `TileColor::Background` means it is now empty.
    fn on_cell_changed(&mut self, _x: u8, _y: u8, _color: TileColor) {}

    /// The running score changed (after a break, or reset by a new game).
    fn on_score_changed(&mut self, _score: u32) {}

    /// The game ended. Fired exactly once per game.
    fn on_game_over(&mut self, _final_score: u32) {}
}

/// Ignores every notification.
impl GameObserver for () {}

/// Everything the engine reported, in order. Handy for tests and replays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    CellChanged { x: u8, y: u8, color: TileColor },
    ScoreChanged(u32),
    GameOver(u32),
}

/// Records engine notifications as [`GameEvent`]s.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pub events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score_changes(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GameEvent::ScoreChanged(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    pub fn game_overs(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GameEvent::GameOver(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl GameObserver for EventLog {
    fn on_cell_changed(&mut self, x: u8, y: u8, color: TileColor) {
        self.events.push(GameEvent::CellChanged { x, y, color });
    }

    fn on_score_changed(&mut self, score: u32) {
        self.events.push(GameEvent::ScoreChanged(score));
    }

    fn on_game_over(&mut self, final_score: u32) {
        self.events.push(GameEvent::GameOver(final_score));
    }
}

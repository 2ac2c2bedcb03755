use crate::machine::Phase;
use crate::types::{TileColor, BOARD_HEIGHT, BOARD_WIDTH};

/// Render-ready copy of the board, score and phase.
///
/// Reused across frames through [`GameStateMachine::snapshot_into`](crate::GameStateMachine::snapshot_into).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[TileColor; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub score: u32,
    pub phase: Phase,
}

impl GameSnapshot {
    pub fn new() -> Self {
        Self {
            board: [[TileColor::Background; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            score: 0,
            phase: Phase::Waiting,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn filled_cells(&self) -> usize {
        self.board
            .iter()
            .flatten()
            .filter(|c| !c.is_background())
            .count()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

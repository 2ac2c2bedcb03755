//! Line clear module - detection, scoring and the flash/reset/collapse steps
//!
//! The state machine runs these one step per tick: detect, flash and score,
//! wait out the dwell, then reset and collapse, then detect again.

use arrayvec::ArrayVec;

use crate::grid::{Grid, Pos};
use crate::types::{TileColor, BOARD_HEIGHT, BOARD_WIDTH, LINE_SCORES};

/// Distinct full row indices from one detection pass, ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreakRows {
    rows: ArrayVec<u8, { BOARD_HEIGHT as usize }>,
}

impl BreakRows {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn contains(&self, y: u8) -> bool {
        self.rows.contains(&y)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.rows.iter().copied()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

/// Scan all 20 rows top to bottom and collect the full ones.
pub fn detect_full_rows(grid: &Grid) -> BreakRows {
    let mut found = BreakRows::new();
    for y in 0..BOARD_HEIGHT {
        if grid.row_is_full(y) {
            found.rows.push(y);
        }
    }
    found
}

/// Points for breaking `row_count` rows at once (classic single/double/triple/tetris).
///
/// Anything outside 1..=4 scores nothing.
pub fn score_for(row_count: usize) -> u32 {
    match row_count {
        1..=4 => LINE_SCORES[row_count],
        _ => 0,
    }
}

/// Paint every cell of each row with the flash color. The rows stay taken.
pub fn flash_rows(grid: &mut Grid, rows: &BreakRows) {
    for_each_cell(rows, |pos| grid.set_cell(pos, TileColor::Flash));
}

/// Empty every cell of each row.
pub fn reset_rows(grid: &mut Grid, rows: &BreakRows) {
    for_each_cell(rows, |pos| grid.clear_cell(pos));
}

/// Drop everything above each broken row by one, lowest index first.
///
/// Going in ascending order keeps each shift correct: later (lower) rows see
/// the content that earlier shifts already moved down.
pub fn collapse_rows(grid: &mut Grid, rows: &BreakRows) {
    for y in rows.iter() {
        grid.shift_rows_down(y, 1);
    }
}

fn for_each_cell(rows: &BreakRows, mut f: impl FnMut(Pos)) {
    for y in rows.iter() {
        for x in 0..BOARD_WIDTH {
            if let Some(pos) = Pos::new(x as i32, y as i32) {
                f(pos);
            }
        }
    }
}

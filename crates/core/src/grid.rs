//! Grid module - the 10x20 play area
//!
//! Each cell carries an occupancy flag and a color. Storage is a flat,
//! row-major array. Coordinates are (x, y) with x in 0..10 (left to right)
//! and y in 0..20 (top to bottom).
//!
//! Every mutation is appended to a change journal so the renderer can be told
//! exactly which cells changed; the state machine drains it once per tick.

use thiserror::Error;

use crate::types::{Direction, TileColor, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the grid
const GRID_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell ({x}, {y}) is outside the 10x20 grid")]
    OutOfRange { x: i32, y: i32 },
}

/// One grid cell. `taken == false` always pairs with `TileColor::Background`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub taken: bool,
    pub color: TileColor,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        taken: false,
        color: TileColor::Background,
    };

    pub fn filled(color: TileColor) -> Self {
        Self { taken: true, color }
    }
}

/// An in-range grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    x: u8,
    y: u8,
}

impl Pos {
    /// Returns `None` when (x, y) is off the grid.
    pub fn new(x: i32, y: i32) -> Option<Self> {
        if x < 0 || x >= BOARD_WIDTH as i32 || y < 0 || y >= BOARD_HEIGHT as i32 {
            return None;
        }
        Some(Self {
            x: x as u8,
            y: y as u8,
        })
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    /// The neighboring position one step in `direction`, if it is on the grid.
    pub fn step(&self, direction: Direction) -> Option<Pos> {
        let (dx, dy) = direction.offset();
        Pos::new(self.x as i32 + dx as i32, self.y as i32 + dy as i32)
    }

    #[inline(always)]
    fn index(&self) -> usize {
        (self.y as usize) * (BOARD_WIDTH as usize) + (self.x as usize)
    }
}

/// A recorded cell mutation, in the order it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellChange {
    pub x: u8,
    pub y: u8,
    /// `TileColor::Background` means the cell became empty.
    pub color: TileColor,
}

/// The play area - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: [Cell; GRID_SIZE],
    changes: Vec<CellChange>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [Cell::EMPTY; GRID_SIZE],
            changes: Vec::with_capacity(64),
        }
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Read a cell. Out-of-range coordinates are a caller bug and fail.
    pub fn cell_at(&self, x: i32, y: i32) -> Result<Cell, GridError> {
        Pos::new(x, y)
            .map(|pos| self.cells[pos.index()])
            .ok_or(GridError::OutOfRange { x, y })
    }

    /// Read a cell at a known-valid position.
    pub fn cell(&self, pos: Pos) -> Cell {
        self.cells[pos.index()]
    }

    pub fn is_taken(&self, pos: Pos) -> bool {
        self.cells[pos.index()].taken
    }

    /// The cell one step away in `direction`, or `None` past the edge. No wrap-around.
    pub fn neighbor(&self, x: i32, y: i32, direction: Direction) -> Option<Cell> {
        let pos = Pos::new(x, y)?;
        self.neighbor_pos(pos, direction).map(|n| self.cell(n))
    }

    pub fn neighbor_pos(&self, pos: Pos, direction: Direction) -> Option<Pos> {
        pos.step(direction)
    }

    /// Mark a cell taken with `color`.
    pub fn set_cell(&mut self, pos: Pos, color: TileColor) {
        self.write(pos, Cell::filled(color));
    }

    /// Mark a cell empty.
    pub fn clear_cell(&mut self, pos: Pos) {
        self.write(pos, Cell::EMPTY);
    }

    fn write(&mut self, pos: Pos, cell: Cell) {
        self.cells[pos.index()] = cell;
        self.changes.push(CellChange {
            x: pos.x,
            y: pos.y,
            color: cell.color,
        });
    }

    /// Check if a row is completely taken. Rows past the bottom are never full.
    pub fn row_is_full(&self, y: u8) -> bool {
        if y >= BOARD_HEIGHT {
            return false;
        }
        self.row(y).iter().all(|cell| cell.taken)
    }

    /// The 10 cells of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= 20`. Use [`Grid::row_is_full`] or [`Grid::cell_at`] for
    /// unchecked input.
    pub fn row(&self, y: u8) -> &[Cell] {
        assert!(y < BOARD_HEIGHT, "row {} is outside the 10x20 grid", y);
        let width = BOARD_WIDTH as usize;
        let start = (y as usize) * width;
        &self.cells[start..start + width]
    }

    /// Drop every taken cell above row `y` by `by` rows.
    ///
    /// Rows are processed from `y - 1` up to row 0, so a moved cell always lands
    /// on a row the pass has already emptied. Row `y` itself must already be
    /// empty (reset). Cells pushed past the bottom edge are discarded.
    pub fn shift_rows_down(&mut self, y: u8, by: u8) {
        if by == 0 {
            return;
        }
        let top = y.min(BOARD_HEIGHT);
        for src_y in (0..top).rev() {
            for x in 0..BOARD_WIDTH {
                let Some(src) = Pos::new(x as i32, src_y as i32) else {
                    continue;
                };
                let cell = self.cell(src);
                if !cell.taken {
                    continue;
                }
                self.clear_cell(src);
                if let Some(dst) = Pos::new(x as i32, src_y as i32 + by as i32) {
                    self.set_cell(dst, cell.color);
                }
            }
        }
    }

    /// Empty every cell (new game).
    pub fn clear_all(&mut self) {
        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                if let Some(pos) = Pos::new(x as i32, y as i32) {
                    self.clear_cell(pos);
                }
            }
        }
    }

    /// Take all cell changes recorded since the last drain, oldest first.
    pub fn drain_changes(&mut self) -> std::vec::Drain<'_, CellChange> {
        self.changes.drain(..)
    }

    pub fn pending_changes(&self) -> usize {
        self.changes.len()
    }

    /// Write colors into a row-major array for rendering.
    pub fn write_colors(&self, out: &mut [[TileColor; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, slot) in row.iter_mut().enumerate() {
                *slot = self.cells[y * BOARD_WIDTH as usize + x].color;
            }
        }
    }

    /// Build a grid from a picture, one string per row from the top.
    /// The picture is bottom-aligned: the last string is row 19. `.` is empty and
    /// any other character is a taken cell of `color`. Nothing is journaled.
    pub fn from_rows(rows: &[&str], color: TileColor) -> Self {
        let mut grid = Grid::new();
        let offset = BOARD_HEIGHT as usize - rows.len().min(BOARD_HEIGHT as usize);
        for (i, line) in rows.iter().enumerate().take(BOARD_HEIGHT as usize) {
            for (x, ch) in line.chars().enumerate().take(BOARD_WIDTH as usize) {
                if ch == '.' {
                    continue;
                }
                if let Some(pos) = Pos::new(x as i32, (offset + i) as i32) {
                    grid.set_cell(pos, color);
                }
            }
        }
        grid.changes.clear();
        grid
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

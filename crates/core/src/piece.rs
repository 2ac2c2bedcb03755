//! Piece module - the falling tetromino
//!
//! A piece owns exactly four grid cells. Cell 0 is the base tile: it anchors the
//! spawn layout and is the pivot for rotation. Every operation computes all
//! target cells first and only then touches the grid, so a piece never reads a
//! cell it has already rewritten during the same move.
//!
//! Illegal moves are silently rejected; the `bool` results only say whether the
//! piece actually moved.

use arrayvec::ArrayVec;

use crate::grid::{Grid, Pos};
use crate::types::{Direction, PieceKind, TileColor, SPAWN_X, SPAWN_Y};

/// Cells of a piece; index 0 is the base tile.
pub type PieceCells = [Pos; 4];

/// Offsets from the base tile for the three non-base cells of each kind.
pub fn spawn_offsets(kind: PieceKind) -> [(i8, i8); 3] {
    match kind {
        PieceKind::I => [(-1, 0), (1, 0), (2, 0)],
        PieceKind::O => [(0, 1), (1, 0), (1, 1)],
        PieceKind::T => [(-1, 0), (1, 0), (0, 1)],
        PieceKind::S => [(-1, 1), (0, 1), (1, 0)],
        PieceKind::Z => [(-1, 0), (0, 1), (1, 1)],
        PieceKind::J => [(-1, 0), (1, 0), (1, 1)],
        PieceKind::L => [(-1, 0), (-1, 1), (1, 0)],
    }
}

/// Absolute spawn cells for a kind (base tile first).
pub fn spawn_cells(kind: PieceKind) -> Option<PieceCells> {
    let base = Pos::new(SPAWN_X as i32, SPAWN_Y as i32)?;
    let mut cells = [base; 4];
    for (slot, (dx, dy)) in cells.iter_mut().skip(1).zip(spawn_offsets(kind)) {
        *slot = Pos::new(base.x() as i32 + dx as i32, base.y() as i32 + dy as i32)?;
    }
    Some(cells)
}

/// The active falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    cells: PieceCells,
}

impl Piece {
    /// Place a new piece at the spawn layout and paint it.
    ///
    /// Returns `None` (and paints nothing) when any spawn cell is already taken.
    pub fn spawn(kind: PieceKind, grid: &mut Grid) -> Option<Self> {
        let cells = spawn_cells(kind)?;
        if cells.iter().any(|&pos| grid.is_taken(pos)) {
            return None;
        }
        let piece = Self { kind, cells };
        piece.paint(grid);
        Some(piece)
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn color(&self) -> TileColor {
        self.kind.color()
    }

    pub fn cells(&self) -> &PieceCells {
        &self.cells
    }

    /// The base tile (rotation pivot).
    pub fn base(&self) -> Pos {
        self.cells[0]
    }

    pub fn owns(&self, pos: Pos) -> bool {
        self.cells.contains(&pos)
    }

    /// Distinct columns covered by the piece, ascending.
    pub fn owned_columns(&self) -> ArrayVec<u8, 4> {
        let mut columns: ArrayVec<u8, 4> = ArrayVec::new();
        for pos in &self.cells {
            if !columns.contains(&pos.x()) {
                columns.push(pos.x());
            }
        }
        columns.sort_unstable();
        columns
    }

    /// A target is usable when it is empty or one of our own cells.
    fn is_free_for_me(&self, grid: &Grid, pos: Pos) -> bool {
        !grid.is_taken(pos) || self.owns(pos)
    }

    /// Translate every cell one step; `None` if any target is off-grid or blocked.
    fn shifted(&self, grid: &Grid, direction: Direction) -> Option<PieceCells> {
        let mut targets = self.cells;
        for slot in targets.iter_mut() {
            let next = grid.neighbor_pos(*slot, direction)?;
            if !self.is_free_for_me(grid, next) {
                return None;
            }
            *slot = next;
        }
        Some(targets)
    }

    fn paint(&self, grid: &mut Grid) {
        for &pos in &self.cells {
            grid.set_cell(pos, self.color());
        }
    }

    fn black_out(&self, grid: &mut Grid) {
        for &pos in &self.cells {
            grid.clear_cell(pos);
        }
    }

    /// Clear the old cells, adopt the new set, repaint.
    fn relocate(&mut self, grid: &mut Grid, targets: PieceCells) {
        self.black_out(grid);
        self.cells = targets;
        self.paint(grid);
    }

    /// True iff every cell's south neighbor exists and is free (or ours).
    pub fn can_lower(&self, grid: &Grid) -> bool {
        self.shifted(grid, Direction::S).is_some()
    }

    /// Move one row down. Callers check `can_lower` first; an illegal lower is ignored.
    pub fn lower(&mut self, grid: &mut Grid) {
        if let Some(targets) = self.shifted(grid, Direction::S) {
            self.relocate(grid, targets);
        }
    }

    /// Lower until blocked. Returns the number of rows travelled.
    pub fn hard_drop(&mut self, grid: &mut Grid) -> u8 {
        let mut rows = 0u8;
        while self.can_lower(grid) {
            self.lower(grid);
            rows += 1;
        }
        rows
    }

    /// Rotate 90° about the base tile. O never rotates; a blocked rotation is dropped.
    pub fn rotate(&mut self, grid: &mut Grid) -> bool {
        if self.kind == PieceKind::O {
            return false;
        }

        let pivot = self.base();
        let (px, py) = (pivot.x() as i32, pivot.y() as i32);
        let mut targets = self.cells;
        for slot in targets.iter_mut().skip(1) {
            let (x, y) = (slot.x() as i32, slot.y() as i32);
            let Some(next) = Pos::new(px - (y - py), py + (x - px)) else {
                return false;
            };
            if !self.is_free_for_me(grid, next) {
                return false;
            }
            *slot = next;
        }

        self.relocate(grid, targets);
        true
    }

    pub fn move_left(&mut self, grid: &mut Grid) -> bool {
        self.slide(grid, Direction::W)
    }

    pub fn move_right(&mut self, grid: &mut Grid) -> bool {
        self.slide(grid, Direction::E)
    }

    fn slide(&mut self, grid: &mut Grid, direction: Direction) -> bool {
        match self.shifted(grid, direction) {
            Some(targets) => {
                self.relocate(grid, targets);
                true
            }
            None => false,
        }
    }
}

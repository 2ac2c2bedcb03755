//! Core types module - shared data structures and constants
//!
//! Everything here is plain data with no external dependencies, so the engine,
//! the terminal view and the input layer can all share it.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn anchor**: column 4, row 0 (the base tile of every piece)
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Default driver tick (~60 FPS) |
//! | `LOWER_PERIOD_MS` | 1200 | Time per forced lower |
//! | `SOFT_DROP_DIVISOR` | 8 | Soft drop lowers 8x faster |
//! | `SOFT_LOWER_PERIOD_MS` | 150 | Time per forced lower while soft dropping |
//! | `HARD_DROP_LEAD_MS` | 350 | Lead before the forced lower after a hard drop |
//! | `BREAK_DWELL_MS` | 200 | How long broken rows stay flashed |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{PieceKind, TileColor, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! assert_eq!(PieceKind::T.color(), TileColor::Purple);
//! assert_eq!(PieceKind::ALL.len(), 7);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Column of the base tile at spawn.
pub const SPAWN_X: u8 = 4;

/// Row of the base tile at spawn.
pub const SPAWN_Y: u8 = 0;

/// Default driver tick interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Time per forced lower at normal speed (1.2s).
pub const LOWER_PERIOD_MS: u32 = 1200;

/// Soft drop lowers this many times faster than normal.
pub const SOFT_DROP_DIVISOR: u32 = 8;

/// Time per forced lower while soft drop is held.
pub const SOFT_LOWER_PERIOD_MS: u32 = LOWER_PERIOD_MS / SOFT_DROP_DIVISOR;

/// After a hard drop the fall timer is set to `LOWER_PERIOD_MS - HARD_DROP_LEAD_MS`,
/// so the lock check follows almost immediately.
pub const HARD_DROP_LEAD_MS: u32 = 350;

/// How long broken rows stay flashed before they are collapsed.
pub const BREAK_DWELL_MS: u32 = 200;

/// Points per number of rows broken in one pass (index = row count).
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];


/// The seven tetromino piece kinds
///
/// Each kind has a fixed display color:
/// - **I**: Cyan
/// - **O**: Yellow
/// - **T**: Purple
/// - **S**: Green
/// - **Z**: Red
/// - **J**: Blue
/// - **L**: Orange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in a fixed order used for uniform random selection.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Display color painted into every cell the piece owns.
    pub fn color(&self) -> TileColor {
        match self {
            PieceKind::I => TileColor::Cyan,
            PieceKind::O => TileColor::Yellow,
            PieceKind::T => TileColor::Purple,
            PieceKind::S => TileColor::Green,
            PieceKind::Z => TileColor::Red,
            PieceKind::J => TileColor::Blue,
            PieceKind::L => TileColor::Orange,
        }
    }
}

/// Color stored in a grid cell.
///
/// `Background` is the empty sentinel. `Flash` marks a row that is about to break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileColor {
    #[default]
    Background,
    Flash,
    Cyan,
    Yellow,
    Purple,
    Green,
    Red,
    Blue,
    Orange,
}

impl TileColor {
    /// 24-bit RGB value used by renderers.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            TileColor::Background => (0, 0, 0),
            TileColor::Flash => (255, 255, 255),
            TileColor::Cyan => (0, 255, 255),
            TileColor::Yellow => (255, 255, 0),
            TileColor::Purple => (128, 0, 128),
            TileColor::Green => (0, 128, 0),
            TileColor::Red => (255, 0, 0),
            TileColor::Blue => (0, 0, 255),
            TileColor::Orange => (255, 165, 0),
        }
    }

    pub fn is_background(&self) -> bool {
        matches!(self, TileColor::Background)
    }
}

/// Compass direction used for neighbor lookups. `N` points toward row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::S,
        Direction::E,
        Direction::W,
        Direction::NE,
        Direction::NW,
        Direction::SE,
        Direction::SW,
    ];

    /// (dx, dy) step for this direction.
    pub fn offset(&self) -> (i8, i8) {
        match self {
            Direction::N => (0, -1),
            Direction::S => (0, 1),
            Direction::E => (1, 0),
            Direction::W => (-1, 0),
            Direction::NE => (1, -1),
            Direction::NW => (-1, -1),
            Direction::SE => (1, 1),
            Direction::SW => (-1, 1),
        }
    }
}

/// Player intents produced by the input layer.
///
/// Gameplay actions only accumulate; the state machine applies them on its next
/// falling tick. Session actions (`NewGame`, `ToggleLeaderboard`, `Quit`) are
/// handled by the session that owns the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    Rotate,
    MoveLeft,
    MoveRight,
    SoftDropStart,
    SoftDropStop,
    HardDrop,
    NewGame,
    ToggleLeaderboard,
    Quit,
}

impl GameAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Rotate => "rotate",
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDropStart => "softDropStart",
            GameAction::SoftDropStop => "softDropStop",
            GameAction::HardDrop => "hardDrop",
            GameAction::NewGame => "newGame",
            GameAction::ToggleLeaderboard => "toggleLeaderboard",
            GameAction::Quit => "quit",
        }
    }
}

/// One finished game as stored in the score log.
///
/// `stamp` is the `<year>-<month>-<day>::<hh>:<mm><AM|PM>` prefix of the line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScoreRecord {
    pub stamp: String,
    pub score: u32,
}

impl ScoreRecord {
    pub fn new(stamp: impl Into<String>, score: u32) -> Self {
        Self {
            stamp: stamp.into(),
            score,
        }
    }
}

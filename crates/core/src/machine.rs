//! Game state machine - sequences spawning, falling, and line breaks
//!
//! One call to [`GameStateMachine::tick`] evaluates exactly one transition:
//!
//! ```text
//! Waiting -> Falling -> BreakCheck -> BreakHandler -> (BreakCheck | Waiting)
//!    \-> GameOver (spawn blocked)
//! ```
//!
//! The machine owns the grid, the active piece and the input accumulators.
//! Input producers only add to the accumulators through
//! [`handle_action`](GameStateMachine::handle_action); the falling phase is the
//! only place that consumes them.

use crate::grid::Grid;
use crate::intents::InputIntents;
use crate::line_clear::{collapse_rows, detect_full_rows, flash_rows, reset_rows, score_for, BreakRows};
use crate::observer::GameObserver;
use crate::piece::Piece;
use crate::rng::{PieceSource, UniformPieces};
use crate::snapshot::GameSnapshot;
use crate::types::{
    GameAction, BREAK_DWELL_MS, HARD_DROP_LEAD_MS, LOWER_PERIOD_MS, SOFT_LOWER_PERIOD_MS,
};

/// Where the machine is in the spawn/fall/break cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Waiting,
    Falling,
    BreakCheck,
    BreakHandler,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Waiting => "waiting",
            Phase::Falling => "falling",
            Phase::BreakCheck => "breakCheck",
            Phase::BreakHandler => "breakHandler",
            Phase::GameOver => "gameOver",
        }
    }
}

pub struct GameStateMachine {
    grid: Grid,
    phase: Phase,
    active: Option<Piece>,
    pieces: Box<dyn PieceSource>,
    score: u32,
    fall_timer_ms: u32,
    break_timer_ms: u32,
    break_shown: bool,
    break_rows: BreakRows,
    intents: InputIntents,
}

impl GameStateMachine {
    /// New machine with uniform random pieces from `seed`.
    pub fn new(seed: u32) -> Self {
        Self::with_source(Box::new(UniformPieces::new(seed)))
    }

    pub fn with_source(pieces: Box<dyn PieceSource>) -> Self {
        Self {
            grid: Grid::new(),
            phase: Phase::Waiting,
            active: None,
            pieces,
            score: 0,
            fall_timer_ms: 0,
            break_timer_ms: 0,
            break_shown: false,
            break_rows: BreakRows::new(),
            intents: InputIntents::new(),
        }
    }

    /// Start from a prepared board instead of an empty one.
    pub fn with_grid(mut self, grid: Grid) -> Self {
        self.grid = grid;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct board access for scripted setups. Changes are reported on the next tick.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn intents(&self) -> &InputIntents {
        &self.intents
    }

    pub fn fall_timer_ms(&self) -> u32 {
        self.fall_timer_ms
    }

    pub fn break_rows(&self) -> &BreakRows {
        &self.break_rows
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Buffer a gameplay action for the next falling tick.
    ///
    /// Returns false for session actions, which the machine ignores.
    pub fn handle_action(&mut self, action: GameAction) -> bool {
        self.intents.record(action)
    }

    /// Clear the board and restart from `Waiting` with a zero score.
    pub fn new_game(&mut self, observer: &mut dyn GameObserver) {
        self.grid.clear_all();
        self.active = None;
        self.score = 0;
        self.fall_timer_ms = 0;
        self.break_timer_ms = 0;
        self.break_shown = false;
        self.break_rows.clear();
        self.intents = InputIntents::new();
        self.set_phase(Phase::Waiting);
        log::info!("new game");

        self.flush_cells(observer);
        observer.on_score_changed(self.score);
    }

    /// Advance the simulation by `elapsed_ms` and run one transition.
    pub fn tick(&mut self, elapsed_ms: u32, observer: &mut dyn GameObserver) {
        match self.phase {
            Phase::Waiting => self.spawn_next(observer),
            Phase::Falling => self.fall(elapsed_ms),
            Phase::BreakCheck => self.check_breaks(),
            Phase::BreakHandler => self.handle_breaks(elapsed_ms, observer),
            Phase::GameOver => {}
        }
        self.flush_cells(observer);
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_colors(&mut out.board);
        out.score = self.score;
        out.phase = self.phase;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::new();
        self.snapshot_into(&mut snap);
        snap
    }

    fn spawn_next(&mut self, observer: &mut dyn GameObserver) {
        let kind = self.pieces.next_kind();
        self.fall_timer_ms = 0;

        match Piece::spawn(kind, &mut self.grid) {
            Some(piece) if piece.can_lower(&self.grid) => {
                log::debug!("spawned {}", kind.as_str());
                self.active = Some(piece);
                self.set_phase(Phase::Falling);
            }
            spawned => {
                log::debug!("spawn of {} blocked (painted: {})", kind.as_str(), spawned.is_some());
                self.active = None;
                self.set_phase(Phase::GameOver);
                log::info!("game over, final score {}", self.score);
                self.flush_cells(observer);
                observer.on_game_over(self.score);
            }
        }
    }

    fn fall(&mut self, elapsed_ms: u32) {
        let Some(mut piece) = self.active else {
            self.set_phase(Phase::Waiting);
            return;
        };

        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);

        let intents = self.intents.take();
        for _ in 0..intents.rotate_count {
            piece.rotate(&mut self.grid);
        }
        for _ in 0..intents.x_delta.unsigned_abs() {
            if intents.x_delta < 0 {
                piece.move_left(&mut self.grid);
            } else {
                piece.move_right(&mut self.grid);
            }
        }
        if intents.hard_drop {
            let rows = piece.hard_drop(&mut self.grid);
            log::debug!("hard drop {} rows", rows);
            self.fall_timer_ms = LOWER_PERIOD_MS - HARD_DROP_LEAD_MS;
        }

        let period = if intents.soft_drop {
            SOFT_LOWER_PERIOD_MS
        } else {
            LOWER_PERIOD_MS
        };

        if self.fall_timer_ms > period {
            self.fall_timer_ms -= period;
            if piece.can_lower(&self.grid) {
                piece.lower(&mut self.grid);
            } else {
                // Locked: the painted cells are terrain from here on.
                self.active = None;
                self.set_phase(Phase::BreakCheck);
                return;
            }
        }

        self.active = Some(piece);
    }

    fn check_breaks(&mut self) {
        self.break_rows = detect_full_rows(&self.grid);
        self.break_timer_ms = 0;
        self.break_shown = false;
        self.set_phase(Phase::BreakHandler);
    }

    fn handle_breaks(&mut self, elapsed_ms: u32, observer: &mut dyn GameObserver) {
        if self.break_rows.is_empty() {
            self.set_phase(Phase::Waiting);
            return;
        }

        self.break_timer_ms = self.break_timer_ms.saturating_add(elapsed_ms);

        if !self.break_shown {
            flash_rows(&mut self.grid, &self.break_rows);
            let points = score_for(self.break_rows.len());
            self.score = self.score.saturating_add(points);
            self.break_shown = true;
            log::debug!(
                "break rows {:?} for {} points, score {}",
                self.break_rows.as_slice(),
                points,
                self.score
            );

            self.flush_cells(observer);
            observer.on_score_changed(self.score);
            return;
        }

        if self.break_timer_ms >= BREAK_DWELL_MS {
            reset_rows(&mut self.grid, &self.break_rows);
            collapse_rows(&mut self.grid, &self.break_rows);
            self.break_rows.clear();
            self.set_phase(Phase::BreakCheck);
        }
    }

    fn set_phase(&mut self, next: Phase) {
        if self.phase != next {
            log::debug!("phase {} -> {}", self.phase.as_str(), next.as_str());
        }
        self.phase = next;
    }

    fn flush_cells(&mut self, observer: &mut dyn GameObserver) {
        for change in self.grid.drain_changes() {
            observer.on_cell_changed(change.x, change.y, change.color);
        }
    }
}

impl Default for GameStateMachine {
    fn default() -> Self {
        Self::new(1)
    }
}

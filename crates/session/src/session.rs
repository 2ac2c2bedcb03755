//! One interactive play session: the state machine plus score persistence,
//! the leaderboard overlay and the new-game/quit controls.

use crate::config::SessionConfig;
use crate::core::{GameObserver, GameSnapshot, GameStateMachine};
use crate::scores::ScoreLog;
use crate::types::{GameAction, ScoreRecord, TileColor};

/// Collects what one tick changed so the session can react after it.
#[derive(Debug, Default)]
struct TickOutcome {
    cells_changed: u32,
    score: u32,
    finished: Option<u32>,
}

impl GameObserver for TickOutcome {
    fn on_cell_changed(&mut self, _x: u8, _y: u8, _color: TileColor) {
        self.cells_changed = self.cells_changed.saturating_add(1);
    }

    fn on_score_changed(&mut self, score: u32) {
        self.score = score;
    }

    fn on_game_over(&mut self, final_score: u32) {
        self.finished = Some(final_score);
    }
}

pub struct Session {
    machine: GameStateMachine,
    scores: ScoreLog,
    leaderboard_size: usize,
    leaderboard: Option<Vec<ScoreRecord>>,
    outcome: TickOutcome,
    games_finished: u32,
    quit: bool,
}

impl Session {
    pub fn new(config: &SessionConfig) -> Self {
        Self::with_machine(
            GameStateMachine::new(config.seed),
            ScoreLog::new(config.scores_path.clone()),
            config.leaderboard_size,
        )
    }

    pub fn with_machine(machine: GameStateMachine, scores: ScoreLog, leaderboard_size: usize) -> Self {
        Self {
            machine,
            scores,
            leaderboard_size,
            leaderboard: None,
            outcome: TickOutcome::default(),
            games_finished: 0,
            quit: false,
        }
    }

    pub fn machine(&self) -> &GameStateMachine {
        &self.machine
    }

    pub fn scores(&self) -> &ScoreLog {
        &self.scores
    }

    /// Shown leaderboard entries; `Some` means the game is paused.
    pub fn leaderboard(&self) -> Option<&[ScoreRecord]> {
        self.leaderboard.as_deref()
    }

    pub fn is_paused(&self) -> bool {
        self.leaderboard.is_some()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn games_finished(&self) -> u32 {
        self.games_finished
    }

    /// Score as last reported by the engine.
    pub fn displayed_score(&self) -> u32 {
        self.outcome.score
    }

    /// Cell changes reported since the last call.
    pub fn take_cell_changes(&mut self) -> u32 {
        std::mem::take(&mut self.outcome.cells_changed)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.machine.snapshot_into(out);
    }

    /// Apply one input action.
    ///
    /// Gameplay input is buffered in the machine; while the leaderboard is
    /// shown it is dropped, apart from soft drop releases.
    pub async fn handle_action(&mut self, action: GameAction) {
        match action {
            GameAction::Quit => {
                log::info!("quit requested");
                self.quit = true;
            }
            GameAction::NewGame => {
                self.leaderboard = None;
                self.machine.new_game(&mut self.outcome);
            }
            GameAction::ToggleLeaderboard => self.toggle_leaderboard().await,
            GameAction::SoftDropStop => {
                self.machine.handle_action(action);
            }
            _ if self.is_paused() => {}
            _ => {
                self.machine.handle_action(action);
            }
        }
    }

    /// Run one engine tick unless paused, then persist a finished game.
    pub async fn advance(&mut self, elapsed_ms: u32) {
        if self.is_paused() {
            return;
        }
        self.machine.tick(elapsed_ms, &mut self.outcome);

        if let Some(final_score) = self.outcome.finished.take() {
            self.games_finished += 1;
            self.save_score(final_score).await;
        }
    }

    async fn toggle_leaderboard(&mut self) {
        if self.leaderboard.take().is_some() {
            log::debug!("leaderboard closed, resuming");
            return;
        }
        let entries = match self.scores.leaderboard(self.leaderboard_size).await {
            Ok(entries) => entries,
            Err(e) => {
                log::error!("failed to load leaderboard: {:#}", e);
                Vec::new()
            }
        };
        log::debug!("leaderboard opened with {} entries", entries.len());
        self.leaderboard = Some(entries);
    }

    async fn save_score(&mut self, score: u32) {
        match self.scores.append_now(score).await {
            Ok(line) => log::info!("saved score line {:?} to {}", line, self.scores.path().display()),
            Err(e) => log::error!("failed to save score {}: {:#}", score, e),
        }
    }
}

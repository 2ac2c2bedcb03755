//! Buffered input intents.
//!
//! Input producers only ever add to these accumulators. The state machine
//! consumes them once per falling tick; `take` hands back everything buffered
//! and zeroes it, except the soft drop flag which lasts until the key is released.

use crate::types::GameAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputIntents {
    pub rotate_count: u32,
    /// Net horizontal steps; negative is left.
    pub x_delta: i32,
    pub soft_drop: bool,
    pub hard_drop: bool,
}

impl InputIntents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one gameplay action into the buffer. Returns false for actions
    /// that are not engine input (new game, leaderboard, quit).
    pub fn record(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Rotate => self.rotate_count = self.rotate_count.saturating_add(1),
            GameAction::MoveLeft => self.x_delta = self.x_delta.saturating_sub(1),
            GameAction::MoveRight => self.x_delta = self.x_delta.saturating_add(1),
            GameAction::SoftDropStart => self.soft_drop = true,
            GameAction::SoftDropStop => self.soft_drop = false,
            GameAction::HardDrop => self.hard_drop = true,
            GameAction::NewGame | GameAction::ToggleLeaderboard | GameAction::Quit => {
                return false
            }
        }
        true
    }

    /// Return the buffered intents and reset rotate count, x delta and hard drop.
    pub fn take(&mut self) -> InputIntents {
        let taken = *self;
        self.rotate_count = 0;
        self.x_delta = 0;
        self.hard_drop = false;
        taken
    }

    pub fn is_idle(&self) -> bool {
        self.rotate_count == 0 && self.x_delta == 0 && !self.hard_drop
    }
}

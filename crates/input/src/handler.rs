//! Key event handler for terminal environments.
//!
//! Turns crossterm press/repeat/release events into game actions and keeps
//! track of whether soft drop is held. Many terminals never report key
//! releases, so a held soft drop is released automatically after a quiet
//! period with no press or repeat of the soft drop key.

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::{handle_key_event, is_soft_drop_key};
use crate::types::GameAction;

// Longer than a typical terminal's initial auto-repeat delay, so holding the
// key does not flicker between start and stop.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 550;

#[derive(Debug, Clone)]
pub struct InputHandler {
    soft_drop_held: bool,
    idle_ms: u32,
    key_release_timeout_ms: u32,
    /// Set once the terminal has sent a real release; auto-release is then off.
    saw_release: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            soft_drop_held: false,
            idle_ms: 0,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            saw_release: false,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn soft_drop_held(&self) -> bool {
        self.soft_drop_held
    }

    /// Translate one key event. Returns the action to forward, if any.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<GameAction> {
        match key.kind {
            KeyEventKind::Release => {
                self.saw_release = true;
                if is_soft_drop_key(key.code) {
                    return self.release_soft_drop();
                }
                None
            }
            KeyEventKind::Press | KeyEventKind::Repeat => {
                match handle_key_event(key)? {
                    GameAction::SoftDropStart => {
                        self.idle_ms = 0;
                        if self.soft_drop_held {
                            return None;
                        }
                        self.soft_drop_held = true;
                        Some(GameAction::SoftDropStart)
                    }
                    // The session loses soft drop on both; a held key must start it again.
                    action @ (GameAction::NewGame | GameAction::ToggleLeaderboard) => {
                        self.reset();
                        Some(action)
                    }
                    action => Some(action),
                }
            }
        }
    }

    /// Advance the auto-release clock. Returns `SoftDropStop` when it fires.
    pub fn update(&mut self, elapsed_ms: u32) -> Option<GameAction> {
        if !self.soft_drop_held || self.saw_release {
            return None;
        }
        self.idle_ms = self.idle_ms.saturating_add(elapsed_ms);
        if self.idle_ms > self.key_release_timeout_ms {
            log::debug!("soft drop auto-released after {}ms", self.idle_ms);
            return self.release_soft_drop();
        }
        None
    }

    /// Forget a held soft drop. Called on new game and leaderboard toggles.
    pub fn reset(&mut self) {
        self.soft_drop_held = false;
        self.idle_ms = 0;
    }

    fn release_soft_drop(&mut self) -> Option<GameAction> {
        if !self.soft_drop_held {
            return None;
        }
        self.soft_drop_held = false;
        self.idle_ms = 0;
        Some(GameAction::SoftDropStop)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_soft_drop_press_and_release() {
        let mut handler = InputHandler::new();

        assert_eq!(
            handler.handle_key(key(KeyCode::Down, KeyEventKind::Press)),
            Some(GameAction::SoftDropStart)
        );
        assert!(handler.soft_drop_held());

        // Repeats keep it held without re-sending start.
        assert_eq!(handler.handle_key(key(KeyCode::Down, KeyEventKind::Repeat)), None);

        assert_eq!(
            handler.handle_key(key(KeyCode::Down, KeyEventKind::Release)),
            Some(GameAction::SoftDropStop)
        );
        assert!(!handler.soft_drop_held());
        assert_eq!(handler.handle_key(key(KeyCode::Down, KeyEventKind::Release)), None);
    }

    #[test]
    fn test_auto_release_without_release_events() {
        let mut handler = InputHandler::new().with_key_release_timeout_ms(100);
        handler.handle_key(key(KeyCode::Char('s'), KeyEventKind::Press));

        assert_eq!(handler.update(60), None);
        // A repeat press restarts the quiet period.
        handler.handle_key(key(KeyCode::Char('s'), KeyEventKind::Press));
        assert_eq!(handler.update(60), None);
        assert!(handler.soft_drop_held());

        assert_eq!(handler.update(60), Some(GameAction::SoftDropStop));
        assert!(!handler.soft_drop_held());
        assert_eq!(handler.update(1000), None);
    }

    #[test]
    fn test_real_release_disables_timeout() {
        let mut handler = InputHandler::new().with_key_release_timeout_ms(100);
        handler.handle_key(key(KeyCode::Left, KeyEventKind::Release));
        handler.handle_key(key(KeyCode::Down, KeyEventKind::Press));

        assert_eq!(handler.update(5000), None);
        assert!(handler.soft_drop_held());
    }

    #[test]
    fn test_new_game_and_leaderboard_forget_held_soft_drop() {
        for toggle in [KeyCode::Char('q'), KeyCode::Char('e')] {
            let mut handler = InputHandler::new();
            assert_eq!(
                handler.handle_key(key(KeyCode::Char('s'), KeyEventKind::Press)),
                Some(GameAction::SoftDropStart)
            );

            assert!(handler.handle_key(key(toggle, KeyEventKind::Press)).is_some());
            assert!(!handler.soft_drop_held());

            // Still physically held: the next repeat starts soft drop again.
            assert_eq!(
                handler.handle_key(key(KeyCode::Char('s'), KeyEventKind::Repeat)),
                Some(GameAction::SoftDropStart)
            );
            assert!(handler.soft_drop_held());
        }
    }

    #[test]
    fn test_other_keys_pass_through() {
        let mut handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key(KeyCode::Left, KeyEventKind::Press)),
            Some(GameAction::MoveLeft)
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Left, KeyEventKind::Repeat)),
            Some(GameAction::MoveLeft)
        );
        assert_eq!(handler.handle_key(key(KeyCode::Left, KeyEventKind::Release)), None);
        assert_eq!(
            handler.handle_key(key(KeyCode::Char(' '), KeyEventKind::Press)),
            Some(GameAction::HardDrop)
        );
    }
}

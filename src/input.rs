use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::time::Duration;

use crate::session::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Drag,
    Up,
}

/// A mouse button event in terminal cell coordinates. Each mouse button is its
/// own pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub col: u16,
    pub row: u16,
    pub pointer: u8,
}

/// Represents semantic game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    Fire,
    Restart,
    Quit,
    Pointer(PointerEvent),
}

/// Tracks the state of keys that can be held down for continuous input
#[derive(Debug, Default)]
struct KeyState {
    left: bool,
    right: bool,
    fire: bool,
}

/// Manages input polling and translates raw terminal events into game actions
pub struct InputManager {
    key_state: KeyState,
    oneshot_actions: Vec<InputAction>,
    /// Terminal reports key releases. Without them a press only lasts one frame.
    release_events: bool,
}

impl InputManager {
    pub fn new(release_events: bool) -> Self {
        Self {
            key_state: KeyState::default(),
            oneshot_actions: Vec::new(),
            release_events,
        }
    }

    /// Polls for all pending events without blocking
    /// Should be called once per frame before getting actions
    pub fn poll_events(&mut self, game_state: GameState) -> color_eyre::Result<()> {
        self.oneshot_actions.clear();
        while event::poll(Duration::from_millis(0))? {
            let event = event::read()?;
            self.handle_event(event, game_state);
        }
        Ok(())
    }

    pub fn handle_event(&mut self, event: Event, game_state: GameState) {
        match event {
            Event::Key(key_event) => self.handle_key_event(key_event, game_state),
            Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event),
            // The app samples the terminal size itself every frame
            Event::Resize(_, _) => {}
            _ => {}
        }
    }

    fn handle_key_event(&mut self, key_event: KeyEvent, game_state: GameState) {
        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event, game_state),
            KeyEventKind::Release => self.handle_key_release(key_event.code),
            KeyEventKind::Repeat => {}
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, game_state: GameState) {
        // Quit works in any state
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        match game_state {
            GameState::GameOver => {
                if matches!(key_event.code, KeyCode::Char('r') | KeyCode::Char('R')) {
                    self.oneshot_actions.push(InputAction::Restart);
                }
            }
            GameState::Playing => match key_event.code {
                KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                    self.key_state.left = true;
                    self.key_state.right = false;
                }
                KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                    self.key_state.right = true;
                    self.key_state.left = false;
                }
                KeyCode::Char(' ') | KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                    self.key_state.fire = true;
                }
                _ => {}
            },
        }
    }

    fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = false;
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = false;
            }
            KeyCode::Char(' ') | KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                self.key_state.fire = false;
            }
            _ => {}
        }
    }

    fn handle_mouse_event(&mut self, mouse_event: MouseEvent) {
        let (phase, button) = match mouse_event.kind {
            MouseEventKind::Down(button) => (PointerPhase::Down, button),
            MouseEventKind::Drag(button) => (PointerPhase::Drag, button),
            MouseEventKind::Up(button) => (PointerPhase::Up, button),
            _ => return,
        };
        let pointer = match button {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
            MouseButton::Middle => 2,
        };
        self.oneshot_actions.push(InputAction::Pointer(PointerEvent {
            phase,
            col: mouse_event.column,
            row: mouse_event.row,
            pointer,
        }));
    }

    /// Returns all actions for this frame (both continuous and one-shot)
    /// Must be called after poll_events()
    pub fn take_actions(&mut self, game_state: GameState) -> Vec<InputAction> {
        let mut actions = std::mem::take(&mut self.oneshot_actions);

        if game_state == GameState::Playing {
            if self.key_state.left {
                actions.push(InputAction::MoveLeft);
            }
            if self.key_state.right {
                actions.push(InputAction::MoveRight);
            }
            if self.key_state.fire {
                actions.push(InputAction::Fire);
            }
        }

        if !self.release_events || game_state != GameState::Playing {
            self.key_state = KeyState::default();
        }

        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_held_key_repeats_until_release() {
        let mut input = InputManager::new(true);
        input.handle_event(key(KeyCode::Left, KeyEventKind::Press), GameState::Playing);
        assert_eq!(input.take_actions(GameState::Playing), vec![InputAction::MoveLeft]);
        assert_eq!(input.take_actions(GameState::Playing), vec![InputAction::MoveLeft]);

        input.handle_event(key(KeyCode::Left, KeyEventKind::Release), GameState::Playing);
        assert!(input.take_actions(GameState::Playing).is_empty());
    }

    #[test]
    fn test_press_is_a_tap_without_release_events() {
        let mut input = InputManager::new(false);
        input.handle_event(key(KeyCode::Char(' '), KeyEventKind::Press), GameState::Playing);
        assert_eq!(input.take_actions(GameState::Playing), vec![InputAction::Fire]);
        assert!(input.take_actions(GameState::Playing).is_empty());
    }

    #[test]
    fn test_opposite_direction_replaces() {
        let mut input = InputManager::new(true);
        input.handle_event(key(KeyCode::Char('a'), KeyEventKind::Press), GameState::Playing);
        input.handle_event(key(KeyCode::Char('d'), KeyEventKind::Press), GameState::Playing);
        assert_eq!(input.take_actions(GameState::Playing), vec![InputAction::MoveRight]);
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let mut input = InputManager::new(true);
        input.handle_event(key(KeyCode::Char('r'), KeyEventKind::Press), GameState::Playing);
        assert!(input.take_actions(GameState::Playing).is_empty());

        input.handle_event(key(KeyCode::Char('r'), KeyEventKind::Press), GameState::GameOver);
        assert_eq!(input.take_actions(GameState::GameOver), vec![InputAction::Restart]);
    }

    #[test]
    fn test_quit_keys() {
        let mut input = InputManager::new(true);
        input.handle_event(key(KeyCode::Esc, KeyEventKind::Press), GameState::Playing);
        input.handle_event(
            Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            GameState::GameOver,
        );
        assert_eq!(
            input.take_actions(GameState::GameOver),
            vec![InputAction::Quit, InputAction::Quit]
        );
    }

    #[test]
    fn test_mouse_buttons_become_pointers() {
        let mut input = InputManager::new(true);
        input.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 3, 4), GameState::Playing);
        input.handle_event(mouse(MouseEventKind::Up(MouseButton::Right), 5, 6), GameState::Playing);
        input.handle_event(mouse(MouseEventKind::Moved, 1, 1), GameState::Playing);

        assert_eq!(
            input.take_actions(GameState::Playing),
            vec![
                InputAction::Pointer(PointerEvent {
                    phase: PointerPhase::Down,
                    col: 3,
                    row: 4,
                    pointer: 0,
                }),
                InputAction::Pointer(PointerEvent {
                    phase: PointerPhase::Up,
                    col: 5,
                    row: 6,
                    pointer: 1,
                }),
            ]
        );
    }

    #[test]
    fn test_held_keys_dropped_when_game_ends() {
        let mut input = InputManager::new(true);
        input.handle_event(key(KeyCode::Right, KeyEventKind::Press), GameState::Playing);
        assert!(input.take_actions(GameState::GameOver).is_empty());
        assert!(input.take_actions(GameState::Playing).is_empty());
    }
}

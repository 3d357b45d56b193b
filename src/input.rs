use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

/// Semantic input events recognized by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Toggle,
    Randomize,
    ChanceUp,
    ChanceDown,
    Run,
    End,
    Exit,
    SpeedUp,
    SpeedDown,
    None,
}

/// Source of semantic input events.
pub trait InputSource {
    /// Reads the next event. A blocking read suspends until a key arrives;
    /// a non-blocking read returns `InputEvent::None` when nothing is
    /// pending. Unrecognized keys map to `InputEvent::None`.
    fn read_event(&mut self, blocking: bool) -> io::Result<InputEvent>;
}

/// Keyboard input backed by the terminal event stream.
pub struct TerminalInput;

impl TerminalInput {
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for TerminalInput {
    fn read_event(&mut self, blocking: bool) -> io::Result<InputEvent> {
        if !blocking && !event::poll(Duration::ZERO)? {
            return Ok(InputEvent::None);
        }
        match event::read()? {
            // key releases carry no meaning here, repeats act like presses
            Event::Key(key) if key.kind != KeyEventKind::Release => Ok(map_key(key.code)),
            _ => Ok(InputEvent::None),
        }
    }
}

fn map_key(code: KeyCode) -> InputEvent {
    match code {
        KeyCode::Up => InputEvent::MoveUp,
        KeyCode::Down => InputEvent::MoveDown,
        KeyCode::Left => InputEvent::MoveLeft,
        KeyCode::Right => InputEvent::MoveRight,
        KeyCode::Char('f') => InputEvent::Toggle,
        KeyCode::Char('v') => InputEvent::Randomize,
        KeyCode::Char('c') => InputEvent::ChanceUp,
        KeyCode::Char('x') => InputEvent::ChanceDown,
        KeyCode::Char('r') => InputEvent::Run,
        KeyCode::Char('e') => InputEvent::End,
        KeyCode::F(1) => InputEvent::Exit,
        _ => InputEvent::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(map_key(KeyCode::Up), InputEvent::MoveUp);
        assert_eq!(map_key(KeyCode::Left), InputEvent::MoveLeft);
        assert_eq!(map_key(KeyCode::Char('f')), InputEvent::Toggle);
        assert_eq!(map_key(KeyCode::Char('v')), InputEvent::Randomize);
        assert_eq!(map_key(KeyCode::Char('c')), InputEvent::ChanceUp);
        assert_eq!(map_key(KeyCode::Char('x')), InputEvent::ChanceDown);
        assert_eq!(map_key(KeyCode::Char('r')), InputEvent::Run);
        assert_eq!(map_key(KeyCode::Char('e')), InputEvent::End);
        assert_eq!(map_key(KeyCode::F(1)), InputEvent::Exit);
    }

    #[test]
    fn test_unrecognized_keys_are_ignored() {
        assert_eq!(map_key(KeyCode::Char('z')), InputEvent::None);
        assert_eq!(map_key(KeyCode::Esc), InputEvent::None);
        assert_eq!(map_key(KeyCode::Enter), InputEvent::None);
    }
}

//! Key mapping from terminal events to board actions.

use clisweeper_core::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What the session loop should do with a key press.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Play(Action),
    NewGame,
    Exit,
}

/// Map keyboard input to a command.
///
/// `q` forfeits a running game and leaves once the game is over.
pub fn map_key(key: KeyEvent, finished: bool) -> Option<Command> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Command::Exit);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc if finished => Some(Command::Exit),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Play(Action::Quit)),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::NewGame),
        _ if finished => None,
        _ => map_action(key.code).map(Command::Play),
    }
}

fn map_action(code: KeyCode) -> Option<Action> {
    match code {
        // Movement
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => Some(Action::MoveDown),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => Some(Action::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => Some(Action::MoveRight),

        // Marks
        KeyCode::Char('f') | KeyCode::Char('F') => Some(Action::ToggleFlag),
        KeyCode::Char('g') | KeyCode::Char('G') => Some(Action::ToggleQuestion),

        KeyCode::Char(' ') | KeyCode::Enter => Some(Action::Reveal),

        _ => None,
    }
}

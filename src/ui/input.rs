//! Keyboard event mapping (Input -> Action)
//!
//! Translates key presses into Actions based on the current mode

use crossterm::event::KeyCode;

use super::actions::Action;
use super::state::AppMode;

/// Map a key press to an Action for the current mode
pub fn get_action(mode: &AppMode, key: KeyCode) -> Option<Action> {
    match mode {
        AppMode::Browse => match key {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveSelectionDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveSelectionUp),
            KeyCode::Char('a') => Some(Action::StartDonation),
            KeyCode::Char('/') | KeyCode::Char('s') => Some(Action::StartSearch),
            KeyCode::Char('g') | KeyCode::Enter => Some(Action::FetchDetails),
            KeyCode::Char('d') => Some(Action::StartCancelDonation),
            _ => None,
        },
        AppMode::Donating | AppMode::Details => match key {
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Tab => Some(Action::NextField),
            KeyCode::Left | KeyCode::Right => Some(Action::CycleKind),
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        },
        AppMode::Searching => match key {
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        },
        AppMode::Confirm(_) => match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::Submit),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::Cancel),
            _ => None,
        },
    }
}

use crossterm::event::KeyCode;

use crate::tui::component::{Action, SharedState};
use crate::tui::tabs::Tab;
use crate::tui::tabs::home::state::HomeState;

pub fn handle_key(_state: &mut HomeState, key: KeyCode, _shared: &SharedState) -> Option<Action> {
    match key {
        KeyCode::Enter | KeyCode::Char('c') => Some(Action::SelectTab(Tab::Config)),
        _ => None,
    }
}

use crossterm::event::KeyCode;
use log::warn;

use crate::tui::app::events::ClickTarget;
use crate::tui::component::{Action, ScrollDirection, SharedState};
use crate::tui::map::MapListener;
use crate::tui::tabs::config::modal::events as modal_events;
use crate::tui::tabs::config::state::{ConfigState, FormField};

pub fn handle_key(state: &mut ConfigState, key: KeyCode, _shared: &SharedState) -> Option<Action> {
    if state.modal.show {
        let (action, edit) = modal_events::handle_modal_key(&mut state.modal, key);
        if let Some(edit) = edit {
            if let Err(e) = state.apply_edit(edit.field, &edit.text) {
                warn!("Rejected {} input {:?}: {}", edit.field.label(), edit.text, e);
                return Some(Action::ShowToast {
                    message: format!("{}: {}", edit.field.label(), e),
                    is_error: true,
                });
            }
        }
        return action.or(Some(Action::Consumed));
    }

    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            state.focus_previous();
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.focus_next();
            None
        }
        KeyCode::Left | KeyCode::Char('h') => {
            state.adjust(-1);
            None
        }
        KeyCode::Right | KeyCode::Char('l') => {
            state.adjust(1);
            None
        }
        KeyCode::Char(' ') => {
            state.toggle();
            None
        }
        KeyCode::Enter => {
            if !state.begin_edit() {
                state.toggle();
            }
            None
        }
        KeyCode::Char('s') => {
            let index = state.save();
            Some(Action::ShowToast {
                message: format!("Trigger #{} saved", index + 1),
                is_error: false,
            })
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            let index = state.remove_selected()?;
            Some(Action::ShowToast {
                message: format!("Trigger #{} removed", index + 1),
                is_error: false,
            })
        }
        KeyCode::Char(']') => {
            state.select_next_saved();
            None
        }
        KeyCode::Char('[') => {
            state.select_previous_saved();
            None
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            state.zoom_in();
            None
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            state.zoom_out();
            None
        }
        KeyCode::Char('H') => {
            state.pan(-1, 0);
            None
        }
        KeyCode::Char('L') => {
            state.pan(1, 0);
            None
        }
        KeyCode::Char('K') => {
            state.pan(0, -1);
            None
        }
        KeyCode::Char('J') => {
            state.pan(0, 1);
            None
        }
        KeyCode::Char('c') => {
            state.center_on_marker();
            None
        }
        KeyCode::Char('v') => {
            state.show_json = !state.show_json;
            None
        }
        _ => None,
    }
}

pub fn handle_scroll(state: &mut ConfigState, direction: ScrollDirection) -> Option<Action> {
    if state.modal.show {
        return None;
    }
    match direction {
        ScrollDirection::Up => state.select_previous_saved(),
        ScrollDirection::Down => state.select_next_saved(),
    }
    None
}

pub fn handle_click_target(state: &mut ConfigState, target: ClickTarget) -> Option<Action> {
    if state.modal.show {
        return None;
    }
    match target {
        ClickTarget::Field(field) => {
            state.set_focus(field);
            if matches!(field, FormField::Repetition | FormField::AllDay) {
                state.toggle();
            }
        }
        ClickTarget::Day(day) => state.toggle_day(day),
        ClickTarget::Radius(meters) => {
            state.set_focus(FormField::Radius);
            state.draft.set_radius(meters);
        }
        ClickTarget::SavedRow(index) => state.select_saved(index),
        ClickTarget::Key(_) => {}
    }
    None
}

pub fn handle_map_click(
    state: &mut ConfigState,
    listener: &MapListener,
    x: u16,
    y: u16,
) -> Option<Action> {
    if state.modal.show {
        return None;
    }
    listener.click(x, y, |position| state.set_position(position));
    None
}

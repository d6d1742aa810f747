use crossterm::event::KeyCode;

use crate::tui::component::Action;
use crate::tui::tabs::config::modal::state::EditModalState;
use crate::tui::tabs::config::state::FormField;

const MAX_INPUT_LEN: usize = 32;

/// Typed text to be parsed and applied by the caller.
pub struct ModalEditResult {
    pub field: FormField,
    pub text: String,
}

/// Returns (Option<Action>, Option<ModalEditResult>).
/// Every key is consumed while the modal is open.
pub fn handle_modal_key(
    modal: &mut EditModalState,
    key: KeyCode,
) -> (Option<Action>, Option<ModalEditResult>) {
    match key {
        KeyCode::Esc => {
            modal.close();
            (Some(Action::Consumed), None)
        }
        KeyCode::Enter => {
            let result = ModalEditResult {
                field: modal.field,
                text: modal.buffer.trim().to_string(),
            };
            modal.close();
            (Some(Action::Consumed), Some(result))
        }
        KeyCode::Backspace => {
            modal.buffer.pop();
            (Some(Action::Consumed), None)
        }
        KeyCode::Char(c) if !c.is_control() => {
            if modal.buffer.chars().count() < MAX_INPUT_LEN {
                modal.buffer.push(c);
            }
            (Some(Action::Consumed), None)
        }
        _ => (Some(Action::Consumed), None),
    }
}

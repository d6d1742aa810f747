use crate::tui::tabs::config::state::FormField;

/// Text input for one form field.
#[derive(Debug)]
pub struct EditModalState {
    pub show: bool,
    pub field: FormField,
    pub buffer: String,
}

impl EditModalState {
    pub fn new() -> Self {
        Self {
            show: false,
            field: FormField::Duration,
            buffer: String::new(),
        }
    }

    pub fn open(&mut self, field: FormField, text: String) {
        self.field = field;
        self.buffer = text;
        self.show = true;
    }

    pub fn close(&mut self) {
        self.show = false;
        self.buffer.clear();
    }
}

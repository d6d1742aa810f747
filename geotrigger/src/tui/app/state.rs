use std::path::Path;

use geotrigger_core::config::{ConfigError, Settings};

use crate::tui::app::events::MouseState;
use crate::tui::component::SharedState;
use crate::tui::tabs::{ConfigState, HomeState, Tab};
use crate::tui::toast::{ToastLevel, ToastState};

/// Main application state
pub struct App {
    pub running: bool,
    pub force_redraw: bool,
    pub current_tab: Tab,
    pub home: HomeState,
    pub config: ConfigState,
    pub toast: ToastState,
    pub mouse_state: MouseState,
}

impl App {
    pub fn new(settings: Settings, settings_path: &Path, settings_err: Option<ConfigError>) -> Self {
        let mut toast = ToastState::new();
        if let Some(e) = settings_err {
            toast.push(e.user_message().to_string(), ToastLevel::Error);
        }

        Self {
            running: true,
            force_redraw: false,
            current_tab: Tab::Home,
            home: HomeState::new(settings_path),
            config: ConfigState::from_settings(&settings),
            toast,
            mouse_state: MouseState::default(),
        }
    }

    pub fn shared_state(&self) -> SharedState {
        SharedState {
            current_tab: self.current_tab,
            saved_count: self.config.saved.len(),
            marker: self.config.draft.position(),
        }
    }

    pub fn tick(&mut self) {
        self.toast.tick();
    }

    pub fn show_toast(&mut self, message: String, is_error: bool) {
        let level = if is_error {
            ToastLevel::Error
        } else {
            ToastLevel::Success
        };
        self.toast.push(message, level);
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn next_tab(&mut self) {
        self.select_tab(self.current_tab.next());
    }

    pub fn previous_tab(&mut self) {
        self.select_tab(self.current_tab.previous());
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
        self.force_redraw = true;
    }
}

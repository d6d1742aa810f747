pub mod events;
pub mod modal;
pub mod render;
pub mod state;

pub use state::ConfigState;

use crossterm::event::KeyCode;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::tui::app::events::{ClickTarget, MouseState};
use crate::tui::component::{Action, ScrollDirection, SharedState, TabComponent};
use crate::tui::map::MapListener;

impl TabComponent for ConfigState {
    fn render(&mut self, f: &mut Frame, area: Rect, shared: &SharedState, mouse: &mut MouseState) {
        render::render(self, f, area, shared, mouse);
    }

    fn handle_key(&mut self, key: KeyCode, shared: &SharedState) -> Option<Action> {
        events::handle_key(self, key, shared)
    }

    fn handle_scroll(&mut self, direction: ScrollDirection) -> Option<Action> {
        events::handle_scroll(self, direction)
    }

    fn handle_click_target(&mut self, target: ClickTarget) -> Option<Action> {
        events::handle_click_target(self, target)
    }

    fn handle_map_click(&mut self, listener: &MapListener, x: u16, y: u16) -> Option<Action> {
        events::handle_map_click(self, listener, x, y)
    }
}

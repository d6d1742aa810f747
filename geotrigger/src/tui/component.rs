use crossterm::event::KeyCode;
use ratatui::Frame;
use ratatui::layout::Rect;

use geotrigger_core::trigger::LatLng;

use crate::tui::app::events::{ClickTarget, MouseState};
use crate::tui::map::MapListener;
use crate::tui::tabs::Tab;

/// Read-only shared state passed to tab components (Copy to avoid borrow conflicts)
#[derive(Debug, Clone, Copy)]
pub struct SharedState {
    pub current_tab: Tab,
    pub saved_count: usize,
    pub marker: LatLng,
}

/// Scroll direction for mouse wheel events
pub enum ScrollDirection {
    Up,
    Down,
}

/// Actions that a tab component can return to request App-level operations
pub enum Action {
    Quit,
    NextTab,
    PreviousTab,
    SelectTab(Tab),
    ShowToast { message: String, is_error: bool },
    Consumed,
}

/// Trait that all tab components must implement
pub trait TabComponent {
    fn render(&mut self, f: &mut Frame, area: Rect, shared: &SharedState, mouse: &mut MouseState);
    fn handle_key(&mut self, key: KeyCode, shared: &SharedState) -> Option<Action>;

    fn handle_scroll(&mut self, _direction: ScrollDirection) -> Option<Action> {
        None
    }

    /// Click on an area the tab registered with a non-key target.
    fn handle_click_target(&mut self, _target: ClickTarget) -> Option<Action> {
        None
    }

    fn handle_map_click(&mut self, _listener: &MapListener, _x: u16, _y: u16) -> Option<Action> {
        None
    }
}

pub fn next_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match current {
        Some(i) if i + 1 < len => i + 1,
        Some(i) => i.min(len - 1),
        None => 0,
    })
}

pub fn prev_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match current {
        Some(i) => i.min(len - 1).saturating_sub(1),
        None => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_prev_index() {
        assert_eq!(next_index(None, 0), None);
        assert_eq!(next_index(None, 3), Some(0));
        assert_eq!(next_index(Some(1), 3), Some(2));
        assert_eq!(next_index(Some(2), 3), Some(2));
        assert_eq!(prev_index(Some(0), 3), Some(0));
        assert_eq!(prev_index(Some(2), 3), Some(1));
        assert_eq!(prev_index(Some(7), 3), Some(1));
        assert_eq!(prev_index(None, 0), None);
    }
}

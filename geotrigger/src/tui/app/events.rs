use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use ratatui::text::Span;
use unicode_width::UnicodeWidthStr;

use geotrigger_core::trigger::Weekday;

use crate::tui::app::state::App;
use crate::tui::component::{Action, ScrollDirection, TabComponent};
use crate::tui::map::MapListener;
use crate::tui::tabs::Tab;
use crate::tui::tabs::config::state::FormField;

/// What a registered click area stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Key(KeyCode),
    Field(FormField),
    Day(Weekday),
    /// One cell of the radius slider, carrying the meters it stands for.
    Radius(u16),
    SavedRow(usize),
}

pub enum ClickResult {
    Target(ClickTarget),
    Map(MapListener),
    PassThrough,
}

/// Represents a clickable area with its associated target
#[derive(Debug, Clone)]
pub struct ClickableArea {
    pub rect: Rect,
    pub target: ClickTarget,
}

/// Click areas registered by the current frame
#[derive(Default)]
pub struct MouseState {
    areas: Vec<ClickableArea>,
    map: Option<MapListener>,
}

impl MouseState {
    /// Drops every registration, the map listener included.
    pub fn clear(&mut self) {
        self.areas.clear();
        self.map = None;
    }

    pub fn add(&mut self, rect: Rect, action: KeyCode) {
        self.add_target(rect, ClickTarget::Key(action));
    }

    pub fn add_target(&mut self, rect: Rect, target: ClickTarget) {
        self.areas.push(ClickableArea { rect, target });
    }

    pub fn listen_map(&mut self, listener: MapListener) {
        self.map = Some(listener);
    }

    pub fn map_listener(&self) -> Option<&MapListener> {
        self.map.as_ref()
    }

    pub fn find_at(&self, x: u16, y: u16) -> Option<&ClickTarget> {
        let pos = Position { x, y };
        self.areas
            .iter()
            .find(|area| area.rect.contains(pos))
            .map(|area| &area.target)
    }

    /// Register click areas from a list of (spans, optional key) items,
    /// automatically computing x positions from span widths.
    /// Returns the flattened spans for rendering.
    pub fn add_shortcuts<'a>(
        &mut self,
        items: Vec<(Vec<Span<'a>>, Option<KeyCode>)>,
        start_x: u16,
        y: u16,
    ) -> Vec<Span<'a>> {
        let mut x = start_x;
        let mut all_spans = Vec::new();
        for (spans, key) in items {
            let width: u16 = spans.iter().map(|s| s.content.width() as u16).sum();
            if let Some(key) = key {
                self.add(Rect::new(x, y, width, 1), key);
            }
            x += width;
            all_spans.extend(spans);
        }
        all_spans
    }

    pub fn resolve_click(&self, x: u16, y: u16) -> ClickResult {
        if let Some(target) = self.find_at(x, y) {
            ClickResult::Target(*target)
        } else if let Some(listener) = self.map.filter(|l| l.contains(x, y)) {
            ClickResult::Map(listener)
        } else {
            ClickResult::PassThrough
        }
    }
}

// ─────────────────────────────────────────────────────────────
// Common key handling
// ─────────────────────────────────────────────────────────────

/// Handles common keys shared across all tabs (quit, tab switch, number keys).
/// Returns Some(Action) if a common key was handled.
fn handle_common_key(key: KeyCode) -> Option<Action> {
    if let Some(tab) = Tab::from_key(key) {
        return Some(Action::SelectTab(tab));
    }
    match key {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Tab => Some(Action::NextTab),
        KeyCode::BackTab => Some(Action::PreviousTab),
        _ => None,
    }
}

// ─────────────────────────────────────────────────────────────
// Event handling
// ─────────────────────────────────────────────────────────────

pub fn handle_event(
    app: &mut App,
    maybe_event: Option<Result<Event, std::io::Error>>,
) -> Result<(), std::io::Error> {
    match maybe_event {
        Some(Ok(Event::Key(key))) if key.kind != KeyEventKind::Release => {
            handle_key(app, key.code)
        }
        Some(Ok(Event::Mouse(mouse))) => handle_mouse(app, mouse),
        Some(Err(e)) => return Err(e),
        _ => {}
    }
    Ok(())
}

pub fn handle_key(app: &mut App, key: KeyCode) {
    // 1. Let current tab handle first
    let shared = app.shared_state();
    let action = match app.current_tab {
        Tab::Home => app.home.handle_key(key, &shared),
        Tab::Config => app.config.handle_key(key, &shared),
    };

    if let Some(action) = action {
        process_action(app, action);
        return;
    }

    // 2. Common keys (only reached if tab didn't handle)
    if let Some(action) = handle_common_key(key) {
        process_action(app, action);
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let x = mouse.column;
    let y = mouse.row;

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => match app.mouse_state.resolve_click(x, y) {
            ClickResult::Target(ClickTarget::Key(key)) => handle_key(app, key),
            ClickResult::Target(target) => dispatch_target(app, target),
            ClickResult::Map(listener) => dispatch_map_click(app, &listener, x, y),
            ClickResult::PassThrough => {}
        },
        MouseEventKind::ScrollUp => dispatch_scroll(app, ScrollDirection::Up),
        MouseEventKind::ScrollDown => dispatch_scroll(app, ScrollDirection::Down),
        _ => {}
    }
}

fn dispatch_target(app: &mut App, target: ClickTarget) {
    let action = match app.current_tab {
        Tab::Home => app.home.handle_click_target(target),
        Tab::Config => app.config.handle_click_target(target),
    };
    if let Some(action) = action {
        process_action(app, action);
    }
}

fn dispatch_map_click(app: &mut App, listener: &MapListener, x: u16, y: u16) {
    let action = match app.current_tab {
        Tab::Config => app.config.handle_map_click(listener, x, y),
        Tab::Home => None,
    };
    if let Some(action) = action {
        process_action(app, action);
    }
}

fn dispatch_scroll(app: &mut App, direction: ScrollDirection) {
    let action = match app.current_tab {
        Tab::Home => None,
        Tab::Config => app.config.handle_scroll(direction),
    };
    if let Some(action) = action {
        process_action(app, action);
    }
}

// ─────────────────────────────────────────────────────────────
// Action processing
// ─────────────────────────────────────────────────────────────

pub fn process_action(app: &mut App, action: Action) {
    match action {
        Action::Consumed => {}
        Action::Quit => app.quit(),
        Action::NextTab => app.next_tab(),
        Action::PreviousTab => app.previous_tab(),
        Action::SelectTab(tab) => app.select_tab(tab),
        Action::ShowToast { message, is_error } => app.show_toast(message, is_error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geotrigger_core::geo::Viewport;
    use geotrigger_core::trigger::LatLng;

    #[test]
    fn test_area_wins_over_map() {
        let mut mouse = MouseState::default();
        let viewport = Viewport::new(LatLng::new(51.0, 7.0), 15);
        let map_area = Rect::new(0, 0, 20, 10);
        mouse.listen_map(MapListener::new(map_area, viewport.bounds(20, 10)));
        mouse.add(Rect::new(0, 0, 5, 1), KeyCode::Char('s'));

        assert!(matches!(
            mouse.resolve_click(2, 0),
            ClickResult::Target(ClickTarget::Key(KeyCode::Char('s')))
        ));
        assert!(matches!(mouse.resolve_click(2, 3), ClickResult::Map(_)));
        assert!(matches!(mouse.resolve_click(30, 3), ClickResult::PassThrough));
    }

    #[test]
    fn test_add_shortcuts_positions() {
        let mut mouse = MouseState::default();
        let spans = mouse.add_shortcuts(
            vec![
                (vec![Span::raw(" ")], None),
                (vec![Span::raw("S"), Span::raw("ave")], Some(KeyCode::Char('s'))),
                (vec![Span::raw("  ")], None),
                (vec![Span::raw("Quit")], Some(KeyCode::Char('q'))),
            ],
            10,
            3,
        );
        assert_eq!(spans.len(), 5);
        assert_eq!(mouse.find_at(11, 3), Some(&ClickTarget::Key(KeyCode::Char('s'))));
        assert_eq!(mouse.find_at(14, 3), Some(&ClickTarget::Key(KeyCode::Char('s'))));
        assert_eq!(mouse.find_at(15, 3), None);
        assert_eq!(mouse.find_at(17, 3), Some(&ClickTarget::Key(KeyCode::Char('q'))));
    }
}

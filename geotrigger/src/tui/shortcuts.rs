use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders},
};

use crate::tui::app::events::MouseState;
use crate::tui::styles::{border_style, dimmed_style, key_style, label_style};

pub type ShortcutItem<'a> = (Vec<Span<'a>>, Option<KeyCode>);

/// Builder for rendering a block with a bottom shortcut bar.
pub struct ShortcutBlock<'a> {
    title: Line<'a>,
    items: Vec<ShortcutItem<'a>>,
}

impl<'a> ShortcutBlock<'a> {
    pub fn new(title: Line<'a>) -> Self {
        Self {
            title,
            items: Vec::new(),
        }
    }

    pub fn items(mut self, items: Vec<ShortcutItem<'a>>) -> Self {
        self.items = items;
        self
    }

    /// Render the block with shortcuts and return the inner area for content.
    pub fn render(self, f: &mut Frame, area: Rect, mouse: &mut MouseState) -> Rect {
        let bottom_y = area.y + area.height.saturating_sub(1);
        let base_x = area.x + 1;

        let shortcut_spans = mouse.add_shortcuts(self.items, base_x, bottom_y);
        let shortcuts = Line::from(shortcut_spans);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(self.title)
            .title_alignment(Alignment::Center)
            .title_bottom(shortcuts.left_aligned());

        let inner = block.inner(area);
        f.render_widget(block, area);
        inner
    }
}

// ─────────────────────────────────────────────────────────────
// Shortcut item helpers
// ─────────────────────────────────────────────────────────────

/// Active shortcut: key highlighted in red, label in cyan.
pub fn shortcut<'a>(key: &'a str, label: &'a str, code: KeyCode) -> ShortcutItem<'a> {
    (
        vec![
            Span::styled(key, key_style()),
            Span::styled(label, label_style()),
        ],
        Some(code),
    )
}

/// Dimmed shortcut: both key and label rendered in dimmed style, no click area.
pub fn shortcut_dimmed<'a>(key: &'a str, label: &'a str) -> ShortcutItem<'a> {
    (
        vec![
            Span::styled(key, dimmed_style()),
            Span::styled(label, dimmed_style()),
        ],
        None,
    )
}

/// Bracketed shortcut: `[key]label` with key highlighted, label in cyan.
pub fn shortcut_bracketed<'b>(key: &'b str, label: &'b str, code: KeyCode) -> ShortcutItem<'b> {
    (
        vec![
            Span::styled("[", label_style()),
            Span::styled(key, key_style()),
            Span::styled("]", label_style()),
            Span::styled(label, label_style()),
        ],
        Some(code),
    )
}

/// Key pair such as `[↑↓]Field`, each key clickable on its own.
pub fn key_pair<'a>(
    first: (&'a str, KeyCode),
    second: (&'a str, KeyCode),
    label: &'a str,
) -> Vec<ShortcutItem<'a>> {
    vec![
        (vec![Span::styled("[", label_style())], None),
        (vec![Span::styled(first.0, key_style())], Some(first.1)),
        (vec![Span::styled(second.0, key_style())], Some(second.1)),
        (
            vec![
                Span::styled("]", label_style()),
                Span::styled(label, label_style()),
            ],
            None,
        ),
    ]
}

/// Single space separator.
pub fn space() -> ShortcutItem<'static> {
    (vec![Span::raw(" ")], None)
}

/// Double space gap.
pub fn gap() -> ShortcutItem<'static> {
    (vec![Span::raw("  ")], None)
}

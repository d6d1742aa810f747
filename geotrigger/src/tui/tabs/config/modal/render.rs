use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
};

use crate::tui::app::events::MouseState;
use crate::tui::shortcuts::{ShortcutBlock, gap, shortcut_bracketed, space};
use crate::tui::styles::{active_value_style, dimmed_style, label_style};
use crate::tui::tabs::config::modal::state::EditModalState;

pub fn render_edit_modal(modal: &EditModalState, f: &mut Frame, mouse: &mut MouseState) {
    let full_area = f.area();

    // Dim the entire background including header
    f.render_widget(
        Block::default().style(Style::default().bg(Color::DarkGray)),
        full_area,
    );

    let modal_area = super::modal_area(full_area);
    f.render_widget(Clear, modal_area);
    f.render_widget(
        Block::default().style(Style::default().bg(Color::Black).fg(Color::White)),
        modal_area,
    );

    let title = format!(" Edit {} ", modal.field.label());
    let items = vec![
        space(),
        shortcut_bracketed("↵", "Apply", KeyCode::Enter),
        gap(),
        shortcut_bracketed("⎋", "Cancel", KeyCode::Esc),
        space(),
    ];
    let inner = ShortcutBlock::new(Line::from(Span::styled(
        title,
        Style::default().fg(Color::White),
    )))
    .items(items)
    .render(f, modal_area, mouse);

    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(inner);

    let input = Line::from(vec![
        Span::styled(" › ", label_style()),
        Span::styled(modal.buffer.as_str(), active_value_style()),
        Span::styled("▏", Style::default().fg(Color::Cyan)),
    ]);
    f.render_widget(Paragraph::new(input), rows[1]);

    let hint = Line::from(Span::styled(
        format!("   {}", modal.field.input_hint()),
        dimmed_style(),
    ));
    f.render_widget(Paragraph::new(hint), rows[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::events::ClickTarget;
    use crate::tui::tabs::config::state::FormField;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_modal_shows_buffer_and_registers_buttons() {
        let mut modal = EditModalState::new();
        modal.open(FormField::Radius, "120".to_string());

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let mut mouse = MouseState::default();
        terminal
            .draw(|f| render_edit_modal(&modal, f, &mut mouse))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let area = super::super::modal_area(buffer.area);
        let input_row: String = (area.x..area.x + area.width)
            .map(|x| buffer[(x, area.y + 2)].symbol().to_string())
            .collect();
        assert!(input_row.contains("120"), "row was {input_row:?}");

        let bottom = area.y + area.height - 1;
        let targets: Vec<_> = (area.x..area.x + area.width)
            .filter_map(|x| mouse.find_at(x, bottom).copied())
            .collect();
        assert!(targets.contains(&ClickTarget::Key(KeyCode::Enter)));
        assert!(targets.contains(&ClickTarget::Key(KeyCode::Esc)));
    }
}

use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use strum::IntoEnumIterator;

use crate::tui::app::state::App;
use crate::tui::component::TabComponent;
use crate::tui::styles::{border_style, key_style, saved_count_span};
use crate::tui::tabs::Tab;

pub struct AppLayout {
    pub header: Rect,
    pub content: Rect,
}

pub fn layout(area: Rect) -> AppLayout {
    let chunks = Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).split(area);
    AppLayout {
        header: chunks[0],
        content: chunks[1],
    }
}

pub fn draw(f: &mut Frame, app: &mut App) {
    // Set default style for entire screen (black background, white foreground)
    let area = f.area();
    f.buffer_mut()
        .set_style(area, Style::default().bg(Color::Black).fg(Color::White));

    // Registrations from the previous frame are stale; components re-add theirs
    app.mouse_state.clear();

    let AppLayout { header, content } = layout(area);
    draw_header(f, app, header);
    draw_content(f, app, content);

    app.toast.render(f, content);
}

fn draw_header(f: &mut Frame, app: &mut App, area: Rect) {
    let divider = " │ ";

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" GEOTRIGGER ", Style::default().fg(Color::White)))
        .title(Line::from(saved_count_span(app.config.saved.len())).right_aligned());

    let inner = block.inner(area);
    f.render_widget(block, area);

    // add_shortcuts registers click areas and returns the spans to draw
    let mut items: Vec<(Vec<Span>, Option<KeyCode>)> = vec![(vec![Span::raw(" ")], None)];
    for (i, tab) in Tab::iter().enumerate() {
        if i > 0 {
            items.push((
                vec![Span::styled(divider, Style::default().fg(Color::Gray))],
                None,
            ));
        }
        let title_style = if tab == app.current_tab {
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        items.push((
            vec![
                Span::styled(tab.superscript(), key_style()),
                Span::styled(tab.title(), title_style),
            ],
            Some(tab.key()),
        ));
    }

    let spans = app.mouse_state.add_shortcuts(items, inner.x, inner.y);
    f.render_widget(
        Paragraph::new(Line::from(spans)),
        Rect::new(inner.x, inner.y, inner.width, 1),
    );
}

fn draw_content(f: &mut Frame, app: &mut App, area: Rect) {
    let shared = app.shared_state();
    match app.current_tab {
        Tab::Home => app.home.render(f, area, &shared, &mut app.mouse_state),
        Tab::Config => app.config.render(f, area, &shared, &mut app.mouse_state),
    }
}

use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::tui::app::events::MouseState;
use crate::tui::component::SharedState;
use crate::tui::shortcuts::{ShortcutBlock, gap, shortcut, shortcut_bracketed, space};
use crate::tui::styles::{dimmed_style, label_style};
use crate::tui::tabs::home::state::HomeState;

const HOME_CONTENT_WIDTH: u16 = 50;

pub const ASCII_LOGO: &str = "┏━╸┏━╸┏━┓╺┳╸┏━┓╻┏━╸┏━╸┏━╸┏━┓
┃╺┓┣╸ ┃ ┃ ┃ ┣┳┛┃┃╺┓┃╺┓┣╸ ┣┳┛
┗━┛┗━╸┗━┛ ╹ ╹┗╸╹┗━┛┗━┛┗━╸╹┗╸
";

pub fn render(
    state: &mut HomeState,
    f: &mut Frame,
    area: Rect,
    shared: &SharedState,
    mouse: &mut MouseState,
) {
    let items = vec![
        space(),
        shortcut_bracketed("↵", "Configure", KeyCode::Enter),
        gap(),
        shortcut("Q", "uit", KeyCode::Char('q')),
        space(),
    ];

    let inner = ShortcutBlock::new(Line::from(" Home "))
        .items(items)
        .render(f, area, mouse);

    let centered = center_rect(inner, HOME_CONTENT_WIDTH, 14);

    let chunks = Layout::vertical([
        Constraint::Length(4), // Logo
        Constraint::Length(1), // Saved count
        Constraint::Length(1), // Marker
        Constraint::Length(1), // Separator line
        Constraint::Length(3), // Description
        Constraint::Length(3), // Example box
        Constraint::Length(1), // Settings path + version
    ])
    .split(centered);

    let logo = Paragraph::new(ASCII_LOGO)
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);
    f.render_widget(logo, chunks[0]);

    let saved = match shared.saved_count {
        0 => "none yet".to_string(),
        1 => "1 trigger".to_string(),
        n => format!("{n} triggers"),
    };
    let saved_line = Line::from(vec![
        Span::raw("Saved this session: "),
        Span::styled(saved, label_style()),
    ]);
    f.render_widget(
        Paragraph::new(saved_line).alignment(Alignment::Center),
        chunks[1],
    );

    let marker_line = Line::from(vec![
        Span::raw("Marker: "),
        Span::styled(shared.marker.to_string(), label_style()),
    ]);
    f.render_widget(
        Paragraph::new(marker_line).alignment(Alignment::Center),
        chunks[2],
    );

    let separator = Paragraph::new("─".repeat(HOME_CONTENT_WIDTH as usize)).style(dimmed_style());
    f.render_widget(separator, chunks[3]);

    let description = Paragraph::new(
        "Define where a location trigger sits on the map,\n\
         when it repeats and how long a visit lasts.",
    )
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::White));
    f.render_widget(description, chunks[4]);

    let example = Paragraph::new("Weekly · Mo, Mi · 15:00 · 100 m · 30 min")
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(dimmed_style()),
        );
    f.render_widget(example, chunks[5]);

    let path = Paragraph::new(state.settings_path.as_str())
        .style(dimmed_style())
        .alignment(Alignment::Left);
    f.render_widget(path, chunks[6]);

    let version = Paragraph::new(format!("v{}", env!("CARGO_PKG_VERSION")))
        .style(dimmed_style())
        .alignment(Alignment::Right);
    f.render_widget(version, chunks[6]);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

pub fn key_style() -> Style {
    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
}

pub fn label_style() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn dimmed_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn active_value_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

pub fn inactive_italic_style() -> Style {
    Style::default()
        .fg(Color::Gray)
        .add_modifier(Modifier::ITALIC)
}

pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

pub fn focus_style() -> Style {
    Style::default().bg(Color::DarkGray)
}

/// Weekday chip, filled when selected.
pub fn chip_style(selected: bool, editable: bool) -> Style {
    match (selected, editable) {
        (true, true) => Style::default()
            .fg(Color::White)
            .bg(Color::Indexed(61))
            .add_modifier(Modifier::BOLD),
        (true, false) => Style::default().fg(Color::Black).bg(Color::Gray),
        (false, _) => Style::default().fg(Color::Gray),
    }
}

/// Header badge with the number of saved triggers.
pub fn saved_count_span(count: usize) -> Span<'static> {
    let label = match count {
        0 => " ○ nothing saved ".to_string(),
        1 => " ● 1 trigger ".to_string(),
        n => format!(" ● {n} triggers "),
    };
    let style = if count == 0 {
        dimmed_style()
    } else {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    };
    Span::styled(label, style)
}

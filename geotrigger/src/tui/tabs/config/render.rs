use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
};

use geotrigger_core::constants::{DATE_FORMAT, RADIUS_MAX, RADIUS_MIN, TIME_FORMAT};
use geotrigger_core::trigger::{GeolocationConfig, Weekday, WeekdaySet};
use strum::IntoEnumIterator;

use crate::tui::app::events::{ClickTarget, MouseState};
use crate::tui::component::SharedState;
use crate::tui::map::MapView;
use crate::tui::shortcuts::{ShortcutBlock, gap, key_pair, shortcut, shortcut_bracketed, shortcut_dimmed, space};
use crate::tui::styles::{
    active_value_style, border_style, chip_style, dimmed_style, focus_style, inactive_italic_style,
    key_style, label_style,
};
use crate::tui::tabs::config::modal::render::render_edit_modal;
use crate::tui::tabs::config::state::{ConfigState, FormField, visible_fields};

const FORM_WIDTH: u16 = 46;
const SAVED_HEIGHT: u16 = 9;
const LABEL_WIDTH: usize = 11;
// Marker column plus label column
const VALUE_OFFSET: u16 = 2 + LABEL_WIDTH as u16;
const CHIP_WIDTH: u16 = 4;
const SLIDER_CELLS: u16 = 16;

pub struct ConfigLayout {
    pub form: Rect,
    pub map: Rect,
    pub saved: Rect,
    pub detail: Rect,
}

pub fn layout(inner: Rect) -> ConfigLayout {
    let rows = Layout::vertical([Constraint::Min(10), Constraint::Length(SAVED_HEIGHT)]).split(inner);
    let top = Layout::horizontal([Constraint::Length(FORM_WIDTH), Constraint::Min(20)]).split(rows[0]);
    let bottom =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).split(rows[1]);
    ConfigLayout {
        form: top[0],
        map: top[1],
        saved: bottom[0],
        detail: bottom[1],
    }
}

/// Meters a slider cell stands for; the first cell is the minimum, the last the maximum.
fn slider_meters(cell: u16) -> u16 {
    let span = (RADIUS_MAX - RADIUS_MIN) as u32;
    RADIUS_MIN + (span * cell as u32 / (SLIDER_CELLS - 1) as u32) as u16
}

fn when_text(config: &GeolocationConfig) -> String {
    let time = match config.time() {
        Some(t) => t.format(TIME_FORMAT).to_string(),
        None => "all day".to_string(),
    };
    match (config.start_date(), config.end_date(), config.selected_days()) {
        (Some(start), Some(end), _) => format!(
            "{} → {}, {}",
            start.format(DATE_FORMAT),
            end.format(DATE_FORMAT),
            time
        ),
        (_, _, Some(days)) => format!("{}, {}", days_text(days), time),
        _ => time,
    }
}

fn days_text(days: WeekdaySet) -> String {
    if days.is_empty() {
        "All".to_string()
    } else {
        days.to_string()
    }
}

/// One row of the saved list.
pub fn one_line(index: usize, config: &GeolocationConfig) -> String {
    format!(
        "#{} {} · {} · {} m · {} min",
        index + 1,
        config.repetition().label(),
        when_text(config),
        config.radius.meters(),
        config.duration.minutes()
    )
}

/// Readable description of a saved trigger, one line per value.
pub fn config_summary(config: &GeolocationConfig) -> Vec<String> {
    let mut lines = vec![
        format!("{:<10}{}", "Repeat:", config.repetition().label()),
        format!(
            "{:<10}{}",
            "All day:",
            if config.is_all_day() { "yes" } else { "no" }
        ),
    ];
    let at = config
        .time()
        .map(|t| format!(" {}", t.format(TIME_FORMAT)))
        .unwrap_or_default();
    if let (Some(start), Some(end)) = (config.start_date(), config.end_date()) {
        lines.push(format!("{:<10}{}{}", "Start:", start.format(DATE_FORMAT), at));
        lines.push(format!("{:<10}{}{}", "End:", end.format(DATE_FORMAT), at));
    }
    if let Some(days) = config.selected_days() {
        lines.push(format!("{:<10}{}", "Days:", days_text(days)));
        if !at.is_empty() {
            lines.push(format!("{:<10}{}", "Time:", at.trim_start()));
        }
    }
    lines.push(format!("{:<10}{} min", "Duration:", config.duration.minutes()));
    lines.push(format!("{:<10}{}", "Position:", config.position));
    lines.push(format!("{:<10}{} m", "Radius:", config.radius.meters()));
    lines
}

pub fn render(
    state: &mut ConfigState,
    f: &mut Frame,
    area: Rect,
    _shared: &SharedState,
    mouse: &mut MouseState,
) {
    let has_selection = state.selected_config().is_some();

    let mut items = vec![space()];
    items.extend(key_pair(("↑", KeyCode::Up), ("↓", KeyCode::Down), "Field"));
    items.push(gap());
    items.extend(key_pair(("←", KeyCode::Left), ("→", KeyCode::Right), "Change"));
    items.push(gap());
    items.push(shortcut_bracketed("↵", "Edit", KeyCode::Enter));
    items.push(gap());
    items.push(shortcut("S", "ave", KeyCode::Char('s')));
    items.push(gap());
    items.push(if has_selection {
        shortcut("D", "elete", KeyCode::Char('d'))
    } else {
        shortcut_dimmed("D", "elete")
    });
    items.push(gap());
    items.extend(key_pair(("+", KeyCode::Char('+')), ("-", KeyCode::Char('-')), "Zoom"));
    items.push(gap());
    items.push(shortcut("C", "enter", KeyCode::Char('c')));
    items.push(gap());
    items.push(shortcut("V", "iew JSON", KeyCode::Char('v')));
    items.push(gap());
    items.push(shortcut("Q", "uit", KeyCode::Char('q')));
    items.push(space());

    let inner = ShortcutBlock::new(Line::from(" Trigger Setup "))
        .items(items)
        .render(f, area, mouse);

    let areas = layout(inner);
    render_form(state, f, areas.form, mouse);
    MapView::new(state.draft.position(), state.draft.radius(), &state.viewport)
        .render(f, areas.map, mouse);
    render_saved(state, f, areas.saved, mouse);
    render_detail(state, f, areas.detail);

    if state.modal.show {
        // Nothing under the modal may take clicks, the map included
        mouse.clear();
        render_edit_modal(&state.modal, f, mouse);
    }
}

fn field_hint(state: &ConfigState) -> &'static str {
    match state.focus {
        FormField::Repetition => "How often the trigger repeats",
        FormField::AllDay => "Active all day, or from one time on",
        FormField::Duration => "Minutes to stay inside the radius",
        FormField::StartDate => "First day of the trigger",
        FormField::EndDate => "Last day of the trigger",
        FormField::Days if state.draft.repetition().has_manual_days() => {
            "←→ pick a day, space toggles it"
        }
        FormField::Days => "Days are fixed by the repetition",
        FormField::Time => "Time of day the trigger starts",
        FormField::Radius => "Size of the area around the marker",
    }
}

fn render_form(state: &ConfigState, f: &mut Frame, area: Rect, mouse: &mut MouseState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style())
        .title(" Trigger ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let fields = visible_fields(&state.draft);
    for (i, field) in fields.iter().enumerate() {
        let y = inner.y + i as u16;
        if y >= inner.y + inner.height {
            break;
        }
        let row = Rect::new(inner.x, y, inner.width, 1);
        let focused = *field == state.focus;

        let mut spans = vec![
            Span::styled(if focused { "▸ " } else { "  " }, key_style()),
            Span::styled(format!("{:<LABEL_WIDTH$}", field.label()), label_style()),
        ];
        spans.extend(field_value_spans(state, *field, focused, row, mouse));

        let style = if focused { focus_style() } else { Style::default() };
        f.render_widget(Paragraph::new(Line::from(spans)).style(style), row);
        mouse.add_target(row, ClickTarget::Field(*field));
    }

    let hint_y = inner.y + fields.len() as u16 + 1;
    if hint_y < inner.y + inner.height {
        let hint = Paragraph::new(Line::from(Span::styled(
            format!("  {}", field_hint(state)),
            inactive_italic_style(),
        )))
        .wrap(Wrap { trim: true });
        let hint_area = Rect::new(inner.x, hint_y, inner.width, inner.y + inner.height - hint_y);
        f.render_widget(hint, hint_area);
    }
}

/// Value part of a form row. Chips and slider cells register their own click
/// areas ahead of the row's.
fn field_value_spans(
    state: &ConfigState,
    field: FormField,
    focused: bool,
    row: Rect,
    mouse: &mut MouseState,
) -> Vec<Span<'static>> {
    let draft = &state.draft;
    let value_x = row.x + VALUE_OFFSET;
    match field {
        FormField::Repetition => vec![
            Span::styled("‹ ", dimmed_style()),
            Span::styled(draft.repetition().label(), active_value_style()),
            Span::styled(" ›", dimmed_style()),
        ],
        FormField::AllDay => {
            let text = if draft.is_all_day() { "[x] yes" } else { "[ ] no" };
            vec![Span::styled(text, active_value_style())]
        }
        FormField::Duration => vec![
            Span::styled(draft.duration().minutes().to_string(), active_value_style()),
            Span::styled(" min", dimmed_style()),
        ],
        FormField::StartDate => vec![Span::styled(
            draft.start_date().format(DATE_FORMAT).to_string(),
            active_value_style(),
        )],
        FormField::EndDate => vec![Span::styled(
            draft.end_date().format(DATE_FORMAT).to_string(),
            active_value_style(),
        )],
        FormField::Time => vec![Span::styled(
            draft.time().format(TIME_FORMAT).to_string(),
            active_value_style(),
        )],
        FormField::Days => {
            let editable = draft.repetition().has_manual_days();
            let days = draft.selected_days();
            Weekday::iter()
                .enumerate()
                .map(|(i, day)| {
                    let mut style = chip_style(days.contains(day), editable);
                    if focused && editable && day == state.day_cursor {
                        style = style.add_modifier(Modifier::UNDERLINED);
                    }
                    if editable {
                        let x = value_x + i as u16 * CHIP_WIDTH;
                        mouse.add_target(Rect::new(x, row.y, CHIP_WIDTH, 1), ClickTarget::Day(day));
                    }
                    Span::styled(format!(" {} ", day.as_str()), style)
                })
                .collect()
        }
        FormField::Radius => {
            let meters = draft.radius().meters();
            let mut spans: Vec<Span> = (0..SLIDER_CELLS)
                .map(|cell| {
                    let cell_meters = slider_meters(cell);
                    mouse.add_target(
                        Rect::new(value_x + cell, row.y, 1, 1),
                        ClickTarget::Radius(cell_meters),
                    );
                    if cell_meters <= meters {
                        Span::styled("━", Style::default().fg(Color::Cyan))
                    } else {
                        Span::styled("─", dimmed_style())
                    }
                })
                .collect();
            spans.push(Span::styled(format!(" {meters} m"), active_value_style()));
            spans
        }
    }
}

fn render_saved(state: &mut ConfigState, f: &mut Frame, area: Rect, mouse: &mut MouseState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style())
        .title(format!(" Saved triggers ({}) ", state.saved.len()))
        .title_bottom(Line::from(Span::styled(" [ ] select ", dimmed_style())).right_aligned());
    let inner = block.inner(area);

    if state.saved.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            " Nothing saved yet. Press S to save the form.",
            dimmed_style(),
        )))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = state
        .saved
        .iter()
        .enumerate()
        .map(|(i, config)| ListItem::new(one_line(i, config)))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(focus_style())
        .highlight_symbol("▸ ");
    f.render_stateful_widget(list, area, &mut state.list_state);

    let offset = state.list_state.offset();
    let visible = (state.saved.len() - offset.min(state.saved.len())).min(inner.height as usize);
    for i in 0..visible {
        let row = Rect::new(inner.x, inner.y + i as u16, inner.width, 1);
        mouse.add_target(row, ClickTarget::SavedRow(offset + i));
    }
}

fn render_detail(state: &ConfigState, f: &mut Frame, area: Rect) {
    let title = if state.show_json { " JSON " } else { " Details " };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style())
        .title(title);

    let text: Vec<Line> = match state.selected_config() {
        None => vec![Line::from(Span::styled(
            " Select a saved trigger to see it here",
            dimmed_style(),
        ))],
        Some(config) if state.show_json => serde_json::to_string_pretty(config)
            .unwrap_or_else(|e| format!("Cannot serialize trigger: {e}"))
            .lines()
            .map(|l| Line::from(l.to_string()))
            .collect(),
        Some(config) => config_summary(config).into_iter().map(Line::from).collect(),
    };

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(block);
    f.render_widget(paragraph, area);
}

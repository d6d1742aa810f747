use std::time::{Duration, Instant};

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

const DISPLAY_DURATION: Duration = Duration::from_secs(3);
const SLIDE_CELLS_PER_SEC: f64 = 80.0;
const MAX_TOASTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

impl ToastLevel {
    fn color(&self) -> Color {
        match self {
            ToastLevel::Success => Color::Green,
            ToastLevel::Error => Color::Red,
        }
    }

    fn title(&self) -> &'static str {
        match self {
            ToastLevel::Success => " ✓ ",
            ToastLevel::Error => " ✗ ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ToastPhase {
    Display,
    SlideOut { started_at: Instant },
}

struct Toast {
    message: String,
    level: ToastLevel,
    shown_at: Instant,
    repeats: u32,
    phase: ToastPhase,
}

impl Toast {
    fn text(&self) -> String {
        if self.repeats > 1 {
            format!("{} (×{})", self.message, self.repeats)
        } else {
            self.message.clone()
        }
    }
}

pub struct ToastState {
    toasts: Vec<Toast>,
}

impl ToastState {
    pub fn new() -> Self {
        Self { toasts: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    /// Shows a message. Repeating the newest visible message bumps its
    /// counter and restarts its timer instead of stacking a copy.
    pub fn push(&mut self, message: String, level: ToastLevel) {
        if let Some(last) = self.toasts.last_mut()
            && last.phase == ToastPhase::Display
            && last.level == level
            && last.message == message
        {
            last.repeats += 1;
            last.shown_at = Instant::now();
            return;
        }

        if self.toasts.len() >= MAX_TOASTS
            && let Some(toast) = self
                .toasts
                .iter_mut()
                .find(|t| matches!(t.phase, ToastPhase::Display))
        {
            toast.phase = ToastPhase::SlideOut {
                started_at: Instant::now(),
            };
        }
        self.toasts.push(Toast {
            message,
            level,
            shown_at: Instant::now(),
            repeats: 1,
            phase: ToastPhase::Display,
        });
    }

    pub fn tick(&mut self) {
        for toast in &mut self.toasts {
            if toast.phase == ToastPhase::Display && toast.shown_at.elapsed() >= DISPLAY_DURATION {
                toast.phase = ToastPhase::SlideOut {
                    started_at: Instant::now(),
                };
            }
        }

        // Remove toasts that have slid off screen
        let cols = crossterm::terminal::size().map(|(c, _)| c).unwrap_or(80);
        let max_width = toast_width(cols);
        self.toasts.retain(|toast| {
            if let ToastPhase::SlideOut { started_at } = toast.phase {
                slide_offset(started_at) <= max_width + 1
            } else {
                true
            }
        });
    }

    pub fn render(&self, f: &mut Frame, content_area: Rect) {
        if self.toasts.is_empty() {
            return;
        }

        let max_width = toast_width(content_area.width);
        let inner_width = max_width.saturating_sub(2);
        let right_edge = content_area.x + content_area.width;
        let mut current_y = content_area.y + 1;

        for toast in &self.toasts {
            let text = toast.text();
            let toast_height = 2 + wrapped_line_count(&text, inner_width as usize) as u16;

            if current_y + toast_height > content_area.y + content_area.height {
                break;
            }

            let offset = match toast.phase {
                ToastPhase::Display => 0,
                ToastPhase::SlideOut { started_at } => slide_offset(started_at),
            };

            let x = right_edge
                .saturating_sub(max_width)
                .saturating_sub(1)
                .saturating_add(offset);

            if x >= right_edge {
                current_y += toast_height;
                continue;
            }

            // Clip so the rect never leaves the frame buffer
            let visible_width = max_width.min(right_edge.saturating_sub(x));
            let toast_rect = Rect::new(x, current_y, visible_width, toast_height);
            let color = toast.level.color();

            let borders = if visible_width < max_width {
                Borders::TOP | Borders::BOTTOM | Borders::LEFT
            } else {
                Borders::ALL
            };

            let block = Block::default()
                .borders(borders)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color))
                .title(Span::styled(toast.level.title(), Style::default().fg(color)));

            let paragraph = Paragraph::new(Line::from(text))
                .style(Style::default().fg(color).bg(Color::Black))
                .block(block)
                .wrap(Wrap { trim: true });

            f.render_widget(Clear, toast_rect);
            f.render_widget(paragraph, toast_rect);

            current_y += toast_height;
        }
    }
}

fn toast_width(cols: u16) -> u16 {
    (cols as u32 * 35 / 100).max(24) as u16
}

fn slide_offset(started_at: Instant) -> u16 {
    (started_at.elapsed().as_secs_f64() * SLIDE_CELLS_PER_SEC) as u16
}

/// Number of lines `message` occupies when wrapped to `width` cells.
fn wrapped_line_count(message: &str, width: usize) -> usize {
    if width == 0 {
        return 1;
    }
    UnicodeWidthStr::width(message).div_ceil(width).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_message_collapses() {
        let mut toasts = ToastState::new();
        toasts.push("Trigger saved".into(), ToastLevel::Success);
        toasts.push("Trigger saved".into(), ToastLevel::Success);
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts.toasts[0].text(), "Trigger saved (×2)");

        toasts.push("Trigger saved".into(), ToastLevel::Error);
        assert_eq!(toasts.len(), 2);
    }

    #[test]
    fn test_overflow_starts_slide_out() {
        let mut toasts = ToastState::new();
        for i in 0..=MAX_TOASTS {
            toasts.push(format!("message {i}"), ToastLevel::Success);
        }
        assert_eq!(toasts.len(), MAX_TOASTS + 1);
        assert!(matches!(toasts.toasts[0].phase, ToastPhase::SlideOut { .. }));
    }

    #[test]
    fn test_wrapped_line_count() {
        assert_eq!(wrapped_line_count("", 10), 1);
        assert_eq!(wrapped_line_count("abcdefghij", 10), 1);
        assert_eq!(wrapped_line_count("abcdefghijk", 10), 2);
        assert_eq!(wrapped_line_count("abc", 0), 1);
    }
}

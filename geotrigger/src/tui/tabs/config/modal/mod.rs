use ratatui::layout::Rect;

pub mod events;
pub mod render;
pub mod state;

const MODAL_WIDTH: u16 = 44;
const MODAL_HEIGHT: u16 = 7;

/// Fixed-size box centered within `full_area`, shrunk to fit small terminals.
pub fn modal_area(full_area: Rect) -> Rect {
    let width = MODAL_WIDTH.min(full_area.width);
    let height = MODAL_HEIGHT.min(full_area.height);
    Rect::new(
        full_area.x + (full_area.width - width) / 2,
        full_area.y + (full_area.height - height) / 2,
        width,
        height,
    )
}

//! Location picker: a canvas map with the marker and its radius ring.
//!
//! The widget keeps no state. The owner passes position, radius and viewport
//! in, and each frame the widget registers a [`MapListener`] for its canvas
//! area. Listeners are dropped when the frame's click areas are cleared, so a
//! listener only exists while the map is on screen.

pub mod icons;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Paragraph,
        canvas::{Canvas, Map as WorldMap, MapResolution, Points},
    },
};

use geotrigger_core::geo::{Bounds, Viewport, ring_points};
use geotrigger_core::trigger::{LatLng, Radius};

use crate::tui::app::events::MouseState;
use crate::tui::styles::{border_style, dimmed_style, label_style};

const RING_STEPS: usize = 180;

/// Click registration for one rendered map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapListener {
    area: Rect,
    bounds: Bounds,
}

impl MapListener {
    pub fn new(area: Rect, bounds: Bounds) -> Self {
        Self { area, bounds }
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        self.area.contains(Position { x, y })
    }

    /// Coordinate under the terminal cell (`x`, `y`), if it is on the map.
    pub fn coordinate_at(&self, x: u16, y: u16) -> Option<LatLng> {
        if !self.contains(x, y) {
            return None;
        }
        Some(self.bounds.point_at(
            x - self.area.x,
            y - self.area.y,
            self.area.width,
            self.area.height,
        ))
    }

    /// Resolves a click and hands the coordinate to `on_position_change`.
    /// Returns false when the click missed the map.
    pub fn click(&self, x: u16, y: u16, on_position_change: impl FnOnce(LatLng)) -> bool {
        match self.coordinate_at(x, y) {
            Some(pos) => {
                log::debug!("Map click at ({x}, {y}) -> {:.5}, {:.5}", pos.lat, pos.lng);
                on_position_change(pos);
                true
            }
            None => false,
        }
    }
}

pub struct MapView<'a> {
    position: LatLng,
    radius: Radius,
    viewport: &'a Viewport,
}

impl<'a> MapView<'a> {
    pub fn new(position: LatLng, radius: Radius, viewport: &'a Viewport) -> Self {
        Self {
            position,
            radius,
            viewport,
        }
    }

    pub fn render(self, f: &mut Frame, area: Rect, mouse: &mut MouseState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style())
            .title(" Location ")
            .title_bottom(
                Line::from(Span::styled(" click to set marker ", dimmed_style())).right_aligned(),
            );
        let inner = block.inner(area);
        f.render_widget(block, area);

        if inner.width < 4 || inner.height < 3 {
            return;
        }

        let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);
        let canvas_area = chunks[0];
        let footer_area = chunks[1];

        let bounds = self.viewport.bounds(canvas_area.width, canvas_area.height);
        let position = LatLng::new(self.position.lat, bounds.unwrap_lng(self.position.lng));
        let ring = ring_points(position, self.radius.meters() as f64, RING_STEPS);
        let cell_w = (bounds.east - bounds.west) / canvas_area.width as f64;
        let cell_h = (bounds.north - bounds.south) / canvas_area.height as f64;
        let icons = icons::default_icons();

        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds(bounds.x_bounds())
            .y_bounds(bounds.y_bounds())
            .paint(|ctx| {
                ctx.draw(&WorldMap {
                    resolution: MapResolution::High,
                    color: Color::DarkGray,
                });
                ctx.layer();
                ctx.draw(&Points {
                    coords: &ring,
                    color: Color::Cyan,
                });
                ctx.print(
                    position.lng + cell_w,
                    position.lat - cell_h,
                    Span::styled(icons.shadow, dimmed_style()),
                );
                ctx.print(
                    position.lng,
                    position.lat,
                    Span::styled(
                        icons.marker,
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                );
            });
        f.render_widget(canvas, canvas_area);

        mouse.listen_map(MapListener::new(canvas_area, bounds));

        let mut footer = vec![
            Span::styled(format!(" z{} ", self.viewport.zoom()), label_style()),
            Span::styled(self.viewport.scale_label(), dimmed_style()),
            Span::raw("  "),
            Span::styled(format!("{} m", self.radius.meters()), label_style()),
        ];
        if !bounds.contains(position) {
            footer.push(Span::styled(
                "  marker off-screen",
                Style::default().fg(Color::Yellow),
            ));
        }
        f.render_widget(Paragraph::new(Line::from(footer)), footer_area);
    }
}

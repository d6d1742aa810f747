//! Viewport math for the location map.
//!
//! The map is drawn on a character grid, so the slippy-map ground resolution
//! is applied to a nominal cell of [`CELL_WIDTH_PX`] x [`CELL_HEIGHT_PX`]
//! pixels. Bounds are linear in degrees, which is what the canvas expects.

use std::f64::consts::PI;

use crate::constants::{ZOOM_MAX, ZOOM_MIN};
use crate::trigger::LatLng;

/// Ground resolution at zoom 0 on the equator, meters per pixel.
const METERS_PER_PIXEL_Z0: f64 = 156_543.033_92;
const METERS_PER_DEGREE: f64 = 111_320.0;

pub const CELL_WIDTH_PX: f64 = 8.0;
pub const CELL_HEIGHT_PX: f64 = 16.0;

/// Keeps longitude spans finite near the poles.
const MIN_COS_LAT: f64 = 0.01;

fn cos_lat(lat: f64) -> f64 {
    lat.to_radians().cos().max(MIN_COS_LAT)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub west: f64,
    pub east: f64,
    pub south: f64,
    pub north: f64,
}

impl Bounds {
    pub fn x_bounds(&self) -> [f64; 2] {
        [self.west, self.east]
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        [self.south, self.north]
    }

    pub fn contains(&self, p: LatLng) -> bool {
        let lng = self.unwrap_lng(p.lng);
        lng >= self.west && lng <= self.east && p.lat >= self.south && p.lat <= self.north
    }

    /// Shifts `lng` by a full turn when that brings it inside [west, east].
    /// Bounds that straddle the antimeridian run past 180, while stored
    /// coordinates are wrapped into [-180, 180).
    pub fn unwrap_lng(&self, lng: f64) -> f64 {
        [lng, lng + 360.0, lng - 360.0]
            .into_iter()
            .find(|l| *l >= self.west && *l <= self.east)
            .unwrap_or(lng)
    }

    /// Coordinate under the center of cell (`col`, `row`) of a `cols` x `rows`
    /// grid spanning these bounds, row 0 at the north edge.
    pub fn point_at(&self, col: u16, row: u16, cols: u16, rows: u16) -> LatLng {
        let fx = (col as f64 + 0.5) / cols.max(1) as f64;
        let fy = (row as f64 + 0.5) / rows.max(1) as f64;
        LatLng::new(
            self.north - fy * (self.north - self.south),
            self.west + fx * (self.east - self.west),
        )
        .normalized()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    center: LatLng,
    zoom: u8,
}

impl Viewport {
    pub fn new(center: LatLng, zoom: u8) -> Self {
        Self {
            center: center.normalized(),
            zoom: zoom.clamp(ZOOM_MIN, ZOOM_MAX),
        }
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn meters_per_pixel(&self) -> f64 {
        METERS_PER_PIXEL_Z0 * cos_lat(self.center.lat) / 2f64.powi(self.zoom as i32)
    }

    /// Ground width of one character cell, in meters.
    pub fn meters_per_cell(&self) -> f64 {
        self.meters_per_pixel() * CELL_WIDTH_PX
    }

    pub fn bounds(&self, cols: u16, rows: u16) -> Bounds {
        let mpp = self.meters_per_pixel();
        let half_w = cols as f64 * CELL_WIDTH_PX * mpp / 2.0;
        let half_h = rows as f64 * CELL_HEIGHT_PX * mpp / 2.0;
        let half_lng = half_w / (METERS_PER_DEGREE * cos_lat(self.center.lat));
        let half_lat = half_h / METERS_PER_DEGREE;
        Bounds {
            west: self.center.lng - half_lng,
            east: self.center.lng + half_lng,
            south: self.center.lat - half_lat,
            north: self.center.lat + half_lat,
        }
    }

    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom(self.zoom.saturating_add(1))
    }

    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom(self.zoom.saturating_sub(1))
    }

    fn set_zoom(&mut self, zoom: u8) -> bool {
        let zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
        let changed = zoom != self.zoom;
        self.zoom = zoom;
        changed
    }

    /// Moves the center by whole cells; positive `cols` is east, positive
    /// `rows` is south.
    pub fn pan_cells(&mut self, cols: i32, rows: i32) {
        let mpp = self.meters_per_pixel();
        let dlng = cols as f64 * CELL_WIDTH_PX * mpp / (METERS_PER_DEGREE * cos_lat(self.center.lat));
        let dlat = rows as f64 * CELL_HEIGHT_PX * mpp / METERS_PER_DEGREE;
        self.center = LatLng::new(self.center.lat - dlat, self.center.lng + dlng).normalized();
    }

    pub fn recenter(&mut self, center: LatLng) {
        self.center = center.normalized();
    }

    /// Human readable scale, e.g. `1 cell ≈ 24 m`.
    pub fn scale_label(&self) -> String {
        let m = self.meters_per_cell();
        if m >= 1000.0 {
            format!("1 cell ≈ {:.1} km", m / 1000.0)
        } else {
            format!("1 cell ≈ {:.0} m", m)
        }
    }
}

/// Points on a circle of `radius_m` meters around `center`, as (lng, lat)
/// pairs.
pub fn ring_points(center: LatLng, radius_m: f64, steps: usize) -> Vec<(f64, f64)> {
    let dlat = radius_m / METERS_PER_DEGREE;
    let dlng = radius_m / (METERS_PER_DEGREE * cos_lat(center.lat));
    (0..steps)
        .map(|i| {
            let theta = 2.0 * PI * i as f64 / steps as f64;
            (center.lng + dlng * theta.cos(), center.lat + dlat * theta.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_zoom_clamped() {
        let mut v = Viewport::new(LatLng::new(51.0, 7.0), 40);
        assert_eq!(v.zoom(), ZOOM_MAX);
        assert!(!v.zoom_in());
        let mut w = Viewport::new(LatLng::new(51.0, 7.0), 0);
        assert_eq!(w.zoom(), ZOOM_MIN);
        assert!(!w.zoom_out());
        assert!(w.zoom_in());
        v.zoom_out();
        assert_eq!(v.zoom(), ZOOM_MAX - 1);
    }

    #[test]
    fn test_bounds_centered_on_viewport() {
        let v = Viewport::new(LatLng::new(51.0, 7.0), 15);
        let b = v.bounds(80, 20);
        assert!(approx((b.west + b.east) / 2.0, 7.0));
        assert!(approx((b.south + b.north) / 2.0, 51.0));
        assert!(b.contains(v.center()));
    }

    #[test]
    fn test_zooming_in_halves_span() {
        let mut v = Viewport::new(LatLng::new(51.0, 7.0), 10);
        let wide = v.bounds(64, 16);
        v.zoom_in();
        let narrow = v.bounds(64, 16);
        assert!(approx(
            (wide.east - wide.west) / 2.0,
            narrow.east - narrow.west
        ));
    }

    #[test]
    fn test_point_at_middle_cell_is_center() {
        let v = Viewport::new(LatLng::new(51.0, 7.0), 15);
        let b = v.bounds(81, 21);
        let p = b.point_at(40, 10, 81, 21);
        assert!(approx(p.lat, 51.0));
        assert!(approx(p.lng, 7.0));
    }

    #[test]
    fn test_point_at_corners_orientation() {
        let b = Viewport::new(LatLng::new(0.0, 0.0), 12).bounds(40, 10);
        let nw = b.point_at(0, 0, 40, 10);
        let se = b.point_at(39, 9, 40, 10);
        assert!(nw.lat > 0.0 && nw.lng < 0.0);
        assert!(se.lat < 0.0 && se.lng > 0.0);
        assert!(b.contains(nw) && b.contains(se));
    }

    #[test]
    fn test_point_at_across_antimeridian_stays_inside() {
        let b = Viewport::new(LatLng::new(0.0, 179.9), 5).bounds(80, 20);
        assert!(b.east > 180.0);
        let p = b.point_at(79, 10, 80, 20);
        assert!(p.lng < 0.0);
        assert!(b.contains(p));
        let shown = b.unwrap_lng(p.lng);
        assert!(shown > 180.0 && shown <= b.east);
        assert!(approx(b.unwrap_lng(7.0), 7.0));
    }

    #[test]
    fn test_pan_moves_and_recenter_restores() {
        let start = LatLng::new(51.0, 7.0);
        let mut v = Viewport::new(start, 15);
        v.pan_cells(8, 0);
        assert!(v.center().lng > 7.0);
        v.pan_cells(0, 4);
        assert!(v.center().lat < 51.0);
        v.recenter(start);
        assert_eq!(v.center(), start);
    }

    #[test]
    fn test_ring_points_extent() {
        let center = LatLng::new(0.0, 0.0);
        let pts = ring_points(center, 111_320.0, 4);
        assert_eq!(pts.len(), 4);
        assert!(approx(pts[0].0, 1.0) && approx(pts[0].1, 0.0));
        assert!(approx(pts[1].0, 0.0) && approx(pts[1].1, 1.0));
    }

    #[test]
    fn test_scale_label() {
        let v = Viewport::new(LatLng::new(0.0, 0.0), 15);
        assert!(v.scale_label().ends_with(" m"));
        let far = Viewport::new(LatLng::new(0.0, 0.0), 3);
        assert!(far.scale_label().ends_with(" km"));
    }
}

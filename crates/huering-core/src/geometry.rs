//! Ring layout and sector derivation.
//!
//! All radii are whole pixels, derived from the widget size the same way
//! every renderer expects, so the handle always lands on the same pixel
//! grid no matter which backend draws it.

use std::f64::consts::TAU;

use kurbo::{BezPath, CircleSegment, Point, Rect, Shape as KurboShape, Vec2};

use crate::engine::hsv_to_rgb;
use crate::engine::{Rgb, SATURATION, VALUE};

/// Fraction of the half-size used for the inner edge of the wheel.
const INNER_RATIO: f64 = 0.6;
/// Fraction of the half-size used for the outer edge of the wheel.
const OUTER_RATIO: f64 = 0.9;
/// Fraction of the half-size used for the handle diameter.
const HANDLE_RATIO: f64 = 0.3;
/// Edge length of the center swatch.
pub const CENTER_RECT_SIZE: f64 = 30.0;
/// Stroke width of the handle ring.
pub const HANDLE_STROKE_WIDTH: f64 = 5.0;
/// Stroke color of the handle ring.
pub const HANDLE_COLOR: Rgb = Rgb::new(0x36, 0x36, 0x36);
/// Flattening tolerance when converting sectors to paths.
const PATH_TOLERANCE: f64 = 0.1;
/// Slack absorbed before flooring so `100 - 75 * sin(PI)` stays on 100.
const FLOOR_EPSILON: f64 = 1e-9;

/// Pixel geometry of a picker of a given size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingLayout {
    /// Edge length of the square surface.
    pub size: f64,
    /// Inner radius of the sector ring.
    pub inner_radius: f64,
    /// Outer radius of the sector ring.
    pub outer_radius: f64,
    /// Radius of the drag handle.
    pub handle_radius: f64,
}

impl RingLayout {
    pub fn new(size: u32) -> Self {
        let half = size as f64 / 2.0;
        Self {
            size: size as f64,
            inner_radius: (half * INNER_RATIO).floor(),
            outer_radius: (half * OUTER_RATIO).floor(),
            handle_radius: (half * HANDLE_RATIO / 2.0).floor(),
        }
    }

    /// Center of the surface in local coordinates.
    pub fn center(&self) -> Point {
        Point::new(self.size / 2.0, self.size / 2.0)
    }

    /// Distance from the center at which the handle travels.
    pub fn track_radius(&self) -> f64 {
        self.inner_radius + self.handle_radius
    }

    /// Handle center for `angle`, snapped down to whole pixels.
    pub fn handle_position(&self, angle: f64) -> Point {
        let half = self.size / 2.0;
        let r = self.track_radius();
        Point::new(
            snap_floor(half + r * angle.cos()),
            snap_floor(half - r * angle.sin()),
        )
    }

    /// Offset of a local point from the surface center.
    pub fn offset_from_center(&self, local: Point) -> Vec2 {
        local - self.center()
    }

    /// Whether `local` lies on the handle drawn at `handle`.
    ///
    /// The handle is a stroked ring, so the hit area extends half a stroke
    /// width past its radius.
    pub fn hits_handle(&self, handle: Point, local: Point) -> bool {
        handle.distance(local) <= self.handle_radius + HANDLE_STROKE_WIDTH / 2.0
    }

    /// Bounds of the center swatch.
    pub fn center_rect(&self) -> Rect {
        Rect::from_center_size(self.center(), (CENTER_RECT_SIZE, CENTER_RECT_SIZE))
    }

    /// All sectors of a wheel split into `count` wedges.
    pub fn sectors(&self, count: u32) -> Vec<Sector> {
        (0..count).map(|index| self.sector(index, count)).collect()
    }

    /// A single sector. `index` must be below `count`.
    pub fn sector(&self, index: u32, count: u32) -> Sector {
        let step = TAU / count as f64;
        let start_angle = index as f64 * step;
        // The last wedge closes exactly on a full turn.
        let end_angle = if index + 1 == count {
            TAU
        } else {
            (index + 1) as f64 * step
        };
        Sector {
            index,
            start_angle,
            end_angle,
            inner_radius: self.inner_radius,
            outer_radius: self.outer_radius,
        }
    }
}

fn snap_floor(value: f64) -> f64 {
    (value + FLOOR_EPSILON).floor()
}

/// One wedge of the background wheel.
///
/// Angles are in radians, counter-clockwise from the positive x axis as seen
/// on screen, in `[0, TAU]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sector {
    pub index: u32,
    pub start_angle: f64,
    pub end_angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
}

impl Sector {
    /// Angular extent in radians.
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Hue shown by this wedge: the hue the handle selects at its start edge.
    ///
    /// The wheel is symmetric about the horizontal axis, covering hues 0 to
    /// 180 twice, so blues and magentas never appear.
    pub fn hue(&self) -> f64 {
        let degrees = self.start_angle.to_degrees();
        if degrees > 180.0 { 360.0 - degrees } else { degrees }
    }

    /// Fill color of this wedge.
    pub fn color(&self) -> Rgb {
        hsv_to_rgb(self.hue(), SATURATION, VALUE)
    }

    /// Annular wedge in kurbo's y-down angle convention.
    pub fn segment(&self, center: Point) -> CircleSegment {
        CircleSegment::new(
            center,
            self.outer_radius,
            self.inner_radius,
            -self.end_angle,
            self.sweep(),
        )
    }

    /// Closed outline of this wedge.
    pub fn to_path(&self, center: Point) -> BezPath {
        self.segment(center).to_path(PATH_TOLERANCE)
    }

    /// Screen-space point at `radius` along `angle` (counter-clockwise).
    pub fn point_at(center: Point, radius: f64, angle: f64) -> Point {
        Point::new(center.x + radius * angle.cos(), center.y - radius * angle.sin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_layout_size_200() {
        let layout = RingLayout::new(200);
        assert_eq!(layout.handle_radius, 15.0);
        assert_eq!(layout.inner_radius, 60.0);
        assert_eq!(layout.outer_radius, 90.0);
        assert_eq!(layout.track_radius(), 75.0);
    }

    #[test]
    fn test_handle_position_at_pi() {
        let layout = RingLayout::new(200);
        let handle = layout.handle_position(PI);
        assert_eq!(handle, Point::new(25.0, 100.0));
    }

    #[test]
    fn test_handle_position_cardinal() {
        let layout = RingLayout::new(200);
        assert_eq!(layout.handle_position(0.0), Point::new(175.0, 100.0));
        assert_eq!(layout.handle_position(PI / 2.0), Point::new(100.0, 25.0));
        assert_eq!(layout.handle_position(-PI / 2.0), Point::new(100.0, 175.0));
    }

    #[test]
    fn test_handle_distance_is_constant() {
        for size in [50_u32, 199, 200, 333] {
            let layout = RingLayout::new(size);
            let expected =
                (size as f64 / 2.0 * 0.6).floor() + (size as f64 / 2.0 * 0.3 / 2.0).floor();
            assert_eq!(layout.track_radius(), expected);
            for step in 0..72 {
                let angle = -PI + step as f64 * TAU / 72.0;
                let distance = layout.handle_position(angle).distance(layout.center());
                // Each coordinate is floored independently.
                assert!((distance - expected).abs() < 1.5, "size {size} angle {angle}");
            }
        }
    }

    #[test]
    fn test_odd_size_center() {
        let layout = RingLayout::new(101);
        assert_eq!(layout.center(), Point::new(50.5, 50.5));
        assert_eq!(layout.inner_radius, 30.0);
        assert_eq!(layout.handle_radius, 7.0);
    }

    #[test]
    fn test_sectors_partition_full_turn() {
        let layout = RingLayout::new(200);
        for count in [1_u32, 2, 3, 7, 360, 1000] {
            let sectors = layout.sectors(count);
            assert_eq!(sectors.len(), count as usize);
            assert_eq!(sectors[0].start_angle, 0.0);
            assert_eq!(sectors[count as usize - 1].end_angle, TAU);
            for pair in sectors.windows(2) {
                assert_eq!(pair[0].end_angle, pair[1].start_angle);
            }
            for sector in &sectors {
                assert!(sector.sweep() > 0.0);
            }
            let total: f64 = sectors.iter().map(Sector::sweep).sum();
            assert!((total - TAU).abs() < 1e-9);
        }
    }

    #[test]
    fn test_sector_indices_and_radii() {
        let layout = RingLayout::new(200);
        for (i, sector) in layout.sectors(12).iter().enumerate() {
            assert_eq!(sector.index, i as u32);
            assert_eq!(sector.inner_radius, 60.0);
            assert_eq!(sector.outer_radius, 90.0);
        }
    }

    #[test]
    fn test_sector_hue_matches_handle_color() {
        let layout = RingLayout::new(200);
        let sectors = layout.sectors(4);
        assert_eq!(sectors[0].hue(), 0.0);
        assert!((sectors[1].hue() - 90.0).abs() < 1e-9);
        assert!((sectors[2].hue() - 180.0).abs() < 1e-9);
        assert!((sectors[3].hue() - 90.0).abs() < 1e-9);
        assert_eq!(sectors[2].color(), Rgb::new(0, 255, 255));
    }

    #[test]
    fn test_wheel_is_mirrored() {
        let layout = RingLayout::new(200);
        let sectors = layout.sectors(360);
        assert!(sectors.iter().all(|s| (0.0..=180.0).contains(&s.hue())));
        // Wedges at +d and -d degrees share a color
        assert_eq!(sectors[45].color(), sectors[315].color());
        assert_eq!(sectors[1].color(), sectors[359].color());
    }

    #[test]
    fn test_sector_path_stays_in_ring() {
        let layout = RingLayout::new(200);
        let center = layout.center();
        let sector = layout.sector(3, 8);
        let bounds = sector.to_path(center).bounding_box();
        let ring = Rect::from_center_size(center, (180.0, 180.0)).inflate(0.5, 0.5);
        assert!(ring.contains(bounds.origin()));
        assert!(ring.contains(Point::new(bounds.x1, bounds.y1)));
    }

    #[test]
    fn test_center_rect() {
        let layout = RingLayout::new(200);
        assert_eq!(layout.center_rect(), Rect::new(85.0, 85.0, 115.0, 115.0));
    }

    #[test]
    fn test_hits_handle() {
        let layout = RingLayout::new(200);
        let handle = layout.handle_position(PI);
        assert!(layout.hits_handle(handle, handle));
        assert!(layout.hits_handle(handle, Point::new(25.0 + 17.0, 100.0)));
        assert!(!layout.hits_handle(handle, Point::new(25.0 + 18.0, 100.0)));
        assert!(!layout.hits_handle(handle, layout.center()));
    }
}

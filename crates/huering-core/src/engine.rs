//! Angle and color mapping.
//!
//! Pointer offsets are measured from the widget center in screen space
//! (y grows downwards). The resulting angle follows the usual mathematical
//! convention: 0 points right and positive angles turn counter-clockwise
//! on screen.

use std::f64::consts::PI;
use std::fmt;

use kurbo::Vec2;
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Saturation used for every color the picker produces.
pub const SATURATION: f64 = 1.0;
/// Value (brightness) used for every color the picker produces.
pub const VALUE: f64 = 1.0;

/// An 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Hex notation, e.g. `#00ffff`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Opaque peniko color for the Vello renderer.
    pub fn to_color(self) -> Color {
        Color::from_rgba8(self.r, self.g, self.b, 255)
    }
}

/// CSS functional notation, usable directly as an SVG `fill`.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        rgb.to_color()
    }
}

/// Angle of a pointer offset from the widget center, in radians.
///
/// The result lies in `[-PI, PI]`: a pointer directly left of center gives
/// `-PI` when its y offset is `+0.0` and `PI` when it is `-0.0`.
/// `f64::atan2(0.0, 0.0)` is `0.0`, so a pointer exactly on the center yields
/// `-0.0`, which maps to hue 0 (red).
pub fn pointer_angle(offset: Vec2) -> f64 {
    -offset.y.atan2(offset.x)
}

/// Hue in degrees selected by `angle`.
///
/// Mirrors the angle around the horizontal axis, so the result lies in
/// `[0, 180]`.
pub fn hue_for_angle(angle: f64) -> f64 {
    angle.abs() * 180.0 / PI
}

/// Convert HSV to RGB. `hue` is in degrees and wraps modulo 360; `s` and
/// `v` are clamped to `[0, 1]`.
pub fn hsv_to_rgb(hue: f64, s: f64, v: f64) -> Rgb {
    let h = hue.rem_euclid(360.0);
    let s = s.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);

    let c = v * s;
    let h_prime = h / 60.0;
    let x = c * (1.0 - (h_prime % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h_prime < 1.0 {
        (c, x, 0.0)
    } else if h_prime < 2.0 {
        (x, c, 0.0)
    } else if h_prime < 3.0 {
        (0.0, c, x)
    } else if h_prime < 4.0 {
        (0.0, x, c)
    } else if h_prime < 5.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    Rgb::new(channel(r + m), channel(g + m), channel(b + m))
}

fn channel(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Color selected by a handle sitting at `angle`.
pub fn color_for_angle(angle: f64) -> Rgb {
    hsv_to_rgb(hue_for_angle(angle), SATURATION, VALUE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_hues() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), Rgb::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), Rgb::new(0, 255, 0));
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), Rgb::new(0, 0, 255));
        assert_eq!(hsv_to_rgb(180.0, 1.0, 1.0), Rgb::new(0, 255, 255));
    }

    #[test]
    fn test_hue_wraps() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), hsv_to_rgb(360.0, 1.0, 1.0));
        assert_eq!(hsv_to_rgb(30.0, 1.0, 1.0), hsv_to_rgb(390.0, 1.0, 1.0));
        assert_eq!(hsv_to_rgb(-60.0, 1.0, 1.0), hsv_to_rgb(300.0, 1.0, 1.0));
    }

    #[test]
    fn test_saturation_and_value_extremes() {
        assert_eq!(hsv_to_rgb(200.0, 0.0, 1.0), Rgb::new(255, 255, 255));
        assert_eq!(hsv_to_rgb(200.0, 1.0, 0.0), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_intermediate_hue_rounds() {
        // 30 degrees: r = 1, g = 0.5
        assert_eq!(hsv_to_rgb(30.0, 1.0, 1.0), Rgb::new(255, 128, 0));
    }

    #[test]
    fn test_pointer_angle_directions() {
        // Right of center
        assert!(pointer_angle(Vec2::new(10.0, 0.0)).abs() < 1e-12);
        // Above center (screen y negative) is +90 degrees
        assert!((pointer_angle(Vec2::new(0.0, -10.0)) - PI / 2.0).abs() < 1e-12);
        // Below center is -90 degrees
        assert!((pointer_angle(Vec2::new(0.0, 10.0)) + PI / 2.0).abs() < 1e-12);
        // Left of center: the sign follows the sign of the zero y offset
        assert_eq!(pointer_angle(Vec2::new(-10.0, 0.0)), -PI);
        assert_eq!(pointer_angle(Vec2::new(-10.0, -0.0)), PI);
        assert!((hue_for_angle(-PI) - 180.0).abs() < 1e-12);
    }

    #[test]
    fn test_pointer_angle_at_origin() {
        let angle = pointer_angle(Vec2::ZERO);
        assert_eq!(angle, 0.0);
        assert_eq!(hue_for_angle(angle), 0.0);
        assert_eq!(color_for_angle(angle), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_hue_mirrors_vertical_halves() {
        let above = pointer_angle(Vec2::new(3.0, -4.0));
        let below = pointer_angle(Vec2::new(3.0, 4.0));
        assert!((hue_for_angle(above) - hue_for_angle(below)).abs() < 1e-12);
        assert_eq!(color_for_angle(above), color_for_angle(below));
    }

    #[test]
    fn test_hue_range() {
        for i in -180..=180 {
            let angle = i as f64 * PI / 180.0;
            let hue = hue_for_angle(angle);
            assert!((0.0..=180.0).contains(&hue));
        }
    }

    #[test]
    fn test_rgb_formatting() {
        let cyan = Rgb::new(0, 255, 255);
        assert_eq!(cyan.to_hex(), "#00ffff");
        assert_eq!(cyan.to_string(), "rgb(0, 255, 255)");
    }

    #[test]
    fn test_rgb_to_peniko() {
        let color: Color = Rgb::new(255, 0, 0).into();
        assert_eq!(color, Color::from_rgba8(255, 0, 0, 255));
    }
}

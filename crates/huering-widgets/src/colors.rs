//! Color conversions and the selected-color swatch.

use egui::{vec2, Color32, CornerRadius, CursorIcon, Response, Sense, Stroke, StrokeKind, Ui, Vec2};
use huering_core::Rgb;

use crate::{sizing, theme};

/// Convert a picker color to an opaque egui color.
pub fn to_color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.r, rgb.g, rgb.b)
}

/// Drop the alpha channel of an egui color.
pub fn from_color32(color: Color32) -> Rgb {
    Rgb::new(color.r(), color.g(), color.b())
}

/// Check if two colors match, ignoring alpha.
pub fn colors_match(a: Color32, b: Color32) -> bool {
    a.r() == b.r() && a.g() == b.g() && a.b() == b.b()
}

/// A swatch showing a picked color, with its hex code as tooltip.
pub struct ColorSwatch {
    color: Rgb,
    size: Vec2,
    circular: bool,
}

impl ColorSwatch {
    pub fn new(color: Rgb) -> Self {
        Self {
            color,
            size: vec2(sizing::LARGE, sizing::LARGE),
            circular: false,
        }
    }

    /// Set the size.
    pub fn size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    /// Draw as a circle instead of a rounded square.
    pub fn circular(mut self) -> Self {
        self.circular = true;
        self
    }

    pub fn show(self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(self.size, Sense::hover());
        let fill = to_color32(self.color);

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            if self.circular {
                let radius = rect.width().min(rect.height()) / 2.0;
                painter.circle_filled(rect.center(), radius, fill);
                painter.circle_stroke(rect.center(), radius, Stroke::new(1.0, theme::BORDER));
            } else {
                let corner = CornerRadius::same(sizing::CORNER_RADIUS);
                painter.rect_filled(rect, corner, fill);
                let stroke = Stroke::new(1.0, theme::BORDER);
                painter.rect_stroke(rect, corner, stroke, StrokeKind::Inside);
            }
        }

        response
            .on_hover_text(self.color.to_hex())
            .on_hover_cursor(CursorIcon::Default)
    }
}

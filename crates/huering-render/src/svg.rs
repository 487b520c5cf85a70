//! SVG export of a picker surface.

use std::fmt::Write;

use huering_core::CircularColor;
use huering_core::geometry::{HANDLE_COLOR, HANDLE_STROKE_WIDTH};

/// Render the picker as a standalone SVG document.
///
/// Produces one `<path>` per sector, the optional center `<rect>`, then the
/// handle `<circle>`, in that paint order.
pub fn to_svg(picker: &CircularColor) -> String {
    let config = picker.config();
    let layout = picker.layout();
    let center = layout.center();

    let mut svg = String::new();
    let class = config
        .class_name
        .as_deref()
        .map(|name| format!(r#" class="{}""#, escape_attr(name)))
        .unwrap_or_default();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}"{class}>"#,
        size = config.size,
    );

    for sector in picker.sectors() {
        let _ = writeln!(
            svg,
            r#"  <path d="{}" fill="{}"/>"#,
            sector.to_path(center).to_svg(),
            sector.color()
        );
    }

    if config.center_rect {
        let rect = layout.center_rect();
        let _ = writeln!(
            svg,
            r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            rect.x0,
            rect.y0,
            rect.width(),
            rect.height(),
            picker.color()
        );
    }

    let handle = picker.handle_position();
    let _ = writeln!(
        svg,
        r#"  <circle cx="{}" cy="{}" r="{}" fill="transparent" stroke="{}" stroke-width="{}"/>"#,
        handle.x,
        handle.y,
        layout.handle_radius,
        HANDLE_COLOR.to_hex(),
        HANDLE_STROKE_WIDTH
    );
    svg.push_str("</svg>\n");
    svg
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

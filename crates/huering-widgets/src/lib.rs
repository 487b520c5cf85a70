//! egui widgets for the HueRing circular color picker.
//!
//! - **Picker**: the [`HueRing`] widget drawing a [`huering_core::CircularColor`]
//! - **Colors**: conversions to egui colors and a color swatch
//! - **Panel**: panel frame, section labels and the settings form

pub mod colors;
pub mod panel;
pub mod picker;

pub use colors::{colors_match, from_color32, to_color32, ColorSwatch};
pub use panel::{panel_frame, picker_settings, section_label};
pub use picker::{hue_ring, sector_mesh, HueRing};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Large swatch size
    pub const LARGE: f32 = 36.0;
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 4;
    /// Panel corner radius
    pub const PANEL_RADIUS: u8 = 8;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(250, 250, 252, 250);
}

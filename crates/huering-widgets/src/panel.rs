//! Panel chrome and the picker settings form.

use egui::{Color32, CornerRadius, Frame, Margin, Stroke, Ui};
use huering_core::PickerConfig;
use huering_core::config::MAX_SECTORS;

use crate::{sizing, theme};

/// Standard panel frame with shadow.
pub fn panel_frame() -> Frame {
    Frame::new()
        .fill(theme::PANEL_BG)
        .corner_radius(CornerRadius::same(sizing::PANEL_RADIUS))
        .stroke(Stroke::new(1.0, theme::BORDER))
        .shadow(egui::epaint::Shadow {
            spread: 0,
            blur: 8,
            offset: [0, 2],
            color: Color32::from_black_alpha(15),
        })
        .inner_margin(Margin::same(8))
}

/// Small, muted section heading.
pub fn section_label(ui: &mut Ui, text: &str) {
    ui.label(egui::RichText::new(text).size(10.0).color(theme::TEXT_MUTED));
}

/// Smallest and largest picker sizes offered by [`picker_settings`].
pub const SIZE_RANGE: std::ops::RangeInclusive<u32> = 60..=480;

/// Edit a picker configuration in place. Returns true if anything changed.
///
/// Every value the form can produce passes [`PickerConfig::validate`].
pub fn picker_settings(ui: &mut Ui, config: &mut PickerConfig) -> bool {
    let mut changed = false;

    section_label(ui, "SIZE");
    changed |= ui
        .add(egui::Slider::new(&mut config.size, SIZE_RANGE).suffix(" px"))
        .changed();

    section_label(ui, "SECTORS");
    changed |= ui
        .add(egui::Slider::new(&mut config.number_of_sectors, 1..=MAX_SECTORS).logarithmic(true))
        .changed();

    changed |= ui.checkbox(&mut config.center_rect, "Center swatch").changed();

    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_bounds_are_valid() {
        for size in [*SIZE_RANGE.start(), *SIZE_RANGE.end()] {
            for sectors in [1, MAX_SECTORS] {
                let config = PickerConfig::new().with_size(size).with_sectors(sectors);
                assert!(config.validate().is_ok());
            }
        }
    }
}

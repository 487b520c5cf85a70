//! Settings overlay using egui.

use egui::{Align2, Context, RichText, Vec2};
use huering_core::{CircularColor, PickerConfig, Rgb};
use huering_widgets::{hue_ring, panel_frame, picker_settings, section_label, theme, ColorSwatch};

/// Actions requested by the overlay, applied by the app after the frame.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Rebuild both pickers with a new configuration.
    ApplyConfig(PickerConfig),
    /// Export the canvas picker as SVG.
    ExportSvg,
}

/// UI-only state that persists across frames.
#[derive(Debug, Clone)]
pub struct UiState {
    /// Configuration being edited; applied on request.
    pub draft: PickerConfig,
    /// Most recent color reported by either picker.
    pub last_color: Rgb,
    /// Whether the egui-drawn preview picker is shown.
    pub show_preview: bool,
}

impl UiState {
    pub fn new(config: &PickerConfig, color: Rgb) -> Self {
        Self {
            draft: config.clone(),
            last_color: color,
            show_preview: true,
        }
    }
}

/// Render the overlay and return any triggered action.
pub fn render_ui(
    ctx: &Context,
    ui_state: &mut UiState,
    preview: &mut CircularColor,
) -> Option<UiAction> {
    let mut action = None;

    egui::Area::new(egui::Id::new("settings_panel"))
        .anchor(Align2::RIGHT_TOP, Vec2::new(-12.0, 12.0))
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                ui.set_max_width(240.0);
                ui.vertical(|ui| {
                    section_label(ui, "SELECTED");
                    ui.horizontal(|ui| {
                        ColorSwatch::new(ui_state.last_color).circular().show(ui);
                        ui.label(
                            RichText::new(ui_state.last_color.to_hex())
                                .monospace()
                                .color(theme::TEXT),
                        );
                    });
                    ui.add_space(8.0);

                    picker_settings(ui, &mut ui_state.draft);
                    ui.horizontal(|ui| {
                        let dirty = ui_state.draft != *preview.config();
                        if ui.add_enabled(dirty, egui::Button::new("Apply")).clicked() {
                            action = Some(UiAction::ApplyConfig(ui_state.draft.clone()));
                        }
                        if ui.button("Export SVG").clicked() {
                            action = Some(UiAction::ExportSvg);
                        }
                    });
                    ui.add_space(8.0);

                    ui.checkbox(&mut ui_state.show_preview, "egui preview");
                    if ui_state.show_preview {
                        let response = hue_ring(ui, preview);
                        if response.changed() {
                            ui_state.last_color = preview.color();
                        }
                    }
                });
            });
        });

    action
}

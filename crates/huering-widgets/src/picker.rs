//! egui front end for [`CircularColor`].

use egui::{
    CornerRadius, CursorIcon, Mesh, Pos2, Rect, Response, Sense, Shape, Stroke, Ui, Vec2, Widget,
};
use huering_core::geometry::{HANDLE_COLOR, HANDLE_STROKE_WIDTH};
use huering_core::{CircularColor, PickerEvent, Rgb, Sector};
use kurbo::Point;

use crate::colors::to_color32;

/// Maximum angular span of one mesh slice, in radians (about 2 degrees).
const MAX_SLICE_ANGLE: f64 = 0.035;

/// Draws a [`CircularColor`] and routes egui pointer input into it.
///
/// The returned [`Response`] is marked changed on every frame the handle
/// moved.
pub struct HueRing<'a> {
    picker: &'a mut CircularColor,
}

impl<'a> HueRing<'a> {
    pub fn new(picker: &'a mut CircularColor) -> Self {
        Self { picker }
    }
}

impl Widget for HueRing<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let picker = self.picker;
        let size = picker.config().size as f32;
        let (rect, mut response) = ui.allocate_exact_size(Vec2::splat(size), Sense::drag());

        if let Some(color) = route_input(ui, &response, rect.min, picker) {
            log::trace!("HueRing {:?} -> {}", picker.config().class_name, color);
            response.mark_changed();
        }

        if ui.is_rect_visible(rect) {
            paint(ui, rect.min, picker);
        }

        let hovering_handle = response.hover_pos().is_some_and(|pos| {
            picker
                .layout()
                .hits_handle(picker.handle_position(), to_local(rect.min, pos))
        });
        if picker.is_dragging() {
            response = response.on_hover_cursor(CursorIcon::Grabbing);
        } else if hovering_handle {
            response = response.on_hover_cursor(CursorIcon::Grab);
        }
        response
    }
}

/// Convenience wrapper for `ui.add(HueRing::new(picker))`.
pub fn hue_ring(ui: &mut Ui, picker: &mut CircularColor) -> Response {
    ui.add(HueRing::new(picker))
}

fn to_local(origin: Pos2, pos: Pos2) -> Point {
    Point::new((pos.x - origin.x) as f64, (pos.y - origin.y) as f64)
}

/// Translate this frame's egui pointer state into picker events.
///
/// A move is only sent on frames where the pointer actually moved, and never
/// on the frame the press lands.
fn route_input(
    ui: &Ui,
    response: &Response,
    origin: Pos2,
    picker: &mut CircularColor,
) -> Option<Rgb> {
    let touch = ui.input(|i| i.any_touches());
    let mut changed = None;

    if response.drag_started() {
        if let Some(press) = ui.input(|i| i.pointer.press_origin()) {
            let position = to_local(origin, press);
            picker.handle_event(if touch {
                PickerEvent::touch_start(position)
            } else {
                PickerEvent::mouse_down(position)
            });
        }
    } else if picker.is_dragging() && response.dragged() && response.drag_delta() != Vec2::ZERO {
        if let Some(pos) = response.interact_pointer_pos() {
            let position = to_local(origin, pos);
            changed = picker.handle_event(if touch {
                PickerEvent::touch_move(position)
            } else {
                PickerEvent::mouse_move(position)
            });
        }
    }

    let released = response.drag_stopped() || !ui.input(|i| i.pointer.any_down());
    if picker.is_dragging() && released {
        let position = ui
            .input(|i| i.pointer.latest_pos())
            .map(|pos| to_local(origin, pos))
            .unwrap_or_else(|| picker.handle_position());
        picker.handle_event(if touch {
            PickerEvent::touch_end(position)
        } else {
            PickerEvent::mouse_up(position)
        });
    }

    changed
}

fn paint(ui: &Ui, origin: Pos2, picker: &CircularColor) {
    let painter = ui.painter();
    painter.add(Shape::mesh(sector_mesh(picker, origin)));

    let layout = picker.layout();
    if picker.config().center_rect {
        let r = layout.center_rect();
        let rect = Rect::from_min_max(
            origin + Vec2::new(r.x0 as f32, r.y0 as f32),
            origin + Vec2::new(r.x1 as f32, r.y1 as f32),
        );
        painter.rect_filled(rect, CornerRadius::ZERO, to_color32(picker.color()));
    }

    let handle = picker.handle_position();
    painter.circle_stroke(
        origin + Vec2::new(handle.x as f32, handle.y as f32),
        layout.handle_radius as f32,
        Stroke::new(HANDLE_STROKE_WIDTH as f32, to_color32(HANDLE_COLOR)),
    );
}

/// Triangulate every sector into one flat-shaded mesh.
///
/// Wide sectors are sliced so no straight edge spans more than
/// [`MAX_SLICE_ANGLE`] of arc.
pub fn sector_mesh(picker: &CircularColor, origin: Pos2) -> Mesh {
    let center = picker.layout().center();
    let mut mesh = Mesh::default();

    for sector in picker.sectors() {
        let color = to_color32(sector.color());
        let slices = (sector.sweep() / MAX_SLICE_ANGLE).ceil().max(1.0) as u32;
        let base = mesh.vertices.len() as u32;

        for k in 0..=slices {
            let angle = sector.start_angle + sector.sweep() * k as f64 / slices as f64;
            let inner = Sector::point_at(center, sector.inner_radius, angle);
            let outer = Sector::point_at(center, sector.outer_radius, angle);
            mesh.colored_vertex(origin + Vec2::new(inner.x as f32, inner.y as f32), color);
            mesh.colored_vertex(origin + Vec2::new(outer.x as f32, outer.y as f32), color);
        }

        for k in 0..slices {
            let i = base + k * 2;
            mesh.add_triangle(i, i + 1, i + 2);
            mesh.add_triangle(i + 1, i + 3, i + 2);
        }
    }

    mesh
}

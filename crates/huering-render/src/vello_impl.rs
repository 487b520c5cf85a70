//! Vello-based renderer implementation.

use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use huering_core::geometry::{HANDLE_COLOR, HANDLE_STROKE_WIDTH};
use kurbo::{Affine, Circle, Stroke};
use peniko::Fill;
use vello::Scene;

/// Vello-based renderer for GPU-accelerated 2D graphics.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    fn render_sectors(&mut self, ctx: &RenderContext, transform: Affine) {
        let picker = ctx.picker;
        let center = picker.layout().center();
        for sector in picker.sectors() {
            self.scene.fill(
                Fill::NonZero,
                transform,
                sector.color().to_color(),
                None,
                &sector.segment(center),
            );
        }
    }

    fn render_center_rect(&mut self, ctx: &RenderContext, transform: Affine) {
        let picker = ctx.picker;
        self.scene.fill(
            Fill::NonZero,
            transform,
            picker.color().to_color(),
            None,
            &picker.layout().center_rect(),
        );
    }

    fn render_handle(&mut self, ctx: &RenderContext, transform: Affine) {
        let picker = ctx.picker;
        let circle = Circle::new(picker.handle_position(), picker.layout().handle_radius);
        self.scene.stroke(
            &Stroke::new(HANDLE_STROKE_WIDTH),
            transform,
            HANDLE_COLOR.to_color(),
            None,
            &circle,
        );
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        if ctx.scale_factor <= 0.0 || !ctx.scale_factor.is_finite() {
            return Err(RendererError::RenderFailed(format!(
                "invalid scale factor {}",
                ctx.scale_factor
            )));
        }

        self.scene.reset();
        let transform = ctx.transform();

        self.render_sectors(ctx, transform);
        if ctx.picker.config().center_rect {
            self.render_center_rect(ctx, transform);
        }
        // Handle goes last so it stays on top of the ring.
        self.render_handle(ctx, transform);
        Ok(())
    }
}

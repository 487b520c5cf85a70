//! Renderer trait abstraction.

use huering_core::CircularColor;
use kurbo::{Affine, Point};
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The picker to draw.
    pub picker: &'a CircularColor,
    /// Top-left corner of the picker surface, in logical pixels.
    pub origin: Point,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Background color.
    pub background_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(picker: &'a CircularColor) -> Self {
        Self {
            picker,
            origin: Point::ZERO,
            scale_factor: 1.0,
            background_color: Color::from_rgba8(250, 250, 250, 255),
        }
    }

    /// Set the surface origin.
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Transform from surface-local logical pixels to physical pixels.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.scale_factor) * Affine::translate(self.origin.to_vec2())
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Build the scene/command buffer for a frame.
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

//! HueRing Render Library
//!
//! Renderer abstraction and implementations for the HueRing picker.
//! The default implementation uses Vello for GPU-accelerated rendering;
//! an SVG exporter is always available.

mod renderer;
pub mod svg;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
pub use svg::to_svg;

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloRenderer;

//! HueRing Core Library
//!
//! Platform-agnostic geometry, color mapping and interaction state for the
//! HueRing circular color picker.

pub mod config;
pub mod engine;
pub mod geometry;
pub mod input;
pub mod picker;
pub mod scroll;

pub use config::{ConfigError, PickerConfig};
pub use engine::{Rgb, color_for_angle, hsv_to_rgb, hue_for_angle, pointer_angle};
pub use geometry::{RingLayout, Sector};
pub use input::{PickerEvent, PointerSource};
pub use picker::{ChangeCallback, CircularColor, InteractionState};
pub use scroll::{DragGate, ListenerId, MemoryScrollBlocker, ScrollBlocker, ScrollGuard};

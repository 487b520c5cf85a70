//! HueRing Application
//!
//! The application shell: a winit window rendering one picker with vello,
//! plus an egui overlay holding the settings form and a second picker
//! drawn by egui.

mod app;
mod config;
mod ui;

pub use app::{App, AppConfig};
pub use config::{load_picker_config, LoadError};
pub use ui::{render_ui, UiAction, UiState};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{run_wasm, WebScrollBlocker};

//! Arm Viewer Frontend
//!
//! eframe application rendering the articulated arm into an egui viewport.

mod app;
mod config;
mod input;
mod overlay;
mod stats;
mod viewport_state;

pub use app::{ArmViewerApp, StartupError};
pub use config::{AppConfig, AssetsConfig, ConfigError, ConfigManager};

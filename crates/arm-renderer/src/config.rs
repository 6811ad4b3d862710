//! Renderer configuration

use serde::{Deserialize, Serialize};

/// Camera placement and projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub eye: [f32; 3],
    pub target: [f32; 3],
    pub fov_degrees: f32,
    pub near_plane: f32,
    pub far_plane: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: [10.0, 10.0, 10.0],
            target: [0.0, 0.0, 0.0],
            fov_degrees: 45.0,
            near_plane: 0.1,
            far_plane: 100.0,
        }
    }
}

/// Visible pass settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub clear_color: [f32; 4],
    pub camera: CameraConfig,
    /// Light position relative to the camera eye
    pub light_offset: [f32; 3],
    /// Grid spans `-grid_half_extent..=grid_half_extent` on X and Z
    pub grid_half_extent: u32,
    pub axes_length: f32,
    pub show_grid: bool,
    pub show_axes: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.0, 0.0, 0.2, 1.0],
            camera: CameraConfig::default(),
            light_offset: [-5.0, 0.0, 0.0],
            grid_half_extent: 5,
            axes_length: 5.0,
            show_grid: true,
            show_axes: true,
        }
    }
}

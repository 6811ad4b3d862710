//! Application configuration module
//!
//! Renderer, input and asset settings, persisted as RON.

mod manager;

pub use manager::{ConfigError, ConfigManager};

use std::path::PathBuf;

use arm_core::{BuiltinMeshSource, InputSettings, MeshSource, ObjMeshSource};
use arm_renderer::RendererConfig;
use serde::{Deserialize, Serialize};

/// Current configuration format version
pub const CONFIG_VERSION: u32 = 1;

/// Where part meshes come from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory holding `<part>.obj` files
    pub models_dir: PathBuf,
    /// Use procedural cuboids even if the models directory exists
    pub builtin_geometry: bool,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            models_dir: PathBuf::from("models"),
            builtin_geometry: false,
        }
    }
}

impl AssetsConfig {
    /// OBJ files when the models directory exists, built-in cuboids otherwise
    pub fn mesh_source(&self) -> Box<dyn MeshSource + Send + Sync> {
        if !self.builtin_geometry && self.models_dir.is_dir() {
            tracing::info!("Loading part meshes from {:?}", self.models_dir);
            Box::new(ObjMeshSource::new(&self.models_dir))
        } else {
            tracing::info!("Using built-in part geometry");
            Box::new(BuiltinMeshSource)
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Configuration format version
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub renderer: RendererConfig,
    #[serde(default)]
    pub input: InputSettings,
    #[serde(default)]
    pub assets: AssetsConfig,
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            renderer: RendererConfig::default(),
            input: InputSettings::default(),
            assets: AssetsConfig::default(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

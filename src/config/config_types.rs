// src/config/config_types.rs
//
// Config types for the app

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    // where the cannon sits, in window coordinates (0,0 is the center)
    #[serde(default)]
    pub origin: (f32, f32),
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
            origin: (0.0, -200.0),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OscConfig {
    pub rx_port: u16,
}

impl Default for OscConfig {
    fn default() -> Self {
        Self { rx_port: 9000 }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AssetConfig {
    // directory holding images named by `{ image = "..." }` kinds
    pub image_directory: Option<String>,
}

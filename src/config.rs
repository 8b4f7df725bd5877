use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Window and run-loop settings for the demo binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub show_fps: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "softcanvas".into(),
            width: 640,
            height: 480,
            vsync: true,
            show_fps: true,
        }
    }
}

impl AppConfig {
    /// Save config to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Load config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let json = fs::read_to_string(path).map_err(|e| e.to_string())?;
        serde_json::from_str(&json).map_err(|e| e.to_string())
    }
}

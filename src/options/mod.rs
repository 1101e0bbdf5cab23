//! Centralized scene/camera options with TOML preset support.
//!
//! All tweakable settings (camera framing and transition timing, color
//! palettes) are consolidated here. Options serialize to/from TOML so
//! embedding applications can store view presets.

mod camera;
mod colors;

use std::path::Path;

pub use camera::CameraOptions;
pub use colors::ColorOptions;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Camera projection, framing, and transition parameters.
    pub camera: CameraOptions,
    /// Color palette options.
    pub colors: ColorOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let content = std::fs::read_to_string(path).map_err(EngineError::Io)?;
        toml::from_str(&content)
            .map_err(|e| EngineError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), EngineError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| EngineError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(EngineError::Io)?;
        }
        std::fs::write(path, content).map_err(EngineError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[camera]
fovy = 60.0
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.camera.fovy, 60.0);
        // Everything else should be default
        assert_eq!(opts.camera.fit_margin, 1.5);
        assert_eq!(opts.colors.fallback_color, [0.5, 0.5, 0.5]);
    }

    #[test]
    fn structure_tints_cycle() {
        let colors = ColorOptions::default();
        let len = colors.structure_tints.len();
        assert_eq!(colors.structure_tint(0), colors.structure_tint(len));
        assert_ne!(colors.structure_tint(0), colors.structure_tint(1));
    }

    #[test]
    fn fit_distance_respects_margin_and_minimum() {
        let camera = CameraOptions::default();
        // Degenerate extent clamps to the minimum distance.
        assert_eq!(camera.fit_distance(0.0), camera.min_distance);
        // A real extent scales with the margin.
        let base = 10.0 / (camera.fovy.to_radians() / 2.0).tan();
        assert!((camera.fit_distance(10.0) - base * 1.5).abs() < 1e-4);
    }
}

use serde::{Deserialize, Serialize};

/// Color palette options for the structural scene.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorOptions {
    /// Carbon-tint palette cycled over structures after the first; the
    /// first-registered structure keeps element coloring.
    pub structure_tints: Vec<[f32; 3]>,
    /// RGB color for atoms whose element has no CPK entry.
    pub fallback_color: [f32; 3],
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            structure_tints: vec![
                [0.35, 0.8, 0.45],
                [0.45, 0.65, 0.95],
                [0.95, 0.55, 0.3],
                [0.8, 0.45, 0.85],
                [0.95, 0.8, 0.3],
                [0.4, 0.8, 0.8],
                [0.9, 0.5, 0.6],
            ],
            fallback_color: [0.5, 0.5, 0.5],
        }
    }
}

impl ColorOptions {
    /// Tint for the n-th tinted structure (cycles through the palette).
    #[must_use]
    pub fn structure_tint(&self, n: usize) -> [f32; 3] {
        if self.structure_tints.is_empty() {
            self.fallback_color
        } else {
            self.structure_tints[n % self.structure_tints.len()]
        }
    }
}

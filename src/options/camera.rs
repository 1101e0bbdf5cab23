use serde::{Deserialize, Serialize};

/// Camera projection, framing, and transition-timing options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Safety margin applied to fitted camera distances (1.0 = exact
    /// fit).
    pub fit_margin: f32,
    /// Smallest allowed fitted camera distance.
    pub min_distance: f32,
    /// Duration of `orient()` transitions, in seconds.
    pub orient_duration: f32,
    /// Duration of recenter transitions, in seconds.
    pub recenter_duration: f32,
    /// Duration of zoom-to-selection transitions, in seconds.
    pub zoom_duration: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            znear: 5.0,
            zfar: 2000.0,
            fit_margin: 1.5,
            min_distance: 5.0,
            orient_duration: 0.5,
            recenter_duration: 0.3,
            zoom_duration: 0.3,
        }
    }
}

impl CameraOptions {
    /// Camera distance at which a set of the given half-extent fits the
    /// vertical field of view, margin and minimum applied.
    #[must_use]
    pub fn fit_distance(&self, half_extent: f32) -> f32 {
        let fovy_rad = self.fovy.to_radians();
        let fit = half_extent / (fovy_rad / 2.0).tan();
        (fit * self.fit_margin).max(self.min_distance)
    }
}

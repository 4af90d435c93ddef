//! # Designer Settings
//!
//! Tunable constants for the scene interaction engine. Everything has a
//! sensible default; individual values can be overridden with the `with_*`
//! methods before handing the settings to a [`Presenter`].
//!
//! ```rust
//! use sysdesigner::settings::DesignerSettings;
//!
//! let settings = DesignerSettings::default()
//!     .with_system_scale(0.001)
//!     .with_model_mode(true);
//! assert!(settings.model_mode);
//! ```
//!
//! [`Presenter`]: crate::presenter::Presenter

use std::path::PathBuf;
use std::time::Duration;

use crate::data::ViewerType;

/// Settings for distances, step sizes and camera behaviour.
#[derive(Debug, Clone)]
pub struct DesignerSettings {
    /// Size of one distance unit inside a single system view.
    pub system_scale: f32,
    /// Size of one distance unit in the universe map.
    pub universe_scale: f32,
    /// Keyboard nudge multipliers in system view: (small, large).
    pub system_offset_steps: (f32, f32),
    /// Keyboard nudge multipliers in universe view: (small, large).
    pub universe_offset_steps: (f32, f32),
    /// Angular length (degrees) every rotate delta is normalized to.
    pub rotation_step: f32,
    /// Minimum scale as a multiple of `system_scale`.
    pub min_scale_factor: f32,
    /// Width of a single jump connection line.
    pub connection_width: f32,
    /// Width of a connection where either end has both a gate and a hole.
    pub double_connection_width: f32,
    /// Free-fly speed in world units per second.
    pub fly_speed: f32,
    /// Duration of animated camera transitions.
    pub camera_animation: Duration,
    /// Manipulator handle length as a fraction of the camera distance.
    pub handle_screen_fraction: f32,
    /// Load real models for kinds that have them instead of placeholder shapes.
    pub model_mode: bool,
    /// Root directory model paths are resolved against.
    pub data_path: PathBuf,
    /// Run the universe analysis on a worker thread instead of inline.
    pub background_analysis: bool,
}

impl Default for DesignerSettings {
    fn default() -> Self {
        Self {
            system_scale: 0.001,
            universe_scale: 4.0,
            system_offset_steps: (1.0, 25.0),
            universe_offset_steps: (0.1, 1.0),
            rotation_step: 2.0,
            min_scale_factor: 10.0,
            connection_width: 0.3,
            double_connection_width: 0.6,
            fly_speed: 2.0,
            camera_animation: Duration::from_millis(500),
            handle_screen_fraction: 0.15,
            model_mode: false,
            data_path: PathBuf::new(),
            background_analysis: true,
        }
    }
}

impl DesignerSettings {
    pub fn with_system_scale(mut self, scale: f32) -> Self {
        self.system_scale = scale;
        self
    }

    pub fn with_universe_scale(mut self, scale: f32) -> Self {
        self.universe_scale = scale;
        self
    }

    pub fn with_model_mode(mut self, enabled: bool) -> Self {
        self.model_mode = enabled;
        self
    }

    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    pub fn with_background_analysis(mut self, enabled: bool) -> Self {
        self.background_analysis = enabled;
        self
    }

    pub fn with_camera_animation(mut self, duration: Duration) -> Self {
        self.camera_animation = duration;
        self
    }

    pub fn with_fly_speed(mut self, speed: f32) -> Self {
        self.fly_speed = speed;
        self
    }

    /// Smallest value any scale axis may take.
    pub fn min_scale(&self) -> f32 {
        self.min_scale_factor * self.system_scale
    }

    /// Length of a keyboard nudge for the given view.
    ///
    /// Returns `None` for viewer types that do not support manipulation.
    pub fn offset_step(&self, viewer: ViewerType, small: bool) -> Option<f32> {
        let (steps, unit) = match viewer {
            ViewerType::System => (self.system_offset_steps, self.system_scale),
            ViewerType::Universe => (self.universe_offset_steps, self.universe_scale),
            _ => return None,
        };
        let factor = if small { steps.0 } else { steps.1 };
        Some(factor * unit)
    }

    /// Zoom factor used when focusing the selection.
    pub fn focus_zoom(&self, viewer: ViewerType) -> f32 {
        match viewer {
            ViewerType::Universe => 20.0,
            ViewerType::System => 1.75,
            _ => 1.25,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_steps_per_view() {
        let settings = DesignerSettings::default();

        let small = settings.offset_step(ViewerType::System, true).unwrap();
        let large = settings.offset_step(ViewerType::System, false).unwrap();
        assert!((small - 0.001).abs() < 1e-7);
        assert!((large - 0.025).abs() < 1e-7);

        let universe = settings.offset_step(ViewerType::Universe, false).unwrap();
        assert!((universe - 4.0).abs() < 1e-6);

        assert!(settings.offset_step(ViewerType::ModelPreview, false).is_none());
    }

    #[test]
    fn test_min_scale_follows_system_unit() {
        let settings = DesignerSettings::default().with_system_scale(0.5);
        assert!((settings.min_scale() - 5.0).abs() < 1e-6);
    }
}

use std::{fs::File, io::BufReader, path::Path};

use crate::{
    foundation::core::{Display, ScaleMethod},
    foundation::error::{SceneryError, SceneryResult},
    physics::PhysicsSettings,
};

/// App-wide settings. Every field has a default, so `{}` is a valid configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub design_width: f64,
    pub design_height: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub scale_method: ScaleMethod,
    /// Fixed frames per second; `0` measures wall-clock deltas instead.
    pub target_frame_rate: f64,
    /// Upper bound for a measured frame delta, in seconds.
    pub max_dt: f64,
    /// Step the shared physics world up to 3 times per frame when running below target.
    pub adaptive_physics: bool,
    /// Route touches to actors through hit testing.
    pub touchables: bool,
    pub debug: bool,
    pub physics: PhysicsSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            design_width: 1024.0,
            design_height: 768.0,
            canvas_width: 1024.0,
            canvas_height: 768.0,
            scale_method: ScaleMethod::FitBest,
            target_frame_rate: 60.0,
            max_dt: 0.1,
            adaptive_physics: false,
            touchables: true,
            debug: false,
            physics: PhysicsSettings::default(),
        }
    }
}

impl AppConfig {
    pub fn from_json_str(s: &str) -> SceneryResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> SceneryResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SceneryError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        let config: Self = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            SceneryError::serde(format!("parse config JSON '{}': {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SceneryResult<()> {
        let sizes = [
            ("design_width", self.design_width),
            ("design_height", self.design_height),
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
        ];
        for (name, v) in sizes {
            if !v.is_finite() || v <= 0.0 {
                return Err(SceneryError::validation(format!(
                    "{name} must be finite and > 0, got {v}"
                )));
            }
        }
        if !self.target_frame_rate.is_finite() || self.target_frame_rate < 0.0 {
            return Err(SceneryError::validation(
                "target_frame_rate must be finite and >= 0",
            ));
        }
        if !self.max_dt.is_finite() || self.max_dt <= 0.0 {
            return Err(SceneryError::validation("max_dt must be finite and > 0"));
        }
        if !self.physics.world_scale.is_finite() || self.physics.world_scale <= 0.0 {
            return Err(SceneryError::validation(
                "physics.world_scale must be finite and > 0",
            ));
        }
        Ok(())
    }

    pub fn display(&self) -> Display {
        Display {
            design_width: self.design_width,
            design_height: self.design_height,
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
            scale_method: self.scale_method,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/config.rs"]
mod tests;

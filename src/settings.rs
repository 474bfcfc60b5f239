//! Front-end settings
//!
//! Read once at startup from JSON; never written back.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{DuelError, Result};
use crate::tuning::Tuning;

/// Environment variable naming a settings file for the native runner
pub const CONFIG_ENV: &str = "SPELL_DUEL_CONFIG";

/// Duel settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Canvas ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Controls ===
    /// Smallest value the speed / cast rate sliders allow
    pub control_min: u32,
    /// Largest value the speed / cast rate sliders allow
    pub control_max: u32,

    // === Headless runner ===
    /// Frames simulated by the native binary
    pub headless_frames: u64,
    /// Simulated milliseconds per headless frame
    pub frame_ms: f64,

    /// Game balance
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            control_min: CONTROL_MIN,
            control_max: CONTROL_MAX,
            headless_frames: 60 * 60,
            frame_ms: FRAME_MS,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from the file named by `SPELL_DUEL_CONFIG`, or defaults if unset
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                let json = std::fs::read_to_string(&path)?;
                log::info!("Loaded settings from {}", path.to_string_lossy());
                Self::from_json(&json)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.canvas_width > 0.0 && self.canvas_height > 0.0) {
            return Err(DuelError::InvalidSettings(format!(
                "canvas must be positive, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.control_min == 0 || self.control_min > self.control_max {
            return Err(DuelError::InvalidSettings(format!(
                "control range {}..={} is empty or starts at zero",
                self.control_min, self.control_max
            )));
        }
        if !(self.frame_ms > 0.0) {
            return Err(DuelError::InvalidSettings(
                "frame_ms must be positive".into(),
            ));
        }
        if !(self.tuning.spell_speed > 0.0) {
            return Err(DuelError::InvalidSettings(
                "spell_speed must be positive".into(),
            ));
        }
        if !(self.tuning.base_interval_ms > 0.0) {
            return Err(DuelError::InvalidSettings(
                "base_interval_ms must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Clamp a slider reading into the control range
    pub fn clamp_control(&self, value: f32) -> f32 {
        value.clamp(self.control_min as f32, self.control_max as f32)
    }
}

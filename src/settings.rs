//! Host settings
//!
//! Loaded from JSON handed over by the host page (or a file on native). Never
//! written back; there is no persistence.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::SIM_HZ;

/// Highest tick rate the driver accepts
pub const MAX_TICK_HZ: u32 = 240;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tick rate {0} Hz is outside 1..={max}", max = MAX_TICK_HZ)]
    TickRate(u32),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Ticks per second fed to the simulation
    pub tick_hz: u32,
    /// Fixed run seed; a time-based seed is used when absent
    pub seed: Option<u64>,

    // === Visual Effects ===
    /// Glow halos around neon shapes
    pub glow: bool,
    /// Skip the 180° scene rotation during flip (invulnerability still applies)
    pub reduced_motion: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_hz: SIM_HZ,
            seed: None,
            glow: true,
            reduced_motion: false,
            show_fps: false,
        }
    }
}

impl Settings {
    /// Parse and validate settings. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.tick_hz == 0 || self.tick_hz > MAX_TICK_HZ {
            return Err(SettingsError::TickRate(self.tick_hz));
        }
        Ok(())
    }

    /// Whether the renderer should turn the scene upside down
    pub fn effective_flip_rotation(&self, flipped: bool) -> bool {
        flipped && !self.reduced_motion
    }

    /// Load from JSON, falling back to defaults with a warning
    pub fn load_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(settings)) => {
                log::info!("Loaded settings ({} Hz)", settings.tick_hz);
                settings
            }
            Some(Err(e)) => {
                log::warn!("Ignoring settings: {}", e);
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}

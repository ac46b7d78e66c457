//! Game settings and tuning
//!
//! Loaded from a JSON file; every field has a default so a partial file is
//! fine.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Settings loading/validation failures
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Collision & gestures ===
    /// Reach tolerance added to every object radius (pixels)
    pub collision_radius: f32,
    /// Minimum seconds between accepted fist clicks
    pub fist_cooldown: f64,

    // === Session timing ===
    /// Length of the pre-play countdown (seconds)
    pub countdown_seconds: f32,
    /// Opaque cover duration before the game over screen is revealed
    pub game_over_reveal_seconds: f32,
    /// Target frame rate of the outer loop
    pub target_fps: u32,

    // === Window ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Audio ===
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub music_enabled: bool,
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            collision_radius: COLLISION_RADIUS,
            fist_cooldown: FIST_COOLDOWN,

            countdown_seconds: COUNTDOWN_SECONDS,
            game_over_reveal_seconds: GAME_OVER_REVEAL_SECONDS,
            target_fps: TARGET_FPS,

            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            music_volume: 0.7,
            sfx_volume: 1.0,
            music_enabled: true,
            sound_enabled: true,
        }
    }
}

impl Settings {
    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load from `path` if given, falling back to defaults on any failure
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{} ({}), using default settings", e, path.display());
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Reject values the session cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &str) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.to_string(),
            }
        }

        // NaN fails every range check
        if self.collision_radius.is_nan() || self.collision_radius < 0.0 {
            return Err(invalid("collision_radius", "must be >= 0"));
        }
        if self.fist_cooldown.is_nan() || self.fist_cooldown < 0.0 {
            return Err(invalid("fist_cooldown", "must be >= 0"));
        }
        if self.countdown_seconds.is_nan() || self.countdown_seconds <= 0.0 {
            return Err(invalid("countdown_seconds", "must be > 0"));
        }
        if self.game_over_reveal_seconds.is_nan() || self.game_over_reveal_seconds < 0.0 {
            return Err(invalid("game_over_reveal_seconds", "must be >= 0"));
        }
        if self.target_fps == 0 {
            return Err(invalid("target_fps", "must be > 0"));
        }
        let bad_side = |side: f32| side.is_nan() || side <= 0.0;
        if bad_side(self.screen_width) || bad_side(self.screen_height) {
            return Err(invalid("screen_width/screen_height", "must be > 0"));
        }
        Ok(())
    }

    /// Nominal frame duration for `target_fps`
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.target_fps as f32
    }
}

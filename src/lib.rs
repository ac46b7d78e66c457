//! Cam-Fu - a camera-driven punching game
//!
//! Core modules:
//! - `sim`: Collision engine, gesture gating and the session state machine
//! - `game`: Frame driver wiring the session to pose, scoring and audio
//! - `view`: Per-frame render plan derived from the session
//! - `audio`: Audio cues and mixer state
//! - `settings`: JSON-backed tuning and preferences

pub mod audio;
pub mod game;
pub mod settings;
pub mod sim;
pub mod view;

pub use game::{CameraError, FrameError, FrameStatus, Game, PoseFrame, PoseSource, Scoreboard};
pub use settings::{ConfigError, Settings};

/// Game configuration constants
pub mod consts {
    /// Target frame rate of the outer loop
    pub const TARGET_FPS: u32 = 60;
    /// Nominal frame duration; real frames use measured time
    pub const FRAME_DT: f32 = 1.0 / TARGET_FPS as f32;

    /// Default window size
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Reach added to every object's radius (pixels)
    pub const COLLISION_RADIUS: f32 = 30.0;
    /// Minimum time between accepted fist clicks (seconds)
    pub const FIST_COOLDOWN: f64 = 0.5;

    /// Countdown length before play (seconds)
    pub const COUNTDOWN_SECONDS: f32 = 3.0;
    /// Black cover duration at game over (seconds)
    pub const GAME_OVER_REVEAL_SECONDS: f32 = 2.5;
    /// Darkening applied over the play-field during the countdown
    pub const COUNTDOWN_DIM_ALPHA: u8 = 180;
}

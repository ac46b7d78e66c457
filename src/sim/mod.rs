//! Core game logic
//!
//! Everything in here is pure with respect to the outside world:
//! - No camera, rendering or audio backends
//! - Time only enters through each frame's `dt` and `now`
//! - Absent tracking data is `None`, never a placeholder point

pub mod collision;
pub mod geometry;
pub mod interaction;
pub mod menu;
pub mod objects;
pub mod pose;
pub mod state;
pub mod tick;

pub use collision::CollisionEngine;
pub use geometry::{Point2D, closest_point_on_segment, distance, distance_to_segment};
pub use interaction::{ButtonPress, CooldownGate, HitEvent, InteractionEvent, InteractionResolver};
pub use menu::{ButtonId, MenuButton, MenuLayout};
pub use objects::{GameObject, ObjectKind};
pub use pose::{
    BODY_LANDMARKS, HandInfo, HandSample, HandSide, LANDMARK_COUNT, LIMB_SEGMENTS, Landmarks,
    PoseLandmark,
};
pub use state::{
    CountdownTimer, GameOverTimer, RevealPhase, Session, SessionEvent, SessionState,
};
pub use tick::{FrameInput, FrameOutcome, InputEvent, tick};

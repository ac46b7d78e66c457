//! One frame of session logic
//!
//! Frames are variable-step: `dt` is the measured time since the previous
//! frame and drives every timer. Discrete input is handled first, so a cancel
//! or quit in this frame's batch wins over anything the gestures would do.

use serde::{Deserialize, Serialize};

use super::objects::GameObject;
use super::pose::{HandInfo, Landmarks};
use super::state::{Session, SessionEvent, SessionState};

/// Discrete input the core reacts to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Window closed or quit key
    Quit,
    /// Escape: back to the menu from anywhere
    Cancel,
    /// Manual restart from the game over screen
    Restart,
    /// Window size changed
    Resize { width: f32, height: f32 },
    /// Mute/unmute background music
    ToggleMusic,
    /// Mute/unmute sound effects
    ToggleSound,
    MusicVolumeUp,
    MusicVolumeDown,
    /// Anything the core does not care about
    Other,
}

/// Everything the core consumes for one frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Seconds since the previous frame
    pub dt: f32,
    /// Monotonic clock in seconds
    pub now: f64,
    /// Discrete input in arrival order
    pub events: Vec<InputEvent>,
    /// `None` when no body was detected
    pub landmarks: Option<Landmarks>,
    pub hands: HandInfo,
}

/// What one frame produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutcome {
    pub events: Vec<SessionEvent>,
    /// Stop the outer loop
    pub quit: bool,
}

/// Run one frame of the session
///
/// `objects` is the scoring side's snapshot and is only looked at during play.
pub fn tick(session: &mut Session, input: &FrameInput, objects: &[GameObject]) -> FrameOutcome {
    let mut out = FrameOutcome::default();

    for &event in &input.events {
        if event == InputEvent::Quit {
            out.quit = true;
            return out;
        }
        session.handle_input(event, &mut out.events);
    }

    // Only the screen active after input handling runs this frame
    match session.state() {
        SessionState::Menu | SessionState::Credits | SessionState::Guide => {
            session.poll_buttons(&input.hands, input.now, &mut out.events);
        }
        SessionState::Countdown | SessionState::GameOver => {
            session.advance(input.dt, input.now, &mut out.events);
        }
        SessionState::Play => {
            session.advance(input.dt, input.now, &mut out.events);
            session.resolve_hits(
                input.landmarks.as_ref(),
                &input.hands,
                objects,
                input.now,
                &mut out.events,
            );
        }
    }

    out
}

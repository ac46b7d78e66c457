//! Turning raw collisions into accepted interactions
//!
//! Gesture state is a level signal: a fist held over a button stays "clicked"
//! for as many frames as it is held. The only thing that stops one sustained
//! fist from firing every frame is the global [`CooldownGate`].

use serde::{Deserialize, Serialize};

use super::collision::CollisionEngine;
use super::menu::{ButtonId, MenuButton};
use super::objects::{GameObject, ObjectKind};
use super::pose::{HandInfo, HandSide, Landmarks};
use crate::consts::FIST_COOLDOWN;

/// Minimum spacing between any two accepted gesture actions
///
/// One gate guards every button and both hands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CooldownGate {
    /// Time of the last accepted action, `None` before the first
    last_accept_time: Option<f64>,
    cooldown_seconds: f64,
}

impl Default for CooldownGate {
    fn default() -> Self {
        Self::new(FIST_COOLDOWN)
    }
}

impl CooldownGate {
    pub fn new(cooldown_seconds: f64) -> Self {
        Self {
            last_accept_time: None,
            cooldown_seconds,
        }
    }

    pub fn cooldown_seconds(&self) -> f64 {
        self.cooldown_seconds
    }

    pub fn last_accept_time(&self) -> Option<f64> {
        self.last_accept_time
    }

    /// Whether an action at `now` would pass the gate
    pub fn is_open(&self, now: f64) -> bool {
        match self.last_accept_time {
            Some(last) => now - last > self.cooldown_seconds,
            None => true,
        }
    }

    /// Accept a candidate if the gate is open, stamping `now` on success
    pub fn try_accept(&mut self, candidate: Option<HandSide>, now: f64) -> bool {
        if candidate.is_none() || !self.is_open(now) {
            return false;
        }
        self.last_accept_time = Some(now);
        true
    }
}

/// A gated hand-on-object event, forwarded to scoring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionEvent {
    pub side: HandSide,
    /// Object id
    pub target: u32,
    pub timestamp: f64,
}

/// A button activated by a closed fist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonPress {
    pub button: ButtonId,
    pub side: HandSide,
}

/// Object contact found during play
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HitEvent {
    /// Fist on a target
    Punch(InteractionEvent),
    /// Any hand on a powerup
    Grab(InteractionEvent),
    /// Body or arm touched an obstacle
    Obstacle { target: u32, timestamp: f64 },
}

impl HitEvent {
    pub fn target(&self) -> u32 {
        match self {
            Self::Punch(e) | Self::Grab(e) => e.target,
            Self::Obstacle { target, .. } => *target,
        }
    }
}

/// Collision engine plus the session-wide cooldown gate
#[derive(Debug, Clone, Default)]
pub struct InteractionResolver {
    engine: CollisionEngine,
    gate: CooldownGate,
}

impl InteractionResolver {
    pub fn new(engine: CollisionEngine, gate: CooldownGate) -> Self {
        Self { engine, gate }
    }

    pub fn engine(&self) -> &CollisionEngine {
        &self.engine
    }

    pub fn gate(&self) -> &CooldownGate {
        &self.gate
    }

    /// Gate an already-detected candidate
    pub fn try_accept(&mut self, candidate: Option<HandSide>, now: f64) -> bool {
        self.gate.try_accept(candidate, now)
    }

    /// First button touched by a closed fist, if the gate lets it through
    ///
    /// Buttons are checked in layout order. A rejected candidate does not
    /// fall through to later buttons: the gate is closed for all of them.
    pub fn resolve_button(
        &mut self,
        hands: &HandInfo,
        buttons: &[MenuButton],
        now: f64,
    ) -> Option<ButtonPress> {
        let (button, side) = buttons.iter().find_map(|b| {
            self.engine
                .hand_collision(&hands.left, &hands.right, b.center, b.radius, true)
                .map(|side| (b.id, side))
        })?;

        if !self.gate.try_accept(Some(side), now) {
            return None;
        }
        log::debug!("button {} pressed with {} hand", button.as_str(), side.as_str());
        Some(ButtonPress { button, side })
    }

    /// Object contacts for one play frame
    ///
    /// Targets need a fist, powerups take any hand, obstacles test the body
    /// keypoints and arm segments. These hits are not cooldown-gated; removal
    /// after a hit is up to scoring.
    pub fn resolve_hits(
        &self,
        landmarks: Option<&Landmarks>,
        hands: &HandInfo,
        objects: &[GameObject],
        now: f64,
    ) -> Vec<HitEvent> {
        let e = &self.engine;
        objects
            .iter()
            .filter_map(|obj| match obj.kind {
                ObjectKind::Target => e
                    .hand_collision(&hands.left, &hands.right, obj.position, obj.radius, true)
                    .map(|side| {
                        HitEvent::Punch(InteractionEvent {
                            side,
                            target: obj.id,
                            timestamp: now,
                        })
                    }),
                ObjectKind::Powerup => e
                    .hand_collision(&hands.left, &hands.right, obj.position, obj.radius, false)
                    .map(|side| {
                        HitEvent::Grab(InteractionEvent {
                            side,
                            target: obj.id,
                            timestamp: now,
                        })
                    }),
                ObjectKind::Obstacle => {
                    let lm = landmarks?;
                    let touched = e.body_collision(lm.body_points(), obj.position, obj.radius)
                        || lm
                            .limb_segments()
                            .any(|(a, b)| e.limb_collision(a, b, obj.position, obj.radius));
                    touched.then_some(HitEvent::Obstacle {
                        target: obj.id,
                        timestamp: now,
                    })
                }
            })
            .collect()
    }
}

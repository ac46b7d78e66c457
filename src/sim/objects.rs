//! Spawned game objects as the core sees them
//!
//! Spawning, movement and removal belong to the scoring side; the core only
//! reads a per-frame snapshot.

use serde::{Deserialize, Serialize};

use super::geometry::Point2D;

/// Object categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Punchable, needs a closed fist
    Target,
    /// Must be avoided with the whole body
    Obstacle,
    /// Grabbable with any hand contact
    Powerup,
}

/// A circular on-screen object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameObject {
    pub id: u32,
    pub position: Point2D,
    pub radius: f32,
    pub kind: ObjectKind,
}

impl GameObject {
    pub fn new(id: u32, kind: ObjectKind, position: Point2D, radius: f32) -> Self {
        Self {
            id,
            position,
            radius,
            kind,
        }
    }
}

//! Collision queries between tracked body parts and game objects
//!
//! Every query is pure and total: a missing landmark or hand is simply a
//! miss. The engine's `collision_radius` is a reach tolerance added to every
//! object's own radius, so reach can be tuned without resizing objects.

use super::geometry::{Point2D, closest_point_on_segment, distance};
use super::pose::{HandSample, HandSide};
use crate::consts::COLLISION_RADIUS;

/// Stateless collision engine with a fixed reach tolerance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEngine {
    collision_radius: f32,
}

impl Default for CollisionEngine {
    fn default() -> Self {
        Self::new(COLLISION_RADIUS)
    }
}

impl CollisionEngine {
    pub fn new(collision_radius: f32) -> Self {
        Self { collision_radius }
    }

    #[inline]
    pub fn collision_radius(&self) -> f32 {
        self.collision_radius
    }

    /// Contact threshold for an object of the given radius
    #[inline]
    fn reach(&self, object_radius: f32) -> f32 {
        self.collision_radius + object_radius
    }

    /// Point vs circle
    ///
    /// Strict inequality: exactly touching at the boundary is a miss.
    pub fn collides(&self, point: Option<Point2D>, center: Point2D, object_radius: f32) -> bool {
        match point {
            Some(p) => distance(p, center) < self.reach(object_radius),
            None => false,
        }
    }

    /// Which hand, if any, hits the object
    ///
    /// The left hand is checked first and wins ties. With `require_fist` a
    /// geometric hit only counts while that hand is closed.
    pub fn hand_collision(
        &self,
        left: &HandSample,
        right: &HandSample,
        center: Point2D,
        object_radius: f32,
        require_fist: bool,
    ) -> Option<HandSide> {
        [(HandSide::Left, left), (HandSide::Right, right)]
            .into_iter()
            .find(|(_, hand)| {
                self.collides(hand.position, center, object_radius) && (!require_fist || hand.is_fist)
            })
            .map(|(side, _)| side)
    }

    /// True if any present body point collides
    pub fn body_collision<I>(&self, body_points: I, center: Point2D, object_radius: f32) -> bool
    where
        I: IntoIterator<Item = Option<Point2D>>,
    {
        body_points
            .into_iter()
            .any(|p| self.collides(p, center, object_radius))
    }

    /// Segment `[joint_a, joint_b]` vs circle
    ///
    /// Misses immediately if either joint is absent.
    pub fn limb_collision(
        &self,
        joint_a: Option<Point2D>,
        joint_b: Option<Point2D>,
        center: Point2D,
        object_radius: f32,
    ) -> bool {
        let (Some(a), Some(b)) = (joint_a, joint_b) else {
            return false;
        };

        if self.collides(Some(a), center, object_radius) || self.collides(Some(b), center, object_radius) {
            return true;
        }

        let closest = closest_point_on_segment(center, a, b);
        self.collides(Some(closest), center, object_radius)
    }
}

//! Tracked body data handed to the core once per frame
//!
//! Landmark extraction and fist classification happen upstream. These types
//! only carry their results, with `None` wherever nothing was detected.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Point2D;

/// Which hand produced an interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandSide {
    Left,
    Right,
}

impl HandSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// One hand as seen this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HandSample {
    /// Palm position, `None` when the hand was not found
    pub position: Option<Point2D>,
    /// Closed-hand classification for this frame
    pub is_fist: bool,
}

impl HandSample {
    pub fn new(position: Point2D, is_fist: bool) -> Self {
        Self {
            position: Some(position),
            is_fist,
        }
    }

    /// A hand that was not detected
    pub fn absent() -> Self {
        Self::default()
    }
}

/// Both hands for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HandInfo {
    pub left: HandSample,
    pub right: HandSample,
}

impl HandInfo {
    pub fn new(left: HandSample, right: HandSample) -> Self {
        Self { left, right }
    }

    pub fn hand(&self, side: HandSide) -> &HandSample {
        match side {
            HandSide::Left => &self.left,
            HandSide::Right => &self.right,
        }
    }
}

/// The 33 body keypoints produced by the pose model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoseLandmark {
    Nose,
    LeftEyeInner,
    LeftEye,
    LeftEyeOuter,
    RightEyeInner,
    RightEye,
    RightEyeOuter,
    LeftEar,
    RightEar,
    MouthLeft,
    MouthRight,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftPinky,
    RightPinky,
    LeftIndex,
    RightIndex,
    LeftThumb,
    RightThumb,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftHeel,
    RightHeel,
    LeftFootIndex,
    RightFootIndex,
}

/// Number of pose landmarks
pub const LANDMARK_COUNT: usize = 33;

impl PoseLandmark {
    /// Array index (0-32), matching the pose model's numbering
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Index fingertip of the given hand, used as the menu cursor
    pub fn index_finger(side: HandSide) -> Self {
        match side {
            HandSide::Left => Self::LeftIndex,
            HandSide::Right => Self::RightIndex,
        }
    }
}

/// Keypoints that count as "the body" when dodging obstacles
pub const BODY_LANDMARKS: [PoseLandmark; 5] = [
    PoseLandmark::Nose,
    PoseLandmark::LeftShoulder,
    PoseLandmark::RightShoulder,
    PoseLandmark::LeftHip,
    PoseLandmark::RightHip,
];

/// Arm segments tested against obstacles (forearms, then upper arms)
pub const LIMB_SEGMENTS: [(PoseLandmark, PoseLandmark); 4] = [
    (PoseLandmark::LeftWrist, PoseLandmark::LeftElbow),
    (PoseLandmark::RightWrist, PoseLandmark::RightElbow),
    (PoseLandmark::LeftElbow, PoseLandmark::LeftShoulder),
    (PoseLandmark::RightElbow, PoseLandmark::RightShoulder),
];

/// Screen-space landmark positions for one detected body
#[derive(Debug, Clone, PartialEq)]
pub struct Landmarks {
    points: [Option<Point2D>; LANDMARK_COUNT],
}

impl Default for Landmarks {
    fn default() -> Self {
        Self {
            points: [None; LANDMARK_COUNT],
        }
    }
}

impl Landmarks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of a landmark, `None` when it was not resolved
    pub fn get(&self, landmark: PoseLandmark) -> Option<Point2D> {
        self.points[landmark.index()]
    }

    pub fn set(&mut self, landmark: PoseLandmark, position: Option<Point2D>) {
        self.points[landmark.index()] = position;
    }

    /// Builder-style setter
    pub fn with(mut self, landmark: PoseLandmark, x: f32, y: f32) -> Self {
        self.set(landmark, Some(Vec2::new(x, y)));
        self
    }

    /// Body keypoints in [`BODY_LANDMARKS`] order
    pub fn body_points(&self) -> impl Iterator<Item = Option<Point2D>> + '_ {
        BODY_LANDMARKS.iter().map(|&lm| self.get(lm))
    }

    /// Endpoint pairs in [`LIMB_SEGMENTS`] order
    pub fn limb_segments(&self) -> impl Iterator<Item = (Option<Point2D>, Option<Point2D>)> + '_ {
        LIMB_SEGMENTS.iter().map(|&(a, b)| (self.get(a), self.get(b)))
    }
}

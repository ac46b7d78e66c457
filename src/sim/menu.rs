//! Gesture-driven menu buttons
//!
//! Buttons are circles so the same collision engine that handles punches
//! also handles "fist on button" clicks. Positions scale with the window.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Point2D, distance};
use super::state::SessionState;

/// Interactive buttons across the menu screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ButtonId {
    Start,
    Guide,
    Credits,
    /// Return from Credits/Guide
    Back,
}

impl ButtonId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Guide => "guide",
            Self::Credits => "credits",
            Self::Back => "back",
        }
    }
}

/// A circular button
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MenuButton {
    pub id: ButtonId,
    pub center: Point2D,
    pub radius: f32,
}

impl MenuButton {
    /// Whether a cursor is within `reach` of the button face
    ///
    /// Pass the collision radius so hover matches what a fist would click.
    pub fn contains(&self, point: Point2D, reach: f32) -> bool {
        distance(point, self.center) < self.radius + reach
    }
}

/// Button placement for the current window size
#[derive(Debug, Clone, PartialEq)]
pub struct MenuLayout {
    main: [MenuButton; 3],
    back: [MenuButton; 1],
}

impl MenuLayout {
    /// Main column centered horizontally, back button in the lower left
    pub fn for_screen(width: f32, height: f32) -> Self {
        let radius = height * 0.07;
        let column_x = width * 0.5;
        let main = [
            MenuButton {
                id: ButtonId::Start,
                center: Vec2::new(column_x, height * 0.50),
                radius,
            },
            MenuButton {
                id: ButtonId::Guide,
                center: Vec2::new(column_x, height * 0.66),
                radius,
            },
            MenuButton {
                id: ButtonId::Credits,
                center: Vec2::new(column_x, height * 0.82),
                radius,
            },
        ];
        let back = [MenuButton {
            id: ButtonId::Back,
            center: Vec2::new(width * 0.1, height * 0.86),
            radius,
        }];
        Self { main, back }
    }

    /// Buttons that are live on a given screen
    pub fn buttons(&self, state: SessionState) -> &[MenuButton] {
        match state {
            SessionState::Menu => &self.main,
            SessionState::Credits | SessionState::Guide => &self.back,
            SessionState::Countdown | SessionState::Play | SessionState::GameOver => &[],
        }
    }

    pub fn button(&self, id: ButtonId) -> &MenuButton {
        match id {
            ButtonId::Start => &self.main[0],
            ButtonId::Guide => &self.main[1],
            ButtonId::Credits => &self.main[2],
            ButtonId::Back => &self.back[0],
        }
    }

    /// Button under a cursor on the given screen
    pub fn hovered(&self, state: SessionState, cursor: Option<Point2D>, reach: f32) -> Option<ButtonId> {
        let cursor = cursor?;
        self.buttons(state)
            .iter()
            .find(|b| b.contains(cursor, reach))
            .map(|b| b.id)
    }
}

impl Default for MenuLayout {
    fn default() -> Self {
        Self::for_screen(crate::consts::SCREEN_WIDTH, crate::consts::SCREEN_HEIGHT)
    }
}

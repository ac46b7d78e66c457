//! What the renderer should draw for the current session
//!
//! Drawing itself happens elsewhere. This turns the session state, its timers
//! and the tracked index fingers into a small description of the frame.

use glam::Vec2;

use crate::consts::COUNTDOWN_DIM_ALPHA;
use crate::sim::{HandSide, Landmarks, MenuLayout, PoseLandmark, RevealPhase, Session, SessionState};

/// Full-screen background layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backdrop {
    /// Mirrored camera feed
    Camera,
    /// Play-field background image
    PlayField,
    /// Opaque black
    Black,
    /// Last play scene (objects, stickman, HUD)
    FrozenScene,
}

/// Foreground content
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Overlay {
    MainMenu,
    Credits,
    Guide,
    /// Dimmed backdrop with a big digit
    Countdown { digit: u8, dim_alpha: u8 },
    /// Objects, stickman, hand indicators and HUD
    Hud,
    /// Nothing on top of the black cover
    None,
    /// Score screen with restart prompt
    GameOverScore { play_seconds: f64, can_restart: bool },
}

/// Index-finger cursors for menu navigation
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cursors {
    pub left: Option<Vec2>,
    pub right: Option<Vec2>,
    /// Highlighted cursor
    pub active: Option<Vec2>,
}

impl Cursors {
    /// Pick the highlighted cursor
    ///
    /// A cursor hovering a button wins (right before left); otherwise the
    /// right hand, otherwise the left. `reach` is the collision radius a fist
    /// click uses, so a highlighted button is one a fist there would press.
    pub fn select(
        layout: &MenuLayout,
        state: SessionState,
        landmarks: Option<&Landmarks>,
        reach: f32,
    ) -> Self {
        let Some(lm) = landmarks else {
            return Self::default();
        };
        let left = lm.get(PoseLandmark::index_finger(HandSide::Left));
        let right = lm.get(PoseLandmark::index_finger(HandSide::Right));

        let active = if layout.hovered(state, right, reach).is_some() {
            right
        } else if layout.hovered(state, left, reach).is_some() {
            left
        } else {
            right.or(left)
        };

        Self { left, right, active }
    }
}

/// Render plan for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameView {
    pub backdrop: Backdrop,
    pub overlay: Overlay,
    /// Hidden during play
    pub cursors: Option<Cursors>,
}

/// Describe the frame for the session's current state
pub fn plan(session: &Session, landmarks: Option<&Landmarks>) -> FrameView {
    let state = session.state();
    let (backdrop, overlay) = match state {
        SessionState::Menu => (Backdrop::Camera, Overlay::MainMenu),
        SessionState::Credits => (Backdrop::Camera, Overlay::Credits),
        SessionState::Guide => (Backdrop::Camera, Overlay::Guide),
        SessionState::Countdown => {
            let digit = session.countdown().and_then(|t| t.digit()).unwrap_or(1);
            (
                Backdrop::PlayField,
                Overlay::Countdown {
                    digit,
                    dim_alpha: COUNTDOWN_DIM_ALPHA,
                },
            )
        }
        SessionState::Play => (Backdrop::PlayField, Overlay::Hud),
        SessionState::GameOver => match session.game_over_timer() {
            Some(timer) if timer.phase() == RevealPhase::Revealed => (
                Backdrop::FrozenScene,
                Overlay::GameOverScore {
                    play_seconds: session.play_duration(),
                    can_restart: timer.accepts_restart(),
                },
            ),
            _ => (Backdrop::Black, Overlay::None),
        },
    };

    let reach = session.resolver().engine().collision_radius();
    let cursors =
        (state != SessionState::Play).then(|| Cursors::select(session.layout(), state, landmarks, reach));

    FrameView {
        backdrop,
        overlay,
        cursors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::COLLISION_RADIUS;
    use crate::sim::{ButtonId, ButtonPress, FrameInput, HandInfo, HandSample, InputEvent, tick};

    fn press(session: &mut Session, button: ButtonId) {
        let mut ev = Vec::new();
        session.press_button(
            ButtonPress {
                button,
                side: HandSide::Left,
            },
            &mut ev,
        );
    }

    #[test]
    fn test_menu_uses_camera() {
        let session = Session::default();
        let view = plan(&session, None);
        assert_eq!(view.backdrop, Backdrop::Camera);
        assert_eq!(view.overlay, Overlay::MainMenu);
        assert_eq!(view.cursors, Some(Cursors::default()));
    }

    #[test]
    fn test_countdown_overlay() {
        let mut session = Session::default();
        press(&mut session, ButtonId::Start);
        let view = plan(&session, None);
        assert_eq!(view.backdrop, Backdrop::PlayField);
        assert_eq!(
            view.overlay,
            Overlay::Countdown {
                digit: 3,
                dim_alpha: COUNTDOWN_DIM_ALPHA
            }
        );
    }

    #[test]
    fn test_play_hides_cursors() {
        let mut session = Session::default();
        press(&mut session, ButtonId::Start);
        session.advance(3.1, 3.1, &mut Vec::new());
        let lm = Landmarks::new().with(PoseLandmark::RightIndex, 10.0, 10.0);
        let view = plan(&session, Some(&lm));
        assert_eq!(view.overlay, Overlay::Hud);
        assert_eq!(view.cursors, None);
    }

    #[test]
    fn test_game_over_cover_then_reveal() {
        let mut session = Session::default();
        press(&mut session, ButtonId::Start);
        let mut ev = Vec::new();
        session.advance(3.1, 3.1, &mut ev);
        session.advance(0.0, 13.1, &mut ev);
        session.report_terminal(&mut ev);

        let view = plan(&session, None);
        assert_eq!(view.backdrop, Backdrop::Black);
        assert_eq!(view.overlay, Overlay::None);

        session.advance(2.5, 0.0, &mut ev);
        let view = plan(&session, None);
        assert_eq!(view.backdrop, Backdrop::FrozenScene);
        match view.overlay {
            Overlay::GameOverScore {
                play_seconds,
                can_restart,
            } => {
                assert!((play_seconds - 10.0).abs() < 1e-6);
                assert!(!can_restart);
            }
            other => panic!("unexpected overlay {other:?}"),
        }

        session.handle_input(InputEvent::Cancel, &mut ev);
        assert_eq!(plan(&session, None).overlay, Overlay::MainMenu);
    }

    #[test]
    fn test_active_cursor_prefers_hover() {
        let layout = MenuLayout::default();
        let start = layout.button(ButtonId::Start).center;

        // Left hovers a button, right is in empty space
        let lm = Landmarks::new()
            .with(PoseLandmark::LeftIndex, start.x, start.y)
            .with(PoseLandmark::RightIndex, 5.0, 5.0);
        let c = Cursors::select(&layout, SessionState::Menu, Some(&lm), 0.0);
        assert_eq!(c.active, Some(start));

        // Nobody hovers: right hand wins
        let lm = Landmarks::new()
            .with(PoseLandmark::LeftIndex, 1.0, 1.0)
            .with(PoseLandmark::RightIndex, 5.0, 5.0);
        let c = Cursors::select(&layout, SessionState::Menu, Some(&lm), 0.0);
        assert_eq!(c.active, Some(Vec2::new(5.0, 5.0)));

        // Only the left hand is tracked
        let lm = Landmarks::new().with(PoseLandmark::LeftIndex, 1.0, 1.0);
        let c = Cursors::select(&layout, SessionState::Menu, Some(&lm), 0.0);
        assert_eq!(c.active, Some(Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_highlight_matches_fist_click() {
        let mut session = Session::default();
        let start = session.layout().button(ButtonId::Start);
        // Outside the face, inside the click reach
        let p = start.center + Vec2::new(start.radius + COLLISION_RADIUS - 5.0, 0.0);
        // Left hand near Start, right hand in empty space
        let lm = Landmarks::new()
            .with(PoseLandmark::LeftIndex, p.x, p.y)
            .with(PoseLandmark::RightIndex, 5.0, 5.0);

        let view = plan(&session, Some(&lm));
        assert_eq!(view.cursors.and_then(|c| c.active), Some(p));

        let input = FrameInput {
            hands: HandInfo::new(HandSample::new(p, true), HandSample::absent()),
            ..Default::default()
        };
        tick(&mut session, &input, &[]);
        assert_eq!(session.state(), SessionState::Countdown);
    }
}

//! Frame driver
//!
//! Wires a [`Session`] to its collaborators: the pose source that reads the
//! camera, the scoreboard that owns spawned objects and the audio sink. One
//! call to [`Game::frame`] is one iteration of the outer loop.

use crate::audio::{AudioSink, Music};
use crate::settings::Settings;
use crate::sim::{
    FrameInput, GameObject, HandInfo, HitEvent, InputEvent, Landmarks, Session, SessionEvent,
    SessionState, tick,
};
use crate::view::{self, FrameView};

/// Camera/pose acquisition failures
#[derive(thiserror::Error, Debug)]
pub enum CameraError {
    #[error("camera disconnected")]
    Disconnected,

    #[error("failed to read camera frame: {0}")]
    ReadFailed(String),
}

/// Errors that end the frame loop
#[derive(thiserror::Error, Debug)]
pub enum FrameError {
    #[error(transparent)]
    Camera(#[from] CameraError),
}

/// Tracking results for one camera frame
#[derive(Debug, Clone, Default)]
pub struct PoseFrame {
    /// `None` when no body was detected
    pub landmarks: Option<Landmarks>,
    pub hands: HandInfo,
}

/// Reads the camera and runs pose/hand inference
pub trait PoseSource {
    /// Block for the next frame
    fn next_frame(&mut self) -> Result<PoseFrame, CameraError>;
}

/// Spawning and scoring
pub trait Scoreboard {
    /// Currently active objects
    fn objects(&self) -> &[GameObject];
    /// Spawn/move/expire objects; only called while playing
    fn update(&mut self, dt: f32, now: f64);
    fn on_hit(&mut self, hit: &HitEvent);
    fn is_game_over(&self) -> bool;
    /// Start a fresh run
    fn reset(&mut self);
    /// Spawn area changed to the new window size
    fn resize(&mut self, width: f32, height: f32);
}

/// Result of one frame
#[derive(Debug, Clone, PartialEq)]
pub enum FrameStatus {
    Running(FrameView),
    Quit,
}

/// Rolling frame rate over the last 60 frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; 60],
    frame_index: usize,
    filled: bool,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            filled: false,
            fps: 0,
        }
    }
}

impl FpsCounter {
    pub fn record(&mut self, now: f64) {
        self.frame_times[self.frame_index] = now;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();
        if self.frame_index == 0 {
            self.filled = true;
        }

        if self.filled {
            // Oldest sample is the one about to be overwritten
            let elapsed = now - self.frame_times[self.frame_index];
            if elapsed > 0.0 {
                self.fps = ((self.frame_times.len() - 1) as f64 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// Session plus collaborators
pub struct Game<P, S, A> {
    session: Session,
    pose: P,
    score: S,
    audio: A,
    fps: FpsCounter,
}

impl<P: PoseSource, S: Scoreboard, A: AudioSink> Game<P, S, A> {
    pub fn new(settings: &Settings, pose: P, score: S, mut audio: A) -> Self {
        audio.play_music(Music::Menu);
        Self {
            session: Session::new(settings),
            pose,
            score,
            audio,
            fps: FpsCounter::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn pose_mut(&mut self) -> &mut P {
        &mut self.pose
    }

    pub fn scoreboard(&self) -> &S {
        &self.score
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    /// Run one iteration of the loop
    ///
    /// Quit is honored before the camera is read. A camera failure is
    /// returned as an error; the caller decides whether to stop.
    pub fn frame(&mut self, dt: f32, now: f64, events: Vec<InputEvent>) -> Result<FrameStatus, FrameError> {
        if events.contains(&InputEvent::Quit) {
            log::info!("quit requested");
            return Ok(FrameStatus::Quit);
        }

        for event in &events {
            match event {
                InputEvent::ToggleMusic => self.audio.toggle_music(),
                InputEvent::ToggleSound => self.audio.toggle_sound(),
                InputEvent::MusicVolumeUp => self.audio.nudge_music_volume(true),
                InputEvent::MusicVolumeDown => self.audio.nudge_music_volume(false),
                _ => {}
            }
        }

        let pose = self.pose.next_frame().inspect_err(|e| log::error!("{e}"))?;

        if self.session.state() == SessionState::Play {
            self.score.update(dt, now);
        }

        let input = FrameInput {
            dt,
            now,
            events,
            landmarks: pose.landmarks,
            hands: pose.hands,
        };
        let outcome = tick(&mut self.session, &input, self.score.objects());
        if outcome.quit {
            return Ok(FrameStatus::Quit);
        }
        self.dispatch(&outcome.events);

        if self.session.state() == SessionState::Play && self.score.is_game_over() {
            let mut events = Vec::new();
            self.session.report_terminal(&mut events);
            self.dispatch(&events);
        }

        self.fps.record(now);
        Ok(FrameStatus::Running(view::plan(&self.session, input.landmarks.as_ref())))
    }

    fn dispatch(&mut self, events: &[SessionEvent]) {
        for event in events {
            match event {
                SessionEvent::Audio(cue) => self.audio.apply(*cue),
                SessionEvent::ResetGame => self.score.reset(),
                SessionEvent::Hit(hit) => self.score.on_hit(hit),
                SessionEvent::Resized { width, height } => self.score.resize(*width, *height),
                SessionEvent::Transition { .. } | SessionEvent::ButtonPressed(_) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioManager;
    use crate::consts::FRAME_DT;
    use crate::sim::{ButtonId, HandSample, MenuLayout, ObjectKind};
    use glam::Vec2;
    use std::collections::VecDeque;

    /// Replays queued frames, then reports a disconnect
    #[derive(Default)]
    struct ReplayPose {
        frames: VecDeque<PoseFrame>,
        fallback: Option<PoseFrame>,
        reads: usize,
    }

    impl PoseSource for ReplayPose {
        fn next_frame(&mut self) -> Result<PoseFrame, CameraError> {
            self.reads += 1;
            self.frames
                .pop_front()
                .or_else(|| self.fallback.clone())
                .ok_or(CameraError::Disconnected)
        }
    }

    #[derive(Default)]
    struct TestBoard {
        objects: Vec<GameObject>,
        hits: Vec<HitEvent>,
        resets: usize,
        updates: usize,
        over: bool,
        size: Option<(f32, f32)>,
    }

    impl Scoreboard for TestBoard {
        fn objects(&self) -> &[GameObject] {
            &self.objects
        }
        fn update(&mut self, _dt: f32, _now: f64) {
            self.updates += 1;
        }
        fn on_hit(&mut self, hit: &HitEvent) {
            self.hits.push(*hit);
            self.over = true;
        }
        fn is_game_over(&self) -> bool {
            self.over
        }
        fn reset(&mut self) {
            self.resets += 1;
            self.over = false;
        }
        fn resize(&mut self, width: f32, height: f32) {
            self.size = Some((width, height));
        }
    }

    fn fist(p: Vec2) -> PoseFrame {
        PoseFrame {
            landmarks: None,
            hands: HandInfo::new(HandSample::new(p, true), HandSample::absent()),
        }
    }

    fn game(pose: ReplayPose, board: TestBoard) -> Game<ReplayPose, TestBoard, AudioManager> {
        Game::new(&Settings::default(), pose, board, AudioManager::default())
    }

    #[test]
    fn test_quit_before_camera_read() {
        let mut g = game(ReplayPose::default(), TestBoard::default());
        let status = g.frame(FRAME_DT, 0.0, vec![InputEvent::Quit]).unwrap();
        assert_eq!(status, FrameStatus::Quit);
        assert_eq!(g.pose.reads, 0);
    }

    #[test]
    fn test_camera_failure_propagates() {
        let mut g = game(ReplayPose::default(), TestBoard::default());
        let err = g.frame(FRAME_DT, 0.0, Vec::new()).unwrap_err();
        assert!(matches!(err, FrameError::Camera(CameraError::Disconnected)));
    }

    #[test]
    fn test_run_until_scoreboard_ends_it() {
        let start = MenuLayout::default().button(ButtonId::Start).center;
        let target = Vec2::new(400.0, 300.0);
        let pose = ReplayPose {
            frames: VecDeque::from([fist(start)]),
            fallback: Some(fist(target)),
            reads: 0,
        };
        let board = TestBoard {
            objects: vec![GameObject::new(1, ObjectKind::Target, target, 20.0)],
            ..Default::default()
        };
        let mut g = game(pose, board);
        assert_eq!(g.audio().current_music(), Some(Music::Menu));

        let mut now = 0.0;
        g.frame(FRAME_DT, now, Vec::new()).unwrap();
        assert_eq!(g.session().state(), SessionState::Countdown);
        assert_eq!(g.scoreboard().resets, 1);
        assert_eq!(g.audio().current_music(), None);

        while g.session().state() == SessionState::Countdown {
            now += FRAME_DT as f64;
            g.frame(FRAME_DT, now, Vec::new()).unwrap();
        }
        assert_eq!(g.audio().current_music(), Some(Music::Gameplay));

        // First play frame punches the target and the board calls it over
        now += FRAME_DT as f64;
        let status = g.frame(FRAME_DT, now, Vec::new()).unwrap();
        assert_eq!(g.scoreboard().hits.len(), 1);
        assert_eq!(g.scoreboard().updates, 1);
        assert_eq!(g.session().state(), SessionState::GameOver);
        assert_eq!(g.audio().current_music(), None);
        assert!(matches!(status, FrameStatus::Running(_)));

        now += FRAME_DT as f64;
        g.frame(FRAME_DT, now, vec![InputEvent::Cancel]).unwrap();
        assert_eq!(g.session().state(), SessionState::Menu);
        assert_eq!(g.audio().current_music(), Some(Music::Menu));
    }

    #[test]
    fn test_mixer_keys_reach_audio() {
        let pose = ReplayPose {
            fallback: Some(PoseFrame::default()),
            ..Default::default()
        };
        let mut g = game(pose, TestBoard::default());
        let volume = g.audio().music_volume();
        assert!(g.audio().music_enabled());

        g.frame(
            FRAME_DT,
            0.0,
            vec![InputEvent::ToggleMusic, InputEvent::MusicVolumeDown],
        )
        .unwrap();
        assert!(!g.audio().music_enabled());
        assert!((g.audio().music_volume() - (volume - 0.1)).abs() < 1e-6);
        assert!(g.audio().sound_enabled());

        g.frame(
            FRAME_DT,
            FRAME_DT as f64,
            vec![InputEvent::ToggleSound, InputEvent::MusicVolumeUp],
        )
        .unwrap();
        assert!(!g.audio().sound_enabled());
        assert!((g.audio().music_volume() - volume).abs() < 1e-6);
        assert_eq!(g.session().state(), SessionState::Menu);
    }

    #[test]
    fn test_resize_reaches_scoreboard() {
        let pose = ReplayPose {
            fallback: Some(PoseFrame::default()),
            ..Default::default()
        };
        let mut g = game(pose, TestBoard::default());
        g.frame(
            FRAME_DT,
            0.0,
            vec![InputEvent::Resize {
                width: 1920.0,
                height: 1080.0,
            }],
        )
        .unwrap();
        assert_eq!(g.scoreboard().size, Some((1920.0, 1080.0)));
        assert_eq!(g.session().layout(), &MenuLayout::for_screen(1920.0, 1080.0));
    }

    #[test]
    fn test_fps_counter() {
        let mut fps = FpsCounter::default();
        for i in 0..120 {
            fps.record(i as f64 / 60.0);
        }
        assert_eq!(fps.fps(), 60);
    }
}

//! Cam-Fu headless demo
//!
//! Runs the session against a scripted player and a small spawner so the
//! whole menu → countdown → play → game over loop can be watched in the log
//! without a camera. Pass a settings JSON path as the first argument.

use std::path::PathBuf;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use cam_fu::audio::AudioManager;
use cam_fu::sim::{
    ButtonId, GameObject, HandInfo, HandSample, HitEvent, InputEvent, Landmarks, ObjectKind,
    PoseLandmark, RevealPhase, SessionState,
};
use cam_fu::view::{FrameView, Overlay};
use cam_fu::{CameraError, FrameStatus, Game, PoseFrame, PoseSource, Scoreboard, Settings};

/// Frames before the demo gives up
const MAX_FRAMES: u32 = 60 * 120;
/// Runs to play before quitting
const DEMO_RUNS: u32 = 2;

/// Fake player whose right hand chases an aim point
struct ScriptedPlayer {
    rng: Pcg32,
    hand: Vec2,
    aim: Option<Vec2>,
    /// Pixels per frame
    speed: f32,
    screen: Vec2,
}

impl ScriptedPlayer {
    fn new(seed: u64, screen: Vec2) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            hand: screen * 0.5,
            aim: None,
            speed: 24.0,
            screen,
        }
    }

    fn aim_at(&mut self, aim: Option<Vec2>) {
        self.aim = aim;
    }
}

impl PoseSource for ScriptedPlayer {
    fn next_frame(&mut self) -> Result<PoseFrame, CameraError> {
        if let Some(aim) = self.aim {
            let to_aim = aim - self.hand;
            let step = to_aim.clamp_length_max(self.speed);
            self.hand += step;
        }
        // Wobble a little so the tracking looks alive
        self.hand += Vec2::new(
            self.rng.random_range(-2.0f32..2.0),
            self.rng.random_range(-2.0f32..2.0),
        );
        self.hand = self.hand.clamp(Vec2::ZERO, self.screen);

        // Mostly a fist; sometimes the classifier flickers open
        let is_fist = self.rng.random_bool(0.8);

        let mid_x = self.screen.x * 0.5;
        let shoulder_y = self.screen.y * 0.45;
        let landmarks = Landmarks::new()
            .with(PoseLandmark::Nose, mid_x, self.screen.y * 0.3)
            .with(PoseLandmark::LeftShoulder, mid_x - 80.0, shoulder_y)
            .with(PoseLandmark::RightShoulder, mid_x + 80.0, shoulder_y)
            .with(PoseLandmark::LeftHip, mid_x - 60.0, self.screen.y * 0.8)
            .with(PoseLandmark::RightHip, mid_x + 60.0, self.screen.y * 0.8)
            .with(PoseLandmark::RightElbow, (mid_x + 80.0 + self.hand.x) * 0.5, (shoulder_y + self.hand.y) * 0.5)
            .with(PoseLandmark::RightWrist, self.hand.x, self.hand.y)
            .with(PoseLandmark::RightIndex, self.hand.x, self.hand.y);

        Ok(PoseFrame {
            landmarks: Some(landmarks),
            hands: HandInfo::new(HandSample::absent(), HandSample::new(self.hand, is_fist)),
        })
    }
}

/// Spawns objects; missed targets and touched obstacles cost a life
struct DemoSpawner {
    rng: Pcg32,
    objects: Vec<GameObject>,
    /// Spawn time per object, same order as `objects`
    spawned_at: Vec<f64>,
    next_id: u32,
    next_spawn: Option<f64>,
    lives: u8,
    score: u64,
    screen: Vec2,
}

impl DemoSpawner {
    const LIVES: u8 = 3;
    const TARGET_TTL: f64 = 2.5;
    const SPAWN_INTERVAL: f64 = 0.9;

    fn new(seed: u64, screen: Vec2) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            objects: Vec::new(),
            spawned_at: Vec::new(),
            next_id: 1,
            next_spawn: None,
            lives: Self::LIVES,
            score: 0,
            screen,
        }
    }

    fn remove(&mut self, id: u32) {
        if let Some(i) = self.objects.iter().position(|o| o.id == id) {
            self.objects.remove(i);
            self.spawned_at.remove(i);
        }
    }

    fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        log::info!("life lost, {} left", self.lives);
    }
}

impl Scoreboard for DemoSpawner {
    fn objects(&self) -> &[GameObject] {
        &self.objects
    }

    fn update(&mut self, _dt: f32, now: f64) {
        if now >= *self.next_spawn.get_or_insert(now) {
            let roll: f32 = self.rng.random();
            let kind = if roll < 0.7 {
                ObjectKind::Target
            } else if roll < 0.85 {
                ObjectKind::Powerup
            } else {
                ObjectKind::Obstacle
            };
            let pos = Vec2::new(
                self.rng.random_range(0.1f32..0.9) * self.screen.x,
                self.rng.random_range(0.1f32..0.6) * self.screen.y,
            );
            self.objects.push(GameObject::new(self.next_id, kind, pos, 28.0));
            self.spawned_at.push(now);
            self.next_id += 1;
            self.next_spawn = Some(now + Self::SPAWN_INTERVAL);
        }

        let expired: Vec<(u32, ObjectKind)> = self
            .objects
            .iter()
            .zip(&self.spawned_at)
            .filter(|(_, t)| now - **t > Self::TARGET_TTL)
            .map(|(o, _)| (o.id, o.kind))
            .collect();
        for (id, kind) in expired {
            self.remove(id);
            if kind == ObjectKind::Target {
                self.lose_life();
            }
        }
    }

    fn on_hit(&mut self, hit: &HitEvent) {
        match hit {
            HitEvent::Punch(e) => {
                self.score += 10;
                log::debug!("punch with {} hand, score {}", e.side.as_str(), self.score);
            }
            HitEvent::Grab(_) => self.score += 25,
            HitEvent::Obstacle { .. } => self.lose_life(),
        }
        self.remove(hit.target());
    }

    fn is_game_over(&self) -> bool {
        self.lives == 0
    }

    fn reset(&mut self) {
        self.objects.clear();
        self.spawned_at.clear();
        self.next_spawn = None;
        self.lives = Self::LIVES;
        self.score = 0;
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.screen = Vec2::new(width, height);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load_or_default(settings_path.as_deref());
    let screen = Vec2::new(settings.screen_width, settings.screen_height);

    let player = ScriptedPlayer::new(7, screen);
    let spawner = DemoSpawner::new(11, screen);
    let audio = AudioManager::new(&settings);
    let mut game = Game::new(&settings, player, spawner, audio);

    let dt = settings.frame_dt();
    let mut now = 0.0f64;
    let mut runs = 0;
    let mut last_state = game.session().state();

    for _ in 0..MAX_FRAMES {
        now += dt as f64;

        // Steer the scripted hand at whatever matters on this screen
        let aim = match game.session().state() {
            SessionState::Menu => Some(game.session().layout().button(ButtonId::Start).center),
            SessionState::Play => game
                .scoreboard()
                .objects()
                .iter()
                .find(|o| o.kind != ObjectKind::Obstacle)
                .map(|o| o.position),
            _ => None,
        };
        game.pose_mut().aim_at(aim);

        let mut events = Vec::new();
        if let Some(timer) = game.session().game_over_timer() {
            if timer.phase() == RevealPhase::Revealed && timer.accepts_restart() {
                events.push(if runs >= DEMO_RUNS {
                    InputEvent::Quit
                } else {
                    InputEvent::Restart
                });
            }
        }

        let view: FrameView = match game.frame(dt, now, events) {
            Ok(FrameStatus::Running(view)) => view,
            Ok(FrameStatus::Quit) => break,
            Err(e) => {
                log::error!("stopping: {e}");
                break;
            }
        };

        let state = game.session().state();
        if state != last_state {
            if state == SessionState::GameOver {
                runs += 1;
                log::info!(
                    "run {} over: score {}, {:.1}s played",
                    runs,
                    game.scoreboard().score,
                    game.session().play_duration()
                );
            }
            last_state = state;
        }
        if let Overlay::Countdown { digit, .. } = view.overlay {
            log::trace!("countdown {digit}");
        }
    }

    log::info!("demo finished at {:.1}s, {} fps", now, game.fps());
}

//! Session lifecycle: menu, countdown, play, game over and info screens
//!
//! A single `Session` owns the current screen, the timers that only exist on
//! their own screen, and the cooldown gate for gesture clicks.

use serde::{Deserialize, Serialize};

use super::collision::CollisionEngine;
use super::interaction::{ButtonPress, CooldownGate, HitEvent, InteractionResolver};
use super::menu::{ButtonId, MenuLayout};
use super::objects::GameObject;
use super::pose::{HandInfo, Landmarks};
use super::tick::InputEvent;
use crate::audio::{AudioCue, Music, SoundEffect};
use crate::settings::Settings;

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    /// Title screen with start/guide/credits
    Menu,
    /// 3-2-1 before play
    Countdown,
    /// Active gameplay
    Play,
    /// Run ended, reveal animation then restart prompt
    GameOver,
    Credits,
    Guide,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Menu => "menu",
            Self::Countdown => "countdown",
            Self::Play => "play",
            Self::GameOver => "game-over",
            Self::Credits => "credits",
            Self::Guide => "guide",
        }
    }
}

/// Countdown before play starts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CountdownTimer {
    pub remaining_seconds: f32,
}

impl CountdownTimer {
    pub fn new(seconds: f32) -> Self {
        Self {
            remaining_seconds: seconds,
        }
    }

    /// Digit to display: 3 above 2s, 2 above 1s, 1 above 0s
    ///
    /// A countdown longer than 3s holds on 3. `None` once it has run out.
    pub fn digit(&self) -> Option<u8> {
        let r = self.remaining_seconds;
        if r > 2.0 {
            Some(3)
        } else if r > 1.0 {
            Some(2)
        } else if r > 0.0 {
            Some(1)
        } else {
            None
        }
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_seconds <= 0.0
    }
}

/// Two-phase game over reveal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealPhase {
    /// Opaque cover only
    Cover,
    /// Frozen scene with the score overlay; restart becomes possible
    Revealed,
}

/// Time spent on the game over screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameOverTimer {
    pub elapsed_seconds: f32,
    reveal_seconds: f32,
}

impl GameOverTimer {
    pub fn new(reveal_seconds: f32) -> Self {
        Self {
            elapsed_seconds: 0.0,
            reveal_seconds,
        }
    }

    pub fn phase(&self) -> RevealPhase {
        if self.elapsed_seconds < self.reveal_seconds {
            RevealPhase::Cover
        } else {
            RevealPhase::Revealed
        }
    }

    /// Restart input only counts strictly after the reveal delay
    pub fn accepts_restart(&self) -> bool {
        self.elapsed_seconds > self.reveal_seconds
    }
}

/// Things the session tells its collaborators about
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    Transition { from: SessionState, to: SessionState },
    ButtonPressed(ButtonPress),
    /// Scoring should start a fresh run
    ResetGame,
    Audio(AudioCue),
    Hit(HitEvent),
    /// Window size changed; buttons are already moved
    Resized { width: f32, height: f32 },
}

/// Screen plus the data that only exists on that screen
#[derive(Debug, Clone, Copy, PartialEq)]
enum Stage {
    Menu,
    Countdown(CountdownTimer),
    Play { started_at: f64 },
    GameOver(GameOverTimer),
    Credits,
    Guide,
}

impl Stage {
    fn state(&self) -> SessionState {
        match self {
            Self::Menu => SessionState::Menu,
            Self::Countdown(_) => SessionState::Countdown,
            Self::Play { .. } => SessionState::Play,
            Self::GameOver(_) => SessionState::GameOver,
            Self::Credits => SessionState::Credits,
            Self::Guide => SessionState::Guide,
        }
    }
}

/// The game's lifecycle state machine
#[derive(Debug, Clone)]
pub struct Session {
    stage: Stage,
    resolver: InteractionResolver,
    layout: MenuLayout,
    countdown_seconds: f32,
    reveal_seconds: f32,
    /// Seconds of the current or most recent run
    play_duration: f64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl Session {
    pub fn new(settings: &Settings) -> Self {
        Self {
            stage: Stage::Menu,
            resolver: InteractionResolver::new(
                CollisionEngine::new(settings.collision_radius),
                CooldownGate::new(settings.fist_cooldown),
            ),
            layout: MenuLayout::for_screen(settings.screen_width, settings.screen_height),
            countdown_seconds: settings.countdown_seconds,
            reveal_seconds: settings.game_over_reveal_seconds,
            play_duration: 0.0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.stage.state()
    }

    pub fn countdown(&self) -> Option<&CountdownTimer> {
        match &self.stage {
            Stage::Countdown(timer) => Some(timer),
            _ => None,
        }
    }

    pub fn game_over_timer(&self) -> Option<&GameOverTimer> {
        match &self.stage {
            Stage::GameOver(timer) => Some(timer),
            _ => None,
        }
    }

    /// When the current run started, only while playing
    pub fn started_at(&self) -> Option<f64> {
        match self.stage {
            Stage::Play { started_at } => Some(started_at),
            _ => None,
        }
    }

    pub fn play_duration(&self) -> f64 {
        self.play_duration
    }

    pub fn layout(&self) -> &MenuLayout {
        &self.layout
    }

    pub fn resolver(&self) -> &InteractionResolver {
        &self.resolver
    }

    pub fn set_screen_size(&mut self, width: f32, height: f32) {
        self.layout = MenuLayout::for_screen(width, height);
    }

    fn transition(&mut self, to: Stage, events: &mut Vec<SessionEvent>) {
        let from = self.stage.state();
        self.stage = to;
        log::info!("session: {} -> {}", from.as_str(), to.state().as_str());
        events.push(SessionEvent::Transition {
            from,
            to: to.state(),
        });
    }

    fn start_countdown(&mut self, events: &mut Vec<SessionEvent>) {
        self.transition(Stage::Countdown(CountdownTimer::new(self.countdown_seconds)), events);
        events.push(SessionEvent::ResetGame);
        events.push(SessionEvent::Audio(AudioCue::StopMusic));
        events.push(SessionEvent::Audio(AudioCue::PlaySound(SoundEffect::Countdown)));
    }

    /// Discrete keyboard input (quit is handled by the frame loop)
    pub fn handle_input(&mut self, input: InputEvent, events: &mut Vec<SessionEvent>) {
        match input {
            InputEvent::Cancel => {
                if self.stage != Stage::Menu {
                    self.transition(Stage::Menu, events);
                    events.push(SessionEvent::Audio(AudioCue::CrossfadeMusic(Music::Menu)));
                }
            }
            InputEvent::Restart => match self.stage {
                Stage::GameOver(timer) if timer.accepts_restart() => self.start_countdown(events),
                Stage::GameOver(timer) => {
                    log::debug!("restart ignored at {:.2}s into game over", timer.elapsed_seconds);
                }
                _ => {}
            },
            InputEvent::Resize { width, height } => {
                self.set_screen_size(width, height);
                events.push(SessionEvent::Resized { width, height });
            }
            // Quit is the frame loop's; mixer keys go straight to the audio sink
            InputEvent::Quit
            | InputEvent::ToggleMusic
            | InputEvent::ToggleSound
            | InputEvent::MusicVolumeUp
            | InputEvent::MusicVolumeDown
            | InputEvent::Other => {}
        }
    }

    /// Apply a button press that already passed the cooldown gate
    pub fn press_button(&mut self, press: ButtonPress, events: &mut Vec<SessionEvent>) {
        let state = self.state();
        if !self.layout.buttons(state).iter().any(|b| b.id == press.button) {
            log::warn!("button {} is not on the {} screen", press.button.as_str(), state.as_str());
            return;
        }

        events.push(SessionEvent::ButtonPressed(press));
        events.push(SessionEvent::Audio(AudioCue::PlaySound(SoundEffect::ButtonClick)));

        match press.button {
            ButtonId::Start => self.start_countdown(events),
            ButtonId::Credits => self.transition(Stage::Credits, events),
            ButtonId::Guide => self.transition(Stage::Guide, events),
            ButtonId::Back => self.transition(Stage::Menu, events),
        }
    }

    /// Look for a fist on one of the current screen's buttons
    pub fn poll_buttons(&mut self, hands: &HandInfo, now: f64, events: &mut Vec<SessionEvent>) {
        let buttons = self.layout.buttons(self.stage.state());
        if let Some(press) = self.resolver.resolve_button(hands, buttons, now) {
            self.press_button(press, events);
        }
    }

    /// Object contacts for this frame, only while playing
    pub fn resolve_hits(
        &self,
        landmarks: Option<&Landmarks>,
        hands: &HandInfo,
        objects: &[GameObject],
        now: f64,
        events: &mut Vec<SessionEvent>,
    ) {
        if self.state() != SessionState::Play {
            return;
        }
        events.extend(
            self.resolver
                .resolve_hits(landmarks, hands, objects, now)
                .into_iter()
                .map(SessionEvent::Hit),
        );
    }

    /// Advance the timers of the current screen by one frame
    pub fn advance(&mut self, dt: f32, now: f64, events: &mut Vec<SessionEvent>) {
        match &mut self.stage {
            Stage::Countdown(timer) => {
                timer.remaining_seconds -= dt;
                if timer.is_finished() {
                    self.play_duration = 0.0;
                    self.transition(Stage::Play { started_at: now }, events);
                    events.push(SessionEvent::Audio(AudioCue::PlayMusic(Music::Gameplay)));
                }
            }
            Stage::Play { started_at } => {
                self.play_duration = now - *started_at;
            }
            Stage::GameOver(timer) => {
                timer.elapsed_seconds += dt;
            }
            Stage::Menu | Stage::Credits | Stage::Guide => {}
        }
    }

    /// Scoring reports the run is over
    pub fn report_terminal(&mut self, events: &mut Vec<SessionEvent>) {
        if self.state() != SessionState::Play {
            log::debug!("terminal condition ignored in {}", self.state().as_str());
            return;
        }
        log::info!("run ended after {:.1}s", self.play_duration);
        self.transition(Stage::GameOver(GameOverTimer::new(self.reveal_seconds)), events);
        events.push(SessionEvent::Audio(AudioCue::StopMusic));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::pose::HandSide;

    fn press(button: ButtonId) -> ButtonPress {
        ButtonPress {
            button,
            side: HandSide::Right,
        }
    }

    fn session_in_play() -> Session {
        let mut s = Session::default();
        let mut ev = Vec::new();
        s.press_button(press(ButtonId::Start), &mut ev);
        s.advance(3.5, 10.0, &mut ev);
        assert_eq!(s.state(), SessionState::Play);
        s
    }

    fn session_in_game_over() -> Session {
        let mut s = session_in_play();
        let mut ev = Vec::new();
        s.report_terminal(&mut ev);
        s
    }

    #[test]
    fn test_starts_in_menu() {
        let s = Session::default();
        assert_eq!(s.state(), SessionState::Menu);
        assert!(s.countdown().is_none());
        assert!(s.game_over_timer().is_none());
    }

    #[test]
    fn test_start_enters_countdown() {
        let mut s = Session::default();
        let mut ev = Vec::new();
        s.press_button(press(ButtonId::Start), &mut ev);

        assert_eq!(s.state(), SessionState::Countdown);
        assert_eq!(s.countdown().map(|t| t.remaining_seconds), Some(3.0));
        assert!(ev.contains(&SessionEvent::ResetGame));
        assert!(ev.contains(&SessionEvent::Audio(AudioCue::StopMusic)));
        assert!(ev.contains(&SessionEvent::Audio(AudioCue::PlaySound(SoundEffect::Countdown))));
    }

    #[test]
    fn test_countdown_digits_then_play() {
        let mut s = Session::default();
        let mut ev = Vec::new();
        s.press_button(press(ButtonId::Start), &mut ev);

        let mut digits = vec![s.countdown().and_then(|t| t.digit())];
        for i in 1..=3 {
            s.advance(1.01, i as f64 * 1.01, &mut ev);
            digits.push(s.countdown().and_then(|t| t.digit()));
        }

        assert_eq!(digits, vec![Some(3), Some(2), Some(1), None]);
        assert_eq!(s.state(), SessionState::Play);
        assert!(s.countdown().is_none());
        assert_eq!(s.started_at(), Some(3.0 * 1.01));
        assert!(ev.contains(&SessionEvent::Audio(AudioCue::PlayMusic(Music::Gameplay))));
    }

    #[test]
    fn test_digit_buckets() {
        assert_eq!(CountdownTimer::new(3.0).digit(), Some(3));
        assert_eq!(CountdownTimer::new(2.01).digit(), Some(3));
        assert_eq!(CountdownTimer::new(2.0).digit(), Some(2));
        assert_eq!(CountdownTimer::new(1.0).digit(), Some(1));
        assert_eq!(CountdownTimer::new(0.001).digit(), Some(1));
        assert_eq!(CountdownTimer::new(0.0).digit(), None);
        assert_eq!(CountdownTimer::new(-0.2).digit(), None);
    }

    #[test]
    fn test_long_countdown_holds_on_three() {
        assert_eq!(CountdownTimer::new(5.0).digit(), Some(3));
        assert_eq!(CountdownTimer::new(400.0).digit(), Some(3));

        let settings = Settings {
            countdown_seconds: 5.0,
            ..Default::default()
        };
        let mut s = Session::new(&settings);
        let mut ev = Vec::new();
        s.press_button(press(ButtonId::Start), &mut ev);
        s.advance(1.5, 1.5, &mut ev);
        assert_eq!(s.countdown().and_then(|t| t.digit()), Some(3));
        s.advance(2.0, 3.5, &mut ev);
        assert_eq!(s.countdown().and_then(|t| t.digit()), Some(2));
    }

    #[test]
    fn test_info_screens_and_back() {
        let mut s = Session::default();
        let mut ev = Vec::new();

        s.press_button(press(ButtonId::Credits), &mut ev);
        assert_eq!(s.state(), SessionState::Credits);
        s.press_button(press(ButtonId::Back), &mut ev);
        assert_eq!(s.state(), SessionState::Menu);

        s.press_button(press(ButtonId::Guide), &mut ev);
        assert_eq!(s.state(), SessionState::Guide);
        s.press_button(press(ButtonId::Back), &mut ev);
        assert_eq!(s.state(), SessionState::Menu);
    }

    #[test]
    fn test_button_not_on_screen_is_ignored() {
        let mut s = Session::default();
        let mut ev = Vec::new();
        s.press_button(press(ButtonId::Back), &mut ev);
        assert_eq!(s.state(), SessionState::Menu);
        assert!(ev.is_empty());
    }

    #[test]
    fn test_terminal_enters_game_over() {
        let mut s = session_in_play();
        let mut ev = Vec::new();
        s.report_terminal(&mut ev);

        assert_eq!(s.state(), SessionState::GameOver);
        assert_eq!(s.game_over_timer().map(|t| t.elapsed_seconds), Some(0.0));
        assert!(ev.contains(&SessionEvent::Audio(AudioCue::StopMusic)));
    }

    #[test]
    fn test_terminal_ignored_outside_play() {
        let mut s = Session::default();
        let mut ev = Vec::new();
        s.report_terminal(&mut ev);
        assert_eq!(s.state(), SessionState::Menu);
        assert!(ev.is_empty());
    }

    #[test]
    fn test_restart_gated_by_reveal() {
        let mut s = session_in_game_over();
        let mut ev = Vec::new();

        s.advance(1.0, 0.0, &mut ev);
        assert_eq!(s.game_over_timer().map(|t| t.phase()), Some(RevealPhase::Cover));
        s.handle_input(InputEvent::Restart, &mut ev);
        assert_eq!(s.state(), SessionState::GameOver);

        s.advance(1.6, 0.0, &mut ev);
        assert_eq!(s.game_over_timer().map(|t| t.phase()), Some(RevealPhase::Revealed));
        s.handle_input(InputEvent::Restart, &mut ev);
        assert_eq!(s.state(), SessionState::Countdown);
        assert_eq!(s.countdown().map(|t| t.remaining_seconds), Some(3.0));
        assert!(ev.contains(&SessionEvent::ResetGame));
    }

    #[test]
    fn test_reveal_boundary() {
        let mut t = GameOverTimer::new(2.5);
        t.elapsed_seconds = 2.5;
        assert_eq!(t.phase(), RevealPhase::Revealed);
        // Revealed but restart still needs strictly more time
        assert!(!t.accepts_restart());
    }

    #[test]
    fn test_cancel_returns_to_menu_from_any_screen_including_game_over() {
        let mut ev = Vec::new();

        let mut countdown = Session::default();
        countdown.press_button(press(ButtonId::Start), &mut ev);
        countdown.advance(0.5, 0.5, &mut ev);

        let mut credits = Session::default();
        credits.press_button(press(ButtonId::Credits), &mut ev);

        let mut guide = Session::default();
        guide.press_button(press(ButtonId::Guide), &mut ev);

        for mut s in [countdown, session_in_play(), credits, guide, session_in_game_over()] {
            let mut ev = Vec::new();
            s.handle_input(InputEvent::Cancel, &mut ev);
            assert_eq!(s.state(), SessionState::Menu);
            assert!(s.countdown().is_none());
            assert!(s.game_over_timer().is_none());
            assert!(ev.contains(&SessionEvent::Audio(AudioCue::CrossfadeMusic(Music::Menu))));
        }
    }

    #[test]
    fn test_resize_moves_buttons_and_reports() {
        let mut s = Session::default();
        let mut ev = Vec::new();
        s.handle_input(
            InputEvent::Resize {
                width: 640.0,
                height: 360.0,
            },
            &mut ev,
        );
        assert_eq!(s.layout(), &MenuLayout::for_screen(640.0, 360.0));
        assert_eq!(
            ev,
            vec![SessionEvent::Resized {
                width: 640.0,
                height: 360.0
            }]
        );
    }

    #[test]
    fn test_cancel_in_menu_is_noop() {
        let mut s = Session::default();
        let mut ev = Vec::new();
        s.handle_input(InputEvent::Cancel, &mut ev);
        assert_eq!(s.state(), SessionState::Menu);
        assert!(ev.is_empty());
    }

    #[test]
    fn test_play_duration_tracks_clock() {
        let mut s = session_in_play();
        let started = s.started_at().unwrap();
        let mut ev = Vec::new();
        s.advance(0.016, started + 12.5, &mut ev);
        assert!((s.play_duration() - 12.5).abs() < 1e-9);

        s.report_terminal(&mut ev);
        assert!((s.play_duration() - 12.5).abs() < 1e-9);
    }
}

//! Audio cues and the sink that plays them
//!
//! The session only emits [`AudioCue`]s at its transition points. Whatever
//! backend turns those into sound implements [`AudioSink`]. [`AudioManager`]
//! is the in-process mixer state (current track, volumes, toggles) with
//! logging in place of a playback backend.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Background tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Music {
    /// Title and info screens
    Menu,
    /// During play
    Gameplay,
}

impl Music {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Menu => "menu",
            Self::Gameplay => "gameplay",
        }
    }
}

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// 3-2-1 cue
    Countdown,
    /// Menu button accepted
    ButtonClick,
}

impl SoundEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Countdown => "countdown",
            Self::ButtonClick => "button-click",
        }
    }
}

/// Fade-out/fade-in used when returning to the menu track
pub const CROSSFADE_MS: u32 = 500;

/// Fade-in when a track starts from silence
pub const MUSIC_FADE_IN_MS: u32 = 1000;

/// Music volume change per volume key press
pub const VOLUME_STEP: f32 = 0.1;

/// Audio commands emitted by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioCue {
    PlayMusic(Music),
    CrossfadeMusic(Music),
    StopMusic,
    PlaySound(SoundEffect),
}

/// Anything that can play the session's audio cues
///
/// Also takes the player's mixer controls (mute toggles, music volume).
pub trait AudioSink {
    fn play_music(&mut self, music: Music);
    fn crossfade_to(&mut self, music: Music);
    fn stop_music(&mut self);
    fn play_sound(&mut self, effect: SoundEffect);

    fn music_volume(&self) -> f32;
    /// Set music volume (0.0 - 1.0)
    fn set_music_volume(&mut self, vol: f32);
    fn toggle_music(&mut self);
    fn toggle_sound(&mut self);

    /// Step the music volume up or down by [`VOLUME_STEP`]
    fn nudge_music_volume(&mut self, louder: bool) {
        let step = if louder { VOLUME_STEP } else { -VOLUME_STEP };
        self.set_music_volume(self.music_volume() + step);
    }

    fn apply(&mut self, cue: AudioCue) {
        match cue {
            AudioCue::PlayMusic(m) => self.play_music(m),
            AudioCue::CrossfadeMusic(m) => self.crossfade_to(m),
            AudioCue::StopMusic => self.stop_music(),
            AudioCue::PlaySound(e) => self.play_sound(e),
        }
    }
}

/// Mixer state for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    current_music: Option<Music>,
    music_volume: f32,
    sfx_volume: f32,
    music_enabled: bool,
    sound_enabled: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        Self {
            current_music: None,
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music_enabled: settings.music_enabled,
            sound_enabled: settings.sound_enabled,
        }
    }

    /// Track that is (or would be, if music is toggled off) playing
    pub fn current_music(&self) -> Option<Music> {
        self.current_music
    }

    pub fn sfx_volume(&self) -> f32 {
        self.sfx_volume
    }

    pub fn music_enabled(&self) -> bool {
        self.music_enabled
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    fn audible_music(&self) -> bool {
        self.music_enabled && self.music_volume > 0.0
    }
}

impl AudioSink for AudioManager {
    fn play_music(&mut self, music: Music) {
        self.current_music = Some(music);
        if self.audible_music() {
            log::debug!("music: play {} (fade in {}ms)", music.as_str(), MUSIC_FADE_IN_MS);
        }
    }

    fn crossfade_to(&mut self, music: Music) {
        if self.current_music == Some(music) {
            return;
        }
        self.current_music = Some(music);
        if self.audible_music() {
            log::debug!("music: crossfade to {} ({}ms)", music.as_str(), CROSSFADE_MS);
        }
    }

    fn stop_music(&mut self) {
        if let Some(music) = self.current_music.take() {
            log::debug!("music: stop {}", music.as_str());
        }
    }

    fn play_sound(&mut self, effect: SoundEffect) {
        if self.sound_enabled && self.sfx_volume > 0.0 {
            log::debug!("sfx: {}", effect.as_str());
        }
    }

    fn music_volume(&self) -> f32 {
        self.music_volume
    }

    fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
        log::info!("music volume {:.0}%", self.music_volume * 100.0);
    }

    fn toggle_music(&mut self) {
        self.music_enabled = !self.music_enabled;
        log::info!("music {}", if self.music_enabled { "on" } else { "off" });
    }

    fn toggle_sound(&mut self) {
        self.sound_enabled = !self.sound_enabled;
        log::info!("sound {}", if self.sound_enabled { "on" } else { "off" });
    }
}

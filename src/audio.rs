//! Audio dispatch
//!
//! The host engine owns decoding and playback; this module turns simulation
//! cues into "play this file" requests, applies volume settings, and makes
//! sure a failed sound never interrupts the game.

use crate::error::AudioError;
use crate::settings::Settings;
use crate::sim::{AudioCue, GameEvent};

/// Sound assets bundled with the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bird hits a pipe or the ground
    Crash,
    /// Looping background track
    Ambient,
}

impl SoundEffect {
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::Crash => "BirdCrash.wav",
            SoundEffect::Ambient => "GameOver.mp3",
        }
    }
}

/// Playback services provided by the host audio engine
pub trait AudioBackend {
    /// Play a file once at the given volume (0.0 - 1.0)
    fn play_once(&mut self, file: &str, volume: f32) -> Result<(), AudioError>;
    /// Start looping a file, replacing whatever loop is playing
    fn start_loop(&mut self, file: &str, volume: f32) -> Result<(), AudioError>;
    /// Stop the current loop, if any
    fn stop_loop(&mut self);
}

/// Backend for hosts without an audio device
#[derive(Debug, Default)]
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn play_once(&mut self, file: &str, _volume: f32) -> Result<(), AudioError> {
        log::trace!("(silent) play {}", file);
        Ok(())
    }

    fn start_loop(&mut self, file: &str, _volume: f32) -> Result<(), AudioError> {
        log::trace!("(silent) loop {}", file);
        Ok(())
    }

    fn stop_loop(&mut self) {}
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    /// The game wants the ambient loop on (even if muted right now)
    music_wanted: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            music_wanted: false,
        }
    }

    pub fn from_settings(backend: B, settings: &Settings) -> Self {
        let mut manager = Self::new(backend);
        manager.set_master_volume(settings.master_volume);
        manager.set_sfx_volume(settings.sfx_volume);
        manager.set_music_volume(settings.music_volume);
        manager.set_muted(settings.muted);
        manager
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio; muting stops the music loop, unmuting resumes it
    pub fn set_muted(&mut self, muted: bool) {
        let was_muted = self.muted;
        self.muted = muted;
        if muted {
            self.backend.stop_loop();
        } else if was_muted && self.music_wanted {
            self.play(SoundEffect::Ambient);
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn effective_volume(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = match effect {
            SoundEffect::Crash => self.sfx_volume,
            SoundEffect::Ambient => self.music_volume,
        };
        self.master_volume * channel
    }

    /// Play a sound; failures are dropped without retry
    pub fn play(&mut self, effect: SoundEffect) {
        if effect == SoundEffect::Ambient {
            self.music_wanted = true;
        }
        let vol = self.effective_volume(effect);
        if vol <= 0.0 {
            return;
        }
        let result = match effect {
            SoundEffect::Ambient => self.backend.start_loop(effect.file_name(), vol),
            SoundEffect::Crash => self.backend.play_once(effect.file_name(), vol),
        };
        if let Err(err) = result {
            log::debug!("Sound abandoned: {}", err);
        }
    }

    pub fn stop_music(&mut self) {
        self.music_wanted = false;
        self.backend.stop_loop();
    }

    pub fn handle_cue(&mut self, cue: AudioCue) {
        match cue {
            AudioCue::StartAmbient => self.play(SoundEffect::Ambient),
            AudioCue::StopAmbient => self.stop_music(),
            AudioCue::PlayCrash => self.play(SoundEffect::Crash),
        }
    }

    /// Forward every audio cue in a batch of simulation events
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            if let GameEvent::Audio(cue) = event {
                self.handle_cue(*cue);
            }
        }
    }
}

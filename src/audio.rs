//! Host-side audio
//!
//! The simulation reports cues; this turns them into sound asset requests.
//! Native builds have no mixer, so playback is logged and counted.

use std::collections::HashMap;

use crate::sim::AudioCue;

/// Sound asset played for a cue
pub fn asset_name(cue: AudioCue) -> &'static str {
    match cue {
        AudioCue::ShotFired => "audio/BurgerShot",
        AudioCue::HostileShot => "audio/TeddyShot",
        AudioCue::Bounce => "audio/TeddyBounce",
        AudioCue::Damage => "audio/BurgerDamage",
        AudioCue::Kill => "audio/Explosion",
        AudioCue::Death => "audio/BurgerDeath",
    }
}

/// Audio manager for the game
#[derive(Debug)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    played: HashMap<AudioCue, u32>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            played: HashMap::new(),
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a single cue. Returns false if it was silenced.
    pub fn play(&mut self, cue: AudioCue) -> bool {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return false;
        }
        log::trace!("play {} at volume {:.2}", asset_name(cue), vol);
        *self.played.entry(cue).or_insert(0) += 1;
        true
    }

    /// Play every cue a step raised, in order
    pub fn dispatch(&mut self, cues: &[AudioCue]) {
        for &cue in cues {
            self.play(cue);
        }
    }

    /// How many times a cue has been played
    pub fn play_count(&self, cue: AudioCue) -> u32 {
        self.played.get(&cue).copied().unwrap_or(0)
    }
}

//! Events the simulation reports to its host
//!
//! The simulation never talks to audio or UI directly; it queues events on
//! the session and the host drains them after each tick.

use serde::{Deserialize, Serialize};

/// Sound requests for the host audio engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioCue {
    /// Start (or restart) the looping background music
    StartAmbient,
    /// Stop the looping background music
    StopAmbient,
    /// One-shot crash effect
    PlayCrash,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Flapped,
    PairSpawned { id: u32, offset: f32, gap: f32 },
    PairRemoved { id: u32 },
    Scored { score: u32, gap: f32 },
    Crashed { score: u32 },
    GameOver { score: u32 },
    Restarted,
    Audio(AudioCue),
}

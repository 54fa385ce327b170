//! Flappy Sim - side-scrolling arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bird physics, obstacles, collisions, game state)
//! - `view`: Per-frame snapshot handed to the host renderer
//! - `audio`: Sound cue dispatch to the host audio engine
//! - `settings`: Player preferences and tuning, loaded from JSON
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod error;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod view;

pub use error::{AudioError, SettingsError, TransitionError};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Slack when comparing accumulated timers against their period
    pub const TIMER_EPSILON: f32 = 1e-4;

    /// Playfield dimensions (points, y-up, origin bottom-left)
    pub const PLAYFIELD_WIDTH: f32 = 750.0;
    pub const PLAYFIELD_HEIGHT: f32 = 1334.0;
    /// Height of the ground strip; its top edge is the lethal floor
    pub const GROUND_HEIGHT: f32 = 160.0;

    /// World gravity (points/s², negative is down)
    pub const GRAVITY: f32 = -750.0;
    /// Vertical velocity right after a flap
    pub const FLAP_VELOCITY: f32 = 350.0;
    pub const BIRD_RADIUS: f32 = 24.0;
    /// Horizontal spawn position as a fraction of playfield width
    pub const BIRD_X_FRACTION: f32 = 0.3;
    /// Spawn height above the playfield middle
    pub const BIRD_START_RISE: f32 = 300.0;

    /// Tilt per unit of vertical velocity
    pub const TILT_FALLING: f32 = 0.003;
    pub const TILT_RISING: f32 = 0.001;
    pub const TILT_MIN: f32 = -1.0;
    pub const TILT_MAX: f32 = 0.5;

    /// Flight animation
    pub const BIRD_FRAME_TIME: f32 = 0.15;
    pub const BIRD_FRAME_COUNT: usize = 4;

    /// Obstacles
    pub const PIPE_WIDTH: f32 = 104.0;
    /// Shortest pipe stub kept visible on either side of the gap
    pub const MIN_PIPE_STUB: f32 = 20.0;
    pub const SPAWN_INTERVAL: f32 = 4.0;
    /// Seconds of travel per point of horizontal distance
    pub const PIPE_TIME_PER_POINT: f32 = 0.01;

    /// Difficulty: vertical gap between the pipes of a pair
    pub const GAP_MAX: f32 = 180.0;
    pub const GAP_MIN: f32 = 120.0;
    pub const GAP_STEP: f32 = 2.0;

    /// Parallax layers
    pub const SKY_TILE_WIDTH: f32 = 640.0;
    pub const SKY_TIME_PER_POINT: f32 = 0.05;
    pub const GROUND_TILE_WIDTH: f32 = 336.0;
    pub const GROUND_TIME_PER_POINT: f32 = 0.01;

    /// Score label pulse (grow, then shrink back)
    pub const SCORE_PULSE_SCALE: f32 = 1.5;
    pub const SCORE_PULSE_HALF: f32 = 0.1;

    /// Background colors (sRGB)
    pub const SKY_COLOR: [u8; 3] = [81, 192, 201];
    pub const FAILURE_COLOR: [u8; 3] = [255, 0, 0];
}

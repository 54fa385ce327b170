//! Data-driven game balance
//!
//! Everything the simulation needs to know about the playfield and physics.
//! Defaults come from [`crate::consts`]; settings files may override any field.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub width: f32,
    pub height: f32,
    pub ground_height: f32,
    pub gravity: f32,
    pub flap_velocity: f32,
    pub bird_radius: f32,
    pub pipe_width: f32,
    /// Seconds between obstacle spawns
    pub spawn_interval: f32,
    /// Seconds of obstacle travel per point of distance
    pub pipe_time_per_point: f32,
    pub gap_max: f32,
    pub gap_min: f32,
    pub gap_step: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
            ground_height: GROUND_HEIGHT,
            gravity: GRAVITY,
            flap_velocity: FLAP_VELOCITY,
            bird_radius: BIRD_RADIUS,
            pipe_width: PIPE_WIDTH,
            spawn_interval: SPAWN_INTERVAL,
            pipe_time_per_point: PIPE_TIME_PER_POINT,
            gap_max: GAP_MAX,
            gap_min: GAP_MIN,
            gap_step: GAP_STEP,
        }
    }
}

impl Tuning {
    /// Same balance on a playfield of a different size
    pub fn with_playfield(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Where the bird spawns (and respawns on restart)
    pub fn bird_spawn(&self) -> glam::Vec2 {
        let y = (self.height / 2.0 + BIRD_START_RISE).min(self.height - self.bird_radius);
        glam::Vec2::new(self.width * BIRD_X_FRACTION, y)
    }

    /// Horizontal distance an obstacle pair covers from spawn to removal
    pub fn pipe_travel_distance(&self) -> f32 {
        self.width + self.pipe_width * 2.0
    }

    /// Leftward obstacle speed (points/s), from distance over crossing time
    pub fn pipe_speed(&self) -> f32 {
        let distance = self.pipe_travel_distance();
        let duration = self.pipe_time_per_point * distance;
        if duration > 0.0 { distance / duration } else { 0.0 }
    }

    /// Reject balance values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("bird_radius", self.bird_radius),
            ("pipe_width", self.pipe_width),
            ("spawn_interval", self.spawn_interval),
            ("pipe_time_per_point", self.pipe_time_per_point),
            ("gap_min", self.gap_min),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::Invalid {
                    field,
                    reason: "must be a positive number",
                });
            }
        }
        if !(self.ground_height >= 0.0 && self.ground_height < self.height) {
            return Err(SettingsError::Invalid {
                field: "ground_height",
                reason: "must lie inside the playfield",
            });
        }
        if self.gap_min > self.gap_max {
            return Err(SettingsError::Invalid {
                field: "gap_min",
                reason: "must not exceed gap_max",
            });
        }
        if self.gap_step < 0.0 {
            return Err(SettingsError::Invalid {
                field: "gap_step",
                reason: "must not be negative",
            });
        }
        Ok(())
    }
}

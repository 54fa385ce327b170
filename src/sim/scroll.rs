//! World clock and parallax scrolling
//!
//! A single scroll speed scales every moving thing in the world: the sky and
//! ground layers here, plus the bird and obstacle pairs in the tick. Setting
//! it to zero freezes all of them at once.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// One endlessly repeating background strip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollLayer {
    /// Leftward shift of the first tile, in [0, tile_width)
    pub offset: f32,
    pub tile_width: f32,
    /// Points per second at nominal speed
    pub speed: f32,
}

impl ScrollLayer {
    /// A layer that moves one tile width every `time_per_point * tile_width` seconds
    pub fn new(tile_width: f32, time_per_point: f32) -> Self {
        let duration = time_per_point * tile_width;
        let speed = if duration > 0.0 { tile_width / duration } else { 0.0 };
        Self {
            offset: 0.0,
            tile_width,
            speed,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        if self.tile_width <= 0.0 {
            return;
        }
        self.offset = (self.offset + self.speed * dt).rem_euclid(self.tile_width);
    }

    /// Tiles needed to cover a playfield of this width while scrolling
    pub fn tiles_for(&self, width: f32) -> usize {
        if self.tile_width <= 0.0 {
            return 0;
        }
        2 + (width / self.tile_width) as usize
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollDriver {
    /// Global motion multiplier: 1.0 nominal, 0.0 frozen
    pub speed: f32,
    pub sky: ScrollLayer,
    pub ground: ScrollLayer,
}

impl Default for ScrollDriver {
    fn default() -> Self {
        Self {
            speed: 1.0,
            sky: ScrollLayer::new(SKY_TILE_WIDTH, SKY_TIME_PER_POINT),
            ground: ScrollLayer::new(GROUND_TILE_WIDTH, GROUND_TIME_PER_POINT),
        }
    }
}

impl ScrollDriver {
    /// World time that passes during `dt` of wall-clock time
    pub fn scaled(&self, dt: f32) -> f32 {
        dt * self.speed
    }

    pub fn advance(&mut self, dt: f32) {
        let dt = self.scaled(dt);
        self.sky.advance(dt);
        self.ground.advance(dt);
    }

    pub fn freeze(&mut self) {
        self.speed = 0.0;
    }

    pub fn resume(&mut self) {
        self.speed = 1.0;
    }

    pub fn is_frozen(&self) -> bool {
        self.speed == 0.0
    }
}

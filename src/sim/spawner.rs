//! Obstacle spawning
//!
//! A repeating wall-clock timer fires every spawn interval. Each firing places
//! a new pair just off the right edge at a random height, unless the game has
//! left the Running state, in which case the firing is dropped.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::events::GameEvent;
use super::state::{GameSession, GameState, ObstaclePair};
use crate::consts::{MIN_PIPE_STUB, TIMER_EPSILON};
use crate::tuning::Tuning;

/// Repeating spawn timer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleSpawner {
    pub interval: f32,
    elapsed: f32,
}

impl ObstacleSpawner {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    /// Seconds since the last firing
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance the timer; returns how many times it fired
    pub fn advance(&mut self, dt: f32) -> u32 {
        if self.interval <= 0.0 {
            return 0;
        }
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed + TIMER_EPSILON >= self.interval {
            self.elapsed = (self.elapsed - self.interval).max(0.0);
            fired += 1;
        }
        fired
    }
}

/// Inclusive range for the lower pipe's top edge
///
/// Nominally [height/4, height/2]. The range is pulled in so the lower pipe
/// clears the ground and the upper pipe keeps a stub on screen; if the
/// playfield is too small for both, it collapses to a single value.
pub fn offset_range(tuning: &Tuning, gap: f32) -> (u32, u32) {
    let quarter = (tuning.height / 4.0).floor();
    let half = (tuning.height / 2.0).floor();

    let lo = quarter.max(tuning.ground_height + MIN_PIPE_STUB);
    let hi = half.min(tuning.height - gap - MIN_PIPE_STUB);

    if hi >= lo {
        (lo as u32, hi as u32)
    } else {
        let only = lo.min((tuning.height - gap).max(0.0)).max(0.0) as u32;
        (only, only)
    }
}

/// Draw the lower pipe's top edge
pub fn sample_offset<R: Rng>(rng: &mut R, tuning: &Tuning, gap: f32) -> f32 {
    let (lo, hi) = offset_range(tuning, gap);
    rng.random_range(lo..=hi) as f32
}

/// Spawn one pair into the session; a no-op unless the game is running
pub fn spawn_pair(session: &mut GameSession) -> Option<u32> {
    if session.state != GameState::Running {
        log::debug!("Spawn skipped: game is {:?}", session.state);
        return None;
    }

    let tuning = session.tuning;
    let gap = session.score.gap();
    let offset = sample_offset(session.rng_mut(), &tuning, gap);
    let id = session.next_entity_id();
    let start_x = tuning.width + tuning.pipe_width;

    session
        .pairs
        .push(ObstaclePair::new(id, start_x, offset, gap, &tuning));
    session.emit(GameEvent::PairSpawned { id, offset, gap });
    log::debug!("Pair {} spawned: offset={}, gap={}", id, offset, gap);
    Some(id)
}

/// Move every pair and drop the ones past the left edge
pub fn advance_pairs(session: &mut GameSession, dt: f32) {
    for pair in &mut session.pairs {
        pair.advance(dt);
    }

    let mut removed = Vec::new();
    session.pairs.retain(|pair| {
        let keep = !pair.is_off_screen();
        if !keep {
            removed.push(pair.id);
        }
        keep
    });
    for id in removed {
        log::debug!("Pair {} scrolled off", id);
        session.emit(GameEvent::PairRemoved { id });
    }
}

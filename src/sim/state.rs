//! Game session and core simulation types
//!
//! Everything the game loop mutates lives in one owned [`GameSession`]. Hosts
//! thread it through [`super::tick`] and read it back for rendering.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::events::{AudioCue, GameEvent};
use super::geom::Rect;
use super::scroll::ScrollDriver;
use super::spawner::ObstacleSpawner;
use crate::consts::*;
use crate::error::TransitionError;
use crate::tuning::Tuning;

/// Current state of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Bird flies, obstacles spawn and scroll
    Running,
    /// Lethal contact this frame; world frozen, game-over pending
    Crashed,
    /// Frozen world waiting for a restart tap
    WaitingForReset,
}

impl GameState {
    /// Allowed edges: Running -> Crashed -> WaitingForReset -> Running
    pub fn can_transition_to(self, next: GameState) -> bool {
        matches!(
            (self, next),
            (GameState::Running, GameState::Crashed)
                | (GameState::Crashed, GameState::WaitingForReset)
                | (GameState::WaitingForReset, GameState::Running)
        )
    }

    pub fn transition(&mut self, next: GameState) -> Result<(), TransitionError> {
        if !self.can_transition_to(next) {
            return Err(TransitionError {
                from: *self,
                to: next,
            });
        }
        *self = next;
        Ok(())
    }

    pub fn accepts_flap(self) -> bool {
        self == GameState::Running
    }

    pub fn accepts_restart(self) -> bool {
        self == GameState::WaitingForReset
    }
}

/// Tilt (radians) for a vertical velocity
///
/// Falling tilts the nose down three times faster than rising tilts it up.
pub fn tilt_for_velocity(vel_y: f32) -> f32 {
    let factor = if vel_y < 0.0 { TILT_FALLING } else { TILT_RISING };
    (vel_y * factor).clamp(TILT_MIN, TILT_MAX)
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    /// x stays at the spawn column; only y changes
    pub pos: Vec2,
    pub vel_y: f32,
    pub radius: f32,
    /// Gravity and impulses apply only while dynamic
    pub dynamic: bool,
    /// Blocked by ground and pipes while collidable
    pub collidable: bool,
    /// Flight animation clock (seconds)
    pub anim_time: f32,
}

impl Bird {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.bird_spawn(),
            vel_y: 0.0,
            radius: tuning.bird_radius,
            dynamic: true,
            collidable: true,
            anim_time: 0.0,
        }
    }

    /// Drop the current vertical velocity, then apply the upward impulse
    pub fn flap(&mut self, impulse: f32) {
        if !self.dynamic {
            return;
        }
        self.vel_y = 0.0;
        self.vel_y += impulse;
    }

    pub fn integrate(&mut self, gravity: f32, dt: f32) {
        if !self.dynamic {
            return;
        }
        self.vel_y += gravity * dt;
        self.pos.y += self.vel_y * dt;
    }

    /// Keep the bird below the top of the playfield; rising into it stops the climb
    pub fn clamp_to_ceiling(&mut self, ceiling: f32) {
        let max_y = ceiling - self.radius;
        if self.pos.y > max_y {
            self.pos.y = max_y;
            self.vel_y = self.vel_y.min(0.0);
        }
    }

    /// Visual tilt, derived from velocity every frame
    pub fn rotation(&self) -> f32 {
        tilt_for_velocity(self.vel_y)
    }

    pub fn animate(&mut self, dt: f32) {
        self.anim_time += dt;
    }

    /// Current frame of the looping flight animation
    pub fn frame_index(&self, frame_count: usize) -> usize {
        if frame_count == 0 {
            return 0;
        }
        (self.anim_time / BIRD_FRAME_TIME).floor() as usize % frame_count
    }

    /// Stop all motion after a crash; nothing blocks or moves the bird until respawn
    pub fn freeze(&mut self) {
        self.dynamic = false;
        self.collidable = false;
        self.vel_y = 0.0;
    }

    /// Back to the spawn point, at rest, neutral tilt
    pub fn respawn(&mut self, tuning: &Tuning) {
        self.pos = tuning.bird_spawn();
        self.vel_y = 0.0;
        self.dynamic = true;
        self.collidable = true;
    }
}

/// Two lethal pipes and the scoring trigger behind them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstaclePair {
    pub id: u32,
    /// Center of the pipe column
    pub x: f32,
    /// Top edge of the lower pipe
    pub offset: f32,
    /// Vertical opening between the pipes
    pub gap: f32,
    /// Horizontal velocity (negative, points/s)
    pub vel_x: f32,
    /// The trigger has already awarded its point
    pub scored: bool,
    pipe_width: f32,
    top: f32,
    trigger_offset: f32,
}

impl ObstaclePair {
    pub fn new(id: u32, x: f32, offset: f32, gap: f32, tuning: &Tuning) -> Self {
        Self {
            id,
            x,
            offset,
            gap,
            vel_x: -tuning.pipe_speed(),
            scored: false,
            pipe_width: tuning.pipe_width,
            top: tuning.height,
            // Trigger trails the pipe column by one pipe width plus the bird radius
            trigger_offset: tuning.pipe_width + tuning.bird_radius,
        }
    }

    pub fn lower_rect(&self) -> Rect {
        let half = self.pipe_width / 2.0;
        Rect::new(Vec2::new(self.x - half, 0.0), Vec2::new(self.x + half, self.offset))
    }

    pub fn upper_rect(&self) -> Rect {
        let half = self.pipe_width / 2.0;
        let bottom = self.offset + self.gap;
        Rect::new(
            Vec2::new(self.x - half, bottom),
            Vec2::new(self.x + half, self.top.max(bottom)),
        )
    }

    /// Full-height intangible scoring volume
    pub fn trigger_rect(&self) -> Rect {
        let center = self.x + self.trigger_offset;
        let half = self.pipe_width / 2.0;
        Rect::new(Vec2::new(center - half, 0.0), Vec2::new(center + half, self.top))
    }

    /// Vertical center of the opening
    pub fn gap_center(&self) -> f32 {
        self.offset + self.gap / 2.0
    }

    /// Rightmost edge of anything belonging to the pair
    pub fn right_edge(&self) -> f32 {
        self.trigger_rect().max.x
    }

    pub fn advance(&mut self, dt: f32) {
        self.x += self.vel_x * dt;
    }

    /// Fully past the left edge of the playfield
    pub fn is_off_screen(&self) -> bool {
        self.right_edge() < 0.0
    }
}

/// Score and the difficulty it drives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreState {
    pub score: u32,
    gap: f32,
    gap_max: f32,
    gap_min: f32,
    gap_step: f32,
}

impl ScoreState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            gap: tuning.gap_max,
            gap_max: tuning.gap_max,
            gap_min: tuning.gap_min,
            gap_step: tuning.gap_step,
        }
    }

    /// Current vertical gap for newly spawned pairs
    pub fn gap(&self) -> f32 {
        self.gap
    }

    /// Count a passed gap and tighten the next ones, down to the floor
    pub fn record_pass(&mut self) -> u32 {
        self.score += 1;
        if self.gap > self.gap_min {
            self.gap = (self.gap - self.gap_step).max(self.gap_min);
        }
        self.score
    }

    pub fn reset(&mut self) {
        self.score = 0;
        self.gap = self.gap_max;
    }
}

/// Grow-then-shrink feedback on the score label
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScorePulse {
    elapsed: Option<f32>,
}

impl ScorePulse {
    pub fn start(&mut self) {
        self.elapsed = Some(0.0);
    }

    pub fn is_active(&self) -> bool {
        self.elapsed.is_some()
    }

    pub fn advance(&mut self, dt: f32) {
        if let Some(t) = self.elapsed {
            let t = t + dt;
            self.elapsed = if t >= SCORE_PULSE_HALF * 2.0 { None } else { Some(t) };
        }
    }

    /// Label scale: 1.0 at rest, peaking at the pulse scale halfway through
    pub fn scale(&self) -> f32 {
        let Some(t) = self.elapsed else {
            return 1.0;
        };
        let grow = SCORE_PULSE_SCALE - 1.0;
        if t < SCORE_PULSE_HALF {
            1.0 + grow * (t / SCORE_PULSE_HALF)
        } else {
            SCORE_PULSE_SCALE - grow * ((t - SCORE_PULSE_HALF) / SCORE_PULSE_HALF).min(1.0)
        }
    }
}

/// Complete game session (single owner, threaded through every tick)
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub state: GameState,
    pub bird: Bird,
    /// Live obstacle pairs (ascending id)
    pub pairs: Vec<ObstaclePair>,
    pub score: ScoreState,
    pub score_pulse: ScorePulse,
    pub spawner: ObstacleSpawner,
    pub scroll: ScrollDriver,
    /// Background clear color
    pub background: [u8; 3],
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulated wall-clock seconds
    pub time_secs: f64,
    /// Events produced since the host last drained them
    pub events: Vec<GameEvent>,
    rng: Pcg32,
    next_id: u32,
}

impl GameSession {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut session = Self {
            seed,
            tuning,
            state: GameState::Running,
            bird: Bird::new(&tuning),
            pairs: Vec::new(),
            score: ScoreState::new(&tuning),
            score_pulse: ScorePulse::default(),
            spawner: ObstacleSpawner::new(tuning.spawn_interval),
            scroll: ScrollDriver::default(),
            background: SKY_COLOR,
            time_ticks: 0,
            time_secs: 0.0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };
        session.emit(GameEvent::Audio(AudioCue::StartAmbient));
        session
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// The lethal floor strip
    pub fn ground_rect(&self) -> Rect {
        Rect::new(
            Vec2::ZERO,
            Vec2::new(self.tuning.width, self.tuning.ground_height),
        )
    }

    pub fn pair(&self, id: u32) -> Option<&ObstaclePair> {
        self.pairs.iter().find(|p| p.id == id)
    }

    pub fn pair_mut(&mut self, id: u32) -> Option<&mut ObstaclePair> {
        self.pairs.iter_mut().find(|p| p.id == id)
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand the pending events to the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_transition_table() {
        use GameState::*;
        let all = [Running, Crashed, WaitingForReset];
        for from in all {
            for to in all {
                let mut state = from;
                let legal = matches!(
                    (from, to),
                    (Running, Crashed) | (Crashed, WaitingForReset) | (WaitingForReset, Running)
                );
                assert_eq!(state.transition(to).is_ok(), legal, "{from:?} -> {to:?}");
                assert_eq!(state, if legal { to } else { from });
            }
        }
    }

    #[test]
    fn test_flap_discards_prior_velocity() {
        let tuning = Tuning::default();
        let mut bird = Bird::new(&tuning);
        bird.vel_y = -900.0;
        bird.flap(tuning.flap_velocity);
        assert_eq!(bird.vel_y, tuning.flap_velocity);
        // Rapid second flap does not stack
        bird.flap(tuning.flap_velocity);
        assert_eq!(bird.vel_y, tuning.flap_velocity);
    }

    #[test]
    fn test_frozen_bird_ignores_flap_and_gravity() {
        let tuning = Tuning::default();
        let mut bird = Bird::new(&tuning);
        let pos = bird.pos;
        bird.freeze();
        bird.flap(tuning.flap_velocity);
        bird.integrate(tuning.gravity, 0.5);
        assert_eq!(bird.vel_y, 0.0);
        assert_eq!(bird.pos, pos);
        assert!(!bird.collidable);

        bird.respawn(&tuning);
        assert!(bird.dynamic && bird.collidable);
    }

    #[test]
    fn test_ceiling_stops_the_climb() {
        let tuning = Tuning::default();
        let mut bird = Bird::new(&tuning);
        bird.pos.y = tuning.height + 50.0;
        bird.vel_y = 300.0;
        bird.clamp_to_ceiling(tuning.height);
        assert_eq!(bird.pos.y, tuning.height - tuning.bird_radius);
        assert_eq!(bird.vel_y, 0.0);

        // Falling away from the ceiling is left alone
        bird.pos.y = 500.0;
        bird.vel_y = -200.0;
        bird.clamp_to_ceiling(tuning.height);
        assert_eq!(bird.pos.y, 500.0);
        assert_eq!(bird.vel_y, -200.0);
    }

    #[test]
    fn test_tilt_coefficients() {
        assert!((tilt_for_velocity(-100.0) - (-0.3)).abs() < 1e-6);
        assert!((tilt_for_velocity(100.0) - 0.1).abs() < 1e-6);
        assert_eq!(tilt_for_velocity(-10_000.0), TILT_MIN);
        assert_eq!(tilt_for_velocity(10_000.0), TILT_MAX);
        assert_eq!(tilt_for_velocity(0.0), 0.0);
    }

    #[test]
    fn test_animation_loops() {
        let mut bird = Bird::new(&Tuning::default());
        assert_eq!(bird.frame_index(4), 0);
        bird.animate(0.16);
        assert_eq!(bird.frame_index(4), 1);
        bird.animate(0.45);
        assert_eq!(bird.frame_index(4), 0); // 0.61s -> frame 4 wraps to 0
        assert_eq!(bird.frame_index(0), 0);
    }

    #[test]
    fn test_gap_floor() {
        let mut score = ScoreState::new(&Tuning::default());
        assert_eq!(score.gap(), 180.0);
        for expected in 1..=40 {
            assert_eq!(score.record_pass(), expected);
        }
        // 30 passes reach the floor, the rest hold it
        assert_eq!(score.gap(), 120.0);
        score.reset();
        assert_eq!(score.score, 0);
        assert_eq!(score.gap(), 180.0);
    }

    #[test]
    fn test_gap_step_not_dividing_range_still_floors() {
        let tuning = Tuning {
            gap_step: 7.0,
            ..Tuning::default()
        };
        let mut score = ScoreState::new(&tuning);
        for _ in 0..20 {
            score.record_pass();
        }
        assert_eq!(score.gap(), 120.0);
    }

    #[test]
    fn test_score_pulse_shape() {
        let mut pulse = ScorePulse::default();
        assert_eq!(pulse.scale(), 1.0);
        pulse.start();
        pulse.advance(0.05);
        assert!((pulse.scale() - 1.25).abs() < 0.001);
        pulse.advance(0.05);
        assert!((pulse.scale() - 1.5).abs() < 0.001);
        pulse.advance(0.05);
        assert!((pulse.scale() - 1.25).abs() < 0.001);
        pulse.advance(0.06);
        assert!(!pulse.is_active());
        assert_eq!(pulse.scale(), 1.0);
    }

    #[test]
    fn test_pair_geometry() {
        let tuning = Tuning::default();
        let pair = ObstaclePair::new(1, 400.0, 500.0, 180.0, &tuning);
        assert_eq!(pair.lower_rect().max.y, 500.0);
        assert_eq!(pair.upper_rect().min.y, 680.0);
        assert_eq!(pair.upper_rect().max.y, tuning.height);
        assert_eq!(pair.gap_center(), 590.0);
        let trigger = pair.trigger_rect();
        assert_eq!(trigger.min.y, 0.0);
        assert_eq!(trigger.max.y, tuning.height);
        // Trigger sits behind the pipes, not overlapping them
        assert!(trigger.min.x > pair.lower_rect().max.x);
        assert!(pair.vel_x < 0.0);
    }

    #[test]
    fn test_new_session() {
        let mut session = GameSession::new(42);
        assert_eq!(session.state, GameState::Running);
        assert!(session.pairs.is_empty());
        assert_eq!(session.score.score, 0);
        assert_eq!(session.background, SKY_COLOR);
        assert_eq!(
            session.drain_events(),
            vec![GameEvent::Audio(AudioCue::StartAmbient)]
        );
        assert!(session.events.is_empty());
        assert_eq!(session.next_entity_id(), 1);
        assert_eq!(session.next_entity_id(), 2);
    }

    proptest! {
        #[test]
        fn prop_flap_sets_exact_velocity(prior in -5000.0f32..5000.0) {
            let tuning = Tuning::default();
            let mut bird = Bird::new(&tuning);
            bird.vel_y = prior;
            bird.flap(tuning.flap_velocity);
            prop_assert_eq!(bird.vel_y, tuning.flap_velocity);
        }

        #[test]
        fn prop_tilt_is_clamped(vel in -1.0e6f32..1.0e6) {
            let tilt = tilt_for_velocity(vel);
            prop_assert!((TILT_MIN..=TILT_MAX).contains(&tilt));
        }

        #[test]
        fn prop_gap_monotone_and_bounded(passes in 0usize..200) {
            let tuning = Tuning::default();
            let mut score = ScoreState::new(&tuning);
            let mut last = score.gap();
            for _ in 0..passes {
                score.record_pass();
                prop_assert!(score.gap() <= last);
                prop_assert!(score.gap() >= tuning.gap_min && score.gap() <= tuning.gap_max);
                last = score.gap();
            }
            prop_assert_eq!(score.score as usize, passes);
        }
    }
}

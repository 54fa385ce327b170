//! Per-frame simulation tick
//!
//! Core game loop that advances the session by one rendered frame.

use super::autopilot;
use super::collision::{apply_blocking, detect_contacts};
use super::events::GameEvent;
use super::resolver::{finish_game_over, resolve_contact, restart};
use super::spawner::{advance_pairs, spawn_pair};
use super::state::{GameSession, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Tap/click/space: flaps while running, restarts while waiting for reset
    pub tap: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the session by one frame of `dt` wall-clock seconds
pub fn tick(session: &mut GameSession, input: &TickInput, dt: f32) {
    if !(dt > 0.0) {
        return;
    }

    // A crash from the previous frame turns into game over at the end of this one
    let was_crashed = session.state == GameState::Crashed;

    let tap = input.tap || (input.idle_mode && autopilot::wants_tap(session));
    if tap && session.state.accepts_flap() {
        session.bird.flap(session.tuning.flap_velocity);
        session.emit(GameEvent::Flapped);
    } else if tap && session.state.accepts_restart() {
        restart(session);
    }

    session.time_ticks += 1;
    session.time_secs += dt as f64;

    // World motion is scaled by the global scroll speed
    let world_dt = session.scroll.scaled(dt);
    session.scroll.advance(dt);
    let gravity = session.tuning.gravity;
    session.bird.integrate(gravity, world_dt);
    session.bird.clamp_to_ceiling(session.tuning.height);
    session.bird.animate(world_dt);
    advance_pairs(session, world_dt);

    // The spawn timer runs on wall-clock time; firings outside Running are dropped
    for _ in 0..session.spawner.advance(dt) {
        spawn_pair(session);
    }

    if session.state == GameState::Running {
        let ground = session.ground_rect();
        let contacts = detect_contacts(&session.bird, &ground, &session.pairs);
        apply_blocking(&mut session.bird, &contacts);
        for (contact, _) in &contacts {
            resolve_contact(session, contact);
        }
    }

    session.score_pulse.advance(dt);

    if was_crashed {
        finish_game_over(session);
    }
}

//! Collision resolver and game state machine
//!
//! Contacts are only acted on while the game is Running. A scoring trigger
//! awards one point per pair and tightens the gap; anything else the bird
//! touches ends the run. Restart puts the whole session back in one step.

use super::entity::{Contact, ContactAction, classify};
use super::events::{AudioCue, GameEvent};
use super::state::{GameSession, GameState};
use crate::consts::{FAILURE_COLOR, SKY_COLOR};

/// Act on one contact reported this frame
pub fn resolve_contact(session: &mut GameSession, contact: &Contact) {
    if session.state != GameState::Running {
        return;
    }

    match classify(contact.a.kind, contact.b.kind) {
        ContactAction::Score => score_pass(session, contact),
        ContactAction::Lethal => crash(session),
        ContactAction::Ignore => {}
    }
}

fn score_pass(session: &mut GameSession, contact: &Contact) {
    let Some(pair_id) = contact.other_than_bird().pair_id else {
        log::warn!("Scoring contact without an owning pair: {:?}", contact);
        return;
    };
    let Some(pair) = session.pair_mut(pair_id) else {
        return;
    };
    if pair.scored {
        return;
    }
    pair.scored = true;

    let score = session.score.record_pass();
    let gap = session.score.gap();
    session.score_pulse.start();
    session.emit(GameEvent::Scored { score, gap });
    log::debug!("Pair {} passed: score={}, gap={}", pair_id, score, gap);
}

/// Lethal contact: silence the music, play the crash, freeze the world
pub fn crash(session: &mut GameSession) {
    if let Err(err) = session.state.transition(GameState::Crashed) {
        log::warn!("Crash ignored: {}", err);
        return;
    }

    session.emit(GameEvent::Audio(AudioCue::StopAmbient));
    session.emit(GameEvent::Audio(AudioCue::PlayCrash));
    session.scroll.freeze();
    session.bird.freeze();
    session.background = FAILURE_COLOR;

    let score = session.score.score;
    session.emit(GameEvent::Crashed { score });
    log::info!("Crashed with score {}", score);
}

/// Follow-up to a crash: start accepting the restart gesture
pub fn finish_game_over(session: &mut GameSession) {
    if let Err(err) = session.state.transition(GameState::WaitingForReset) {
        log::warn!("Game over ignored: {}", err);
        return;
    }
    let score = session.score.score;
    session.emit(GameEvent::GameOver { score });
}

/// Put the session back to a fresh run
///
/// Only valid while waiting for reset; every field is restored before the
/// caller can observe the session again.
pub fn restart(session: &mut GameSession) {
    if let Err(err) = session.state.transition(GameState::Running) {
        log::warn!("Restart ignored: {}", err);
        return;
    }

    session.background = SKY_COLOR;
    session.bird.respawn(&session.tuning);
    session.score.reset();
    session.score_pulse = Default::default();
    session.pairs.clear();
    session.scroll.resume();

    session.emit(GameEvent::Restarted);
    session.emit(GameEvent::Audio(AudioCue::StartAmbient));
    log::info!("Restarted");
}

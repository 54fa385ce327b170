//! Idle/demo mode controller
//!
//! Taps whenever the bird sinks below the middle of the next opening, and taps
//! again to restart after a crash. Good enough to keep an attract-mode demo
//! going; not meant to be unbeatable.

use super::state::{GameSession, GameState};

/// How far below the target the bird may drop before flapping
const SINK_MARGIN: f32 = 20.0;

/// Height the bird should aim for right now
pub fn target_height(session: &GameSession) -> f32 {
    let bird = &session.bird;
    session
        .pairs
        .iter()
        .filter(|p| p.lower_rect().max.x + bird.radius >= bird.pos.x)
        .min_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
        .map(|p| p.gap_center())
        .unwrap_or(session.tuning.height / 2.0)
}

/// Whether the demo player would tap this frame
pub fn wants_tap(session: &GameSession) -> bool {
    match session.state {
        GameState::Running => {
            let bird = &session.bird;
            bird.vel_y <= 0.0 && bird.pos.y < target_height(session) - SINK_MARGIN
        }
        GameState::WaitingForReset => true,
        GameState::Crashed => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ObstaclePair;

    #[test]
    fn test_taps_when_sinking_below_gap() {
        let mut session = GameSession::new(3);
        let tuning = session.tuning;
        session
            .pairs
            .push(ObstaclePair::new(1, 600.0, 400.0, 180.0, &tuning));

        session.bird.pos.y = 450.0;
        session.bird.vel_y = -50.0;
        assert_eq!(target_height(&session), 490.0);
        assert!(wants_tap(&session));

        session.bird.vel_y = 100.0;
        assert!(!wants_tap(&session), "already rising");

        session.bird.pos.y = 600.0;
        session.bird.vel_y = -50.0;
        assert!(!wants_tap(&session), "above the gap");
    }

    #[test]
    fn test_ignores_pairs_behind_the_bird() {
        let mut session = GameSession::new(3);
        let tuning = session.tuning;
        session
            .pairs
            .push(ObstaclePair::new(1, -200.0, 400.0, 180.0, &tuning));
        assert_eq!(target_height(&session), tuning.height / 2.0);
    }

    #[test]
    fn test_restarts_after_game_over() {
        let mut session = GameSession::new(3);
        session.state = GameState::WaitingForReset;
        assert!(wants_tap(&session));
        session.state = GameState::Crashed;
        assert!(!wants_tap(&session));
    }
}

//! Contact detection and response for the bird
//!
//! The bird is a circle; everything it can touch is a [`Rect`]. This module
//! finds the overlaps, reports them as [`Contact`]s, and pushes the bird out
//! of bodies that physically block it.

use glam::Vec2;

use super::entity::{Body, Contact, EntityKind};
use super::geom::Rect;
use super::state::{Bird, ObstaclePair};

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact point on the rectangle (if hit)
    pub point: Vec2,
    /// Surface normal at the contact, pointing toward the circle center
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check overlap between a circle and a rectangle
///
/// Touching edges do not count; the circle must actually overlap.
pub fn circle_rect_collision(center: Vec2, radius: f32, rect: &Rect) -> CollisionResult {
    if rect.contains_point(center) {
        // Center is inside the rectangle: leave through the nearest face
        let faces = [
            (center.x - rect.min.x, Vec2::NEG_X),
            (rect.max.x - center.x, Vec2::X),
            (center.y - rect.min.y, Vec2::NEG_Y),
            (rect.max.y - center.y, Vec2::Y),
        ];
        let (depth, normal) = faces
            .into_iter()
            .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
            .unwrap_or((0.0, Vec2::Y));

        return CollisionResult {
            hit: true,
            point: center + normal * depth,
            normal,
            penetration: depth + radius,
        };
    }

    let closest = rect.closest_point(center);
    let delta = center - closest;
    let dist_sq = delta.length_squared();
    if dist_sq >= radius * radius {
        return CollisionResult::miss();
    }

    let dist = dist_sq.sqrt();
    CollisionResult {
        hit: true,
        point: closest,
        normal: delta / dist,
        penetration: radius - dist,
    }
}

/// All contacts the bird reports this tick, scoring triggers first
///
/// A trigger contact is listed before any lethal one so a point earned on the
/// same frame as a crash still counts.
pub fn detect_contacts(
    bird: &Bird,
    ground: &Rect,
    pairs: &[ObstaclePair],
) -> Vec<(Contact, CollisionResult)> {
    let mut triggers = Vec::new();
    let mut lethal = Vec::new();

    for pair in pairs {
        let trigger = circle_rect_collision(bird.pos, bird.radius, &pair.trigger_rect());
        if trigger.hit && EntityKind::Bird.tests_contact_with(EntityKind::ScoreTrigger) {
            triggers.push((Contact::new(Body::BIRD, Body::score_trigger(pair.id)), trigger));
        }
        for rect in [pair.lower_rect(), pair.upper_rect()] {
            let result = circle_rect_collision(bird.pos, bird.radius, &rect);
            if result.hit {
                lethal.push((Contact::new(Body::BIRD, Body::obstacle(pair.id)), result));
            }
        }
    }

    let ground_hit = circle_rect_collision(bird.pos, bird.radius, ground);
    if ground_hit.hit {
        lethal.push((Contact::new(Body::BIRD, Body::GROUND), ground_hit));
    }

    triggers.extend(lethal);
    triggers
}

/// Push the bird out of every body that blocks it
///
/// Only the vertical part of the correction applies; the bird's column is fixed.
pub fn apply_blocking(bird: &mut Bird, contacts: &[(Contact, CollisionResult)]) {
    if !bird.collidable {
        return;
    }
    for (contact, result) in contacts {
        let other = contact.other_than_bird();
        if !EntityKind::Bird.collides_with(other.kind) {
            continue;
        }
        bird.pos.y += result.normal.y * result.penetration;
        // Landing on a surface kills downward motion
        if result.normal.y > 0.5 && bird.vel_y < 0.0 {
            bird.vel_y = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;

    fn bird_at(x: f32, y: f32) -> Bird {
        let mut bird = Bird::new(&Tuning::default());
        bird.pos = Vec2::new(x, y);
        bird
    }

    #[test]
    fn test_circle_rect_outside_edge() {
        let rect = Rect::new(Vec2::ZERO, Vec2::new(100.0, 100.0));

        // Circle just above the top edge, overlapping by 2
        let result = circle_rect_collision(Vec2::new(50.0, 108.0), 10.0, &rect);
        assert!(result.hit);
        assert!((result.normal - Vec2::Y).length() < 0.001);
        assert!((result.penetration - 2.0).abs() < 0.001);

        // Exactly touching is not an overlap
        let result = circle_rect_collision(Vec2::new(50.0, 110.0), 10.0, &rect);
        assert!(!result.hit);
    }

    #[test]
    fn test_circle_rect_corner_miss() {
        let rect = Rect::new(Vec2::ZERO, Vec2::new(100.0, 100.0));
        // Diagonal distance to the corner is ~11.3 > 10
        let result = circle_rect_collision(Vec2::new(108.0, 108.0), 10.0, &rect);
        assert!(!result.hit);
    }

    #[test]
    fn test_circle_center_inside_rect() {
        let rect = Rect::new(Vec2::ZERO, Vec2::new(100.0, 40.0));
        let result = circle_rect_collision(Vec2::new(50.0, 35.0), 10.0, &rect);
        assert!(result.hit);
        // Nearest face is the top one
        assert!((result.normal - Vec2::Y).length() < 0.001);
        assert!((result.penetration - 15.0).abs() < 0.001);
    }

    #[test]
    fn test_ground_contact_and_blocking() {
        let tuning = Tuning::default();
        let ground = Rect::new(Vec2::ZERO, Vec2::new(tuning.width, tuning.ground_height));
        let mut bird = bird_at(200.0, tuning.ground_height + tuning.bird_radius - 5.0);
        bird.vel_y = -300.0;

        let contacts = detect_contacts(&bird, &ground, &[]);
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].0.other_than_bird().kind, EntityKind::Ground);

        apply_blocking(&mut bird, &contacts);
        assert!((bird.pos.y - (tuning.ground_height + tuning.bird_radius)).abs() < 0.001);
        assert_eq!(bird.vel_y, 0.0);
    }

    #[test]
    fn test_side_hit_keeps_bird_column() {
        let tuning = Tuning::default();
        let ground = Rect::new(Vec2::ZERO, Vec2::new(tuning.width, tuning.ground_height));
        let pair = ObstaclePair::new(1, 300.0, 700.0, 180.0, &tuning);
        // Just overlapping the lower pipe's left face, well below its top
        let face = pair.lower_rect().min.x;
        let mut bird = bird_at(face - tuning.bird_radius + 1.5, 500.0);
        let before = bird.pos;

        let contacts = detect_contacts(&bird, &ground, std::slice::from_ref(&pair));
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].0.other_than_bird(), Body::obstacle(1));
        assert!(contacts[0].1.normal.x < 0.0);

        apply_blocking(&mut bird, &contacts);
        assert_eq!(bird.pos, before);
    }

    #[test]
    fn test_frozen_bird_is_not_pushed() {
        let tuning = Tuning::default();
        let ground = Rect::new(Vec2::ZERO, Vec2::new(tuning.width, tuning.ground_height));
        let mut bird = bird_at(200.0, tuning.ground_height + 10.0);
        bird.freeze();
        let before = bird.pos;

        let contacts = detect_contacts(&bird, &ground, &[]);
        apply_blocking(&mut bird, &contacts);
        assert_eq!(bird.pos, before);
    }

    #[test]
    fn test_trigger_does_not_block() {
        let tuning = Tuning::default();
        let ground = Rect::new(Vec2::ZERO, Vec2::new(tuning.width, tuning.ground_height));
        let pair = ObstaclePair::new(1, 300.0, 500.0, 180.0, &tuning);
        let trigger = pair.trigger_rect();
        let mut bird = bird_at(trigger.center().x, 590.0);
        let before = bird.pos;

        let contacts = detect_contacts(&bird, &ground, std::slice::from_ref(&pair));
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].0.other_than_bird(), Body::score_trigger(1));

        apply_blocking(&mut bird, &contacts);
        assert_eq!(bird.pos, before);
    }

    #[test]
    fn test_trigger_contacts_listed_first() {
        let tuning = Tuning::default();
        let ground = Rect::new(Vec2::ZERO, Vec2::new(tuning.width, tuning.ground_height));
        let pair = ObstaclePair::new(3, 300.0, 500.0, 180.0, &tuning);
        // Inside the trigger column and sinking into the ground
        let bird = bird_at(pair.trigger_rect().center().x, tuning.ground_height + 5.0);

        let contacts = detect_contacts(&bird, &ground, std::slice::from_ref(&pair));
        assert!(contacts.len() >= 2);
        assert_eq!(contacts[0].0.other_than_bird().kind, EntityKind::ScoreTrigger);
        assert!(contacts[1..]
            .iter()
            .all(|(c, _)| c.other_than_bird().kind != EntityKind::ScoreTrigger));
    }
}

//! Entity kinds and the contact compatibility table
//!
//! Each physics body carries an [`EntityKind`]. Which kinds block each other,
//! which kinds report contacts, and what a reported contact means for the
//! game are all answered by the tables below.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// The player
    Bird,
    /// Floor strip along the bottom of the playfield
    Ground,
    /// Upper or lower pipe of an obstacle pair
    Obstacle,
    /// Intangible volume behind a pipe column that awards a point
    ScoreTrigger,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Bird,
        EntityKind::Ground,
        EntityKind::Obstacle,
        EntityKind::ScoreTrigger,
    ];

    /// Whether the two bodies physically block each other
    pub fn collides_with(self, other: EntityKind) -> bool {
        use EntityKind::*;
        matches!(
            (self, other),
            (Bird, Ground) | (Ground, Bird) | (Bird, Obstacle) | (Obstacle, Bird)
        )
    }

    /// Whether an overlap between the two bodies is reported as a contact
    pub fn tests_contact_with(self, other: EntityKind) -> bool {
        use EntityKind::*;
        match (self, other) {
            (Bird, Ground | Obstacle | ScoreTrigger) => true,
            (Ground | Obstacle | ScoreTrigger, Bird) => true,
            _ => false,
        }
    }
}

/// A body taking part in a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Body {
    pub kind: EntityKind,
    /// Owning obstacle pair for pipes and triggers
    pub pair_id: Option<u32>,
}

impl Body {
    pub const BIRD: Body = Body {
        kind: EntityKind::Bird,
        pair_id: None,
    };
    pub const GROUND: Body = Body {
        kind: EntityKind::Ground,
        pair_id: None,
    };

    pub fn obstacle(pair_id: u32) -> Self {
        Self {
            kind: EntityKind::Obstacle,
            pair_id: Some(pair_id),
        }
    }

    pub fn score_trigger(pair_id: u32) -> Self {
        Self {
            kind: EntityKind::ScoreTrigger,
            pair_id: Some(pair_id),
        }
    }
}

/// A contact reported between two bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub a: Body,
    pub b: Body,
}

impl Contact {
    pub fn new(a: Body, b: Body) -> Self {
        Self { a, b }
    }

    /// The non-bird side of the contact
    pub fn other_than_bird(&self) -> Body {
        if self.a.kind == EntityKind::Bird { self.b } else { self.a }
    }
}

/// What the resolver does with a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactAction {
    Score,
    Lethal,
    Ignore,
}

/// Classify a pair of kinds
///
/// A scoring trigger on either side wins; any other bird contact is lethal.
pub fn classify(a: EntityKind, b: EntityKind) -> ContactAction {
    if !a.tests_contact_with(b) {
        return ContactAction::Ignore;
    }
    if a == EntityKind::ScoreTrigger || b == EntityKind::ScoreTrigger {
        ContactAction::Score
    } else {
        ContactAction::Lethal
    }
}

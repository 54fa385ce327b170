//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick`
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod entity;
pub mod events;
pub mod geom;
pub mod resolver;
pub mod scroll;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, circle_rect_collision, detect_contacts};
pub use entity::{Body, Contact, ContactAction, EntityKind, classify};
pub use events::{AudioCue, GameEvent};
pub use geom::Rect;
pub use resolver::{crash, finish_game_over, resolve_contact, restart};
pub use scroll::{ScrollDriver, ScrollLayer};
pub use spawner::{ObstacleSpawner, offset_range, spawn_pair};
pub use state::{
    Bird, GameSession, GameState, ObstaclePair, ScorePulse, ScoreState, tilt_for_velocity,
};
pub use tick::{TickInput, tick};

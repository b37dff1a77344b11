//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only (no wall-clock time)
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod collision;
pub mod physics;
pub mod scroller;
pub mod spawner;
pub mod state;
pub mod tick;

pub use aabb::Aabb;
pub use state::{
    BonusItem, Contact, Entity, EntityKind, EntityRegistry, GameEvent, Mode, ObstaclePair,
    OffscreenPolicy, Player, TileStrip, TimeOfDay, World,
};
pub use tick::{GameState, TickInput, TickReport, tick};

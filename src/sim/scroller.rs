//! Horizontal scrolling
//!
//! Tiles wrap to produce an endless strip; obstacles and bonuses only move
//! here and are despawned by the registry once off-screen.

use super::state::{Entity, EntityRegistry, OffscreenPolicy, TileStrip};

/// Move one entity left and apply its kind's off-screen policy
///
/// Returns `false` if the entity should be despawned.
pub fn scroll_entity(entity: &mut Entity, speed: f32) -> bool {
    entity.bounds.pos.x -= speed;
    let width = entity.width();
    match entity.kind.offscreen_policy() {
        OffscreenPolicy::Wrap => {
            if entity.bounds.pos.x <= -width {
                // Two tiles per strip: jumping two widths lands flush behind the partner
                entity.bounds.pos.x += 2.0 * width;
            }
            true
        }
        OffscreenPolicy::Despawn => entity.bounds.right() >= 0.0,
    }
}

/// Advance both tiles of a strip
pub fn scroll_strip(strip: &mut TileStrip, speed: f32) {
    for tile in &mut strip.tiles {
        scroll_entity(tile, speed);
    }
}

/// Advance all obstacles and bonuses, then despawn the ones that left the canvas
///
/// Returns the number of despawned entities.
pub fn scroll_registry(registry: &mut EntityRegistry, speed: f32) -> usize {
    for pair in registry.pairs_mut() {
        for member in pair.members_mut() {
            scroll_entity(member, speed);
        }
    }
    for bonus in registry.bonuses_mut() {
        scroll_entity(&mut bonus.entity, speed);
    }
    registry.despawn_offscreen()
}

//! Collision detection and scoring triggers
//!
//! Runs once per session tick and returns that tick's events. Nothing is
//! queued across ticks: the caller drains the list before the next tick.

use super::state::{Contact, GameEvent, World};

/// Detect bonus pickups, lethal contact and passed obstacles
pub fn detect(world: &mut World) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let player = world.player.bounds;

    // Bonus pickups
    for bonus in world.registry.bonuses_mut() {
        if !bonus.collected
            && bonus.entity.kind.contact() == Contact::Collect
            && bonus.entity.bounds.intersects(&player)
        {
            bonus.collected = true;
            events.push(GameEvent::BonusCollected {
                bonus_id: bonus.entity.id,
            });
        }
    }
    world.registry.remove_collected();

    // Ground or obstacle: reported once per session
    if !world.death_reported && world.lethal_entities().any(|e| e.bounds.intersects(&player)) {
        world.death_reported = true;
        events.push(GameEvent::PlayerDied);
    }

    // Passing: the pair's left edge moved behind the player's column
    let player_x = world.player.x();
    for pair in world.registry.pairs_mut() {
        if !pair.passed && pair.x() < player_x {
            pair.passed = true;
            events.push(GameEvent::ObstaclePassed { pair_id: pair.id });
        }
    }

    events
}

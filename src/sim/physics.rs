//! Vertical physics for the player
//!
//! Positive velocity moves the player up the screen, so position is updated
//! with `y -= velocity` in canvas space (y grows downward).

use super::state::Player;
use crate::tuning::Tuning;

/// Overwrite the current velocity with the jump impulse
pub fn jump(player: &mut Player, tuning: &Tuning) {
    player.velocity = tuning.jump_impulse;
}

/// Advance the player by one tick
///
/// When the player is at or above the ceiling the velocity is forced to
/// `-15 * g` instead of the gravity step. There is no floor clamp: ground
/// contact is handled by collision.
pub fn integrate(player: &mut Player, tuning: &Tuning) {
    if player.y() <= 0.0 {
        player.velocity = tuning.ceiling_push();
    } else {
        player.velocity -= tuning.gravity;
    }
    player.bounds.pos.y -= player.velocity;
}

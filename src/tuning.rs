//! Data-driven game balance
//!
//! Every gameplay constant lives here exactly once. Values are per logical
//! tick (the simulation runs at a fixed rate), distances are canvas units.

use serde::{Deserialize, Serialize};

/// Gameplay tuning table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration subtracted from velocity each tick
    pub gravity: f32,
    /// Velocity set by a jump (positive = upward)
    pub jump_impulse: f32,
    /// Horizontal scroll per tick for tiles, obstacles and bonuses
    pub scroll_speed: f32,
    /// Vertical clearance between the halves of an obstacle pair
    pub gap: f32,
    /// Inclusive range for the lower obstacle's top edge
    pub lower_y_min: i32,
    pub lower_y_max: i32,
    /// Probability that a pair carries a bonus coin
    pub bonus_chance: f64,
    /// Pairs placed ahead of the player when a session starts
    pub prespawn_count: u32,
    /// x of the first pre-spawned pair
    pub first_obstacle_x: f32,
    /// Horizontal distance between consecutive pairs
    pub obstacle_spacing: f32,
    /// Price of each purchasable variant
    pub variant_price: u32,
    /// Blocking pause after a death before returning to the menu
    pub death_pause_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            jump_impulse: 7.0,
            scroll_speed: 2.0,
            gap: 100.0,
            lower_y_min: 200,
            lower_y_max: 350,
            bonus_chance: 0.25,
            prespawn_count: 4,
            first_obstacle_x: 300.0,
            obstacle_spacing: 160.0,
            variant_price: 250,
            death_pause_ms: 1500,
        }
    }
}

impl Tuning {
    /// Velocity forced on the player when it touches the ceiling
    pub fn ceiling_push(&self) -> f32 {
        -15.0 * self.gravity
    }

    /// Repair values that would break simulation invariants
    pub fn sanitized(mut self) -> Self {
        if self.lower_y_min > self.lower_y_max {
            log::warn!(
                "tuning: lower_y_min {} > lower_y_max {}, swapping",
                self.lower_y_min,
                self.lower_y_max
            );
            std::mem::swap(&mut self.lower_y_min, &mut self.lower_y_max);
        }
        self.bonus_chance = self.bonus_chance.clamp(0.0, 1.0);
        if self.scroll_speed < 0.0 {
            self.scroll_speed = 0.0;
        }
        self
    }
}

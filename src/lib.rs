//! Skylight - A side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, scrolling, spawning, collisions, game modes)
//! - `progression`: Session score and the durable player profile
//! - `persistence`: Profile storage backends
//! - `tuning`: Data-driven game balance
//! - `settings`: Runtime preferences loaded from disk
//! - `ui`: On-screen controls and hit-testing
//! - `app`: Fixed-tick application loop over the platform collaborators
//! - `platform`, `renderer`, `audio`: Terminal input, timing, presentation and sound

pub mod app;
pub mod audio;
pub mod error;
pub mod persistence;
pub mod platform;
pub mod progression;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use error::{Error, Result};
pub use progression::{PlayerProfile, Progression};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical ticks per second (physics assumes a fixed rate)
    pub const TICK_RATE: u32 = 60;

    /// Logical canvas dimensions
    pub const CANVAS_WIDTH: f32 = 288.0;
    pub const CANVAS_HEIGHT: f32 = 512.0;

    /// Top edge of the ground strip
    pub const GROUND_Y: f32 = 400.0;

    /// Player sprite - x never changes, the world scrolls past it
    pub const PLAYER_X: f32 = 60.0;
    pub const PLAYER_START_Y: f32 = 220.0;
    pub const PLAYER_WIDTH: f32 = 34.0;
    pub const PLAYER_HEIGHT: f32 = 24.0;

    /// Obstacle sprite (one half of a pair)
    pub const OBSTACLE_WIDTH: f32 = 52.0;
    pub const OBSTACLE_HEIGHT: f32 = 320.0;

    /// Bonus coin
    pub const BONUS_SIZE: f32 = 24.0;

    /// Scrolling tiles
    pub const BACKDROP_WIDTH: f32 = CANVAS_WIDTH;
    pub const GROUND_WIDTH: f32 = 336.0;
    pub const GROUND_HEIGHT: f32 = 112.0;

    /// Player animation: ticks per wing frame
    pub const ANIM_TICKS_PER_FRAME: u32 = 5;
}

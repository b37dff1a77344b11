//! Platform abstraction layer
//!
//! Handles the terminal side of:
//! - Time/ticks (`time`)
//! - Input events (`input`)
//! - Canvas <-> terminal coordinate mapping (`viewport`)
//! - Animation frame sequences (`assets`)

pub mod assets;
pub mod input;
pub mod time;
pub mod viewport;

pub use assets::AnimationCycle;
pub use input::{InputSource, TerminalInput};
pub use time::{Clock, TickClock};
pub use viewport::Viewport;

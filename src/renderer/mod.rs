//! Terminal rendering
//!
//! Half-block pixel canvas plus a text overlay. The simulation never calls
//! into this module; the application loop hands it the state once per tick.

pub mod canvas;
pub mod sprites;
pub mod terminal;

pub use terminal::TerminalPresenter;

use crate::Result;
use crate::sim::GameState;

/// Draws one frame of the current state
pub trait Presenter {
    fn present(&mut self, state: &GameState) -> Result<()>;
}

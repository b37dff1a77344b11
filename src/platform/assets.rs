//! Animation frame sequences
//!
//! Frames are supplied by the presentation layer; an empty frame set for a
//! required category is a fatal asset error.

use crate::{Error, Result};

/// A cyclic, infinite, restartable sequence of frames
#[derive(Debug, Clone)]
pub struct AnimationCycle<T> {
    frames: Vec<T>,
    index: usize,
}

impl<T> AnimationCycle<T> {
    /// Build a cycle for `category`; fails if there are no frames
    pub fn new(category: &str, frames: Vec<T>) -> Result<Self> {
        if frames.is_empty() {
            return Err(Error::MissingAsset(category.to_string()));
        }
        Ok(Self { frames, index: 0 })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame at an arbitrary position, wrapping around
    pub fn frame(&self, position: usize) -> &T {
        &self.frames[position % self.frames.len()]
    }

    /// Frame the cycle is currently on
    pub fn current(&self) -> &T {
        &self.frames[self.index]
    }

    /// Move to the next frame, wrapping to the first
    pub fn advance(&mut self) -> &T {
        self.index = (self.index + 1) % self.frames.len();
        &self.frames[self.index]
    }

    /// Back to the first frame
    pub fn restart(&mut self) {
        self.index = 0;
    }
}

impl<T: Clone> Iterator for AnimationCycle<T> {
    type Item = T;

    /// Never returns `None`
    fn next(&mut self) -> Option<T> {
        let frame = self.current().clone();
        self.index = (self.index + 1) % self.frames.len();
        Some(frame)
    }
}
